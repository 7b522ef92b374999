//! The name-value-pair (NVP) wire format.
//!
//! Requests are an ordered list of `key=value` pairs joined by `&`. Keys are
//! emitted verbatim (they contain dotted and indexed paths such as
//! `receiverList.receiver(0).email`), values are form-url-encoded.
//!
//! ```
//! use adaptive_core::nvp::{ParameterSet, decode};
//!
//! let mut params = ParameterSet::new();
//! params.push("currencyCode", "USD");
//! params.push("receiverList.receiver(0).email", "a@b.com");
//! assert_eq!(
//!     params.encode(),
//!     "currencyCode=USD&receiverList.receiver(0).email=a%40b.com"
//! );
//!
//! let decoded = decode(params.encode().as_bytes()).unwrap();
//! assert_eq!(decoded.get("receiverList.receiver(0).email"), Some("a@b.com"));
//! ```

use std::{collections::BTreeSet, fmt::Display};

use url::form_urlencoded;

use crate::{
    errors::{Error, Result},
    types::Record,
};

/// Separator between two pairs.
pub const PARAM_SEP: char = '&';
/// Separator between a key and its value.
pub const KEY_VALUE_SEP: char = '=';

/// An ordered sequence of NVP parameters.
///
/// Insertion order is preserved and keys are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pairs: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends a parameter only when a value is present and non-empty.
    pub fn push_opt<V: Display>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.pairs.push((key.into(), value));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All values recorded under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Serializes the set to the wire format.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push(PARAM_SEP);
            }
            out.push_str(key);
            out.push(KEY_VALUE_SEP);
            out.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        }
        out
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

impl Extend<(String, String)> for ParameterSet {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.pairs.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// A decoded NVP response.
///
/// Duplicate keys keep the last value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NvpMap {
    values: Record<String>,
}

impl NvpMap {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The value under `key`, or [`Error::MalformedResponse`] naming the key.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::MalformedResponse(format!("missing field {key}")))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates over every key starting with `prefix`.
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .keys()
            .filter(move |k| k.starts_with(prefix))
            .map(String::as_str)
    }

    /// Indices present in an indexed list such as `paymentInfoList.paymentInfo(i)`,
    /// in ascending order. Gaps are kept as they are.
    pub fn indices(&self, list: &str) -> Vec<usize> {
        let prefix = format!("{list}(");
        self.keys_with_prefix(&prefix)
            .filter_map(|key| {
                let (index, rest) = key[prefix.len()..].split_once(')')?;
                rest.starts_with('.').then_some(index.parse().ok()?)
            })
            .collect::<BTreeSet<usize>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl FromIterator<(String, String)> for NvpMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        NvpMap {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parses an NVP response body.
///
/// Fails with [`Error::InvalidResponseData`] when the body is empty, is not
/// UTF-8, or contains a non-empty segment without `=`. Empty segments, such as
/// a trailing `&`, are skipped.
pub fn decode(body: &[u8]) -> Result<NvpMap> {
    let text = std::str::from_utf8(body).map_err(|_| Error::invalid_response(body))?;
    if text.trim().is_empty() {
        return Err(Error::invalid_response(body));
    }

    let mut map = NvpMap::default();
    for segment in text.trim_end_matches(['\r', '\n']).split(PARAM_SEP) {
        if segment.is_empty() {
            continue;
        }
        let Some((key, value)) = segment.split_once(KEY_VALUE_SEP) else {
            return Err(Error::invalid_response(body));
        };
        map.insert(decode_component(key), decode_component(value));
    }
    Ok(map)
}

fn decode_component(raw: &str) -> String {
    // A literal `=` left in a value would be read as another separator.
    form_urlencoded::parse(raw.replace(KEY_VALUE_SEP, "%3D").as_bytes())
        .next()
        .map(|(k, _)| k.into_owned())
        .unwrap_or_default()
}
