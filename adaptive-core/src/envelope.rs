//! Request envelope sent with every operation.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{nvp::ParameterSet, types::DetailLevel};

pub const DEFAULT_ERROR_LANGUAGE: &str = "en_US";

/// Common metadata attached to every request.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// RFC 3066 language tag for error messages.
    #[builder(into, default = DEFAULT_ERROR_LANGUAGE.to_string())]
    #[serde(default = "default_error_language")]
    pub error_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_level: Option<DetailLevel>,
}

fn default_error_language() -> String {
    DEFAULT_ERROR_LANGUAGE.to_string()
}

impl Default for RequestEnvelope {
    fn default() -> Self {
        RequestEnvelope::builder().build()
    }
}

impl RequestEnvelope {
    pub fn new(error_language: impl Into<String>) -> Self {
        RequestEnvelope::builder()
            .error_language(error_language)
            .build()
    }

    pub fn append_to(&self, params: &mut ParameterSet) {
        params.push_opt(
            "requestEnvelope.errorLanguage",
            Some(self.error_language.as_str()),
        );
        params.push_opt("requestEnvelope.detailLevel", self.detail_level);
    }
}
