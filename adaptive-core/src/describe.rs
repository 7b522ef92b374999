//! Plain-text rendering of requests and responses for diagnostics.

use std::fmt::{Display, Formatter, Result};

/// Writes `Title` followed by one `  name: value` line per set field.
pub(crate) struct Fields<'f, 'a> {
    f: &'f mut Formatter<'a>,
    result: Result,
}

impl<'f, 'a> Fields<'f, 'a> {
    pub(crate) fn new(f: &'f mut Formatter<'a>, title: &str) -> Self {
        let result = write!(f, "{title}");
        Fields { f, result }
    }

    pub(crate) fn field(mut self, name: &str, value: impl Display) -> Self {
        if self.result.is_ok() {
            self.result = write!(self.f, "\n  {name}: {value}");
        }
        self
    }

    pub(crate) fn opt<V: Display>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    pub(crate) fn finish(self) -> Result {
        self.result
    }
}
