//! Config field path used in diagnostics.

use owo_colors::{OwoColorize, Stream};
use std::borrow::Cow;
use std::fmt;

/// Dotted path of a config field, e.g. `storage.endpoint` or `bucket[2].root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Field of the `index`-th `[[bucket]]` table.
    pub fn bucket(index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("bucket[{index}].{field}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted = format!("`{}`", self.0);
        write!(
            f,
            "{}",
            quoted.if_supports_color(Stream::Stdout, |text| text.bright_blue())
        )
    }
}
