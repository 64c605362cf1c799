//! Utility modules.

pub mod path;

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "entry", "entries")` -> `"0 entries"`
/// - `plural_count(1, "entry", "entries")` -> `"1 entry"`
#[inline]
pub fn plural_count(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}
