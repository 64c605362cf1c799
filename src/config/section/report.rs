//! `[report]` section configuration.
//!
//! Controls how files that do not map cleanly are reported.
//!
//! # Example
//!
//! ```toml
//! [report]
//! unmatched = "ignore"   # files matching no bucket rule: ignore | warn | error
//! misrooted = "warn"     # files outside their bucket root: ignore | warn | error
//! ```

use serde::{Deserialize, Serialize};

/// How a class of anomalies is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    /// Skip silently (visible with `--verbose`).
    #[default]
    Ignore,
    /// Log each occurrence, keep going.
    Warn,
    /// Fail the run after the scan; nothing is written.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Files whose path matches no bucket rule. They never reach the manifest.
    pub unmatched: ReportLevel,

    /// Files whose bucket path climbs out of the bucket root (`../`).
    /// They are still written to the manifest unless the level is `error`.
    pub misrooted: ReportLevel,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unmatched: ReportLevel::Ignore,
            misrooted: ReportLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_report_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.report.unmatched, ReportLevel::Ignore);
        assert_eq!(config.report.misrooted, ReportLevel::Warn);
    }

    #[test]
    fn test_report_custom() {
        let config = test_parse_config("[report]\nunmatched = \"error\"\nmisrooted = \"ignore\"");
        assert_eq!(config.report.unmatched, ReportLevel::Error);
        assert_eq!(config.report.misrooted, ReportLevel::Ignore);
    }
}
