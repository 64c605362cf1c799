//! Configuration section definitions.
//!
//! Each module corresponds to a section in `bucketmap.toml`:
//!
//! | Module    | TOML Section   | Purpose                                 |
//! |-----------|----------------|-----------------------------------------|
//! | `paths`   | `[paths]`      | Public root, scan root, output file     |
//! | `storage` | `[storage]`    | Project id and public endpoint template |
//! | `scan`    | `[scan]`       | File names skipped during the walk      |
//! | `report`  | `[report]`     | Unmatched / misrooted reporting levels  |
//! | `bucket`  | `[[bucket]]`   | Ordered bucket rules and roots          |

pub mod bucket;
mod paths;
mod report;
mod scan;
pub mod storage;

// Re-export section configs
pub use bucket::{BucketConfig, default_buckets, validate_buckets};
pub use paths::PathsConfig;
pub use report::{ReportConfig, ReportLevel};
pub use scan::ScanConfig;
pub use storage::StorageConfig;
