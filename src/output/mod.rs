//! Output stage: the printed report and the files written to disk.

pub mod report;
pub mod writer;

pub use report::write_report;
pub use writer::{filter_by_suffix, persist, JsonListing};
