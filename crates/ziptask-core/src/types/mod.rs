//! Validated input types for task operations.
//!
//! Types in this module are checked against the filesystem on construction,
//! so operations receiving them can rely on their invariants.

pub mod source;

pub use source::SourceKind;
pub use source::SourcePath;
