//! Core functionality shared by the hooks.
//!
//! - [`error`]: Error types and result handling
//! - [`executor`]: Bounded external process execution
//! - [`fallback`]: Mapping environmental failures to fallback values
//! - [`git`]: Git repository operations
//! - [`state`]: Marker files and TTL-bound cache records

pub mod error;
pub mod executor;
pub mod fallback;
pub mod git;
pub mod state;
