//! Orphaned Claim Cleanup
//!
//! The decision logic of the reaper:
//! - filter: name rules narrowing which claims are considered
//! - usage: which claims running pods reference
//! - classifier: whether a claim is an orphan, and why
//! - orchestrator: one list, filter, classify, delete pass
//! - report: per-claim outcomes of a pass

pub mod classifier;
pub mod filter;
pub mod orchestrator;
pub mod report;
pub mod usage;

pub use classifier::*;
pub use filter::*;
pub use orchestrator::*;
pub use report::*;
pub use usage::*;
