//! Domain layer - Core types and port definitions
//!
//! This module defines the claim/workload model and the cluster port that
//! adapters implement, following hexagonal architecture principles.

pub mod ports;

pub use ports::*;
