//! Domain models for truerand.
//!
//! This module contains the value objects passed between the services, the
//! provider seam, and the command line.

pub mod quota;
pub mod range_set;
pub mod request;
pub mod rpc;
pub mod sequence;

pub use quota::QuotaState;
pub use range_set::RangeSet;
pub use request::{FetchOptions, RandomRequest};
pub use rpc::IntegerBatch;
pub use sequence::{GeneratedSequence, Source};
