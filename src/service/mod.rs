//! Service layer module.
//!
//! Contains the random value service, its local fallback, and the range
//! expression evaluator.

pub mod choice;
pub mod local;
pub mod random;
pub mod range;

pub use choice::Choices;
pub use local::LocalSource;
pub use random::{ALPHANUMERIC, RandomService};
pub use range::{RangeExpression, UPPER_BOUND, evaluate, is_prime};
