//! Remote provider layer module.
//!
//! This module provides a trait-based abstraction over the remote "true random"
//! provider so backends can be swapped without changing the sourcing logic.

pub mod factory;
pub mod http;
pub mod offline;
pub mod traits;

pub use factory::create_provider;
pub use http::RandomOrgProvider;
pub use offline::OfflineProvider;
pub use traits::RandomProvider;
