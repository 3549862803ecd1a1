//! Service catalog: the records shown on the public homepage and the store
//! that manages them.

pub mod domain;
pub mod store;

pub use domain::{Service, ServiceInput};
pub use store::ServiceStore;
