//! Core of the shop's admin backend, independent of the web framework.
//! - `catalog`: the service records and the store managing them.
//! - `storage`: interchangeable persistence backends tried in order.
//! - `auth`: the single-credential session gate.

pub mod auth;
pub mod catalog;
pub mod errors;
pub mod storage;
