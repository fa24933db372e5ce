//! Orders

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
