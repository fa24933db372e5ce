//! Authentication

mod errors;
mod models;
mod password;
pub(crate) mod repository;
mod service;
mod token;
mod validation;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
pub use validation::{FieldErrors, validate_registration};
