//! Authentication

mod errors;
mod handlers;
pub(crate) mod middleware;

pub(crate) use errors::into_api_error;
pub(crate) use handlers::*;
