//! Café Domain Concerns

pub mod menu;
pub mod orders;
pub mod profiles;
