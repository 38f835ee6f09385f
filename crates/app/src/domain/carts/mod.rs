//! Carts

pub mod aggregation;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
