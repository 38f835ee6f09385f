//! Failures that indicate a miswired server rather than a bad request.
//!
//! Handlers reach the shared state and assemble response headers through
//! these helpers; when either step fails the request degrades to a logged
//! 500 instead of a panic.

use std::{any::Any, fmt::Display};

use salvo::prelude::{Depot, StatusError};
use tracing::error;

pub(crate) trait InternalError<T> {
    /// Logs the error under the given context and degrades to a 500.
    fn or_internal_error(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> InternalError<T> for Result<T, E>
where
    E: Display,
{
    fn or_internal_error(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}

pub(crate) trait SharedState {
    /// Retrieves a value injected by the affix-state middleware.
    fn shared_state<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl SharedState for Depot {
    fn shared_state<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!("shared state missing from depot");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn errors_degrade_to_logged_500() {
        let result: Result<(), &str> = Err("header rejected");

        let status = result.or_internal_error("assembling response").unwrap_err();

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_depot_degrades_to_500() {
        let depot = Depot::new();

        let status = depot.shared_state::<u32>().unwrap_err();

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
