//! Store error types.

use storefront_core::CommerceError;
use storefront_data::FetchError;
use thiserror::Error;

/// Errors a store operation can run into.
///
/// Store methods never return these directly; they are logged and
/// published on the [`StatusChannel`](crate::StatusChannel).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backend call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The backend does not know the resource.
    #[error("{0} not found")]
    NotFound(String),
}

impl StoreError {
    /// Convert a fetch error, mapping 404 to [`StoreError::NotFound`].
    pub fn from_fetch(error: FetchError, what: impl FnOnce() -> String) -> Self {
        if error.is_not_found() {
            StoreError::NotFound(what())
        } else {
            StoreError::Fetch(error)
        }
    }

    /// Check if the error is a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fetch_maps_not_found() {
        let missing = FetchError::Http { status: 404, message: "gone".into() };
        let err = StoreError::from_fetch(missing, || "item 3".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "item 3 not found");

        let busy = FetchError::Http { status: 503, message: "busy".into() };
        let err = StoreError::from_fetch(busy.clone(), || unreachable!());
        assert_eq!(err, StoreError::Fetch(busy));
    }
}
