//! Path extractor for menu item identifiers

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use super::error::ApiError;
use crate::domain::ItemId;

/// Extracts the `{id}` path segment as an `ItemId`
///
/// Non-integer segments are rejected with a 400 JSON error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemIdPath(pub ItemId);

impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        parse_item_id(&raw).map(ItemIdPath)
    }
}

fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse::<i64>()
        .map(ItemId::new)
        .map_err(|_| ApiError::bad_request(format!("The value '{}' is not a valid id.", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("42").unwrap(), ItemId::new(42));
        assert_eq!(parse_item_id("-1").unwrap(), ItemId::new(-1));
    }

    #[test]
    fn test_parse_item_id_rejects_non_integers() {
        for raw in ["abc", "1.5", "", "99999999999999999999"] {
            let err = parse_item_id(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }

        assert_eq!(
            parse_item_id("abc").unwrap_err().message,
            "The value 'abc' is not a valid id."
        );
    }
}
