//! Custom JSON extractor that returns errors as JSON

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiErrorResponse;

/// Custom JSON extractor that converts all rejection errors to JSON format
///
/// An empty body deserializes as JSON `null`, so `Json<Option<T>>` yields
/// `None` for both a missing and a `null` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consume the extractor and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JSON rejection error that returns API error format
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl JsonRejection {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        let response = ApiErrorResponse {
            status_code: self.status.as_u16(),
            message: self.message,
        };

        (self.status, AxumJson(response)).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let has_json_content_type = is_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            JsonRejection::bad_request(format!("Failed to read request body: {}", e.body_text()))
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_str("null")
                .map(Json)
                .map_err(|_| JsonRejection::bad_request("Request body is required."));
        }

        if !has_json_content_type {
            return Err(JsonRejection::bad_request(
                "Missing Content-Type header. Expected 'application/json'.",
            ));
        }

        serde_json::from_slice(&bytes)
            .map(Json)
            .map_err(|e| JsonRejection::bad_request(format_serde_error(&e)))
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

/// Format the deserialization error to be more user-friendly
fn format_serde_error(err: &serde_json::Error) -> String {
    use serde_json::error::Category;

    match err.classify() {
        Category::Data => format!("Invalid JSON data: {}", err),
        Category::Syntax | Category::Eof => format!("Invalid JSON syntax: {}", err),
        Category::Io => "Failed to read request body".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        name: String,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");

        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = request(Some("application/json"), r#"{"name": "Blue Milk"}"#);

        let Json(value) = Json::<TestStruct>::from_request(req, &()).await.unwrap();
        assert_eq!(value.name, "Blue Milk");
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let req = request(None, "");

        let Json(value) = Json::<Option<TestStruct>>::from_request(req, &())
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_null_body() {
        let req = request(Some("application/json; charset=utf-8"), "null");

        let Json(value) = Json::<Option<TestStruct>>::from_request(req, &())
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_empty_body_for_required_value() {
        let req = request(Some("application/json"), "");

        let err = Json::<TestStruct>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let req = request(Some("application/json"), "{not json");

        let err = Json::<TestStruct>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_data_error() {
        let req = request(Some("application/json"), r#"{"name": 42}"#);

        let err = Json::<TestStruct>::from_request(req, &()).await.unwrap_err();
        assert!(err.message.starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = request(None, r#"{"name": "Blue Milk"}"#);

        let err = Json::<TestStruct>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("Content-Type"));
    }

    #[test]
    fn test_json_rejection_into_response() {
        let rejection = JsonRejection::bad_request("Test error");

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_json_into_inner() {
        let json = Json(42);
        assert_eq!(json.into_inner(), 42);
    }
}
