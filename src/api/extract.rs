//! Request extractors
//!
//! Wrappers around axum extractors that report failures through `AppError`,
//! so malformed parameters get the same JSON body as every other error.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Query string extractor with a JSON `invalid_parameter` rejection
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Limit {
        limit: u32,
    }

    async fn extract(uri: &str) -> Result<ApiQuery<Limit>, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ApiQuery::<Limit>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_query_is_extracted() {
        let ApiQuery(params) = extract("/top?limit=3").await.unwrap();
        assert_eq!(params.limit, 3);
    }

    #[tokio::test]
    async fn test_malformed_query_becomes_app_error() {
        let err = extract("/top?limit=many").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(ref msg) if msg.contains("limit")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
