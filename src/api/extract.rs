//! Request extractors that reject with the API's JSON error body
//!
//! axum's own `Path`, `Json` and `Query` rejections answer in plain text;
//! these wrappers turn them into `INVALID_INPUT` errors instead.

use super::dto::ListTicketsParams;
use super::error::ApiError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Path parameters, e.g. `ApiPath<(u64, u64)>` for `/tickets/:id/agent/:agent_id`
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))
    }
}

/// JSON request body
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))
    }
}

// Decoded as raw pairs so a repeated `status` key is kept rather than rejected
#[async_trait]
impl<S> FromRequestParts<S> for ListTicketsParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
        Ok(Self::from_pairs(pairs))
    }
}
