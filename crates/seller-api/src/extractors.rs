//! Axum extractors and application state

use std::sync::Arc;
use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use seller_contracts::UseCases;
use seller_core::RequestContext;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub use_cases: Arc<dyn UseCases>,
    /// Deadline applied to every request's store calls
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(use_cases: Arc<dyn UseCases>, request_timeout: Duration) -> Self {
        Self {
            use_cases,
            request_timeout,
        }
    }

    /// A fresh context for one request.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new().with_timeout(self.request_timeout)
    }
}

/// JSON body that has passed `validator` checks.
///
/// Malformed JSON and failed validation are both rejected with 400.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}
