//! # seller-api
//!
//! JSON HTTP API for AI-Seller RS.
//!
//! Every entity kind gets the same four routes under `/v1/<table>`:
//! `POST` creates, `GET /:id` reads, `PUT` overwrites (id in the body) and
//! `DELETE /:id` removes. `GET /healthz` is the liveness probe.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod resource;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extractors::AppState;
pub use routes::router;
