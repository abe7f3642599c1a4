//! API routes

use axum::{
    routing::{get, post},
    Router,
};
use seller_models::{
    Attribute, Category, ClientType, Integration, Order, OrderProducts, Product, Role, User,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::extractors::AppState;
use crate::handlers::{self, create, destroy, show, update};
use crate::resource::Resource;

/// Create the complete API router
pub fn router(state: AppState) -> Router {
    let v1 = Router::new();
    let v1 = resource::<User>(v1);
    let v1 = resource::<Role>(v1);
    let v1 = resource::<ClientType>(v1);
    let v1 = resource::<Integration>(v1);
    let v1 = resource::<Product>(v1);
    let v1 = resource::<Category>(v1);
    let v1 = resource::<Attribute>(v1);
    let v1 = resource::<Order>(v1);
    let v1 = resource::<OrderProducts>(v1);

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .merge(v1)
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

fn resource<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            &format!("/v1/{}", R::PATH),
            post(create::<R>).put(update::<R>),
        )
        .route(
            &format!("/v1/{}/:id", R::PATH),
            get(show::<R>).delete(destroy::<R>),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use seller_contracts::mock::MockUseCases;
    use seller_core::{ErrorKind, Stage, StoreError};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn app(use_cases: MockUseCases) -> Router {
        router(AppState::new(Arc::new(use_cases), Duration::from_secs(5)))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = app(MockUseCases::new())
            .oneshot(empty_request("GET", "/healthz"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_product_returns_assigned_id() {
        let mut uc = MockUseCases::new();
        uc.expect_create_product()
            .withf(|_, p| p.name == "Widget" && p.cost == 500)
            .times(1)
            .returning(|_, p| {
                p.id = Some("p1".to_string());
                Ok(())
            });

        let response = app(uc)
            .oneshot(json_request(
                "POST",
                "/v1/product",
                json!({"name": "Widget", "category_id": "c1", "cost": 500}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], "p1");
        assert_eq!(body["name"], "Widget");
    }

    #[tokio::test]
    async fn test_invalid_body_never_reaches_use_cases() {
        let response = app(MockUseCases::new())
            .oneshot(json_request(
                "POST",
                "/v1/product",
                json!({"name": "Widget", "category_id": "c1", "cost": 500, "discount": 150}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("discount"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/category")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let response = app(MockUseCases::new()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut uc = MockUseCases::new();
        uc.expect_get_order()
            .withf(|_, id| id == "o404")
            .returning(|_, id| Err(StoreError::not_found("Order", id)));

        let response = app(uc)
            .oneshot(empty_request("GET", "/v1/order/o404"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Order 'o404' not found"})
        );
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let response = app(MockUseCases::new())
            .oneshot(json_request("PUT", "/v1/integration", json!({"name": "site"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Integration id is required"})
        );
    }

    #[tokio::test]
    async fn test_update_returns_stamped_entity() {
        let mut uc = MockUseCases::new();
        uc.expect_update_integration()
            .times(1)
            .returning(|_, integration| {
                integration.updated_at = Some(chrono::Utc::now());
                Ok(())
            });

        let response = app(uc)
            .oneshot(json_request(
                "PUT",
                "/v1/integration",
                json!({"id": "i1", "name": "site"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], "i1");
        assert!(body["updated_at"].is_string());
    }

    #[tokio::test]
    async fn test_delete_returns_no_content() {
        let mut uc = MockUseCases::new();
        uc.expect_delete_order_products()
            .withf(|_, id| id == "op1")
            .times(1)
            .returning(|_, _| Ok(()));

        let response = app(uc)
            .oneshot(empty_request("DELETE", "/v1/order_products/op1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_store_failures_map_to_status() {
        let cases = [
            (ErrorKind::ConstraintViolation, StatusCode::CONFLICT),
            (ErrorKind::Unavailable, StatusCode::SERVICE_UNAVAILABLE),
            (ErrorKind::Invalid, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (kind, status) in cases {
            let mut uc = MockUseCases::new();
            uc.expect_delete_role().returning(move |_, _| {
                Err(StoreError::new(kind, Stage::Execute, "secret detail")
                    .context("AuthRepo.delete_role"))
            });

            let response = app(uc)
                .oneshot(empty_request("DELETE", "/v1/role/r1"))
                .await
                .unwrap();
            assert_eq!(response.status(), status);

            let body = body_json(response).await;
            assert!(!body["error"].as_str().unwrap().contains("secret"));
        }
    }

    #[tokio::test]
    async fn test_user_password_is_not_echoed() {
        let mut uc = MockUseCases::new();
        uc.expect_create_user().times(1).returning(|_, user| {
            user.id = Some("u1".to_string());
            Ok(())
        });

        let response = app(uc)
            .oneshot(json_request(
                "POST",
                "/v1/user",
                json!({
                    "name": "Ann",
                    "username": "ann",
                    "password": "hunter2",
                    "role_id": "r1",
                    "birth_date": "1990-04-02"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["birth_date"], "1990-04-02");
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_request_carries_deadline() {
        let mut uc = MockUseCases::new();
        uc.expect_get_category()
            .withf(|ctx, _| ctx.deadline().is_some() && !ctx.is_cancelled())
            .times(1)
            .returning(|_, id| {
                Ok(seller_models::Category {
                    id: Some(id.to_string()),
                    name: "Shoes".to_string(),
                    ..Default::default()
                })
            });

        let response = app(uc)
            .oneshot(empty_request("GET", "/v1/category/c1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
