use axum::Router;
use storage::Database;

use crate::middleware::auth::ApiKeys;

pub mod live;
pub mod participants;
pub mod ranking;
pub mod rounds;

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .nest("/participants", participants::routes::routes(api_keys.clone()))
        .nest("/rankings", ranking::routes::routes())
        .nest("/live", live::routes::routes(api_keys.clone()))
        .merge(rounds::routes::routes(api_keys))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http, http::StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/bullride")
            .unwrap();

        routes(ApiKeys::from_comma_separated("operator")).with_state(Database::from_pool(pool))
    }

    fn post(uri: &str, authorization: Option<&str>) -> http::Request<Body> {
        let mut builder = http::Request::builder().method("POST").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_round_is_bad_request() {
        let response = app()
            .oneshot(post("/rounds/BOGUS/complete", Some("Bearer operator")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_round_completion_requires_key() {
        let response = app()
            .oneshot(post("/rounds/PRELIM_1/complete", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reset_requires_key() {
        let response = app()
            .oneshot(post("/results/reset", Some("Bearer intruder")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
