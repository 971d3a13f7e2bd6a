use axum::{Router, middleware, routing::post};
use storage::Database;

use super::handlers::{complete_round, reset_results};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/rounds/:round/complete", post(complete_round))
        .route("/results/reset", post(reset_results))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
