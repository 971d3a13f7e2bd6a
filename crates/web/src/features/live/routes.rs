use axum::{
    Router, middleware,
    routing::{delete, get, put},
};
use storage::Database;

use super::handlers::{clear_active, get_active, get_active_id, set_active};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/active", delete(clear_active))
        .route("/active/:id", put(set_active))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/active", get(get_active))
        .route("/active-id", get(get_active_id))
        .merge(protected)
}
