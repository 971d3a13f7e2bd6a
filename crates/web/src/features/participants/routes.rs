use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_participant, delete_all_participants, delete_participant, get_participant,
    list_participants, record_times, record_times_bulk, update_participant,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_participant))
        .route("/", delete(delete_all_participants))
        .route("/times", put(record_times_bulk))
        .route("/:id", put(update_participant))
        .route("/:id", delete(delete_participant))
        .route("/:id/times", put(record_times))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_participants))
        .route("/:id", get(get_participant))
        .merge(protected)
}
