//! Category API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/categories | GET | none (active only) |
//! | /api/categories/all | GET | user |
//! | /api/categories | POST | admin |
//! | /api/categories/{id} | GET | none |
//! | /api/categories/{id} | PUT | admin |
//! | /api/categories/{id} | DELETE | admin (deactivates) |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Before /{id} so "all" is not parsed as an id
        .route("/all", get(handler::list_all))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
