//! Dining Table API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/tables | GET | user |
//! | /api/tables | POST | user |
//! | /api/tables/{id} | PUT | user |
//! | /api/tables/{id} | DELETE | user |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
