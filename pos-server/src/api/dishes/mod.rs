//! Dish API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/dishes | GET | none |
//! | /api/dishes | POST | user (multipart) |
//! | /api/dishes/{id} | GET | none |
//! | /api/dishes/{id} | PUT | user (multipart) |
//! | /api/dishes/{id} | DELETE | user |
//! | /api/dishes/{id}/image | GET | none |

mod form;
mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/dishes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/image", get(handler::image))
}
