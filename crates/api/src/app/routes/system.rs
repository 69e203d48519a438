use axum::http::{Method, StatusCode, Uri};

use crate::app::response::{Payload, Reply};

pub async fn status() -> Reply {
    Reply::ok(Payload::ok("Everything is alright"))
}

/// Fallback for paths no route matches.
pub async fn not_found(method: Method, uri: Uri) -> Reply {
    Reply {
        status: StatusCode::NOT_FOUND,
        payload: Payload::Text(format!("no route for {method} {}", uri.path())),
    }
}
