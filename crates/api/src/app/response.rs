//! Success responses.
//!
//! The caller picks the payload kind explicitly; nothing is inferred from the
//! runtime shape of a value. Text goes out verbatim, everything else as
//! tab-indented JSON.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use fleetreg_core::{StatusResult, User};

use super::errors::{ApiError, TEXT_PLAIN};

pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Status(StatusResult),
    Entity(User),
    EntityList(Vec<User>),
}

impl Payload {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::Status(StatusResult::ok(message))
    }

    /// Content type and body bytes for this payload.
    pub fn render(&self) -> Result<(&'static str, Vec<u8>), serde_json::Error> {
        match self {
            Self::Text(text) => Ok((TEXT_PLAIN, text.clone().into_bytes())),
            Self::Status(status) => Ok((APPLICATION_JSON, to_indented_json(status)?)),
            Self::Entity(user) => Ok((APPLICATION_JSON, to_indented_json(user)?)),
            Self::EntityList(users) => Ok((APPLICATION_JSON, to_indented_json(users)?)),
        }
    }
}

fn to_indented_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// A payload paired with the status it should be written with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub payload: Payload,
}

impl Reply {
    pub fn ok(payload: Payload) -> Self {
        Self {
            status: StatusCode::OK,
            payload,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.payload.render() {
            Ok((content_type, body)) => {
                (self.status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            // Never reuse the success status for a body we failed to produce.
            Err(e) => ApiError::Serialization(e).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetreg_core::{BirthDay, UserId};

    #[test]
    fn status_payload_is_indented_json() {
        let (content_type, body) = Payload::ok("User Added").render().unwrap();
        assert_eq!(content_type, APPLICATION_JSON);
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("\n\t\"ok\": true"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!({"ok": true, "message": "User Added"}));
    }

    #[test]
    fn text_payload_is_written_verbatim() {
        let (content_type, body) = Payload::Text("pong".into()).render().unwrap();
        assert_eq!(content_type, TEXT_PLAIN);
        assert_eq!(body, b"pong");
    }

    #[test]
    fn entity_list_serializes_as_array() {
        let user = User {
            id: UserId::new(1),
            complete_name: "Jane Doe".into(),
            sex: true,
            birth_day: BirthDay::parse("2020-07-02").unwrap(),
            password: "hash".into(),
            users_cars: vec![],
        };
        let (_, body) = Payload::EntityList(vec![user]).render().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value[0]["complete_name"], "Jane Doe");
        assert_eq!(value[0]["users_cars"], serde_json::json!([]));
        assert!(value[0].get("password").is_none());
    }

    #[test]
    fn reply_keeps_requested_status() {
        let res = Reply {
            status: StatusCode::CREATED,
            payload: Payload::ok("done"),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()[header::CONTENT_TYPE], APPLICATION_JSON);
    }
}
