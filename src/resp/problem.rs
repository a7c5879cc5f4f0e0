use std::fmt::{Display, Formatter};
use std::io::Cursor;

use rocket::http::ContentType;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::{response, Request, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::StoreError;

/// JSON error body, `{"error": ..., "status": ..., "detail"?: ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub status: Status,
    pub error: String,
    pub detail: Option<String>,
    pub body: Map<String, Value>,
}

/// Wire shape of [Problem], for clients and the OpenAPI document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl Default for Problem {
    fn default() -> Self {
        Problem {
            status: Status::InternalServerError,
            error: "Problem".to_string(),
            detail: None,
            body: Map::new(),
        }
    }
}

impl Problem {
    pub fn new(status: Status, error: impl ToString) -> Problem {
        Problem {
            status,
            error: error.to_string(),
            ..Default::default()
        }
    }

    pub fn detail(&mut self, value: impl ToString) -> &mut Problem {
        self.detail = Some(value.to_string());
        self
    }

    pub fn insert_str(&mut self, key: impl ToString, value: impl ToString) -> &mut Problem {
        self.body
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    fn into_json(self) -> Map<String, Value> {
        let mut body = self.body;
        body.insert(String::from("error"), Value::from(self.error));
        body.insert(String::from("status"), Value::from(self.status.code));
        if let Some(detail) = self.detail {
            body.insert(String::from("detail"), Value::from(detail));
        }
        body
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl std::error::Error for Problem {}

impl<'r> Responder<'r, 'static> for Problem {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status;
        let body_string = Value::Object(self.into_json()).to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .raw_header("Content-Language", "en")
            .sized_body(body_string.len(), Cursor::new(body_string))
            .ok()
    }
}

pub mod problems {
    use crate::resp::problem::Problem;
    use rocket::http::Status;

    #[inline]
    pub fn invalid_id(id: impl ToString) -> Problem {
        Problem::new(Status::BadRequest, "Invalid class ID")
            .insert_str("id", id)
            .to_owned()
    }

    #[inline]
    pub fn class_not_found() -> Problem {
        Problem::new(Status::NotFound, "Class not found")
    }

    /// Bodies aren't validated; anything that fails to parse is a server-side failure.
    #[inline]
    pub fn malformed_body(error: impl ToString, context: &str) -> Problem {
        tracing::error!("{}: {}", context, error.to_string());
        Problem::new(Status::InternalServerError, context)
    }
}

impl StoreError {
    /// Maps an accessor failure onto a response. Causes are logged, never sent to the client.
    pub fn into_problem(self, context: &str) -> Problem {
        match self {
            StoreError::NotFound(_) => problems::class_not_found(),
            other => {
                tracing::error!("{}: {}", context, other);
                Problem::new(Status::InternalServerError, context)
            }
        }
    }
}
