use std::collections::HashMap;

use axum::{
    Form, Json, async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value;
use std::convert::Infallible;

/// Write-request fields, read from a JSON or urlencoded body.
///
/// Only string values count; a body that does not decode yields all `None`,
/// which the presence checks then reject.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFields {
    pub board_type: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

impl PostFields {
    fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            board_type: field("board_type"),
            title: field("title"),
            author: field("author"),
            content: field("content"),
        }
    }

    fn from_form(mut form: HashMap<String, String>) -> Self {
        Self {
            board_type: form.remove("board_type"),
            title: form.remove("title"),
            author: form.remove("author"),
            content: form.remove("content"),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for PostFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let fields = if is_form {
            Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .ok()
                .map(|Form(form)| Self::from_form(form))
        } else {
            Json::<Value>::from_request(req, state)
                .await
                .ok()
                .map(|Json(value)| Self::from_json(&value))
        };

        Ok(fields.unwrap_or_default())
    }
}
