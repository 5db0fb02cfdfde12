#![forbid(unsafe_code)]

use crate::state::{Command, UiEvent};
use bb_core::{
    AckBody, FailureBody, ListQuery, NewPost, PostCreatedBody, PostDetail, PostDetailBody,
    PostEdit, PostListBody,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_API: &str = "http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server answered {status}: {message}")]
    Api { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unreadable response: {0}")]
    Decode(#[from] std::io::Error),
}

impl ClientError {
    /// Text worth showing to a user: the server's own message when there is
    /// one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Blocking client of the posts API.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        let agent = ureq::AgentBuilder::new().build();
        Self {
            base: base.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn list(&self, query: &ListQuery) -> Result<PostListBody, ClientError> {
        let mut request = self.agent.get(&self.url("/api/posts"));
        for (key, value) in query.to_pairs() {
            request = request.query(key, &value);
        }
        decode(request.call())
    }

    pub fn detail(&self, id: i64) -> Result<PostDetail, ClientError> {
        let body: PostDetailBody =
            decode(self.agent.get(&self.url(&format!("/api/posts/{id}"))).call())?;
        Ok(body.data)
    }

    pub fn create(&self, post: &NewPost) -> Result<i64, ClientError> {
        let body: PostCreatedBody = decode(self.agent.post(&self.url("/api/posts")).send_json(post))?;
        Ok(body.id)
    }

    pub fn update(&self, id: i64, edit: &PostEdit) -> Result<(), ClientError> {
        let _: AckBody = decode(
            self.agent
                .put(&self.url(&format!("/api/posts/{id}")))
                .send_json(edit),
        )?;
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<(), ClientError> {
        let _: AckBody = decode(
            self.agent
                .delete(&self.url(&format!("/api/posts/{id}")))
                .call(),
        )?;
        Ok(())
    }

    /// Runs a network command and turns its outcome into the follow-up event.
    /// Commands that need the user (alerts, confirmations) yield `None`.
    pub fn execute(&self, command: &Command) -> Option<UiEvent> {
        let event = match command {
            Command::FetchList(query) => match self.list(query) {
                Ok(body) => UiEvent::ListLoaded {
                    posts: body.data,
                    pagination: body.pagination,
                },
                Err(err) => failed("list", &err, "Could not load the post list."),
            },
            Command::FetchDetail(id) => match self.detail(*id) {
                Ok(detail) => UiEvent::DetailLoaded(detail),
                Err(err) => failed("detail", &err, "Could not load the post."),
            },
            Command::Create(post) => match self.create(post) {
                Ok(id) => UiEvent::Created(id),
                Err(err) => failed("create", &err, "Could not create the post."),
            },
            Command::Update { id, edit } => match self.update(*id, edit) {
                Ok(()) => UiEvent::Updated(*id),
                Err(err) => failed("update", &err, "Could not update the post."),
            },
            Command::Delete(id) => match self.delete(*id) {
                Ok(()) => UiEvent::Deleted(*id),
                Err(err) => failed("delete", &err, "Could not delete the post."),
            },
            Command::ConfirmDelete(_) | Command::Alert(_) => return None,
        };
        Some(event)
    }
}

fn failed(action: &str, err: &ClientError, fallback: &str) -> UiEvent {
    tracing::warn!(action, error = %err, "api request failed");
    UiEvent::RequestFailed(err.user_message(fallback))
}

fn decode<T: DeserializeOwned>(result: Result<ureq::Response, ureq::Error>) -> Result<T, ClientError> {
    match result {
        Ok(response) => Ok(response.into_json::<T>()?),
        Err(ureq::Error::Status(status, response)) => {
            let message = response
                .into_json::<FailureBody>()
                .map(|body| body.message)
                .unwrap_or_default();
            Err(ClientError::Api { status, message })
        }
        Err(ureq::Error::Transport(transport)) => Err(ClientError::Transport(transport.to_string())),
    }
}
