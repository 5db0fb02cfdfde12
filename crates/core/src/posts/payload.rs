#![forbid(unsafe_code)]

use crate::board::Board;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostInputError {
    MissingField(&'static str),
}

impl PostInputError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "title, author and content are required",
        }
    }
}

impl std::fmt::Display for PostInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for PostInputError {}

fn required(field: &'static str, value: Option<String>) -> Result<String, PostInputError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(PostInputError::MissingField(field))
}

/// Body of a create request after board coercion and presence checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub board_type: Board,
    pub title: String,
    pub author: String,
    pub content: String,
}

impl NewPost {
    pub fn from_fields(
        board_type: Option<&str>,
        title: Option<String>,
        author: Option<String>,
        content: Option<String>,
    ) -> Result<Self, PostInputError> {
        Ok(Self {
            board_type: Board::coerce(board_type),
            title: required("title", title)?,
            author: required("author", author)?,
            content: required("content", content)?,
        })
    }
}

/// Body of an update request. The board is not editable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEdit {
    pub title: String,
    pub author: String,
    pub content: String,
}

impl PostEdit {
    pub fn from_fields(
        title: Option<String>,
        author: Option<String>,
        content: Option<String>,
    ) -> Result<Self, PostInputError> {
        Ok(Self {
            title: required("title", title)?,
            author: required("author", author)?,
            content: required("content", content)?,
        })
    }
}
