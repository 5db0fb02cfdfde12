#![forbid(unsafe_code)]

//! Response envelopes of the posts API. Every body carries `success`; failures
//! carry `message` instead of a payload.

use super::{Pagination, Post, PostDetail};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListBody {
    pub success: bool,
    pub data: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailBody {
    pub success: bool,
    pub data: PostDetail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreatedBody {
    pub success: bool,
    pub id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckBody {
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

impl FailureBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
