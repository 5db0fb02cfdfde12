#![forbid(unsafe_code)]

use crate::board::Board;
use serde::{Deserialize, Serialize};

/// A post as stored in `board_posts`, with timestamps rendered as RFC 3339.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub board_type: Board,
    pub title: String,
    pub author: String,
    pub content: String,
    pub view_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A post joined with the display name of its board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub board_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLogEntry {
    pub id: i64,
    pub post_id: i64,
    pub viewer_ip: Option<String>,
    pub viewed_at: String,
}
