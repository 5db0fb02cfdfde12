#![forbid(unsafe_code)]

use bb_core::{NewPost, Pagination, Post, PostEdit};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub post: NewPost,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdatePostRequest {
    pub post_id: i64,
    pub edit: PostEdit,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewPostRequest {
    pub post_id: i64,
    pub viewer_ip: Option<String>,
    pub viewed_at_ms: i64,
}

/// One page of a board listing plus the envelope describing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}
