use std::net::SocketAddr;

use axum::{
    Json,
    extract::{
        ConnectInfo, Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use bb_core::board::Board;
use bb_core::clock::now_ms_i64;
use bb_core::ids::parse_leading_int;
use bb_core::{
    AckBody, ListQuery, NewPost, PostCreatedBody, PostDetailBody, PostEdit, PostListBody,
};
use bb_storage::{CreatePostRequest, UpdatePostRequest, ViewPostRequest};
use tracing::{debug, info};

use super::PostFields;
use crate::{error::ApiError, state::AppState};

type RawId = Result<Path<String>, PathRejection>;
type RawParams = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// List parameters as raw pairs. A repeated key keeps its first value and an
/// unreadable query string counts as empty, so every input lands on defaults.
fn list_query(params: RawParams) -> ListQuery {
    let pairs = match params {
        Ok(Query(pairs)) => pairs,
        Err(err) => {
            debug!(error = %err, "unreadable query string, using defaults");
            Vec::new()
        }
    };
    let first = |key: &str| {
        pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    };

    note_board_coercion(first("board"));
    ListQuery::from_raw(first("board"), first("page"), first("pageSize"), first("keyword"))
}

fn parse_id(raw: RawId) -> Result<i64, ApiError> {
    let Path(raw) = raw.map_err(|err| {
        debug!(error = %err, "unreadable post id");
        ApiError::InvalidId
    })?;
    parse_leading_int(&raw).ok_or(ApiError::InvalidId)
}

fn note_board_coercion(raw: Option<&str>) {
    if let Some(raw) = raw.filter(|raw| Board::from_code(raw).is_none()) {
        debug!(requested = raw, "unknown board, using free");
    }
}

pub(crate) async fn list_posts(
    State(state): State<AppState>,
    params: RawParams,
) -> Result<Json<PostListBody>, ApiError> {
    let query = list_query(params);

    let page = state
        .pool
        .run(move |store| store.list_posts(&query).map_err(ApiError::from))
        .await?;

    Ok(Json(PostListBody {
        success: true,
        data: page.posts,
        pagination: page.pagination,
    }))
}

pub(crate) async fn get_post(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    raw_id: RawId,
) -> Result<Json<PostDetailBody>, ApiError> {
    let post_id = parse_id(raw_id)?;
    let request = ViewPostRequest {
        post_id,
        viewer_ip: connect_info.map(|ConnectInfo(addr)| addr.ip().to_string()),
        viewed_at_ms: now_ms_i64(),
    };

    let detail = state
        .pool
        .run(move |store| store.view_post(request).map_err(ApiError::from))
        .await?
        .ok_or(ApiError::NotFound("post not found"))?;

    Ok(Json(PostDetailBody {
        success: true,
        data: detail,
    }))
}

pub(crate) async fn create_post(
    State(state): State<AppState>,
    fields: PostFields,
) -> Result<Json<PostCreatedBody>, ApiError> {
    note_board_coercion(fields.board_type.as_deref());
    let post = NewPost::from_fields(
        fields.board_type.as_deref(),
        fields.title,
        fields.author,
        fields.content,
    )?;
    let request = CreatePostRequest {
        post,
        created_at_ms: now_ms_i64(),
    };

    let id = state
        .pool
        .run(move |store| store.create_post(request).map_err(ApiError::from))
        .await?;
    info!(post_id = id, "post created");

    Ok(Json(PostCreatedBody { success: true, id }))
}

pub(crate) async fn update_post(
    State(state): State<AppState>,
    raw_id: RawId,
    fields: PostFields,
) -> Result<Json<AckBody>, ApiError> {
    let post_id = parse_id(raw_id)?;
    let edit = PostEdit::from_fields(fields.title, fields.author, fields.content)?;
    let request = UpdatePostRequest {
        post_id,
        edit,
        updated_at_ms: now_ms_i64(),
    };

    state
        .pool
        .run(move |store| {
            store
                .update_post(request)
                .map_err(ApiError::not_found_or("no post to update"))
        })
        .await?;
    info!(post_id, "post updated");

    Ok(Json(AckBody { success: true }))
}

pub(crate) async fn delete_post(
    State(state): State<AppState>,
    raw_id: RawId,
) -> Result<Json<AckBody>, ApiError> {
    let post_id = parse_id(raw_id)?;

    state
        .pool
        .run(move |store| {
            store
                .delete_post(post_id)
                .map_err(ApiError::not_found_or("no post to delete"))
        })
        .await?;
    info!(post_id, "post deleted");

    Ok(Json(AckBody { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> RawParams {
        Ok(Query(
            raw.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn repeated_list_keys_keep_the_first_value() {
        let query = list_query(pairs(&[
            ("page", "3"),
            ("page", "5"),
            ("board", "notice"),
            ("board", "free"),
            ("pageSize", "x"),
        ]));
        assert_eq!(query.page, 3);
        assert_eq!(query.board, Board::Notice);
        assert_eq!(query.page_size, bb_core::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn ids_overflowing_i64_saturate() {
        assert_eq!(
            parse_id(Ok(Path("99999999999999999999".to_string()))).ok(),
            Some(i64::MAX)
        );
        assert!(matches!(
            parse_id(Ok(Path("abc".to_string()))),
            Err(ApiError::InvalidId)
        ));
    }
}
