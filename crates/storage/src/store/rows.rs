#![forbid(unsafe_code)]

use super::StoreError;
use bb_core::board::Board;
use bb_core::clock::format_ts_ms;
use bb_core::{Post, PostDetail, ViewLogEntry};
use rusqlite::Row;

pub(super) const POST_COLUMNS: &str =
    "p.id, p.board_type, p.title, p.author, p.content, p.view_count, p.created_at_ms, p.updated_at_ms";

#[derive(Debug)]
pub(super) struct PostRow {
    id: i64,
    board_type: String,
    title: String,
    author: String,
    content: String,
    view_count: i64,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl PostRow {
    /// Reads the eight `POST_COLUMNS` starting at column 0.
    pub(super) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            board_type: row.get(1)?,
            title: row.get(2)?,
            author: row.get(3)?,
            content: row.get(4)?,
            view_count: row.get(5)?,
            created_at_ms: row.get(6)?,
            updated_at_ms: row.get(7)?,
        })
    }

    pub(super) fn into_post(self) -> Result<Post, StoreError> {
        let board_type =
            Board::from_code(&self.board_type).ok_or(StoreError::UnknownBoard(self.board_type))?;
        Ok(Post {
            id: self.id,
            board_type,
            title: self.title,
            author: self.author,
            content: self.content,
            view_count: self.view_count,
            created_at: format_ts_ms(self.created_at_ms),
            updated_at: format_ts_ms(self.updated_at_ms),
        })
    }
}

pub(super) fn into_detail(row: PostRow, board_name: Option<String>) -> Result<PostDetail, StoreError> {
    Ok(PostDetail {
        post: row.into_post()?,
        board_name,
    })
}

pub(super) fn read_view_log(row: &Row<'_>) -> rusqlite::Result<ViewLogEntry> {
    Ok(ViewLogEntry {
        id: row.get(0)?,
        post_id: row.get(1)?,
        viewer_ip: row.get(2)?,
        viewed_at: format_ts_ms(row.get(3)?),
    })
}

/// `LIKE` pattern matching `keyword` as a literal substring (escape char `\`).
pub(super) fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
