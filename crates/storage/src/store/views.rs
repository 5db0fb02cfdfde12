#![forbid(unsafe_code)]

use super::rows::{POST_COLUMNS, PostRow, into_detail, read_view_log};
use super::{SqliteStore, StoreError, ViewPostRequest};
use bb_core::{PostDetail, ViewLogEntry};
use rusqlite::{OptionalExtension, TransactionBehavior, params};

impl SqliteStore {
    /// Counts a view and returns the post with its board name, atomically.
    ///
    /// For an unknown id the increment touches nothing, no view row is written,
    /// and the committed transaction yields `None`.
    pub fn view_post(&mut self, request: ViewPostRequest) -> Result<Option<PostDetail>, StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let bumped = tx.execute(
            "UPDATE board_posts SET view_count = view_count + 1 WHERE id=?1",
            params![request.post_id],
        )?;
        if bumped > 0 {
            tx.execute(
                "INSERT INTO post_views(post_id, viewer_ip, viewed_at_ms) VALUES (?1, ?2, ?3)",
                params![request.post_id, request.viewer_ip, request.viewed_at_ms],
            )?;
        }

        let sql = format!(
            "SELECT {POST_COLUMNS}, b.name FROM board_posts p \
             LEFT JOIN boards b ON p.board_type = b.code \
             WHERE p.id=?1"
        );
        let found = tx
            .query_row(&sql, params![request.post_id], |row| {
                Ok((PostRow::read(row)?, row.get::<_, Option<String>>(8)?))
            })
            .optional()?;

        tx.commit()?;

        found
            .map(|(row, board_name)| into_detail(row, board_name))
            .transpose()
    }

    pub fn view_log(&self, post_id: i64) -> Result<Vec<ViewLogEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, post_id, viewer_ip, viewed_at_ms FROM post_views \
             WHERE post_id=?1 \
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![post_id], read_view_log)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
