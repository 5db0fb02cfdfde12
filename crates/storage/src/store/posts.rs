#![forbid(unsafe_code)]

use super::rows::{POST_COLUMNS, PostRow, like_pattern};
use super::{CreatePostRequest, PostPage, SqliteStore, StoreError, UpdatePostRequest};
use bb_core::{ListQuery, Pagination};
use rusqlite::{TransactionBehavior, params};

impl SqliteStore {
    pub fn list_posts(&self, query: &ListQuery) -> Result<PostPage, StoreError> {
        let pattern = query.keyword.as_deref().map(like_pattern);

        let total_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM board_posts p \
             WHERE p.board_type = ?1 AND (?2 IS NULL OR p.title LIKE ?2 ESCAPE '\\')",
            params![query.board.code(), pattern],
            |row| row.get(0),
        )?;
        let pagination = Pagination::compute(total_count, query.page_size, query.page);

        let sql = format!(
            "SELECT {POST_COLUMNS} FROM board_posts p \
             WHERE p.board_type = ?1 AND (?2 IS NULL OR p.title LIKE ?2 ESCAPE '\\') \
             ORDER BY p.id DESC \
             LIMIT ?3 OFFSET ?4"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![
            query.board.code(),
            pattern,
            query.page_size,
            query.offset()
        ])?;

        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(PostRow::read(row)?.into_post()?);
        }

        Ok(PostPage { posts, pagination })
    }

    pub fn create_post(&mut self, request: CreatePostRequest) -> Result<i64, StoreError> {
        let post = request.post;
        self.conn.execute(
            "INSERT INTO board_posts(board_type, title, author, content, view_count, created_at_ms, updated_at_ms) \
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
            params![
                post.board_type.code(),
                post.title,
                post.author,
                post.content,
                request.created_at_ms,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Rewrites title/author/content. The board and `created_at` never change here.
    pub fn update_post(&mut self, request: UpdatePostRequest) -> Result<(), StoreError> {
        let edit = request.edit;
        let changed = self.conn.execute(
            "UPDATE board_posts SET title=?1, author=?2, content=?3, updated_at_ms=?4 WHERE id=?5",
            params![
                edit.title,
                edit.author,
                edit.content,
                request.updated_at_ms,
                request.post_id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }

    /// Deletes a post and, through the cascade, its view log. A missing id still
    /// commits the (empty) transaction before reporting `UnknownId`.
    pub fn delete_post(&mut self, post_id: i64) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let deleted = tx.execute("DELETE FROM board_posts WHERE id=?1", params![post_id])?;
        tx.commit()?;

        if deleted == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }
}
