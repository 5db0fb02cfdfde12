#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_board_posts_board_id ON board_posts(board_type, id);
        CREATE INDEX IF NOT EXISTS idx_post_views_post ON post_views(post_id);
"#;
