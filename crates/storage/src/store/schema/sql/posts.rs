#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS board_posts (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          board_type TEXT NOT NULL REFERENCES boards(code),
          title TEXT NOT NULL,
          author TEXT NOT NULL,
          content TEXT NOT NULL,
          view_count INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        -- View log rows go away with their post (foreign_keys is switched on per connection).
        CREATE TABLE IF NOT EXISTS post_views (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          post_id INTEGER NOT NULL REFERENCES board_posts(id) ON DELETE CASCADE,
          viewer_ip TEXT,
          viewed_at_ms INTEGER NOT NULL
        );
"#;
