#![forbid(unsafe_code)]

//! Pure projection of `UiState` into a screen description. Front ends decide
//! how to paint it: the terminal shell prints `Display`, an HTML host can use
//! `PostView::to_html`.

use crate::state::{Mode, PostForm, UiState};
use bb_core::board::Board;
use bb_core::clock::display_ts;
use std::fmt;

pub const EMPTY_LIST: &str = "No posts yet.";
pub const EMPTY_PANEL: &str = "Select a post from the list.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub tabs: Vec<Tab>,
    pub keyword: String,
    pub rows: Vec<Row>,
    pub pagination: Option<PaginationBar>,
    pub panel: Panel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub board: Board,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub view_count: i64,
    pub created: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationBar {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub pages: Vec<PageButton>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageButton {
    pub number: i64,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Empty(&'static str),
    Post(PostView),
    Form(FormView),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub board_label: String,
    pub author: String,
    pub view_count: i64,
    pub created: String,
    pub updated: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    pub heading: &'static str,
    pub form: PostForm,
    pub delete_enabled: bool,
}

pub fn render(state: &UiState) -> Screen {
    let tabs = Board::ALL
        .into_iter()
        .map(|board| Tab {
            board,
            label: board.default_name(),
            active: board == state.board,
        })
        .collect();

    let rows = state
        .posts
        .iter()
        .map(|post| Row {
            id: post.id,
            title: post.title.clone(),
            author: post.author.clone(),
            view_count: post.view_count,
            created: display_ts(&post.created_at),
            selected: state.selected_id == Some(post.id),
        })
        .collect();

    Screen {
        tabs,
        keyword: state.keyword.clone(),
        rows,
        pagination: pagination_bar(state),
        panel: panel(state),
    }
}

fn pagination_bar(state: &UiState) -> Option<PaginationBar> {
    let pagination = state.pagination?;
    if pagination.total_pages <= 1 {
        return None;
    }
    let current = pagination.current_page;
    Some(PaginationBar {
        prev_enabled: pagination.has_prev(),
        next_enabled: pagination.has_next(),
        pages: (1..=pagination.total_pages)
            .map(|number| PageButton {
                number,
                active: number == current,
            })
            .collect(),
    })
}

fn panel(state: &UiState) -> Panel {
    match (&state.mode, &state.detail) {
        (Mode::Edit(form), _) => Panel::Form(FormView {
            heading: if form.id.is_some() { "Edit post" } else { "New post" },
            form: form.clone(),
            delete_enabled: form.id.is_some(),
        }),
        (Mode::View, Some(detail)) => {
            let post = &detail.post;
            Panel::Post(PostView {
                id: post.id,
                title: post.title.clone(),
                board_label: detail
                    .board_name
                    .clone()
                    .unwrap_or_else(|| post.board_type.default_name().to_string()),
                author: post.author.clone(),
                view_count: post.view_count,
                created: display_ts(&post.created_at),
                updated: display_ts(&post.updated_at),
                content: post.content.clone(),
            })
        }
        (Mode::View, None) => Panel::Empty(EMPTY_PANEL),
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

impl PostView {
    /// Detail fragment with every user-supplied string escaped and content
    /// newlines turned into `<br/>`.
    pub fn to_html(&self) -> String {
        format!(
            "<h2>{title}</h2>\n\
             <div class=\"detail-meta\">\
             <span>[{board}]</span> \
             <span>author: {author}</span> \
             <span>views: {views}</span> \
             <span>created: {created}</span> \
             <span>updated: {updated}</span>\
             </div>\n\
             <div class=\"detail-content\">{content}</div>",
            title = escape_html(&self.title),
            board = escape_html(&self.board_label),
            author = escape_html(&self.author),
            views = self.view_count,
            created = escape_html(&self.created),
            updated = escape_html(&self.updated),
            content = escape_html(&self.content).replace('\n', "<br/>"),
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tabs: Vec<String> = self
            .tabs
            .iter()
            .map(|tab| {
                if tab.active {
                    format!("[{}]", tab.label)
                } else {
                    format!(" {} ", tab.label)
                }
            })
            .collect();
        writeln!(f, "{}", tabs.join(" "))?;
        if !self.keyword.trim().is_empty() {
            writeln!(f, "search: {}", self.keyword.trim())?;
        }

        if self.rows.is_empty() {
            writeln!(f, "  {EMPTY_LIST}")?;
        }
        for row in &self.rows {
            let marker = if row.selected { '>' } else { ' ' };
            writeln!(
                f,
                "{marker} #{:<5} {:<32} {:<12} {:>5}  {}",
                row.id, row.title, row.author, row.view_count, row.created
            )?;
        }

        if let Some(bar) = &self.pagination {
            let pages: Vec<String> = bar
                .pages
                .iter()
                .map(|page| {
                    if page.active {
                        format!("[{}]", page.number)
                    } else {
                        page.number.to_string()
                    }
                })
                .collect();
            let prev = if bar.prev_enabled { "<prev" } else { "     " };
            let next = if bar.next_enabled { "next>" } else { "" };
            writeln!(f, "{prev} {} {next}", pages.join(" "))?;
        }

        writeln!(f, "{}", "-".repeat(60))?;
        match &self.panel {
            Panel::Empty(message) => writeln!(f, "{message}"),
            Panel::Post(view) => {
                writeln!(f, "{} [{}]", view.title, view.board_label)?;
                writeln!(
                    f,
                    "author: {} | views: {} | created: {} | updated: {}",
                    view.author, view.view_count, view.created, view.updated
                )?;
                writeln!(f)?;
                writeln!(f, "{}", view.content)
            }
            Panel::Form(form) => {
                let board = if form.form.id.is_some() {
                    format!("{} (fixed)", form.form.board_type)
                } else {
                    form.form.board_type.to_string()
                };
                writeln!(f, "{}", form.heading)?;
                writeln!(f, "board:   {board}")?;
                writeln!(f, "title:   {}", form.form.title)?;
                writeln!(f, "author:  {}", form.form.author)?;
                writeln!(f, "content: {}", form.form.content)
            }
        }
    }
}
