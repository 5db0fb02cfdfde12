//! UI state and the pure transition function driving it.
//!
//! `update` never performs I/O. It mutates the state and returns the commands
//! the shell must run; command results come back as further events.

use bb_core::board::Board;
use bb_core::{ListQuery, NewPost, Pagination, Post, PostDetail, PostEdit};

pub const PAGE_SIZE: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Board,
    Title,
    Author,
    Content,
}

/// Contents of the edit form. `id` is `None` while composing a new post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostForm {
    pub id: Option<i64>,
    pub board_type: Board,
    pub title: String,
    pub author: String,
    pub content: String,
}

impl PostForm {
    pub fn blank(board: Board) -> Self {
        Self {
            id: None,
            board_type: board,
            title: String::new(),
            author: String::new(),
            content: String::new(),
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            id: Some(post.id),
            board_type: post.board_type,
            title: post.title.clone(),
            author: post.author.clone(),
            content: post.content.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    View,
    Edit(PostForm),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    pub board: Board,
    pub page: i64,
    pub page_size: i64,
    pub keyword: String,
    pub selected_id: Option<i64>,
    pub detail: Option<PostDetail>,
    pub posts: Vec<Post>,
    pub pagination: Option<Pagination>,
    pub mode: Mode,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            board: Board::Free,
            page: 1,
            page_size: PAGE_SIZE,
            keyword: String::new(),
            selected_id: None,
            detail: None,
            posts: Vec::new(),
            pagination: None,
            mode: Mode::View,
        }
    }
}

impl UiState {
    pub fn list_query(&self) -> ListQuery {
        let keyword = self.keyword.trim();
        ListQuery {
            board: self.board,
            page: self.page,
            page_size: self.page_size,
            keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
        }
    }

    fn clear_selection(&mut self) {
        self.selected_id = None;
        self.detail = None;
    }

    fn fetch_list(&self) -> Command {
        Command::FetchList(self.list_query())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Started,
    SwitchBoard(Board),
    Search(String),
    GoToPage(i64),
    PrevPage,
    NextPage,
    SelectPost(i64),
    EditCurrent,
    NewPost,
    EditField(FormField, String),
    Cancel,
    Submit,
    DeleteRequested,
    DeleteConfirmed(i64),
    ListLoaded {
        posts: Vec<Post>,
        pagination: Pagination,
    },
    DetailLoaded(PostDetail),
    Created(i64),
    Updated(i64),
    Deleted(i64),
    RequestFailed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    FetchList(ListQuery),
    FetchDetail(i64),
    Create(NewPost),
    Update { id: i64, edit: PostEdit },
    Delete(i64),
    ConfirmDelete(i64),
    Alert(String),
}

pub const MSG_FIELDS_REQUIRED: &str = "Title, author and content are all required.";
pub const MSG_NOTHING_TO_DELETE: &str = "There is no post to delete.";
pub const MSG_CREATED: &str = "Post created.";
pub const MSG_UPDATED: &str = "Post updated.";
pub const MSG_DELETED: &str = "Post deleted.";

pub fn update(state: &mut UiState, event: UiEvent) -> Vec<Command> {
    match event {
        UiEvent::Started => {
            state.mode = Mode::View;
            vec![state.fetch_list()]
        }
        UiEvent::SwitchBoard(board) => {
            if board == state.board {
                return Vec::new();
            }
            state.board = board;
            state.page = 1;
            state.keyword.clear();
            state.clear_selection();
            state.mode = Mode::View;
            vec![state.fetch_list()]
        }
        UiEvent::Search(keyword) => {
            state.keyword = keyword;
            state.page = 1;
            state.clear_selection();
            vec![state.fetch_list()]
        }
        UiEvent::GoToPage(page) => {
            let last = state.pagination.map_or(i64::MAX, |p| p.total_pages);
            if page < 1 || page > last {
                return Vec::new();
            }
            state.page = page;
            vec![state.fetch_list()]
        }
        UiEvent::PrevPage => {
            if state.page <= 1 {
                return Vec::new();
            }
            state.page -= 1;
            vec![state.fetch_list()]
        }
        UiEvent::NextPage => {
            if !state.pagination.is_some_and(|p| state.page < p.total_pages) {
                return Vec::new();
            }
            state.page += 1;
            vec![state.fetch_list()]
        }
        UiEvent::SelectPost(id) => vec![Command::FetchDetail(id)],
        UiEvent::EditCurrent => {
            if let (Mode::View, Some(detail)) = (&state.mode, &state.detail) {
                state.mode = Mode::Edit(PostForm::from_post(&detail.post));
            }
            Vec::new()
        }
        UiEvent::NewPost => {
            state.clear_selection();
            state.mode = Mode::Edit(PostForm::blank(state.board));
            Vec::new()
        }
        UiEvent::EditField(field, value) => {
            if let Mode::Edit(form) = &mut state.mode {
                match field {
                    FormField::Board => form.board_type = Board::coerce(Some(value.trim())),
                    FormField::Title => form.title = value,
                    FormField::Author => form.author = value,
                    FormField::Content => form.content = value,
                }
            }
            Vec::new()
        }
        UiEvent::Cancel => {
            state.mode = Mode::View;
            Vec::new()
        }
        UiEvent::Submit => submit(state),
        UiEvent::DeleteRequested => {
            let target = match &state.mode {
                Mode::Edit(form) if form.id.is_some() => form.id,
                Mode::Edit(_) => None,
                Mode::View => state.selected_id,
            };
            match target {
                Some(id) => vec![Command::ConfirmDelete(id)],
                None => vec![Command::Alert(MSG_NOTHING_TO_DELETE.to_string())],
            }
        }
        UiEvent::DeleteConfirmed(id) => vec![Command::Delete(id)],
        UiEvent::ListLoaded { posts, pagination } => {
            state.posts = posts;
            state.pagination = Some(pagination);
            Vec::new()
        }
        UiEvent::DetailLoaded(detail) => {
            state.selected_id = Some(detail.post.id);
            state.detail = Some(detail);
            state.mode = Mode::View;
            Vec::new()
        }
        UiEvent::Created(_) => {
            state.page = 1;
            state.clear_selection();
            state.mode = Mode::View;
            vec![Command::Alert(MSG_CREATED.to_string()), state.fetch_list()]
        }
        UiEvent::Updated(id) => {
            state.mode = Mode::View;
            vec![
                Command::Alert(MSG_UPDATED.to_string()),
                state.fetch_list(),
                Command::FetchDetail(id),
            ]
        }
        UiEvent::Deleted(_) => {
            state.clear_selection();
            state.mode = Mode::View;
            vec![Command::Alert(MSG_DELETED.to_string()), state.fetch_list()]
        }
        UiEvent::RequestFailed(message) => vec![Command::Alert(message)],
    }
}

fn submit(state: &mut UiState) -> Vec<Command> {
    let Mode::Edit(form) = &state.mode else {
        return Vec::new();
    };

    let title = form.title.trim().to_string();
    let author = form.author.trim().to_string();
    let content = form.content.trim().to_string();
    if title.is_empty() || author.is_empty() || content.is_empty() {
        return vec![Command::Alert(MSG_FIELDS_REQUIRED.to_string())];
    }

    match form.id {
        Some(id) => vec![Command::Update {
            id,
            edit: PostEdit {
                title,
                author,
                content,
            },
        }],
        None => vec![Command::Create(NewPost {
            board_type: form.board_type,
            title,
            author,
            content,
        })],
    }
}
