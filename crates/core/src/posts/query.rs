#![forbid(unsafe_code)]

use crate::board::Board;
use crate::ids::positive_or;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Normalized parameters of a list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub board: Board,
    pub page: i64,
    pub page_size: i64,
    pub keyword: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            board: Board::Free,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            keyword: None,
        }
    }
}

impl ListQuery {
    pub fn from_raw(
        board: Option<&str>,
        page: Option<&str>,
        page_size: Option<&str>,
        keyword: Option<&str>,
    ) -> Self {
        Self {
            board: Board::coerce(board),
            page: positive_or(page, DEFAULT_PAGE),
            page_size: positive_or(page_size, DEFAULT_PAGE_SIZE),
            keyword: keyword
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .map(str::to_string),
        }
    }

    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }

    /// Query-string pairs in the shape the list endpoint reads them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("board", self.board.code().to_string()),
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(keyword) = self.keyword.as_deref() {
            pairs.push(("keyword", keyword.to_string()));
        }
        pairs
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

impl Pagination {
    pub fn compute(total_count: i64, page_size: i64, current_page: i64) -> Self {
        let page_size = page_size.max(1);
        let total_count = total_count.max(0);
        let total_pages = (total_count / page_size + i64::from(total_count % page_size != 0)).max(1);
        Self {
            total_count,
            total_pages,
            current_page,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
