//! 分页
//!
//! 页码从 1 开始。越界页码被夹到 `[1, total_pages]`，`page_size == 0` 视为 1，
//! 空列表显示为 1 页 0 行。

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Pagination query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Page size with the zero case coerced to 1
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.max(1)
    }

    /// Page clamped against a list of `total` items
    pub fn effective_page(&self, total: usize) -> u32 {
        clamp_page(self.page, total_pages(total, self.page_size))
    }

    /// Index of the first row of the (clamped) page
    pub fn offset(&self, total: usize) -> usize {
        (self.effective_page(total) as usize - 1) * self.limit()
    }

    /// Rows per page
    pub fn limit(&self) -> usize {
        self.effective_page_size() as usize
    }

    /// Strict check, for callers that want to know a clamp is about to happen
    pub fn validate(&self, total: usize) -> BoardResult<()> {
        if self.page_size == 0 {
            return Err(BoardError::invalid_page_size(self.page_size));
        }
        let pages = total_pages(total, self.page_size);
        if self.page == 0 || self.page > pages {
            return Err(BoardError::page_out_of_range(self.page, pages));
        }
        Ok(())
    }
}

/// `ceil(total / page_size)`, never less than 1
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    let size = page_size.max(1) as usize;
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a page number into `[1, max(1, total_pages)]`
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 当前页数据
    pub data: Vec<T>,
    /// 总记录数
    pub total: usize,
    /// 当前页码 (已夹取)
    pub page: u32,
    /// 每页数量
    pub limit: u32,
    /// 总页数 (至少为 1)
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based `(first, last)` row numbers for the footer, `(0, 0)` when empty
    pub fn display_range(&self) -> (usize, usize) {
        if self.data.is_empty() {
            return (0, 0);
        }
        let first = (self.page as usize - 1) * self.limit as usize + 1;
        (first, first + self.data.len() - 1)
    }
}

/// Half-open slice `[(page-1)*size, page*size)` clipped to the list
pub fn paginate<T: Clone>(list: &[T], page: u32, page_size: u32) -> Page<T> {
    let params = PaginationParams::new(page, page_size);
    let total = list.len();
    let offset = params.offset(total);
    let end = (offset + params.limit()).min(total);

    Page {
        data: list[offset.min(total)..end].to_vec(),
        total,
        page: params.effective_page(total),
        limit: params.effective_page_size(),
        total_pages: total_pages(total, page_size),
    }
}
