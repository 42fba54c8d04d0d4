use crate::core::models::common::Pagination as Page;
use crate::serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// Out of range values are clamped: page to at least 1, size to 1..=MAX_PAGE_SIZE.
fn page(page: Option<i64>, size: Option<i64>) -> Page {
    let page = page.unwrap_or(1).max(1);
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    Page::new(size, Some((page - 1).saturating_mul(size)))
}

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> Page {
        page(self.page, self.size)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Search {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

impl Search {
    pub fn page(&self) -> Page {
        page(self.page, self.size)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceSearch {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub question: Option<i32>,
}

impl ChoiceSearch {
    pub fn page(&self) -> Page {
        page(self.page, self.size)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::default().page();
        assert_eq!(p.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_offset_and_clamp() {
        let p = Pagination { page: Some(3), size: Some(10) }.page();
        assert_eq!((p.limit(), p.offset()), (10, 20));
        let p = Pagination { page: Some(0), size: Some(1000) }.page();
        assert_eq!((p.limit(), p.offset()), (MAX_PAGE_SIZE, 0));
    }

    #[test]
    fn test_huge_page_saturates() {
        let p = Pagination { page: Some(i64::MAX), size: Some(100) }.page();
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), i64::MAX);
    }
}
