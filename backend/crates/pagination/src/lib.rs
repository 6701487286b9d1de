//! Offset pagination primitives shared by the course catalogue endpoints.
//!
//! A [`PageRequest`] names a zero-based page index and a page size. A
//! [`Page`] carries one slice of results together with the total number of
//! matching elements, so clients can compute how many pages remain.
//!
//! # Examples
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(1, 2).expect("valid request");
//! let page = Page::new(vec!["c", "d"], request, 5);
//! assert_eq!(page.total_pages(), 3);
//! assert_eq!(page.content(), ["c", "d"]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when a client does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Reasons a page request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The requested size was zero.
    #[error("page size must be at least 1")]
    ZeroSize,
    /// The requested size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must not exceed {max}")]
    SizeTooLarge {
        /// Upper bound that was exceeded.
        max: u32,
    },
}

/// Zero-based page index and page size.
///
/// ## Invariants
/// - `size` is between 1 and [`MAX_PAGE_SIZE`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    size: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
}

const fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.size)
    }
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `size` is zero or too large.
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of elements on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of elements preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// Same size, different page index.
    #[must_use]
    pub const fn with_page(self, page: u32) -> Self {
        Self {
            page,
            size: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the totals needed to walk the rest.
///
/// A request past the last page yields empty `content` while the totals
/// still describe the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    page: u32,
    size: u32,
    total_elements: u64,
    total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from fetched content and the total match count.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size())),
        }
    }

    /// Elements on this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page, returning its elements.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of elements matching the query across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages needed to hold every matching element.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Transform every element while keeping the totals.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page requests and envelopes.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 20)]
    #[case(3, 7, 21)]
    fn offset_multiplies_page_and_size(#[case] page: u32, #[case] size: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, size).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    #[case(0, PageRequestError::ZeroSize)]
    #[case(MAX_PAGE_SIZE + 1, PageRequestError::SizeTooLarge { max: MAX_PAGE_SIZE })]
    fn rejects_out_of_range_sizes(#[case] size: u32, #[case] expected: PageRequestError) {
        assert_eq!(PageRequest::new(0, size), Err(expected));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(45, 3)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] pages: u64) {
        let page: Page<u8> = Page::new(Vec::new(), PageRequest::default(), total);
        assert_eq!(page.total_pages(), pages);
    }

    #[rstest]
    fn page_past_the_end_keeps_totals() {
        let request = PageRequest::new(9, 10).expect("valid request");
        let page: Page<u8> = Page::new(Vec::new(), request, 25);
        assert!(page.content().is_empty());
        assert_eq!(page.total_elements(), 25);
        assert_eq!(page.total_pages(), 3);
    }

    #[rstest]
    fn request_deserialises_with_defaults() {
        let request: PageRequest = serde_json::from_value(json!({})).expect("defaults apply");
        assert_eq!(request, PageRequest::default());
    }

    #[rstest]
    fn request_deserialisation_validates_size() {
        let result = serde_json::from_value::<PageRequest>(json!({ "page": 1, "size": 0 }));
        assert!(result.is_err());
    }

    #[rstest]
    fn page_serialises_camel_case_totals() {
        let request = PageRequest::new(0, 2).expect("valid request");
        let page = Page::new(vec![1, 2], request, 3).map(|value| value * 10);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            value,
            json!({
                "content": [10, 20],
                "page": 0,
                "size": 2,
                "totalElements": 3,
                "totalPages": 2,
            })
        );
    }
}
