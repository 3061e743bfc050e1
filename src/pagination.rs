//! Pagination request parsing and page-shaped responses.
//!
//! [`PageRequest`] is the validated form of the `page`/`size`/`sort` query
//! parameters. [`PageResult`] carries one bounded slice of a collection
//! together with the counts describing its full extent; its [`Responder`]
//! implementation moves the counts into the [`PAGINATION_HEADER`] header so
//! the JSON body stays a bare array.

use std::collections::HashMap;

use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use thiserror::Error;

/// Page size applied when the request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Response header carrying the pagination metadata.
pub const PAGINATION_HEADER: &str = "X-Meta-Pagination";

pub const PAGE_PARAM: &str = "page";
pub const SIZE_PARAM: &str = "size";
pub const SORT_PARAM: &str = "sort";

/// Query parameter names that are never interpreted as filter fields.
pub const RESERVED_PARAMS: [&str; 3] = [PAGE_PARAM, SIZE_PARAM, SORT_PARAM];

/// A request parameter that could not be interpreted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value for parameter `{param}`: {message}")]
pub struct ParamError {
    pub param: String,
    pub message: String,
}

impl ParamError {
    pub fn new(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One `field[,direction]` group of the `sort` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Validated pagination and ordering parameters.
///
/// Fields are private: a `PageRequest` can only be built through [`parse`]
/// or [`new`], so a negative page number or a zero page size never reaches
/// the repository layer.
///
/// [`parse`]: PageRequest::parse
/// [`new`]: PageRequest::new
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
    sort: Vec<SortField>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    /// Builds a request for the given 0-indexed page. Rejects a zero page
    /// size instead of treating it as unbounded.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, ParamError> {
        if page_size == 0 {
            return Err(ParamError::new(SIZE_PARAM, "must be a positive integer"));
        }
        Ok(Self {
            page_number,
            page_size,
            sort: Vec::new(),
        })
    }

    pub fn with_sort(mut self, sort: Vec<SortField>) -> Self {
        self.sort = sort;
        self
    }

    /// Interprets the raw query parameters of a collection request.
    ///
    /// Absent `page` means the first page, absent `size` means
    /// [`DEFAULT_PAGE_SIZE`]. Anything non-numeric or out of range is an
    /// error naming the parameter, never a silently substituted default.
    pub fn parse(params: &HashMap<String, String>) -> Result<Self, ParamError> {
        let page_number = match params.get(PAGE_PARAM) {
            None => 0,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ParamError::new(PAGE_PARAM, "must be a non-negative integer"))?,
        };

        let page_size = match params.get(SIZE_PARAM) {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => {
                let size = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ParamError::new(SIZE_PARAM, "must be a positive integer"))?;
                if size == 0 {
                    return Err(ParamError::new(SIZE_PARAM, "must be a positive integer"));
                }
                size
            }
        };

        let sort = match params.get(SORT_PARAM) {
            None => Vec::new(),
            Some(raw) if raw.trim().is_empty() => Vec::new(),
            Some(raw) => parse_sort(raw)?,
        };

        Ok(Self {
            page_number,
            page_size,
            sort,
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sort(&self) -> &[SortField] {
        &self.sort
    }

    /// Row offset of this page in the full result set.
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number).saturating_mul(i64::from(self.page_size))
    }
}

/// Parses the `sort` parameter: comma-separated `field[,direction]` groups.
/// A direction token binds to the field before it; a dangling or doubled
/// direction and empty segments are rejected.
fn parse_sort(raw: &str) -> Result<Vec<SortField>, ParamError> {
    let mut fields: Vec<SortField> = Vec::new();
    let mut last_had_direction = false;

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(ParamError::new(SORT_PARAM, "empty sort segment"));
        }

        let direction = if token.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        };

        match direction {
            Some(direction) => {
                if last_had_direction {
                    return Err(ParamError::new(
                        SORT_PARAM,
                        format!("unexpected direction `{token}`"),
                    ));
                }
                let Some(last) = fields.last_mut() else {
                    return Err(ParamError::new(
                        SORT_PARAM,
                        format!("direction `{token}` is not preceded by a field"),
                    ));
                };
                last.direction = direction;
                last_had_direction = true;
            }
            None => {
                fields.push(SortField::new(token, SortDirection::Asc));
                last_had_direction = false;
            }
        }
    }

    Ok(fields)
}

/// One page of a filtered collection plus the counts describing the
/// collection's full extent.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    content: Vec<T>,
    page_number: u32,
    page_size: u32,
    total_elements: u64,
}

impl<T> PageResult<T> {
    pub fn new(content: Vec<T>, page_number: u32, page_size: u32, total_elements: u64) -> Self {
        Self {
            content,
            page_number,
            page_size,
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        if self.total_elements == 0 {
            return 0;
        }
        let size = u64::from(self.page_size);
        (self.total_elements + size - 1) / size
    }

    pub fn is_first(&self) -> bool {
        self.page_number == 0
    }

    pub fn is_last(&self) -> bool {
        self.total_elements == 0 || u64::from(self.page_number) + 1 >= self.total_pages()
    }

    /// Converts the content, leaving the pagination counts untouched.
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
        }
    }

    /// Value of the [`PAGINATION_HEADER`] header for this page.
    pub fn metadata_header(&self) -> String {
        format!(
            "page-number={},page-size={},total-elements={},total-pages={},first-page={},last-page={}",
            self.page_number,
            self.page_size,
            self.total_elements,
            self.total_pages(),
            self.is_first(),
            self.is_last(),
        )
    }
}

/// Response shaping for paged results, applied by type: any handler that
/// returns a `PageResult` gets the metadata header and a bare-array body,
/// while responses of any other type are untouched.
impl<T: Serialize> Responder for PageResult<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let metadata = self.metadata_header();
        HttpResponse::Ok()
            .insert_header((PAGINATION_HEADER, metadata))
            .json(self.content)
    }
}
