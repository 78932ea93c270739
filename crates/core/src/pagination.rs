//! Page requests, pages, and the pagination headers returned by list endpoints.
//!
//! Query parameters follow the `?page=&size=&sort=prop,dir` convention:
//! `page` is zero-based, `sort` may be repeated, and the response carries an
//! `X-Total-Count` header plus an RFC 8288 `Link` header.

use crate::error::CoreError;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    /// Parse one `sort` parameter value.
    ///
    /// `name` sorts ascending, `name,desc` descending, and `name,rechte,desc`
    /// applies the trailing direction to every listed property.
    pub fn parse(raw: &str) -> Vec<SortOrder> {
        let mut parts: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let direction = match parts.last().and_then(|p| Direction::parse(p)) {
            Some(d) => {
                parts.pop();
                d
            }
            None => Direction::Asc,
        };

        parts
            .into_iter()
            .map(|property| SortOrder {
                property: property.to_string(),
                direction,
            })
            .collect()
    }
}

/// A request for one page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    /// Build a page request from raw query pairs.
    ///
    /// Negative pages clamp to 0. Sizes below 1 fall back to the default and
    /// sizes above [`MAX_PAGE_SIZE`] are capped. A blank `page` or `size`
    /// counts as absent. Non-numeric values are a validation error.
    pub fn from_query(pairs: &[(String, String)]) -> Result<Self, CoreError> {
        let mut request = PageRequest::default();

        for (key, value) in pairs {
            match key.as_str() {
                "page" | "size" if value.trim().is_empty() => {}
                "page" => request.page = parse_number("page", value)?.max(0),
                "size" => {
                    let size = parse_number("size", value)?;
                    request.size = if size < 1 {
                        DEFAULT_PAGE_SIZE
                    } else {
                        size.min(MAX_PAGE_SIZE)
                    };
                }
                "sort" => request.sort.extend(SortOrder::parse(value)),
                _ => {}
            }
        }

        Ok(request)
    }

    /// Reject sort properties outside `allowed`.
    ///
    /// Sort properties end up in an `ORDER BY` clause, so this check must
    /// pass before the request reaches storage.
    pub fn ensure_sortable(&self, allowed: &[&str]) -> Result<(), CoreError> {
        match self
            .sort
            .iter()
            .find(|o| !allowed.contains(&o.property.as_str()))
        {
            Some(order) => Err(CoreError::Validation(format!(
                "Cannot sort by unknown property '{}'",
                order.property
            ))),
            None => Ok(()),
        }
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

fn parse_number(name: &str, value: &str) -> Result<i64, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("'{name}' must be an integer, got '{value}'")))
}

/// One page of results plus metadata about the full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page number.
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.size <= 0 {
            return 1;
        }
        (self.total_elements + self.size - 1) / self.size
    }
}

/// Header values describing a page, ready to be attached to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationHeaders {
    pub total_count: String,
    pub link: String,
}

/// Build `X-Total-Count` and `Link` values for `page`.
///
/// `path` and `query` describe the request being answered; every link keeps
/// the original query (including `sort`) with `page` and `size` replaced.
/// Links are emitted in the order next, prev, last, first.
pub fn pagination_headers<T>(path: &str, query: Option<&str>, page: &Page<T>) -> PaginationHeaders {
    let number = page.number;
    let size = page.size;
    let total_pages = page.total_pages();

    let mut links = Vec::with_capacity(4);
    if number < total_pages - 1 {
        links.push(page_link(path, query, number + 1, size, "next"));
    }
    if number > 0 {
        links.push(page_link(path, query, number - 1, size, "prev"));
    }
    let last = (total_pages - 1).max(0);
    links.push(page_link(path, query, last, size, "last"));
    links.push(page_link(path, query, 0, size, "first"));

    PaginationHeaders {
        total_count: page.total_elements.to_string(),
        link: links.join(","),
    }
}

fn page_link(path: &str, query: Option<&str>, page: i64, size: i64, rel: &str) -> String {
    let mut params: Vec<&str> = query
        .unwrap_or_default()
        .split('&')
        .filter(|p| !p.is_empty())
        .filter(|p| {
            let key = p.split('=').next().unwrap_or_default();
            key != "page" && key != "size"
        })
        .collect();

    let page_param = format!("page={page}");
    let size_param = format!("size={size}");
    params.push(&page_param);
    params.push(&size_param);

    let uri = format!("{path}?{}", params.join("&"))
        .replace(',', "%2C")
        .replace(';', "%3B");

    format!("<{uri}>; rel=\"{rel}\"")
}
