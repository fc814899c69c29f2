use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Raw `?skip=&limit=` query parameters, parsed by hand so bad values come
/// back as structured 400s
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

/// Default and maximum page sizes for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { default_limit: 1000, max_limit: 1000 }
    }
}

impl From<&ApiConfig> for Pagination {
    fn from(api: &ApiConfig) -> Self {
        Self { default_limit: api.default_limit, max_limit: api.max_limit }
    }
}

impl Pagination {
    /// Missing or empty values take their defaults; `limit=0` means the default
    pub fn page(&self, query: &ListQuery) -> Result<Page, ApiError> {
        let skip = parse_param("skip", query.skip.as_deref(), MAX_OFFSET)?.unwrap_or(0);
        let max_limit = self.max_limit.min(MAX_OFFSET);
        let limit = match parse_param("limit", query.limit.as_deref(), max_limit)? {
            Some(0) | None => self.default_limit,
            Some(n) => n,
        };
        Ok(Page { skip, limit })
    }
}

/// Largest skip/limit a SQL `OFFSET`/`LIMIT` (BIGINT) accepts
const MAX_OFFSET: u64 = i64::MAX as u64;

fn parse_param(key: &str, raw: Option<&str>, max: u64) -> Result<Option<u64>, ApiError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(s) => s,
    };

    let value: u64 = raw.parse().map_err(|_| {
        ApiError::bad_request(format!(
            "Invalid value for '{}': '{}'. Expected a non-negative integer.",
            key, raw
        ))
    })?;

    if value > max {
        return Err(ApiError::bad_request(format!(
            "Invalid value for '{}': {}. Must be no greater than {}.",
            key, value, max
        )));
    }
    Ok(Some(value))
}
