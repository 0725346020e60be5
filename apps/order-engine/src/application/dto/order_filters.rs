//! Order listing filters and pagination.

use chrono::NaiveDate;

use crate::application::ports::QueryParams;
use crate::domain::order_execution::value_objects::OrderStatus;

/// Largest page the broker serves.
pub const MAX_PER_PAGE: u32 = 250;

/// Default page size.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Filters for live orders and history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    /// Only these statuses.
    pub statuses: Vec<OrderStatus>,
    /// Only orders on this underlying.
    pub underlying_symbol: Option<String>,
    /// Received on or after.
    pub start_date: Option<NaiveDate>,
    /// Received on or before.
    pub end_date: Option<NaiveDate>,
}

impl OrderFilters {
    /// Keep only `status`.
    #[must_use]
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// Keep only orders on `symbol`.
    #[must_use]
    pub fn with_underlying(mut self, symbol: impl Into<String>) -> Self {
        self.underlying_symbol = Some(symbol.into());
        self
    }

    /// Restrict to a date range.
    #[must_use]
    pub const fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Query parameters for these filters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params: QueryParams = self
            .statuses
            .iter()
            .map(|s| ("status[]".to_string(), s.as_str().to_string()))
            .collect();
        if let Some(symbol) = &self.underlying_symbol {
            params.push(("underlying-symbol".to_string(), symbol.clone()));
        }
        if let Some(start) = self.start_date {
            params.push(("start-date".to_string(), start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end-date".to_string(), end.to_string()));
        }
        params
    }

    /// Returns true if `order` would pass the status and underlying filters.
    ///
    /// Used on endpoints that do not filter server-side.
    #[must_use]
    pub fn matches(&self, status: OrderStatus, underlying: Option<&str>) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&status);
        let underlying_ok = match (&self.underlying_symbol, underlying) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted == actual,
            (Some(_), None) => false,
        };
        status_ok && underlying_ok
    }
}

/// Page selection for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page.
    pub page_offset: u32,
    /// Page size, clamped to `1..=250`.
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_offset: 0,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Page `page_offset` of `per_page` entries.
    #[must_use]
    pub const fn new(page_offset: u32, per_page: u32) -> Self {
        Self {
            page_offset,
            per_page,
        }
    }

    /// Query parameters for this page.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        vec![
            ("page-offset".to_string(), self.page_offset.to_string()),
            (
                "per-page".to_string(),
                self.per_page.clamp(1, MAX_PER_PAGE).to_string(),
            ),
        ]
    }
}
