//! Equality-filter query builder for table reads and writes.
//!
//! The hosted backend only needs filter-by-equality, ordering, and a row
//! limit, so that is all [`Query`] expresses. [`Query::to_query_string`]
//! renders the PostgREST-style query string used by the HTTP transport; the
//! in-memory transport interprets the same structure directly.

/// Sort direction for an ordered read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering clause: column plus direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A table query: equality filters, optional ordering, optional limit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    filters: Vec<(String, String)>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    /// Order ascending by `column`.
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction: Direction::Ascending,
        });
        self
    }

    /// Order descending by `column`.
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction: Direction::Descending,
        });
        self
    }

    /// Return at most `n` rows.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Render as a PostgREST-style query string (no leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        for (column, value) in &self.filters {
            parts.push(format!("{column}=eq.{value}"));
        }
        if let Some(order) = &self.order {
            let dir = match order.direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            parts.push(format!("order={}.{dir}", order.column));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={limit}"));
        }
        parts.join("&")
    }
}
