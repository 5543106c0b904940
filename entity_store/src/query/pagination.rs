//! Paging
//!
//! This module provides the generic find filter sent with every search and the
//! page of results that comes back.

use crate::query::ordering::SortDirection;
use crate::tracked::Tracked;
use serde::Serialize;
use serde_json::{json, Value};

/// The `FindFilterType` argument of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

impl FindFilter {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            q: None,
            page,
            per_page,
            sort: None,
            direction: None,
        }
    }

    /// Render as a GraphQL variable; unset settings are omitted
    pub fn to_variable(&self) -> Value {
        json!(self)
    }
}

/// One page of a search with the server's total match count
#[derive(Debug, Clone, PartialEq)]
pub struct FindResult<T> {
    pub items: Vec<Tracked<T>>,
    pub count: usize,
    pub page: u32,
    pub per_page: u32,
}

impl<T> FindResult<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether pages after this one hold more matches
    pub fn has_more(&self) -> bool {
        (self.page as usize).saturating_mul(self.per_page as usize) < self.count
    }
}

impl<T> IntoIterator for FindResult<T> {
    type Item = Tracked<T>;
    type IntoIter = std::vec::IntoIter<Tracked<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
