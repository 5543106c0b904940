//! Query construction
//!
//! This module provides filter translation, paging and the GraphQL documents the
//! store sends.

pub mod filter;
pub mod ordering;
pub mod pagination;
pub mod selection;


pub use filter::{build_criterion, CriterionModifier, Filters, Lookup};
pub use ordering::SortDirection;
pub use pagination::{FindFilter, FindResult};
