//! Filter translation
//!
//! Callers describe searches with `field__lookup` keys (`rating100__gte`,
//! `tags__includes`, `date__between`). This module turns them into the
//! criterion objects the service's `<Type>FilterType` inputs expect.

use crate::errors::StoreError;
use crate::query::ordering::SortDirection;
use crate::query::pagination::FindFilter;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Separates a field name from its lookup in a criterion key
pub const LOOKUP_SEPARATOR: &str = "__";

/// Keys with this suffix carry a nested filter on a related type
pub const NESTED_FILTER_SUFFIX: &str = "_filter";

/// Boolean combinators accepted as criterion keys
pub const LOGICAL_KEYS: &[&str] = &["AND", "OR", "NOT"];

/// Comparison modifiers understood by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionModifier {
    Equals,
    NotEquals,
    Includes,
    IncludesAll,
    Excludes,
    MatchesRegex,
    NotMatchesRegex,
    GreaterThan,
    LessThan,
    Between,
    NotBetween,
    IsNull,
    NotNull,
}

impl CriterionModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionModifier::Equals => "EQUALS",
            CriterionModifier::NotEquals => "NOT_EQUALS",
            CriterionModifier::Includes => "INCLUDES",
            CriterionModifier::IncludesAll => "INCLUDES_ALL",
            CriterionModifier::Excludes => "EXCLUDES",
            CriterionModifier::MatchesRegex => "MATCHES_REGEX",
            CriterionModifier::NotMatchesRegex => "NOT_MATCHES_REGEX",
            CriterionModifier::GreaterThan => "GREATER_THAN",
            CriterionModifier::LessThan => "LESS_THAN",
            CriterionModifier::Between => "BETWEEN",
            CriterionModifier::NotBetween => "NOT_BETWEEN",
            CriterionModifier::IsNull => "IS_NULL",
            CriterionModifier::NotNull => "NOT_NULL",
        }
    }
}

/// The part of a criterion key after `__`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Exact,
    NotEqual,
    Contains,
    Regex,
    NotRegex,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
    NotBetween,
    Null,
    Includes,
    IncludesAll,
    Excludes,
}

/// Suffix table for `field__lookup` keys; a bare `field` means [`Lookup::Exact`]
pub const LOOKUPS: &[(&str, Lookup)] = &[
    ("exact", Lookup::Exact),
    ("ne", Lookup::NotEqual),
    ("contains", Lookup::Contains),
    ("regex", Lookup::Regex),
    ("not_regex", Lookup::NotRegex),
    ("gt", Lookup::Gt),
    ("gte", Lookup::Gte),
    ("lt", Lookup::Lt),
    ("lte", Lookup::Lte),
    ("between", Lookup::Between),
    ("not_between", Lookup::NotBetween),
    ("null", Lookup::Null),
    ("includes", Lookup::Includes),
    ("includes_all", Lookup::IncludesAll),
    ("excludes", Lookup::Excludes),
];

/// List attributes the service matches as a substring of the joined values.
/// Their criteria take a plain string, never a list.
pub const SUBSTRING_LIST_FIELDS: &[&str] = &["aliases", "url", "captions"];

impl Lookup {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        LOOKUPS
            .iter()
            .find(|(name, _)| *name == suffix)
            .map(|(_, lookup)| *lookup)
    }

    /// Modifier sent for this lookup; [`Lookup::Null`] flips to `NOT_NULL` on `false`
    pub fn modifier(self) -> CriterionModifier {
        match self {
            Lookup::Exact => CriterionModifier::Equals,
            Lookup::NotEqual => CriterionModifier::NotEquals,
            Lookup::Contains | Lookup::Includes => CriterionModifier::Includes,
            Lookup::Regex => CriterionModifier::MatchesRegex,
            Lookup::NotRegex => CriterionModifier::NotMatchesRegex,
            Lookup::Gt | Lookup::Gte => CriterionModifier::GreaterThan,
            Lookup::Lt | Lookup::Lte => CriterionModifier::LessThan,
            Lookup::Between => CriterionModifier::Between,
            Lookup::NotBetween => CriterionModifier::NotBetween,
            Lookup::Null => CriterionModifier::IsNull,
            Lookup::IncludesAll => CriterionModifier::IncludesAll,
            Lookup::Excludes => CriterionModifier::Excludes,
        }
    }

    fn takes_list(self) -> bool {
        matches!(self, Lookup::Includes | Lookup::IncludesAll | Lookup::Excludes)
    }
}

/// Split `field__lookup` into its parts
pub fn split_key(key: &str) -> Result<(&str, Lookup), StoreError> {
    let (field, lookup) = match key.split_once(LOOKUP_SEPARATOR) {
        None => (key, Lookup::Exact),
        Some((field, suffix)) => {
            let lookup = Lookup::from_suffix(suffix).ok_or_else(|| {
                StoreError::invalid_filter(key, format!("unknown lookup '{}'", suffix))
            })?;
            (field, lookup)
        }
    };

    if field.is_empty() {
        return Err(StoreError::invalid_filter(key, "missing field name"));
    }

    Ok((field, lookup))
}

/// Build the criterion object for one comparison
///
/// Returns `None` when the value does not fit the lookup: a range that is not a
/// two-element list, or a null check that is not a boolean.
pub fn build_criterion(field: &str, lookup: Lookup, value: Value) -> Option<Value> {
    let modifier = lookup.modifier();

    match lookup {
        Lookup::Between | Lookup::NotBetween => match value {
            Value::Array(bounds) if bounds.len() == 2 => {
                let mut bounds = bounds.into_iter();
                let low = bounds.next()?;
                let high = bounds.next()?;
                Some(json!({
                    "value": low,
                    "value2": high,
                    "modifier": modifier.as_str(),
                }))
            }
            _ => None,
        },
        Lookup::Null => {
            let is_null = value.as_bool()?;
            let modifier = if is_null {
                CriterionModifier::IsNull
            } else {
                CriterionModifier::NotNull
            };
            Some(criterion(Value::from(""), modifier))
        }
        // the service only has strict comparisons
        Lookup::Gte => Some(criterion(shift_integer(value, -1), modifier)),
        Lookup::Lte => Some(criterion(shift_integer(value, 1), modifier)),
        _ if lookup.takes_list() => {
            let value = match value {
                Value::Array(_) => value,
                scalar if SUBSTRING_LIST_FIELDS.contains(&field) => scalar,
                scalar => Value::Array(vec![scalar]),
            };
            Some(criterion(value, modifier))
        }
        _ => Some(criterion(value, modifier)),
    }
}

fn criterion(value: Value, modifier: CriterionModifier) -> Value {
    json!({ "value": value, "modifier": modifier.as_str() })
}

fn shift_integer(value: Value, delta: i64) -> Value {
    match value.as_i64().and_then(|n| n.checked_add(delta)) {
        Some(shifted) => Value::from(shifted),
        None => value,
    }
}

/// Criterion keys handed to the service untouched
fn is_passthrough(key: &str, value: &Value) -> bool {
    let prebuilt = value
        .as_object()
        .is_some_and(|object| object.contains_key("modifier"));

    prebuilt || key.ends_with(NESTED_FILTER_SUFFIX) || LOGICAL_KEYS.contains(&key)
}

/// Search criteria plus the generic find-filter settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    criteria: Vec<(String, Value)>,
    q: Option<String>,
    sort: Option<String>,
    direction: Option<SortDirection>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field` or `field__lookup` criterion
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Add a `field__between` range
    pub fn between(self, field: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.with(
            format!("{}{}between", field, LOOKUP_SEPARATOR),
            Value::Array(vec![low.into(), high.into()]),
        )
    }

    /// Free-text query
    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(field.into());
        self.direction = Some(direction);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.criteria.push((key.into(), value.into()));
    }

    pub fn criteria(&self) -> &[(String, Value)] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty() && self.q.is_none()
    }

    /// Translate the criteria into a `<Type>FilterType` object
    ///
    /// Criteria whose value does not fit their lookup are dropped with a warning.
    /// A later criterion on the same field replaces an earlier one.
    pub fn translate(&self) -> Result<Map<String, Value>, StoreError> {
        let mut translated = Map::new();

        for (key, value) in &self.criteria {
            if is_passthrough(key, value) {
                translated.insert(key.clone(), value.clone());
                continue;
            }

            let (field, lookup) = split_key(key)?;
            match build_criterion(field, lookup, value.clone()) {
                Some(criterion) => {
                    crate::trace_log!(key = %key, criterion = %criterion, "translated criterion");
                    translated.insert(field.to_string(), criterion);
                }
                None => {
                    tracing::warn!(key = %key, value = %value, "dropping criterion whose value does not fit its lookup");
                }
            }
        }

        Ok(translated)
    }

    /// The `FindFilterType` for one page of this search
    pub fn find_filter(&self, page: u32, per_page: u32) -> FindFilter {
        FindFilter {
            q: self.q.clone(),
            sort: self.sort.clone(),
            direction: self.direction,
            ..FindFilter::new(page, per_page)
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (key, value) in iter {
            filters.push(key, value);
        }
        filters
    }
}
