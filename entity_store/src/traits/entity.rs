//! Entity metadata
//!
//! This module defines the trait every cached record type implements.

use crate::store::EntityStore;
use crate::tracked::FieldSet;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Metadata about a remote record type
///
/// This trait should be derived using the `#[record]` attribute macro, which
/// automatically includes all necessary derives.
///
/// ```ignore
/// use entity_store::{record, Tracked};
///
/// #[record]
/// #[entity(type_name = "Scene")]
/// pub struct Scene {
///     pub id: String,
///     pub title: Option<String>,
///
///     #[entity(relation)]
///     pub studio: Option<Tracked<Studio>>,
/// }
/// ```
#[async_trait]
pub trait Entity:
    Clone + Debug + Default + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Remote type name, part of the cache key and of every query document
    const TYPE_NAME: &'static str;

    /// Name of the list field in search replies (`scenes`, `galleries`)
    const PLURAL: &'static str;

    /// Name of the type-specific search argument (`scene_filter`)
    const FILTER_ARGUMENT: &'static str;

    fn id(&self) -> &str;

    /// Every attribute of the type, in declaration order
    fn field_names() -> &'static [&'static str];

    /// Attributes holding related records
    fn relation_fields() -> &'static [&'static str] {
        &[]
    }

    fn has_attribute(name: &str) -> bool {
        Self::field_names().contains(&name)
    }

    fn is_relation(name: &str) -> bool {
        Self::relation_fields().contains(&name)
    }

    /// Swap stub relations named in `fields` for complete, identity-mapped copies
    async fn reconcile_relations(&mut self, _store: &EntityStore, _fields: &FieldSet) {}
}
