//! Procedural macros for generating entity metadata
//!
//! This crate provides the `#[record]` macro and `Entity` derive for automatic
//! generation of the metadata the entity store needs: type name, attribute
//! list, relation list and nested relation reconciliation.
//!
//! Generated code refers to `entity_store::...`, so the crate using these
//! macros must depend on `entity-store` (or a crate re-exporting it under that name).

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod code_generation;
mod parsing;
mod record_macro;

use code_generation::generate_entity_impl;
use parsing::{parse_entity_attributes, parse_field_attributes};
use record_macro::record_attribute;

/// Derive macro for the `Entity` trait
///
/// Note: It's recommended to use the `#[record]` attribute macro instead,
/// which automatically includes this derive along with the serde derives.
///
/// Manual usage:
/// ```rust,ignore
/// #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, Entity)]
/// #[serde(default)]
/// #[entity(type_name = "Gallery", plural = "galleries")]
/// pub struct Gallery {
///     pub id: String,
///     pub title: Option<String>,
///
///     #[entity(relation)]
///     pub studio: Option<Tracked<Studio>>,
/// }
/// ```
///
/// Container options:
/// - `type_name = "..."`: remote type name, defaults to the struct name
/// - `plural = "..."`: name of the list field in search replies, defaults to
///   the snake-cased type name followed by `s`
///
/// The search filter argument (`FILTER_ARGUMENT`) is the snake-cased type name
/// followed by `_filter`.
///
/// Field options:
/// - `relation`: the field holds related records (`Option<Tracked<T>>`,
///   `Option<Box<Tracked<T>>>` or `Vec<Tracked<T>>`)
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let entity_info = match parse_entity_attributes(&input.attrs, name) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let field_info = match parse_field_attributes(&input.data, name) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let entity_impl = generate_entity_impl(&input, &entity_info, &field_info);

    TokenStream::from(entity_impl)
}

/// Convenience attribute macro that adds all necessary derives for an entity model
///
/// Usage:
/// ```rust,ignore
/// use entity_store::record;
///
/// #[record]
/// #[entity(type_name = "Tag")]
/// pub struct Tag {
///     pub id: String,
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn record(attr: TokenStream, item: TokenStream) -> TokenStream {
    record_attribute(attr, item)
}
