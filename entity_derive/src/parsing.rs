//! Parsing utilities for entity and field attributes
//!
//! This module handles the parsing of `#[entity]` attributes
//! and validation of type and field names.

use syn::{Attribute, Data, Error, Fields, Ident, LitStr, Result};

/// Validate a remote type name and return syn::Error for better proc macro error handling
pub fn validate_type_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_name(name).map_err(|e| Error::new(span, format!("Invalid type name '{}': {}", name, e)))
}

/// Validate field name and return syn::Error for better proc macro error handling
pub fn validate_field_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_name(name)
        .map_err(|e| Error::new(span, format!("Invalid field name '{}': {}", name, e)))?;

    // `field__lookup` is how filters name a comparison
    if name.contains("__") {
        return Err(Error::new(
            span,
            format!(
                "Invalid field name '{}': '__' is reserved as the filter lookup separator",
                name
            ),
        ));
    }

    Ok(())
}

/// GraphQL name rules: `[_A-Za-z][_0-9A-Za-z]*`, and `__` prefixes belong to introspection
fn validate_name(name: &str) -> std::result::Result<(), String> {
    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    if name.starts_with("__") {
        return Err(format!(
            "Name '{}' starts with '__', which is reserved for introspection",
            name
        ));
    }

    Ok(())
}

/// `SceneMarker` -> `scene_marker`
pub fn snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

#[derive(Debug)]
pub struct EntityInfo {
    pub type_name: String,
    pub plural: String,
    /// Type-specific search argument: `scene_marker_filter`
    pub filter_argument: String,
}

#[derive(Debug)]
pub struct FieldInfo {
    /// Every named field, in declaration order
    pub field_names: Vec<String>,
    /// Fields marked `#[entity(relation)]`
    pub relations: Vec<Ident>,
}

pub fn parse_entity_attributes(attrs: &[Attribute], ident: &Ident) -> Result<EntityInfo> {
    let mut type_name: Option<LitStr> = None;
    let mut plural: Option<LitStr> = None;

    for attr in attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_name") {
                type_name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("plural") {
                plural = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported entity option, expected `type_name` or `plural`"))
            }
        })?;
    }

    let (type_name, type_span) = match type_name {
        Some(lit) => (lit.value(), lit.span()),
        None => (ident.to_string(), ident.span()),
    };
    validate_type_name_syn(&type_name, type_span)?;

    let plural = match plural {
        Some(lit) => {
            validate_field_name_syn(&lit.value(), lit.span())?;
            lit.value()
        }
        None => format!("{}s", snake_case(&type_name)),
    };

    let filter_argument = format!("{}_filter", snake_case(&type_name));

    Ok(EntityInfo {
        type_name,
        plural,
        filter_argument,
    })
}

pub fn parse_field_attributes(data: &Data, ident: &Ident) -> Result<FieldInfo> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new_spanned(
            ident,
            "Entity can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new_spanned(
            ident,
            "Entity can only be derived for structs with named fields",
        ));
    };

    let mut field_names = Vec::new();
    let mut relations = Vec::new();

    for field in &fields_named.named {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;
        let field_name_str = field_name.to_string();

        validate_field_name_syn(&field_name_str, field_name.span())?;

        if is_relation(&field.attrs)? {
            relations.push(field_name.clone());
        }

        field_names.push(field_name_str);
    }

    if !field_names.iter().any(|name| name == "id") {
        return Err(Error::new_spanned(
            ident,
            "Entity requires an `id` field holding the remote identifier",
        ));
    }

    Ok(FieldInfo {
        field_names,
        relations,
    })
}

fn is_relation(attrs: &[Attribute]) -> Result<bool> {
    let mut relation = false;

    for attr in attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("relation") {
                relation = true;
                Ok(())
            } else {
                Err(meta.error("unsupported field option, expected `relation`"))
            }
        })?;
    }

    Ok(relation)
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    // Helper functions for tests - these call the _syn versions but panic on error
    fn validate_type_name(name: &str) {
        if let Err(e) = validate_type_name_syn(name, proc_macro2::Span::call_site()) {
            panic!("Invalid type name: {}", e);
        }
    }

    fn validate_field_name(name: &str) {
        if let Err(e) = validate_field_name_syn(name, proc_macro2::Span::call_site()) {
            panic!("Invalid field name: {}", e);
        }
    }

    #[test]
    fn test_valid_type_names() {
        validate_type_name("Scene");
        validate_type_name("SceneMarker");
        validate_type_name("_Private");
    }

    #[test]
    #[should_panic(expected = "Invalid type name")]
    fn test_introspection_prefix() {
        validate_type_name("__Schema");
    }

    #[test]
    #[should_panic(expected = "Invalid type name")]
    fn test_invalid_start() {
        validate_type_name("1Scene");
    }

    #[test]
    #[should_panic(expected = "Invalid type name")]
    fn test_empty_name() {
        validate_type_name("");
    }

    #[test]
    fn test_field_validation() {
        validate_field_name("id");
        validate_field_name("rating100");
        validate_field_name("parent_studio");
    }

    #[test]
    #[should_panic(expected = "Invalid field name")]
    fn test_lookup_separator_rejected() {
        validate_field_name("title__contains");
    }

    #[test]
    #[should_panic(expected = "Invalid field name")]
    fn test_invalid_chars() {
        validate_field_name("play-count");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Scene"), "scene");
        assert_eq!(snake_case("SceneMarker"), "scene_marker");
        assert_eq!(snake_case("Gallery"), "gallery");
    }

    #[test]
    fn test_default_plural() {
        let ident: Ident = syn::parse_quote!(SceneMarker);
        let info = parse_entity_attributes(&[], &ident).unwrap();
        assert_eq!(info.type_name, "SceneMarker");
        assert_eq!(info.plural, "scene_markers");
        assert_eq!(info.filter_argument, "scene_marker_filter");
    }

    #[test]
    fn test_explicit_options() {
        let ident: Ident = syn::parse_quote!(GalleryModel);
        let attrs: Vec<Attribute> = vec![syn::parse_quote!(
            #[entity(type_name = "Gallery", plural = "galleries")]
        )];
        let info = parse_entity_attributes(&attrs, &ident).unwrap();
        assert_eq!(info.type_name, "Gallery");
        assert_eq!(info.plural, "galleries");
        assert_eq!(info.filter_argument, "gallery_filter");
    }

    #[test]
    fn test_relations_and_missing_id() {
        let input: syn::DeriveInput = syn::parse_quote! {
            struct Scene {
                id: String,
                title: Option<String>,
                #[entity(relation)]
                studio: Option<Tracked<Studio>>,
            }
        };
        let info = parse_field_attributes(&input.data, &input.ident).unwrap();
        assert_eq!(info.field_names, vec!["id", "title", "studio"]);
        assert_eq!(info.relations.len(), 1);
        assert_eq!(info.relations[0].to_string(), "studio");

        let input: syn::DeriveInput = syn::parse_quote! {
            struct NoId {
                title: Option<String>,
            }
        };
        assert!(parse_field_attributes(&input.data, &input.ident).is_err());
    }
}
