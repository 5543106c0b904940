//! Field selections and query documents
//!
//! Narrow fetches ask for exactly the requested attributes plus identity and
//! the audit timestamps. Relations are rendered with a minimal nested selection
//! so a narrow fetch never pulls a related record's own relations.

use crate::traits::Entity;

/// Always part of a selection
pub const BASE_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Nested selection per relation attribute
pub const RELATION_SELECTIONS: &[(&str, &str)] = &[
    ("studio", "id name"),
    ("parent_studio", "id name"),
    ("child_studios", "id name"),
    ("performers", "id name gender"),
    ("tags", "id name"),
    ("parents", "id name"),
    ("children", "id name"),
    ("galleries", "id title"),
    ("scenes", "id title"),
    ("images", "id title"),
];

/// Nested selection for relations missing from [`RELATION_SELECTIONS`]
pub const DEFAULT_RELATION_SELECTION: &str = "id";

pub fn relation_selection(field: &str) -> Option<&'static str> {
    RELATION_SELECTIONS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, selection)| *selection)
}

fn render_field<T: Entity>(field: &str) -> String {
    match relation_selection(field) {
        Some(nested) => format!("{} {{ {} }}", field, nested),
        None if T::is_relation(field) => format!("{} {{ {} }}", field, DEFAULT_RELATION_SELECTION),
        None => field.to_string(),
    }
}

/// Selection for `fields` plus [`BASE_FIELDS`], each field once, base fields first
pub fn selection_for<'a, T, I>(fields: I) -> String
where
    T: Entity,
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = BASE_FIELDS.to_vec();
    for field in fields {
        if !names.contains(&field) {
            names.push(field);
        }
    }

    names
        .into_iter()
        .map(render_field::<T>)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Selection covering every attribute of `T`
pub fn full_selection<T: Entity>() -> String {
    selection_for::<T, _>(T::field_names().iter().copied())
}

/// `scene_markers` -> `SceneMarkers`
pub fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Root field of a point lookup: `findScene`
pub fn find_one_root<T: Entity>() -> String {
    format!("find{}", T::TYPE_NAME)
}

/// Root field of a search: `findScenes`
pub fn find_many_root<T: Entity>() -> String {
    format!("find{}", pascal_case(T::PLURAL))
}

/// Name of the type-specific filter argument: `scene_filter`
pub fn filter_argument<T: Entity>() -> String {
    T::FILTER_ARGUMENT.to_string()
}

pub fn find_by_id_document<T: Entity>(selection: &str) -> String {
    let root = find_one_root::<T>();
    format!(
        "query Find{}($id: ID!) {{ {}(id: $id) {{ {} }} }}",
        T::TYPE_NAME,
        root,
        selection
    )
}

pub fn find_page_document<T: Entity>(selection: &str) -> String {
    let root = find_many_root::<T>();
    let argument = filter_argument::<T>();
    format!(
        "query Find{plural}($filter: FindFilterType, ${arg}: {type_name}FilterType) \
         {{ {root}(filter: $filter, {arg}: ${arg}) {{ count {list} {{ {selection} }} }} }}",
        plural = pascal_case(T::PLURAL),
        arg = argument,
        type_name = T::TYPE_NAME,
        root = root,
        list = T::PLURAL,
        selection = selection,
    )
}
