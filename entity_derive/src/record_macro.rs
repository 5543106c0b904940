use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error};

/// Convenience attribute macro that adds all necessary derives for an entity model
///
/// Every field gets `#[serde(default)]` semantics so records can be built from
/// replies that only carry a subset of the attributes.
pub fn record_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return Error::new(
            proc_macro2::Span::call_site(),
            "record takes no arguments: use #[entity(...)] for entity options",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let attrs = &input.attrs;
    let vis = &input.vis;
    let generics = &input.generics;
    let where_clause = &generics.where_clause;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Error::new_spanned(name, "record can only be used on structs")
                .to_compile_error()
                .into()
        }
    };

    let expanded = quote! {
        #[derive(
            Debug,
            Clone,
            Default,
            PartialEq,
            serde::Serialize,
            serde::Deserialize,
            entity_store::Entity
        )]
        #[serde(default)]
        #(#attrs)*
        #vis struct #name #generics #where_clause #fields
    };

    TokenStream::from(expanded)
}
