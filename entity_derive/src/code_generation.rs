//! Code generation for the `Entity` trait
//!
//! This module turns the parsed entity and field metadata into the
//! `entity_store::Entity` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parsing::{EntityInfo, FieldInfo};

pub fn generate_entity_impl(
    input: &DeriveInput,
    entity_info: &EntityInfo,
    field_info: &FieldInfo,
) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let type_name = &entity_info.type_name;
    let plural = &entity_info.plural;
    let filter_argument = &entity_info.filter_argument;
    let field_names = &field_info.field_names;

    let relation_idents = &field_info.relations;
    let relation_names: Vec<String> = relation_idents.iter().map(|i| i.to_string()).collect();

    // Each relation is reconciled only when the caller asked for that field
    let reconcile_body = quote! {
        #(
            if fields.contains(#relation_names) {
                entity_store::Related::reconcile(&mut self.#relation_idents, store).await;
            }
        )*
    };

    quote! {
        #[entity_store::async_trait]
        impl #impl_generics entity_store::Entity for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const PLURAL: &'static str = #plural;
            const FILTER_ARGUMENT: &'static str = #filter_argument;

            fn id(&self) -> &str {
                &self.id
            }

            fn field_names() -> &'static [&'static str] {
                &[#(#field_names),*]
            }

            fn relation_fields() -> &'static [&'static str] {
                &[#(#relation_names),*]
            }

            async fn reconcile_relations(
                &mut self,
                store: &entity_store::EntityStore,
                fields: &entity_store::FieldSet,
            ) {
                let _ = (&store, &fields);
                #reconcile_body
            }
        }
    }
}
