//! Describe derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::common::attrs::field_wire_names;
use crate::common::named_fields;
use crate::common::syn_types::option_inner;

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = named_fields(&input, "Describe")?;

    let mut pushes = Vec::new();
    for field in &fields.named {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let wire_names = field_wire_names(field)?;
        if wire_names.is_empty() {
            continue;
        }

        let arms = wire_names.iter().map(|w| {
            let scheme = &w.scheme;
            let wire = &w.name;
            quote! { #scheme => ::core::option::Option::Some(#wire), }
        });

        // Option<T> fields are absent when None; anything else is always set.
        let value = if option_inner(&field.ty).is_some() {
            quote! {
                bulksql::FieldValue::from_option(::core::clone::Clone::clone(&self.#field_name))
            }
        } else {
            quote! {
                bulksql::FieldValue::Present(
                    ::core::convert::Into::<bulksql::Value>::into(
                        ::core::clone::Clone::clone(&self.#field_name)
                    )
                )
            }
        };

        pushes.push(quote! {
            let wire: ::core::option::Option<&'static str> = match scheme {
                #(#arms)*
                _ => ::core::option::Option::None,
            };
            if let ::core::option::Option::Some(wire) = wire {
                fields.push(bulksql::FieldDesc { name: wire, value: #value });
            }
        });
    }

    Ok(quote! {
        impl #impl_generics bulksql::Describe for #name #ty_generics #where_clause {
            #[allow(unused_mut, unused_variables)]
            fn describe_fields(&self, scheme: &str) -> ::std::vec::Vec<bulksql::FieldDesc> {
                let mut fields = ::std::vec::Vec::new();
                #(#pushes)*
                fields
            }
        }
    })
}
