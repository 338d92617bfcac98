//! FromRow derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::common::attrs::{field_wire_names, wire_name_for};
use crate::common::named_fields;

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = named_fields(&input, "FromRow")?;

    let mut field_extracts = Vec::new();
    for field in &fields.named {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let column_name = column_name(field, field_name)?;
        field_extracts.push(quote! {
            #field_name: row.try_get_column(#column_name)?
        });
    }

    Ok(quote! {
        impl #impl_generics bulksql::FromRow for #name #ty_generics #where_clause {
            fn from_row(row: &tokio_postgres::Row) -> bulksql::SqlResult<Self> {
                use bulksql::RowExt;
                Ok(Self {
                    #(#field_extracts),*
                })
            }
        }
    })
}

/// `column` wins over `db`; without either the field name is the column.
fn column_name(field: &syn::Field, field_name: &syn::Ident) -> Result<String> {
    let names = field_wire_names(field)?;
    Ok(wire_name_for(&names, "column")
        .or_else(|| wire_name_for(&names, "db"))
        .map(str::to_string)
        .unwrap_or_else(|| field_name.to_string()))
}
