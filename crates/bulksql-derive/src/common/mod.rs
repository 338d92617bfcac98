//! Common utilities shared across macro modules.

pub mod attrs;
pub mod syn_types;

use syn::{Data, DeriveInput, Fields, FieldsNamed, Result};

/// The named fields of a struct, or a spanned error naming the derive.
pub fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> Result<&'a FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{derive} can only be derived for structs"),
        )),
    }
}
