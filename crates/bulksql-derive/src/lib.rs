//! Derive macros for bulksql
//!
//! Provides `#[derive(Describe)]` and `#[derive(FromRow)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod describe;
mod from_row;
mod sql_ident;

/// Derive `Describe` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use bulksql::Describe;
///
/// #[derive(Describe)]
/// struct ProductCondition {
///     #[orm(db = "id")]
///     id: Option<i64>,
///     #[orm(db = "id")]
///     ids: Option<Vec<i64>>,
///     #[orm(db = "sku", json = "code")]
///     sku: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(<scheme> = "wire_name", ...)]` - Wire name of the field under each naming scheme
///
/// Fields without a wire name for the requested scheme are left out.
/// `Option<T>` fields are absent when `None`; other fields are always present.
#[proc_macro_derive(Describe, attributes(orm))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    describe::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `FromRow` trait for a struct.
///
/// # Example
///
/// ```ignore
/// use bulksql::FromRow;
///
/// #[derive(FromRow)]
/// struct Product {
///     id: i64,
///     #[orm(db = "sku")]
///     code: String,
///     #[orm(column = "description")]
///     desc: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(db = "name")]` - Same, shared with `Describe`
#[proc_macro_derive(FromRow, attributes(orm))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
