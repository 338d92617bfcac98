//! `#[orm(...)]` field attribute parsing.
//!
//! Every `key = "value"` pair maps the field to wire name `value` under naming
//! scheme `key`:
//!
//! ```ignore
//! #[orm(db = "sku", json = "code")]
//! sku: Option<String>,
//! ```

use std::collections::HashSet;

use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, Lit, MetaNameValue, Result, Token};

use crate::sql_ident::parse_sql_ident;

pub struct WireName {
    pub scheme: String,
    pub name: String,
}

/// All wire names declared on `field`, in declaration order.
pub fn field_wire_names(field: &syn::Field) -> Result<Vec<WireName>> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();

    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        let pairs =
            attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
        for pair in pairs {
            let Some(scheme) = pair.path.get_ident().map(|i| i.to_string()) else {
                return Err(syn::Error::new_spanned(
                    &pair.path,
                    "expected a naming scheme such as `db` or `json`",
                ));
            };
            let Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) = &pair.value
            else {
                return Err(syn::Error::new_spanned(
                    &pair.value,
                    "wire name must be a string literal",
                ));
            };
            if !seen.insert(scheme.clone()) {
                return Err(syn::Error::new_spanned(
                    &pair.path,
                    format!("duplicate `{scheme}` wire name"),
                ));
            }
            let name = parse_sql_ident(lit, &format!("`{scheme}` wire name"))?;
            names.push(WireName { scheme, name });
        }
    }

    Ok(names)
}

/// The wire name for `scheme`, if declared.
pub fn wire_name_for<'a>(names: &'a [WireName], scheme: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|w| w.scheme == scheme)
        .map(|w| w.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn named(input: syn::FieldsNamed) -> Vec<syn::Field> {
        input.named.into_iter().collect()
    }

    #[test]
    fn parses_multiple_schemes() {
        let fields = named(parse_quote!({
            #[orm(db = "sku", json = "code")]
            sku: Option<String>
        }));
        let names = field_wire_names(&fields[0]).unwrap();
        assert_eq!(wire_name_for(&names, "db"), Some("sku"));
        assert_eq!(wire_name_for(&names, "json"), Some("code"));
        assert_eq!(wire_name_for(&names, "xml"), None);
    }

    #[test]
    fn no_attribute_means_no_wire_names() {
        let fields = named(parse_quote!({ note: String }));
        assert!(field_wire_names(&fields[0]).unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_and_duplicate_names() {
        let fields = named(parse_quote!({
            #[orm(db = "not valid")]
            a: i64,
            #[orm(db = "a")]
            #[orm(db = "b")]
            b: i64,
            #[orm(db = 3)]
            c: i64
        }));
        assert!(field_wire_names(&fields[0]).is_err());
        assert!(field_wire_names(&fields[1]).is_err());
        assert!(field_wire_names(&fields[2]).is_err());
    }
}
