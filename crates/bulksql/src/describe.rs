//! Field description and extraction.
//!
//! A descriptor is any type implementing [`Describe`], usually via
//! `#[derive(Describe)]`:
//!
//! ```ignore
//! use bulksql::Describe;
//!
//! #[derive(Describe)]
//! struct ProductCondition {
//!     #[orm(db = "id")]
//!     id: Option<i64>,
//!     #[orm(db = "id")]
//!     ids: Option<Vec<i64>>,
//!     #[orm(db = "sku", json = "sku")]
//!     sku: Option<String>,
//! }
//! ```
//!
//! [`extract_fields`] turns a descriptor into a sorted wire-name → value map,
//! dropping fields without a wire name for the scheme and fields left unset.

use crate::error::{SqlError, SqlResult};
use crate::ident::{is_reserved_keyword, is_simple_ident};
use crate::value::{FieldValue, Value};
use std::collections::BTreeMap;

/// The naming scheme used by the statement builders unless overridden.
pub const DEFAULT_SCHEME: &str = "db";

/// Wire name → present value, in lexicographic key order.
pub type FieldMap = BTreeMap<String, Value>;

/// One described field: its wire name under some scheme, and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDesc {
    pub name: &'static str,
    pub value: FieldValue,
}

impl FieldDesc {
    pub fn new(name: &'static str, value: impl Into<FieldValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// A field that is always set.
    pub fn present(name: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            value: FieldValue::Present(value.into()),
        }
    }
}

/// Statically describes a record's fields for a naming scheme.
///
/// Implementations return fields in declaration order and omit fields that
/// declare no wire name under `scheme`.
pub trait Describe {
    fn describe_fields(&self, scheme: &str) -> Vec<FieldDesc>;
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe_fields(&self, scheme: &str) -> Vec<FieldDesc> {
        (**self).describe_fields(scheme)
    }
}

/// Extract the present fields of `descriptor` under `scheme`.
///
/// When two fields share a wire name, the later present one wins.
pub fn extract_fields<D: Describe + ?Sized>(descriptor: &D, scheme: &str) -> SqlResult<FieldMap> {
    let scheme = scheme.trim();
    if scheme.is_empty() {
        return Err(SqlError::invalid_descriptor("naming scheme is required"));
    }

    let mut fields = FieldMap::new();
    for field in descriptor.describe_fields(scheme) {
        if !is_simple_ident(field.name) || is_reserved_keyword(field.name) {
            return Err(SqlError::invalid_descriptor(format!(
                "wire name '{}' is not a valid SQL identifier",
                field.name
            )));
        }
        if let FieldValue::Present(value) = field.value {
            fields.insert(field.name.to_string(), value);
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    struct Input {
        field1: String,
        field2: String,
        field3: i64,
        field4: Option<i64>,
        field5: Option<i64>,
    }

    impl Describe for Input {
        fn describe_fields(&self, scheme: &str) -> Vec<FieldDesc> {
            match scheme {
                "json" => vec![
                    FieldDesc::present("f1", self.field1.clone()),
                    FieldDesc::present("f2", self.field2.clone()),
                    FieldDesc::present("f3", self.field3),
                    FieldDesc::new("f4", self.field4),
                    FieldDesc::new("f5", self.field5),
                ],
                "db" => vec![
                    FieldDesc::present("db1", self.field1.clone()),
                    FieldDesc::present("db2", self.field2.clone()),
                    FieldDesc::present("db3", self.field3),
                    FieldDesc::new("db4", self.field4),
                ],
                _ => Vec::new(),
            }
        }
    }

    fn text(s: &str) -> Value {
        Value::Scalar(Scalar::Text(s.to_string()))
    }

    fn int(n: i64) -> Value {
        Value::Scalar(Scalar::Int(n))
    }

    #[test]
    fn extracts_present_fields_for_scheme() {
        let input = Input {
            field1: "v1".into(),
            field2: "v2".into(),
            field3: 1,
            field4: None,
            field5: None,
        };
        let map = extract_fields(&input, "json").unwrap();
        let expected: FieldMap = [("f1", text("v1")), ("f2", text("v2")), ("f3", int(1))]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn zero_value_is_present_not_absent() {
        let input = Input {
            field1: "v1".into(),
            field2: "v2".into(),
            field3: 2,
            field4: Some(0),
            field5: Some(9),
        };
        let map = extract_fields(&input, "db").unwrap();
        assert_eq!(map.get("db4"), Some(&int(0)));
        // field5 has no `db` wire name
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn unknown_scheme_yields_empty_map() {
        let input = Input {
            field1: "v1".into(),
            field2: "v2".into(),
            field3: 1,
            field4: None,
            field5: None,
        };
        assert!(extract_fields(&input, "xml").unwrap().is_empty());
    }

    #[test]
    fn empty_scheme_is_invalid() {
        let input = Input {
            field1: String::new(),
            field2: String::new(),
            field3: 0,
            field4: None,
            field5: None,
        };
        let err = extract_fields(&input, " ").unwrap_err();
        assert!(matches!(err, SqlError::InvalidDescriptor(_)));
    }

    #[test]
    fn bad_wire_name_is_invalid() {
        struct Bad;
        impl Describe for Bad {
            fn describe_fields(&self, _scheme: &str) -> Vec<FieldDesc> {
                vec![FieldDesc::present("name; DROP TABLE t", 1_i64)]
            }
        }
        assert!(matches!(
            extract_fields(&Bad, "db"),
            Err(SqlError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn reserved_wire_name_is_invalid() {
        struct Keyword;
        impl Describe for Keyword {
            fn describe_fields(&self, _scheme: &str) -> Vec<FieldDesc> {
                vec![FieldDesc::new("order", Some(1_i64))]
            }
        }
        assert!(matches!(
            extract_fields(&Keyword, "db"),
            Err(SqlError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn later_present_field_wins_on_shared_wire_name() {
        struct Cond {
            id: Option<i64>,
            ids: Option<Vec<i64>>,
        }
        impl Describe for Cond {
            fn describe_fields(&self, _scheme: &str) -> Vec<FieldDesc> {
                vec![
                    FieldDesc::new("id", self.id),
                    FieldDesc::new("id", self.ids.clone()),
                ]
            }
        }

        let only_id = Cond { id: Some(4), ids: None };
        assert_eq!(extract_fields(&only_id, "db").unwrap()["id"], int(4));

        let both = Cond {
            id: Some(4),
            ids: Some(vec![1, 2]),
        };
        assert_eq!(
            extract_fields(&both, "db").unwrap()["id"],
            Value::from(vec![1_i64, 2])
        );
    }
}
