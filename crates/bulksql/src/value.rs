//! Bind values.
//!
//! Descriptor fields resolve to a [`Value`]: either a single [`Scalar`] or a
//! list of scalars. An unset optional field is [`FieldValue::Absent`] and never
//! reaches a statement or bind map.

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

/// Bind key → value. Always iterated in lexicographic key order.
pub type Binds = BTreeMap<String, Value>;

/// A single bindable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

/// A present field value: a scalar, or a sequence of scalars.
///
/// Sequences are used for membership (`IN (...)`) conditions and are
/// expanded into one positional placeholder per element when bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl Value {
    /// Whether this is an empty sequence.
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }
}

/// A described field's value: set or unset.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Present(Value),
    Absent,
}

impl FieldValue {
    /// Present when `value` is `Some`.
    pub fn from_option<T: Into<Value>>(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldValue::Present(v.into()),
            None => FieldValue::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl<T: Into<Value>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        FieldValue::from_option(value)
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant($conv(v))
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

impl_scalar_from! {
    String => Text(|v| v),
    &str => Text(str::to_string),
    &String => Text(String::clone),
    i64 => Int(|v| v),
    i32 => Int(i64::from),
    i16 => Int(i64::from),
    u32 => Int(i64::from),
    f64 => Float(|v| v),
    f32 => Float(f64::from),
    bool => Bool(|v| v),
    Uuid => Uuid(|v| v),
    DateTime<Utc> => Timestamp(|v| v),
}

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Value::Scalar(v)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl Scalar {
    fn kind(&self) -> &'static str {
        match self {
            Scalar::Text(_) => "text",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "boolean",
            Scalar::Uuid(_) => "uuid",
            Scalar::Timestamp(_) => "timestamp",
        }
    }

    fn mismatch(&self, ty: &Type) -> Box<dyn Error + Sync + Send> {
        format!("cannot bind {} value to parameter of type {ty}", self.kind()).into()
    }
}

impl ToSql for Scalar {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Scalar::Text(s) if <String as ToSql>::accepts(ty) => s.to_sql(ty, out),
            Scalar::Int(n) if *ty == Type::INT2 => i16::try_from(*n)?.to_sql(ty, out),
            Scalar::Int(n) if *ty == Type::INT4 => i32::try_from(*n)?.to_sql(ty, out),
            Scalar::Int(n) if *ty == Type::INT8 => n.to_sql(ty, out),
            Scalar::Int(n) if *ty == Type::FLOAT8 => (*n as f64).to_sql(ty, out),
            Scalar::Float(f) if *ty == Type::FLOAT4 => (*f as f32).to_sql(ty, out),
            Scalar::Float(f) if *ty == Type::FLOAT8 => f.to_sql(ty, out),
            Scalar::Bool(b) if *ty == Type::BOOL => b.to_sql(ty, out),
            Scalar::Uuid(u) if *ty == Type::UUID => u.to_sql(ty, out),
            Scalar::Timestamp(t) if *ty == Type::TIMESTAMPTZ => t.to_sql(ty, out),
            Scalar::Timestamp(t) if *ty == Type::TIMESTAMP => t.naive_utc().to_sql(ty, out),
            other => Err(other.mismatch(ty)),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <String as ToSql>::accepts(ty)
            || [
                Type::INT2,
                Type::INT4,
                Type::INT8,
                Type::FLOAT4,
                Type::FLOAT8,
                Type::BOOL,
                Type::UUID,
                Type::TIMESTAMP,
                Type::TIMESTAMPTZ,
            ]
            .contains(ty)
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_variants() {
        assert_eq!(Value::from("v1"), Value::Scalar(Scalar::Text("v1".into())));
        assert_eq!(Value::from(12_i32), Value::Scalar(Scalar::Int(12)));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::List(vec![Scalar::Text("a".into()), Scalar::Text("b".into())])
        );
        assert!(Value::from(Vec::<i64>::new()).is_empty_list());
    }

    #[test]
    fn option_maps_to_field_value() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Absent);
        assert_eq!(
            FieldValue::from(Some(0_i64)),
            FieldValue::Present(Value::Scalar(Scalar::Int(0)))
        );
    }

    #[test]
    fn int_narrows_to_int4() {
        let mut out = BytesMut::new();
        Scalar::Int(7).to_sql(&Type::INT4, &mut out).unwrap();
        assert_eq!(&out[..], &7_i32.to_be_bytes());
    }

    #[test]
    fn int_out_of_range_for_int2_errors() {
        let mut out = BytesMut::new();
        assert!(Scalar::Int(1 << 20).to_sql(&Type::INT2, &mut out).is_err());
    }

    #[test]
    fn text_to_integer_parameter_is_rejected() {
        let mut out = BytesMut::new();
        let Err(err) = Scalar::Text("x".into()).to_sql(&Type::INT8, &mut out) else {
            panic!("text bound to an int8 parameter");
        };
        assert!(err.to_string().contains("cannot bind text value"));
    }

    #[test]
    fn serializes_untagged() {
        let v = Value::from(vec![1_i64, 2]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1,2]");
        let s = Value::from("sku_1");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"sku_1\"");
    }
}
