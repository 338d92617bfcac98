//! Tests for `#[derive(Describe)]` and `#[derive(FromRow)]`.

use bulksql::{
    Describe, FieldValue, FromRow, SqlError, StatementBuilder, UpdateItem, Value, extract_fields,
};

#[derive(Debug, Clone, Default, Describe)]
struct ProductPayload {
    #[orm(db = "sku", json = "code")]
    sku: Option<String>,
    #[orm(db = "name")]
    name: Option<String>,
    #[orm(db = "price")]
    price: Option<f64>,
    #[orm(db = "qty")]
    qty: Option<i32>,
    // no wire name: never part of a statement
    #[allow(dead_code)]
    note: Option<String>,
}

#[derive(Debug, Clone, Default, Describe)]
struct ProductCondition {
    #[orm(db = "id")]
    id: Option<i64>,
    #[orm(db = "id")]
    ids: Option<Vec<i64>>,
    #[orm(db = "sku")]
    sku: Option<String>,
    #[orm(db = "sku")]
    skus: Option<Vec<String>>,
}

#[derive(Debug, Describe)]
struct Tagged {
    #[orm(db = "tag")]
    tag: String,
}

#[allow(dead_code)]
#[derive(Debug, FromRow)]
struct Product {
    id: i64,
    #[orm(db = "sku")]
    code: Option<String>,
    #[orm(column = "name")]
    title: Option<String>,
    price: Option<f64>,
    qty: Option<i32>,
}

#[test]
fn describe_reports_declaration_order_and_absence() {
    let payload = ProductPayload {
        sku: Some("A-1".into()),
        qty: Some(3),
        ..Default::default()
    };
    let fields = payload.describe_fields("db");
    let names: Vec<_> = fields.iter().map(|f| f.name).collect();
    assert_eq!(names, ["sku", "name", "price", "qty"]);
    assert_eq!(fields[0].value, FieldValue::Present(Value::from("A-1")));
    assert!(fields[1].value.is_absent());

    let json = payload.describe_fields("json");
    assert_eq!(json.len(), 1);
    assert_eq!(json[0].name, "code");
    assert!(payload.describe_fields("xml").is_empty());
}

#[test]
fn non_option_fields_are_always_present() {
    let fields = Tagged { tag: "sale".into() }.describe_fields("db");
    assert_eq!(fields[0].value, FieldValue::Present(Value::from("sale")));
}

#[test]
fn later_present_field_wins_shared_wire_name() {
    let cond = ProductCondition {
        id: Some(1),
        ids: Some(vec![2, 3]),
        ..Default::default()
    };
    let map = extract_fields(&cond, "db").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["id"], Value::from(vec![2_i64, 3]));

    let cond = ProductCondition {
        id: Some(1),
        ..Default::default()
    };
    assert_eq!(extract_fields(&cond, "db").unwrap()["id"], Value::from(1_i64));
}

#[test]
fn blank_scheme_is_an_invalid_descriptor() {
    let err = extract_fields(&ProductPayload::default(), "  ").unwrap_err();
    assert!(matches!(err, SqlError::InvalidDescriptor(_)));
}

#[test]
fn derived_types_drive_the_builders() {
    let builder = StatementBuilder::new("products");

    let stmt = builder
        .update(
            &ProductPayload {
                name: Some("Desk".into()),
                price: Some(99.5),
                ..Default::default()
            },
            &ProductCondition {
                skus: Some(vec!["A-1".into(), "A-2".into()]),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE products SET name=:val_name, price=:val_price WHERE sku IN (:cond_sku)"
    );
    let bound = stmt.bind().unwrap();
    assert_eq!(
        bound.sql,
        "UPDATE products SET name=$1, price=$2 WHERE sku IN ($3, $4)"
    );

    let json = builder
        .scheme("json")
        .insert(&ProductPayload {
            sku: Some("A-1".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(json.sql, "INSERT INTO products (code) VALUES (:code)");
}

#[test]
fn bulk_update_from_derived_items() {
    let items: Vec<_> = (1..=3)
        .map(|i| {
            let sku = format!("sku_{i}");
            UpdateItem::new(
                ProductPayload {
                    name: Some(format!("product_{i}")),
                    qty: Some(5),
                    ..Default::default()
                },
                ProductCondition {
                    sku: Some(sku),
                    ..Default::default()
                },
            )
        })
        .collect();
    let stmt = StatementBuilder::new("products").bulk_update(&items).unwrap();
    assert!(stmt.sql.starts_with(
        "START TRANSACTION;\n\
         UPDATE products SET name=:idx0_val_name, qty=:idx0_val_qty WHERE sku=:idx0_cond_sku;\n"
    ));
    assert!(stmt.sql.ends_with(";\nCOMMIT;"));
    assert_eq!(stmt.binds.len(), 9);
    assert_eq!(stmt.binds["idx2_cond_sku"], Value::from("sku_3"));
}
