//! Statement building without a database.
//!
//! Run with:
//! `cargo run --example build_statements -p bulksql`

use bulksql::{Describe, Paginate, SqlResult, StatementBuilder, UpdateItem};

#[derive(Debug, Clone, Default, Describe)]
struct ProductPayload {
    #[orm(db = "name", json = "title")]
    name: Option<String>,
    #[orm(db = "price", json = "price")]
    price: Option<f64>,
    #[orm(db = "qty")]
    qty: Option<i32>,
}

#[derive(Debug, Clone, Default, Describe)]
struct ProductCondition {
    #[orm(db = "id")]
    ids: Option<Vec<i64>>,
    #[orm(db = "sku")]
    sku: Option<String>,
}

fn main() -> SqlResult<()> {
    let products = StatementBuilder::new("products");

    let cond = ProductCondition {
        ids: Some(vec![1, 2, 3]),
        ..Default::default()
    };

    println!("[select]");
    let select = products.select(&["id", "name"], Some(&cond), Some(&Paginate::new(2, 20)))?;
    print_statement(&select)?;

    println!("[count]");
    print_statement(&products.count(Some(&cond))?)?;

    println!("[insert]");
    let payload = ProductPayload {
        name: Some("Desk".into()),
        price: Some(149.0),
        qty: None,
    };
    print_statement(&products.insert(&payload)?)?;

    println!("[insert, json scheme]");
    print_statement(&products.scheme("json").insert(&payload)?)?;

    println!("[update]");
    print_statement(&products.update(&payload, &cond)?)?;

    println!("[delete]");
    print_statement(&products.delete(&cond)?)?;

    println!("[bulk update]");
    let items = vec![
        UpdateItem::new(
            ProductPayload {
                qty: Some(5),
                ..Default::default()
            },
            ProductCondition {
                sku: Some("sku_1".into()),
                ..Default::default()
            },
        ),
        UpdateItem::new(payload, cond),
    ];
    let bulk = products.bulk_update(&items)?;
    println!("{}", bulk.sql);
    println!("  binds: {:?}", bulk.binds);

    println!("[delete without a condition]");
    match products.delete(&ProductCondition::default()) {
        Ok(_) => println!("  unexpectedly built"),
        Err(e) => println!("  refused: {e}"),
    }

    Ok(())
}

fn print_statement(stmt: &bulksql::BuiltStatement) -> SqlResult<()> {
    let bound = stmt.bind()?;
    println!("  named:      {}", stmt.sql);
    println!("  positional: {}", bound.sql);
    println!("  args:       {:?}", bound.args);
    println!();
    Ok(())
}
