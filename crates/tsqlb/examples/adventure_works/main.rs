//! Statement builder example for tsqlb
//!
//! Run with: cargo run --example adventure_works -p tsqlb
//!
//! Table descriptors are loaded from `tables.json` next to this file, then a
//! handful of AdventureWorks queries are built and printed.

use tsqlb::prelude::*;
use tsqlb::DatePart;

const TABLES: &str = include_str!("tables.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source: Source = serde_json::from_str(TABLES)?;
    let factory = QueryFactory::new(source);
    let schema_only = BuildOptions::new().database_name(false);

    // Join with calculated columns
    let mut q = factory.select(schema_only);
    let product_name = q.column_as("p", "Name", "ProductName");
    let sales = q
        .column("sod", "OrderQty")
        .multiplied_by(q.column("sod", "UnitPrice"));
    let on = q.column("p", "ProductID").is_equal_to(q.column("sod", "ProductID"));
    q.select(&product_name)
        .select_as(&sales, "NonDiscountSales")
        .from("p")
        .inner_join("sod", on)
        .order_by(&product_name, Order::Desc);
    println!("{}\n", q.build()?);

    // Correlated subquery
    let mut q = factory.select(schema_only);
    let parent_model = q.column("p", "ProductModelID");
    let jerseys = q.subquery(|sub| {
        let model = sub.column("pm", "ProductModelID");
        let matches = parent_model
            .is_equal_to(&model)
            .and(sub.column("pm", "Name").is_like("Long-Sleeve Logo Jersey%"));
        sub.select_all_from("pm").from("pm").where_clause(matches);
    })?;
    q.distinct()
        .select_column("p", "Name")
        .from("p")
        .where_clause(Predicate::exists(jerseys));
    println!("{}\n", q.build()?);

    // Aggregates
    let sql = factory.inline_select(BuildOptions::unqualified().schema_name(true), |q| {
        let product = q.column("sod", "ProductID");
        let avg_qty = functions::avg(q.column("sod", "OrderQty"));
        q.select(&product)
            .select_as(&avg_qty, "[Average Quantity]")
            .from("sod")
            .group_by([&product])
            .having(avg_qty.is_greater_than(5))
            .order_by(&product, None);
    })?;
    println!("{sql}\n");

    // Date arithmetic
    let sql = factory.inline_select(schema_only.table_alias(false), |q| {
        let hired = q.column("e", "HireDate");
        let tenure = functions::datediff(DatePart::Year, &hired, functions::getdate());
        q.select_column("e", "JobTitle")
            .select_as(tenure, "Years")
            .from("e")
            .order_by(&hired, Order::Asc)
            .offset(0)
            .fetch(10);
    })?;
    println!("{sql}\n");

    // Mutations
    let mut ib = factory.insert(
        "um",
        InsertOptions::new().database_name(false).omit_column_list(true),
    )?;
    ib.row(
        InsertRow::new()
            .value("UnitMeasureCode", Literal::ntext("FT"))
            .value("Name", Literal::ntext("Feet"))
            .value("ModifiedDate", "20080414"),
    );
    println!("{}\n", ib.build()?);

    let mut ub = factory.update("addr", QualifyOptions::new().database_name(false))?;
    ub.update(|t| {
        t.set("ModifiedDate", functions::getdate());
    })
    .where_clause(|w| w.compare("City", CompareOp::Eq, "Bothell"));
    println!("{}", ub.build()?);

    Ok(())
}
