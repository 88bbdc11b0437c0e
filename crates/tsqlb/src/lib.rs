//! # tsqlb
//!
//! Composable T-SQL statement builder.
//!
//! ## Features
//!
//! - **Text out, nothing else**: builders assemble SQL strings; no connection, no execution
//! - **Immutable expressions**: references, predicates and functions compose into new nodes
//! - **Configurable qualification**: database / schema / table-alias prefixes toggle per statement
//! - **Fixed clause order**: clauses register in any order and render in T-SQL order
//!
//! ## Query Builder (qb)
//!
//! ```
//! use tsqlb::{qb, BuildOptions, Order, Source, Statement, TableDefinition};
//!
//! let source = Source::new()
//!     .with("p", TableDefinition::new("AdventureWorks2022", "Production", "Product"))
//!     .with("sod", TableDefinition::new("AdventureWorks2022", "Sales", "SalesOrderDetail"));
//!
//! let mut q = qb::select(&source, BuildOptions::new().database_name(false));
//! let name = q.column_as("p", "Name", "ProductName");
//! let sales = q
//!     .column("sod", "OrderQty")
//!     .multiplied_by(q.column("sod", "UnitPrice"))
//!     .alias("NonDiscountSales");
//! let on = q.column("p", "ProductID").is_equal_to(q.column("sod", "ProductID"));
//!
//! q.select(&name)
//!     .select(&sales)
//!     .from("p")
//!     .inner_join("sod", on)
//!     .order_by(&name, Order::Desc);
//!
//! assert_eq!(
//!     q.build().unwrap(),
//!     "SELECT p.Name AS ProductName, (sod.OrderQty * sod.UnitPrice) AS NonDiscountSales \
//!      FROM Production.Product AS p \
//!      INNER JOIN Sales.SalesOrderDetail AS sod ON p.ProductID = sod.ProductID \
//!      ORDER BY ProductName DESC"
//! );
//! ```

pub mod error;
pub mod expr;
pub mod options;
pub mod prelude;
pub mod qb;
pub mod table;

pub use error::{BuildError, BuildResult};
pub use expr::{
    ArithOp, ColumnRef, CompareOp, DatePart, FunctionCall, InSet, Literal, Predicate, Ref,
    Subquery, functions,
};
pub use options::{BuildOptions, InsertOptions, QualifyOptions};
pub use table::{Column, Columns, Source, TableDefinition};

// Re-export qb module for easy access
pub use qb::{
    ColumnComparator, InsertBuilder, InsertRow, JoinKind, Order, QueryFactory,
    SelectBuilder, Statement, StatementKind, Top, UpdateBuilder, UpdateTarget,
};
