//! Statement builders.
//!
//! Each builder is a mutable accumulator: clauses are registered in any order
//! through chainable `&mut Self` methods, then [`Statement::build`] validates
//! and renders the statement once, in fixed T-SQL clause order.
//!
//! - Single-value clauses (`FROM`, `WHERE`, `HAVING`, `TOP`, `INTO`, `OFFSET`,
//!   `FETCH`) may be registered once; a second registration is reported by
//!   `build()`.
//! - Values are inlined as T-SQL literals. There are no placeholders.
//!
//! # Usage
//!
//! ```
//! use tsqlb::{qb, BuildOptions, Source, Statement, TableDefinition};
//!
//! let source = Source::new().with("c", TableDefinition::new("AdventureWorks2022", "Sales", "Customer"));
//!
//! let mut q = qb::select(&source, BuildOptions::unqualified());
//! let country = q.column("c", "Country");
//! q.select_all().from("c").where_clause(country.is_equal_to("Mexico"));
//!
//! assert_eq!(q.build().unwrap(), "SELECT * FROM Customer WHERE Country = 'Mexico'");
//! ```

mod factory;
mod insert;
mod select;
mod traits;
mod update;

pub use factory::QueryFactory;
pub use insert::{InsertBuilder, InsertRow};
pub use select::{JoinKind, Order, SelectBuilder, Top};
pub use traits::{Statement, StatementKind};
pub use update::{ColumnComparator, UpdateBuilder, UpdateTarget};

use crate::options::{BuildOptions, InsertOptions, QualifyOptions};
use crate::table::{Source, TableDefinition};

/// Create a SELECT builder over the given source.
pub fn select(source: &Source, options: BuildOptions) -> SelectBuilder<'_> {
    SelectBuilder::new(source, options)
}

/// Create an INSERT builder for the given table.
///
/// # Example
/// ```
/// use tsqlb::{qb, InsertOptions, InsertRow, Literal, Statement, TableDefinition};
///
/// let unit_measure = TableDefinition::new("AdventureWorks2022", "Production", "UnitMeasure");
/// let mut ib = qb::insert(&unit_measure, InsertOptions::new().database_name(false).omit_column_list(true));
/// ib.row(
///     InsertRow::new()
///         .value("UnitMeasureCode", Literal::ntext("FT"))
///         .value("Name", Literal::ntext("Feet"))
///         .value("ModifiedDate", "20080414"),
/// );
/// assert_eq!(
///     ib.build().unwrap(),
///     "INSERT INTO Production.UnitMeasure VALUES (N'FT', N'Feet', '20080414')"
/// );
/// ```
pub fn insert(table: &TableDefinition, options: InsertOptions) -> InsertBuilder<'_> {
    InsertBuilder::new(table, options)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &TableDefinition, options: QualifyOptions) -> UpdateBuilder<'_> {
    UpdateBuilder::new(table, options)
}
