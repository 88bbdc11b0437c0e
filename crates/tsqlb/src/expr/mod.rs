//! Expression algebra: references, literals, predicates and functions.
//!
//! Nodes are plain values. Composition never mutates a node; it builds a new
//! one around clones of its inputs, and rendering is a pure walk of the tree.
//!
//! ```
//! use tsqlb::expr::{Ref, functions};
//!
//! let qty = Ref::column(Some("sod"), "OrderQty");
//! let price = Ref::column(Some("sod"), "UnitPrice");
//! let discount = Ref::column(Some("sod"), "UnitPriceDiscount");
//!
//! let discounts = qty.multiplied_by(&price).multiplied_by(&discount).alias("Discounts");
//! assert_eq!(
//!     discounts.render(),
//!     "((sod.OrderQty * sod.UnitPrice) * sod.UnitPriceDiscount) AS Discounts"
//! );
//!
//! let n = functions::count_distinct(Ref::column(None, "Country"));
//! assert_eq!(n.render(), "COUNT(DISTINCT Country)");
//! ```

pub mod functions;
mod literal;
mod predicate;
mod reference;

pub use functions::{DatePart, FunctionCall};
pub use literal::Literal;
pub use predicate::{CompareOp, InSet, Predicate};
pub use reference::{ArithOp, ColumnRef, Ref, Subquery};
