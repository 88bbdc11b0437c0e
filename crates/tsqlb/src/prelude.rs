//! Convenient imports for typical `tsqlb` usage.
//!
//! ```
//! use tsqlb::prelude::*;
//! ```

pub use crate::expr::functions;
pub use crate::{BuildError, BuildResult, CompareOp, Literal, Predicate, Ref, Subquery};
pub use crate::{BuildOptions, InsertOptions, QualifyOptions, Source, TableDefinition};
pub use crate::{InsertRow, Order, QueryFactory, Statement, Top};
