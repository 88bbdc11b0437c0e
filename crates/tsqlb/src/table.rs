//! Table descriptors and name qualification.
//!
//! A [`TableDefinition`] is caller-supplied metadata: database, schema, name and
//! the column vocabulary. Nothing here checks that a column exists; the
//! builders render whatever identifiers they are given.
//!
//! # Example
//! ```
//! use tsqlb::{QualifyOptions, TableDefinition};
//!
//! let customer = TableDefinition::new("AdventureWorks2022", "Sales", "Customer")
//!     .with_columns(["CustomerID", "City", "Country"]);
//!
//! assert_eq!(customer.render(QualifyOptions::new()), "AdventureWorks2022.Sales.Customer");
//! assert_eq!(customer.render(QualifyOptions::unqualified()), "Customer");
//! ```

use crate::options::QualifyOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A column descriptor used in named column mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Physical column name.
    pub name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The column vocabulary of a table.
///
/// Either a plain ordered list of names, or a mapping from a caller-chosen key
/// to a [`Column`] descriptor (`{ id: Column("Id") }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Columns {
    List(Vec<String>),
    Named(BTreeMap<String, Column>),
}

impl Default for Columns {
    fn default() -> Self {
        Columns::List(Vec::new())
    }
}

impl Columns {
    /// Resolve a column key to its physical name.
    ///
    /// Named mappings translate known keys; everything else is passed through.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        match self {
            Columns::Named(map) => map.get(key).map(|c| c.name.as_str()).unwrap_or(key),
            Columns::List(_) => key,
        }
    }

    /// Physical column names in declaration order (key order for mappings).
    pub fn names(&self) -> Vec<&str> {
        match self {
            Columns::List(cols) => cols.iter().map(String::as_str).collect(),
            Columns::Named(map) => map.values().map(|c| c.name.as_str()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Columns::List(cols) => cols.len(),
            Columns::Named(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Table metadata: `database.schema.name` plus its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub database: String,
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub columns: Columns,
}

impl TableDefinition {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
            columns: Columns::default(),
        }
    }

    /// Declare the columns as an ordered list of names.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Columns::List(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Declare the columns as a key -> descriptor mapping.
    pub fn with_named_columns<I, K>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = (K, Column)>,
        K: Into<String>,
    {
        self.columns = Columns::Named(columns.into_iter().map(|(k, c)| (k.into(), c)).collect());
        self
    }

    /// Physical name for a column key.
    pub fn column_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.columns.resolve(key)
    }

    /// Render `[database.][schema.]name`.
    ///
    /// Asking for the database while suppressing the schema yields
    /// `database..name`, T-SQL's spelling for "default schema of that database".
    pub fn render(&self, opts: impl Into<QualifyOptions>) -> String {
        let opts = opts.into();
        let mut out = String::with_capacity(self.database.len() + self.schema.len() + self.name.len() + 2);
        if opts.use_database_name {
            out.push_str(&self.database);
            out.push('.');
        }
        if opts.use_schema_name {
            out.push_str(&self.schema);
            out.push('.');
        } else if opts.use_database_name {
            out.push('.');
        }
        out.push_str(&self.name);
        out
    }
}

/// The tables a statement may reference, keyed by alias.
///
/// Aliases iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source {
    tables: BTreeMap<String, TableDefinition>,
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under an alias (replacing any previous one).
    pub fn with(mut self, alias: impl Into<String>, table: TableDefinition) -> Self {
        self.tables.insert(alias.into(), table);
        self
    }

    pub fn insert(&mut self, alias: impl Into<String>, table: TableDefinition) {
        self.tables.insert(alias.into(), table);
    }

    pub fn get(&self, alias: &str) -> Option<&TableDefinition> {
        self.tables.get(alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.tables.contains_key(alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, TableDefinition)> for Source {
    fn from_iter<I: IntoIterator<Item = (K, TableDefinition)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }
}
