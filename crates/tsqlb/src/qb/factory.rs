use super::insert::InsertBuilder;
use super::select::SelectBuilder;
use super::traits::Statement;
use super::update::UpdateBuilder;
use crate::error::{BuildError, BuildResult};
use crate::options::{BuildOptions, InsertOptions, QualifyOptions};
use crate::table::{Source, TableDefinition};

/// Owns a [`Source`] and hands out builders over it.
///
/// # Example
/// ```
/// use tsqlb::{BuildOptions, QueryFactory, Source, TableDefinition};
///
/// let factory = QueryFactory::new(
///     Source::new().with("c", TableDefinition::new("AdventureWorks2022", "Sales", "Customer")),
/// );
/// let sql = factory
///     .inline_select(BuildOptions::unqualified(), |q| {
///         q.select_all().from("c");
///     })
///     .unwrap();
/// assert_eq!(sql, "SELECT * FROM Customer");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryFactory {
    source: Source,
}

impl QueryFactory {
    pub fn new(source: Source) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    fn table(&self, table_alias: &str) -> BuildResult<&TableDefinition> {
        self.source
            .get(table_alias)
            .ok_or_else(|| BuildError::UnknownTable(table_alias.to_string()))
    }

    /// A fresh SELECT builder.
    pub fn select(&self, options: BuildOptions) -> SelectBuilder<'_> {
        SelectBuilder::new(&self.source, options)
    }

    /// Configure a SELECT in a callback and build it immediately.
    pub fn inline_select<F>(&self, options: BuildOptions, configure: F) -> BuildResult<String>
    where
        F: for<'q> FnOnce(&mut SelectBuilder<'q>),
    {
        let mut qb = self.select(options);
        configure(&mut qb);
        qb.build()
    }

    /// INSERT into the table registered as `table_alias`.
    pub fn insert(&self, table_alias: &str, options: InsertOptions) -> BuildResult<InsertBuilder<'_>> {
        Ok(InsertBuilder::new(self.table(table_alias)?, options))
    }

    /// UPDATE the table registered as `table_alias`.
    pub fn update(&self, table_alias: &str, options: QualifyOptions) -> BuildResult<UpdateBuilder<'_>> {
        Ok(UpdateBuilder::new(self.table(table_alias)?, options))
    }
}
