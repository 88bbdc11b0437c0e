//! Rendering options.
//!
//! Options control how much of a table's dotted name is emitted and whether
//! column references carry the table alias. They deserialize from any serde
//! format, missing keys falling back to the defaults (everything on):
//!
//! ```
//! use tsqlb::BuildOptions;
//!
//! let opts: BuildOptions = serde_json::from_str(r#"{ "use_database_name": false }"#).unwrap();
//! assert!(!opts.use_database_name);
//! assert!(opts.use_schema_name);
//! assert!(opts.use_table_alias);
//! ```

use serde::{Deserialize, Serialize};

/// Options for SELECT statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Prefix table names with their database.
    pub use_database_name: bool,
    /// Prefix table names with their schema.
    pub use_schema_name: bool,
    /// Emit `AS alias` after FROM/JOIN targets and prefix columns with the alias.
    pub use_table_alias: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            use_database_name: true,
            use_schema_name: true,
            use_table_alias: true,
        }
    }
}

impl BuildOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bare table names, no aliases.
    pub fn unqualified() -> Self {
        Self {
            use_database_name: false,
            use_schema_name: false,
            use_table_alias: false,
        }
    }

    pub fn database_name(mut self, enabled: bool) -> Self {
        self.use_database_name = enabled;
        self
    }

    pub fn schema_name(mut self, enabled: bool) -> Self {
        self.use_schema_name = enabled;
        self
    }

    pub fn table_alias(mut self, enabled: bool) -> Self {
        self.use_table_alias = enabled;
        self
    }

    /// The qualification part of these options.
    pub fn qualify(&self) -> QualifyOptions {
        QualifyOptions {
            use_database_name: self.use_database_name,
            use_schema_name: self.use_schema_name,
        }
    }
}

/// Name qualification for targets that never carry an alias
/// (INTO, INSERT and UPDATE targets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualifyOptions {
    pub use_database_name: bool,
    pub use_schema_name: bool,
}

impl Default for QualifyOptions {
    fn default() -> Self {
        Self {
            use_database_name: true,
            use_schema_name: true,
        }
    }
}

impl QualifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bare table name.
    pub fn unqualified() -> Self {
        Self {
            use_database_name: false,
            use_schema_name: false,
        }
    }

    pub fn database_name(mut self, enabled: bool) -> Self {
        self.use_database_name = enabled;
        self
    }

    pub fn schema_name(mut self, enabled: bool) -> Self {
        self.use_schema_name = enabled;
        self
    }
}

impl From<BuildOptions> for QualifyOptions {
    fn from(opts: BuildOptions) -> Self {
        opts.qualify()
    }
}

/// Options for INSERT statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertOptions {
    #[serde(flatten)]
    pub qualify: QualifyOptions,
    /// Emit `VALUES (...)` without the `(col, ...)` list.
    pub omit_column_list: bool,
}

impl InsertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database_name(mut self, enabled: bool) -> Self {
        self.qualify.use_database_name = enabled;
        self
    }

    pub fn schema_name(mut self, enabled: bool) -> Self {
        self.qualify.use_schema_name = enabled;
        self
    }

    pub fn omit_column_list(mut self, omit: bool) -> Self {
        self.omit_column_list = omit;
        self
    }
}
