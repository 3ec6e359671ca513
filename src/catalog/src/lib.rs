use std::fmt;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

pub mod ddl;
pub mod error;
pub mod local;
pub mod manifest;
pub mod mask;
pub mod memory;

pub use ddl::Statement;
pub use error::CatalogError;
pub use error::Result;
pub use local::LocalCatalog;
pub use mask::ColumnMask;
pub use memory::MemoryCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    pub catalog: String,
    pub schema: String,
}

impl Namespace {
    pub fn new(catalog: &str, schema: &str) -> Self {
        Namespace {
            catalog: catalog.to_string(),
            schema: schema.to_string(),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.catalog, self.schema)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub rows: usize,
    pub bytes: u64,
}

/// Warehouse the generated tables are materialized into.
pub trait Catalog: Send + Sync {
    /// Creates the schema if it is missing. With `replace` an existing schema is dropped
    /// together with everything in it first.
    fn create_schema(&self, ns: &Namespace, replace: bool) -> Result<()>;
    /// Writes the table, overwriting data and schema of a table with the same name.
    fn write_table(
        &self,
        ns: &Namespace,
        name: &str,
        schema: SchemaRef,
        batches: &[RecordBatch],
    ) -> Result<TableInfo>;
    fn execute(&self, ns: &Namespace, stmt: &Statement) -> Result<()>;
}
