use std::collections::HashMap;
use std::sync::RwLock;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::error::CatalogError;
use crate::error::Result;
use crate::manifest::SchemaManifest;
use crate::Catalog;
use crate::Namespace;
use crate::Statement;
use crate::TableInfo;

#[derive(Default)]
struct Schema {
    manifest: SchemaManifest,
    data: HashMap<String, Vec<RecordBatch>>,
    statements: Vec<Statement>,
}

/// In-process catalog, keeps everything it is given.
#[derive(Default)]
pub struct MemoryCatalog {
    schemas: RwLock<HashMap<Namespace, Schema>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest(&self, ns: &Namespace) -> Result<SchemaManifest> {
        let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
        schemas
            .get(ns)
            .map(|s| s.manifest.clone())
            .ok_or_else(|| CatalogError::SchemaNotFound(ns.to_string()))
    }

    pub fn batches(&self, ns: &Namespace, table: &str) -> Result<Vec<RecordBatch>> {
        let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
        let schema = schemas
            .get(ns)
            .ok_or_else(|| CatalogError::SchemaNotFound(ns.to_string()))?;
        schema
            .data
            .get(table)
            .cloned()
            .ok_or_else(|| CatalogError::TableNotFound(table.to_string()))
    }

    /// Statements executed since the schema was created.
    pub fn statements(&self, ns: &Namespace) -> Result<Vec<Statement>> {
        let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
        schemas
            .get(ns)
            .map(|s| s.statements.clone())
            .ok_or_else(|| CatalogError::SchemaNotFound(ns.to_string()))
    }
}

impl Catalog for MemoryCatalog {
    fn create_schema(&self, ns: &Namespace, replace: bool) -> Result<()> {
        let mut schemas = self.schemas.write().unwrap_or_else(|e| e.into_inner());
        if replace {
            schemas.remove(ns);
        }
        schemas.entry(ns.clone()).or_default();

        Ok(())
    }

    fn write_table(
        &self,
        ns: &Namespace,
        name: &str,
        schema: SchemaRef,
        batches: &[RecordBatch],
    ) -> Result<TableInfo> {
        let mut schemas = self.schemas.write().unwrap_or_else(|e| e.into_inner());
        let target = schemas
            .get_mut(ns)
            .ok_or_else(|| CatalogError::SchemaNotFound(ns.to_string()))?;

        let rows = batches.iter().map(|b| b.num_rows()).sum();
        let bytes = batches
            .iter()
            .map(|b| b.get_array_memory_size() as u64)
            .sum();
        target.manifest.register_table(name, schema.as_ref(), rows);
        target.data.insert(name.to_string(), batches.to_vec());

        Ok(TableInfo {
            name: name.to_string(),
            rows,
            bytes,
        })
    }

    fn execute(&self, ns: &Namespace, stmt: &Statement) -> Result<()> {
        let mut schemas = self.schemas.write().unwrap_or_else(|e| e.into_inner());
        let target = schemas
            .get_mut(ns)
            .ok_or_else(|| CatalogError::SchemaNotFound(ns.to_string()))?;
        target.manifest.apply(stmt)?;
        target.statements.push(stmt.clone());

        Ok(())
    }
}
