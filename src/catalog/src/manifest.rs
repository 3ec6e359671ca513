use std::collections::BTreeMap;

use arrow::datatypes::Schema;
use serde::Deserialize;
use serde::Serialize;

use crate::ddl::ForeignKey;
use crate::ddl::Statement;
use crate::error::CatalogError;
use crate::error::Result;
use crate::mask::ColumnMask;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub comment: Option<String>,
    pub tags: Vec<String>,
    pub mask: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub comment: Option<String>,
    pub rows: usize,
    pub primary_key: Option<PrimaryKey>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        let table = self.name.clone();
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| CatalogError::ColumnNotFound {
                table,
                column: name.to_string(),
            })
    }

    fn check_columns(&self, columns: &[String]) -> Result<()> {
        for col in columns {
            if self.column(col).is_none() {
                return Err(CatalogError::ColumnNotFound {
                    table: self.name.clone(),
                    column: col.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Everything the catalog knows about one schema: tables with their annotations and the
/// functions defined in it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaManifest {
    pub tables: BTreeMap<String, Table>,
    pub functions: BTreeMap<String, ColumnMask>,
}

impl SchemaManifest {
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| CatalogError::TableNotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| CatalogError::TableNotFound(name.to_string()))
    }

    /// Registers a freshly written table. An existing table with the same name is replaced
    /// together with its annotations and constraints.
    pub fn register_table(&mut self, name: &str, schema: &Schema, rows: usize) {
        let columns = schema
            .fields()
            .iter()
            .map(|f| Column {
                name: f.name().to_owned(),
                data_type: f.data_type().to_string(),
                nullable: f.is_nullable(),
                comment: None,
                tags: vec![],
                mask: None,
            })
            .collect();

        self.tables.insert(name.to_string(), Table {
            name: name.to_string(),
            columns,
            comment: None,
            rows,
            primary_key: None,
            foreign_keys: vec![],
        });
    }

    fn constraint_exists(&self, name: &str) -> bool {
        self.tables.values().any(|t| {
            t.primary_key.as_ref().map(|pk| pk.name == name).unwrap_or(false)
                || t.foreign_keys.iter().any(|fk| fk.name == name)
        })
    }

    pub fn apply(&mut self, stmt: &Statement) -> Result<()> {
        match stmt {
            Statement::CommentOnColumn {
                table,
                column,
                comment,
            } => {
                self.table_mut(table)?.column_mut(column)?.comment = Some(comment.clone());
            }
            Statement::CommentOnTable { table, comment } => {
                self.table_mut(table)?.comment = Some(comment.clone());
            }
            Statement::SetColumnTags {
                table,
                column,
                tags,
            } => {
                let col = self.table_mut(table)?.column_mut(column)?;
                for tag in tags {
                    if !col.tags.contains(tag) {
                        col.tags.push(tag.clone());
                    }
                }
            }
            Statement::SetNotNull { table, column } => {
                self.table_mut(table)?.column_mut(column)?.nullable = false;
            }
            Statement::AddPrimaryKey {
                table,
                name,
                columns,
            } => {
                if self.constraint_exists(name) {
                    return Err(CatalogError::ConstraintAlreadyExists(name.clone()));
                }
                let tbl = self.table_mut(table)?;
                tbl.check_columns(columns)?;
                if tbl.primary_key.is_some() {
                    return Err(CatalogError::InvalidConstraint(
                        name.clone(),
                        format!("table {table} already has a primary key"),
                    ));
                }
                if let Some(col) = tbl
                    .columns
                    .iter()
                    .find(|c| columns.contains(&c.name) && c.nullable)
                {
                    return Err(CatalogError::InvalidConstraint(
                        name.clone(),
                        format!("column {} is nullable", col.name),
                    ));
                }
                tbl.primary_key = Some(PrimaryKey {
                    name: name.clone(),
                    columns: columns.clone(),
                });
            }
            Statement::AddForeignKey(fk) => {
                if self.constraint_exists(&fk.name) {
                    return Err(CatalogError::ConstraintAlreadyExists(fk.name.clone()));
                }
                if fk.columns.len() != fk.ref_columns.len() {
                    return Err(CatalogError::InvalidConstraint(
                        fk.name.clone(),
                        "column count differs from the referenced column count".to_string(),
                    ));
                }
                let ref_table = self.table(&fk.ref_table)?;
                ref_table.check_columns(&fk.ref_columns)?;
                match &ref_table.primary_key {
                    Some(pk) if pk.columns == fk.ref_columns => {}
                    _ => {
                        return Err(CatalogError::InvalidConstraint(
                            fk.name.clone(),
                            format!("{} is not the primary key of {}", fk.ref_columns.join(", "), fk.ref_table),
                        ));
                    }
                }
                let tbl = self.table_mut(&fk.table)?;
                tbl.check_columns(&fk.columns)?;
                tbl.foreign_keys.push(fk.clone());
            }
            Statement::CreateFunction(mask) => {
                self.functions.insert(mask.name.clone(), mask.clone());
            }
            Statement::SetColumnMask {
                table,
                column,
                function,
            } => {
                if !self.functions.contains_key(function) {
                    return Err(CatalogError::FunctionNotFound(function.clone()));
                }
                self.table_mut(table)?.column_mut(column)?.mask = Some(function.clone());
            }
        }

        Ok(())
    }
}
