use std::path::PathBuf;

use serde::Deserialize;
use strum_macros::Display;
use strum_macros::EnumString;
use tracing::level_filters::LevelFilter;

use crate::error::CommonError;
use crate::error::Result;

pub const DEFAULT_SCHEMA: &str = "bricksmart";
pub const DEFAULT_USERS: usize = 10_000;
pub const DEFAULT_PRODUCTS: usize = 100;
pub const DEFAULT_TRANSACTIONS: usize = 1_000_000;
pub const DEFAULT_FEEDBACKS: usize = 50_000;
pub const DEFAULT_BATCH_SIZE: usize = 4096;
pub const DEFAULT_PRIVILEGED_GROUP: &str = "admins";
pub const DEFAULT_MASKED_EMAIL: &str = "***@example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SchemaMode {
    /// Drop the new schema with everything in it and create it again.
    New,
    /// Write into the existing schema.
    Existing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    Parquet,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GoldAggregation {
    /// Aggregate over users x transactions x feedbacks, exactly as one SQL join would.
    Joined,
    /// Quantities by transaction category, ratings by feedback category.
    PerCategory,
}

/// Plain identifier: `[A-Za-z0-9_-]+`.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn check_name(kind: &'static str, name: &str) -> Result<()> {
    if !is_identifier(name) {
        return Err(CommonError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct Target {
    pub catalog: String,
    pub new_schema: String,
    pub existing_schema: String,
    pub schema_mode: SchemaMode,
}

impl Target {
    pub fn validate(&self) -> Result<()> {
        if self.catalog.trim().is_empty() {
            return Err(CommonError::EmptyCatalog);
        }
        if self.new_schema.trim().is_empty() {
            return Err(CommonError::EmptyNewSchema);
        }
        if self.schema_mode == SchemaMode::Existing && self.existing_schema.trim().is_empty() {
            return Err(CommonError::EmptyExistingSchema);
        }

        check_name("catalog", &self.catalog)?;
        check_name("schema", &self.new_schema)?;
        if self.schema_mode == SchemaMode::Existing {
            check_name("schema", &self.existing_schema)?;
        }

        Ok(())
    }

    /// Schema the job writes into.
    pub fn schema(&self) -> &str {
        match self.schema_mode {
            SchemaMode::New => self.new_schema.as_str(),
            SchemaMode::Existing => self.existing_schema.as_str(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Output {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub batch_size: usize,
    pub create_catalog: bool,
}

#[derive(Debug, Clone)]
pub struct Generator {
    pub users: usize,
    pub products: usize,
    pub transactions: usize,
    pub feedbacks: usize,
    pub partitions: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Gold {
    pub aggregation: GoldAggregation,
}

#[derive(Debug, Clone)]
pub struct Masking {
    pub privileged_group: String,
    pub masked_email: String,
}

#[derive(Debug, Clone)]
pub struct Log {
    pub level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: Target,
    pub output: Output,
    pub generator: Generator,
    pub gold: Gold,
    pub masking: Masking,
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target: Target {
                catalog: "".to_string(),
                new_schema: DEFAULT_SCHEMA.to_string(),
                existing_schema: DEFAULT_SCHEMA.to_string(),
                schema_mode: SchemaMode::New,
            },
            output: Output {
                path: PathBuf::from("warehouse"),
                format: OutputFormat::Parquet,
                batch_size: DEFAULT_BATCH_SIZE,
                create_catalog: true,
            },
            generator: Generator {
                users: DEFAULT_USERS,
                products: DEFAULT_PRODUCTS,
                transactions: DEFAULT_TRANSACTIONS,
                feedbacks: DEFAULT_FEEDBACKS,
                partitions: 1,
                seed: None,
            },
            gold: Gold {
                aggregation: GoldAggregation::Joined,
            },
            masking: Masking {
                privileged_group: DEFAULT_PRIVILEGED_GROUP.to_string(),
                masked_email: DEFAULT_MASKED_EMAIL.to_string(),
            },
            log: Log {
                level: LevelFilter::INFO,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(catalog: &str, new_schema: &str) -> Target {
        Target {
            catalog: catalog.to_string(),
            new_schema: new_schema.to_string(),
            existing_schema: DEFAULT_SCHEMA.to_string(),
            schema_mode: SchemaMode::New,
        }
    }

    #[test]
    fn test_validate() {
        assert!(target("main", "bricksmart").validate().is_ok());
        assert!(matches!(
            target("", "bricksmart").validate(),
            Err(CommonError::EmptyCatalog)
        ));
        assert!(matches!(target("", "").validate(), Err(CommonError::EmptyCatalog)));
        assert!(matches!(
            target("main", " ").validate(),
            Err(CommonError::EmptyNewSchema)
        ));

        let mut t = target("main", "bricksmart");
        t.schema_mode = SchemaMode::Existing;
        t.existing_schema = "".to_string();
        assert!(matches!(t.validate(), Err(CommonError::EmptyExistingSchema)));
    }

    #[test]
    fn test_names_are_identifiers() {
        assert!(target("main", "bricksmart_v2").validate().is_ok());
        assert!(target("hive-metastore", "demo-1").validate().is_ok());
        for bad in ["/home", "../../x", "a/b", "a b", ".", "..", "c:\\x"] {
            assert!(
                matches!(
                    target(bad, "bricksmart").validate(),
                    Err(CommonError::InvalidName { kind: "catalog", .. })
                ),
                "{bad}"
            );
            assert!(
                matches!(
                    target("main", bad).validate(),
                    Err(CommonError::InvalidName { kind: "schema", .. })
                ),
                "{bad}"
            );
        }

        let mut t = target("main", "bricksmart");
        t.existing_schema = "../x".to_string();
        // only checked when it is the schema being written
        assert!(t.validate().is_ok());
        t.schema_mode = SchemaMode::Existing;
        assert!(matches!(
            t.validate(),
            Err(CommonError::InvalidName { kind: "schema", .. })
        ));
    }

    #[test]
    fn test_schema_by_mode() {
        let mut t = target("main", "fresh");
        t.existing_schema = "old".to_string();
        assert_eq!(t.schema(), "fresh");
        t.schema_mode = SchemaMode::Existing;
        assert_eq!(t.schema(), "old");
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(GoldAggregation::PerCategory.to_string(), "per_category");
        assert_eq!("existing".parse::<SchemaMode>().unwrap(), SchemaMode::Existing);
        assert_eq!(OutputFormat::Csv.extension(), "csv");
    }
}
