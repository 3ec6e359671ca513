use std::path::PathBuf;

use clap::ValueEnum;
use common::config::GoldAggregation;
use common::config::OutputFormat;
use common::config::SchemaMode;
use serde_derive::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::error::Error;

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Target {
    pub catalog: String,
    pub new_schema: String,
    pub existing_schema: String,
    pub schema_mode: SchemaMode,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Output {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub batch_size: usize,
    pub create_catalog: bool,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Generator {
    pub users: usize,
    pub products: usize,
    pub transactions: usize,
    pub feedbacks: usize,
    /// Defaults to the number of cpus.
    pub partitions: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Gold {
    pub aggregation: GoldAggregation,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Masking {
    pub privileged_group: String,
    pub masked_email: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Log {
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub target: Target,
    pub output: Output,
    pub generator: Generator,
    pub gold: Gold,
    pub masking: Masking,
    pub log: Log,
}

impl TryInto<common::config::Config> for Config {
    type Error = crate::error::Error;

    fn try_into(self) -> Result<common::config::Config, Self::Error> {
        if self.output.batch_size == 0 {
            return Err(Error::BadRequest(
                "output.batch_size must be greater than 0".to_string(),
            ));
        }
        let partitions = match self.generator.partitions {
            None | Some(0) => num_cpus::get(),
            Some(n) => n,
        };

        Ok(common::config::Config {
            target: common::config::Target {
                catalog: self.target.catalog,
                new_schema: self.target.new_schema,
                existing_schema: self.target.existing_schema,
                schema_mode: self.target.schema_mode,
            },
            output: common::config::Output {
                path: self.output.path,
                format: self.output.format,
                batch_size: self.output.batch_size,
                create_catalog: self.output.create_catalog,
            },
            generator: common::config::Generator {
                users: self.generator.users,
                products: self.generator.products,
                transactions: self.generator.transactions,
                feedbacks: self.generator.feedbacks,
                partitions,
                seed: self.generator.seed,
            },
            gold: common::config::Gold {
                aggregation: self.gold.aggregation,
            },
            masking: common::config::Masking {
                privileged_group: self.masking.privileged_group,
                masked_email: self.masking.masked_email,
            },
            log: common::config::Log {
                level: self.log.level.into(),
            },
        })
    }
}

#[derive(Deserialize, Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}
