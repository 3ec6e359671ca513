use std::fmt::Write;
use std::path::PathBuf;

use catalog::local::Options;
use catalog::LocalCatalog;
use clap::Parser;
use clap::ValueEnum;
use common::config::GoldAggregation;
use common::config::OutputFormat;
use common::config::SchemaMode;
use common::config::DEFAULT_BATCH_SIZE;
use common::config::DEFAULT_FEEDBACKS;
use common::config::DEFAULT_MASKED_EMAIL;
use common::config::DEFAULT_PRIVILEGED_GROUP;
use common::config::DEFAULT_PRODUCTS;
use common::config::DEFAULT_SCHEMA;
use common::config::DEFAULT_TRANSACTIONS;
use common::config::DEFAULT_USERS;
use demo_gen::bricksmart::partition::Progress;
use demo_gen::bricksmart::Report;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use tracing::debug;
use tracing::info;

use crate::config::Config;
use crate::config::LogLevel;
use crate::error::Result;

#[derive(Parser, Clone, Debug, Default)]
pub struct Generate {
    /// TOML file with the job configuration. Flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Catalog the schema lives in
    #[arg(long)]
    pub catalog: Option<String>,
    #[arg(long)]
    pub new_schema: Option<String>,
    #[arg(long)]
    pub existing_schema: Option<String>,
    /// new|existing
    #[arg(long)]
    pub schema_mode: Option<SchemaMode>,
    /// Root directory of the local warehouse
    #[arg(long)]
    pub out_path: Option<PathBuf>,
    /// parquet|csv
    #[arg(long)]
    pub format: Option<OutputFormat>,
    #[arg(long)]
    pub users: Option<usize>,
    #[arg(long)]
    pub products: Option<usize>,
    #[arg(long)]
    pub transactions: Option<usize>,
    #[arg(long)]
    pub feedbacks: Option<usize>,
    /// Seed of the random source, unseeded runs differ every time
    #[arg(long)]
    pub seed: Option<u64>,
    /// Generator threads, defaults to the number of cpus
    #[arg(long)]
    pub partitions: Option<usize>,
    /// joined|per_category
    #[arg(long)]
    pub gold_aggregation: Option<GoldAggregation>,
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

fn count(v: Option<usize>) -> Option<i64> {
    v.map(|v| v as i64)
}

/// Layers defaults, the optional config file and the command line flags.
pub fn load_config(args: &Generate) -> Result<common::config::Config> {
    let mut builder = config::Config::builder()
        .set_default("target.catalog", "")?
        .set_default("target.new_schema", DEFAULT_SCHEMA)?
        .set_default("target.existing_schema", DEFAULT_SCHEMA)?
        .set_default("target.schema_mode", SchemaMode::New.to_string())?
        .set_default("output.path", "warehouse")?
        .set_default("output.format", OutputFormat::Parquet.to_string())?
        .set_default("output.batch_size", DEFAULT_BATCH_SIZE as i64)?
        .set_default("output.create_catalog", true)?
        .set_default("generator.users", DEFAULT_USERS as i64)?
        .set_default("generator.products", DEFAULT_PRODUCTS as i64)?
        .set_default("generator.transactions", DEFAULT_TRANSACTIONS as i64)?
        .set_default("generator.feedbacks", DEFAULT_FEEDBACKS as i64)?
        .set_default("gold.aggregation", GoldAggregation::Joined.to_string())?
        .set_default("masking.privileged_group", DEFAULT_PRIVILEGED_GROUP)?
        .set_default("masking.masked_email", DEFAULT_MASKED_EMAIL)?
        .set_default("log.level", "info")?;

    if let Some(path) = &args.config {
        builder = builder.add_source(config::File::from(path.clone()));
    }

    let config = builder
        .set_override_option("target.catalog", args.catalog.clone())?
        .set_override_option("target.new_schema", args.new_schema.clone())?
        .set_override_option("target.existing_schema", args.existing_schema.clone())?
        .set_override_option(
            "target.schema_mode",
            args.schema_mode.map(|v| v.to_string()),
        )?
        .set_override_option(
            "output.path",
            args.out_path
                .as_ref()
                .map(|v| v.to_string_lossy().to_string()),
        )?
        .set_override_option("output.format", args.format.map(|v| v.to_string()))?
        .set_override_option("generator.users", count(args.users))?
        .set_override_option("generator.products", count(args.products))?
        .set_override_option("generator.transactions", count(args.transactions))?
        .set_override_option("generator.feedbacks", count(args.feedbacks))?
        .set_override_option("generator.partitions", count(args.partitions))?
        .set_override_option("generator.seed", args.seed)?
        .set_override_option(
            "gold.aggregation",
            args.gold_aggregation.map(|v| v.to_string()),
        )?
        .set_override_option(
            "log.level",
            args.log_level
                .and_then(|v| v.to_possible_value())
                .map(|v| v.get_name().to_string()),
        )?
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    cfg.try_into()
}

pub fn run(cfg: &common::config::Config) -> Result<Report> {
    cfg.target.validate()?;
    debug!("out path: {:?} ({})", cfg.output.path, cfg.output.format);
    debug!(
        "users: {}, products: {}, transactions: {}, feedbacks: {}",
        cfg.generator.users,
        cfg.generator.products,
        cfg.generator.transactions,
        cfg.generator.feedbacks
    );
    debug!("partitions: {}", cfg.generator.partitions);
    match cfg.generator.seed {
        Some(seed) => debug!("seed: {seed}"),
        None => debug!("unseeded"),
    }

    let catalog = LocalCatalog::new(&cfg.output.path, Options {
        format: cfg.output.format,
        create_catalog: cfg.output.create_catalog,
    });

    let pb = ProgressBar::new((cfg.generator.transactions + cfg.generator.feedbacks) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} rows ({eta})",
        )?
        .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("#>-"),
    );
    let pb_cloned = pb.clone();
    let progress: Box<Progress> = Box::new(move |n: usize| pb_cloned.inc(n as u64));

    let report = demo_gen::bricksmart::run(&catalog, cfg, Some(progress.as_ref()));
    pb.finish_and_clear();
    let report = report?;

    for table in &report.tables {
        info!(
            "{}.{}: {} rows, {}",
            report.namespace,
            table.name,
            table.rows,
            bytesize::ByteSize::b(table.bytes)
        );
    }
    info!(
        "{} statements applied, done in {}",
        report.statements,
        humantime::format_duration(report.elapsed)
    );

    Ok(report)
}
