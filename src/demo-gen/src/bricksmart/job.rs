//! End-to-end run: validate the target, reset the schema, generate, write and annotate.

use std::time::Duration;
use std::time::Instant;

use bytesize::ByteSize;
use catalog::Catalog;
use catalog::Namespace;
use catalog::Statement;
use catalog::TableInfo;
use common::config::Config;
use common::config::SchemaMode;
use common::types::*;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;
use tracing::info;

use crate::bricksmart::annotations;
use crate::bricksmart::batch_builder::build_batches;
use crate::bricksmart::batch_builder::FeedbacksBuilder;
use crate::bricksmart::batch_builder::GoldUserBuilder;
use crate::bricksmart::batch_builder::ProductsBuilder;
use crate::bricksmart::batch_builder::RowBuilder;
use crate::bricksmart::batch_builder::TransactionsBuilder;
use crate::bricksmart::batch_builder::UsersBuilder;
use crate::bricksmart::feedbacks::generate_feedbacks;
use crate::bricksmart::gold::build_gold_users;
use crate::bricksmart::partition::Progress;
use crate::bricksmart::products::generate_products;
use crate::bricksmart::rules::RuleTable;
use crate::bricksmart::transactions::generate_transactions;
use crate::bricksmart::users::generate_users;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Report {
    pub namespace: Namespace,
    pub tables: Vec<TableInfo>,
    pub statements: usize,
    pub elapsed: Duration,
}

impl Report {
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    pub fn bytes(&self) -> u64 {
        self.tables.iter().map(|t| t.bytes).sum()
    }
}

/// Runs the job with a random source seeded from the configured seed, or from entropy.
pub fn run<C: Catalog + ?Sized>(
    catalog: &C,
    cfg: &Config,
    progress: Option<&Progress>,
) -> Result<Report> {
    let mut rng = match cfg.generator.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    run_with_rng(catalog, cfg, &mut rng, progress)
}

pub fn run_with_rng<C: Catalog + ?Sized, R: Rng>(
    catalog: &C,
    cfg: &Config,
    rng: &mut R,
    progress: Option<&Progress>,
) -> Result<Report> {
    cfg.target.validate()?;
    let start = Instant::now();
    let ns = Namespace::new(&cfg.target.catalog, cfg.target.schema());
    let gen = &cfg.generator;
    let batch_size = cfg.output.batch_size;

    let replace = cfg.target.schema_mode == SchemaMode::New;
    info!("preparing schema {ns} ({} mode)", cfg.target.schema_mode);
    catalog.create_schema(&ns, replace)?;

    info!("generating {} users and {} products...", gen.users, gen.products);
    let users = generate_users(rng, gen.users);
    let products = generate_products(rng, gen.products)?;
    let rules = RuleTable::default();
    debug!("rule table: {} rules", rules.len());

    info!("generating {} transactions...", gen.transactions);
    let transactions = generate_transactions(
        rng,
        &users,
        &products,
        &rules,
        gen.transactions,
        gen.partitions,
        progress,
    )?;
    info!("generating {} feedbacks...", gen.feedbacks);
    let feedbacks = generate_feedbacks(
        rng,
        &users,
        &products,
        &rules,
        gen.feedbacks,
        gen.partitions,
        progress,
    )?;

    info!("writing tables...");
    let mut tables = vec![
        write::<UsersBuilder, _>(catalog, &ns, TABLE_USERS, &users, batch_size)?,
        write::<TransactionsBuilder, _>(
            catalog,
            &ns,
            TABLE_TRANSACTIONS,
            &transactions,
            batch_size,
        )?,
        write::<ProductsBuilder, _>(catalog, &ns, TABLE_PRODUCTS, &products, batch_size)?,
        write::<FeedbacksBuilder, _>(catalog, &ns, TABLE_FEEDBACKS, &feedbacks, batch_size)?,
    ];
    let mut statements = execute(catalog, &ns, &annotations::base_comments())?;

    info!("building {TABLE_GOLD_USER} ({} aggregation)...", cfg.gold.aggregation);
    let gold = build_gold_users(
        &users,
        &products,
        &transactions,
        &feedbacks,
        cfg.gold.aggregation,
    );
    tables.push(write::<GoldUserBuilder, _>(
        catalog,
        &ns,
        TABLE_GOLD_USER,
        &gold,
        batch_size,
    )?);
    statements += execute(catalog, &ns, &annotations::gold_comments())?;

    info!("applying tags, constraints and masks...");
    statements += execute(catalog, &ns, &annotations::pii_tags())?;
    statements += execute(catalog, &ns, &annotations::primary_keys())?;
    statements += execute(catalog, &ns, &annotations::foreign_keys())?;
    statements += execute(catalog, &ns, &annotations::masking(&cfg.masking))?;

    let report = Report {
        namespace: ns,
        tables,
        statements,
        elapsed: start.elapsed(),
    };
    info!(
        "{} rows in {} tables written to {} ({}) in {}",
        report.rows(),
        report.tables.len(),
        report.namespace,
        ByteSize::b(report.bytes()),
        humantime::format_duration(report.elapsed)
    );

    Ok(report)
}

fn write<B: RowBuilder, C: Catalog + ?Sized>(
    catalog: &C,
    ns: &Namespace,
    name: &str,
    rows: &[B::Row],
    batch_size: usize,
) -> Result<TableInfo> {
    let batches = build_batches::<B>(rows, batch_size)?;
    let schema = B::new(0).schema();
    let info = catalog.write_table(ns, name, schema, &batches)?;
    debug!(
        "{name}: {} rows in {} batches, {}",
        info.rows,
        batches.len(),
        ByteSize::b(info.bytes)
    );

    Ok(info)
}

fn execute<C: Catalog + ?Sized>(catalog: &C, ns: &Namespace, stmts: &[Statement]) -> Result<usize> {
    for stmt in stmts {
        debug!("{stmt}");
        catalog.execute(ns, stmt)?;
    }

    Ok(stmts.len())
}
