use clap::Parser;
use clap::Subcommand;
use cmd::command::generate;
use cmd::command::generate::Generate;
use cmd::command::rules;
use cmd::command::rules::Rules;
use cmd::error::Error;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

#[derive(Subcommand, Clone)]
enum Commands {
    /// Generate the demo dataset and materialize it in the local warehouse
    Generate(Generate),
    /// Print the behavioral rule table
    Rules(Rules),
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(level: LevelFilter) -> cmd::error::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).map_err(Error::SetGlobalDefaultError)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match &args.command {
        Commands::Generate(args) => {
            let cfg = generate::load_config(args)?;
            init_tracing(cfg.log.level)?;

            let version = env!("CARGO_PKG_VERSION");
            let hash = option_env!("BUILD_HASH").unwrap_or("dev-build");
            info!("bricksmart v{version}-{hash}");

            generate::run(&cfg)?;
        }
        Commands::Rules(args) => {
            init_tracing(LevelFilter::INFO)?;
            rules::run(args)?;
        }
    }

    Ok(())
}
