//! dsq: Device Search Query - CLI for assembling device filter expressions.

use clap::{Parser, Subcommand};

mod commands;

use commands::CatalogArgs;

#[derive(Parser)]
#[command(name = "dsq")]
#[command(about = "Device Search Query - assemble device filter expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the devsearch root directory
    Init {
        /// Overwrite an existing config.toml
        #[arg(long)]
        force: bool,
    },

    /// List the attribute catalog
    #[command(visible_alias = "a")]
    Attributes {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Only attributes whose title matches this glob (case-insensitive)
        #[arg(short = 'f', long = "filter")]
        filter: Option<String>,

        /// Output format: table or json
        #[arg(long = "format", default_value = "table")]
        format: String,
    },

    /// List the operators or choices offered for an attribute
    Actions {
        /// Attribute name, as written between the brackets
        attribute: String,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Replay builder steps and print the resulting value as JSON
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Initial query text
        #[arg(short = 'q', long = "query", default_value = "")]
        query: String,

        /// Steps: attr=NAME, op=CODE, choice=LABEL, caret=N, select=A:B,
        /// type=TEXT, not, and, or, clear, driver=NAME|any
        #[arg(required = true)]
        steps: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DSQ_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { force } => commands::init(force),
        Commands::Attributes { catalog, filter, format } => {
            commands::attributes(&catalog, filter.as_deref(), &format)
        }
        Commands::Actions { attribute, catalog } => commands::actions(&attribute, &catalog),
        Commands::Build { catalog, query, steps } => commands::build(&catalog, &query, &steps),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
