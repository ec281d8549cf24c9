//! relex CLI
//!
//! Compiles Relex queries into parameterized SQL.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relex_cli::{config, output, DialectKind};
use relex_core::builder::SqlCommand;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Compile Relex queries into parameterized SQL.
#[derive(Parser)]
#[command(name = "relex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target SQL dialect.
    #[arg(short, long, value_enum, env = "RELEX_DIALECT", default_value_t = DialectKind::Generic)]
    dialect: DialectKind,

    /// JSON file of view definitions.
    #[arg(long, env = "RELEX_VIEWS")]
    views: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query into a SELECT statement.
    Compile {
        /// Relex query text.
        query: String,

        /// Build a count(*) statement instead.
        #[arg(short, long)]
        count: bool,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Variable binding, `name=value` or `name:Type=value`.
        #[arg(long = "var", value_name = "BINDING")]
        vars: Vec<String>,
    },

    /// Compile a query into a DELETE statement.
    Delete {
        /// Relex query text.
        query: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Variable binding, `name=value` or `name:Type=value`.
        #[arg(long = "var", value_name = "BINDING")]
        vars: Vec<String>,
    },

    /// Parse a query and print it in canonical form.
    Format {
        /// Relex query text.
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let views = match &cli.views {
        Some(path) => config::load_views(path)?,
        None => Vec::new(),
    };
    debug!(dialect = ?cli.dialect, views = views.len(), "starting");
    let builder = cli.dialect.builder(views);

    match cli.command {
        Commands::Compile {
            query,
            count,
            json,
            vars,
        } => {
            let command = relex_cli::compile_select(&builder, &query, &vars, count)?;
            print_command(&command, json)?;
        }
        Commands::Delete { query, json, vars } => {
            let command = relex_cli::compile_delete(&builder, &query, &vars)?;
            print_command(&command, json)?;
        }
        Commands::Format { query } => {
            println!("{}", relex_cli::format_query(&query)?);
        }
    }

    Ok(())
}

fn print_command(command: &SqlCommand, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", output::to_json(command)?);
    } else {
        println!("{}", output::to_text(command));
    }
    Ok(())
}
