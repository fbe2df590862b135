use std::time::Instant;

use clap::{Parser, Subcommand};
use ghrelease_cli::commands;
use ghrelease_core::config::DEFAULT_BASE_URL;
use ghrelease_core::error::render_chain;
use ghrelease_core::GithubConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghrelease", version, about = "Publish workspace files as GitHub release assets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload matching workspace files to the release from the workflow event.
    Publish {
        /// File globs to include (repeatable, comma-separated).
        #[arg(short = 'i', long = "include", value_delimiter = ',')]
        include: Vec<String>,
        /// File globs to exclude (repeatable, comma-separated).
        #[arg(short = 'x', long = "exclude", value_delimiter = ',')]
        exclude: Vec<String>,
        /// Asset upload endpoint.
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();
    let result = run_cli(cli);
    eprintln!("Executed command in {:?}", start.elapsed());

    if let Err(message) = result {
        exit_with_error(&message);
    }
}

fn run_cli(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Publish {
            include,
            exclude,
            base_url,
        } => {
            let config = GithubConfig::from_env().map_err(|err| render_chain(&err))?;
            let outcome = commands::publish::run(commands::publish::PublishArgs {
                config,
                base_url,
                includes: include,
                excludes: exclude,
            })
            .map_err(|err| render_chain(&err))?;
            for name in outcome.uploaded {
                println!("uploaded: {}", name);
            }
            Ok(())
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
