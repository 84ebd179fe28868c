mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogkit")]
#[command(version, about = "Static site generator for a personal blog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site directory
    Init {
        /// Path to the site directory (created if missing)
        path: PathBuf,

        /// Site title written to site.toml
        #[arg(long)]
        title: Option<String>,

        /// Site URL written to site.toml
        #[arg(long)]
        url: Option<String>,
    },

    /// Validate site configuration and posts
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on (the next free port is used if taken)
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Build the static site
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,
    },

    /// List posts matching a search query, as the blog search box would
    Search {
        /// Path to site directory
        path: PathBuf,

        /// Case-insensitive text to look for in titles and excerpts
        #[arg(default_value = "")]
        query: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blogkit=info,warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Init { path, title, url } => commands::init::run(path, title, url).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Search { path, query } => commands::search::run(path, query).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "blogkit", &mut io::stdout());
            Ok(())
        }
    }
}
