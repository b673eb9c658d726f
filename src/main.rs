use clap::Parser;
use rugoblog::build::{build_site, Result};
use rugoblog::config::Config;
use rugoblog::theme::Theme;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Builds a static blog from a directory of `YYYY-MM-DD-<slug>.md` posts.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Project file to load instead of `rugoblog.yaml` in the working
    /// directory.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the post source files.
    #[arg(long, value_name = "DIR")]
    posts: Option<PathBuf>,

    /// Directory to write the site to.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Log more (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(match (cli.quiet, cli.verbose) {
            (true, _) => Level::ERROR,
            (false, 0) => Level::WARN,
            (false, 1) => Level::INFO,
            (false, 2) => Level::DEBUG,
            (false, _) => Level::TRACE,
        })
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok((count, output_directory)) => {
            let output_directory = output_directory.display();
            println!("Built {} posts → {}/", count, output_directory);
        }
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<(usize, PathBuf)> {
    let mut config = match &cli.config {
        Some(path) => Config::from_project_file(path)?,
        None => Config::from_directory(Path::new("."))?,
    };
    if let Some(posts) = cli.posts {
        config.posts_directory = posts;
    }
    if let Some(out) = cli.out {
        config.output_directory = out;
    }

    let theme = Theme::load(&config.theme)?;
    let count = build_site(&config, &theme)?;
    Ok((count, config.output_directory))
}
