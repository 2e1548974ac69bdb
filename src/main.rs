use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use importjs::{ConfigError, ConfigResolver};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Resolve ImportJS configuration for a file
///
/// Merges `.importjs.json` files from the file's directory up to the
/// workspace root, falling back to built-in defaults per key.
#[derive(Parser, Debug)]
#[command(name = "importjs")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Workspace root directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effective value of one key as JSON
    Get {
        key: String,

        /// File being edited
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print every recognized key with its effective value
    Show {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List the configuration levels consulted, most specific first
    Levels {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List runtime and peer dependencies from package.json
    Deps,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn workspace_root(provided: Option<PathBuf>) -> Result<PathBuf> {
    match provided {
        Some(path) if path.is_dir() => Ok(path.canonicalize()?),
        Some(path) => Err(ConfigError::InvalidPath(path).into()),
        None => Ok(std::env::current_dir()?),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    let root = workspace_root(args.workspace)?;
    debug!("Workspace root: {}", root.display());

    match args.command {
        Command::Get { key, file } => {
            let resolver = ConfigResolver::with_root(&root, file.unwrap_or_default());
            match resolver.get(&key) {
                Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
                None => bail!("Configuration key '{}' is not defined", key),
            }
        }
        Command::Show { file } => {
            let resolver = ConfigResolver::with_root(&root, file.unwrap_or_default());
            println!("{}", serde_json::to_string_pretty(&resolver.effective())?);
        }
        Command::Levels { file } => {
            let resolver = ConfigResolver::with_root(&root, file.unwrap_or_default());
            for level in resolver.levels() {
                match level.document.applies_to() {
                    Some(pattern) => println!("{} (applies_to: {})", level.source, pattern),
                    None => println!("{}", level.source),
                }
            }
        }
        Command::Deps => {
            let resolver = ConfigResolver::with_root(&root, "");
            for name in resolver.package_dependencies() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
