//! Library catalog console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > RUST_LOG > env > config)
//!   4. Init logger once
//!   5. Build the catalog, seeding demo data if asked
//!   6. Spawn Ctrl-C → shutdown signal watcher
//!   7. Run the console until exit, EOF or shutdown

use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

use library_catalog::catalog::Catalog;
use library_catalog::console::Console;
use library_catalog::error::AppError;
use library_catalog::logger::LevelSource;
use library_catalog::{config, logger, seed};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let mut config = config::load(args.config_path.as_deref())?;
    if args.demo {
        config.catalog.seed_demo = true;
    }

    let (effective_log_level, level_source) = match args.log_level {
        Some(level) => (level, LevelSource::Flags),
        None => (config.log_level.as_str(), LevelSource::Config),
    };
    logger::init(effective_log_level, level_source)?;

    info!(
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        seed_demo = config.catalog.seed_demo,
        format = ?config.console.format,
        "config loaded"
    );

    let mut catalog = Catalog::new();
    if config.catalog.seed_demo {
        seed::load_demo(&mut catalog)?;
        info!(
            books = catalog.book_count(),
            members = catalog.member_count(),
            "demo data loaded"
        );
    }

    // Shared shutdown token: Ctrl-C cancels it, the console watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        catalog,
        config.console.clone(),
        shutdown,
    );
    console.run().await
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    demo: bool,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut demo = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: library-catalog [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("      --demo                 Load the demonstration books and members");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "--demo" => demo = true,
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    // Each -v raises verbosity one tier:
    //   -v      → warn
    //   -vv     → info   (session lifecycle, every mutation and rejection)
    //   -vvv    → debug  (menu choices)
    //   -vvvv+  → trace
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path, demo }
}
