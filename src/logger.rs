//! Logging for the catalog console.
//!
//! Events go to stderr; stdout belongs to the menu. The level comes either
//! from `-v` flags or from config (`[app] log_level` / `CATALOG_LOG_LEVEL`),
//! and the two are treated differently with respect to `RUST_LOG`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Where the effective log level was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    /// `-v` tiers on the command line. Overrides `RUST_LOG`.
    Flags,
    /// Config file or env override. `RUST_LOG`, when set and valid, wins.
    Config,
}

/// Build the filter for `spec`.
///
/// `spec` is a comma-separated list of directives, each either a bare level
/// (`warn`) or `target=level` (`library_catalog=debug`). Bare words that are
/// not levels are refused, so a typo such as `verbose` is an error instead of
/// a target filter that silently matches nothing.
pub fn directives(spec: &str) -> Result<EnvFilter, AppError> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    for part in &parts {
        let level = match part.rsplit_once('=') {
            Some((target, level)) if !target.is_empty() => level,
            Some(_) => return Err(AppError::Logger(format!("missing target in '{part}'"))),
            None => part,
        };
        level
            .parse::<LevelFilter>()
            .map_err(|_| AppError::Logger(format!("unrecognised log level in '{part}'")))?;
    }
    EnvFilter::try_new(parts.join(","))
        .map_err(|e| AppError::Logger(format!("invalid log level '{spec}': {e}")))
}

/// Pick the filter for `level` given where it came from.
///
/// The configured level is validated even when `RUST_LOG` ends up winning.
pub fn filter_for(level: &str, source: LevelSource) -> Result<EnvFilter, AppError> {
    let configured = directives(level)?;
    Ok(match source {
        LevelSource::Flags => configured,
        LevelSource::Config => EnvFilter::try_from_default_env().unwrap_or(configured),
    })
}

/// Install the global subscriber. Call once, after config is resolved.
pub fn init(level: &str, source: LevelSource) -> Result<(), AppError> {
    let filter = filter_for(level, source)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}
