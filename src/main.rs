// Entrypoint for the bikeshare explorer.
// - Keeps `main` small: read configuration, start logging, hand a terminal
//   console to the session loop.
// - Returns `anyhow::Result` so terminal failures surface with context.

use bikeshare_cli::{console::TerminalConsole, Config, Session};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so they never mix with the report on stdout.
/// `RUST_LOG` overrides the level chosen from debug mode.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    // Data directory and debug mode come from BIKESHARE_DATA_DIR and
    // BIKESHARE_DEBUG. See `Config::from_env`.
    let config = Config::from_env();
    init_logging(config.debug);
    tracing::debug!(data_dir = %config.data_dir.display(), "starting");

    // Blocks until the user declines to restart or stdin closes.
    let mut console = TerminalConsole::new();
    Session::new(config).run(&mut console)?;
    Ok(())
}
