use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::util::SubscriberInitExt;

/// Parse a log level name (`error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(raw: &str) -> Option<Level> {
    raw.trim().parse().ok()
}

/// Install the process-wide fmt subscriber writing to stderr.
///
/// Unknown level names fall back to `info`. Installing twice is reported as
/// an error rather than a panic.
pub fn init(level: &str) -> anyhow::Result<()> {
    let max_level = parse_level(level).unwrap_or(Level::INFO);
    FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {e}"))
}
