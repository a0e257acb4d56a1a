use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, Registry};

/// lets the level be changed after the subscriber is installed
pub type LevelHandle = reload::Handle<LevelFilter, Registry>;

/// install the console subscriber at `info`
///
/// the configured level is applied later through [`set_level`], once the
/// config file (whose loading is itself logged) has been read.
pub fn init() -> LevelHandle {
    let (level, handle) = reload::Layer::new(LevelFilter::INFO);
    let layer = tracing_subscriber::fmt::layer().with_target(false);
    let registry = tracing_subscriber::registry().with(level).with(layer);
    // a second init (tests, embedding) keeps the first subscriber
    let _ = registry.try_init();
    handle
}

/// unknown level names fall back to `info`
pub fn set_level(handle: &LevelHandle, level: &str) {
    let level = parse_level(level);
    if let Err(e) = handle.modify(|current| *current = level) {
        tracing::warn!("[LOGGING] cannot change level: {}", e);
    }
}

fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN "), LevelFilter::WARN);
        assert_eq!(parse_level("chatty"), LevelFilter::INFO);
    }
}
