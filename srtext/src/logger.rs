//! Logger setup for the srtext binary and its tests.

use log::LevelFilter;

/// Initializes `env_logger` once.
///
/// With `Some(level)` the level is forced; with `None` the `RUST_LOG` variable decides,
/// defaulting to warnings. Later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);

    // Already initialized (tests call this repeatedly).
    let _ = builder.try_init();
}
