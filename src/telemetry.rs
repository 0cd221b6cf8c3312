use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Initialize tracing output on stderr. The library never calls this itself;
/// it exists so the binary and tests have an easy way to see what the machine
/// is doing.
///
/// `RUST_LOG` takes precedence over `default_level`. Only the first call has
/// any effect.
pub fn tracing_init(default_level: Level) {
    TRACING_INIT.get_or_init(|| {
        let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::default().add_directive(LevelFilter::from_level(default_level).into())
        });
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        // Another subscriber may already be installed, e.g. by a test harness
        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}
