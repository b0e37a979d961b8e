//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber: an [`EnvFilter`] built from the
//! configured directive, layered with a compact fmt writer on stderr.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// The filter directive comes from [`Config::log_filter`], which the
/// configuration loader already resolved from its file/environment sources
/// (`LIBROTECA_LOG` wins). Idempotent: only the first call takes effect, so
/// tests that each initialize tracing do not trip over one another.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::new(&config.log_filter);

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    let _ = subscriber.try_init();
}
