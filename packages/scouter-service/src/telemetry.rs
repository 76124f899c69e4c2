use tracing_subscriber::EnvFilter;

use scouter_config::Config;

/// Installs the global fmt subscriber. A second call keeps the first subscriber.
pub fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
		tracing::debug!("Tracing subscriber already installed.");
	}
}
