mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Catalog, Config, DEFAULT_API_BASE, DEFAULT_CHARACTERS_PATH, Search, Service};

use std::{fs, path::Path};

const MAX_PAGE_LIMIT: u32 = 1_000;
const MAX_DEBOUNCE_MS: u64 = 10_000;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "catalog.api_base must be non-empty.".to_string(),
		});
	}
	if !["http://", "https://"].iter().any(|scheme| cfg.catalog.api_base.starts_with(scheme)) {
		return Err(Error::Validation {
			message: "catalog.api_base must start with http:// or https://.".to_string(),
		});
	}
	if cfg.catalog.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "catalog.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.page_limit == 0 {
		return Err(Error::Validation {
			message: "search.page_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.page_limit > MAX_PAGE_LIMIT {
		return Err(Error::Validation {
			message: format!("search.page_limit must be {MAX_PAGE_LIMIT} or less."),
		});
	}
	if cfg.search.debounce_ms > MAX_DEBOUNCE_MS {
		return Err(Error::Validation {
			message: format!("search.debounce_ms must be {MAX_DEBOUNCE_MS} or less."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.catalog.api_base = cfg.catalog.api_base.trim().trim_end_matches('/').to_string();

	let path = cfg.catalog.path.trim();

	cfg.catalog.path = if path.starts_with('/') { path.to_string() } else { format!("/{path}") };
}
