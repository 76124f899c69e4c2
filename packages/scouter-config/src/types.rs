use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://dragonball-api.com/api";
pub const DEFAULT_CHARACTERS_PATH: &str = "/characters";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub catalog: Catalog,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	/// `tracing_subscriber::EnvFilter` directive, e.g. "info" or "scouter_service=debug".
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Catalog {
	pub api_base: String,
	pub path: String,
	pub timeout_ms: u64,
}
impl Catalog {
	pub fn characters_url(&self) -> String {
		format!("{}{}", self.api_base, self.path)
	}
}
impl Default for Catalog {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.to_string(),
			path: DEFAULT_CHARACTERS_PATH.to_string(),
			timeout_ms: 5_000,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Fixed page size shared by the remote query and client-side slicing.
	pub page_limit: u32,
	/// Quiet period before a typed name is forwarded to fetching.
	pub debounce_ms: u64,
}
impl Default for Search {
	fn default() -> Self {
		Self { page_limit: 12, debounce_ms: 350 }
	}
}
