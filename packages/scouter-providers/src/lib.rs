pub mod catalog;

mod error;

pub use error::{Error, Result};

/// One remote page request. `name` is sent trimmed and omitted when blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogQuery {
	pub name: String,
	pub page: u32,
	pub limit: u32,
}
impl CatalogQuery {
	pub fn new(name: &str, page: u32, limit: u32) -> Self {
		Self { name: name.trim().to_string(), page, limit }
	}

	pub fn params(&self) -> Vec<(&'static str, String)> {
		let mut params = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];

		if !self.name.is_empty() {
			params.push(("name", self.name.clone()));
		}

		params
	}
}
