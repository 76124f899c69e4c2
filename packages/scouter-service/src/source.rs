use std::sync::Arc;

use serde::Serialize;

use scouter_config::Config;
use scouter_domain::{Character, PageMeta, StaticCatalog, page};
use scouter_providers::{CatalogQuery, catalog::CharacterPage};

use crate::{CatalogProvider, HttpCatalogProvider};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
	Live,
	Fallback,
}

/// Normalized envelope for one query attempt.
///
/// `all_items` is `Some` exactly when `source` is [`Source::Fallback`]; the constructors are the
/// only way the two fields are set together.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchResult {
	pub items: Vec<Character>,
	pub all_items: Option<Vec<Character>>,
	pub meta: PageMeta,
	pub source: Source,
	pub error: Option<String>,
}
impl FetchResult {
	pub fn live(page: CharacterPage) -> Self {
		Self {
			items: page.items,
			all_items: None,
			meta: page.meta,
			source: Source::Live,
			error: None,
		}
	}

	pub fn fallback(
		all_items: Vec<Character>,
		page_number: u32,
		limit: u32,
		error: impl Into<String>,
	) -> Self {
		let items = page::page_slice(&all_items, page_number, limit);
		let meta = PageMeta { page: page_number, total: all_items.len(), limit };

		Self {
			items,
			all_items: Some(all_items),
			meta,
			source: Source::Fallback,
			error: Some(error.into()),
		}
	}

	/// The full materialized list when there is one, otherwise the page slice.
	pub fn base_items(&self) -> &[Character] {
		self.all_items.as_deref().unwrap_or(&self.items)
	}
}

pub struct CatalogSource {
	cfg: scouter_config::Catalog,
	provider: Arc<dyn CatalogProvider>,
	dataset: Arc<StaticCatalog>,
}
impl CatalogSource {
	pub fn new(cfg: scouter_config::Catalog, dataset: Arc<StaticCatalog>) -> Self {
		Self::with_provider(cfg, Arc::new(HttpCatalogProvider), dataset)
	}

	pub fn with_provider(
		cfg: scouter_config::Catalog,
		provider: Arc<dyn CatalogProvider>,
		dataset: Arc<StaticCatalog>,
	) -> Self {
		Self { cfg, provider, dataset }
	}

	/// Remote catalog backed by the bundled offline dataset.
	pub fn from_config(config: &Config) -> scouter_domain::Result<Self> {
		let dataset = StaticCatalog::bundled()?;

		Ok(Self::new(config.catalog.clone(), Arc::new(dataset)))
	}

	pub fn dataset(&self) -> &StaticCatalog {
		&self.dataset
	}

	/// Never fails: any remote failure is answered from the offline dataset.
	pub async fn fetch_characters(&self, name: &str, page: u32, limit: u32) -> FetchResult {
		let query = CatalogQuery::new(name, page, limit);

		match self.provider.fetch(&self.cfg, &query).await {
			Ok(page) => {
				tracing::debug!(
					total = page.meta.total,
					items = page.items.len(),
					page = query.page,
					"Live catalog answered."
				);

				FetchResult::live(page)
			},
			Err(err) => {
				tracing::warn!(
					error = %err,
					page = query.page,
					limit = query.limit,
					"Live catalog unavailable; serving offline dataset."
				);

				self.fallback(&query, err.to_string())
			},
		}
	}

	fn fallback(&self, query: &CatalogQuery, reason: String) -> FetchResult {
		let all_items = self.dataset.filter_by_name(&query.name);

		FetchResult::fallback(all_items, query.page, query.limit, reason)
	}
}
