pub mod controller;
pub mod reconcile;
pub mod source;
pub mod view;

mod error;
mod telemetry;

pub use controller::{Command, Effect, Event, FetchRequest, SearchController, SearchMachine};
pub use error::{FAILED_TO_LOAD, ServiceError, ServiceResult};
pub use reconcile::{KiRange, PaginationMode, QueryState, reconcile};
pub use source::{CatalogSource, FetchResult, Source};
pub use telemetry::init_tracing;
pub use view::{OFFLINE_BANNER, Phase, ViewState};

use std::{future::Future, pin::Pin};

use scouter_providers::{CatalogQuery, catalog::CharacterPage};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remote half of a catalog lookup. Any `Err` sends the caller to the offline dataset.
pub trait CatalogProvider
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		cfg: &'a scouter_config::Catalog,
		query: &'a CatalogQuery,
	) -> BoxFuture<'a, scouter_providers::Result<CharacterPage>>;
}

pub struct HttpCatalogProvider;
impl CatalogProvider for HttpCatalogProvider {
	fn fetch<'a>(
		&'a self,
		cfg: &'a scouter_config::Catalog,
		query: &'a CatalogQuery,
	) -> BoxFuture<'a, scouter_providers::Result<CharacterPage>> {
		Box::pin(scouter_providers::catalog::fetch_characters(cfg, query))
	}
}
