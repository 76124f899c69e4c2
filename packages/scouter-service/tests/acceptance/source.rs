use std::sync::Arc;

use scouter_domain::StaticCatalog;
use scouter_service::{CatalogSource, Source};
use scouter_testkit::{MockCatalogApi, MockResponse, UNREACHABLE_API_BASE};

use super::{StubCatalog, bundled_dataset, catalog_config, source_with};

#[tokio::test]
async fn live_envelope_is_passed_through() {
	let roster = scouter_testkit::roster(12);
	let body = serde_json::json!({
		"items": scouter_testkit::to_json(&roster),
		"meta": { "page": 2, "total": 120, "limit": 12 }
	});
	let api =
		MockCatalogApi::start(MockResponse::Json(body)).await.expect("Failed to start mock API.");
	let source = CatalogSource::new(catalog_config(api.api_base()), bundled_dataset());
	let fetch = source.fetch_characters("", 2, 12).await;

	assert_eq!(fetch.source, Source::Live);
	assert_eq!(fetch.items, roster);
	assert_eq!(fetch.meta.total, 120);
	assert!(fetch.all_items.is_none());
	assert!(fetch.error.is_none());
}

#[tokio::test]
async fn server_error_falls_back_to_offline_dataset() {
	let api =
		MockCatalogApi::start(MockResponse::Status(503)).await.expect("Failed to start mock API.");
	let source = CatalogSource::new(catalog_config(api.api_base()), bundled_dataset());
	let fetch = source.fetch_characters("", 1, 12).await;

	assert_eq!(fetch.source, Source::Fallback);
	assert_eq!(fetch.error.as_deref(), Some("API error 503."));
	assert_eq!(fetch.items.len(), 7);
	assert_eq!(fetch.all_items.as_ref().map(Vec::len), Some(7));
	assert_eq!(fetch.meta.total, 7);
}

#[tokio::test]
async fn unreachable_api_falls_back_to_offline_dataset() {
	let source =
		CatalogSource::new(catalog_config(UNREACHABLE_API_BASE.to_string()), bundled_dataset());
	let fetch = source.fetch_characters("", 1, 12).await;

	assert_eq!(fetch.source, Source::Fallback);
	assert!(fetch.error.is_some());
}

#[tokio::test]
async fn undecodable_body_falls_back_to_offline_dataset() {
	let api = MockCatalogApi::start(MockResponse::Json(serde_json::json!({ "data": [] })))
		.await
		.expect("Failed to start mock API.");
	let source = CatalogSource::new(catalog_config(api.api_base()), bundled_dataset());
	let fetch = source.fetch_characters("", 1, 12).await;

	assert_eq!(fetch.source, Source::Fallback);
	assert_eq!(fetch.error.as_deref(), Some("Catalog response is missing items array."));
}

#[tokio::test]
async fn fallback_filters_by_name_case_insensitively() {
	let source = source_with(Arc::new(StubCatalog::failing(500)), bundled_dataset());
	let fetch = source.fetch_characters("  gO ", 1, 12).await;
	let names: Vec<&str> = fetch.items.iter().map(|character| character.name.as_str()).collect();

	assert_eq!(names, vec!["Goku"]);
	assert_eq!(fetch.meta.total, 1);
}

#[tokio::test]
async fn fallback_slices_requested_page() {
	let source = source_with(Arc::new(StubCatalog::failing(500)), bundled_dataset());
	let fetch = source.fetch_characters("", 2, 3).await;
	let names: Vec<&str> = fetch.items.iter().map(|character| character.name.as_str()).collect();

	assert_eq!(names, vec!["Bulma", "Freezer", "Beerus"]);
	assert_eq!(fetch.all_items.as_ref().map(Vec::len), Some(7));

	let beyond = source.fetch_characters("", 4, 3).await;

	assert!(beyond.items.is_empty());
	assert_eq!(beyond.meta.total, 7);
}

#[tokio::test]
async fn fallback_over_empty_dataset_is_empty() {
	let source =
		source_with(Arc::new(StubCatalog::failing(502)), Arc::new(StaticCatalog::default()));
	let fetch = source.fetch_characters("goku", 1, 12).await;

	assert_eq!(fetch.source, Source::Fallback);
	assert!(fetch.items.is_empty());
	assert_eq!(fetch.meta.total, 0);
}

#[tokio::test]
async fn remote_query_carries_trimmed_name() {
	let stub = Arc::new(StubCatalog::serving(scouter_testkit::roster(3)));
	let source = source_with(stub.clone(), bundled_dataset());

	source.fetch_characters("  Fighter 2 ", 1, 12).await;

	let query = stub.last_query().expect("Expected a remote call.");

	assert_eq!(query.name, "Fighter 2");
	assert_eq!(query.page, 1);
	assert_eq!(query.limit, 12);
}
