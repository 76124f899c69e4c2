use std::{
	sync::{Arc, atomic::Ordering},
	time::Duration,
};

use tokio::{sync::watch, time};

use scouter_domain::Character;
use scouter_service::{OFFLINE_BANNER, Phase, SearchController, Source, ViewState};

use super::{
	GatedCatalog, PanickingCatalog, StubCatalog, bundled_dataset, search_settings, serve_page,
	source_with,
};

async fn wait_for_view(
	view: &mut watch::Receiver<ViewState>,
	ready: impl FnMut(&ViewState) -> bool,
) -> ViewState {
	time::timeout(Duration::from_secs(30), view.wait_for(ready))
		.await
		.expect("Timed out waiting for the view.")
		.expect("Search session stopped.")
		.clone()
}

fn spawn_with_stub(stub: &Arc<StubCatalog>) -> SearchController {
	let source = source_with(stub.clone(), bundled_dataset());

	SearchController::spawn(Arc::new(source), &search_settings())
}

#[tokio::test(start_paused = true)]
async fn initial_load_falls_back_with_banner() {
	let stub = Arc::new(StubCatalog::failing(503));
	let controller = spawn_with_stub(&stub);
	let mut view = controller.subscribe();
	let ready = wait_for_view(&mut view, |view| view.phase == Phase::ReadyWithBanner).await;

	assert_eq!(ready.visible.len(), 7);
	assert_eq!(ready.source, Some(Source::Fallback));
	assert_eq!(ready.banner_message.as_deref(), Some(OFFLINE_BANNER));
	assert!(!ready.loading);
	assert_eq!(controller.view(), ready);
}

#[tokio::test(start_paused = true)]
async fn keystrokes_are_coalesced_until_quiet() {
	let stub = Arc::new(StubCatalog::serving(scouter_testkit::roster(30)));
	let controller = spawn_with_stub(&stub);
	let mut view = controller.subscribe();

	wait_for_view(&mut view, |view| view.phase == Phase::Ready).await;

	controller.set_name("F");
	time::sleep(Duration::from_millis(100)).await;
	controller.set_name("Fi");
	time::sleep(Duration::from_millis(100)).await;
	controller.set_name("Fighter 2");
	time::sleep(Duration::from_millis(200)).await;

	assert_eq!(stub.calls.load(Ordering::SeqCst), 1);

	time::sleep(Duration::from_millis(200)).await;

	assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
	assert_eq!(stub.last_query().map(|query| query.name), Some("Fighter 2".to_string()));

	// "Fighter 2" and "Fighter 20" through "Fighter 29".
	let ready =
		wait_for_view(&mut view, |view| view.phase == Phase::Ready && view.total == 11).await;

	assert_eq!(ready.visible[0].name, "Fighter 2");
}

#[tokio::test(start_paused = true)]
async fn late_response_for_older_name_is_discarded() {
	let roster = scouter_testkit::roster(30);
	let (gated, mut pending) = GatedCatalog::new();
	let source = source_with(Arc::new(gated), bundled_dataset());
	let controller = SearchController::spawn(Arc::new(source), &search_settings());
	let mut view = controller.subscribe();
	let initial = pending.recv().await.expect("Expected the initial fetch.");

	initial.respond.send(Ok(serve_page(&roster, &initial.query))).expect("Fetch was dropped.");
	wait_for_view(&mut view, |view| view.phase == Phase::Ready && view.total == 30).await;

	controller.set_name("a");

	let first = pending.recv().await.expect("Expected a fetch for \"a\".");

	controller.set_name("ab");

	let second = pending.recv().await.expect("Expected a fetch for \"ab\".");

	assert_eq!(first.query.name, "a");
	assert_eq!(second.query.name, "ab");

	let abby: Vec<Character> = vec![scouter_testkit::character(99, "Abby", "1 Million")];

	second.respond.send(Ok(serve_page(&abby, &second.query))).expect("Fetch was dropped.");
	wait_for_view(&mut view, |view| view.phase == Phase::Ready && view.total == 1).await;
	first.respond.send(Ok(serve_page(&roster, &first.query))).expect("Fetch was dropped.");
	time::sleep(Duration::from_secs(1)).await;

	let settled = controller.view();

	assert_eq!(settled.total, 1);
	assert_eq!(settled.visible, abby);
	assert!(!settled.loading);
}

#[tokio::test(start_paused = true)]
async fn ki_change_returns_to_first_page() {
	let stub = Arc::new(StubCatalog::serving(scouter_testkit::roster(120)));
	let controller = spawn_with_stub(&stub);
	let mut view = controller.subscribe();

	wait_for_view(&mut view, |view| view.phase == Phase::Ready).await;
	controller.next_page();

	let second =
		wait_for_view(&mut view, |view| view.phase == Phase::Ready && view.page == 2).await;

	assert!(second.has_prev());
	assert_eq!(second.visible[0].name, "Fighter 13");

	controller.set_ki_min("1");

	let filtered = wait_for_view(&mut view, |view| {
		view.phase == Phase::Ready && view.page == 1 && view.ki_filtered
	})
	.await;

	assert_eq!(stub.calls.load(Ordering::SeqCst), 3);
	assert_eq!(filtered.visible.len(), 12);
	assert_eq!(filtered.total, 12);
	assert!(!filtered.has_next());
}

#[tokio::test(start_paused = true)]
async fn paging_stops_at_either_end() {
	let stub = Arc::new(StubCatalog::serving(scouter_testkit::roster(12)));
	let controller = spawn_with_stub(&stub);
	let mut view = controller.subscribe();

	wait_for_view(&mut view, |view| view.phase == Phase::Ready).await;
	controller.next_page();
	controller.prev_page();
	time::sleep(Duration::from_secs(1)).await;

	assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
	assert_eq!(controller.view().page, 1);
}

#[tokio::test(start_paused = true)]
async fn clear_drops_pending_name_and_refetches() {
	let stub = Arc::new(StubCatalog::serving(scouter_testkit::roster(30)));
	let controller = spawn_with_stub(&stub);
	let mut view = controller.subscribe();

	wait_for_view(&mut view, |view| view.phase == Phase::Ready).await;

	controller.set_ki_max("5000");
	controller.set_name("Fighter 3");
	controller.clear();
	time::sleep(Duration::from_secs(1)).await;

	let cleared = controller.view();

	assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
	assert_eq!(stub.last_query().map(|query| query.name), Some(String::new()));
	assert_eq!(cleared.phase, Phase::Ready);
	assert_eq!(cleared.total, 30);
	assert!(!cleared.ki_filtered);
}

#[tokio::test(start_paused = true)]
async fn unexpected_failure_shows_error_banner() {
	let source = source_with(Arc::new(PanickingCatalog), bundled_dataset());
	let controller = SearchController::spawn(Arc::new(source), &search_settings());
	let mut view = controller.subscribe();
	let failed = wait_for_view(&mut view, |view| view.phase == Phase::ReadyWithBanner).await;

	assert_eq!(
		failed.banner_message.as_deref(),
		Some("Failed to load characters: Internal error: catalog exploded")
	);
	assert!(failed.visible.is_empty());
	assert_eq!(failed.total, 0);
	assert!(failed.source.is_none());
	assert!(!failed.loading);
}
