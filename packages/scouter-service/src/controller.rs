//! Search session state machine and the actor that drives it.
//!
//! [`SearchMachine`] is pure: every input becomes an [`Event`], and handling an event mutates the
//! machine and returns the [`Effect`]s to perform. [`SearchController`] owns a machine on a tokio
//! task, performs those effects (debounce timers, catalog fetches) and publishes a fresh
//! [`ViewState`] after every transition.

use std::{sync::Arc, time::Duration};

use tokio::{
	sync::{mpsc, watch},
	task::JoinHandle,
	time,
};

use crate::{
	CatalogSource, FAILED_TO_LOAD, FetchResult, ServiceError, ServiceResult,
	reconcile::{self, QueryState},
	view::{Phase, ViewState},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
	SetName(String),
	SetKiMin(String),
	SetKiMax(String),
	NextPage,
	PrevPage,
	Clear,
}

#[derive(Debug)]
pub enum Event {
	Command(Command),
	/// The debounce quiet period for `generation` elapsed.
	NameSettled { generation: u64, name: String },
	FetchCompleted { seq: u64, outcome: ServiceResult<FetchResult> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
	pub seq: u64,
	pub name: String,
	pub page: u32,
	pub limit: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
	Fetch(FetchRequest),
	Debounce { generation: u64, name: String },
	CancelDebounce,
}

#[derive(Debug)]
pub struct SearchMachine {
	query: QueryState,
	effective_name: String,
	fetch: Option<FetchResult>,
	failure: Option<String>,
	loading: bool,
	latest_seq: u64,
	debounce_generation: u64,
}
impl SearchMachine {
	pub fn new(limit: u32) -> Self {
		Self {
			query: QueryState::new(limit),
			effective_name: String::new(),
			fetch: None,
			failure: None,
			loading: false,
			latest_seq: 0,
			debounce_generation: 0,
		}
	}

	pub fn query(&self) -> &QueryState {
		&self.query
	}

	pub fn effective_name(&self) -> &str {
		&self.effective_name
	}

	pub fn latest_seq(&self) -> u64 {
		self.latest_seq
	}

	/// Session start: the initial unfiltered fetch.
	pub fn start(&mut self) -> Vec<Effect> {
		vec![self.begin_fetch()]
	}

	pub fn handle(&mut self, event: Event) -> Vec<Effect> {
		match event {
			Event::Command(command) => self.handle_command(command),
			Event::NameSettled { generation, name } => self.settle_name(generation, name),
			Event::FetchCompleted { seq, outcome } => {
				self.complete_fetch(seq, outcome);

				Vec::new()
			},
		}
	}

	pub fn view(&self) -> ViewState {
		let mut view = match &self.fetch {
			Some(fetch) => reconcile::reconcile(fetch, &self.query),
			None => ViewState::idle(&self.query),
		};

		if self.loading {
			view.loading = true;
			view.phase = Phase::Loading;
			view.banner_message = None;
		} else if let Some(message) = &self.failure {
			view.phase = Phase::ReadyWithBanner;
			view.banner_message = Some(message.clone());
		}

		view
	}

	fn handle_command(&mut self, command: Command) -> Vec<Effect> {
		match command {
			Command::SetName(name) => {
				self.query.name = name.clone();
				self.debounce_generation += 1;

				vec![Effect::Debounce { generation: self.debounce_generation, name }]
			},
			Command::SetKiMin(value) => {
				self.query.ki_min = value;

				self.reset_page()
			},
			Command::SetKiMax(value) => {
				self.query.ki_max = value;

				self.reset_page()
			},
			Command::NextPage => {
				if !self.view().has_next() {
					return Vec::new();
				}

				self.query.page += 1;

				vec![self.begin_fetch()]
			},
			Command::PrevPage => {
				if self.query.page <= 1 {
					return Vec::new();
				}

				self.query.page -= 1;

				vec![self.begin_fetch()]
			},
			Command::Clear => {
				self.query = QueryState::new(self.query.limit);
				self.effective_name.clear();
				self.debounce_generation += 1;

				vec![Effect::CancelDebounce, self.begin_fetch()]
			},
		}
	}

	fn settle_name(&mut self, generation: u64, name: String) -> Vec<Effect> {
		if generation != self.debounce_generation || name == self.effective_name {
			return Vec::new();
		}

		self.effective_name = name;
		self.query.page = 1;

		vec![self.begin_fetch()]
	}

	fn reset_page(&mut self) -> Vec<Effect> {
		if self.query.page == 1 {
			return Vec::new();
		}

		self.query.page = 1;

		vec![self.begin_fetch()]
	}

	fn begin_fetch(&mut self) -> Effect {
		self.latest_seq += 1;
		self.loading = true;
		self.failure = None;

		Effect::Fetch(FetchRequest {
			seq: self.latest_seq,
			name: self.effective_name.clone(),
			page: self.query.page,
			limit: self.query.limit,
		})
	}

	fn complete_fetch(&mut self, seq: u64, outcome: ServiceResult<FetchResult>) {
		if seq != self.latest_seq {
			tracing::debug!(seq, latest = self.latest_seq, "Discarding stale catalog response.");

			return;
		}

		self.loading = false;

		match outcome {
			Ok(fetch) => {
				self.fetch = Some(fetch);
				self.failure = None;
			},
			Err(err) => {
				tracing::error!(error = %err, seq, "Catalog fetch failed unexpectedly.");

				self.fetch = None;
				self.failure = Some(format!("{FAILED_TO_LOAD}: {err}"));
			},
		}
	}
}

/// Handle to a running search session.
///
/// Must be created inside a tokio runtime. Dropping the handle stops the session; fetches already
/// in flight finish on their own and their results are ignored.
pub struct SearchController {
	commands: mpsc::UnboundedSender<Command>,
	view: watch::Receiver<ViewState>,
	actor: JoinHandle<()>,
}
impl SearchController {
	pub fn spawn(source: Arc<CatalogSource>, settings: &scouter_config::Search) -> Self {
		let machine = SearchMachine::new(settings.page_limit);
		let (view_tx, view) = watch::channel(machine.view());
		let (commands, command_rx) = mpsc::unbounded_channel();
		let (events, event_rx) = mpsc::unbounded_channel();
		let actor = Actor {
			machine,
			source,
			quiet_period: Duration::from_millis(settings.debounce_ms),
			pending_debounce: None,
			events,
			view: view_tx,
		};
		let actor = tokio::spawn(actor.run(command_rx, event_rx));

		Self { commands, view, actor }
	}

	pub fn set_name(&self, name: impl Into<String>) {
		self.send(Command::SetName(name.into()));
	}

	pub fn set_ki_min(&self, value: impl Into<String>) {
		self.send(Command::SetKiMin(value.into()));
	}

	pub fn set_ki_max(&self, value: impl Into<String>) {
		self.send(Command::SetKiMax(value.into()));
	}

	pub fn next_page(&self) {
		self.send(Command::NextPage);
	}

	pub fn prev_page(&self) {
		self.send(Command::PrevPage);
	}

	pub fn clear(&self) {
		self.send(Command::Clear);
	}

	/// Snapshot of the latest published view.
	pub fn view(&self) -> ViewState {
		self.view.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<ViewState> {
		self.view.clone()
	}

	fn send(&self, command: Command) {
		if self.commands.send(command).is_err() {
			tracing::warn!("Search session is no longer running.");
		}
	}
}
impl Drop for SearchController {
	fn drop(&mut self) {
		self.actor.abort();
	}
}

struct Actor {
	machine: SearchMachine,
	source: Arc<CatalogSource>,
	quiet_period: Duration,
	pending_debounce: Option<JoinHandle<()>>,
	events: mpsc::UnboundedSender<Event>,
	view: watch::Sender<ViewState>,
}
impl Actor {
	async fn run(
		mut self,
		mut commands: mpsc::UnboundedReceiver<Command>,
		mut events: mpsc::UnboundedReceiver<Event>,
	) {
		let effects = self.machine.start();

		self.apply(effects);

		loop {
			let event = tokio::select! {
				command = commands.recv() => match command {
					Some(command) => Event::Command(command),
					None => break,
				},
				Some(event) = events.recv() => event,
			};
			let effects = self.machine.handle(event);

			self.apply(effects);
		}

		self.cancel_debounce();
	}

	fn apply(&mut self, effects: Vec<Effect>) {
		for effect in effects {
			match effect {
				Effect::Fetch(request) => self.spawn_fetch(request),
				Effect::Debounce { generation, name } => self.schedule_debounce(generation, name),
				Effect::CancelDebounce => self.cancel_debounce(),
			}
		}

		let next = self.machine.view();

		self.view.send_if_modified(|current| {
			if *current == next {
				return false;
			}

			*current = next;

			true
		});
	}

	fn schedule_debounce(&mut self, generation: u64, name: String) {
		self.cancel_debounce();

		let events = self.events.clone();
		let quiet_period = self.quiet_period;

		self.pending_debounce = Some(tokio::spawn(async move {
			time::sleep(quiet_period).await;

			let _ = events.send(Event::NameSettled { generation, name });
		}));
	}

	fn cancel_debounce(&mut self) {
		if let Some(pending) = self.pending_debounce.take() {
			pending.abort();
		}
	}

	fn spawn_fetch(&self, request: FetchRequest) {
		let source = self.source.clone();
		let events = self.events.clone();

		tokio::spawn(async move {
			let FetchRequest { seq, name, page, limit } = request;
			let fetch =
				tokio::spawn(async move { source.fetch_characters(&name, page, limit).await });
			let outcome = fetch.await.map_err(ServiceError::from);
			let _ = events.send(Event::FetchCompleted { seq, outcome });
		});
	}
}
