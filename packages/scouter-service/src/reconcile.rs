use scouter_domain::{Character, ki, page};

use crate::{
	FetchResult, Source,
	view::{OFFLINE_BANNER, Phase, ViewState},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
	pub name: String,
	pub ki_min: String,
	pub ki_max: String,
	pub page: u32,
	pub limit: u32,
}
impl QueryState {
	pub fn new(limit: u32) -> Self {
		Self {
			name: String::new(),
			ki_min: String::new(),
			ki_max: String::new(),
			page: 1,
			limit: limit.max(1),
		}
	}

	pub fn ki_filter_requested(&self) -> bool {
		!self.ki_min.trim().is_empty() || !self.ki_max.trim().is_empty()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaginationMode {
	/// The remote service already returned the requested page.
	Server,
	/// The full list is materialized locally and sliced here.
	Client,
}

/// Inclusive ki window. Characters whose own ki is not comparable never fall inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KiRange {
	pub lo: f64,
	pub hi: f64,
}
impl KiRange {
	/// `None` when neither bound is a usable number, which disables ki filtering entirely.
	///
	/// A blank bound is unbounded on its side. So is an unparseable one, as long as the other
	/// side is valid.
	pub fn from_bounds(ki_min: &str, ki_max: &str) -> Option<Self> {
		let lo = parse_bound(ki_min);
		let hi = parse_bound(ki_max);

		if lo.is_none() && hi.is_none() {
			return None;
		}

		Some(Self { lo: lo.unwrap_or(f64::NEG_INFINITY), hi: hi.unwrap_or(f64::INFINITY) })
	}

	pub fn contains(&self, value: f64) -> bool {
		ki::is_comparable(value) && value >= self.lo && value <= self.hi
	}
}

fn parse_bound(raw: &str) -> Option<f64> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	let value = ki::parse_ki_str(trimmed);

	ki::is_comparable(value).then_some(value)
}

pub fn pagination_mode(fetch: &FetchResult, query: &QueryState) -> PaginationMode {
	if fetch.source == Source::Fallback || query.ki_filter_requested() {
		PaginationMode::Client
	} else {
		PaginationMode::Server
	}
}

pub fn filter_by_ki(characters: &[Character], query: &QueryState) -> Vec<Character> {
	match KiRange::from_bounds(&query.ki_min, &query.ki_max) {
		Some(range) => characters
			.iter()
			.filter(|character| range.contains(ki::parse_ki(&character.ki)))
			.cloned()
			.collect(),
		None => characters.to_vec(),
	}
}

/// Derives the visible page and total for `fetch` under `query`.
///
/// `total` always describes the list `visible` was cut from, so `has_next` on the result is
/// right in both pagination modes.
pub fn reconcile(fetch: &FetchResult, query: &QueryState) -> ViewState {
	let filtered = filter_by_ki(fetch.base_items(), query);
	let (visible, total) = match pagination_mode(fetch, query) {
		PaginationMode::Client => {
			let total = filtered.len();

			(page::page_slice(&filtered, query.page, query.limit), total)
		},
		PaginationMode::Server => {
			let mut visible = filtered;

			visible.truncate(query.limit as usize);

			(visible, fetch.meta.total)
		},
	};
	let (phase, banner_message) = match fetch.source {
		Source::Live => (Phase::Ready, None),
		Source::Fallback => (Phase::ReadyWithBanner, Some(OFFLINE_BANNER.to_string())),
	};

	ViewState {
		visible,
		total,
		page: query.page,
		limit: query.limit,
		loading: false,
		banner_message,
		source: Some(fetch.source),
		phase,
		ki_filtered: query.ki_filter_requested(),
	}
}
