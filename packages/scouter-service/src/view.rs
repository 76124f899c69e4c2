use serde::Serialize;

use scouter_domain::{Character, page};

use crate::{Source, reconcile::QueryState};

pub const OFFLINE_BANNER: &str = "Live API unavailable — showing offline dataset.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
	Idle,
	Loading,
	Ready,
	ReadyWithBanner,
}

/// Everything the presentation layer needs for one frame. Always replaced as a whole.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewState {
	pub visible: Vec<Character>,
	pub total: usize,
	pub page: u32,
	pub limit: u32,
	pub loading: bool,
	pub banner_message: Option<String>,
	pub source: Option<Source>,
	pub phase: Phase,
	/// A ki bound was entered, valid or not.
	pub ki_filtered: bool,
}
impl ViewState {
	pub fn idle(query: &QueryState) -> Self {
		Self {
			visible: Vec::new(),
			total: 0,
			page: query.page,
			limit: query.limit,
			loading: false,
			banner_message: None,
			source: None,
			phase: Phase::Idle,
			ki_filtered: query.ki_filter_requested(),
		}
	}

	pub fn has_prev(&self) -> bool {
		self.page > 1
	}

	pub fn has_next(&self) -> bool {
		page::has_next_page(self.page, self.limit, self.total)
	}
}
