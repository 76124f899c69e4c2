use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
	pub page: u32,
	pub total: usize,
	pub limit: u32,
}

/// Returns the `[(page - 1) * limit, page * limit)` window of `items`, clamped to its length.
pub fn page_slice<T: Clone>(items: &[T], page: u32, limit: u32) -> Vec<T> {
	let limit = limit as usize;
	let start = (page.saturating_sub(1) as usize).saturating_mul(limit);

	if start >= items.len() {
		return Vec::new();
	}

	let end = start.saturating_add(limit).min(items.len());

	items[start..end].to_vec()
}

pub fn has_next_page(page: u32, limit: u32, total: usize) -> bool {
	(page as u64).saturating_mul(limit as u64) < total as u64
}
