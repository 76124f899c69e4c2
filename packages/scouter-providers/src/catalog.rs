use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use scouter_domain::{Character, PageMeta};

use crate::{CatalogQuery, Error, Result};

/// A page of characters as the remote catalog answered it, already name-filtered and paginated.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterPage {
	pub items: Vec<Character>,
	pub meta: PageMeta,
}

pub async fn fetch_characters(
	cfg: &scouter_config::Catalog,
	query: &CatalogQuery,
) -> Result<CharacterPage> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let res = client.get(cfg.characters_url()).query(&query.params()).send().await?;
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status { status: status.as_u16() });
	}

	let json: Value = res.json().await?;

	parse_character_page(json, query)
}

pub fn parse_character_page(json: Value, query: &CatalogQuery) -> Result<CharacterPage> {
	match json {
		Value::Array(_) => {
			let items: Vec<Character> = serde_json::from_value(json)?;
			let meta = PageMeta { page: query.page, total: items.len(), limit: query.limit };

			Ok(CharacterPage { items, meta })
		},
		Value::Object(mut envelope) => {
			let items = match envelope.remove("items") {
				Some(items @ Value::Array(_)) => items,
				Some(_) =>
					return Err(Error::InvalidResponse {
						message: "Catalog response items must be an array.".to_string(),
					}),
				None =>
					return Err(Error::InvalidResponse {
						message: "Catalog response is missing items array.".to_string(),
					}),
			};
			let items: Vec<Character> = serde_json::from_value(items)?;
			let meta = parse_meta(envelope.get("meta"), query, items.len());

			Ok(CharacterPage { items, meta })
		},
		_ => Err(Error::InvalidResponse {
			message: "Catalog response must be an array or an object with items.".to_string(),
		}),
	}
}

// Accepts both `page/total/limit` and the `currentPage/totalItems/itemsPerPage` spelling.
fn parse_meta(meta: Option<&Value>, query: &CatalogQuery, item_count: usize) -> PageMeta {
	let field = |names: [&str; 2]| {
		meta.and_then(|meta| names.iter().find_map(|name| meta.get(*name)))
			.and_then(Value::as_u64)
	};
	let page = field(["page", "currentPage"])
		.and_then(|v| u32::try_from(v).ok())
		.unwrap_or(query.page);
	let total = field(["total", "totalItems"])
		.and_then(|v| usize::try_from(v).ok())
		.unwrap_or(item_count);
	let limit = field(["limit", "itemsPerPage"])
		.and_then(|v| u32::try_from(v).ok())
		.unwrap_or(query.limit);

	PageMeta { page, total, limit }
}
