use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterId {
	Number(i64),
	Text(String),
}
impl fmt::Display for CharacterId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(id) => write!(f, "{id}"),
			Self::Text(id) => f.write_str(id),
		}
	}
}

/// Raw ki as the catalog reports it, either a bare number or free text such as "1.5 Million".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ki {
	Number(f64),
	Text(String),
}
impl fmt::Display for Ki {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(value) => write!(f, "{value}"),
			Self::Text(value) => f.write_str(value),
		}
	}
}
impl From<f64> for Ki {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}
impl From<&str> for Ki {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<CharacterId>,
	pub name: String,
	pub ki: Ki,
	#[serde(default)]
	pub image: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}
impl Character {
	/// List key: the id when present, the name otherwise. Not a uniqueness guarantee.
	pub fn key(&self) -> String {
		match &self.id {
			Some(id) => id.to_string(),
			None => self.name.clone(),
		}
	}

	pub fn matches_name(&self, needle_lower: &str) -> bool {
		needle_lower.is_empty() || self.name.to_lowercase().contains(needle_lower)
	}
}
