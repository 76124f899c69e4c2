use crate::{Result, character::Character};

const BUNDLED_CHARACTERS: &str = include_str!("../data/characters.json");

/// Read-only offline catalog queried in-process when the remote API is unreachable.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
	characters: Vec<Character>,
}
impl StaticCatalog {
	pub fn new(characters: Vec<Character>) -> Self {
		Self { characters }
	}

	pub fn bundled() -> Result<Self> {
		Self::from_json(BUNDLED_CHARACTERS)
	}

	pub fn from_json(raw: &str) -> Result<Self> {
		let characters: Vec<Character> = serde_json::from_str(raw)?;

		Ok(Self { characters })
	}

	pub fn characters(&self) -> &[Character] {
		&self.characters
	}

	pub fn len(&self) -> usize {
		self.characters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.characters.is_empty()
	}

	/// Case-insensitive substring match on the trimmed name; an empty name matches everything.
	pub fn filter_by_name(&self, name: &str) -> Vec<Character> {
		let needle = name.trim().to_lowercase();

		self.characters
			.iter()
			.filter(|character| character.matches_name(&needle))
			.cloned()
			.collect()
	}
}
