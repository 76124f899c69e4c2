pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Character dataset is malformed: {0}")]
	Dataset(#[from] serde_json::Error),
}
