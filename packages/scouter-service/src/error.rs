use tokio::task::JoinError;

pub type ServiceResult<T> = Result<T, ServiceError>;

pub const FAILED_TO_LOAD: &str = "Failed to load characters";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<JoinError> for ServiceError {
	fn from(err: JoinError) -> Self {
		if !err.is_panic() {
			return Self::Internal { message: err.to_string() };
		}

		let payload = err.into_panic();
		let message = payload
			.downcast_ref::<&str>()
			.map(|message| message.to_string())
			.or_else(|| payload.downcast_ref::<String>().cloned())
			.unwrap_or_else(|| FAILED_TO_LOAD.to_string());

		Self::Internal { message }
	}
}
