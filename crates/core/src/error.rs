use thiserror::Error;

pub type Result<T> = std::result::Result<T, FarmError>;

#[derive(Debug, Error)]
pub enum FarmError {
	/// Configuration was found but cannot be used as given.
	#[error("invalid configuration: {0}")]
	Config(String),

	/// The client-version probe failed or produced unusable output.
	#[error("client version probe failed: {0}")]
	Probe(String),

	/// The remote session WebSocket could not be opened.
	#[error("remote session connect failed: {0}")]
	Connect(String),

	/// A local browser could not be launched or attached to.
	#[error("local browser launch failed: {0}")]
	Launch(String),

	/// The farm answered a status update with something other than 200.
	#[error("farm API returned {0}")]
	ApiStatus(reqwest::StatusCode),

	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
