use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper used by every test-automation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
	pub data: T,
}

impl<T> DataEnvelope<T> {
	pub fn into_inner(self) -> T {
		self.data
	}
}
