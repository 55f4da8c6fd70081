//! Error types for fixture driver operations.
//!
//! Every failure reported by MongoDB is kept intact as the error's source;
//! the variant only records which operation and collection were in progress.

use thiserror::Error;

/// Server error code returned when a namespace does not exist.
const NAMESPACE_NOT_FOUND: i32 = 26;

/// Errors that can occur while managing fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// Dropping a collection failed.
	#[error("Failed to truncate collection `{collection}`: {source}")]
	Truncate {
		/// Collection that was being dropped.
		collection: String,
		/// Error reported by the MongoDB driver.
		#[source]
		source: mongodb::error::Error,
	},

	/// Bulk insertion into a collection failed.
	#[error("Failed to insert {count} fixture(s) into collection `{collection}`: {source}")]
	Insert {
		/// Collection the fixtures were destined for.
		collection: String,
		/// Number of documents in the rejected batch.
		count: usize,
		/// Error reported by the MongoDB driver.
		#[source]
		source: mongodb::error::Error,
	},

	/// A typed record could not be converted into a BSON document.
	#[error("Serialization error: {0}")]
	Serialization(#[from] bson::error::Error),
}

impl FixtureError {
	/// Returns the collection involved in the failed operation, if any.
	pub fn collection(&self) -> Option<&str> {
		match self {
			FixtureError::Truncate { collection, .. } | FixtureError::Insert { collection, .. } => {
				Some(collection.as_str())
			}
			FixtureError::Serialization(_) => None,
		}
	}

	/// Returns the underlying MongoDB driver error, if any.
	pub fn driver_error(&self) -> Option<&mongodb::error::Error> {
		match self {
			FixtureError::Truncate { source, .. } | FixtureError::Insert { source, .. } => {
				Some(source)
			}
			FixtureError::Serialization(_) => None,
		}
	}
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Returns true when the server rejected a command because the namespace
/// does not exist.
pub(crate) fn is_namespace_not_found(err: &mongodb::error::Error) -> bool {
	use mongodb::error::ErrorKind;

	matches!(*err.kind, ErrorKind::Command(ref command) if command.code == NAMESPACE_NOT_FOUND)
}
