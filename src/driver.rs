//! Storage driver capability used by fixture loaders.
//!
//! A fixture loader clears the collections it is about to seed, inserts one
//! batch of documents per collection and finally closes the driver. This
//! module defines that capability as the [`StorageDriver`] trait, independent
//! of the database engine that implements it.

use std::future::Future;

use async_trait::async_trait;
use bson::Document;
use serde::Serialize;

use crate::error::FixtureResult;

/// Capability set a fixture loader needs from a database.
///
/// Implementations translate each operation into native driver calls and
/// return the first failure unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use dbfixtures_mongodb::prelude::*;
/// use bson::doc;
///
/// async fn seed(driver: &dyn StorageDriver) -> FixtureResult<()> {
///     driver.truncate(&["users".to_string()]).await?;
///     driver.insert_fixtures("users", vec![doc! { "name": "Alice" }]).await?;
///     driver.close().await
/// }
/// ```
#[async_trait]
pub trait StorageDriver: Send + Sync {
	/// Clears the named collections, in order.
	///
	/// # Arguments
	///
	/// * `collection_names` - Collections to clear
	///
	/// # Errors
	///
	/// Stops at the first collection that cannot be cleared and returns its
	/// error. Collections processed before it stay cleared.
	async fn truncate(&self, collection_names: &[String]) -> FixtureResult<()>;

	/// Inserts `fixtures` into the named collection in a single batch.
	///
	/// # Arguments
	///
	/// * `collection_name` - Target collection
	/// * `fixtures` - Documents to insert, forwarded verbatim
	async fn insert_fixtures(
		&self,
		collection_name: &str,
		fixtures: Vec<Document>,
	) -> FixtureResult<()>;

	/// Releases resources owned by the driver.
	async fn close(&self) -> FixtureResult<()>;
}

/// Convenience methods available on every [`StorageDriver`].
#[async_trait]
pub trait StorageDriverExt: StorageDriver {
	/// Serializes typed records to documents and inserts them.
	///
	/// Nothing is sent to the database if any record fails to serialize.
	///
	/// # Example
	///
	/// ```rust,ignore
	/// #[derive(Serialize)]
	/// struct User { name: String, age: i32 }
	///
	/// driver.insert_records("users", &[User { name: "Alice".into(), age: 30 }]).await?;
	/// ```
	async fn insert_records<T>(&self, collection_name: &str, records: &[T]) -> FixtureResult<()>
	where
		T: Serialize + Sync;
}

#[async_trait]
impl<D: StorageDriver + ?Sized> StorageDriverExt for D {
	async fn insert_records<T>(&self, collection_name: &str, records: &[T]) -> FixtureResult<()>
	where
		T: Serialize + Sync,
	{
		let fixtures = records
			.iter()
			.map(|record| bson::serialize_to_document(record))
			.collect::<Result<Vec<_>, _>>()?;

		self.insert_fixtures(collection_name, fixtures).await
	}
}

/// Applies `op` to each collection name in order, stopping at the first error.
pub(crate) async fn for_each_collection<'n, F, Fut>(
	collection_names: &'n [String],
	mut op: F,
) -> FixtureResult<()>
where
	F: FnMut(&'n str) -> Fut,
	Fut: Future<Output = FixtureResult<()>>,
{
	for name in collection_names {
		op(name.as_str()).await?;
	}
	Ok(())
}
