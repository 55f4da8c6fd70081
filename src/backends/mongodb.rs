//! MongoDB storage driver
//!
//! Maps the fixture capability onto MongoDB collections: truncating drops
//! the collection, inserting issues a single `insertMany` and closing leaves
//! the caller's client untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use dbfixtures_mongodb::prelude::*;
//! use bson::doc;
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let driver = MongoFixtureDriver::new(&client, "app_test", None);
//!
//! driver.truncate(&["users".to_string()]).await?;
//! driver
//!     .insert_fixtures("users", vec![doc! { "name": "Alice", "age": 30 }])
//!     .await?;
//! driver.close().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bson::Document;
use mongodb::options::{DatabaseOptions, InsertManyOptions};
use mongodb::{Client, Database};
use tracing::debug;

use crate::driver::{StorageDriver, for_each_collection};
use crate::error::{FixtureError, FixtureResult, is_namespace_not_found};

/// Fixture driver backed by a MongoDB database.
///
/// The driver borrows a client owned by the caller. It never clones the
/// client into its own storage and never shuts it down, so one client can
/// serve several drivers and the rest of the test suite at the same time.
#[derive(Debug, Clone)]
pub struct MongoFixtureDriver<'a> {
	client: &'a Client,
	database: Database,
	ordered_inserts: bool,
}

impl<'a> MongoFixtureDriver<'a> {
	/// Creates a driver for `database_name` on an already connected client.
	///
	/// # Arguments
	///
	/// * `client` - Client owned by the caller
	/// * `database_name` - Database holding the fixture collections
	/// * `options` - Read/write concern and selection criteria for the database
	///
	/// # Example
	///
	/// ```rust,no_run
	/// use dbfixtures_mongodb::MongoFixtureDriver;
	/// use mongodb::Client;
	/// use mongodb::options::DatabaseOptions;
	///
	/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
	/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
	/// let driver = MongoFixtureDriver::new(&client, "app_test", Some(DatabaseOptions::default()));
	/// assert_eq!(driver.database_name(), "app_test");
	/// # Ok(())
	/// # }
	/// ```
	pub fn new(client: &'a Client, database_name: &str, options: Option<DatabaseOptions>) -> Self {
		let database = match options {
			Some(options) => client.database_with_options(database_name, options),
			None => client.database(database_name),
		};

		Self {
			client,
			database,
			ordered_inserts: true,
		}
	}

	/// Create a builder for configuring the driver
	pub fn builder(client: &'a Client) -> MongoFixtureDriverBuilder<'a> {
		MongoFixtureDriverBuilder::new(client)
	}

	/// The client this driver borrows.
	pub fn client(&self) -> &'a Client {
		self.client
	}

	/// The database fixtures are written to.
	pub fn database(&self) -> &Database {
		&self.database
	}

	/// Name of the database fixtures are written to.
	pub fn database_name(&self) -> &str {
		self.database.name()
	}

	/// Whether bulk inserts stop at the first rejected document.
	pub fn ordered_inserts(&self) -> bool {
		self.ordered_inserts
	}

	async fn drop_collection(&self, collection_name: &str) -> FixtureResult<()> {
		match self
			.database
			.collection::<Document>(collection_name)
			.drop()
			.await
		{
			Ok(()) => {}
			// The driver already treats NamespaceNotFound on drop as success; kept as a guard
			Err(err) if is_namespace_not_found(&err) => {}
			Err(source) => {
				return Err(FixtureError::Truncate {
					collection: collection_name.to_string(),
					source,
				});
			}
		}

		debug!(
			database = self.database_name(),
			collection = collection_name,
			"Dropped fixture collection"
		);
		Ok(())
	}
}

#[async_trait]
impl<'a> StorageDriver for MongoFixtureDriver<'a> {
	async fn truncate(&self, collection_names: &[String]) -> FixtureResult<()> {
		for_each_collection(collection_names, |name| self.drop_collection(name)).await
	}

	async fn insert_fixtures(
		&self,
		collection_name: &str,
		fixtures: Vec<Document>,
	) -> FixtureResult<()> {
		// insertMany rejects an empty batch
		if fixtures.is_empty() {
			debug!(
				database = self.database_name(),
				collection = collection_name,
				"No fixtures to insert"
			);
			return Ok(());
		}

		let count = fixtures.len();
		let mut options = InsertManyOptions::default();
		options.ordered = Some(self.ordered_inserts);

		self.database
			.collection::<Document>(collection_name)
			.insert_many(fixtures)
			.with_options(options)
			.await
			.map_err(|source| FixtureError::Insert {
				collection: collection_name.to_string(),
				count,
				source,
			})?;

		debug!(
			database = self.database_name(),
			collection = collection_name,
			count,
			"Inserted fixtures"
		);
		Ok(())
	}

	async fn close(&self) -> FixtureResult<()> {
		// The client belongs to the caller and may be shared
		Ok(())
	}
}

/// Builder for configuring a [`MongoFixtureDriver`]
///
/// # Example
///
/// ```rust,no_run
/// use dbfixtures_mongodb::MongoFixtureDriver;
/// use mongodb::Client;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let driver = MongoFixtureDriver::builder(&client)
///     .database("app_test")
///     .ordered_inserts(false)
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MongoFixtureDriverBuilder<'a> {
	client: &'a Client,
	database: String,
	database_options: Option<DatabaseOptions>,
	ordered_inserts: bool,
}

impl<'a> MongoFixtureDriverBuilder<'a> {
	/// Create a new builder with default settings
	///
	/// Defaults to the `test` database, no database options and ordered
	/// inserts.
	pub fn new(client: &'a Client) -> Self {
		Self {
			client,
			database: "test".to_string(),
			database_options: None,
			ordered_inserts: true,
		}
	}

	/// Set the database name
	pub fn database(mut self, database: impl Into<String>) -> Self {
		self.database = database.into();
		self
	}

	/// Set read concern, write concern and selection criteria for the database
	pub fn database_options(mut self, options: DatabaseOptions) -> Self {
		self.database_options = Some(options);
		self
	}

	/// Set whether bulk inserts stop at the first rejected document
	///
	/// With unordered inserts the server keeps inserting the remaining
	/// documents and reports every failure at the end.
	pub fn ordered_inserts(mut self, ordered: bool) -> Self {
		self.ordered_inserts = ordered;
		self
	}

	/// Build the driver
	pub fn build(self) -> MongoFixtureDriver<'a> {
		let mut driver = MongoFixtureDriver::new(self.client, &self.database, self.database_options);
		driver.ordered_inserts = self.ordered_inserts;
		driver
	}
}
