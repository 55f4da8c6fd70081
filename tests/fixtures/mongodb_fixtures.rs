//! MongoDB Test Fixtures
//!
//! Reusable fixtures for the container-backed driver tests.

use bson::{Document, doc};
use mongodb::options::FindOptions;
use mongodb::{Client, Database};
use rstest::*;
use serde::{Deserialize, Serialize};
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Database every test seeds and inspects.
pub const TEST_DATABASE: &str = "fixtures_test";

/// Image tag used when `TEST_MONGODB_IMAGE_TAG` is not set.
const DEFAULT_IMAGE_TAG: &str = "7.0";

/// Shape of the documents used across tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDocument {
	pub name: String,
	pub age: i32,
}

impl TestDocument {
	pub fn new(name: &str, age: i32) -> Self {
		Self {
			name: name.to_string(),
			age,
		}
	}
}

/// A running MongoDB container and a client connected to it.
///
/// The container is stopped when this value is dropped.
pub struct MongoContext {
	_container: ContainerAsync<GenericImage>,
	pub client: Client,
}

impl MongoContext {
	pub fn database(&self) -> Database {
		self.client.database(TEST_DATABASE)
	}

	/// Inserts documents directly, bypassing the driver under test.
	pub async fn seed(&self, collection: &str, documents: Vec<Document>) {
		let result = self
			.database()
			.collection::<Document>(collection)
			.insert_many(documents.clone())
			.await
			.expect("Failed to seed collection");
		assert_eq!(result.inserted_ids.len(), documents.len());
	}

	pub async fn count(&self, collection: &str) -> u64 {
		self.database()
			.collection::<Document>(collection)
			.count_documents(doc! {})
			.await
			.expect("Failed to count documents")
	}

	/// Reads back a collection in insertion order.
	pub async fn read_all(&self, collection: &str) -> Vec<TestDocument> {
		use futures::stream::TryStreamExt;

		let mut options = FindOptions::default();
		options.sort = Some(doc! { "_id": 1 });

		self.database()
			.collection::<TestDocument>(collection)
			.find(doc! {})
			.with_options(options)
			.await
			.expect("Failed to query collection")
			.try_collect()
			.await
			.expect("Failed to read documents")
	}
}

pub fn image_tag() -> String {
	std::env::var("TEST_MONGODB_IMAGE_TAG").unwrap_or_else(|_| DEFAULT_IMAGE_TAG.to_string())
}

/// The MongoDB image the fixture starts, before wait and port settings.
pub fn mongo_image() -> GenericImage {
	GenericImage::new("mongo".to_string(), image_tag())
}

async fn try_start_mongodb_container()
-> Result<(ContainerAsync<GenericImage>, String), Box<dyn std::error::Error>> {
	let mongo = mongo_image()
		.with_exposed_port(27017.tcp())
		.with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
		.with_startup_timeout(std::time::Duration::from_secs(60))
		.start()
		.await?;

	let port = mongo.get_host_port_ipv4(27017).await?;
	let connection_string = format!("mongodb://127.0.0.1:{}", port);

	Ok((mongo, connection_string))
}

/// Fixture providing a MongoDB container and a connected client
///
/// Every test gets its own container, so the test database starts empty.
#[fixture]
pub async fn mongo() -> MongoContext {
	const MAX_RETRIES: u32 = 3;
	const RETRY_DELAY_MS: u64 = 2000;

	let mut last_error = None;

	for attempt in 0..MAX_RETRIES {
		match try_start_mongodb_container().await {
			Ok((container, url)) => {
				let client = Client::with_uri_str(&url)
					.await
					.expect("Failed to create MongoDB client");
				return MongoContext {
					_container: container,
					client,
				};
			}
			Err(e) => {
				eprintln!(
					"MongoDB container start attempt {} of {} failed: {:?}",
					attempt + 1,
					MAX_RETRIES,
					e
				);
				last_error = Some(e);

				if attempt < MAX_RETRIES - 1 {
					tokio::time::sleep(std::time::Duration::from_millis(RETRY_DELAY_MS)).await;
				}
			}
		}
	}

	panic!(
		"Failed to start MongoDB container after {} attempts: {:?}",
		MAX_RETRIES, last_error
	);
}
