//! Storage driver backends.
//!
//! - `mongodb`: MongoDB collections via the official async driver

pub mod mongodb;

pub use self::mongodb::{MongoFixtureDriver, MongoFixtureDriverBuilder};
