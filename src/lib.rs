//! CRUD user API backed by a single mutex-guarded JSON file.
//!
//! All state lives in one JSON document on disk. Every read and every
//! read-modify-write cycle goes through one exclusive lock
//! ([`store::JsonFile`]), so concurrent mutations serialize instead of
//! clobbering each other. On top of that sit a record repository
//! ([`repo::UserRepository`]), the business rules ([`service::UserService`]),
//! and an axum HTTP adapter ([`web`]).
//!
//! **Single-process only.** If multiple processes open the same file they
//! will clobber each other. Use advisory file locking or a real database for
//! multi-process access.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod persist;
pub mod repo;
pub mod service;
pub mod state;
pub mod store;
pub mod web;

pub use error::{Error, Result};
pub use store::{JsonFile, JsonFileBuilder};
