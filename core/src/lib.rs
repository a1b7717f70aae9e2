//! This crate implements the core model for locating a git metadata
//! directory and for the keyed record store that lives inside it.
//!
//! Neither half talks to the operating system directly. Path discovery
//! goes through a [`discover::PathProbe`] and record storage goes through
//! a [`kv::StoreFs`], so each can be backed by the local file system, by
//! memory, or by anything else that can answer those questions.

#![deny(warnings)]

mod config;
pub use config::{StoreConfig, DEFAULT_STORE_DIR};

pub mod discover;

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod kv;
