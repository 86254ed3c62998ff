//! Shared fixtures for spawnkit-projects integration tests
//!
//! - `fixtures`: temporary directories, occupied targets, snapshot tarballs
//! - `mock_server`: wiremock endpoints for choices and snapshots

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mock_server;

pub use fixtures::*;
pub use mock_server::*;
