//! glassmemo library
//!
//! Data core for a single-user memo application: folders, notes with
//! soft-delete (trash), pinning, search/sort/group projections, image
//! attachments, and a simulated AI assistant. The presentation layer is
//! an external consumer of this crate.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod query;
pub mod services;
pub mod storage;
