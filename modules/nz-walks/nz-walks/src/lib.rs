//! NZ Walks Module
//!
//! CRUD over regions and walks, a read-only difficulty lookup, and image
//! uploads, exposed over REST. Walk listings support filtering, sorting and
//! paging through a closed field allow-list.
//!
//! ## Public API
//!
//! Data models live in `nz-walks-sdk` and are re-exported here. The server
//! binary only needs [`NzWalks`] and [`NzWalksConfig`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use nz_walks_sdk::{
    Difficulty, Image, NewRegion, NewWalk, Region, RegionUpdate, Walk, WalkQuery, WalkUpdate,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::NzWalks;

pub mod config;
pub use config::NzWalksConfig;

// === INTERNAL MODULES ===
// Exposed for integration tests; use the SDK types for stable APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
