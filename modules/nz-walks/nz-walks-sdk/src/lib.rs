//! NZ Walks SDK
//!
//! This crate provides the transport-agnostic contract of the `nz-walks` module:
//! - Model types for regions, difficulties, walks and images
//! - The walk query vocabulary: the closed set of field names the listing
//!   endpoint accepts, sort direction, and the raw listing parameters
//!
//! ## Usage
//!
//! ```ignore
//! use nz_walks_sdk::{WalkField, WalkQuery};
//!
//! let query = WalkQuery {
//!     filter_on: Some("Name".to_owned()),
//!     filter_query: Some("track".to_owned()),
//!     ..WalkQuery::default()
//! };
//! assert_eq!(WalkField::parse("name"), Some(WalkField::Name));
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod models;
pub mod query;

pub use models::{
    Difficulty, Image, NewRegion, NewWalk, Region, RegionUpdate, Walk, WalkUpdate,
};
pub use query::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, SortDirection, WalkField, WalkQuery};
