pub mod auth;
pub mod boundary;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod problem;
pub mod routes;

pub use routes::{ApiDoc, PublicUrl, RestOptions, build_router};
