pub mod db;
pub mod entity;
pub mod mapper;
pub mod schema;

mod difficulties_sea_repo;
mod images_sea_repo;
mod regions_sea_repo;
mod walks_sea_repo;

pub use difficulties_sea_repo::OrmDifficultiesRepository;
pub use images_sea_repo::OrmImagesRepository;
pub use regions_sea_repo::OrmRegionsRepository;
pub use walks_sea_repo::OrmWalksRepository;
