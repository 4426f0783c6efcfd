mod difficulties_repo;
mod image_store;
mod images_repo;
mod regions_repo;
mod walks_repo;

pub use difficulties_repo::DifficultiesRepository;
pub use image_store::{ImageStore, StoredFile};
pub use images_repo::ImagesRepository;
pub use regions_repo::RegionsRepository;
pub use walks_repo::WalksRepository;
