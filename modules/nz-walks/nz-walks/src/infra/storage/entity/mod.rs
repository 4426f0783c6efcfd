pub mod difficulty;
pub mod image;
pub mod region;
pub mod walk;
