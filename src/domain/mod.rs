pub mod collaborators;
pub mod error;
pub mod repository;
pub mod summary;
pub mod todo;
