pub mod photo_repository;
pub mod repository;
pub mod service;
