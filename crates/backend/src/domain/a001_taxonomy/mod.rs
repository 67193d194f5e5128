pub mod country_language;
pub mod repository;
pub mod seed;
pub mod service;
