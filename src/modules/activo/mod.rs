pub mod repository;
pub mod routes;
pub mod rules;
pub mod service;

pub use routes::get_router;
