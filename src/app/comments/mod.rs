pub mod handler;
pub mod model;
pub mod service;
pub mod validation;

pub use handler::routes;
