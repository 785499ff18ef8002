pub mod assignment;
pub mod models;
