pub mod config;
pub mod db;
pub mod seed;
pub mod state;
pub mod storage;
pub mod store;
