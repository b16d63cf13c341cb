pub mod config;
pub mod day;
pub mod export;
pub mod month;
