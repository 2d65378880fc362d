pub mod bill;
pub mod config;
pub mod demographics;
pub mod report;
pub mod scoring;
