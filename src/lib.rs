pub mod config;
pub mod export;
pub mod logger;
pub mod ui;
pub mod wizard;
