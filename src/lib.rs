pub mod args;
pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod page;
pub mod problem;
pub mod recorder;
pub mod scheduler;
pub mod stats;
pub mod tracker;
pub mod ui;
