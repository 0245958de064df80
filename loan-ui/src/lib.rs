pub mod app;
pub mod commands;
pub mod config;
pub mod controller;
pub mod csv_export;
pub mod logging;
pub mod render;

pub use controller::FormController;
