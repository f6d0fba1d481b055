pub mod api;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod history;
pub mod overlay;
pub mod planner;
pub mod server;
