pub mod analysis;
pub mod coaching;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod riot;
