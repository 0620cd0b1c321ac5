//! Configuration module for fintrack
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinTrackPaths;
pub use settings::Settings;
