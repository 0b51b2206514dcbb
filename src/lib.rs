pub mod config;
pub mod content;
pub mod core;
pub mod error;
pub mod generation;
pub mod models;
pub mod planning;
pub mod report;
pub mod settings;
#[cfg(test)]
pub mod test_helpers;
