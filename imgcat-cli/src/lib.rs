// ABOUTME: Library exports for imgcat CLI modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests

pub mod cli;
pub mod cli_output;
pub mod completions;
pub mod config;
pub mod constants;
pub mod input;
pub mod options;
pub mod output;
pub mod render;
pub mod sizing;
