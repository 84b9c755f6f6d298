// ABOUTME: Library exports for ghi CLI modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests

pub mod browse;
pub mod cli;
pub mod cli_output;
pub mod commands;
pub mod config;
pub mod git;
pub mod metadata;
pub mod output;
pub mod survey;
pub mod templates;
pub mod text;
