// Library exports for the roster CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod storage;
pub mod ui;
