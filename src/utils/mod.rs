// src/utils/mod.rs

pub mod config;

pub use config::PipelineConfig;
