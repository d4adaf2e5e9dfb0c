//! Configuration module for the SEO analyzer
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and applying the `PORT` environment override.
//! Fetch limits are fixed and live in [`crate::analyzer::FetchOptions`].
//!
//! # Example
//!
//! ```no_run
//! use seo_analyzer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-analyzer.toml")).unwrap();
//! println!("Listening on port {}", config.server.port);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ServerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{
    apply_port_override, compute_config_hash, load_config, load_config_with_hash,
    load_runtime_config, PORT_ENV_VAR,
};
