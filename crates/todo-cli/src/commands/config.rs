//! Config command handler

use std::path::PathBuf;

use todo_core::Config;

use crate::output::{Output, OutputFormat};

/// Show the effective configuration
pub fn show(config: &Config, config_path: &PathBuf, output: &Output) {
    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": config.api_url,
                    "listen_addr": config.listen_addr,
                    "data_dir": config.data_dir,
                    "request_timeout_secs": config.request_timeout_secs,
                    "config_file": config_path,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.api_url);
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  api_url:              {}", config.api_url);
            println!("  listen_addr:          {}", config.listen_addr);
            println!("  data_dir:             {}", config.data_dir.display());
            println!(
                "  request_timeout_secs: {}",
                config
                    .request_timeout_secs
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", config_path.display());
        }
    }
}
