#[cfg(feature = "cli")]
pub mod cli;
pub mod domain_map;
pub mod server_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "subgen")]
#[command(about = "Generate client subscription links from a proxy server config")]
pub struct CliConfig {
    #[arg(long, default_value = "data/config.json", help = "Path to the server config.json file")]
    pub config_file: String,

    #[arg(long, default_value = "data/domain-map.json", help = "Path to the domain-map.json file")]
    pub domain_map_file: String,

    #[arg(long, default_value = "data/subs", help = "Directory to save subscriptions into")]
    pub save_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn config_path(&self) -> &str {
        &self.config_file
    }

    fn domain_map_path(&self) -> &str {
        &self.domain_map_file
    }

    fn output_path(&self) -> &str {
        &self.save_dir
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config_file", &self.config_file)?;
        validate_path("domain_map_file", &self.domain_map_file)?;
        validate_path("save_dir", &self.save_dir)?;
        validate_file_extensions(
            "config_file",
            std::slice::from_ref(&self.config_file),
            &["json"],
        )?;
        validate_file_extensions(
            "domain_map_file",
            std::slice::from_ref(&self.domain_map_file),
            &["json"],
        )?;
        Ok(())
    }
}
