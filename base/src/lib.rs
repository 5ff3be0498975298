use loader_config::LoaderConfig;
use once_cell::sync::Lazy;

pub mod error;
pub mod loader_config;
pub mod logging;

pub static APP_NAME: &str = "procmodel";

pub static LOADER_CONFIG: Lazy<LoaderConfig> = Lazy::new(LoaderConfig::from_env);
