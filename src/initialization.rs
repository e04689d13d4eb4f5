use std::fs::read_to_string;
use serde::Deserialize;
use crate::errors::UnrecoverableError;

const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Clone)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct Files {
    pub data_file: String,
    pub static_dir: String,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub web_server: WebServer,
    pub files: Files,
}

/// Returns the configuration as read from the config file
///
/// Any failure while reading or parsing the file is unrecoverable since
/// the server cannot start without it
pub fn config() -> Result<Config, UnrecoverableError> {
    let content = read_to_string(CONFIG_FILE)?;
    let config: Config = toml::from_str(&content)?;

    Ok(config)
}
