use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{invalid_config_error, Error};

pub const DEFAULT_AMAP_API_BASE: &str = "restapi.amap.com";
pub const DEFAULT_TRANSIT_CITY: &str = "010";
pub const DEFAULT_HISTORY_DIR: &str = "./history";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub amap_api_base: String,
    pub amap_api_key: String,
    /// City code transit routes are planned in.
    pub transit_city: String,
    pub history_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let bind_addr = env_or("WAYFARER_BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|_| invalid_config_error("WAYFARER_BIND_ADDR"))?;

        Ok(Self {
            amap_api_base: env_or("AMAP_API_BASE", DEFAULT_AMAP_API_BASE),
            amap_api_key: env::var("AMAP_API_KEY")?,
            transit_city: env_or("AMAP_TRANSIT_CITY", DEFAULT_TRANSIT_CITY),
            history_dir: env_or("WAYFARER_HISTORY_DIR", DEFAULT_HISTORY_DIR).into(),
            bind_addr,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
