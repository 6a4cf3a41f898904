use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub groq_api_key: String,
    pub groq_base_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        // A missing key is not fatal: the provider rejects the call and the
        // submission fails like any other generation error.
        let groq_api_key = match env::var("GROQ_API_KEY") {
            Ok(key) => key,
            Err(env::VarError::NotPresent) => {
                log::warn!("GROQ_API_KEY is not set; generation requests will fail");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        let groq_base_url = env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

        Ok(Config {
            server_addr: parse_addr(&host, &port)?,
            groq_api_key,
            groq_base_url: groq_base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn parse_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
    Ok(SocketAddr::new(ip, port))
}
