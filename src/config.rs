use crate::error::{Result, SmartCareError};
use std::env;
use std::path::PathBuf;

/// Runtime configuration, read from the environment with `.env` support.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST root of the hosted backend (collection names are appended).
    pub api_url: String,
    /// API key, sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Directory for the local session/balance cache.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = env::var("SMARTCARE_API_URL")
            .map_err(|_| SmartCareError::Config("SMARTCARE_API_URL is not set".to_string()))?;
        let api_key = env::var("SMARTCARE_API_KEY")
            .map_err(|_| SmartCareError::Config("SMARTCARE_API_KEY is not set".to_string()))?;
        let data_dir = env::var("SMARTCARE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".smartcare"));

        Ok(Self {
            api_url,
            api_key,
            data_dir,
        })
    }
}
