use std::env;
use std::path::PathBuf;

/// Public mock endpoint the directory is published at.
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Where the practitioner directory is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryLocation {
    Url(String),
    File(PathBuf),
}

impl DirectoryLocation {
    /// `http://` and `https://` values are fetched over the network, anything else is a path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            DirectoryLocation::Url(value.to_string())
        } else {
            DirectoryLocation::File(PathBuf::from(value))
        }
    }
}

impl std::fmt::Display for DirectoryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryLocation::Url(url) => f.write_str(url),
            DirectoryLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub directory: DirectoryLocation,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let directory = env::var("DIRECTORY_SOURCE")
            .map(|v| DirectoryLocation::parse(&v))
            .unwrap_or_else(|_| DirectoryLocation::Url(DEFAULT_DIRECTORY_URL.to_string()));

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| format!("Invalid SERVER_PORT: {}", e))?;

        Ok(Config {
            directory,
            server_host,
            server_port,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
