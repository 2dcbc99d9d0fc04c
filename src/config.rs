use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BASE_URL: &str = "https://fer.link/";

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// `PORT` - listen port on all interfaces (default: 8080)
    pub port: u16,

    /// `BASE_URL` - prefix of returned short URLs, always ending in `/`
    /// (default: "https://fer.link/")
    pub base_url: String,
}

impl Config {
    /// Reads the configuration from the process environment, falling back to
    /// defaults for unset or unusable values.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("BASE_URL").ok())
    }

    fn from_vars(port: Option<String>, base_url: Option<String>) -> Self {
        let port = match port {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "invalid PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let mut base_url = base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self { port, base_url }
    }

    /// Socket address the server binds to
    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
