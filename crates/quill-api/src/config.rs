use serde::Deserialize;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "QUILL_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Config {
    /// Overlays environment values onto the file config.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::info!("{API_URL_ENV} overrides api.base_url");
            self.api.base_url = url.trim().to_string();
        }
        self
    }
}

pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

pub fn load(path: &str) -> Config {
    let fromFile = match std::fs::read_to_string(path) {
        Ok(contents) => match parse(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to parse config {path}: {e}, using defaults");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read config {path}: {e}, using defaults");
            Config::default()
        }
    };
    fromFile.apply_env(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config = parse(
            r#"
            [server]
            bind = "127.0.0.1"
            port = 8080

            [api]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = parse("[server]\nbind = \"::1\"\nport = 3001\n").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn env_overrides_base_url() {
        let config = Config::default().apply_env(|key| {
            (key == API_URL_ENV).then(|| " https://blog.example.com ".to_string())
        });
        assert_eq!(config.api.base_url, "https://blog.example.com");
    }

    #[test]
    fn blank_env_is_ignored() {
        let config = Config::default().apply_env(|_| Some("  ".into()));
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn unreadable_file_falls_back() {
        let config = load("/nonexistent/quill.toml");
        assert_eq!(config.server, ServerConfig::default());
    }
}
