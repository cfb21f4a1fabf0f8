use std::{collections::HashMap, fs};

use console_core::list::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "https://127.0.0.1:9443".into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Precedence: built-in defaults, then `console.toml`, then environment
/// variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = normalize_server_url(v);
            }
            if let Some(v) = file_cfg.get("page_size") {
                if let Ok(parsed) = v.parse::<usize>() {
                    if parsed > 0 {
                        settings.page_size = parsed;
                    }
                }
            }
        }
    }

    if let Ok(v) = std::env::var("CONSOLE_SERVER_URL") {
        settings.server_url = normalize_server_url(&v);
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = normalize_server_url(&v);
    }

    if let Ok(v) = std::env::var("CONSOLE_PAGE_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            if parsed > 0 {
                settings.page_size = parsed;
            }
        }
    }

    settings
}

pub fn normalize_server_url(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches('/');

    if raw.is_empty() {
        return Settings::default().server_url;
    }

    if raw.contains("://") {
        return raw.to_string();
    }

    format!("https://{raw}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_bare_host_to_https_url() {
        assert_eq!(
            normalize_server_url("idp.example.com:9443"),
            "https://idp.example.com:9443"
        );
    }

    #[test]
    fn keeps_explicit_scheme_and_strips_trailing_slash() {
        assert_eq!(
            normalize_server_url("http://127.0.0.1:9443/"),
            "http://127.0.0.1:9443"
        );
    }

    #[test]
    fn empty_url_falls_back_to_the_default() {
        assert_eq!(normalize_server_url("  "), Settings::default().server_url);
    }

    #[test]
    fn environment_overrides_the_defaults() {
        std::env::set_var("CONSOLE_SERVER_URL", "console.example.com");
        std::env::set_var("CONSOLE_PAGE_SIZE", "25");

        let settings = load_settings();
        assert_eq!(settings.server_url, "https://console.example.com");
        assert_eq!(settings.page_size, 25);

        std::env::remove_var("CONSOLE_SERVER_URL");
        std::env::remove_var("CONSOLE_PAGE_SIZE");
    }
}
