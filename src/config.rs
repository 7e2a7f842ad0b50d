use std::{env, path::PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/checklist.csv";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub port: u16,
    /// Serve the welcome page at `/` instead of going straight to the form.
    pub landing_page: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            landing_page: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let landing_page = lookup("APP_LANDING")
            .map(|value| {
                !matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "0" | "false" | "off" | "no"
                )
            })
            .unwrap_or(defaults.landing_page);

        Self {
            data_path,
            port,
            landing_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_path, PathBuf::from("data/checklist.csv"));
        assert!(config.landing_page);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_DATA_PATH", "/tmp/x.csv"),
            ("PORT", "9000"),
            ("APP_LANDING", "off"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/tmp/x.csv"));
        assert_eq!(config.port, 9000);
        assert!(!config.landing_page);
    }

    #[test]
    fn bad_port_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "http")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
