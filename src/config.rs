use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_environment() -> String {
    "development".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StaticFilesConfig {
    #[serde(default = "default_static_root")]
    pub root: String,
    #[serde(default = "default_not_found_page")]
    pub not_found_page: String,
    /// Cache lifetime for non-HTML assets; HTML is never cached
    #[serde(default = "default_asset_max_age_secs")]
    pub asset_max_age_secs: u64,
}

fn default_static_root() -> String {
    "public".to_string()
}

fn default_not_found_page() -> String {
    "404.html".to_string()
}

fn default_asset_max_age_secs() -> u64 {
    24 * 60 * 60
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        StaticFilesConfig {
            root: default_static_root(),
            not_found_page: default_not_found_page(),
            asset_max_age_secs: default_asset_max_age_secs(),
        }
    }
}

/// Sliding-window limit applied per client to `/api/*`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    /// Key clients on `X-Forwarded-For`/`X-Real-IP`; only safe behind a reverse proxy
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

fn default_window_secs() -> u64 {
    15 * 60
}

fn default_max_requests() -> usize {
    100
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
            trust_proxy_headers: false,
        }
    }
}

/// Option lists the registration forms offer.
///
/// The validator only checks that a sector or relation was chosen; checking
/// that the choice is on these lists is left to the caller.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_sectors")]
    pub sectors: Vec<String>,
    #[serde(default = "default_relations")]
    pub relations: Vec<String>,
}

fn default_sectors() -> Vec<String> {
    vec!["Kibungo".to_string(), "Bumbogo".to_string()]
}

fn default_relations() -> Vec<String> {
    ["Spouse", "Child", "Parent", "Sibling", "Grandchild", "Other"]
        .iter()
        .map(|relation| relation.to_string())
        .collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            sectors: default_sectors(),
            relations: default_relations(),
        }
    }
}

impl CatalogConfig {
    pub fn contains_sector(&self, sector: &str) -> bool {
        contains_ignore_case(&self.sectors, sector)
    }

    pub fn contains_relation(&self, relation: &str) -> bool {
        contains_ignore_case(&self.relations, relation)
    }
}

fn contains_ignore_case(options: &[String], value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && options.iter().any(|option| option.eq_ignore_ascii_case(value))
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, String> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        // Expand environment variables in YAML content
        let expanded_content = Self::expand_env_vars(&content)?;

        let app_config: AppConfig = serde_yaml::from_str(&expanded_content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))?;

        app_config.check()?;

        Ok(app_config)
    }

    /// Defaults for running straight from a checkout: localhost:3000, ./public
    pub fn default_config() -> Self {
        AppConfig {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                environment: default_environment(),
            },
            static_files: StaticFilesConfig::default(),
            rate_limit: RateLimitConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case("development")
    }

    fn check(&self) -> Result<(), String> {
        if self.rate_limit.window_secs == 0 {
            return Err("rate_limit.window_secs must be greater than zero".to_string());
        }
        if self.rate_limit.max_requests == 0 {
            return Err("rate_limit.max_requests must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> Result<String, String> {
        let mut expanded = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find('}') else {
                // Unterminated reference: keep the remainder verbatim
                expanded.push_str(&rest[start..]);
                return Ok(expanded);
            };

            let var_expr = &after[..end];
            let (var_name, default_value) = match var_expr.split_once(":-") {
                Some((name, default)) => (name, Some(default)),
                None => (var_expr, None),
            };

            let value = match std::env::var(var_name) {
                Ok(val) => val,
                Err(_) => match default_value {
                    Some(default) => default.to_string(),
                    None => {
                        return Err(format!(
                            "Environment variable {} not found and no default provided",
                            var_name
                        ))
                    }
                },
            };

            expanded.push_str(&value);
            rest = &after[end + 1..];
        }

        expanded.push_str(rest);
        Ok(expanded)
    }
}
