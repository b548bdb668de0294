// Configuration source module
// Layers built-in defaults, an optional JSON side file and environment overrides

use std::path::PathBuf;

use super::types::{
    Config, DEFAULT_DOMAIN, DEFAULT_HOST, DEFAULT_NAME, DEFAULT_PORT, DEFAULT_SUB_PATH,
    DEFAULT_UUID, DEFAULT_XPATH,
};
use super::validate::validate_config;
use super::ConfigError;

/// Side file used when no path is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable naming a required side file
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Source name that skips the side file entirely
pub const NO_CONFIG_FILE: &str = "none";

/// Environment variables and the config keys they override
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("UUID", "uuid"),
    ("SUB_PATH", "sub_path"),
    ("XPATH", "xpath"),
    ("DOMAIN", "domain"),
    ("NAME", "name"),
    ("PORT", "port"),
    ("HOST", "host"),
    ("WORKERS", "workers"),
    ("LOG_LEVEL", "logging.level"),
    ("ACCESS_LOG", "logging.access_log"),
    ("ACCESS_LOG_FORMAT", "logging.access_log_format"),
    ("ACCESS_LOG_FILE", "logging.access_log_file"),
    ("ERROR_LOG_FILE", "logging.error_log_file"),
];

/// Where defaults come from before environment overrides are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults only
    Builtin,
    /// Built-in defaults overlaid with a JSON file
    File { path: PathBuf, required: bool },
}

impl ConfigSource {
    /// Pick the source from the command line and environment.
    ///
    /// An explicit path (first argument, then `CONFIG_FILE`) must exist;
    /// otherwise `config.json` in the working directory is used if present.
    /// `none` selects built-in defaults and environment only.
    pub fn detect(arg: Option<String>, env: impl Fn(&str) -> Option<String>) -> Self {
        let explicit = arg
            .or_else(|| env(CONFIG_FILE_ENV))
            .filter(|value| !value.is_empty());
        match explicit {
            Some(name) if name.eq_ignore_ascii_case(NO_CONFIG_FILE) => Self::Builtin,
            Some(path) => Self::File {
                path: PathBuf::from(path),
                required: true,
            },
            None => Self::File {
                path: PathBuf::from(DEFAULT_CONFIG_FILE),
                required: false,
            },
        }
    }
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        Self::resolve(source, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with an injected environment lookup.
    ///
    /// Precedence: environment, then side file, then built-in defaults.
    /// Variables that are set but empty do not override.
    pub fn resolve(
        source: &ConfigSource,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("uuid", DEFAULT_UUID)?
            .set_default("sub_path", DEFAULT_SUB_PATH)?
            .set_default("xpath", DEFAULT_XPATH)?
            .set_default("domain", DEFAULT_DOMAIN)?
            .set_default("name", DEFAULT_NAME)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("host", DEFAULT_HOST)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?;

        if let ConfigSource::File { path, required } = source {
            builder = builder.add_source(
                config::File::from(path.clone())
                    .format(config::FileFormat::Json)
                    .required(*required),
            );
        }

        for &(var, key) in ENV_OVERRIDES {
            let value = env(var).filter(|value| !value.is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        validate_config(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn json_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_defaults() {
        let config = Config::resolve(&ConfigSource::Builtin, env_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let env = env_from(&[
            ("UUID", "11111111-2222-3333-4444-555555555555"),
            ("SUB_PATH", "feed"),
            ("XPATH", "tunnel"),
            ("DOMAIN", "node.example.com"),
            ("NAME", "Edge"),
            ("PORT", "8443"),
            ("ACCESS_LOG", "false"),
            ("WORKERS", "2"),
        ]);
        let config = Config::resolve(&ConfigSource::Builtin, env).unwrap();
        assert_eq!(config.uuid, "11111111-2222-3333-4444-555555555555");
        assert_eq!(config.sub_path, "feed");
        assert_eq!(config.xpath, "tunnel");
        assert_eq!(config.domain, "node.example.com");
        assert_eq!(config.name, "Edge");
        assert_eq!(config.port, 8443);
        assert_eq!(config.workers, Some(2));
        assert!(!config.logging.access_log);
    }

    #[test]
    fn test_empty_env_falls_back() {
        let env = env_from(&[("PORT", ""), ("UUID", ""), ("DOMAIN", ""), ("NAME", "")]);
        let config = Config::resolve(&ConfigSource::Builtin, env).unwrap();
        assert_eq!(config, Config::default());

        let file = json_file(r#"{ "port": 4000, "name": "From-File" }"#);
        let source = ConfigSource::File {
            path: file.path().to_path_buf(),
            required: true,
        };
        let config = Config::resolve(&source, env_from(&[("PORT", ""), ("NAME", "")])).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.name, "From-File");
    }

    #[test]
    fn test_unparseable_port() {
        let result = Config::resolve(&ConfigSource::Builtin, env_from(&[("PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::Load(_))));

        let result = Config::resolve(&ConfigSource::Builtin, env_from(&[("PORT", "70000")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_uuid_is_fatal() {
        let result = Config::resolve(&ConfigSource::Builtin, env_from(&[("UUID", "not-a-uuid")]));
        assert!(matches!(result, Err(ConfigError::Identity(_))));
    }

    #[test]
    fn test_file_then_env_precedence() {
        let file = json_file(
            r#"{
                "UUID": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee",
                "SUB_PATH": "from-file",
                "DOMAIN": "file.example.com",
                "port": 4000,
                "logging": { "access_log_format": "json" }
            }"#,
        );
        let source = ConfigSource::File {
            path: file.path().to_path_buf(),
            required: true,
        };

        let config = Config::resolve(&source, env_from(&[("DOMAIN", "env.example.com")])).unwrap();
        assert_eq!(config.uuid, "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee");
        assert_eq!(config.sub_path, "from-file");
        assert_eq!(config.domain, "env.example.com");
        assert_eq!(config.port, 4000);
        assert_eq!(config.xpath, DEFAULT_XPATH);
        assert_eq!(config.logging.access_log_format, "json");
        // Nested tables merge key by key
        assert!(config.logging.access_log);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_required_file_missing() {
        let source = ConfigSource::File {
            path: PathBuf::from("/nonexistent/vless-node/config.json"),
            required: true,
        };
        assert!(Config::resolve(&source, env_from(&[])).is_err());
    }

    #[test]
    fn test_optional_file_missing() {
        let source = ConfigSource::File {
            path: PathBuf::from("/nonexistent/vless-node/config.json"),
            required: false,
        };
        let config = Config::resolve(&source, env_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file() {
        let file = json_file("{ \"uuid\": ");
        let source = ConfigSource::File {
            path: file.path().to_path_buf(),
            required: false,
        };
        assert!(matches!(
            Config::resolve(&source, env_from(&[])),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_detect_source() {
        let none = env_from(&[]);
        assert_eq!(
            ConfigSource::detect(None, &none),
            ConfigSource::File {
                path: PathBuf::from(DEFAULT_CONFIG_FILE),
                required: false,
            }
        );

        let env = env_from(&[(CONFIG_FILE_ENV, "/etc/node.json")]);
        assert_eq!(
            ConfigSource::detect(None, &env),
            ConfigSource::File {
                path: PathBuf::from("/etc/node.json"),
                required: true,
            }
        );
        assert_eq!(
            ConfigSource::detect(Some("local.json".to_string()), &env),
            ConfigSource::File {
                path: PathBuf::from("local.json"),
                required: true,
            }
        );
    }

    #[test]
    fn test_detect_builtin() {
        let env = env_from(&[(CONFIG_FILE_ENV, "none")]);
        assert_eq!(ConfigSource::detect(None, &env), ConfigSource::Builtin);
        assert_eq!(
            ConfigSource::detect(Some("NONE".to_string()), env_from(&[])),
            ConfigSource::Builtin
        );

        let empty = env_from(&[(CONFIG_FILE_ENV, "")]);
        assert_eq!(
            ConfigSource::detect(None, &empty),
            ConfigSource::File {
                path: PathBuf::from(DEFAULT_CONFIG_FILE),
                required: false,
            }
        );
    }
}
