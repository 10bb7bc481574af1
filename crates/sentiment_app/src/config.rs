//! Service configuration, read from a RON file.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```ron
//! (
//!     port: 8080,
//!     model_path: "models/sentiment_classifier.json",
//!     names_paths: ["corpora/names/male.txt", "corpora/names/female.txt"],
//!     log: (destination: Both, level: "debug"),
//! )
//! ```

use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use engine_logging::LogDestination;
use log::LevelFilter;
use sentiment_engine::{CorpusPaths, ServerSettings};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "sentiment.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    File,
    #[default]
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogTarget,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogTarget::Terminal,
            level: "info".to_string(),
            file: PathBuf::from("sentiment.log"),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        engine_logging::parse_level(&self.level)
            .ok_or_else(|| anyhow!("unknown log level {:?}", self.level))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub names_paths: Vec<PathBuf>,
    pub stopwords_path: Option<PathBuf>,
    pub max_body_bytes: usize,
    pub log: LogConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let server = ServerSettings::default();
        Self {
            host: server.addr.ip().to_string(),
            port: server.addr.port(),
            model_path: PathBuf::from("sentiment_classifier.json"),
            names_paths: Vec::new(),
            stopwords_path: None,
            max_body_bytes: server.max_body_bytes,
            log: LogConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Loads `explicit` (which must exist), else `./sentiment.ron` if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::read(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        Self::from_ron(&content).with_context(|| format!("failed to parse config {:?}", path))
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn server_settings(&self) -> Result<ServerSettings> {
        let addr: SocketAddr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))?
            .next()
            .ok_or_else(|| anyhow!("{}:{} resolved to no address", self.host, self.port))?;
        Ok(ServerSettings {
            addr,
            max_body_bytes: self.max_body_bytes,
        })
    }

    pub fn corpus_paths(&self) -> CorpusPaths {
        CorpusPaths {
            stopwords: self.stopwords_path.clone(),
            names: self.names_paths.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces_port_5000() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.model_path, PathBuf::from("sentiment_classifier.json"));
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(
            config.server_settings().unwrap().addr,
            "0.0.0.0:5000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ServiceConfig::from_ron(
            r#"(
                port: 8080,
                names_paths: ["male.txt", "female.txt"],
                stopwords_path: Some("stop.txt"),
                log: (destination: Both),
            )"#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log.destination, LogTarget::Both);
        assert_eq!(config.log.level, "info");
        let paths = config.corpus_paths();
        assert_eq!(paths.names, vec![PathBuf::from("male.txt"), PathBuf::from("female.txt")]);
        assert_eq!(paths.stopwords, Some(PathBuf::from("stop.txt")));
    }

    #[test]
    fn unknown_level_and_bad_syntax_are_errors() {
        let config = ServiceConfig::from_ron(r#"(log: (level: "chatty"))"#).unwrap();
        assert!(config.log.level_filter().is_err());
        assert!(ServiceConfig::from_ron("(port: \"eighty\")").is_err());
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("missing.ron");
        assert!(ServiceConfig::load(Some(&missing)).is_err());

        let present = temp.path().join("service.ron");
        fs::write(&present, "(host: \"127.0.0.1\", port: 0)").unwrap();
        let config = ServiceConfig::load(Some(&present)).unwrap();
        assert_eq!(
            config.server_settings().unwrap().addr,
            "127.0.0.1:0".parse::<SocketAddr>().unwrap()
        );
    }
}
