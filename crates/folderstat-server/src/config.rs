//! Server configuration and shared request state.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use folderstat_core::IgnoreSet;
use folderstat_scan::UploadStager;
use strum::{Display, EnumString};

/// Which of the two services this process exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ServiceMode {
    /// Browser upload page plus `POST /analyze` taking multipart files.
    #[default]
    Upload,
    /// Liveness root plus `POST /analyze` taking a host path.
    Path,
}

/// Settings fixed at startup and handed to every request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,
    /// Service to expose.
    pub mode: ServiceMode,
    /// Path scanned when a path request names none.
    pub default_path: PathBuf,
    /// Directories pruned from path scans.
    pub ignore: IgnoreSet,
    /// Upper bound on a request body.
    pub max_upload_bytes: usize,
    /// Parent of upload staging roots (None = system temp dir).
    pub staging_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
            mode: ServiceMode::default(),
            default_path: PathBuf::from("/home"),
            ignore: IgnoreSet::default(),
            max_upload_bytes: 1024 * 1024 * 1024,
            staging_dir: None,
        }
    }
}

/// State shared by the handlers of one router.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub stager: UploadStager,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let stager = match &config.staging_dir {
            Some(dir) => UploadStager::in_dir(dir),
            None => UploadStager::new(),
        };
        Self { config, stager }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_parse() {
        assert_eq!(ServiceMode::from_str("upload").unwrap(), ServiceMode::Upload);
        assert_eq!(ServiceMode::from_str("PATH").unwrap(), ServiceMode::Path);
        assert!(ServiceMode::from_str("both").is_err());
        assert_eq!(ServiceMode::Path.to_string(), "path");
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.default_path, PathBuf::from("/home"));
        assert!(config.ignore.contains(".git"));
    }
}
