//! Process configuration from environment variables

use std::env;
use std::path::PathBuf;

/// Startup configuration, environment-provided with fixed fallbacks
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP listener binds to (`PORT`, default 3000)
    pub port: u16,
    /// Root directory for the object sink (`EVENT_MIRROR_PATH`,
    /// default `storage`)
    pub mirror_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| Self::default().port);

        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mirror_path = match env::var("EVENT_MIRROR_PATH") {
            Ok(path) => {
                let path = PathBuf::from(path);
                if path.is_absolute() {
                    path
                } else {
                    current_dir.join(path)
                }
            }
            Err(_) => current_dir.join(Self::default().mirror_path),
        };

        Self { port, mirror_path }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            mirror_path: PathBuf::from("storage"),
        }
    }
}
