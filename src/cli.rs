use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Command-line flags. Anything given here wins over config.yml and the environment.
#[derive(Parser, Debug, Default)]
#[command(
    name = "castweb",
    version,
    about = "Browse a .strm/.nfo video tree in the browser and cast it to a TV",
    long_about = None,
)]
pub struct Cli {
    /// Root directory containing the .strm/.nfo hierarchy
    #[arg(value_name = "ROOT")]
    pub root_arg: Option<PathBuf>,

    /// Root directory (takes precedence over the positional ROOT)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to config.yml
    #[arg(short, long)]
    pub config: Option<String>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// ytcast device id to cast to
    #[arg(long = "ytcast")]
    pub ytcast_device: Option<String>,

    /// Directory for persistent state (state.json)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Endpoint SVT Play URLs are forwarded to
    #[arg(long)]
    pub svtplay_endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config
    pub fn apply(self, config: &mut Config) {
        if let Some(root) = self.root.or(self.root_arg) {
            config.library_path = root;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(device) = self.ytcast_device.filter(|d| !d.is_empty()) {
            config.ytcast_device = Some(device);
        }
        if let Some(state) = self.state {
            config.state_path = state;
        }
        if let Some(endpoint) = self.svtplay_endpoint.filter(|e| !e.is_empty()) {
            config.svtplay_endpoint = Some(endpoint);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}
