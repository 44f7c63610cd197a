//! Console configuration
//!
//! Every option can come from a flag or an environment variable (a `.env`
//! file is loaded first):
//!
//! | Environment variable | Default | Meaning |
//! |----------|--------|------|
//! | MESA_API_URL | http://127.0.0.1:5000 | Reservation service base URL |
//! | MESA_REQUEST_TIMEOUT_SECS | (none) | Opt-in per-request timeout; unset or 0 waits indefinitely |
//! | MESA_LOG_DIR | ./logs | Directory for the daily log file |
//! | MESA_TICK_MS | 100 | Input poll interval |

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mesa_client::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Parser, Debug, Clone)]
#[command(name = "mesa-console")]
#[command(about = "Terminal administration console for restaurants and reservations")]
pub struct Args {
    /// Reservation service base URL
    #[arg(long, env = "MESA_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds; no timeout when unset
    #[arg(long, env = "MESA_REQUEST_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, env = "MESA_LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,

    /// Input poll interval in milliseconds
    #[arg(long, env = "MESA_TICK_MS", default_value_t = 100)]
    pub tick_ms: u64,
}

/// Resolved console settings
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub timeout_secs: Option<u64>,
    pub log_dir: PathBuf,
    pub tick: Duration,
}

impl ConsoleConfig {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

impl From<Args> for ConsoleConfig {
    fn from(args: Args) -> Self {
        Self {
            api_url: args.api_url.trim_end_matches('/').to_string(),
            timeout_secs: args.timeout_secs.filter(|s| *s > 0),
            log_dir: args.log_dir,
            tick: Duration::from_millis(args.tick_ms.max(10)),
        }
    }
}
