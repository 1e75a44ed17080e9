use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret the cron trigger must send in the `x-cron-secret` header.
    /// When it is not set every reminder route is open.
    pub cron_secret: Option<String>,
    /// If set, the server runs a sweep on this cadence by itself in addition
    /// to the external trigger.
    pub sweep_interval_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = 5000;
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            Err(_) => default_port,
        };

        let cron_secret = match std::env::var("CRON_SECRET") {
            Ok(secret) if !secret.is_empty() => Some(secret),
            _ => {
                warn!("Did not find CRON_SECRET environment variable. The reminder routes will not be protected.");
                None
            }
        };

        let sweep_interval_secs = match std::env::var("SWEEP_INTERVAL_SECS") {
            Ok(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    info!("Reminder sweep will run every {} seconds.", secs);
                    Some(secs)
                }
                _ => {
                    warn!(
                        "The given SWEEP_INTERVAL_SECS: {} is not valid, the in-process sweep is disabled.",
                        secs
                    );
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            port,
            cron_secret,
            sweep_interval_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
