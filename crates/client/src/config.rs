//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use funeral_runtime::RuntimeConfig;

/// Everything the binary needs before it can start the runtime.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Names the per-session log directory (default: timestamp based).
    pub session_id: Option<String>,
    /// Overrides the platform cache directory for logs.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CYBERRIP_FRAME_RATE` - Movement ticks per second (default: 60)
    /// - `CYBERRIP_GATEWAY_TIMEOUT_MS` - Text generation limit in ms (default: 10000)
    /// - `CYBERRIP_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `CYBERRIP_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `CYBERRIP_SEED_OPENING` - Queue the opening ceremony (default: true)
    /// - `CYBERRIP_SESSION_ID` - Session identifier for log files
    /// - `CYBERRIP_LOG_DIR` - Directory for log files (default: platform cache dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rate) = read_env::<u32>("CYBERRIP_FRAME_RATE") {
            config.runtime.frame_rate = rate.max(1);
        }
        if let Some(millis) = read_env::<u64>("CYBERRIP_GATEWAY_TIMEOUT_MS") {
            config.runtime.gateway_timeout = Duration::from_millis(millis);
        }
        if let Some(capacity) = read_env::<usize>("CYBERRIP_EVENT_BUFFER") {
            config.runtime.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("CYBERRIP_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }
        if let Some(seed) = read_env_bool("CYBERRIP_SEED_OPENING") {
            config.runtime.seed_opening_ceremony = seed;
        }

        config.session_id = env::var("CYBERRIP_SESSION_ID").ok();
        config.log_dir = env::var("CYBERRIP_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_flags_accept_common_spellings() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn defaults_match_runtime_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.runtime.frame_rate, RuntimeConfig::DEFAULT_FRAME_RATE);
        assert!(config.runtime.seed_opening_ceremony);
        assert!(config.session_id.is_none());
    }
}
