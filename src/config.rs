use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Runtime configuration for the relay server.
#[derive(Debug, Clone, Parser)]
#[command(name = "stranger-relay")]
#[command(version, about = "Anonymous one-on-one matchmaking and signaling relay")]
pub struct Config {
    /// Address to bind the listener to.
    #[arg(long, env = "LISTEN_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Messages buffered per client before senders have to wait.
    #[arg(long, env = "OUTBOUND_CAPACITY", default_value_t = 64)]
    pub outbound_capacity: usize,

    /// How long a send may wait on a full client queue before that client
    /// is disconnected.
    #[arg(long, env = "SEND_TIMEOUT_MS", default_value_t = 5000)]
    pub send_timeout_ms: u64,

    /// Emit logs as JSON.
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::parse()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            outbound_capacity: 64,
            send_timeout_ms: 5000,
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.outbound_capacity, 64);
        assert_eq!(config.send_timeout(), Duration::from_secs(5));
        assert!(!config.log_json);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_args() {
        let config = Config::try_parse_from([
            "stranger-relay",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--outbound-capacity",
            "8",
            "--send-timeout-ms",
            "250",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.outbound_capacity, 8);
        assert_eq!(config.send_timeout(), Duration::from_millis(250));
        assert!(config.log_json);
    }

    #[test]
    fn test_with_port() {
        let config = Config::default().with_port(0);
        assert_eq!(config.port, 0);
    }
}
