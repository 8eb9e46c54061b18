use crate::signaling::DEFAULT_MAX_MESSAGE_SIZE;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Command-line and environment configuration of the relay.
#[derive(Debug, Clone, Parser)]
#[command(name = "huddle-relay", version, about = "WebRTC signaling relay")]
pub struct RelayConfig {
    /// Address to listen on.
    #[arg(long, env = "HUDDLE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "HUDDLE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Largest accepted WebSocket message, in bytes.
    #[arg(long, env = "HUDDLE_MAX_MESSAGE_SIZE", default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    pub max_message_size: usize,

    /// Tracing filter used when RUST_LOG is not set.
    #[arg(long, env = "HUDDLE_LOG", default_value = "info")]
    pub log: String,
}

impl RelayConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn log_filter(&self) -> Result<EnvFilter, ParseError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.log),
        }
    }
}
