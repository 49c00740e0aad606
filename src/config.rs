//! Session Configuration
//!
//! Ports, shared secret, and peer address for one endpoint. Values can come
//! from the environment (`PACNET_*` variables) or be filled in directly.

use std::net::IpAddr;

/// Default reliable (TCP) port.
pub const DEFAULT_TCP_PORT: u16 = 5432;

/// Default unreliable (UDP) port, bound only after the handshake completes.
pub const DEFAULT_UDP_PORT: u16 = 5433;

/// Configuration for a [`Session`](crate::session::Session).
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Listening/connect port for the reliable channel.
    pub tcp_port: u16,
    /// Local bind port for the unreliable channel.
    pub udp_port: u16,
    /// Peer's unreliable port. `None` means the same well-known port as
    /// [`udp_port`](Self::udp_port); tests set it so two endpoints can share
    /// one host.
    pub peer_udp_port: Option<u16>,
    /// Shared secret exchanged during authentication.
    pub secret: String,
    /// Peer address (initiator role only).
    pub peer: Option<IpAddr>,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            tcp_port: DEFAULT_TCP_PORT,
            udp_port: DEFAULT_UDP_PORT,
            peer_udp_port: None,
            secret: String::new(),
            peer: None,
        }
    }
}

impl NetConfig {
    /// Create config from environment variables.
    ///
    /// `PACNET_TCP_PORT`, `PACNET_UDP_PORT`, `PACNET_SECRET`, `PACNET_PEER`.
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            tcp_port: env_port("PACNET_TCP_PORT", DEFAULT_TCP_PORT),
            udp_port: env_port("PACNET_UDP_PORT", DEFAULT_UDP_PORT),
            peer_udp_port: None,
            secret: std::env::var("PACNET_SECRET").unwrap_or_default(),
            peer: std::env::var("PACNET_PEER").ok().and_then(|v| v.parse().ok()),
        }
    }

    /// Port to address datagrams to on the peer host.
    pub fn peer_udp_port(&self) -> u16 {
        self.peer_udp_port.unwrap_or(self.udp_port)
    }
}

fn env_port(var: &str, default: u16) -> u16 {
    std::env::var(var).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NetConfig::default();
        assert_eq!(config.tcp_port, 5432);
        assert_eq!(config.udp_port, 5433);
        assert_eq!(config.peer_udp_port(), 5433);
        assert!(config.peer.is_none());
    }

    #[test]
    fn test_peer_udp_port_override() {
        let config = NetConfig { peer_udp_port: Some(6001), ..Default::default() };
        assert_eq!(config.peer_udp_port(), 6001);
        assert_eq!(config.udp_port, 5433);
    }
}
