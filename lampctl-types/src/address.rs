//! Device network address

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Address of the device on the local network
///
/// A bare host (usually an IPv4 address such as `192.168.0.53`), optionally
/// followed by `:port`. IPv6 literals are accepted bare (`fe80::1`) or in
/// brackets (`[fe80::1]:8080`). Schemes and paths are rejected: the request
/// paths are fixed by the device firmware.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    host: String,
    port: u16,
}

impl DeviceAddress {
    /// Default HTTP port
    pub const DEFAULT_PORT: u16 = 80;

    /// Parse an address of the form `host`, `host:port` or `[ipv6]:port`
    pub fn new(addr: impl AsRef<str>) -> Result<Self> {
        let addr = addr.as_ref().trim();

        if addr.is_empty() {
            return Err(Error::InvalidAddress("address is empty".into()));
        }

        if addr.contains("://") || addr.contains('/') {
            return Err(Error::InvalidAddress(format!(
                "{}: expected a bare host, without scheme or path",
                addr
            )));
        }

        if addr.chars().any(char::is_whitespace) {
            return Err(Error::InvalidAddress(format!("{}: contains whitespace", addr)));
        }

        let (host, port) = if let Some(rest) = addr.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| Error::InvalidAddress(format!("{}: unclosed '['", addr)))?;

            host.parse::<Ipv6Addr>().map_err(|e| {
                Error::InvalidAddress(format!("{}: bad IPv6 address: {}", addr, e))
            })?;

            let port = match tail {
                "" => Self::DEFAULT_PORT,
                tail => match tail.strip_prefix(':') {
                    Some(port) => parse_port(addr, port)?,
                    None => {
                        return Err(Error::InvalidAddress(format!(
                            "{}: unexpected {:?} after ']'",
                            addr, tail
                        )));
                    }
                },
            };
            (host, port)
        } else if addr.parse::<IpAddr>().is_ok() {
            // Bare IPv4 or IPv6, an unbracketed IPv6 never carries a port
            (addr, Self::DEFAULT_PORT)
        } else {
            match addr.rsplit_once(':') {
                Some((host, _)) if host.contains(':') => {
                    return Err(Error::InvalidAddress(format!(
                        "{}: IPv6 address with port must be bracketed",
                        addr
                    )));
                }
                Some((host, port)) => (host, parse_port(addr, port)?),
                None => (addr, Self::DEFAULT_PORT),
            }
        };

        if host.is_empty() {
            return Err(Error::InvalidAddress(format!("{}: host is empty", addr)));
        }

        if port == 0 {
            return Err(Error::InvalidAddress(format!("{}: port must not be 0", addr)));
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Replace the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Host without brackets, e.g. `fe80::1`
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL every request path is appended to
    ///
    /// The port is omitted when it is the default one.
    pub fn base_url(&self) -> String {
        format!("http://{}", self)
    }

    /// Host as written in a URL, IPv6 literals in brackets
    fn url_host(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }

    /// Full URL for a request path such as `/lampada/on`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

fn parse_port(addr: &str, port: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|e| Error::InvalidAddress(format!("{}: bad port: {}", addr, e)))
}

impl FromStr for DeviceAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == Self::DEFAULT_PORT {
            write!(f, "{}", self.url_host())
        } else {
            write!(f, "{}:{}", self.url_host(), self.port)
        }
    }
}
