//! Caller allow-list gate.

use std::net::{IpAddr, SocketAddr};

/// Admits only callers whose host matches one configured address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGate {
    allowed: IpAddr,
}

impl AccessGate {
    /// IPv4-mapped IPv6 addresses are stored as their IPv4 form.
    #[must_use]
    pub const fn new(allowed: IpAddr) -> Self {
        Self {
            allowed: allowed.to_canonical(),
        }
    }

    #[must_use]
    pub const fn allowed(&self) -> IpAddr {
        self.allowed
    }

    /// Admits `caller` (`ip:port`, `[ipv6]:port` or a bare address) when its
    /// host is the allowed address. Unparseable callers are refused.
    #[must_use]
    pub fn admit(&self, caller: &str) -> bool {
        caller_host(caller).is_some_and(|host| self.admit_ip(host))
    }

    #[must_use]
    pub fn admit_addr(&self, caller: SocketAddr) -> bool {
        self.admit_ip(caller.ip())
    }

    /// Dual-stack listeners report IPv4 peers as `::ffff:a.b.c.d`.
    fn admit_ip(&self, caller: IpAddr) -> bool {
        caller.to_canonical() == self.allowed
    }
}

fn caller_host(caller: &str) -> Option<IpAddr> {
    let caller = caller.trim();

    caller
        .parse::<SocketAddr>()
        .map(|addr| addr.ip())
        .or_else(|_| caller.parse::<IpAddr>())
        .ok()
}
