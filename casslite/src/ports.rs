//! Verified-free port allocation.

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener};
use std::ops::RangeInclusive;

use parking_lot::Mutex;
use rand::Rng;
use tracing::trace;

use crate::errors::{CassliteError, CassliteResult};

/// IANA dynamic/ephemeral port range.
pub const DEFAULT_PORT_RANGE: RangeInclusive<u16> = 49152..=65535;

/// Recently returned ports remembered to bias away from immediate reuse.
const WINDOW_SIZE: usize = 50;

/// Candidate draws before allocation gives up.
const DEFAULT_ATTEMPTS: u32 = 1024;

/// Hands out ports verified free by a bind-then-close probe.
///
/// The recent-port window is a bias, not a reservation: a port may be handed
/// out again once evicted, and nothing stops another process from binding a
/// returned port before the caller does. Callers must treat a late bind
/// failure during launch as retryable and restart the whole allocation.
pub struct PortAllocator {
    address: IpAddr,
    range: RangeInclusive<u16>,
    attempts: u32,
    recent: Mutex<VecDeque<u16>>,
}

impl PortAllocator {
    /// Allocator over the default dynamic range.
    pub fn new(address: IpAddr) -> Self {
        Self::with_range(address, DEFAULT_PORT_RANGE)
    }

    /// Allocator over a custom inclusive range.
    pub fn with_range(address: IpAddr, range: RangeInclusive<u16>) -> Self {
        Self::with_budget(address, range, DEFAULT_ATTEMPTS)
    }

    /// Allocator with a custom attempt budget.
    pub fn with_budget(address: IpAddr, range: RangeInclusive<u16>, attempts: u32) -> Self {
        Self {
            address,
            range,
            attempts,
            recent: Mutex::new(VecDeque::with_capacity(WINDOW_SIZE)),
        }
    }

    /// Allocator probing the IPv4 loopback address.
    pub fn localhost() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }

    /// Draw a random port from the range, verified bindable at this instant.
    ///
    /// Safe to call concurrently; the window is updated under a mutex.
    pub fn next(&self) -> CassliteResult<u16> {
        let mut recent = self.recent.lock();
        if recent.len() == WINDOW_SIZE {
            recent.pop_front();
        }
        let mut rng = rand::rng();
        for _ in 0..self.attempts {
            let port = rng.random_range(self.range.clone());
            if recent.contains(&port) {
                continue;
            }
            match TcpListener::bind(SocketAddr::new(self.address, port)) {
                Ok(listener) => {
                    drop(listener);
                    recent.push_back(port);
                    trace!(port, "allocated free port");
                    return Ok(port);
                }
                Err(_) => continue,
            }
        }
        Err(CassliteError::Ports(format!(
            "no available port on {} in the range [{}, {}] after {} attempts",
            self.address,
            self.range.start(),
            self.range.end(),
            self.attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_port_stays_in_range() {
        let allocator = PortAllocator::localhost();
        let port = allocator.next().unwrap();
        assert!(DEFAULT_PORT_RANGE.contains(&port));
    }

    #[test]
    fn window_evicts_oldest_before_allocating() {
        let allocator = PortAllocator::localhost();
        for _ in 0..WINDOW_SIZE + 5 {
            allocator.next().unwrap();
        }
        assert!(allocator.recent.lock().len() <= WINDOW_SIZE);
    }

    #[test]
    fn occupied_single_port_range_exhausts_the_budget() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let taken = listener.local_addr().unwrap().port();
        let allocator = PortAllocator::with_budget(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            taken..=taken,
            16,
        );
        let err = allocator.next().unwrap_err();
        assert!(matches!(err, CassliteError::Ports(_)));
        assert!(err.to_string().contains(&format!("[{taken}, {taken}]")));
        drop(listener);
    }
}
