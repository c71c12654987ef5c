//! Bus forwarding policy
//!
//! Decides, per received frame, whether to relay it to another bus. The
//! policy is a static bus-to-bus map plus a per-destination blacklist: ids
//! the gate itself is responsible for producing must never be injected onto
//! the actuation bus by whatever sits on the other side of the relay.
//! Forwarding is independent of the controls-allowed state.

use crate::types::CanMessage;
use std::collections::{HashMap, HashSet};

/// Static forwarding rules for one vehicle profile
#[derive(Debug, Clone, Default)]
pub struct ForwardPolicy {
    /// Source bus -> destination bus
    bus_map: HashMap<u8, u8>,
    /// Destination bus -> ids that must never be relayed onto it
    blocked: HashMap<u8, HashSet<u32>>,
}

impl ForwardPolicy {
    /// Create an empty policy (nothing is forwarded)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: relay frames received on `from` to `to`
    pub fn route(mut self, from: u8, to: u8) -> Self {
        self.bus_map.insert(from, to);
        self
    }

    /// Builder method: never relay these ids onto destination bus `dest`
    pub fn block(mut self, dest: u8, ids: &[u32]) -> Self {
        self.blocked.entry(dest).or_default().extend(ids);
        self
    }

    /// Destination bus for a received frame, or `None` to swallow it
    pub fn destination(&self, msg: &CanMessage) -> Option<u8> {
        let dest = *self.bus_map.get(&msg.bus)?;
        if let Some(ids) = self.blocked.get(&dest) {
            if ids.contains(&msg.id) {
                log::debug!(
                    "fwd blocked: 0x{:X} not relayed from bus {} to bus {}",
                    msg.id,
                    msg.bus,
                    dest
                );
                return None;
            }
        }
        Some(dest)
    }
}
