//! Per-vehicle rule tables
//!
//! Each vehicle is described by data, not by a subclass: a [`VehicleProfile`]
//! bundles the TX allow-list, the forwarding policy, the relay-malfunction
//! sentinel, the tuning thresholds, and two dispatch tables mapping message
//! ids to handler functions. The tables are built once at gate init; the
//! engines stay vehicle-agnostic.

pub mod ford;

use crate::config::{ProfileParams, Thresholds};
use crate::forward::ForwardPolicy;
use crate::state::VehicleState;
use crate::types::{CanMessage, Result, SafetyError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// RX handler: updates tracker facts from one inbound frame
pub type RxHandler = fn(&mut VehicleState, &Thresholds, &CanMessage);

/// TX handler: signal-level check for one candidate outgoing frame
///
/// Pure with respect to the state: handlers read, never mutate.
pub type TxHandler = fn(&VehicleState, &Thresholds, &CanMessage) -> bool;

/// Supported vehicle profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileId {
    Ford,
}

impl FromStr for ProfileId {
    type Err = SafetyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ford" => Ok(ProfileId::Ford),
            other => Err(SafetyError::UnknownProfile(other.to_string())),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileId::Ford => write!(f, "ford"),
        }
    }
}

/// One permitted {id, bus} transmission pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxEntry {
    pub id: u32,
    pub bus: u8,
}

impl TxEntry {
    pub const fn new(id: u32, bus: u8) -> Self {
        Self { id, bus }
    }
}

/// The frame whose presence on RX indicates a failed safety relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySentinel {
    pub id: u32,
    pub bus: u8,
}

/// A compiled per-vehicle rule table
pub struct VehicleProfile {
    /// Profile name, for logs and reports
    pub name: &'static str,
    /// Bus the vehicle's own ECUs report state on
    pub main_bus: u8,
    /// Every {id, bus} pair the gate may ever transmit
    pub tx_allowlist: Vec<TxEntry>,
    /// Relay rules for inbound frames
    pub forwarding: ForwardPolicy,
    /// Relay-malfunction detection address
    pub relay_sentinel: RelaySentinel,
    /// Vehicle tuning values (overridable before gate construction)
    pub thresholds: Thresholds,
    pub(crate) rx_handlers: HashMap<u32, RxHandler>,
    pub(crate) tx_handlers: HashMap<u32, TxHandler>,
}

impl VehicleProfile {
    /// Build the rule table for a profile selector and parameter word
    pub fn load(id: ProfileId, params: ProfileParams) -> Result<Self> {
        if params.unknown_flags() != 0 {
            return Err(SafetyError::InvalidParameter(format!(
                "unknown profile flags: 0x{:X}",
                params.unknown_flags()
            )));
        }
        match id {
            ProfileId::Ford => Ok(ford::profile(params)),
        }
    }

    /// Whether an {id, bus} pair is on the TX allow-list
    pub fn tx_allowlisted(&self, id: u32, bus: u8) -> bool {
        self.tx_allowlist
            .iter()
            .any(|entry| entry.id == id && entry.bus == bus)
    }
}

impl fmt::Debug for VehicleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VehicleProfile")
            .field("name", &self.name)
            .field("main_bus", &self.main_bus)
            .field("tx_allowlist", &self.tx_allowlist)
            .field("relay_sentinel", &self.relay_sentinel)
            .field("thresholds", &self.thresholds)
            .field("rx_handlers", &self.rx_handlers.len())
            .field("tx_handlers", &self.tx_handlers.len())
            .finish()
    }
}
