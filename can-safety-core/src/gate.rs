//! Main gate API
//!
//! [`SafetyGate`] is the entry point: one instance per vehicle interface,
//! owning the compiled rule table and the tracked state. There is no hidden
//! process-wide state, so multiple gates (e.g. for conformance testing
//! several profiles side by side) can coexist.
//!
//! Call discipline mirrors the bus driver: `ingest` on every inbound frame
//! (in arrival order - edge detection depends on it), `tx_allowed` on every
//! candidate outgoing frame, `forward_destination` on every inbound frame
//! that may need relaying. Each call completes in constant time and never
//! blocks; `ingest` is the only mutating path.

use crate::config::ProfileParams;
use crate::profiles::{ProfileId, VehicleProfile};
use crate::state::VehicleState;
use crate::types::{CanMessage, Result};

/// A per-vehicle CAN safety gate
pub struct SafetyGate {
    profile: VehicleProfile,
    state: VehicleState,
}

impl SafetyGate {
    /// Create a gate for a vehicle profile and parameter word
    pub fn new(id: ProfileId, params: ProfileParams) -> Result<Self> {
        let profile = VehicleProfile::load(id, params)?;
        log::info!("safety gate initialized: profile={}", profile.name);
        Ok(Self::from_profile(profile))
    }

    /// Create a gate from an already-built profile
    ///
    /// Used when the caller tweaks thresholds before construction.
    pub fn from_profile(profile: VehicleProfile) -> Self {
        Self {
            profile,
            state: VehicleState::new(),
        }
    }

    /// Ingest one inbound frame, updating tracked state
    ///
    /// Never rejects and never mutates the frame: undecoded or unrecognized
    /// frames simply leave the state untouched.
    pub fn ingest(&mut self, msg: &CanMessage) {
        crate::rx::ingest(&self.profile, &mut self.state, msg);
    }

    /// Decide whether a candidate outgoing frame may be transmitted
    pub fn tx_allowed(&self, msg: &CanMessage) -> bool {
        crate::tx::check(&self.profile, &self.state, msg)
    }

    /// Decide whether/where to relay an inbound frame
    pub fn forward_destination(&self, msg: &CanMessage) -> Option<u8> {
        self.profile.forwarding.destination(msg)
    }

    /// Whether actuation commands are currently permitted
    pub fn controls_allowed(&self) -> bool {
        self.state.controls_allowed()
    }

    /// Diagnostics/test override for the arming flag
    pub fn set_controls_allowed(&mut self, allowed: bool) {
        self.state.set_controls_allowed(allowed);
    }

    /// Brake pedal state as of the last ingested status frame
    pub fn brake_pressed_prev(&self) -> bool {
        self.state.brake_pressed_prev()
    }

    /// Whether the relay-malfunction fault has been latched
    pub fn relay_fault(&self) -> bool {
        self.state.relay_fault()
    }

    /// Full tracked state, for diagnostics and reports
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// The loaded rule table
    pub fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    /// Reset tracked state, modeling a process restart
    ///
    /// This is the only way to clear the relay-fault latch.
    pub fn reset(&mut self) {
        log::info!("safety gate reset: profile={}", self.profile.name);
        self.state = VehicleState::new();
    }
}
