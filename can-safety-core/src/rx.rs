//! RX ingestion engine
//!
//! Updates the vehicle state tracker from inbound frames and watches for the
//! relay-malfunction sentinel. Dispatch is a fixed id -> handler table built
//! when the profile is loaded; frames with no handler (or frames that did not
//! decode) update nothing.

use crate::profiles::VehicleProfile;
use crate::state::VehicleState;
use crate::types::CanMessage;

/// Process one inbound frame against the profile's RX rules
pub(crate) fn ingest(profile: &VehicleProfile, state: &mut VehicleState, msg: &CanMessage) {
    // The sentinel id showing up on its designated bus means the safety
    // relay failed and the stock ECU is still talking: fail closed, forever
    if msg.id == profile.relay_sentinel.id && msg.bus == profile.relay_sentinel.bus {
        if !state.relay_fault() {
            log::error!(
                "relay malfunction: 0x{:X} seen on bus {}, latching fault",
                msg.id,
                msg.bus
            );
        }
        state.latch_relay_fault();
        return;
    }

    // State is only ever sourced from the vehicle's own bus
    if msg.bus != profile.main_bus {
        return;
    }

    if let Some(handler) = profile.rx_handlers.get(&msg.id) {
        handler(state, &profile.thresholds, msg);
    }
}
