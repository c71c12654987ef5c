//! TX validation engine
//!
//! The gate for every candidate outgoing frame. A frame passes only if the
//! relay fault is not latched, its {id, bus} pair is on the profile's
//! allow-list, and its id-specific signal check (if any) holds against the
//! current tracker state. Checks are pure: nothing here mutates state, and a
//! denial is a boolean, never an error.

use crate::profiles::VehicleProfile;
use crate::state::VehicleState;
use crate::types::CanMessage;

/// Validate one candidate outgoing frame
pub(crate) fn check(profile: &VehicleProfile, state: &VehicleState, msg: &CanMessage) -> bool {
    if state.relay_fault() {
        log::warn!("TX denied: relay fault latched (0x{:X}, bus {})", msg.id, msg.bus);
        return false;
    }

    if !profile.tx_allowlisted(msg.id, msg.bus) {
        log::warn!("TX denied: 0x{:X} not allowed on bus {}", msg.id, msg.bus);
        return false;
    }

    match profile.tx_handlers.get(&msg.id) {
        Some(handler) => {
            let allowed = handler(state, &profile.thresholds, msg);
            if !allowed {
                log::warn!("TX denied: 0x{:X} failed signal check", msg.id);
            }
            allowed
        }
        // Allow-listed with no signal constraints (UI/status content)
        None => true,
    }
}
