//! Gate configuration types
//!
//! Vehicle-specific tuning values live here as data rather than as literals
//! inside the check functions: the exact calibration (standstill speed,
//! gas-pedal deadband) varies per platform and is expected to be confirmed
//! against each vehicle, so it stays overridable at init.

use serde::{Deserialize, Serialize};

/// Tuning thresholds consulted by the RX ingestion handlers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Speed at or below which the vehicle counts as stopped,
    /// in the unit of the profile's speed signal (km/h for Ford)
    #[serde(default = "default_standstill_speed")]
    pub standstill_speed: f64,

    /// Pedal travel (percent) above which the throttle counts as pressed
    #[serde(default = "default_gas_pressed_pct")]
    pub gas_pressed_pct: f64,
}

fn default_standstill_speed() -> f64 {
    1.0
}

fn default_gas_pressed_pct() -> f64 {
    0.5
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            standstill_speed: default_standstill_speed(),
            gas_pressed_pct: default_gas_pressed_pct(),
        }
    }
}

/// Profile parameter word passed at init
///
/// Mirrors the 16-bit safety param of the original firmware interface: a
/// small set of sub-mode flags selecting alternate wiring or feature
/// variants within one vehicle profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileParams {
    #[serde(default)]
    pub flags: u16,
}

impl ProfileParams {
    /// Camera is wired to bus 1 instead of bus 2
    pub const FLAG_ALT_CAMERA_BUS: u16 = 0x1;

    /// All currently defined flag bits
    pub const KNOWN_FLAGS: u16 = Self::FLAG_ALT_CAMERA_BUS;

    /// Create an empty parameter word
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the raw flag word
    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Whether the alternate camera-bus wiring is selected
    pub fn alt_camera_bus(&self) -> bool {
        self.flags & Self::FLAG_ALT_CAMERA_BUS != 0
    }

    /// Flag bits outside the known set (rejected at gate init)
    pub fn unknown_flags(&self) -> u16 {
        self.flags & !Self::KNOWN_FLAGS
    }
}
