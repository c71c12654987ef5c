//! Vehicle state tracker
//!
//! A small set of continuously-updated facts derived from inbound frames:
//! brake pedal, throttle, standstill, cruise engagement, plus the
//! controls-allowed arming flag and the relay-fault latch. The tracker
//! reflects what the vehicle's own ECUs reported - it performs no validation
//! of its own.
//!
//! Mutation discipline: every `update_*` method is `pub(crate)` and called
//! only from the RX ingestion path. The TX path reads through the public
//! getters. Because the gate owns this struct, the single-writer rule is
//! enforced by the borrow checker (`&mut self` on RX, `&self` on TX).
//!
//! The "prev" naming follows the fact that the gate never sees live pedal
//! state, only the value as of the most recent status frame:
//! `brake_pressed_prev` is the latest report, `brake_pressed_prev_prev` the
//! one before it (kept for edge detection).

/// Tracked vehicle facts and the controls-allowed flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VehicleState {
    controls_allowed: bool,
    brake_pressed_prev: bool,
    brake_pressed_prev_prev: bool,
    cruise_engaged: bool,
    standstill: bool,
    gas_pressed: bool,
    relay_fault: bool,
}

impl VehicleState {
    /// Fresh state: disarmed, nothing pressed, not at standstill, no fault
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether actuation commands are currently permitted
    pub fn controls_allowed(&self) -> bool {
        self.controls_allowed
    }

    /// Brake pedal state as of the last ingested status frame
    pub fn brake_pressed_prev(&self) -> bool {
        self.brake_pressed_prev
    }

    /// Brake pedal state one status frame earlier (the edge pair)
    pub fn brake_pressed_prev_prev(&self) -> bool {
        self.brake_pressed_prev_prev
    }

    /// Cruise-control engagement as of the last ingested status frame
    pub fn cruise_engaged(&self) -> bool {
        self.cruise_engaged
    }

    /// Whether the vehicle is at (or below) the standstill speed threshold
    pub fn standstill(&self) -> bool {
        self.standstill
    }

    /// Whether the throttle pedal is pressed beyond the configured deadband
    pub fn gas_pressed(&self) -> bool {
        self.gas_pressed
    }

    /// Whether the relay-malfunction fault has been latched
    pub fn relay_fault(&self) -> bool {
        self.relay_fault
    }

    /// Diagnostics/test override for the arming flag
    ///
    /// The engines themselves never call this: within the gate,
    /// controls-allowed only ever becomes true through a cruise-engage edge
    /// observed on RX.
    pub fn set_controls_allowed(&mut self, allowed: bool) {
        self.controls_allowed = allowed;
    }

    /// Ingest a brake pedal report
    ///
    /// Disengages on a rising edge of brake press, or on brake held while the
    /// vehicle is moving. A held brake at standstill keeps controls engaged.
    pub(crate) fn update_brake(&mut self, pressed: bool) {
        let rising_edge = pressed && !self.brake_pressed_prev;
        if pressed && (rising_edge || !self.standstill) {
            self.disengage("brake pressed");
        }
        self.brake_pressed_prev_prev = self.brake_pressed_prev;
        self.brake_pressed_prev = pressed;
    }

    /// Ingest a cruise-control engagement report
    ///
    /// A rising engage edge arms controls, but only while the brake is not
    /// pressed. Any disengaged report disarms immediately.
    pub(crate) fn update_cruise(&mut self, engaged: bool) {
        if engaged && !self.cruise_engaged && !self.brake_pressed_prev {
            log::info!("cruise engaged: controls allowed");
            self.controls_allowed = true;
        }
        if !engaged {
            self.disengage("cruise disengaged");
        }
        self.cruise_engaged = engaged;
    }

    /// Ingest a throttle pedal report
    ///
    /// A rising edge of gas press is a driver override and disarms controls.
    pub(crate) fn update_gas(&mut self, pressed: bool) {
        if pressed && !self.gas_pressed {
            self.disengage("gas pressed");
        }
        self.gas_pressed = pressed;
    }

    /// Ingest a standstill derivation from the speed signal
    pub(crate) fn update_standstill(&mut self, standstill: bool) {
        self.standstill = standstill;
    }

    /// Latch the relay-malfunction fault (permanent until gate reset)
    pub(crate) fn latch_relay_fault(&mut self) {
        self.relay_fault = true;
        self.controls_allowed = false;
    }

    fn disengage(&mut self, reason: &str) {
        if self.controls_allowed {
            log::info!("controls not allowed: {}", reason);
        }
        self.controls_allowed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cruise_engage_edge_arms() {
        let mut state = VehicleState::new();
        assert!(!state.controls_allowed());

        state.update_cruise(true);
        assert!(state.controls_allowed());

        // Holding the engaged state is not a new edge, but stays armed
        state.update_cruise(true);
        assert!(state.controls_allowed());
    }

    #[test]
    fn test_cruise_disengage_disarms() {
        let mut state = VehicleState::new();
        state.update_cruise(true);
        state.update_cruise(false);
        assert!(!state.controls_allowed());
    }

    #[test]
    fn test_engage_blocked_while_brake_held() {
        let mut state = VehicleState::new();
        state.update_standstill(true);
        state.update_brake(true);
        state.update_cruise(true);
        assert!(!state.controls_allowed());
        assert!(state.cruise_engaged());
    }

    #[test]
    fn test_brake_rising_edge_disarms() {
        let mut state = VehicleState::new();
        state.update_standstill(true);
        state.update_cruise(true);
        assert!(state.controls_allowed());

        state.update_brake(true);
        assert!(!state.controls_allowed());
        assert!(state.brake_pressed_prev());
        assert!(!state.brake_pressed_prev_prev());
    }

    #[test]
    fn test_brake_held_at_standstill_keeps_controls() {
        let mut state = VehicleState::new();
        state.update_standstill(true);
        state.update_brake(true);

        // Armed via override while the brake is already down (e.g. resume
        // from stop): a held brake at standstill must not disengage
        state.set_controls_allowed(true);
        state.update_brake(true);
        assert!(state.controls_allowed());

        // The same held brake while moving disengages
        state.update_standstill(false);
        state.update_brake(true);
        assert!(!state.controls_allowed());
    }

    #[test]
    fn test_gas_rising_edge_disarms() {
        let mut state = VehicleState::new();
        state.update_cruise(true);
        assert!(state.controls_allowed());

        state.update_gas(true);
        assert!(!state.controls_allowed());
        assert!(state.gas_pressed());

        // Held gas after a fresh engage edge is not a new override
        state.update_cruise(false);
        state.update_cruise(true);
        state.update_gas(true);
        assert!(state.controls_allowed());
    }

    #[test]
    fn test_relay_fault_latch_disarms() {
        let mut state = VehicleState::new();
        state.update_cruise(true);
        state.latch_relay_fault();
        assert!(state.relay_fault());
        assert!(!state.controls_allowed());

        // A later engage edge re-arms the flag, but the latch stays; the TX
        // engine denies everything on the latch regardless
        state.update_cruise(false);
        state.update_cruise(true);
        assert!(state.relay_fault());
    }
}
