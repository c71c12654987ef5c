//! Ford profile conformance suite
//!
//! Drives the gate with synthetic decoded frames, exactly the way the
//! external test harness does: RX frames through `ingest`, TX candidates
//! through `tx_allowed`, asserting the verdict and the resulting state.

use can_safety_core::{CanMessage, ProfileId, ProfileParams, SafetyGate};

const MSG_ENG_BRAKE_DATA: u32 = 0x165;
const MSG_ENG_VEHICLE_SP_THROTTLE: u32 = 0x204;
const MSG_STEERING_DATA_FD1: u32 = 0x083;
const MSG_ACC_DATA_3: u32 = 0x18A;
const MSG_LANE_ASSIST_DATA1: u32 = 0x3CA;
const MSG_LATERAL_MOTION_CONTROL: u32 = 0x3D3;
const MSG_IPMA_DATA: u32 = 0x3D8;

#[derive(Clone, Copy, PartialEq)]
enum Button {
    Cancel,
    Resume,
    TjaToggle,
}

fn gate() -> SafetyGate {
    // RUST_LOG=debug surfaces the gate's deny reasons while debugging a case
    let _ = env_logger::builder().is_test(true).try_init();
    SafetyGate::new(ProfileId::Ford, ProfileParams::new()).unwrap()
}

/// Brake pedal and cruise state share one frame, so both signals are always
/// sent together (mirroring the real PCM frame)
fn brake_cruise_msg(brake: bool, cruise_engaged: bool) -> CanMessage {
    CanMessage::new(MSG_ENG_BRAKE_DATA, 0)
        .with_signal("BpedDrvAppl_D_Actl", if brake { 2i64 } else { 1i64 })
        .with_signal("CcStat_D_Actl", if cruise_engaged { 5i64 } else { 0i64 })
}

fn throttle_speed_msg(gas_pct: f64, speed: f64) -> CanMessage {
    CanMessage::new(MSG_ENG_VEHICLE_SP_THROTTLE, 0)
        .with_signal("ApedPos_Pc_ActlArb", gas_pct)
        .with_signal("Veh_V_ActlEng", speed)
}

fn steer_msg(
    enabled: bool,
    path_offset: f64,
    path_angle: f64,
    curvature: f64,
    curvature_rate: f64,
) -> CanMessage {
    CanMessage::new(MSG_LATERAL_MOTION_CONTROL, 0)
        .with_signal("LatCtl_D_Rq", enabled as i64)
        .with_signal("LatCtlPathOffst_L_Actl", path_offset)
        .with_signal("LatCtlPath_An_Actl", path_angle)
        .with_signal("LatCtlCurv_No_Actl", curvature)
        .with_signal("LatCtlCurv_NoRate_Actl", curvature_rate)
}

fn lkas_msg(action: i64) -> CanMessage {
    CanMessage::new(MSG_LANE_ASSIST_DATA1, 0).with_signal("LkaActvStats_D2_Req", action)
}

fn button_msg(button: Button, bus: u8) -> CanMessage {
    CanMessage::new(MSG_STEERING_DATA_FD1, bus)
        .with_signal("CcAslButtnCnclPress", (button == Button::Cancel) as i64)
        .with_signal("CcAsllButtnResPress", (button == Button::Resume) as i64)
        .with_signal("TjaButtnOnOffPress", (button == Button::TjaToggle) as i64)
}

#[test]
fn test_steer_allowed_grid() {
    let path_offsets = [-5.0, -1.0, 0.0, 1.0, 5.0];
    let path_angles = [-0.5, -0.1, 0.0, 0.1, 0.5];
    let curvature_rates = [-0.001, 0.0, 0.001];
    let curvatures = [-0.02, -0.01, 0.0, 0.01, 0.02];

    let mut gate = gate();
    for controls_allowed in [true, false] {
        for steer_control_enabled in [true, false] {
            for path_offset in path_offsets {
                for path_angle in path_angles {
                    for curvature_rate in curvature_rates {
                        for curvature in curvatures {
                            gate.set_controls_allowed(controls_allowed);
                            let enabled = steer_control_enabled || curvature != 0.0;

                            let should_tx = path_offset == 0.0
                                && path_angle == 0.0
                                && curvature_rate == 0.0
                                && (!enabled || controls_allowed);
                            let msg = steer_msg(
                                steer_control_enabled,
                                path_offset,
                                path_angle,
                                curvature,
                                curvature_rate,
                            );
                            assert_eq!(
                                should_tx,
                                gate.tx_allowed(&msg),
                                "controls_allowed={} enabled={} offset={} angle={} rate={} curv={}",
                                controls_allowed,
                                steer_control_enabled,
                                path_offset,
                                path_angle,
                                curvature_rate,
                                curvature
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_disengaged_heartbeat_scenarios() {
    let mut gate = gate();
    gate.set_controls_allowed(false);

    // All signals zero, enable off: the inert heartbeat passes
    assert!(gate.tx_allowed(&steer_msg(false, 0.0, 0.0, 0.0, 0.0)));
    // Same frame with any curvature does not
    assert!(!gate.tx_allowed(&steer_msg(false, 0.0, 0.0, 0.01, 0.0)));
}

#[test]
fn test_prevent_lkas_action() {
    let mut gate = gate();

    gate.set_controls_allowed(true);
    assert!(!gate.tx_allowed(&lkas_msg(1)));

    gate.set_controls_allowed(false);
    assert!(!gate.tx_allowed(&lkas_msg(1)));
}

#[test]
fn test_acc_buttons() {
    // TJA toggle: always allowed, any state, any allow-listed bus
    let mut gate = gate();
    for allowed in [false, true] {
        gate.set_controls_allowed(allowed);
        for engaged in [true, false] {
            gate.ingest(&brake_cruise_msg(false, engaged));
            gate.set_controls_allowed(allowed);
            assert!(gate.tx_allowed(&button_msg(Button::TjaToggle, 2)));
        }
    }

    // RESUME: transmits iff controls allowed, independent of bus
    let mut gate = self::gate();
    for allowed in [false, true] {
        gate.set_controls_allowed(allowed);
        for bus in [0, 2] {
            assert_eq!(allowed, gate.tx_allowed(&button_msg(Button::Resume, bus)));
        }
    }

    // CANCEL: transmits iff cruise is engaged, independent of bus and of
    // controls allowed
    let mut gate = self::gate();
    for engaged in [true, false] {
        gate.ingest(&brake_cruise_msg(false, engaged));
        for allowed in [false, true] {
            gate.set_controls_allowed(allowed);
            for bus in [0, 2] {
                assert_eq!(engaged, gate.tx_allowed(&button_msg(Button::Cancel, bus)));
            }
        }
    }
}

#[test]
fn test_forwarding() {
    let gate = gate();
    let scanned_ids = [0x1, 0x165, 0x204, MSG_ACC_DATA_3, MSG_LANE_ASSIST_DATA1,
        MSG_LATERAL_MOTION_CONTROL, MSG_IPMA_DATA, 0x7FF];
    let blacklisted = [MSG_ACC_DATA_3, MSG_LANE_ASSIST_DATA1,
        MSG_LATERAL_MOTION_CONTROL, MSG_IPMA_DATA];

    for id in scanned_ids {
        // Vehicle bus relays everything toward the camera
        assert_eq!(gate.forward_destination(&CanMessage::new(id, 0)), Some(2));

        // Camera bus relays everything except the gate's own command ids
        let expected = if blacklisted.contains(&id) { None } else { Some(0) };
        assert_eq!(gate.forward_destination(&CanMessage::new(id, 2)), expected);

        // No route off bus 1 in the standard wiring
        assert_eq!(gate.forward_destination(&CanMessage::new(id, 1)), None);
    }
}

#[test]
fn test_tx_decision_idempotent() {
    let mut gate = gate();
    gate.ingest(&brake_cruise_msg(false, true));

    let candidates = [
        steer_msg(true, 0.0, 0.0, 0.01, 0.0),
        steer_msg(false, 1.0, 0.0, 0.0, 0.0),
        lkas_msg(1),
        button_msg(Button::Cancel, 0),
        CanMessage::new(MSG_ACC_DATA_3, 0),
    ];
    for msg in &candidates {
        assert_eq!(gate.tx_allowed(msg), gate.tx_allowed(msg));
    }
}

#[test]
fn test_brake_while_moving_disengages() {
    let mut gate = gate();
    gate.ingest(&throttle_speed_msg(0.0, 30.0));
    gate.ingest(&brake_cruise_msg(false, true));
    assert!(gate.controls_allowed());

    gate.ingest(&brake_cruise_msg(true, true));
    assert!(!gate.controls_allowed());
    assert!(gate.brake_pressed_prev());
}

#[test]
fn test_brake_held_at_standstill_keeps_controls() {
    let mut gate = gate();
    gate.ingest(&throttle_speed_msg(0.0, 0.0));
    gate.ingest(&brake_cruise_msg(true, false));
    assert!(!gate.controls_allowed());

    // Second report of the held pedal at standstill, with the flag forced on:
    // no rising edge and no motion, so the flag survives
    gate.set_controls_allowed(true);
    gate.ingest(&brake_cruise_msg(true, true));
    assert!(gate.controls_allowed());
}

#[test]
fn test_engage_blocked_while_brake_pressed() {
    let mut gate = gate();
    gate.ingest(&throttle_speed_msg(0.0, 0.0));
    gate.ingest(&brake_cruise_msg(true, false));
    gate.ingest(&brake_cruise_msg(true, true));
    assert!(!gate.controls_allowed());
}

#[test]
fn test_gas_press_disengages() {
    let mut gate = gate();
    gate.ingest(&brake_cruise_msg(false, true));
    assert!(gate.controls_allowed());

    gate.ingest(&throttle_speed_msg(20.0, 30.0));
    assert!(!gate.controls_allowed());
    assert!(gate.state().gas_pressed());
}

#[test]
fn test_relay_malfunction() {
    let mut gate = gate();
    gate.ingest(&brake_cruise_msg(false, true));
    assert!(gate.controls_allowed());

    // Sentinel on the camera bus is the normal case
    gate.ingest(&CanMessage::new(MSG_IPMA_DATA, 2));
    assert!(!gate.relay_fault());

    // Sentinel on the vehicle bus latches the fault and kills all TX,
    // including frames that carry no unsafe content at all
    gate.ingest(&CanMessage::new(MSG_IPMA_DATA, 0));
    assert!(gate.relay_fault());
    assert!(!gate.tx_allowed(&steer_msg(false, 0.0, 0.0, 0.0, 0.0)));
    assert!(!gate.tx_allowed(&button_msg(Button::TjaToggle, 2)));
    assert!(!gate.tx_allowed(&CanMessage::new(MSG_ACC_DATA_3, 0)));

    // No RX event clears it
    gate.ingest(&brake_cruise_msg(false, false));
    gate.ingest(&brake_cruise_msg(false, true));
    assert!(gate.relay_fault());
    assert!(!gate.tx_allowed(&CanMessage::new(MSG_ACC_DATA_3, 0)));
}

#[test]
fn test_malformed_frames_are_inert() {
    let mut gate = gate();
    gate.ingest(&brake_cruise_msg(false, true));

    // Status frame that decoded to no signals: state is untouched
    gate.ingest(&CanMessage::new(MSG_ENG_BRAKE_DATA, 0));
    assert!(gate.controls_allowed());

    // Steering candidate that decoded to no signals: denied
    assert!(!gate.tx_allowed(&CanMessage::new(MSG_LATERAL_MOTION_CONTROL, 0)));
}
