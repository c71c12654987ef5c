//! Ford vehicle profile
//!
//! Rule table and signal handlers for Ford/Lincoln platforms with the
//! `ford_lincoln_base_pt` message database. The camera sits on bus 2 (bus 1
//! under the alternate-wiring flag), the vehicle's powertrain bus is bus 0.
//!
//! Message roles:
//! - `EngBrakeData` carries both the driver brake pedal and the cruise
//!   state; `EngVehicleSpThrottle` carries both the pedal position and the
//!   vehicle speed. Each handler resolves both facts from the one frame.
//! - `LateralMotionControl` is the continuous steering (TJA) command;
//!   `Lane_Assist_Data1` is the discrete lane-keep channel, which this gate
//!   never originates; `Steering_Data_FD1` carries the cruise buttons;
//!   `ACCDATA_3` and `IPMA_Data` are driver-facing UI content.
//! - A stock `IPMA_Data` frame seen on RX means the camera is still talking
//!   on the vehicle bus, i.e. the safety relay has failed: latch the fault.

use crate::config::{ProfileParams, Thresholds};
use crate::forward::ForwardPolicy;
use crate::profiles::{RelaySentinel, RxHandler, TxEntry, TxHandler, VehicleProfile};
use crate::state::VehicleState;
use crate::types::CanMessage;
use std::collections::HashMap;

/// RX from PCM: driver brake pedal and cruise state
pub const MSG_ENG_BRAKE_DATA: u32 = 0x165;
/// RX from PCM: driver throttle input and vehicle speed
pub const MSG_ENG_VEHICLE_SP_THROTTLE: u32 = 0x204;
/// TX: driver switches and cruise-control buttons
pub const MSG_STEERING_DATA_FD1: u32 = 0x083;
/// TX: ACC/TJA user interface
pub const MSG_ACC_DATA_3: u32 = 0x18A;
/// TX: discrete lane-keep assist command (reserved, never sent)
pub const MSG_LANE_ASSIST_DATA1: u32 = 0x3CA;
/// TX: continuous steering command (traffic jam assist)
pub const MSG_LATERAL_MOTION_CONTROL: u32 = 0x3D3;
/// TX: IPMA/LKAS user interface; doubles as the relay-malfunction sentinel
pub const MSG_IPMA_DATA: u32 = 0x3D8;

const MAIN_BUS: u8 = 0;
const CAMERA_BUS: u8 = 2;
const ALT_CAMERA_BUS: u8 = 1;

/// `BpedDrvAppl_D_Actl` value meaning the pedal is applied
const BRAKE_PEDAL_APPLIED: u64 = 2;
/// `CcStat_D_Actl` values meaning cruise is in an active mode
const CRUISE_ACTIVE_STATES: [u64; 2] = [4, 5];

/// Build the Ford rule table
pub(crate) fn profile(params: ProfileParams) -> VehicleProfile {
    let camera_bus = if params.alt_camera_bus() {
        ALT_CAMERA_BUS
    } else {
        CAMERA_BUS
    };

    let tx_allowlist = vec![
        TxEntry::new(MSG_STEERING_DATA_FD1, MAIN_BUS),
        TxEntry::new(MSG_STEERING_DATA_FD1, camera_bus),
        TxEntry::new(MSG_ACC_DATA_3, MAIN_BUS),
        TxEntry::new(MSG_LANE_ASSIST_DATA1, MAIN_BUS),
        TxEntry::new(MSG_LATERAL_MOTION_CONTROL, MAIN_BUS),
        TxEntry::new(MSG_IPMA_DATA, MAIN_BUS),
    ];

    // Relay everything between the vehicle and camera buses, but never let
    // the camera side re-inject the command ids this gate produces
    let forwarding = ForwardPolicy::new()
        .route(MAIN_BUS, camera_bus)
        .route(camera_bus, MAIN_BUS)
        .block(
            MAIN_BUS,
            &[
                MSG_ACC_DATA_3,
                MSG_LANE_ASSIST_DATA1,
                MSG_LATERAL_MOTION_CONTROL,
                MSG_IPMA_DATA,
            ],
        );

    let mut rx_handlers: HashMap<u32, RxHandler> = HashMap::new();
    rx_handlers.insert(MSG_ENG_BRAKE_DATA, rx_eng_brake_data);
    rx_handlers.insert(MSG_ENG_VEHICLE_SP_THROTTLE, rx_eng_vehicle_sp_throttle);

    let mut tx_handlers: HashMap<u32, TxHandler> = HashMap::new();
    tx_handlers.insert(MSG_LATERAL_MOTION_CONTROL, tx_lateral_motion_control);
    tx_handlers.insert(MSG_LANE_ASSIST_DATA1, tx_lane_assist_data1);
    tx_handlers.insert(MSG_STEERING_DATA_FD1, tx_steering_data_fd1);

    VehicleProfile {
        name: "ford",
        main_bus: MAIN_BUS,
        tx_allowlist,
        forwarding,
        relay_sentinel: RelaySentinel {
            id: MSG_IPMA_DATA,
            bus: MAIN_BUS,
        },
        thresholds: Thresholds::default(),
        rx_handlers,
        tx_handlers,
    }
}

/// Brake pedal and cruise state share one frame; brake is ingested first so
/// a cruise-engage edge in the same frame sees the current pedal state
fn rx_eng_brake_data(state: &mut VehicleState, _thresholds: &Thresholds, msg: &CanMessage) {
    if let Some(pedal) = msg.signal_u64("BpedDrvAppl_D_Actl") {
        state.update_brake(pedal == BRAKE_PEDAL_APPLIED);
    }
    if let Some(cruise) = msg.signal_u64("CcStat_D_Actl") {
        state.update_cruise(CRUISE_ACTIVE_STATES.contains(&cruise));
    }
}

/// Throttle position and vehicle speed share one frame
fn rx_eng_vehicle_sp_throttle(state: &mut VehicleState, thresholds: &Thresholds, msg: &CanMessage) {
    if let Some(pedal_pct) = msg.signal_f64("ApedPos_Pc_ActlArb") {
        state.update_gas(pedal_pct > thresholds.gas_pressed_pct);
    }
    if let Some(speed) = msg.signal_f64("Veh_V_ActlEng") {
        state.update_standstill(speed <= thresholds.standstill_speed);
    }
}

/// Continuous steering command check
///
/// The command may always be transmitted with fully inert content (all
/// steering-affecting signals zero and the request flag off) so the upstream
/// system can keep its heartbeat alive while disengaged. Anything else
/// requires controls-allowed. A frame missing any of the five signals did not
/// decode and is denied outright.
fn tx_lateral_motion_control(
    state: &VehicleState,
    _thresholds: &Thresholds,
    msg: &CanMessage,
) -> bool {
    let decision = || -> Option<bool> {
        let steer_req = msg.signal_u64("LatCtl_D_Rq")? != 0;
        let path_offset = msg.signal_f64("LatCtlPathOffst_L_Actl")?;
        let path_angle = msg.signal_f64("LatCtlPath_An_Actl")?;
        let curvature = msg.signal_f64("LatCtlCurv_No_Actl")?;
        let curvature_rate = msg.signal_f64("LatCtlCurv_NoRate_Actl")?;

        let enabled = steer_req || curvature != 0.0;
        let inert = path_offset == 0.0 && path_angle == 0.0 && curvature_rate == 0.0;
        Some(inert && (!enabled || state.controls_allowed()))
    };
    decision().unwrap_or(false)
}

/// The discrete lane-keep channel is reserved: this gate never originates it
fn tx_lane_assist_data1(_state: &VehicleState, _thresholds: &Thresholds, _msg: &CanMessage) -> bool {
    false
}

/// Cruise-control button check
///
/// CANCEL may only be sent into an active cruise session; RESUME only while
/// controls are allowed. The TJA on/off toggle is unconstrained. Absent
/// button signals decode as not-pressed.
fn tx_steering_data_fd1(state: &VehicleState, _thresholds: &Thresholds, msg: &CanMessage) -> bool {
    let cancel = msg.signal_u64("CcAslButtnCnclPress").unwrap_or(0) != 0;
    let resume = msg.signal_u64("CcAsllButtnResPress").unwrap_or(0) != 0;

    if cancel && !state.cruise_engaged() {
        return false;
    }
    if resume && !state.controls_allowed() {
        return false;
    }
    true
}
