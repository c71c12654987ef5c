//! CAN Safety Gate Library
//!
//! An embedded safety-enforcement layer interposed on a vehicle CAN bus
//! between a driving-assistance computer and the vehicle's actuators. Every
//! candidate outgoing frame is checked against per-vehicle safety rules and
//! the most recently observed vehicle state; the gate answers allow or deny,
//! nothing else.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on validation:
//! - RX ingestion keeps a small vehicle-state tracker current and derives the
//!   controls-allowed arming flag
//! - TX validation applies the per-vehicle rule table and signal checks
//! - Bus forwarding decides whether inbound frames are relayed, with an
//!   anti-spoofing blacklist per destination bus
//! - Rule tables are data, compiled per vehicle profile at init
//!
//! The library does NOT:
//! - Decode raw frames into signals (that is the upstream signal decoder)
//! - Plan trajectories or originate commands
//! - Talk to CAN hardware
//! - Mutate any frame content - it is purely a gate
//!
//! # Example Usage
//!
//! ```
//! use can_safety_core::{CanMessage, ProfileId, ProfileParams, SafetyGate};
//!
//! let mut gate = SafetyGate::new(ProfileId::Ford, ProfileParams::new()).unwrap();
//!
//! // Inbound frames keep the tracker current
//! let status = CanMessage::new(0x165, 0)
//!     .with_signal("BpedDrvAppl_D_Actl", 1i64)
//!     .with_signal("CcStat_D_Actl", 5i64);
//! gate.ingest(&status);
//! assert!(gate.controls_allowed());
//!
//! // Candidate outgoing frames are gated
//! let steer = CanMessage::new(0x3D3, 0)
//!     .with_signal("LatCtl_D_Rq", 1i64)
//!     .with_signal("LatCtlPathOffst_L_Actl", 0.0)
//!     .with_signal("LatCtlPath_An_Actl", 0.0)
//!     .with_signal("LatCtlCurv_No_Actl", 0.01)
//!     .with_signal("LatCtlCurv_NoRate_Actl", 0.0);
//! assert!(gate.tx_allowed(&steer));
//! ```

// Public modules
pub mod config;
pub mod forward;
pub mod gate;
pub mod profiles;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use config::{ProfileParams, Thresholds};
pub use forward::ForwardPolicy;
pub use gate::SafetyGate;
pub use profiles::{ProfileId, RelaySentinel, TxEntry, VehicleProfile};
pub use state::VehicleState;
pub use types::{CanMessage, Result, SafetyError, SignalValue};

// Internal engine modules (reached through SafetyGate)
mod rx;
mod tx;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
