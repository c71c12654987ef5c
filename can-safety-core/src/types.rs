//! Core types for the CAN safety gate library
//!
//! This module defines the message and signal types the gate consumes and the
//! error type for initialization. Frame decoding itself (bit extraction,
//! scaling, endianness) happens upstream in the signal decoder - the gate only
//! ever sees messages that already carry named, scaled signal values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Result type for gate initialization and configuration
pub type Result<T> = std::result::Result<T, SafetyError>;

/// Errors that can occur while setting up a gate
///
/// Note that frame validation itself never produces an error: an unsafe or
/// undecodable frame is expressed as a deny decision, not an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum SafetyError {
    #[error("Unknown vehicle profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid profile parameter: {0}")]
    InvalidParameter(String),
}

/// A decoded CAN message as seen by the gate
///
/// Produced by the external signal decoder: the arbitration id and bus index
/// of the raw frame, plus every signal the message database resolved from the
/// payload. The gate treats messages as read-only - it decides whether a
/// frame may pass, it never rewrites one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanMessage {
    /// CAN arbitration id (11-bit or 29-bit)
    pub id: u32,
    /// Bus index the frame was received on / is destined for
    pub bus: u8,
    /// Decoded signal values by name
    ///
    /// A malformed or unrecognized frame simply decodes to fewer (or zero)
    /// signals; the engines treat missing signals as "do nothing safely".
    #[serde(default)]
    pub signals: HashMap<String, SignalValue>,
}

impl CanMessage {
    /// Create a message with no signals
    pub fn new(id: u32, bus: u8) -> Self {
        Self {
            id,
            bus,
            signals: HashMap::new(),
        }
    }

    /// Builder method: attach a signal value
    pub fn with_signal(mut self, name: impl Into<String>, value: impl Into<SignalValue>) -> Self {
        self.signals.insert(name.into(), value.into());
        self
    }

    /// Look up a signal by name
    pub fn signal(&self, name: &str) -> Option<SignalValue> {
        self.signals.get(name).copied()
    }

    /// Look up a signal and coerce it to f64
    pub fn signal_f64(&self, name: &str) -> Option<f64> {
        self.signal(name).map(|v| v.as_f64())
    }

    /// Look up a signal and coerce it to an unsigned raw value
    ///
    /// Returns `None` for negative values as well as for missing signals -
    /// enum-coded status signals are never negative, so a negative reading
    /// means the frame did not decode sensibly.
    pub fn signal_u64(&self, name: &str) -> Option<u64> {
        match self.signal(name)?.as_i64() {
            v if v >= 0 => Some(v as u64),
            _ => None,
        }
    }

    /// Look up a signal and coerce it to bool (non-zero = true)
    pub fn signal_bool(&self, name: &str) -> Option<bool> {
        self.signal(name).map(|v| v.as_bool())
    }
}

/// Signal value types emitted by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    /// Boolean value (single-bit signals)
    Boolean(bool),
    /// Signed integer value (unscaled or enum-coded signals)
    Integer(i64),
    /// Floating-point value (after scaling/offset)
    Float(f64),
}

impl SignalValue {
    /// Convert to f64 for range/zero checks
    pub fn as_f64(&self) -> f64 {
        match self {
            SignalValue::Boolean(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            SignalValue::Integer(v) => *v as f64,
            SignalValue::Float(v) => *v,
        }
    }

    /// Convert to i64 (floats are truncated)
    pub fn as_i64(&self) -> i64 {
        match self {
            SignalValue::Boolean(v) => *v as i64,
            SignalValue::Integer(v) => *v,
            SignalValue::Float(v) => *v as i64,
        }
    }

    /// Convert to bool (non-zero = true)
    pub fn as_bool(&self) -> bool {
        match self {
            SignalValue::Boolean(v) => *v,
            SignalValue::Integer(v) => *v != 0,
            SignalValue::Float(v) => *v != 0.0,
        }
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalValue::Boolean(v) => write!(f, "{}", v),
            SignalValue::Integer(v) => write!(f, "{}", v),
            SignalValue::Float(v) => write!(f, "{:.4}", v),
        }
    }
}

impl From<bool> for SignalValue {
    fn from(v: bool) -> Self {
        SignalValue::Boolean(v)
    }
}

impl From<i64> for SignalValue {
    fn from(v: i64) -> Self {
        SignalValue::Integer(v)
    }
}

impl From<u32> for SignalValue {
    fn from(v: u32) -> Self {
        SignalValue::Integer(v as i64)
    }
}

impl From<f64> for SignalValue {
    fn from(v: f64) -> Self {
        SignalValue::Float(v)
    }
}
