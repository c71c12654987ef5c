//! Decoded-frame trace input
//!
//! The replay tool consumes a JSON-Lines file, one record per frame, as
//! produced by the signal decoder plus a direction tag:
//!
//! ```text
//! {"dir":"rx","id":357,"bus":0,"signals":{"BpedDrvAppl_D_Actl":1,"CcStat_D_Actl":5}}
//! {"dir":"tx","id":979,"bus":0,"signals":{"LatCtl_D_Rq":1,"LatCtlCurv_No_Actl":0.01, ...}}
//! ```
//!
//! `rx` records are ingested (and routed through the forwarding policy);
//! `tx` records are candidate transmissions to validate.

use anyhow::{Context, Result};
use can_safety_core::CanMessage;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Frame direction relative to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Inbound frame from the vehicle/camera buses
    Rx,
    /// Candidate outgoing frame submitted for validation
    Tx,
}

/// One trace record: a decoded frame plus its direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub dir: Direction,
    #[serde(flatten)]
    pub msg: CanMessage,
}

/// Read a JSON-Lines trace file
///
/// Blank lines and `#` comment lines are skipped; any other unparseable line
/// is an error (a half-read trace would silently skew the replay).
pub fn read_trace(path: &Path) -> Result<Vec<TraceRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open trace file: {:?}", path))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {:?} line {}", path, lineno + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(trimmed)
            .with_context(|| format!("Invalid trace record at {:?} line {}", path, lineno + 1))?;
        records.push(record);
    }

    log::info!("Loaded {} trace records from {:?}", records.len(), path);
    Ok(records)
}
