//! Trace replay
//!
//! Feeds trace records through a gate in order - RX records into ingestion
//! (also evaluating the forwarding decision for them), TX records into
//! validation - and collects the verdicts for the report.

use crate::trace::{Direction, TraceRecord};
use can_safety_core::SafetyGate;
use std::collections::BTreeMap;

/// One TX verdict, kept for the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxVerdict {
    /// Index of the record in the trace
    pub index: usize,
    pub id: u32,
    pub bus: u8,
    pub allowed: bool,
}

/// Aggregated results of a replay run
#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    pub rx_frames: usize,
    pub forwarded: usize,
    pub swallowed: usize,
    pub tx_allowed: usize,
    pub tx_denied: usize,
    /// Denial counts per message id
    pub denied_ids: BTreeMap<u32, usize>,
    pub verdicts: Vec<TxVerdict>,
}

/// Replay trace records through the gate
///
/// Records are processed strictly in trace order; edge detection in the
/// tracker depends on it. `max_frames` truncates the run for quick checks.
pub fn replay(
    gate: &mut SafetyGate,
    records: &[TraceRecord],
    max_frames: Option<usize>,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    let limit = max_frames.unwrap_or(records.len());

    for (index, record) in records.iter().take(limit).enumerate() {
        match record.dir {
            Direction::Rx => {
                summary.rx_frames += 1;
                gate.ingest(&record.msg);
                match gate.forward_destination(&record.msg) {
                    Some(dest) => {
                        log::debug!(
                            "rx #{}: 0x{:X} bus {} -> forwarded to bus {}",
                            index,
                            record.msg.id,
                            record.msg.bus,
                            dest
                        );
                        summary.forwarded += 1;
                    }
                    None => summary.swallowed += 1,
                }
            }
            Direction::Tx => {
                let allowed = gate.tx_allowed(&record.msg);
                if allowed {
                    summary.tx_allowed += 1;
                } else {
                    summary.tx_denied += 1;
                    *summary.denied_ids.entry(record.msg.id).or_insert(0) += 1;
                    log::debug!(
                        "tx #{}: 0x{:X} bus {} denied",
                        index,
                        record.msg.id,
                        record.msg.bus
                    );
                }
                summary.verdicts.push(TxVerdict {
                    index,
                    id: record.msg.id,
                    bus: record.msg.bus,
                    allowed,
                });
            }
        }
    }

    summary
}
