//! Text report generation
//!
//! Renders a replay summary plus the gate's final tracked state into a plain
//! text report for conformance review.

use crate::replay::ReplaySummary;
use can_safety_core::SafetyGate;
use chrono::Utc;
use std::fmt::Write;

/// Render the replay report
pub fn render(gate: &SafetyGate, summary: &ReplaySummary) -> String {
    let mut out = String::new();
    let state = gate.state();

    // String formatting cannot fail; unwraps below are on fmt::Write
    writeln!(out, "CAN Safety Gate - Replay Report").unwrap();
    writeln!(out, "Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).unwrap();
    writeln!(out, "Profile:   {}", gate.profile().name).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "Frames").unwrap();
    writeln!(out, "  RX ingested:   {}", summary.rx_frames).unwrap();
    writeln!(out, "  forwarded:     {}", summary.forwarded).unwrap();
    writeln!(out, "  swallowed:     {}", summary.swallowed).unwrap();
    writeln!(out, "  TX allowed:    {}", summary.tx_allowed).unwrap();
    writeln!(out, "  TX denied:     {}", summary.tx_denied).unwrap();

    if !summary.denied_ids.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "Denied ids").unwrap();
        for (id, count) in &summary.denied_ids {
            writeln!(out, "  0x{:03X}: {}", id, count).unwrap();
        }
    }

    if !summary.verdicts.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "TX verdicts").unwrap();
        for verdict in &summary.verdicts {
            writeln!(
                out,
                "  #{:<6} 0x{:03X} bus {}  {}",
                verdict.index,
                verdict.id,
                verdict.bus,
                if verdict.allowed { "allow" } else { "DENY" }
            )
            .unwrap();
        }
    }

    writeln!(out).unwrap();
    writeln!(out, "Final state").unwrap();
    writeln!(out, "  controls allowed: {}", state.controls_allowed()).unwrap();
    writeln!(out, "  brake pressed:    {}", state.brake_pressed_prev()).unwrap();
    writeln!(out, "  cruise engaged:   {}", state.cruise_engaged()).unwrap();
    writeln!(out, "  gas pressed:      {}", state.gas_pressed()).unwrap();
    writeln!(out, "  standstill:       {}", state.standstill()).unwrap();
    writeln!(out, "  relay fault:      {}", state.relay_fault()).unwrap();

    out
}
