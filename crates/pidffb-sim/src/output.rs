//! Output formatting for simulation results

use std::io::{self, Write};

use anyhow::Error;
use colored::Colorize;
use serde_json::json;

use crate::error::SimError;
use crate::runner::SimReport;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let sim_error = error.downcast_ref::<SimError>();
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "category": sim_error.and_then(SimError::category).map(|c| c.to_string()),
            "severity": sim_error.map(|e| e.severity().to_string()),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Write the report as a JSON document.
pub fn write_json(report: &SimReport, out: &mut impl Write) -> anyhow::Result<()> {
    let document = json!({
        "success": true,
        "report": report,
        "peak": report.peak(),
    });
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}

/// Write the report as one line per tick followed by feature reads.
pub fn write_text(report: &SimReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Forces:".bold())?;
    for sample in &report.samples {
        let [x, y] = sample.forces;
        writeln!(
            out,
            "  t={:>6}ms  x={:>7}  y={:>7}",
            sample.time_ms, x, y
        )?;
    }

    if !report.feature_reads.is_empty() {
        writeln!(out, "{}", "Feature reports:".bold())?;
        for read in &report.feature_reads {
            writeln!(
                out,
                "  t={:>6}ms  id={:#04x}  {}",
                read.time_ms,
                read.report_id,
                hex(&read.bytes)
            )?;
        }
    }

    let [px, py] = report.peak();
    writeln!(out, "Peak: x={px} y={py}")?;
    writeln!(out, "PID state: {}", hex(&report.pid_state))?;
    if report.dropped_reports > 0 {
        writeln!(
            out,
            "{}",
            format!("Dropped reports: {}", report.dropped_reports).yellow()
        )?;
    }
    if report.skipped_events > 0 {
        writeln!(
            out,
            "{}",
            format!("Skipped events: {}", report.skipped_events).yellow()
        )?;
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
