//! Report formatting for previews and config dumps.
//!
//! Pure functions: (data, OutputFormat) -> String. No I/O.

use crate::config::CardConfig;
use crate::error::Result;
use crate::preview::PreviewReport;
use crate::types::OutputFormat;

/// Format a preview report for output.
pub fn format_report(report: &PreviewReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(format_human(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Format the effective config for output.
pub fn format_config(config: &CardConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(format_config_human(config)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &PreviewReport) -> String {
    let mut out = String::new();

    out.push_str("=== Buttons ===\n");
    out.push_str(&format!("Declines:           {}\n", report.declines));
    out.push_str(&format!("Yes scale:          {:.2}\n", report.positive_scale));
    out.push_str(&format!(
        "No scale:           {:.2}{}\n",
        report.negative_scale,
        if report.decline_enabled { "" } else { " (disabled)" }
    ));
    out.push('\n');

    if !report.sample.is_empty() {
        out.push_str("=== First Batch ===\n");
        for p in &report.sample {
            out.push_str(&format!(
                "  {} {} at ({:.0}%, {:.0}%) -> ({:+.0}px, {:+.0}px), {:.2}s +{:.2}s delay\n",
                p.id, p.glyph, p.origin.0, p.origin.1, p.travel.0, p.travel.1, p.duration, p.delay
            ));
        }
        out.push('\n');
    }

    out.push_str("=== Summary ===\n");
    out.push_str(&format!(
        "Loop:               {} x{} every {}ms, cap {}\n",
        report.trajectory, report.per_tick, report.rate_ms, report.max_particles
    ));
    out.push_str(&format!(
        "Ran:                {}ms over {} frames\n",
        report.duration_ms, report.frames
    ));
    out.push_str(&format!("Spawned:            {}\n", report.stats.spawned));
    out.push_str(&format!("Expired:            {}\n", report.stats.expired));
    out.push_str(&format!("Evicted:            {}\n", report.stats.evicted));
    out.push_str(&format!("Peak active:        {}\n", report.peak_active));
    out.push_str(&format!(
        "After replay:       {} active, {} timers\n",
        report.active_after_stop, report.pending_after_stop
    ));

    out
}

fn format_config_human(config: &CardConfig) -> String {
    let p = &config.particles;
    let mut out = String::new();
    out.push_str(&format!("Question:      {}\n", config.question));
    out.push_str(&format!("Celebration:   {}\n", config.celebration));
    out.push_str(&format!(
        "Photos:        {} from {}\n",
        config.photo_count,
        config.asset_root.display()
    ));
    out.push_str(&format!(
        "Particles:     {} x{} every {}ms, cap {}, +{}ms buffer\n",
        p.trajectory, p.per_tick, p.rate_ms, p.max_particles, p.buffer_ms
    ));
    match p.seed {
        Some(seed) => out.push_str(&format!("Seed:          {}\n", seed)),
        None => out.push_str("Seed:          random\n"),
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
