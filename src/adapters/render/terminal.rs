//! Plain-text dashboard report.
//!
//! Every cycle prints one self-contained block: KPIs, the grouped tables, the
//! minute trend and a preview of the newest rows, followed by a footer with
//! the render time and refresh interval.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use super::format::{money, percent};
use crate::domain::dashboard::{DashboardState, DisplayView, WaitingView};
use crate::ports::{DashboardRenderer, RenderError};

const TITLE: &str = "Real-Time Appointments Dashboard";

/// Writes the text report to any writer (stdout in the binary).
pub struct TerminalRenderer<W> {
    out: Mutex<W>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Gives back the writer, e.g. a buffer inspected by tests.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> DashboardRenderer for TerminalRenderer<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    async fn render(&self, state: &DashboardState) -> Result<(), RenderError> {
        let text = render_text(state);
        let mut out = self
            .out
            .lock()
            .map_err(|_| RenderError::Unavailable("terminal writer poisoned".to_string()))?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Formats one cycle's state as text.
pub fn render_text(state: &DashboardState) -> String {
    let mut text = String::new();
    // Writing into a String cannot fail
    let _ = match state {
        DashboardState::Waiting(view) => write_waiting(&mut text, view),
        DashboardState::Displaying(view) => write_display(&mut text, view),
    };
    text
}

fn write_waiting(text: &mut String, view: &WaitingView) -> std::fmt::Result {
    writeln!(text, "=== {} ===", TITLE)?;
    writeln!(text, "Filter: {}", view.status_filter)?;
    writeln!(text, "{}", view.notice)?;
    if let Some(diagnostic) = &view.diagnostic {
        writeln!(text, "Error: {}", diagnostic)?;
    }
    write_footer(text, view.rendered_at, view.refresh_interval_secs)
}

fn write_display(text: &mut String, view: &DisplayView) -> std::fmt::Result {
    let rollup = &view.rollup;
    let kpis = &rollup.kpis;

    writeln!(text, "=== {} ===", TITLE)?;
    writeln!(
        text,
        "Displaying {} appointments (Filter: {})",
        view.row_count, view.status_filter
    )?;
    writeln!(
        text,
        "Total Appointments: {} | Total Cost: {} | Average Cost: {} | Completion Rate: {} | Avg Copay: {}",
        kpis.total_appointments,
        money(kpis.total_cost),
        money(kpis.average_cost),
        percent(kpis.completion_rate),
        money(kpis.average_copay),
    )?;

    writeln!(text, "\n-- Status Mix --")?;
    for row in &rollup.status_mix {
        writeln!(
            text,
            "  {:<10} {:>6}  {:>14}",
            row.status,
            row.appointments,
            money(row.revenue)
        )?;
    }

    writeln!(text, "\n-- Urgency by Department --")?;
    for row in &rollup.urgency_by_department {
        writeln!(
            text,
            "  {:<12} {:<9} {:>6}",
            row.department, row.urgency, row.appointments
        )?;
    }

    writeln!(text, "\n-- Payment Mix (Avg Cost vs Copay) --")?;
    for row in &rollup.payment_methods {
        writeln!(
            text,
            "  {:<10} avg cost {:>12}  avg copay {:>10}  volume {:>6}",
            row.payment_method,
            money(row.average_cost),
            money(row.average_copay),
            row.volume
        )?;
    }

    writeln!(text, "\n-- Appointments/min & Revenue --")?;
    if rollup.trend.is_empty() {
        writeln!(text, "  (no timestamp data)")?;
    }
    for bucket in &rollup.trend {
        writeln!(
            text,
            "  {}  {:>4}  {:>14}",
            bucket.bucket_start.format("%Y-%m-%d %H:%M"),
            bucket.appointments,
            money(bucket.revenue)
        )?;
    }

    writeln!(text, "\n-- Raw Data (Top {}) --", view.preview.len())?;
    for row in &view.preview {
        let base_cost = row.base_cost.map(money).unwrap_or_else(|| "-".to_string());
        let copay = row.copay.map(money).unwrap_or_else(|| "-".to_string());
        let timestamp = row
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            text,
            "  {} {:<10} {:<12} {:<9} {:<12} {:<10} {:>12} {:>10} {:>12} {}",
            row.appointment_id,
            row.status,
            row.department,
            row.urgency,
            row.city,
            row.payment_method,
            base_cost,
            copay,
            money(row.cost),
            timestamp
        )?;
    }

    write_footer(text, view.rendered_at, view.refresh_interval_secs)
}

fn write_footer(
    text: &mut String,
    rendered_at: chrono::DateTime<chrono::Utc>,
    refresh_interval_secs: u64,
) -> std::fmt::Result {
    writeln!(
        text,
        "\nLast updated: {} | Auto-refresh: {}s\n",
        rendered_at.format("%Y-%m-%d %H:%M:%S UTC"),
        refresh_interval_secs
    )
}
