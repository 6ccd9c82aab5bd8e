//! The seam between the aggregation core and whatever draws the charts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use evdash_common::{EvDashError, Result};

use crate::dashboard::DashboardReport;

/// Turns a finished report into bytes for a rendering layer.
pub trait DashboardRenderer {
    /// Short identifier, e.g. `json`.
    fn name(&self) -> &'static str;

    /// Renders the report.
    fn render(&self, report: &DashboardReport) -> Result<Vec<u8>>;
}

#[derive(Serialize)]
struct Envelope<'a> {
    generated_at: DateTime<Utc>,
    dashboard: &'a DashboardReport,
}

/// Writes the report as a JSON document for the dashboard page.
///
/// The document wraps the report with a `generated_at` timestamp; the report
/// itself stays free of wall-clock data.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    /// Compact output.
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether output is indented.
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Renders with a fixed timestamp.
    pub fn render_at(&self, report: &DashboardReport, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
        let envelope = Envelope {
            generated_at,
            dashboard: report,
        };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&envelope)
        } else {
            serde_json::to_vec(&envelope)
        }
        .map_err(|e| EvDashError::render_with_source("failed to encode dashboard as JSON", e))?;

        debug!(bytes = bytes.len(), "rendered dashboard JSON");
        Ok(bytes)
    }
}

impl DashboardRenderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    #[instrument(skip(self, report), fields(pretty = self.pretty))]
    fn render(&self, report: &DashboardReport) -> Result<Vec<u8>> {
        self.render_at(report, Utc::now())
    }
}
