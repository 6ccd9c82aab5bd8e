//! Ties configuration, table loading, aggregation, and rendering together.

use std::path::Path;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

use evdash_charts::{DashboardBuilder, DashboardRenderer, DashboardReport, JsonRenderer};
use evdash_common::{EvDashError, RecordFilter, TableLoader, VehicleRecord, VehicleTable};
use evdash_config::Config;

use crate::error::{AppError, AppResult};

/// One configured dashboard run.
pub struct DashboardApp {
    config: Arc<Config>,
    builder: DashboardBuilder,
}

impl DashboardApp {
    /// Creates an app from a validated configuration.
    pub fn new(config: Config) -> Self {
        let builder = DashboardBuilder::from_config(&config.charts);
        Self {
            config: Arc::new(config),
            builder,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the configured table.
    pub async fn load_table(&self) -> AppResult<VehicleTable> {
        let delimiter = u8::try_from(self.config.data.delimiter).map_err(|e| {
            EvDashError::config_with_source("data.delimiter must be a single ASCII character", e)
        })?;
        let table = TableLoader::new(&self.config.data.path)
            .with_delimiter(delimiter)
            .load()
            .await?;
        Ok(table)
    }

    /// Aggregates the table for one selection.
    pub fn build_report(&self, records: &[VehicleRecord], filter: &RecordFilter) -> DashboardReport {
        self.builder.build(records, filter)
    }

    /// Loads, aggregates, renders, and writes the report.
    ///
    /// Returns the number of bytes written.
    #[instrument(skip(self, renderer), fields(renderer = renderer.name(), filter = %filter))]
    pub async fn run(
        &self,
        filter: &RecordFilter,
        renderer: &dyn DashboardRenderer,
    ) -> AppResult<usize> {
        let table = self.load_table().await?;
        let report = self.build_report(&table, filter);
        let bytes = renderer.render(&report)?;
        self.write_output(&bytes).await?;
        info!(bytes = bytes.len(), "dashboard report written");
        Ok(bytes.len())
    }

    /// Runs with the JSON renderer.
    pub async fn run_json(&self, filter: &RecordFilter, pretty: bool) -> AppResult<usize> {
        let renderer = if pretty {
            JsonRenderer::pretty()
        } else {
            JsonRenderer::new()
        };
        self.run(filter, &renderer).await
    }

    async fn write_output(&self, bytes: &[u8]) -> AppResult<()> {
        match &self.config.data.output {
            Some(path) => write_file(path, bytes).await,
            None => {
                let mut stdout = tokio::io::stdout();
                let result = async {
                    stdout.write_all(bytes).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await
                }
                .await;
                result.map_err(|source| AppError::Output {
                    target: "stdout".to_string(),
                    source,
                })
            }
        }
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> AppResult<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| AppError::Output {
            target: path.display().to_string(),
            source,
        })
}
