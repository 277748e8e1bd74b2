use std::path::{Path, PathBuf};

use crate::error::{ProvisionerError, Result};
use crate::models::ProvisioningReport;

const REPORT_FILENAME: &str = "provision-report.json";

/// Persists the last provisioning report for host diagnostics.
pub struct ReportStore {
    report_file_path: PathBuf,
}

impl ReportStore {
    pub fn new(directory: &Path) -> Self {
        Self {
            report_file_path: directory.join(REPORT_FILENAME),
        }
    }

    pub async fn load(&self) -> Result<Option<ProvisioningReport>> {
        if !self.report_file_path.exists() {
            return Ok(None);
        }
        let json = tokio::fs::read_to_string(&self.report_file_path)
            .await
            .map_err(|e| ProvisionerError::Report(format!("failed to read report file: {e}")))?;
        let report: ProvisioningReport = serde_json::from_str(&json)?;
        Ok(Some(report))
    }

    pub async fn save(&self, report: &ProvisioningReport) -> Result<()> {
        if let Some(parent) = self.report_file_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ProvisionerError::Report(format!("failed to create report dir: {e}"))
            })?;
        }
        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&self.report_file_path, json)
            .await
            .map_err(|e| ProvisionerError::Report(format!("failed to write report file: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PanelOutcome, PanelReport};
    use chrono::Utc;

    fn test_report() -> ProvisioningReport {
        ProvisioningReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            panels: vec![PanelReport {
                id: 3,
                label: "Lobby".into(),
                outcome: PanelOutcome::Succeeded {
                    sources: 2,
                    destinations: 1,
                },
            }],
            source_overflow: false,
            destination_overflow: false,
        }
    }

    #[tokio::test]
    async fn round_trip_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        store.save(&test_report()).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.panels.len(), 1);
        assert_eq!(loaded.panels[0].label, "Lobby");
        assert_eq!(loaded.succeeded_count(), 1);
    }

    #[tokio::test]
    async fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }
}
