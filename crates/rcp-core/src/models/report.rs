use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-panel provisioning outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum PanelOutcome {
    /// Registered and populated; carries the counts written to the
    /// panel's item-count registers.
    Succeeded { sources: u16, destinations: u16 },
    /// Registration handshake failed; the panel was skipped.
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PanelReport {
    pub id: u32,
    pub label: String,
    pub outcome: PanelOutcome,
}

/// Result of one provisioning run: one entry per declared panel, in
/// configuration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub panels: Vec<PanelReport>,
    /// Set when the source list exceeded the 16-bit item-count width
    /// and was truncated.
    pub source_overflow: bool,
    pub destination_overflow: bool,
}

impl ProvisioningReport {
    pub fn succeeded_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|p| matches!(p.outcome, PanelOutcome::Succeeded { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|p| p.outcome == PanelOutcome::Failed)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
