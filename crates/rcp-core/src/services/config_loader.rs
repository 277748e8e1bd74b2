use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ProvisionerError, Result};
use crate::models::RoomConfig;

/// Model tokens like "TSW-1070" or "Tsw760".
static PANEL_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap());

/// Load and validate a room configuration.
///
/// The provisioner assumes a structurally valid configuration; this is
/// the validation boundary in front of it. Zero or duplicate panel ids
/// and malformed panel types are rejected here rather than surfacing
/// as registration conflicts on the bus.
pub async fn load(path: &Path) -> Result<RoomConfig> {
    if !path.exists() {
        return Err(ProvisionerError::ConfigNotFound(path.to_path_buf()));
    }
    let contents = tokio::fs::read_to_string(path).await?;
    let config: RoomConfig = serde_json::from_str(&contents)
        .map_err(|e| ProvisionerError::InvalidConfig(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &RoomConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for panel in &config.touchpanels {
        if panel.id == 0 {
            return Err(ProvisionerError::InvalidConfig(format!(
                "panel '{}' has id 0, bus addresses start at 1",
                panel.label
            )));
        }
        if !seen.insert(panel.id) {
            return Err(ProvisionerError::InvalidConfig(format!(
                "duplicate panel id {}",
                panel.id
            )));
        }
        if !PANEL_TYPE_RE.is_match(&panel.panel_type) {
            return Err(ProvisionerError::InvalidConfig(format!(
                "panel '{}' has malformed type '{}'",
                panel.label, panel.panel_type
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn parse_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "touchpanels": [
                {"type": "TSW-1070", "id": 3, "label": "Lobby"},
                {"type": "TSW-770", "id": 4, "label": "Conference"}
            ],
            "sources": [
                {"icon": 5, "label": "PC"},
                {"icon": 7, "label": "Laptop"}
            ],
            "destinations": [
                {"icon": 9, "label": "Display"}
            ]
        }"#;
        let path = dir.path().join("config.json");
        fs::write(&path, json).unwrap();

        let config = load(&path).await.unwrap();
        assert_eq!(config.touchpanels.len(), 2);
        assert_eq!(config.touchpanels[0].panel_type, "TSW-1070");
        assert_eq!(config.touchpanels[1].id, 4);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[1].icon, 7);
        assert_eq!(config.destinations[0].label, "Display");
    }

    #[tokio::test]
    async fn parse_config_without_panels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sources": [{"icon": 1, "label": "PC"}]}"#).unwrap();

        let config = load(&path).await.unwrap();
        assert!(config.touchpanels.is_empty());
        assert_eq!(config.sources.len(), 1);
        assert!(config.destinations.is_empty());
    }

    #[tokio::test]
    async fn missing_config_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("config.json")).await,
            Err(ProvisionerError::ConfigNotFound(_))
        ));
    }

    #[tokio::test]
    async fn zero_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"touchpanels": [{"type": "TSW-1070", "id": 0, "label": "Lobby"}]}"#,
        )
        .unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(matches!(err, ProvisionerError::InvalidConfig(_)));
        assert!(err.to_string().contains("id 0"));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"touchpanels": [
                {"type": "TSW-1070", "id": 3, "label": "Lobby"},
                {"type": "TSW-770", "id": 3, "label": "Conference"}
            ]}"#,
        )
        .unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(err.to_string().contains("duplicate panel id 3"));
    }

    #[tokio::test]
    async fn malformed_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"touchpanels": [{"type": "", "id": 3, "label": "Lobby"}]}"#,
        )
        .unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(err.to_string().contains("malformed type"));
    }
}
