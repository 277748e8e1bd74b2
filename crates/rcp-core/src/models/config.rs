use serde::{Deserialize, Serialize};

/// Room configuration as loaded from `config.json`.
///
/// `sources` and `destinations` are global: every declared touchpanel
/// shows the same item lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConfig {
    #[serde(default)]
    pub touchpanels: Vec<PanelSpec>,
    #[serde(default)]
    pub sources: Vec<ItemSpec>,
    #[serde(default)]
    pub destinations: Vec<ItemSpec>,
}

/// One declared user-interface panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PanelSpec {
    /// Hardware variant, e.g. "TSW-1070".
    #[serde(rename = "type")]
    pub panel_type: String,
    /// Bus address. Non-zero and unique within a configuration.
    pub id: u32,
    /// Display name, used for logs only.
    pub label: String,
}

/// One entry of a source or destination list. Position `i` in the
/// sequence maps to on-screen slot `i + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpec {
    /// Icon-set index.
    pub icon: u16,
    pub label: String,
}
