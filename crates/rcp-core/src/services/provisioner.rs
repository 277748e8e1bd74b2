use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::models::{ItemSpec, PanelOutcome, PanelReport, ProvisioningReport, RoomConfig};
use crate::services::panel_bus::{ItemList, PanelBus, PanelEndpoint};

/// Drives endpoint registration and item-list population for every
/// panel declared in a room configuration.
///
/// Owns the registered endpoints, keyed by bus address. Entries are
/// created once per provisioning run and never aliased; a re-run
/// clears the map and rebuilds it from the configuration.
pub struct Provisioner {
    bus: Arc<dyn PanelBus>,
    endpoints: HashMap<u32, Box<dyn PanelEndpoint>>,
}

impl Provisioner {
    pub fn new(bus: Arc<dyn PanelBus>) -> Self {
        Self {
            bus,
            endpoints: HashMap::new(),
        }
    }

    /// Runs one full provisioning pass over `config`.
    ///
    /// Panels are processed sequentially in configuration order. A
    /// failed registration is logged, recorded as `Failed` and skipped;
    /// it never aborts the remaining panels. An empty panel list is a
    /// valid no-op, not an error. `register` may block on bus I/O, so
    /// callers on an async runtime should dispatch this through
    /// `tokio::task::spawn_blocking`.
    pub fn provision(&mut self, config: &RoomConfig) -> ProvisioningReport {
        let started_at = Utc::now();

        if config.touchpanels.is_empty() {
            tracing::info!("no touchpanels declared, nothing to provision");
            return ProvisioningReport {
                started_at,
                finished_at: Utc::now(),
                panels: Vec::new(),
                source_overflow: false,
                destination_overflow: false,
            };
        }

        let (source_count, source_overflow) = clamp_count(config.sources.len(), "sources");
        let (destination_count, destination_overflow) =
            clamp_count(config.destinations.len(), "destinations");

        self.endpoints.clear();
        let mut panels = Vec::with_capacity(config.touchpanels.len());

        for panel in &config.touchpanels {
            let mut endpoint = self.bus.construct(panel);

            if !endpoint.register() {
                tracing::error!(
                    panel = %panel.label,
                    id = panel.id,
                    panel_type = %panel.panel_type,
                    "panel registration failed"
                );
                panels.push(PanelReport {
                    id: panel.id,
                    label: panel.label.clone(),
                    outcome: PanelOutcome::Failed,
                });
                continue;
            }

            tracing::info!(
                panel = %panel.label,
                id = panel.id,
                panel_type = %panel.panel_type,
                "panel registered"
            );

            populate(
                endpoint.as_mut(),
                ItemList::Sources,
                source_count,
                &config.sources,
            );
            populate(
                endpoint.as_mut(),
                ItemList::Destinations,
                destination_count,
                &config.destinations,
            );
            tracing::info!(
                panel = %panel.label,
                sources = source_count,
                destinations = destination_count,
                "panel item lists populated"
            );

            panels.push(PanelReport {
                id: panel.id,
                label: panel.label.clone(),
                outcome: PanelOutcome::Succeeded {
                    sources: source_count,
                    destinations: destination_count,
                },
            });
            self.endpoints.insert(panel.id, endpoint);
        }

        ProvisioningReport {
            started_at,
            finished_at: Utc::now(),
            panels,
            source_overflow,
            destination_overflow,
        }
    }

    /// Whether a panel registered successfully in the last run.
    pub fn is_registered(&self, id: u32) -> bool {
        self.endpoints.contains_key(&id)
    }

    /// Bus addresses of all registered endpoints.
    pub fn registered_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.endpoints.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Write `count` and the per-slot icons of one item list. Slot numbers
/// are 1-based on the panel.
fn populate(endpoint: &mut dyn PanelEndpoint, list: ItemList, count: u16, items: &[ItemSpec]) {
    let surface = endpoint.item_list(list);
    surface.set_count(count);
    for (i, item) in items.iter().take(count as usize).enumerate() {
        surface.set_icon(i as u16 + 1, item.icon);
    }
}

/// Clamp an item-list length to the 16-bit item-count register width.
/// Overflow truncates and is reported, never a crash.
fn clamp_count(len: usize, list: &str) -> (u16, bool) {
    if len > u16::MAX as usize {
        tracing::error!(
            list,
            len,
            max = u16::MAX,
            "item list exceeds count register width, truncating"
        );
        (u16::MAX, true)
    } else {
        (len as u16, false)
    }
}
