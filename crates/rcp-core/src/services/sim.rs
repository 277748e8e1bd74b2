use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::models::PanelSpec;
use crate::services::panel_bus::{ItemList, ItemListSurface, PanelBus, PanelEndpoint};

/// Shadow of one simulated panel's registers.
#[derive(Debug, Clone, Default)]
pub struct PanelImage {
    pub panel_type: String,
    pub registered: bool,
    pub source_count: Option<u16>,
    pub destination_count: Option<u16>,
    /// 1-based slot -> icon index.
    pub source_icons: HashMap<u16, u16>,
    pub destination_icons: HashMap<u16, u16>,
}

/// In-memory panel bus standing in for the physical transport.
///
/// Registers every panel unless its id is in the reject set. Keeps a
/// register image per constructed panel so callers can inspect what
/// was written to it.
pub struct SimBus {
    reject_ids: HashSet<u32>,
    images: Arc<Mutex<HashMap<u32, PanelImage>>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::rejecting([])
    }

    /// A bus that fails the registration handshake for the given ids.
    pub fn rejecting<I: IntoIterator<Item = u32>>(ids: I) -> Self {
        Self {
            reject_ids: ids.into_iter().collect(),
            images: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register image of the panel with bus address `id`, if it was
    /// ever constructed.
    pub fn image(&self, id: u32) -> Option<PanelImage> {
        self.images.lock().unwrap().get(&id).cloned()
    }

    /// Number of panels constructed so far.
    pub fn constructed_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelBus for SimBus {
    fn construct(&self, spec: &PanelSpec) -> Box<dyn PanelEndpoint> {
        {
            let mut images = self.images.lock().unwrap();
            images.insert(
                spec.id,
                PanelImage {
                    panel_type: spec.panel_type.clone(),
                    ..PanelImage::default()
                },
            );
        }
        Box::new(SimEndpoint {
            accept: !self.reject_ids.contains(&spec.id),
            sources: SimSurface {
                id: spec.id,
                list: ItemList::Sources,
                images: self.images.clone(),
            },
            destinations: SimSurface {
                id: spec.id,
                list: ItemList::Destinations,
                images: self.images.clone(),
            },
        })
    }
}

struct SimEndpoint {
    accept: bool,
    sources: SimSurface,
    destinations: SimSurface,
}

impl PanelEndpoint for SimEndpoint {
    fn register(&mut self) -> bool {
        if self.accept {
            let mut images = self.sources.images.lock().unwrap();
            if let Some(image) = images.get_mut(&self.sources.id) {
                image.registered = true;
            }
        }
        self.accept
    }

    fn item_list(&mut self, list: ItemList) -> &mut dyn ItemListSurface {
        match list {
            ItemList::Sources => &mut self.sources,
            ItemList::Destinations => &mut self.destinations,
        }
    }
}

struct SimSurface {
    id: u32,
    list: ItemList,
    images: Arc<Mutex<HashMap<u32, PanelImage>>>,
}

impl ItemListSurface for SimSurface {
    fn set_count(&mut self, count: u16) {
        let mut images = self.images.lock().unwrap();
        if let Some(image) = images.get_mut(&self.id) {
            match self.list {
                ItemList::Sources => image.source_count = Some(count),
                ItemList::Destinations => image.destination_count = Some(count),
            }
        }
    }

    fn set_icon(&mut self, slot: u16, icon: u16) {
        let mut images = self.images.lock().unwrap();
        if let Some(image) = images.get_mut(&self.id) {
            match self.list {
                ItemList::Sources => image.source_icons.insert(slot, icon),
                ItemList::Destinations => image.destination_icons.insert(slot, icon),
            };
        }
    }
}
