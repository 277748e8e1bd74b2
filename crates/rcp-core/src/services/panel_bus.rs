use crate::models::PanelSpec;

/// Selects one of a panel's two item lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemList {
    Sources,
    Destinations,
}

/// Transport layer that hands out panel endpoints.
///
/// Implemented by the hardware/communication bus driver; the core only
/// depends on this contract. Construction never fails — it builds an
/// in-memory handle without touching the bus.
pub trait PanelBus: Send + Sync {
    fn construct(&self, spec: &PanelSpec) -> Box<dyn PanelEndpoint>;
}

/// A live handle for one declared panel.
pub trait PanelEndpoint: Send {
    /// Attempts the bus-level registration handshake. May block on bus
    /// I/O. Returns whether the handshake succeeded; duplicate address,
    /// bus unavailability and unsupported type all surface as `false`.
    fn register(&mut self) -> bool;

    /// The indexed item-list surface for `list`. Only addressable after
    /// a successful `register`.
    fn item_list(&mut self, list: ItemList) -> &mut dyn ItemListSurface;
}

/// Count and per-slot icon registers of one item list.
pub trait ItemListSurface {
    fn set_count(&mut self, count: u16);

    /// `slot` is 1-based: the first list entry lives in slot 1.
    fn set_icon(&mut self, slot: u16, icon: u16);
}
