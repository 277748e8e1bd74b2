pub mod config;
pub mod report;

pub use config::{ItemSpec, PanelSpec, RoomConfig};
pub use report::{PanelOutcome, PanelReport, ProvisioningReport};
