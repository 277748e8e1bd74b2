pub mod config_loader;
pub mod panel_bus;
pub mod provisioner;
pub mod report_store;
pub mod sim;
