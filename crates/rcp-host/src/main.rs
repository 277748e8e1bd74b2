use std::path::PathBuf;
use std::sync::Arc;

use rcp_core::services::config_loader;
use rcp_core::services::provisioner::Provisioner;
use rcp_core::services::report_store::ReportStore;
use rcp_core::services::sim::SimBus;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse CLI args
    let args: Vec<String> = std::env::args().skip(1).collect();
    let log_file = args
        .iter()
        .position(|a| a == "--log-file")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);
    let reject_ids: Vec<u32> = args
        .iter()
        .position(|a| a == "--reject")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.split(',').filter_map(|id| id.trim().parse().ok()).collect())
        .unwrap_or_default();
    let mut config_path = PathBuf::from("config.json");
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            // Flags with a value
            "--log-file" | "--reject" => i += 2,
            a if !a.starts_with("--") => {
                config_path = PathBuf::from(a);
                i += 1;
            }
            _ => i += 1,
        }
    }

    let _guard = setup_logging(log_file.as_deref());

    let config = config_loader::load(&config_path).await?;
    tracing::info!(
        config = %config_path.display(),
        panels = config.touchpanels.len(),
        sources = config.sources.len(),
        destinations = config.destinations.len(),
        "room configuration loaded"
    );

    let bus = Arc::new(SimBus::rejecting(reject_ids));
    let mut provisioner = Provisioner::new(bus);

    // Registration can block on bus I/O; keep it off the runtime's
    // startup path.
    let (provisioner, report) = tokio::task::spawn_blocking(move || {
        let report = provisioner.provision(&config);
        (provisioner, report)
    })
    .await?;

    let report_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    ReportStore::new(&report_dir).save(&report).await?;

    tracing::info!(
        succeeded = report.succeeded_count(),
        failed = report.failed_count(),
        registered = ?provisioner.registered_ids(),
        "provisioning complete"
    );

    Ok(())
}

/// Log to stderr by default; `--log-file` adds a non-blocking file
/// writer instead. Returns the appender guard that must stay alive for
/// the duration of the program.
fn setup_logging(
    log_file: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
            let file_name = path.file_name().unwrap_or_else(|| "rcp-host.log".as_ref());
            let file_appender = tracing_appender::rolling::never(
                directory.unwrap_or_else(|| ".".as_ref()),
                file_name,
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_env_filter(filter)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
            None
        }
    }
}
