use std::sync::Arc;

use anyhow::Context;
use sw_app::pages::{default_page_tree, load_services_defaults, PageEnv};
use sw_app::{
    DisableCaptivePortal, DisableThemePackages, FlowController, FlowDeps, MarkSetupComplete,
};
use sw_core::config::AppConfig;
use sw_core::ports::FlowEventPort;
use tokio::io::AsyncBufRead;
use tracing::{info, info_span, Instrument};

use super::wiring::wire_ports;
use crate::driver::{run_driver, JsonEvents};

/// Runs the setup flow against `input`, or returns right away when setup
/// already completed on this device.
pub async fn run_setup<R>(config: &AppConfig, input: R) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let ports = wire_ports(config).context("Failed to wire adapters")?;

    let status = ports
        .setup_status
        .get_status()
        .await
        .context("Failed to read setup status")?;
    if status.has_completed {
        info!("setup already completed, nothing to do");
        return Ok(());
    }

    let seed = DisableCaptivePortal::new(ports.settings_store.clone())
        .execute(config.is_owner)
        .await;
    DisableThemePackages::new(ports.packages.clone())
        .execute(config.is_owner)
        .await;
    let services = load_services_defaults(ports.settings_store.as_ref(), config).await;

    let env = PageEnv {
        hardware: ports.hardware.clone(),
        radio: ports.radio.clone(),
        services,
    };
    let pages = default_page_tree(&env).context("Failed to build page tree")?;

    let events: Arc<dyn FlowEventPort> = Arc::new(JsonEvents::stdout());
    let controller = FlowController::with_initial_settings(
        pages,
        seed,
        FlowDeps {
            settings_store: ports.settings_store.clone(),
            events,
            mark_setup_complete: Arc::new(MarkSetupComplete::new(
                ports.setup_status.clone(),
                ports.settings_store.clone(),
            )),
        },
    );

    run_driver(&controller, &ports.radio, input)
        .instrument(info_span!("bootstrap.run_setup"))
        .await
}
