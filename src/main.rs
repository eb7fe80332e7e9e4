use std::sync::Arc;

use anyhow::Context;

use sezam::{
    access::{AccessController, GrantPolicy},
    audit::EventLog,
    config::Settings,
    device::{Actuator, CredentialSource, SimulatedLock, SimulatedReader},
    logging::init_logging,
    registry::{RegistryEngine, RegistryStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    let _logging = init_logging(&settings)
        .map_err(|err| anyhow::anyhow!("initializing logging: {err}"))?;

    let registry: Arc<dyn RegistryStore> =
        Arc::new(RegistryEngine::initialize(&settings).context("opening credential registry")?);
    let events = Arc::new(match &settings.event_log_path {
        Some(path) => EventLog::with_journal(path).context("opening event journal")?,
        None => EventLog::in_memory(),
    });
    let actuator: Arc<dyn Actuator> = Arc::new(SimulatedLock::new());
    let reader: Arc<dyn CredentialSource> = Arc::new(SimulatedReader::new());

    let controller = Arc::new(AccessController::new(
        registry,
        Arc::clone(&actuator),
        events,
        GrantPolicy::from_settings(&settings),
    ));

    // An interrupt wakes any in-flight hold; the cycle relocks before
    // the loop observes the flag and exits.
    {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, shutting down");
                controller.trigger_shutdown();
            }
        });
    }

    tracing::info!("place a credential on the scanner");
    while !controller.is_shutting_down() {
        match controller.run_cycle(reader.as_ref()).await {
            Ok(decision) => tracing::debug!(decision = ?decision, "scan cycle complete"),
            Err(err) => tracing::error!(error = %err, "scan cycle failed"),
        }
    }

    // Every termination path ends with the barrier engaged.
    if let Err(err) = actuator.engage() {
        tracing::error!(error = %err, "final relock failed");
    }
    tracing::info!("stopped, barrier engaged");

    Ok(())
}
