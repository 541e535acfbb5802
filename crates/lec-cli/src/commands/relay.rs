use anyhow::Context;
use lec_config::{ConfigError, LecternConfig, RelayConfig};
use lec_relay::RelayServer;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RelayArgs;

/// Handle `lectern relay`. Runs until Ctrl-C.
pub async fn handle(args: &RelayArgs, config: &LecternConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let relay = relay_config(args, config)?;

    // The relay's upstream client is blocking, so it is built and driven
    // off the async runtime.
    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();
    let mut task = tokio::task::spawn_blocking(move || {
        let server = RelayServer::bind(relay)?;
        let _ = ready_tx.send((server.local_addr(), server.shutdown_handle()));
        server.run()
    });

    let Ok((addr, shutdown)) = ready_rx.await else {
        return task
            .await
            .context("relay task failed")?
            .context("failed to start relay");
    };
    if !flags.quiet {
        let addr = addr.map_or_else(|| "unknown address".to_string(), |a| a.to_string());
        eprintln!("lectern relay listening on http://{addr} (Ctrl-C to stop)");
    }

    tokio::select! {
        result = &mut task => {
            return result.context("relay task failed")?.context("relay stopped");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            shutdown.shutdown();
        }
    }
    task.await
        .context("relay task failed")?
        .context("relay stopped")
}

/// `[relay]` with command-line overrides applied and re-checked.
pub fn relay_config(args: &RelayArgs, config: &LecternConfig) -> Result<RelayConfig, ConfigError> {
    let mut merged = config.clone();
    if let Some(bind) = &args.bind {
        merged.relay.bind_addr.clone_from(bind);
    }
    if let Some(path) = &args.path {
        merged.relay.path.clone_from(path);
    }
    merged.validate()?;
    Ok(merged.relay)
}
