mod platform;

use std::io::BufRead;
use std::thread;

use anyhow::{bail, Context};
use callsheet_core::MonitorMsg;
use callsheet_engine::{repair_job_ownership, HttpBlobStore, HttpIdentityProvider};
use sheet_logging::sheet_info;

use platform::config::AppConfig;
use platform::runtime::{MonitorRuntime, ShellMsg};

fn main() -> anyhow::Result<()> {
    platform::logging::initialize(platform::logging::destination_from_env());
    let config = AppConfig::from_env();

    match std::env::args().nth(1).as_deref() {
        Some("repair") => run_repair(&config),
        Some("monitor") | None => run_monitor(&config),
        Some(other) => bail!("unknown mode `{other}`; expected `repair` or `monitor`"),
    }
}

/// One read-reconcile-write pass over the signed-in user's jobs dataset.
/// All failures collapse into a single user-facing line.
fn run_repair(config: &AppConfig) -> anyhow::Result<()> {
    let store_url = config
        .store_url
        .as_deref()
        .context("CALLSHEET_STORE_URL is not set")?;
    let identity = HttpIdentityProvider::new(store_url, config.api_token.clone())?;
    let store = HttpBlobStore::new(store_url, config.api_token.clone())?;

    let runtime = tokio::runtime::Runtime::new().context("tokio runtime")?;
    let summary = runtime
        .block_on(repair_job_ownership(&identity, &store))
        .context("ownership repair failed")?;

    if summary.wrote {
        println!(
            "Repaired {} of {} job records ({} malformed entries left untouched).",
            summary.repaired, summary.total, summary.skipped_malformed
        );
    } else {
        println!(
            "All {} job records already owned correctly; nothing written.",
            summary.total
        );
    }
    Ok(())
}

/// Runs the connectivity monitor until EOF or `quit`. Stdin stands in for
/// the host environment's native online/offline signal and the retry
/// control: `offline`, `online`, `retry`.
fn run_monitor(config: &AppConfig) -> anyhow::Result<()> {
    sheet_info!(
        "monitor starting: probe={} interval={:?}",
        config.probe.endpoint,
        config.probe_interval
    );
    let mut runtime = MonitorRuntime::new(config.probe.clone(), config.probe_interval);

    let input_tx = runtime.sender();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let msg = match line.trim() {
                "offline" => ShellMsg::Monitor(MonitorMsg::NativeOffline),
                "online" => ShellMsg::Monitor(MonitorMsg::NativeOnline),
                "retry" | "r" => ShellMsg::Monitor(MonitorMsg::RetryClicked),
                "quit" | "q" => ShellMsg::Quit,
                "" => continue,
                other => {
                    println!("unknown command `{other}` (offline | online | retry | quit)");
                    continue;
                }
            };
            let quitting = matches!(msg, ShellMsg::Quit);
            if input_tx.send(msg).is_err() || quitting {
                break;
            }
        }
        let _ = input_tx.send(ShellMsg::Quit);
    });

    runtime.run();
    Ok(())
}
