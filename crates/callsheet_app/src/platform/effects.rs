use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use callsheet_core::{MonitorEffect, MonitorMsg};
use callsheet_engine::{ProbeHandle, ProbePoll, ProbeSettings};
use sheet_logging::{get_monitor_tick, sheet_info};

use super::runtime::ShellMsg;

/// Bridges the pure monitor core to the engine: executes `Probe` effects and
/// pumps settled probes back into the message channel.
pub struct EffectRunner {
    probe: ProbeHandle,
}

impl EffectRunner {
    pub fn new(settings: ProbeSettings, msg_tx: mpsc::Sender<ShellMsg>) -> Self {
        let probe = ProbeHandle::new(settings);
        let runner = Self { probe };
        runner.spawn_event_pump(msg_tx);
        runner
    }

    pub fn execute(&self, effects: Vec<MonitorEffect>) {
        for effect in effects {
            match effect {
                MonitorEffect::Probe { reason } => {
                    sheet_info!(
                        "issuing reachability probe ({:?}) at tick {}",
                        reason,
                        get_monitor_tick()
                    );
                    self.probe.request(reason);
                }
            }
        }
    }

    fn spawn_event_pump(&self, msg_tx: mpsc::Sender<ShellMsg>) {
        // Receiver side only: once the runner (and its command sender) is
        // dropped, the channel disconnects and this thread exits instead of
        // polling forever.
        let events = self.probe.events();
        thread::spawn(move || loop {
            match events.poll() {
                ProbePoll::Event(event) => {
                    let msg = ShellMsg::Monitor(MonitorMsg::ProbeFinished { ok: event.ok });
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                ProbePoll::Empty => thread::sleep(Duration::from_millis(20)),
                ProbePoll::Disconnected => break,
            }
        });
    }
}
