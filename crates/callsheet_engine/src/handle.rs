use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use callsheet_core::ProbeReason;
use sheet_logging::sheet_debug;

use crate::probe::{ProbeSettings, ReachabilityProbe, ReqwestProbe};

/// Outcome of one reachability probe, tagged with what triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeEvent {
    pub reason: ProbeReason,
    pub ok: bool,
}

enum ProbeCommand {
    Check { reason: ProbeReason },
}

/// Runs probes on a dedicated runtime thread so the event-driven shell never
/// blocks on network IO. Commands go in over a channel; settled probes come
/// back as [`ProbeEvent`]s. Dropping the handle closes the command channel
/// and lets the worker thread wind down.
#[derive(Clone)]
pub struct ProbeHandle {
    cmd_tx: mpsc::Sender<ProbeCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ProbeEvent>>>,
}

impl ProbeHandle {
    pub fn new(settings: ProbeSettings) -> Self {
        Self::with_probe(Arc::new(ReqwestProbe::new(settings)))
    }

    pub fn with_probe(probe: Arc<dyn ReachabilityProbe>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ProbeCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    sheet_logging::sheet_error!("probe runtime failed to start: {}", err);
                    return;
                }
            };
            while let Ok(ProbeCommand::Check { reason }) = cmd_rx.recv() {
                let probe = probe.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = probe.check().await;
                    let ok = match &result {
                        Ok(()) => true,
                        Err(err) => {
                            sheet_debug!("probe failed ({:?}): {}", err.kind, err.message);
                            false
                        }
                    };
                    let _ = event_tx.send(ProbeEvent { reason, ok });
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn request(&self, reason: ProbeReason) {
        let _ = self.cmd_tx.send(ProbeCommand::Check { reason });
    }

    pub fn try_recv(&self) -> Option<ProbeEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Receiving side only. Unlike a full handle clone it keeps no command
    /// sender alive, so once every handle is dropped the worker winds down
    /// and the poller observes [`ProbePoll::Disconnected`].
    pub fn events(&self) -> ProbeEvents {
        ProbeEvents {
            rx: self.event_rx.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePoll {
    Event(ProbeEvent),
    Empty,
    Disconnected,
}

#[derive(Clone)]
pub struct ProbeEvents {
    rx: Arc<Mutex<mpsc::Receiver<ProbeEvent>>>,
}

impl ProbeEvents {
    pub fn poll(&self) -> ProbePoll {
        let Ok(rx) = self.rx.lock() else {
            return ProbePoll::Disconnected;
        };
        match rx.try_recv() {
            Ok(event) => ProbePoll::Event(event),
            Err(mpsc::TryRecvError::Empty) => ProbePoll::Empty,
            Err(mpsc::TryRecvError::Disconnected) => ProbePoll::Disconnected,
        }
    }
}
