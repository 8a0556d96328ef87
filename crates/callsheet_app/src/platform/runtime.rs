use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use callsheet_core::{update, MonitorMsg, MonitorState};
use callsheet_engine::ProbeSettings;
use sheet_logging::{set_monitor_tick, sheet_debug, sheet_trace};

use super::effects::EffectRunner;
use super::render;

/// Messages the shell routes to the monitor, plus shell-level control.
pub enum ShellMsg {
    Monitor(MonitorMsg),
    Quit,
}

/// Owns the monitor state and the three event sources feeding it: the
/// periodic timer, the probe pump, and whatever the host injects through
/// [`MonitorRuntime::sender`]. Everything is applied on the thread that
/// calls [`MonitorRuntime::run`], so the core never sees interleaved
/// handlers. The timer and pump threads exit once the channel closes.
pub struct MonitorRuntime {
    state: MonitorState,
    msg_tx: mpsc::Sender<ShellMsg>,
    msg_rx: mpsc::Receiver<ShellMsg>,
    effects: EffectRunner,
    ticks: u64,
    warning_was_visible: bool,
}

impl MonitorRuntime {
    pub fn new(settings: ProbeSettings, interval: Duration) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<ShellMsg>();
        let effects = EffectRunner::new(settings, msg_tx.clone());

        // Periodic tick; stops when the runtime (and its receiver) is gone.
        let tick_tx = msg_tx.clone();
        thread::spawn(move || {
            while tick_tx.send(ShellMsg::Monitor(MonitorMsg::Tick)).is_ok() {
                thread::sleep(interval);
            }
        });

        Self {
            state: MonitorState::new(),
            msg_tx,
            msg_rx,
            effects,
            ticks: 0,
            warning_was_visible: false,
        }
    }

    /// Channel for host-injected events (native signal, retry, quit).
    pub fn sender(&self) -> mpsc::Sender<ShellMsg> {
        self.msg_tx.clone()
    }

    /// Blocks until a `Quit` message arrives or every sender is gone.
    pub fn run(&mut self) {
        self.dispatch(MonitorMsg::Started);
        while let Ok(msg) = self.msg_rx.recv() {
            match msg {
                ShellMsg::Quit => break,
                ShellMsg::Monitor(msg) => self.dispatch(msg),
            }
        }
    }

    fn dispatch(&mut self, msg: MonitorMsg) {
        sheet_trace!("monitor msg {:?}", msg);
        if msg == MonitorMsg::Tick {
            self.ticks += 1;
            set_monitor_tick(self.ticks);
            sheet_debug!("monitor tick {}", self.ticks);
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.effects.execute(effects);

        if dirty {
            if view.warning_visible {
                for line in render::banner(&view) {
                    println!("{line}");
                }
            } else if self.warning_was_visible {
                println!("Connection restored.");
            }
            self.warning_was_visible = view.warning_visible;
        }
    }
}
