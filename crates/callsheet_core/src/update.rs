use crate::{LinkState, MonitorEffect, MonitorMsg, MonitorState, ProbeReason};

/// Pure update function: applies a message to the monitor state and returns
/// any effects for the shell to execute.
pub fn update(mut state: MonitorState, msg: MonitorMsg) -> (MonitorState, Vec<MonitorEffect>) {
    let effects = match msg {
        MonitorMsg::Started => {
            // One immediate probe before the first timer tick; its result
            // settles the initial state.
            vec![MonitorEffect::Probe {
                reason: ProbeReason::Startup,
            }]
        }
        MonitorMsg::NativeOffline => {
            state.set_reported(false);
            state.set_link(LinkState::OfflineUnconfirmed);
            Vec::new()
        }
        MonitorMsg::NativeOnline => {
            // Optimistic: clear the warning without waiting for confirmation.
            state.set_reported(true);
            state.set_link(LinkState::Online);
            Vec::new()
        }
        MonitorMsg::Tick => match state.link() {
            LinkState::Online => Vec::new(),
            // A manual probe is already in flight; never start a second one.
            LinkState::OfflineProbing => Vec::new(),
            LinkState::OfflineUnconfirmed => {
                if state.reported_online() {
                    vec![MonitorEffect::Probe {
                        reason: ProbeReason::Periodic,
                    }]
                } else {
                    // Host still says offline; probing would be pointless.
                    Vec::new()
                }
            }
        },
        MonitorMsg::RetryClicked => {
            if state.link() == LinkState::OfflineUnconfirmed {
                state.set_link(LinkState::OfflineProbing);
                vec![MonitorEffect::Probe {
                    reason: ProbeReason::Manual,
                }]
            } else {
                Vec::new()
            }
        }
        MonitorMsg::ProbeFinished { ok } => {
            state.set_confirmed(ok);
            if ok {
                state.set_link(LinkState::Online);
            } else {
                state.set_link(LinkState::OfflineUnconfirmed);
            }
            Vec::new()
        }
        MonitorMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
