use std::sync::Once;

use callsheet_core::{
    update, LinkState, MonitorEffect, MonitorMsg, MonitorState, ProbeReason,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sheet_logging::initialize_for_tests);
}

fn gone_offline() -> MonitorState {
    let (state, _) = update(MonitorState::new(), MonitorMsg::NativeOffline);
    state
}

#[test]
fn start_fires_one_immediate_probe() {
    init_logging();
    let state = MonitorState::new();

    let (next, effects) = update(state, MonitorMsg::Started);

    assert_eq!(
        effects,
        vec![MonitorEffect::Probe {
            reason: ProbeReason::Startup
        }]
    );
    // Optimistic until the startup probe settles.
    assert!(!next.view().warning_visible);
}

#[test]
fn native_offline_shows_warning_without_probing() {
    init_logging();
    let (mut state, effects) = update(MonitorState::new(), MonitorMsg::NativeOffline);

    // No probe until the next timer tick or a manual retry.
    assert!(effects.is_empty());
    assert_eq!(state.link(), LinkState::OfflineUnconfirmed);
    let view = state.view();
    assert!(view.warning_visible);
    assert!(!view.reported_online);
    assert!(view.retry_enabled);
    assert!(state.consume_dirty());
}

#[test]
fn native_online_clears_warning_immediately() {
    init_logging();
    let state = gone_offline();

    let (mut next, effects) = update(state, MonitorMsg::NativeOnline);

    // Optimistic: no probe confirmation required.
    assert!(effects.is_empty());
    assert_eq!(next.link(), LinkState::Online);
    assert!(!next.view().warning_visible);
    assert!(next.consume_dirty());
}

#[test]
fn tick_is_silent_while_online() {
    init_logging();
    let state = MonitorState::new();

    let (mut next, effects) = update(state, MonitorMsg::Tick);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn tick_skips_probe_while_host_reports_offline() {
    init_logging();
    let state = gone_offline();

    let (next, effects) = update(state, MonitorMsg::Tick);

    assert!(effects.is_empty());
    assert_eq!(next.link(), LinkState::OfflineUnconfirmed);
}

#[test]
fn tick_probes_once_host_reports_online_again() {
    init_logging();
    let state = gone_offline();
    // Offline warning still up, but the probe failed to confirm after the
    // host flipped back: reported=true, link dropped by a failed probe.
    let (state, _) = update(state, MonitorMsg::NativeOnline);
    let (state, _) = update(state, MonitorMsg::ProbeFinished { ok: false });
    assert_eq!(state.link(), LinkState::OfflineUnconfirmed);

    let (_state, effects) = update(state, MonitorMsg::Tick);

    assert_eq!(
        effects,
        vec![MonitorEffect::Probe {
            reason: ProbeReason::Periodic
        }]
    );
}

#[test]
fn retry_starts_manual_probe_and_disables_control() {
    init_logging();
    let state = gone_offline();

    let (next, effects) = update(state, MonitorMsg::RetryClicked);

    assert_eq!(next.link(), LinkState::OfflineProbing);
    assert_eq!(
        effects,
        vec![MonitorEffect::Probe {
            reason: ProbeReason::Manual
        }]
    );
    let view = next.view();
    assert!(view.warning_visible);
    assert!(!view.retry_enabled);
}

#[test]
fn second_retry_while_probing_is_a_noop() {
    init_logging();
    let state = gone_offline();
    let (state, _) = update(state, MonitorMsg::RetryClicked);

    let (next, effects) = update(state.clone(), MonitorMsg::RetryClicked);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn tick_during_manual_probe_starts_no_second_probe() {
    init_logging();
    let state = gone_offline();
    let (state, _) = update(state, MonitorMsg::RetryClicked);

    let (next, effects) = update(state, MonitorMsg::Tick);

    assert!(effects.is_empty());
    assert_eq!(next.link(), LinkState::OfflineProbing);
}

#[test]
fn probe_success_restores_online() {
    init_logging();
    let state = gone_offline();
    let (state, _) = update(state, MonitorMsg::RetryClicked);

    let (next, effects) = update(state, MonitorMsg::ProbeFinished { ok: true });

    assert!(effects.is_empty());
    assert_eq!(next.link(), LinkState::Online);
    let view = next.view();
    assert!(!view.warning_visible);
    assert!(view.confirmed_online);
}

#[test]
fn probe_failure_reenables_retry() {
    init_logging();
    let state = gone_offline();
    let (state, _) = update(state, MonitorMsg::RetryClicked);

    let (next, _effects) = update(state, MonitorMsg::ProbeFinished { ok: false });

    assert_eq!(next.link(), LinkState::OfflineUnconfirmed);
    let view = next.view();
    assert!(view.warning_visible);
    assert!(view.retry_enabled);
    assert!(!view.confirmed_online);
}

#[test]
fn status_lines_may_disagree_transiently() {
    init_logging();
    let state = gone_offline();
    let (state, _) = update(state, MonitorMsg::ProbeFinished { ok: false });
    let (state, _) = update(state, MonitorMsg::NativeOnline);

    // Host says online, last probe verdict still says unreachable.
    let view = state.view();
    assert!(view.reported_online);
    assert!(!view.confirmed_online);
    assert!(!view.warning_visible);
}

#[test]
fn late_probe_failure_overrides_optimistic_online() {
    init_logging();
    let state = gone_offline();
    let (state, _) = update(state, MonitorMsg::RetryClicked);
    // Native signal flips online while the manual probe is still in flight.
    let (state, _) = update(state, MonitorMsg::NativeOnline);
    assert_eq!(state.link(), LinkState::Online);

    let (next, _effects) = update(state, MonitorMsg::ProbeFinished { ok: false });

    assert_eq!(next.link(), LinkState::OfflineUnconfirmed);
}
