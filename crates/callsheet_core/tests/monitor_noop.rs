use callsheet_core::{update, MonitorMsg, MonitorState};

#[test]
fn update_is_noop() {
    let state = MonitorState::new();
    let (next, effects) = update(state.clone(), MonitorMsg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
