//! Callsheet core: pure reconciliation logic and the connectivity state machine.
mod effect;
mod job;
mod msg;
mod reconcile;
mod state;
mod update;
mod view_model;

pub use effect::{MonitorEffect, ProbeReason};
pub use job::{Identity, JobRecord};
pub use msg::MonitorMsg;
pub use reconcile::{has_correct_owner, needs_fix, reconcile, ReconcileOutcome};
pub use state::{LinkState, MonitorState};
pub use update::update;
pub use view_model::MonitorView;
