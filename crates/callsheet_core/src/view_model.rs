/// Render-ready snapshot of the monitor. The two `*_online` lines are
/// independent and may disagree transiently: the native signal is optimistic
/// while the probe verdict lags behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorView {
    pub warning_visible: bool,
    pub reported_online: bool,
    pub confirmed_online: bool,
    pub retry_enabled: bool,
}
