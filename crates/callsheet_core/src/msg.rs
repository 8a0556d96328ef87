#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorMsg {
    /// Monitor begins observing; fires the startup probe.
    Started,
    /// Native signal from the host environment reports connectivity regained.
    NativeOnline,
    /// Native signal from the host environment reports connectivity lost.
    NativeOffline,
    /// Periodic timer tick (default every 30 seconds).
    Tick,
    /// User clicked the retry control on the warning banner.
    RetryClicked,
    /// A reachability probe settled.
    ProbeFinished { ok: bool },
    /// Fallback for placeholder wiring.
    NoOp,
}
