#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEffect {
    Probe { reason: ProbeReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeReason {
    Startup,
    Periodic,
    Manual,
}
