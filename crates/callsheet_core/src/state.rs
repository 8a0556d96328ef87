use crate::view_model::MonitorView;

/// Perceived connectivity. `OfflineProbing` exists only to gate duplicate
/// manual retries; periodic probes never enter it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    /// Warning hidden.
    #[default]
    Online,
    /// Warning visible, no manual probe in flight.
    OfflineUnconfirmed,
    /// Warning visible, manual probe in flight.
    OfflineProbing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    link: LinkState,
    /// Last value of the host's native online/offline signal.
    reported: bool,
    /// Verdict of the most recent reachability probe.
    confirmed: bool,
    dirty: bool,
}

impl Default for MonitorState {
    fn default() -> Self {
        // Optimistic before the startup probe settles: warning stays hidden.
        Self {
            link: LinkState::Online,
            reported: true,
            confirmed: true,
            dirty: false,
        }
    }
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&self) -> LinkState {
        self.link
    }

    pub fn reported_online(&self) -> bool {
        self.reported
    }

    pub fn confirmed_online(&self) -> bool {
        self.confirmed
    }

    pub fn view(&self) -> MonitorView {
        MonitorView {
            warning_visible: self.link != LinkState::Online,
            reported_online: self.reported,
            confirmed_online: self.confirmed,
            retry_enabled: self.link == LinkState::OfflineUnconfirmed,
        }
    }

    /// Returns the accumulated dirty flag and clears it. The shell uses this
    /// to coalesce re-renders.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_link(&mut self, link: LinkState) {
        if self.link != link {
            self.link = link;
            self.dirty = true;
        }
    }

    pub(crate) fn set_reported(&mut self, online: bool) {
        if self.reported != online {
            self.reported = online;
            self.dirty = true;
        }
    }

    pub(crate) fn set_confirmed(&mut self, online: bool) {
        if self.confirmed != online {
            self.confirmed = online;
            self.dirty = true;
        }
    }
}
