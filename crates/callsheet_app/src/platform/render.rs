use callsheet_core::MonitorView;

/// Formats the warning banner. Empty when the monitor is online.
///
/// The native-signal line and the probe-verdict line are independent on
/// purpose; right after the host reports connectivity back they can
/// disagree until the next probe settles.
pub fn banner(view: &MonitorView) -> Vec<String> {
    if !view.warning_visible {
        return Vec::new();
    }

    let reported = if view.reported_online {
        "online"
    } else {
        "offline"
    };
    let confirmed = if view.confirmed_online {
        "reachable"
    } else {
        "unreachable"
    };
    let retry = if view.retry_enabled {
        "Type `retry` to check again."
    } else {
        "Checking connection..."
    };

    vec![
        "Connection to the workspace was lost.".to_string(),
        format!("  Network signal:   {reported}"),
        format!("  Server:           {confirmed}"),
        retry.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> MonitorView {
        MonitorView {
            warning_visible: true,
            reported_online: false,
            confirmed_online: false,
            retry_enabled: true,
        }
    }

    #[test]
    fn banner_is_hidden_while_online() {
        let view = MonitorView {
            warning_visible: false,
            ..view()
        };
        assert!(banner(&view).is_empty());
    }

    #[test]
    fn banner_shows_both_status_lines_independently() {
        let view = MonitorView {
            reported_online: true,
            confirmed_online: false,
            ..view()
        };
        let lines = banner(&view);
        assert!(lines[1].contains("online"));
        assert!(lines[2].contains("unreachable"));
    }

    #[test]
    fn retry_hint_disappears_while_probing() {
        let view = MonitorView {
            retry_enabled: false,
            ..view()
        };
        let lines = banner(&view);
        assert_eq!(lines[3], "Checking connection...");
    }
}
