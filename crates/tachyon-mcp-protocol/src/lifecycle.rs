//! The endpoint lifecycle state machine (§3, §4.4.2), shared by the
//! server and client roles. Both roles walk the same five states; they
//! differ only in which events drive the Started→Initialized edge.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    Created,
    Started,
    Initialized,
    ShuttingDown,
    Closed,
}

impl EndpointState {
    /// Whether a request for `method` is accepted in this state. Only
    /// `initialize` is accepted before `Initialized`; everything is
    /// refused once `ShuttingDown` or `Closed`.
    pub fn accepts(&self, method: &str) -> bool {
        match self {
            EndpointState::Created => false,
            EndpointState::Started => method == "initialize",
            EndpointState::Initialized => true,
            EndpointState::ShuttingDown | EndpointState::Closed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_only_accepts_initialize() {
        assert!(EndpointState::Started.accepts("initialize"));
        assert!(!EndpointState::Started.accepts("tools/list"));
    }

    #[test]
    fn initialized_accepts_everything() {
        assert!(EndpointState::Initialized.accepts("tools/list"));
        assert!(EndpointState::Initialized.accepts("anything"));
    }

    #[test]
    fn shutting_down_and_closed_accept_nothing() {
        assert!(!EndpointState::ShuttingDown.accepts("initialize"));
        assert!(!EndpointState::Closed.accepts("initialize"));
    }
}
