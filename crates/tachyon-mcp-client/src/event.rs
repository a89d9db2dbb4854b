//! Inbound notification events delivered to the client's caller. A
//! per-instance broadcast channel, not a global event bus (an endpoint's
//! events belong to that endpoint, not to the process).

#[derive(Debug, Clone)]
pub enum ClientEvent {
    ToolsListChanged,
    ResourcesListChanged,
    PromptsListChanged,
    ResourceUpdated { uri: String },
}

impl ClientEvent {
    pub fn from_notification(method: &str, params: Option<&serde_json::Value>) -> Option<Self> {
        match method {
            "notifications/tools/list_changed" => Some(ClientEvent::ToolsListChanged),
            "notifications/resources/list_changed" => Some(ClientEvent::ResourcesListChanged),
            "notifications/prompts/list_changed" => Some(ClientEvent::PromptsListChanged),
            "notifications/resources/updated" => {
                let uri = params?.get("uri")?.as_str()?.to_string();
                Some(ClientEvent::ResourceUpdated { uri })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recognizes_all_four_named_notifications() {
        assert!(matches!(
            ClientEvent::from_notification("notifications/tools/list_changed", None),
            Some(ClientEvent::ToolsListChanged)
        ));
        assert!(matches!(
            ClientEvent::from_notification("notifications/resources/list_changed", None),
            Some(ClientEvent::ResourcesListChanged)
        ));
        assert!(matches!(
            ClientEvent::from_notification("notifications/prompts/list_changed", None),
            Some(ClientEvent::PromptsListChanged)
        ));
        let params = json!({"uri": "file:///a.txt"});
        match ClientEvent::from_notification("notifications/resources/updated", Some(&params)) {
            Some(ClientEvent::ResourceUpdated { uri }) => assert_eq!(uri, "file:///a.txt"),
            other => panic!("expected ResourceUpdated, got {other:?}"),
        }
    }

    #[test]
    fn unknown_notification_yields_none() {
        assert!(ClientEvent::from_notification("notifications/cancelled", None).is_none());
    }

    #[test]
    fn resource_updated_without_uri_yields_none() {
        assert!(ClientEvent::from_notification("notifications/resources/updated", None).is_none());
    }
}
