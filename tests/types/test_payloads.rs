//! Unit tests for payload decoding and the event catalog

use livechat_session::{
    AgentData, DataCollection, EventCatalog, EventKind, EventName, SessionError, StartOptions,
};
use serde_json::json;

#[test]
fn test_agent_data_full_payload() {
    let data = AgentData::from_payload(&json!({
        "available": true,
        "data": {"chat": {"agents": 3}}
    }));
    assert_eq!(data, AgentData { available: true, agents: 3 });
}

#[test]
fn test_agent_data_missing_fields() {
    assert_eq!(AgentData::from_payload(&json!({})), AgentData::default());
    assert_eq!(
        AgentData::from_payload(&json!({"data": {"chat": {}}})).agents,
        0
    );
    assert_eq!(AgentData::from_payload(&json!({"data": null})).agents, 0);
    assert_eq!(AgentData::from_payload(&json!("agentdata")).agents, 0);
}

#[test]
fn test_agent_data_invalid_counts() {
    for agents in [json!(-2), json!("3"), json!(1.5), json!(null), json!([1])] {
        let data = AgentData::from_payload(&json!({"data": {"chat": {"agents": agents}}}));
        assert_eq!(data.agents, 0, "agents = {agents}");
    }
}

#[test]
fn test_agent_data_non_boolean_available() {
    assert!(!AgentData::from_payload(&json!({"available": "yes"})).available);
    assert!(!AgentData::from_payload(&json!({"available": 1})).available);
}

#[test]
fn test_standard_catalog() {
    let catalog = EventCatalog::standard();
    assert_eq!(catalog.len(), 15);
    assert_eq!(
        catalog.kind_of(&EventName::from("agentdata")),
        Some(EventKind::AgentData)
    );
    assert_eq!(
        catalog.kind_of(&EventName::from("persistence")),
        Some(EventKind::Persistence)
    );
    assert_eq!(
        catalog.kind_of(&EventName::from("messagereceived")),
        Some(EventKind::Observe)
    );
    assert_eq!(catalog.kind_of(&EventName::from("terminatebutton")), None);
}

#[test]
fn test_extended_catalog_adds_one_event() {
    let standard = EventCatalog::standard();
    let extended = EventCatalog::extended();
    assert_eq!(extended.len(), standard.len() + 1);
    assert_eq!(
        extended.kind_of(&EventName::from("terminatebutton")),
        Some(EventKind::Observe)
    );
}

#[test]
fn test_with_event_rejects_duplicates() {
    let result = EventCatalog::standard().with_event("agentdata", EventKind::Observe);
    assert!(matches!(result, Err(SessionError::InvalidConfig(_))));

    let catalog = EventCatalog::new()
        .with_event("agentdata", EventKind::AgentData)
        .unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_catalog_from_json() {
    let catalog = EventCatalog::from_json(
        r#"{"agentdata": "agentdata", "persistence": "persistence", "closeremote": "observe"}"#,
    )
    .unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.kind_of(&EventName::from("closeremote")),
        Some(EventKind::Observe)
    );

    assert!(EventCatalog::from_json(r#"{"agentdata": "bogus"}"#).is_err());
    assert!(EventCatalog::from_json("[]").is_err());
}

#[test]
fn test_catalog_from_json_rejects_repeated_name() {
    let result =
        EventCatalog::from_json(r#"{"agentdata": "agentdata", "agentdata": "observe"}"#);
    match result {
        Err(SessionError::JsonDecode(e)) => {
            assert!(e.to_string().contains("agentdata"), "unexpected error: {e}");
        }
        other => panic!("expected a decode error, got {other:?}"),
    }

    // Serialized catalogs load back unchanged
    let json = serde_json::to_string(&EventCatalog::extended()).unwrap();
    assert_eq!(EventCatalog::from_json(&json).unwrap(), EventCatalog::extended());
}

#[test]
fn test_start_options_wire_format() {
    let options = StartOptions {
        block_side_tab: true,
        developer_mode: false,
    };
    assert_eq!(
        serde_json::to_value(options).unwrap(),
        json!({"blockSideTab": true, "developerMode": false})
    );
}

#[test]
fn test_data_collection_field_type_key() {
    let form: DataCollection = serde_json::from_value(json!({
        "name": "AppData",
        "desc": "Demo data",
        "data": [
            {"desc": "First Name", "name": "first_name", "type": "firstname", "value": "Ada", "visible": true},
            {"desc": "Secret", "name": "secret", "type": "text", "value": "hidden", "visible": false}
        ]
    }))
    .unwrap();
    assert_eq!(form.data.len(), 2);
    assert_eq!(form.data[0].field_type, "firstname");
    assert!(!form.data[1].visible);
}
