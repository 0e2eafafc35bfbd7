//! Unit tests for `SessionReducer`
//!
//! Tests the availability rules and the connection lifecycle

use livechat_session::{AgentData, EventKind, SessionError, SessionReducer, SessionStatus};
use serde_json::json;

fn agent_data(available: bool, agents: u32) -> AgentData {
    AgentData { available, agents }
}

#[test]
fn test_initial_state() {
    let reducer = SessionReducer::new();
    let state = reducer.state();
    assert_eq!(state.status, SessionStatus::Disconnected);
    assert!(!state.available);
    assert_eq!(state.agent_count, 0);
}

#[test]
fn test_agent_data_sets_count_and_availability() {
    let mut reducer = SessionReducer::new();

    let state = reducer.apply_agent_data(agent_data(true, 3), false);
    assert!(state.available);
    assert_eq!(state.agent_count, 3);

    let state = reducer.apply_agent_data(agent_data(false, 1), false);
    assert!(!state.available);
    assert_eq!(state.agent_count, 1);
}

#[test]
fn test_existing_contact_overrides_unavailable_agent_data() {
    let mut reducer = SessionReducer::new();
    for agents in [0, 2, 7] {
        let state = reducer.apply_agent_data(agent_data(false, agents), true);
        assert!(state.available, "contact must keep chat available ({agents} agents)");
        assert_eq!(state.agent_count, agents);
    }
}

#[test]
fn test_persistence_uses_last_known_count() {
    let mut reducer = SessionReducer::new();

    // Agent data says unavailable but reports agents online
    reducer.apply_agent_data(agent_data(false, 2), false);
    assert!(!reducer.state().available);

    let state = reducer.apply_persistence(false);
    assert!(state.available);
    assert_eq!(state.agent_count, 2);
}

#[test]
fn test_persistence_ignores_prior_availability() {
    let mut reducer = SessionReducer::new();

    reducer.apply_agent_data(agent_data(true, 0), false);
    assert!(reducer.state().available);
    assert!(!reducer.apply_persistence(false).available);

    reducer.apply_agent_data(agent_data(false, 0), false);
    assert!(reducer.apply_persistence(true).available);
}

#[test]
fn test_most_recent_rule_wins() {
    let mut reducer = SessionReducer::new();

    reducer.apply_agent_data(agent_data(true, 0), false);
    assert!(!reducer.apply_persistence(false).available);
    assert!(reducer.apply_agent_data(agent_data(true, 0), false).available);
}

#[test]
fn test_scenario_sequence() {
    let mut reducer = SessionReducer::new();

    let state = reducer.apply(
        EventKind::AgentData,
        &json!({"available": false, "data": {"chat": {"agents": 0}}}),
        false,
    );
    assert!(!state.available);
    assert_eq!(state.agent_count, 0);

    let state = reducer.apply(
        EventKind::AgentData,
        &json!({"available": true, "data": {"chat": {"agents": 3}}}),
        false,
    );
    assert!(state.available);
    assert_eq!(state.agent_count, 3);

    let state = reducer.apply(EventKind::Persistence, &json!({}), false);
    assert!(state.available);
    assert_eq!(state.agent_count, 3);

    reducer.begin_connection().unwrap();
    let state = reducer.complete_connection(false).unwrap();
    assert_eq!(state.status, SessionStatus::Error);
    assert!(state.available, "failure must not reset availability");
    assert_eq!(state.agent_count, 3);
}

#[test]
fn test_observe_events_do_not_mutate() {
    let mut reducer = SessionReducer::new();
    reducer.apply_agent_data(agent_data(true, 4), false);
    let before = reducer.state();

    let after = reducer.apply(
        EventKind::Observe,
        &json!({"available": false, "data": {"chat": {"agents": 0}}}),
        true,
    );
    assert_eq!(before, after);
}

#[test]
fn test_malformed_agent_data_defaults() {
    let mut reducer = SessionReducer::new();
    reducer.apply_agent_data(agent_data(true, 5), false);

    let state = reducer.apply(EventKind::AgentData, &json!({"available": true}), false);
    assert_eq!(state.agent_count, 0);
    assert!(state.available);

    let state = reducer.apply(EventKind::AgentData, &json!(null), false);
    assert_eq!(state.agent_count, 0);
    assert!(!state.available);
}

#[test]
fn test_connection_success() {
    let mut reducer = SessionReducer::new();
    assert_eq!(
        reducer.begin_connection().unwrap().status,
        SessionStatus::Starting
    );
    assert_eq!(
        reducer.complete_connection(true).unwrap().status,
        SessionStatus::Connected
    );
}

#[test]
fn test_completion_without_start_is_rejected() {
    let mut reducer = SessionReducer::new();
    let result = reducer.complete_connection(true);
    assert!(matches!(
        result,
        Err(SessionError::InvalidTransition {
            from: SessionStatus::Disconnected,
            to: SessionStatus::Connected,
        })
    ));
    assert_eq!(reducer.state().status, SessionStatus::Disconnected);
}

#[test]
fn test_double_completion_is_rejected() {
    let mut reducer = SessionReducer::new();
    reducer.begin_connection().unwrap();
    reducer.complete_connection(true).unwrap();
    assert!(reducer.complete_connection(false).is_err());
    assert_eq!(reducer.state().status, SessionStatus::Connected);
}

#[test]
fn test_begin_while_starting_is_rejected() {
    let mut reducer = SessionReducer::new();
    reducer.begin_connection().unwrap();
    assert!(matches!(
        reducer.begin_connection(),
        Err(SessionError::InvalidTransition {
            from: SessionStatus::Starting,
            ..
        })
    ));
}

#[test]
fn test_fresh_attempt_after_error_or_connected() {
    let mut reducer = SessionReducer::new();
    reducer.begin_connection().unwrap();
    reducer.complete_connection(false).unwrap();

    assert_eq!(
        reducer.begin_connection().unwrap().status,
        SessionStatus::Starting
    );
    reducer.complete_connection(true).unwrap();

    assert_eq!(
        reducer.begin_connection().unwrap().status,
        SessionStatus::Starting
    );
}
