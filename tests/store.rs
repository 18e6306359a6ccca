//! Store behavior tests.

use crossbeam_channel::{RecvTimeoutError, TryRecvError};
use gux::{combine_reducers, Action, BoxedReducer, Result, Store, StoreError};
use serde_json::{json, Value};
use std::time::Duration;

fn counter(state: &i64, action: &Action<Value>) -> Result<i64> {
    let amount = action.payload.as_i64().ok_or(StoreError::InvalidPayloadType)?;
    match action.action_type.as_str() {
        "increment" => Ok(state + amount),
        "decrement" => Ok(state - amount),
        other => Err(StoreError::InvalidAction(other.to_string())),
    }
}

fn test_store() -> Store<i64, Value> {
    Store::new(0, counter)
}

fn increment() -> Action<Value> {
    Action::new("increment", json!(1))
}

// --- Dispatch ---

#[test]
fn test_increment_then_decrement() {
    let store = test_store();

    store.dispatch(increment()).unwrap();
    assert_eq!(store.get_state(), 1);

    store.dispatch(Action::new("decrement", json!(1))).unwrap();
    assert_eq!(store.get_state(), 0);
}

#[test]
fn test_invalid_action() {
    let store = test_store();
    let result = store.dispatch(Action::new("invalid", json!(2000)));
    assert_eq!(result, Err(StoreError::InvalidAction("invalid".into())));
    assert_eq!(store.get_state(), 0);
}

#[test]
fn test_invalid_payload() {
    let store = test_store();
    let result = store.dispatch(Action::new("increment", json!("one")));
    assert_eq!(result, Err(StoreError::InvalidPayloadType));
    assert_eq!(store.get_state(), 0);
}

#[test]
fn test_action_from_json() {
    let store = test_store();
    let action: Action<Value> =
        serde_json::from_str(r#"{"type": "increment", "payload": 41}"#).unwrap();

    store.dispatch(action).unwrap();
    store.dispatch(increment()).unwrap();
    assert_eq!(store.get_state(), 42);
}

// --- Subscriptions ---

#[test]
fn test_subscribe_unsubscribe() {
    let store = test_store();
    let sub = store.subscribe("test").unwrap();

    store.dispatch(increment()).unwrap();
    sub.recv_timeout(Duration::from_millis(500)).unwrap();

    sub.unsubscribe();
    // No dispatch yet: channel still open but quiet.
    assert_eq!(
        sub.recv_timeout(Duration::from_millis(50)),
        Err(RecvTimeoutError::Timeout)
    );

    store.dispatch(increment()).unwrap();
    assert_eq!(
        sub.recv_timeout(Duration::from_millis(50)),
        Err(RecvTimeoutError::Disconnected)
    );
    assert!(sub.recv().is_err());
}

#[test]
fn test_rejected_dispatch_does_not_notify() {
    let store = test_store();
    let sub = store.subscribe("test").unwrap();

    assert!(store.dispatch(Action::new("bogus", json!(1))).is_err());
    assert!(matches!(sub.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_duplicate_subscribe() {
    let store = test_store();
    let first = store.subscribe("test").unwrap();

    assert!(matches!(
        store.subscribe("test"),
        Err(StoreError::AlreadySubscribed(name)) if name == "test"
    ));

    // Still taken while the disconnected entry awaits cleanup.
    first.unsubscribe();
    assert!(matches!(
        store.subscribe("test"),
        Err(StoreError::AlreadySubscribed(_))
    ));

    store.dispatch(increment()).unwrap();
    let second = store.subscribe("test").unwrap();
    store.dispatch(increment()).unwrap();
    assert_eq!(second.try_recv(), Ok(()));
}

#[test]
fn test_every_subscriber_notified() {
    let store = test_store();
    let subs: Vec<_> = (0..5)
        .map(|i| store.subscribe(&format!("sub-{}", i)).unwrap())
        .collect();

    store.dispatch(increment()).unwrap();

    for sub in &subs {
        assert_eq!(sub.try_recv(), Ok(()), "{} missed the signal", sub.name());
    }
}

#[test]
fn test_dropped_handle_reaped() {
    let store = test_store();
    let sub = store.subscribe("short-lived").unwrap();
    drop(sub);
    assert_eq!(store.subscriber_count(), 1);

    store.dispatch(increment()).unwrap();
    assert_eq!(store.subscriber_count(), 0);
    assert!(store.subscribe("short-lived").is_ok());
}

// --- Combined Reducers ---

#[test]
fn test_combined_store() {
    fn sum(state: &i64, action: &Action<i64>) -> Result<i64> {
        Ok(state + action.payload)
    }
    fn count(state: &i64, _action: &Action<i64>) -> Result<i64> {
        Ok(state + 1)
    }
    fn positive_only(state: &i64, action: &Action<i64>) -> Result<i64> {
        if action.payload < 0 {
            return Err(StoreError::InvalidPayloadType);
        }
        Ok(*state)
    }

    let reducers: Vec<BoxedReducer<i64, i64>> =
        vec![Box::new(sum), Box::new(count), Box::new(positive_only)];
    let store = Store::new(vec![0, 0, 0], combine_reducers(reducers));

    store.dispatch(Action::new("add", 4)).unwrap();
    store.dispatch(Action::new("add", 6)).unwrap();
    assert_eq!(store.get_state(), vec![10, 2, 0]);

    let err = store.dispatch(Action::new("add", -1)).unwrap_err();
    assert_eq!(err, StoreError::InvalidPayloadType);
    assert_eq!(store.get_state(), vec![10, 2, 0]);
}
