use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use pretty_assertions::assert_eq;

use super::*;
use crate::memory::MemoryPreferences;

#[derive(Clone, Default)]
struct RecordingNotifier {
    registrations: Arc<Mutex<Vec<(String, String)>>>,
    changes: Arc<AtomicUsize>,
}

impl RecordingNotifier {
    fn changes(&self) -> usize {
        self.changes.load(Ordering::SeqCst)
    }
}

impl BackupNotifier for RecordingNotifier {
    fn register(&self, namespace: String, helper_key: String) {
        self.registrations
            .lock()
            .unwrap()
            .push((namespace, helper_key));
    }

    fn data_changed(&self) {
        self.changes.fetch_add(1, Ordering::SeqCst);
    }
}

struct FixedIdentity(Option<&'static str>);

impl DeviceIdentity for FixedIdentity {
    fn udid(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

fn build_vault() -> (Arc<PersistenceVault>, MemoryPreferences, RecordingNotifier) {
    let store = MemoryPreferences::new();
    let notifier = RecordingNotifier::default();
    let builder = VaultBuilder::new();
    builder.set_preference_store(Box::new(store.clone()));
    builder.set_backup_notifier(Box::new(notifier.clone()));
    builder.set_device_identity(Box::new(FixedIdentity(Some("device-1234"))));
    let vault = builder.build().expect("vault failed to build");
    (vault, store, notifier)
}

fn call(method: &str, args: &[(&str, Option<&str>)]) -> MethodCall {
    MethodCall {
        method: method.to_string(),
        args: args
            .iter()
            .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
            .collect(),
    }
}

#[test]
fn write_then_read_round_trips() {
    let (vault, _, _) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));
    assert_eq!(
        vault.read_string("user.token".to_string()).as_deref(),
        Some("abc123")
    );
}

#[test]
fn write_null_clears_the_entry() {
    let (vault, _, _) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));
    vault.write_string("user.token".to_string(), None);
    assert!(!vault.contains_key("user.token".to_string()));
}

#[test]
fn delete_then_contains_is_false() {
    let (vault, _, notifier) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));
    vault.delete("user.token".to_string());
    assert!(!vault.contains_key("user.token".to_string()));
    // one write, one delete
    assert_eq!(notifier.changes(), 2);
}

#[test]
fn unwritten_keys_read_as_absent() {
    let (vault, _, _) = build_vault();
    assert_eq!(vault.read_string("missing".to_string()), None);
    assert!(!vault.contains_key("missing".to_string()));
}

#[test]
fn clear_with_prefix_removes_exactly_the_matching_keys() {
    let (vault, store, notifier) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));
    vault.write_string("user.name".to_string(), Some("sam".to_string()));
    vault.write_string("session.id".to_string(), Some("s-1".to_string()));

    vault.clear_with_prefix("user.".to_string());

    assert!(!vault.contains_key("user.token".to_string()));
    assert!(!vault.contains_key("user.name".to_string()));
    assert_eq!(
        vault.read_string("session.id".to_string()).as_deref(),
        Some("s-1")
    );
    assert_eq!(store.len(), 1);
    // three writes plus a single notification for the batch
    assert_eq!(notifier.changes(), 4);
}

#[test]
fn clear_with_empty_prefix_clears_the_namespace() {
    let (vault, store, _) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));
    vault.write_string("session.id".to_string(), Some("s-1".to_string()));
    vault.clear_with_prefix(String::new());
    assert!(store.is_empty());
}

#[test]
fn get_udid_returns_the_identifier() {
    let (vault, _, _) = build_vault();
    assert_eq!(vault.get_udid().unwrap(), "device-1234");
}

#[test]
fn get_udid_is_unavailable_when_empty_or_unbound() {
    let store = MemoryPreferences::new();
    let builder = VaultBuilder::new();
    builder.set_preference_store(Box::new(store.clone()));
    builder.set_device_identity(Box::new(FixedIdentity(Some(""))));
    let vault = builder.build().expect("vault failed to build");
    assert!(matches!(
        vault.get_udid().unwrap_err(),
        VaultError::Unavailable
    ));

    let builder = VaultBuilder::new();
    builder.set_preference_store(Box::new(store));
    let vault = builder.build().expect("vault failed to build");
    let err = vault.get_udid().unwrap_err();
    assert_eq!(err.code(), "UNAVAILABLE");
}

#[test]
fn build_without_a_store_fails() {
    let builder = VaultBuilder::new();
    assert!(matches!(
        builder.build().unwrap_err(),
        VaultError::NoPreferenceStore
    ));
}

#[test]
fn build_registers_the_namespace_once() {
    let (_, _, notifier) = build_vault();
    let registrations = notifier.registrations.lock().unwrap();
    assert_eq!(
        *registrations,
        vec![(PREFS_NAMESPACE.to_string(), BACKUP_HELPER_KEY.to_string())]
    );
}

#[test]
fn dispatch_covers_every_operation() {
    let (vault, _, _) = build_vault();

    let reply = vault
        .handle(call(WRITE_STRING, &[("key", Some("user.token")), ("value", Some("abc123"))]))
        .unwrap();
    assert_eq!(reply, CallReply::Empty);

    let reply = vault
        .handle(call(READ_STRING, &[("key", Some("user.token"))]))
        .unwrap();
    assert_eq!(
        reply,
        CallReply::Text {
            value: "abc123".to_string()
        }
    );

    let reply = vault
        .handle(call(CONTAINS_KEY, &[("key", Some("user.token"))]))
        .unwrap();
    assert_eq!(reply, CallReply::Bool { value: true });

    let reply = vault
        .handle(call(DELETE, &[("key", Some("user.token"))]))
        .unwrap();
    assert_eq!(reply, CallReply::Empty);

    let reply = vault
        .handle(call(READ_STRING, &[("key", Some("user.token"))]))
        .unwrap();
    assert_eq!(reply, CallReply::Empty);

    let reply = vault.handle(call(GET_UDID, &[])).unwrap();
    assert_eq!(
        reply,
        CallReply::Text {
            value: "device-1234".to_string()
        }
    );
}

#[test]
fn dispatch_clear_with_prefix_defaults_to_empty() {
    let (vault, store, _) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));
    vault.write_string("session.id".to_string(), Some("s-1".to_string()));
    vault
        .handle(call(CLEAR_WITH_PREFIX, &[]))
        .expect("clear failed");
    assert!(store.is_empty());
}

#[test]
fn dispatch_write_with_null_value_clears() {
    let (vault, _, _) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));
    vault
        .handle(call(WRITE_STRING, &[("key", Some("user.token")), ("value", None)]))
        .expect("write failed");
    assert!(!vault.contains_key("user.token".to_string()));
}

#[test]
fn unknown_methods_do_not_touch_the_store() {
    let (vault, store, notifier) = build_vault();
    vault.write_string("user.token".to_string(), Some("abc123".to_string()));

    let err = vault
        .handle(call("foo", &[("key", Some("user.token"))]))
        .unwrap_err();

    assert!(matches!(
        err,
        VaultError::NotImplemented { ref method } if method == "foo"
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(notifier.changes(), 1);
}

#[test]
fn missing_key_argument_is_rejected() {
    let (vault, _, _) = build_vault();
    let err = vault.handle(call(READ_STRING, &[])).unwrap_err();
    assert!(matches!(
        err,
        VaultError::MissingArgument { ref method, ref argument }
            if method == READ_STRING && argument == "key"
    ));
}
