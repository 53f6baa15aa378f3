use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use nutriflow_app_lib::models::activity::Intensity;
use nutriflow_app_lib::store::{ActivityPrefill, LocalStore};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Preferences {
    theme: String,
    history_limit: u32,
}

#[test]
fn values_survive_reopening_the_store() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nutriflow.db");

    {
        let store = LocalStore::new(&path).expect("store");
        store
            .set(
                "preferences",
                &Preferences {
                    theme: "sombre".to_string(),
                    history_limit: 14,
                },
            )
            .expect("set");
    }

    let reopened = LocalStore::new(&path).expect("reopen");
    let prefs: Preferences = reopened
        .get("preferences")
        .expect("get")
        .expect("should persist");
    assert_eq!(prefs.history_limit, 14);
    assert_eq!(prefs.theme, "sombre");
}

#[test]
fn remember_activity_overwrites_previous_prefill() {
    let dir = TempDir::new().expect("tempdir");
    let store = LocalStore::new(dir.path().join("nutriflow.db")).expect("store");

    store
        .remember_activity(
            "Vélo",
            ActivityPrefill {
                duration_min: 20.0,
                intensity: Intensity::Light,
            },
        )
        .expect("first");
    store
        .remember_activity(
            "Vélo",
            ActivityPrefill {
                duration_min: 60.0,
                intensity: Intensity::Intense,
            },
        )
        .expect("second");

    let map = store.recent_activities().expect("map");
    assert_eq!(map.len(), 1);
    assert_eq!(map["Vélo"].duration_min, 60.0);
    assert_eq!(map["Vélo"].intensity, Intensity::Intense);
}

#[test]
fn type_mismatch_reads_as_absent() {
    let dir = TempDir::new().expect("tempdir");
    let store = LocalStore::new(dir.path().join("nutriflow.db")).expect("store");

    store.set("recent_activities", &"pas une map").expect("set");

    // the stored string does not parse into the expected map shape
    let map: Option<HashMap<String, ActivityPrefill>> =
        store.get("recent_activities").expect("get");
    assert!(map.is_none());

    // and the typed helper falls back to an empty map
    assert!(store.recent_activities().expect("helper").is_empty());
}

#[test]
fn remove_clears_the_key() {
    let dir = TempDir::new().expect("tempdir");
    let store = LocalStore::new(dir.path().join("nutriflow.db")).expect("store");

    store.set("answer", &42_u32).expect("set");
    store.remove("answer").expect("remove");
    assert_eq!(store.get::<u32>("answer").expect("get"), None);
}
