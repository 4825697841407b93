//! SqliteRecordStore behavior through the RecordStore trait.

use chrono::{DateTime, TimeZone, Utc};

use headcount_core::hierarchy::{MovementLeg, MovementRecord, PostRequest};
use headcount_core::traits::RecordStore;
use headcount_storage::SqliteRecordStore;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_767_000_000 + secs, 0).unwrap()
}

fn leg(unit: &str, role: &str, quantity: u32) -> MovementLeg {
    MovementLeg {
        unit: unit.into(),
        cost_center: "1001".into(),
        subprocess: "Colheita".into(),
        manager: "Carlos".into(),
        post: "P-01".into(),
        role: role.into(),
        quantity,
    }
}

fn movement(user: &str, secs: i64) -> MovementRecord {
    MovementRecord {
        system_user: user.into(),
        submitted_at: at(secs),
        requester: "Ana".into(),
        exit: leg("Usina Norte", "Operador", 1),
        entry: leg("Usina Sul", "Motorista", 2),
    }
}

fn post_request(role: &str, secs: i64) -> PostRequest {
    PostRequest {
        unit: "Usina Norte".into(),
        cost_center: "1001".into(),
        subprocess: "Colheita".into(),
        manager: "Carlos".into(),
        role: role.into(),
        requested_at: at(secs),
        submitted_by: "admin".into(),
    }
}

#[test]
fn append_then_read_back() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    let record = movement("analista", 0);
    let id = store.append_movement(&record).unwrap();

    let stored = store.movements_by_user("analista").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].record, record);
}

#[test]
fn history_is_newest_first_and_per_user() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    let first = store.append_movement(&movement("analista", 0)).unwrap();
    store.append_movement(&movement("admin", 5)).unwrap();
    let third = store.append_movement(&movement("analista", 10)).unwrap();
    assert!(third > first);

    let ids: Vec<i64> = store
        .movements_by_user("analista")
        .unwrap()
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![third, first]);
    assert!(store.movements_by_user("nobody").unwrap().is_empty());
    assert_eq!(store.movement_count().unwrap(), 3);
}

#[test]
fn summary_counts_and_reports_latest() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    assert_eq!(store.history_summary("analista").unwrap().total, 0);
    assert_eq!(store.history_summary("analista").unwrap().last_submitted_at, None);

    store.append_movement(&movement("analista", 100)).unwrap();
    store.append_movement(&movement("analista", 40)).unwrap();
    store.append_movement(&movement("admin", 500)).unwrap();

    let summary = store.history_summary("analista").unwrap();
    assert_eq!(summary.total, 2);
    // Latest by append order, not by clock.
    assert_eq!(summary.last_submitted_at, Some(at(40)));
}

#[test]
fn post_requests_are_returned_newest_first_up_to_limit() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    for (i, role) in ["Operador", "Motorista", "Tratorista"].iter().enumerate() {
        store.append_post_request(&post_request(role, i as i64)).unwrap();
    }

    let recent = store.recent_post_requests(2).unwrap();
    let roles: Vec<&str> = recent.iter().map(|r| r.request.role.as_str()).collect();
    assert_eq!(roles, vec!["Tratorista", "Motorista"]);
    assert_eq!(recent[0].request, post_request("Tratorista", 2));
    assert!(store.recent_post_requests(0).unwrap().is_empty());
}

#[test]
fn zero_quantity_is_rejected_by_schema() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    let mut record = movement("analista", 0);
    record.entry.quantity = 0;
    assert!(store.append_movement(&record).is_err());
    assert_eq!(store.movement_count().unwrap(), 0);
}

#[test]
fn store_is_usable_as_trait_object() {
    let store: Box<dyn RecordStore> = Box::new(SqliteRecordStore::open_in_memory().unwrap());
    store.append_movement(&movement("rh.agricola", 0)).unwrap();
    assert_eq!(store.history_summary("rh.agricola").unwrap().total, 1);
}
