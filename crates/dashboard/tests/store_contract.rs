//! Store and cache contract tests over an in-memory host bridge.
//!
//! The stub host behaves like the real backend: it assigns backend ids on
//! create, replaces records wholesale on update, and deletes by the
//! `__backendId` key alone. Everything here runs without a network.

#![allow(clippy::unwrap_used)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use async_trait::async_trait;
use secrecy::SecretString;
use syllabus_core::{CourseRecord, Record, Semester, StatusField, TeacherRecord};

use syllabus_dashboard::config::DashboardConfig;
use syllabus_dashboard::state::AppState;
use syllabus_dashboard::store::{
    BridgeHost, BridgeTransport, Envelope, SyllabusStore, TransportError,
};

/// In-memory stand-in for the spreadsheet-backed store.
///
/// `fail` flips the host into an outage: every call errors until cleared.
#[derive(Default)]
struct StubHost {
    records: Mutex<Vec<Record>>,
    next_id: AtomicU64,
    fail: AtomicBool,
    fail_reads: AtomicBool,
}

impl StubHost {
    fn seeded(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
            next_id: AtomicU64::new(1000),
            fail: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    fn check_up(&self) -> Result<(), TransportError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(TransportError::Bridge("host offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn snapshot(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl BridgeHost for StubHost {
    async fn get_all(&self) -> Result<Envelope, TransportError> {
        self.check_up()?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TransportError::Bridge("host offline".to_string()));
        }
        Ok(Envelope::ok_data(self.snapshot()))
    }

    async fn create_item(
        &self,
        _entity: syllabus_core::EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError> {
        self.check_up()?;
        let mut record: Record = serde_json::from_value(payload)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.set_backend_id(format!("id-{n}").into());
        self.records.lock().unwrap().push(record.clone());
        Ok(Envelope::ok_record(record))
    }

    async fn update_item(
        &self,
        _entity: syllabus_core::EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError> {
        self.check_up()?;
        let record: Record = serde_json::from_value(payload)?;
        let id = record.backend_id().cloned();
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.backend_id() == id.as_ref())
        {
            Some(slot) => {
                *slot = record;
                Ok(Envelope::ok())
            }
            None => Ok(Envelope::rejected("no such record")),
        }
    }

    async fn delete_item(
        &self,
        _entity: syllabus_core::EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError> {
        self.check_up()?;
        // Delete payloads carry only the backend id key.
        let id = payload
            .get("__backendId")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        assert_eq!(
            payload.as_object().map(serde_json::Map::len),
            Some(1),
            "delete payload must carry only __backendId"
        );
        let Some(id) = id else {
            return Ok(Envelope::rejected("missing __backendId"));
        };

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.backend_id().is_none_or(|b| b.as_str() != id));
        if records.len() == before {
            Ok(Envelope::rejected("no such record"))
        } else {
            Ok(Envelope::ok())
        }
    }
}

fn teacher(id: &str, name: &str) -> Record {
    Record::Teacher(TeacherRecord {
        backend_id: Some(id.into()),
        full_name: name.to_string(),
    })
}

fn course(id: &str, name: &str) -> Record {
    Record::Course(CourseRecord {
        backend_id: Some(id.into()),
        course_name: name.to_string(),
        coordinators: "A. Teacher".to_string(),
        year_level: 4,
        room: "4/1".to_string(),
        semester: Semester::First,
        academic_year: "2025".to_string(),
        due_date: None,
        status_academic: StatusField::unset(),
        status_homeroom: StatusField::unset(),
        status_director: StatusField::unset(),
        scanned: syllabus_core::StringFlag::new(false),
        pdf_url: String::new(),
    })
}

fn store_over(host: &Arc<StubHost>) -> SyllabusStore {
    SyllabusStore::new(Arc::new(BridgeTransport::new(
        Arc::clone(host) as Arc<dyn BridgeHost>
    )))
}

fn test_config() -> DashboardConfig {
    DashboardConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3002,
        base_url: "http://127.0.0.1:3002".to_string(),
        session_secret: SecretString::from("kJ8#mQ2$vN5@xR9!pL4&wT7*zB1^cF6%"),
        store_endpoint: "https://store.example.com/exec".parse().unwrap(),
        system_title: "Syllabus Submission Tracker".to_string(),
        institution_name: "Test School".to_string(),
    }
}

#[tokio::test]
async fn fetch_all_returns_every_record_across_types() {
    let host = Arc::new(StubHost::seeded(vec![
        teacher("t-1", "A. Teacher"),
        course("c-1", "Physics"),
        course("c-2", "Biology"),
    ]));
    let store = store_over(&host);

    let records = store.fetch_all().await.unwrap();
    assert_eq!(records.len(), 3);

    let courses: Vec<_> = records.iter().filter_map(Record::as_course).collect();
    let teachers: Vec<_> = records.iter().filter_map(Record::as_teacher).collect();
    assert_eq!(courses.len(), 2);
    assert_eq!(teachers.len(), 1);
}

#[tokio::test]
async fn create_returns_record_with_assigned_backend_id() {
    let host = Arc::new(StubHost::default());
    let store = store_over(&host);

    let created = store
        .create(&Record::Teacher(TeacherRecord {
            backend_id: None,
            full_name: "B. Teacher".to_string(),
        }))
        .await
        .unwrap();

    assert!(created.backend_id().is_some());
    assert_eq!(host.snapshot().len(), 1);
}

#[tokio::test]
async fn update_replaces_record_wholesale() {
    let original = course("c-1", "Physics");
    let host = Arc::new(StubHost::seeded(vec![original.clone()]));
    let store = store_over(&host);

    // Merge one changed field into the full record, then send it all.
    let mut updated = original.as_course().unwrap().clone();
    updated.room = "5/2".to_string();
    store.update(&Record::Course(updated)).await.unwrap();

    let after = host.snapshot();
    assert_eq!(after.len(), 1);
    let after = after[0].as_course().unwrap();
    assert_eq!(after.room, "5/2");
    // Fields the caller did not touch survive because the whole record
    // travels, not a patch.
    assert_eq!(after.course_name, "Physics");
    assert_eq!(after.coordinators, "A. Teacher");
}

#[tokio::test]
async fn delete_removes_exactly_one_record_by_backend_id() {
    let host = Arc::new(StubHost::seeded(vec![
        course("c-1", "Physics"),
        course("c-2", "Biology"),
    ]));
    let store = store_over(&host);

    store.delete(&course("c-1", "Physics")).await.unwrap();

    let after = host.snapshot();
    assert_eq!(after.len(), 1);
    assert_eq!(
        after[0].backend_id().map(ToString::to_string),
        Some("c-2".to_string())
    );
}

#[tokio::test]
async fn cache_reflects_store_after_each_mutation() {
    let host = Arc::new(StubHost::seeded(vec![course("c-1", "Physics")]));
    let state = AppState::new(test_config(), store_over(&host));

    state.refresh().await.unwrap();
    assert_eq!(state.courses().await.len(), 1);

    let created = state
        .create_record(&Record::Teacher(TeacherRecord {
            backend_id: None,
            full_name: "C. Teacher".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(state.teachers().await.len(), 1);

    state
        .delete_record(&created)
        .await
        .unwrap();
    assert!(state.teachers().await.is_empty());
    assert_eq!(state.courses().await.len(), 1);
}

#[tokio::test]
async fn failed_mutation_leaves_cache_untouched() {
    let host = Arc::new(StubHost::seeded(vec![course("c-1", "Physics")]));
    let state = AppState::new(test_config(), store_over(&host));
    state.refresh().await.unwrap();

    host.fail.store(true, Ordering::SeqCst);
    let mut updated = course("c-1", "Physics");
    if let Record::Course(c) = &mut updated {
        c.room = "6/3".to_string();
    }

    assert!(state.update_record(&updated).await.is_err());
    let cached = state.courses().await;
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].room, "4/1");
}

#[tokio::test]
async fn failed_reload_after_successful_mutation_keeps_previous_snapshot() {
    let host = Arc::new(StubHost::seeded(vec![course("c-1", "Physics")]));
    let state = AppState::new(test_config(), store_over(&host));
    state.refresh().await.unwrap();

    // The mutation lands, then reads drop before the reload.
    host.fail_reads.store(true, Ordering::SeqCst);
    let mut updated = course("c-1", "Physics");
    if let Record::Course(c) = &mut updated {
        c.room = "6/3".to_string();
    }

    // The mutation itself succeeds; the reload failure is swallowed.
    state.update_record(&updated).await.unwrap();

    // The host applied the change, but the view keeps the stale snapshot.
    assert_eq!(host.snapshot()[0].as_course().unwrap().room, "6/3");
    assert_eq!(state.courses().await[0].room, "4/1");

    // Once reads recover, the next refresh converges the cache.
    host.fail_reads.store(false, Ordering::SeqCst);
    state.refresh().await.unwrap();
    assert_eq!(state.courses().await[0].room, "6/3");
}

#[tokio::test]
async fn transport_failure_surfaces_as_error_not_panic() {
    let host = Arc::new(StubHost::default());
    host.fail.store(true, Ordering::SeqCst);
    let store = store_over(&host);

    assert!(store.fetch_all().await.is_err());
    assert!(
        store
            .create(&Record::Teacher(TeacherRecord {
                backend_id: None,
                full_name: "D. Teacher".to_string(),
            }))
            .await
            .is_err()
    );
    assert!(store.update(&course("c-1", "Physics")).await.is_err());
    assert!(store.delete(&course("c-1", "Physics")).await.is_err());
}
