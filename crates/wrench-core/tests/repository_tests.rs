mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{
    intervention_with_details, memory_repository, repository_over, FailingStore, FlakyDetailStore,
};
use serde_json::json;
use tempfile::NamedTempFile;
use wrench_core::repository::{DETAILS, INTERVENTIONS};
use wrench_core::{
    DocumentStore, InterventionRepository, InterventionStatus, ListOutcome, MemoryStore,
    SqliteStore,
};

fn sqlite_repository() -> (NamedTempFile, InterventionRepository) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let store = SqliteStore::new(temp_file.path()).expect("Failed to create store");
    (temp_file, InterventionRepository::new(Arc::new(store)))
}

#[tokio::test]
async fn round_trip_intervention_with_details() {
    let repo = memory_repository();
    let written = intervention_with_details(1, "2025-04-10T09:00:00Z", 3);

    assert!(repo.add_intervention(&written).await.is_complete());

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, 1);
    // Listing leaves details to the read-side join
    assert!(listed[0].details.is_empty());

    let details = repo.get_details(1).await;
    assert_eq!(details.len(), 3);
    let expected: HashSet<_> = written
        .details
        .iter()
        .map(|d| (d.operation_id, d.operation_name.clone(), d.note))
        .collect();
    let actual: HashSet<_> = details
        .iter()
        .map(|d| (d.operation_id, d.operation_name.clone(), d.note))
        .collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn listing_is_newest_first() {
    // Exercise the JSON1 ordering path through the SQLite store.
    let (_temp_file, repo) = sqlite_repository();
    for (id, date) in [
        (1, "2025-04-10T09:00:00Z"),
        (2, "2025-06-01T07:30:00Z"),
        (3, "2025-05-20T16:45:00Z"),
    ] {
        assert!(repo
            .add_intervention(&intervention_with_details(id, date, 0))
            .await
            .is_complete());
    }

    let listed = repo.list_interventions().await.into_interventions();
    let ids: Vec<i64> = listed.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn update_status_is_idempotent() {
    let repo = memory_repository();
    repo.add_intervention(&intervention_with_details(5, "2025-04-10T09:00:00Z", 1))
        .await;

    assert!(repo.update_status(5, InterventionStatus::Completed).await);
    assert!(repo.update_status(5, InterventionStatus::Completed).await);

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed[0].status, InterventionStatus::Completed);
}

#[tokio::test]
async fn unknown_status_label_reads_as_pending() {
    let store = Arc::new(MemoryStore::new());
    let repo = repository_over(store.clone());

    let intervention = intervention_with_details(9, "2025-04-10T09:00:00Z", 0);
    let mut doc = serde_json::to_value(&intervention).unwrap();
    doc["status"] = json!("BOGUS");
    store.put(INTERVENTIONS, 9, &doc).unwrap();

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, InterventionStatus::Pending);
}

#[tokio::test]
async fn malformed_documents_are_skipped_not_fatal() {
    let store = Arc::new(MemoryStore::new());
    let repo = repository_over(store.clone());

    store
        .put(INTERVENTIONS, 1, &json!({"garbage": true}))
        .unwrap();
    repo.add_intervention(&intervention_with_details(2, "2025-04-10T09:00:00Z", 0))
        .await;

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, 2);
}

#[tokio::test]
async fn unavailable_store_degrades_without_errors() {
    let repo = repository_over(Arc::new(FailingStore));

    assert!(repo.list_interventions().await.is_unavailable());
    assert!(repo.get_details(1).await.is_empty());
    assert!(!repo.update_status(1, InterventionStatus::Completed).await);

    let outcome = repo
        .add_intervention(&intervention_with_details(1, "2025-04-10T09:00:00Z", 2))
        .await;
    assert!(!outcome.parent_written);
    assert!(!outcome.is_complete());
}

#[tokio::test]
async fn empty_store_is_distinguished_from_unavailable() {
    let repo = memory_repository();
    assert_eq!(repo.list_interventions().await, ListOutcome::Empty);
}

#[tokio::test]
async fn partial_detail_write_reports_failure_and_keeps_parent() {
    let store = Arc::new(FlakyDetailStore::new(1));
    let repo = repository_over(store.clone());

    let outcome = repo
        .add_intervention(&intervention_with_details(7, "2025-04-10T09:00:00Z", 3))
        .await;

    assert!(outcome.parent_written);
    assert_eq!(outcome.details_written, 1);
    assert_eq!(outcome.details_total, 3);
    assert!(!outcome.is_complete());

    // The parent landed and exactly one detail made it; nothing was
    // rolled back.
    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), 1);
    assert_eq!(repo.get_details(7).await.len(), 1);
    let raw_details = store
        .get_filtered(DETAILS, "intervention_id", &json!(7))
        .unwrap();
    assert_eq!(raw_details.len(), 1);
}

#[tokio::test]
async fn colliding_keys_overwrite_silently() {
    let repo = memory_repository();
    let mut first = intervention_with_details(4, "2025-04-10T09:00:00Z", 0);
    first.description = Some("first write".to_string());
    let mut second = first.clone();
    second.description = Some("second write".to_string());

    assert!(repo.add_intervention(&first).await.is_complete());
    assert!(repo.add_intervention(&second).await.is_complete());

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description.as_deref(), Some("second write"));
}

#[tokio::test]
async fn import_seeds_pending_interventions() {
    let repo = memory_repository();
    let payload = r#"[
        {"id": 1, "description_intervention": "Grease main bearing", "date_intervention": "2025-04-10"},
        {"id": 2, "description_intervention": "Replace air filter", "date_intervention": "2025-04-11"}
    ]"#;

    let outcome = repo.import_interventions_from_json(payload).await;
    assert_eq!(outcome.attempted, 2);
    assert_eq!(outcome.written, 2);
    assert!(outcome.is_complete());

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), 2);
    for intervention in &listed {
        assert_eq!(intervention.status, InterventionStatus::Pending);
        assert_eq!(intervention.intervenant_id, 0);
        assert!(intervention.intervenant_name.is_empty());
        assert_eq!(intervention.date_intervention, intervention.date_prevue);
        assert_eq!(intervention.date_intervention, intervention.date_realisation);
    }
}

#[tokio::test]
async fn import_is_best_effort_per_record() {
    let repo = memory_repository();
    let payload = r#"[
        {"id": 1, "description_intervention": "Good record", "date_intervention": "2025-04-10"},
        {"id": 2, "description_intervention": "Bad date", "date_intervention": "not-a-date"}
    ]"#;

    let outcome = repo.import_interventions_from_json(payload).await;
    assert_eq!(outcome.attempted, 2);
    assert_eq!(outcome.written, 1);

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, 1);
}

#[tokio::test]
async fn invalid_import_payload_counts_nothing() {
    let repo = memory_repository();
    let outcome = repo.import_interventions_from_json("{not json").await;
    assert_eq!(outcome.attempted, 0);
    assert_eq!(outcome.written, 0);
}

#[tokio::test]
async fn sample_seed_populates_the_store() {
    let repo = memory_repository();
    let outcome = repo.add_sample_interventions().await;
    assert!(outcome.attempted > 0);
    assert!(outcome.is_complete());

    let listed = repo.list_interventions().await.into_interventions();
    assert_eq!(listed.len(), outcome.written);
}
