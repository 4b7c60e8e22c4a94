//! Tracking Resolver: protocol lookup with simulated status progression.
//!
//! No workflow backend exists, so a manifestation's displayed status is a
//! pure function of elapsed wall-clock time since creation. Lookups never
//! mutate the stored record; derivation happens on every read. The threshold
//! table is deliberately isolated here so a real, event-driven state machine
//! can replace it without touching the store.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::manifestation::{Manifestation, Status};
use crate::protocol::protocol_matches;
use crate::store::ManifestationStore;

/// Elapsed-time thresholds, ascending. Each entry is both the activation
/// threshold and the derived `status_updated_at` offset from creation.
fn thresholds() -> [(Duration, Status); 3] {
    [
        (Duration::minutes(6), Status::EmAnalise),
        (Duration::minutes(30), Status::Encaminhada),
        (Duration::hours(2), Status::Finalizada),
    ]
}

/// Derive the displayed status and its timestamp for a record created at
/// `created_at`, as observed at `now`. The highest satisfied threshold wins;
/// a clock reading before creation yields `Recebida`.
pub fn derive_status(created_at: DateTime<Utc>, now: DateTime<Utc>) -> (Status, DateTime<Utc>) {
    let elapsed = now.signed_duration_since(created_at);

    let mut status = Status::Recebida;
    let mut status_updated_at = created_at;
    for (offset, stage) in thresholds() {
        if elapsed >= offset {
            status = stage;
            status_updated_at = created_at + offset;
        }
    }

    (status, status_updated_at)
}

/// Annotation of one fixed milestone relative to the derived status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Completed,
    Current,
    Pending,
}

impl MilestoneState {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneState::Completed => "completed",
            MilestoneState::Current => "current",
            MilestoneState::Pending => "pending",
        }
    }
}

/// One entry of the four-milestone timeline view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub status: Status,
    pub state: MilestoneState,
}

/// The fixed four-milestone timeline, annotated against `current`.
pub fn timeline(current: Status) -> [Milestone; 4] {
    Status::ALL.map(|status| Milestone {
        status,
        state: match status.cmp(&current) {
            Ordering::Less => MilestoneState::Completed,
            Ordering::Equal => MilestoneState::Current,
            Ordering::Greater => MilestoneState::Pending,
        },
    })
}

/// Read-only resolver over a [`ManifestationStore`].
#[derive(Clone)]
pub struct TrackingResolver {
    store: Arc<ManifestationStore>,
}

impl TrackingResolver {
    pub fn new(store: Arc<ManifestationStore>) -> Self {
        Self { store }
    }

    /// Resolve a protocol against the wall clock.
    pub fn find_by_protocol(&self, protocol: &str) -> Option<Manifestation> {
        self.find_by_protocol_at(protocol, Utc::now())
    }

    /// Resolve a protocol as observed at `now`. Case-insensitive exact match,
    /// first match wins. Absence is a value, not an error.
    pub fn find_by_protocol_at(
        &self,
        protocol: &str,
        now: DateTime<Utc>,
    ) -> Option<Manifestation> {
        let found = self
            .store
            .list_all()
            .into_iter()
            .find(|m| protocol_matches(&m.protocol, protocol))?;

        let (status, status_updated_at) = derive_status(found.created_at, now);
        Some(Manifestation {
            status,
            status_updated_at,
            ..found
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifestation::{Contact, NewManifestation, SubmissionContent};
    use crate::store::MemoryBlobStore;

    fn resolver_with_one_record(content: &str) -> (TrackingResolver, Manifestation) {
        let store = Arc::new(ManifestationStore::new(Arc::new(MemoryBlobStore::new())));
        let submission = store
            .create(NewManifestation {
                content: SubmissionContent::Text {
                    content: content.to_string(),
                },
                contact: Contact::Anonymous,
            })
            .unwrap();
        (TrackingResolver::new(store), submission.record)
    }

    #[test]
    fn test_derive_status_boundaries() {
        let created = Utc::now();

        let (status, at) = derive_status(created, created);
        assert_eq!(status, Status::Recebida);
        assert_eq!(at, created);

        let (status, at) = derive_status(created, created + Duration::minutes(6));
        assert_eq!(status, Status::EmAnalise);
        assert_eq!(at, created + Duration::minutes(6));

        let (status, at) = derive_status(created, created + Duration::minutes(30));
        assert_eq!(status, Status::Encaminhada);
        assert_eq!(at, created + Duration::minutes(30));

        let (status, at) = derive_status(created, created + Duration::hours(2));
        assert_eq!(status, Status::Finalizada);
        assert_eq!(at, created + Duration::hours(2));
    }

    #[test]
    fn test_derive_status_just_below_thresholds() {
        let created = Utc::now();
        let second = Duration::seconds(1);

        let (status, _) = derive_status(created, created + Duration::minutes(6) - second);
        assert_eq!(status, Status::Recebida);

        let (status, _) = derive_status(created, created + Duration::minutes(30) - second);
        assert_eq!(status, Status::EmAnalise);

        let (status, _) = derive_status(created, created + Duration::hours(2) - second);
        assert_eq!(status, Status::Encaminhada);
    }

    #[test]
    fn test_derive_status_before_creation_is_recebida() {
        let created = Utc::now();
        let (status, at) = derive_status(created, created - Duration::hours(1));
        assert_eq!(status, Status::Recebida);
        assert_eq!(at, created);
    }

    #[test]
    fn test_derive_status_is_monotonic() {
        let created = Utc::now();
        let mut previous = Status::Recebida;

        for minutes in 0..200 {
            let (status, _) = derive_status(created, created + Duration::minutes(minutes));
            assert!(
                status >= previous,
                "status regressed at +{minutes}min: {previous:?} -> {status:?}"
            );
            previous = status;
        }
    }

    #[test]
    fn test_find_by_protocol_case_insensitive() {
        let (resolver, record) = resolver_with_one_record("Rua sem iluminação");

        let lowered = record.protocol.to_lowercase();
        let found = resolver.find_by_protocol(&lowered).unwrap();
        assert_eq!(found.id, record.id);
    }

    #[test]
    fn test_find_by_protocol_absent() {
        let (resolver, _) = resolver_with_one_record("qualquer");
        assert!(resolver.find_by_protocol("NONEXISTENT-000000").is_none());
    }

    #[test]
    fn test_find_is_idempotent_at_fixed_instant() {
        let (resolver, record) = resolver_with_one_record("idempotente");
        let now = record.created_at + Duration::minutes(45);

        let first = resolver.find_by_protocol_at(&record.protocol, now).unwrap();
        let second = resolver.find_by_protocol_at(&record.protocol, now).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.status, Status::Encaminhada);
    }

    #[test]
    fn test_resolution_never_mutates_store() {
        let (resolver, record) = resolver_with_one_record("somente leitura");
        let later = record.created_at + Duration::hours(3);

        let resolved = resolver
            .find_by_protocol_at(&record.protocol, later)
            .unwrap();
        assert_eq!(resolved.status, Status::Finalizada);

        // A fresh read at creation time still derives from the stored record
        let at_creation = resolver
            .find_by_protocol_at(&record.protocol, record.created_at)
            .unwrap();
        assert_eq!(at_creation.status, Status::Recebida);
    }

    #[test]
    fn test_end_to_end_text_scenario() {
        let (resolver, record) = resolver_with_one_record("Rua sem iluminação");

        let today = record.created_at.date_naive().format("%Y%m%d").to_string();
        assert!(record.protocol.starts_with(&format!("PDF{today}-")));

        let immediate = resolver.find_by_protocol(&record.protocol).unwrap();
        assert_eq!(immediate.status, Status::Recebida);

        let resolved = resolver
            .find_by_protocol_at(&record.protocol, record.created_at + Duration::hours(3))
            .unwrap();
        assert_eq!(resolved.status, Status::Finalizada);
        assert_eq!(
            resolved.status_updated_at,
            record.created_at + Duration::hours(2)
        );
    }

    #[test]
    fn test_timeline_annotation() {
        let line = timeline(Status::Encaminhada);

        assert_eq!(line[0].state, MilestoneState::Completed);
        assert_eq!(line[1].state, MilestoneState::Completed);
        assert_eq!(line[2].state, MilestoneState::Current);
        assert_eq!(line[3].state, MilestoneState::Pending);
    }

    #[test]
    fn test_timeline_recebida_never_pending() {
        for status in Status::ALL {
            let line = timeline(status);
            assert_eq!(line[0].status, Status::Recebida);
            assert_ne!(line[0].state, MilestoneState::Pending);
        }
    }
}
