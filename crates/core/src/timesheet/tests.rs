//! Timesheet service tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rstest::rstest;
use rust_decimal_macros::dec;
use tempo_shared::types::{CategoryId, EntryId, ProjectId, UserId};
use tempo_shared::{Actor, AppError, Role};

use super::memory::{FailingAuditSink, MemoryStore, RecordingAuditSink};
use super::*;
use crate::audit::{AuditAction, AuditSink};
use crate::clock::FixedClock;
use crate::entry::{CreateEntryInput, Entry, EntryError, EntryTarget, UpdateEntryInput};
use crate::project::{Project, ProjectStatus};
use crate::reconciliation::ReconciliationService;
use crate::reports::ReportService;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

fn project(name: &str) -> Project {
    Project {
        id: ProjectId::new(),
        name: name.to_string(),
        color: "#6366f1".to_string(),
        status: ProjectStatus::Active,
        is_deleted: false,
        total_hours: dec!(100),
        used_minutes: 0,
        created_at: now(),
        updated_at: now(),
    }
}

/// Hands control back to the runtime after every entry read, so two
/// requests joined on one task both read before either commits.
struct InterleavingStore<'a>(&'a MemoryStore);

#[async_trait]
impl TimesheetStore for InterleavingStore<'_> {
    async fn find_entry(&self, id: EntryId) -> Result<Option<Entry>, StoreError> {
        let found = self.0.find_entry(id).await;
        tokio::task::yield_now().await;
        found
    }

    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        self.0.find_project(id).await
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError> {
        self.0.category_exists(id).await
    }

    async fn is_assigned(&self, user_id: UserId, project_id: ProjectId) -> Result<bool, StoreError> {
        self.0.is_assigned(user_id, project_id).await
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, StoreError> {
        self.0.list_entries(query).await
    }

    async fn commit(&self, change: EntryChange) -> Result<(), StoreError> {
        self.0.commit(change).await
    }
}

struct Fixture {
    store: MemoryStore,
    audit: Arc<RecordingAuditSink>,
    clock: Arc<FixedClock>,
    policy: TimesheetPolicy,
    user: Actor,
    other: Actor,
    admin: Actor,
    apollo: ProjectId,
    zeus: ProjectId,
    meetings: CategoryId,
}

impl Fixture {
    fn new() -> Self {
        let store = MemoryStore::default();
        let apollo = project("Apollo");
        let zeus = project("Zeus");
        let meetings = CategoryId::new();
        let user = Actor::new(UserId::new(), Role::User);
        let other = Actor::new(UserId::new(), Role::User);

        store.assign(user.user_id, apollo.id);
        store.assign(user.user_id, zeus.id);
        store.add_category(meetings);

        let fixture = Self {
            apollo: apollo.id,
            zeus: zeus.id,
            meetings,
            store,
            audit: Arc::new(RecordingAuditSink::default()),
            clock: Arc::new(FixedClock::new(now())),
            policy: TimesheetPolicy::default(),
            user,
            other,
            admin: Actor::new(UserId::new(), Role::Admin),
        };
        fixture.store.add_project(apollo);
        fixture.store.add_project(zeus);
        fixture
    }

    fn service(&self) -> TimesheetService<&MemoryStore> {
        TimesheetService::new(
            &self.store,
            self.audit.clone(),
            self.clock.clone(),
            self.policy,
        )
    }

    fn interleaving_service(&self) -> TimesheetService<InterleavingStore<'_>> {
        TimesheetService::new(
            InterleavingStore(&self.store),
            self.audit.clone(),
            self.clock.clone(),
            self.policy,
        )
    }

    fn input(&self, target: EntryTarget, date: NaiveDate, hours: i32, minutes: i32) -> CreateEntryInput {
        CreateEntryInput {
            owner_id: None,
            project_id: target.project_id(),
            category_id: target.category_id(),
            date,
            hours,
            minutes,
            notes: Some("  worked on it  ".to_string()),
        }
    }

    fn counters_match_reports(&self) {
        let computed = ReportService::project_minutes(&self.store.all_entries());
        for project in self.store.projects() {
            assert_eq!(
                project.used_minutes,
                computed.get(&project.id).copied().unwrap_or(0),
                "counter drift on {}",
                project.name
            );
        }
    }
}

#[tokio::test]
async fn test_create_project_entry_increments_counter() {
    let fx = Fixture::new();
    let entry = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 2, 53))
        .await
        .unwrap();

    assert_eq!((entry.duration.hours, entry.duration.minutes), (3, 0));
    assert_eq!(entry.owner_id, fx.user.user_id);
    assert_eq!(entry.notes.as_deref(), Some("worked on it"));
    assert_eq!(fx.store.used_minutes(fx.apollo), 180);
    assert_eq!(fx.audit.records().len(), 1);
    assert_eq!(fx.audit.records()[0].action, AuditAction::Create);
}

#[tokio::test]
async fn test_create_category_entry_leaves_counters_alone() {
    let fx = Fixture::new();
    fx.service()
        .create(&fx.user, fx.input(EntryTarget::Category(fx.meetings), today(), 1, 0))
        .await
        .unwrap();

    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    assert_eq!(fx.store.used_minutes(fx.zeus), 0);
}

#[tokio::test]
async fn test_create_rejects_missing_and_double_target() {
    let fx = Fixture::new();
    let service = fx.service();

    let mut neither = fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0);
    neither.project_id = None;
    let err = service.create(&fx.user, neither).await.unwrap_err();
    assert!(matches!(err, TimesheetError::Invalid(EntryError::MissingTarget)));

    let mut both = fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0);
    both.category_id = Some(fx.meetings);
    let err = service.create(&fx.user, both).await.unwrap_err();
    assert!(matches!(err, TimesheetError::Invalid(EntryError::AmbiguousTarget)));
}

#[tokio::test]
async fn test_create_rejects_duration_past_24_hours() {
    let fx = Fixture::new();
    let err = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 24, 55))
        .await
        .unwrap_err();

    assert!(matches!(err, TimesheetError::Invalid(EntryError::DurationTooLong)));
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
}

#[tokio::test]
async fn test_user_cannot_create_for_someone_else() {
    let fx = Fixture::new();
    let mut input = fx.input(EntryTarget::Category(fx.meetings), today(), 1, 0);
    input.owner_id = Some(fx.other.user_id);

    let err = fx.service().create(&fx.user, input).await.unwrap_err();
    assert!(matches!(err, TimesheetError::NotOwner));
    assert_eq!(AppError::from(err).status_code(), 403);
}

#[tokio::test]
async fn test_admin_creates_on_behalf_without_assignment() {
    let fx = Fixture::new();
    let mut input = fx.input(EntryTarget::Project(fx.zeus), today(), 1, 30);
    input.owner_id = Some(fx.other.user_id);

    let entry = fx.service().create(&fx.admin, input).await.unwrap();
    assert_eq!(entry.owner_id, fx.other.user_id);
    assert_eq!(fx.store.used_minutes(fx.zeus), 90);
}

#[tokio::test]
async fn test_unassigned_user_is_rejected() {
    let fx = Fixture::new();
    let err = fx
        .service()
        .create(&fx.other, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, TimesheetError::NotAssigned(id) if id == fx.apollo));
}

#[tokio::test]
async fn test_deleted_project_is_not_found() {
    let fx = Fixture::new();
    fx.store.soft_delete_project(fx.apollo);

    let err = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, TimesheetError::ProjectNotFound(_)));
}

#[rstest]
#[case(0, true)]
#[case(7, true)]
#[case(8, false)]
#[case(-3, true)]
#[tokio::test]
async fn test_backdate_window(#[case] offset: i64, #[case] ok: bool) {
    let fx = Fixture::new();
    let result = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), days_ago(offset), 1, 0))
        .await;

    if ok {
        assert!(result.is_ok());
    } else {
        assert!(matches!(
            result,
            Err(TimesheetError::Invalid(EntryError::TooFarInPast { limit_days: 7 }))
        ));
        assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    }
}

#[tokio::test]
async fn test_future_dates_rejected_when_configured() {
    let mut fx = Fixture::new();
    fx.policy.reject_future_dates = true;

    let err = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), days_ago(-1), 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, TimesheetError::Invalid(EntryError::FutureDate(_))));
}

#[tokio::test]
async fn test_business_date_follows_timezone() {
    let mut fx = Fixture::new();
    fx.policy.timezone = chrono_tz::Asia::Tokyo;
    // 2024-06-15 23:30 UTC is already the 16th in Tokyo.
    fx.clock.set(Utc.with_ymd_and_hms(2024, 6, 15, 23, 30, 0).unwrap());

    assert_eq!(
        fx.service().today(),
        NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()
    );
}

#[tokio::test]
async fn test_update_same_project_applies_net_delta() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 2, 0))
        .await
        .unwrap();

    let updated = service
        .update(
            &fx.user,
            entry.id,
            UpdateEntryInput {
                minutes: Some(22),
                ..UpdateEntryInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!((updated.duration.hours, updated.duration.minutes), (2, 15));
    assert_eq!(fx.store.used_minutes(fx.apollo), 135);
    assert_eq!(updated.notes, entry.notes);
}

#[tokio::test]
async fn test_reassign_moves_minutes_between_projects() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 2, 0))
        .await
        .unwrap();

    service
        .update(
            &fx.user,
            entry.id,
            UpdateEntryInput {
                project_id: Some(fx.zeus),
                ..UpdateEntryInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    assert_eq!(fx.store.used_minutes(fx.zeus), 120);
    fx.counters_match_reports();
}

#[tokio::test]
async fn test_move_to_category_debits_project() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 45))
        .await
        .unwrap();

    let updated = service
        .update(
            &fx.user,
            entry.id,
            UpdateEntryInput {
                category_id: Some(fx.meetings),
                notes: Some("   ".to_string()),
                ..UpdateEntryInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.target, EntryTarget::Category(fx.meetings));
    assert_eq!(updated.notes, None);
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
}

#[tokio::test]
async fn test_update_to_old_date_is_rejected() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0))
        .await
        .unwrap();

    let err = service
        .update(
            &fx.user,
            entry.id,
            UpdateEntryInput {
                date: Some(days_ago(30)),
                ..UpdateEntryInput::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TimesheetError::Invalid(EntryError::TooFarInPast { .. })));
}

#[tokio::test]
async fn test_edit_of_old_entry_keeps_its_date() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), days_ago(7), 1, 0))
        .await
        .unwrap();

    // A week later the entry is outside the window, but its date is not changing.
    fx.clock.advance(Duration::days(7));
    let updated = service
        .update(
            &fx.user,
            entry.id,
            UpdateEntryInput {
                hours: Some(2),
                ..UpdateEntryInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.date, days_ago(7));
    assert_eq!(fx.store.used_minutes(fx.apollo), 120);
}

#[tokio::test]
async fn test_other_user_cannot_touch_entry() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Category(fx.meetings), today(), 1, 0))
        .await
        .unwrap();

    let err = service.delete(&fx.other, entry.id).await.unwrap_err();
    assert!(matches!(err, TimesheetError::NotOwner));

    let err = service
        .update(&fx.other, entry.id, UpdateEntryInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TimesheetError::NotOwner));

    service.delete(&fx.admin, entry.id).await.unwrap();
}

#[tokio::test]
async fn test_delete_and_restore_are_symmetric() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 3, 30))
        .await
        .unwrap();

    service.delete(&fx.user, entry.id).await.unwrap();
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    fx.counters_match_reports();

    let err = service.delete(&fx.user, entry.id).await.unwrap_err();
    assert!(matches!(err, TimesheetError::EntryNotFound(_)));

    let restored = service.restore(&fx.user, entry.id).await.unwrap();
    assert!(restored.is_active());
    assert_eq!(fx.store.used_minutes(fx.apollo), 210);

    let err = service.restore(&fx.user, entry.id).await.unwrap_err();
    assert!(matches!(err, TimesheetError::NotDeleted(_)));
    assert_eq!(AppError::from(err).status_code(), 409);

    let actions: Vec<_> = fx.audit.records().iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::Create, AuditAction::Delete, AuditAction::Restore]
    );
}

#[tokio::test]
async fn test_racing_deletes_debit_the_counter_once() {
    let fx = Fixture::new();
    let entry = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 2, 0))
        .await
        .unwrap();

    let service = fx.interleaving_service();
    let (first, second) = tokio::join!(
        service.delete(&fx.user, entry.id),
        service.delete(&fx.admin, entry.id),
    );

    first.unwrap();
    let err = second.unwrap_err();
    assert!(matches!(err, TimesheetError::Store(StoreError::Conflict(_))));
    assert_eq!(AppError::from(err).status_code(), 409);
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    fx.counters_match_reports();
}

#[tokio::test]
async fn test_update_racing_delete_is_rejected() {
    let fx = Fixture::new();
    let entry = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0))
        .await
        .unwrap();

    let service = fx.interleaving_service();
    let (deleted, updated) = tokio::join!(
        service.delete(&fx.user, entry.id),
        service.update(
            &fx.user,
            entry.id,
            UpdateEntryInput {
                project_id: Some(fx.zeus),
                ..UpdateEntryInput::default()
            },
        ),
    );

    deleted.unwrap();
    assert!(matches!(
        updated.unwrap_err(),
        TimesheetError::Store(StoreError::Conflict(_))
    ));
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    assert_eq!(fx.store.used_minutes(fx.zeus), 0);
    fx.counters_match_reports();
}

#[tokio::test]
async fn test_racing_restores_credit_the_counter_once() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 30))
        .await
        .unwrap();
    service.delete(&fx.user, entry.id).await.unwrap();

    let racing = fx.interleaving_service();
    let (first, second) = tokio::join!(
        racing.restore(&fx.user, entry.id),
        racing.restore(&fx.user, entry.id),
    );

    first.unwrap();
    assert!(matches!(
        second.unwrap_err(),
        TimesheetError::Store(StoreError::Conflict(_))
    ));
    assert_eq!(fx.store.used_minutes(fx.apollo), 90);
    fx.counters_match_reports();
}

#[tokio::test]
async fn test_deleted_entry_is_invisible_to_updates() {
    let fx = Fixture::new();
    let service = fx.service();
    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0))
        .await
        .unwrap();
    service.delete(&fx.user, entry.id).await.unwrap();

    let err = service
        .update(
            &fx.user,
            entry.id,
            UpdateEntryInput {
                hours: Some(5),
                ..UpdateEntryInput::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TimesheetError::EntryNotFound(_)));
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
}

#[tokio::test]
async fn test_copy_day_into_empty_day() {
    let fx = Fixture::new();
    let service = fx.service();
    let yesterday = days_ago(1);
    for (target, hours) in [
        (EntryTarget::Project(fx.apollo), 2),
        (EntryTarget::Project(fx.zeus), 3),
        (EntryTarget::Category(fx.meetings), 1),
    ] {
        service
            .create(&fx.user, fx.input(target, yesterday, hours, 0))
            .await
            .unwrap();
    }

    let copies = service
        .copy_day(&fx.user, None, yesterday, today())
        .await
        .unwrap();

    assert_eq!(copies.len(), 3);
    assert!(copies.iter().all(|c| c.date == today() && c.notes.is_none()));
    assert_eq!(fx.store.used_minutes(fx.apollo), 240);
    assert_eq!(fx.store.used_minutes(fx.zeus), 360);
    fx.counters_match_reports();
}

#[tokio::test]
async fn test_copy_into_busy_day_changes_nothing() {
    let fx = Fixture::new();
    let service = fx.service();
    service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), days_ago(1), 2, 0))
        .await
        .unwrap();
    service
        .create(&fx.user, fx.input(EntryTarget::Category(fx.meetings), today(), 1, 0))
        .await
        .unwrap();
    let before = fx.store.all_entries().len();

    let err = service
        .copy_day(&fx.user, None, days_ago(1), today())
        .await
        .unwrap_err();

    assert!(matches!(err, TimesheetError::TargetDayNotEmpty(_)));
    assert_eq!(AppError::from(err).status_code(), 409);
    assert_eq!(fx.store.all_entries().len(), before);
    assert_eq!(fx.store.used_minutes(fx.apollo), 120);
}

#[tokio::test]
async fn test_copy_from_empty_day_is_not_found() {
    let fx = Fixture::new();
    let err = fx
        .service()
        .copy_day(&fx.user, None, days_ago(1), today())
        .await
        .unwrap_err();

    assert!(matches!(err, TimesheetError::NothingToCopy(_)));
    assert_eq!(AppError::from(err).status_code(), 404);
}

#[tokio::test]
async fn test_copy_revalidates_each_entry() {
    let fx = Fixture::new();
    let service = fx.service();
    service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), days_ago(1), 2, 0))
        .await
        .unwrap();
    service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.zeus), days_ago(1), 1, 0))
        .await
        .unwrap();
    fx.store.soft_delete_project(fx.zeus);

    let err = service
        .copy_day(&fx.user, None, days_ago(1), today())
        .await
        .unwrap_err();

    assert!(matches!(err, TimesheetError::ProjectNotFound(id) if id == fx.zeus));
    assert_eq!(fx.store.used_minutes(fx.apollo), 120);
    assert_eq!(fx.store.all_entries().len(), 2);
}

#[tokio::test]
async fn test_failed_commit_leaves_no_trace() {
    let fx = Fixture::new();
    fx.store.fail_commits(true);

    let err = fx
        .service()
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, TimesheetError::Store(_)));
    assert_eq!(AppError::from(err).status_code(), 500);
    assert!(fx.store.all_entries().is_empty());
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    assert!(fx.audit.records().is_empty());
}

#[tokio::test]
async fn test_audit_failure_does_not_fail_mutation() {
    let fx = Fixture::new();
    let audit: Arc<dyn AuditSink> = Arc::new(FailingAuditSink);
    let service = TimesheetService::new(&fx.store, audit, fx.clock.clone(), fx.policy);

    let entry = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), today(), 1, 0))
        .await
        .unwrap();
    assert!(entry.is_active());
    assert_eq!(fx.store.used_minutes(fx.apollo), 60);
}

#[tokio::test]
async fn test_list_scopes_users_to_their_own_entries() {
    let fx = Fixture::new();
    let service = fx.service();
    service
        .create(&fx.user, fx.input(EntryTarget::Category(fx.meetings), today(), 1, 0))
        .await
        .unwrap();
    let mut on_behalf = fx.input(EntryTarget::Category(fx.meetings), today(), 2, 0);
    on_behalf.owner_id = Some(fx.other.user_id);
    service.create(&fx.admin, on_behalf).await.unwrap();

    let mine = service.list(&fx.user, EntryQuery::default()).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].owner_id, fx.user.user_id);

    let err = service
        .list(
            &fx.user,
            EntryQuery {
                owner_id: Some(fx.other.user_id),
                ..EntryQuery::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TimesheetError::NotOwner));

    let all = service.list(&fx.admin, EntryQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_list_rejects_inverted_range() {
    let fx = Fixture::new();
    let err = fx
        .service()
        .list(
            &fx.admin,
            EntryQuery {
                start_date: Some(today()),
                end_date: Some(days_ago(3)),
                ..EntryQuery::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(AppError::from(err).status_code(), 400);
}

#[tokio::test]
async fn test_mixed_history_reconciles() {
    let fx = Fixture::new();
    let service = fx.service();

    let a = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.apollo), days_ago(2), 4, 8))
        .await
        .unwrap();
    let b = service
        .create(&fx.user, fx.input(EntryTarget::Project(fx.zeus), days_ago(2), 1, 37))
        .await
        .unwrap();
    service
        .update(
            &fx.user,
            a.id,
            UpdateEntryInput {
                project_id: Some(fx.zeus),
                hours: Some(5),
                ..UpdateEntryInput::default()
            },
        )
        .await
        .unwrap();
    service.delete(&fx.user, b.id).await.unwrap();
    service
        .copy_day(&fx.user, None, days_ago(2), days_ago(1))
        .await
        .unwrap();
    service.restore(&fx.admin, b.id).await.unwrap();

    // a: 5h15 on Zeus; its copy: 5h15 on Zeus; b restored: 1h30 on Zeus.
    assert_eq!(fx.store.used_minutes(fx.zeus), 315 + 315 + 90);
    assert_eq!(fx.store.used_minutes(fx.apollo), 0);
    fx.counters_match_reports();

    let report =
        ReconciliationService::reconcile(&fx.store.projects(), &fx.store.all_entries());
    assert!(report.is_consistent());
}
