//! Competition lifecycle rules.
//!
//! Pure decision logic shared by every surface that asks "can this user act
//! on this competition right now": eligibility to register and submit,
//! status partitioning, search filtering, and headline totals. All functions
//! take an explicit `now` so deadline behavior is deterministic under test.
//!
//! The database enforces the matching uniqueness invariants with unique
//! constraints; the checks here exist to answer precisely, and early, before
//! a write is attempted. A verdict of "not eligible" is a normal outcome,
//! not an error.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::competition::CompetitionSummary;
use crate::dto::registration::RegistrationWithCompetition;
use crate::models::{
    Competition, CompetitionStatus, Registration, RegistrationStatus, ReviewStatus, Role,
    Submission,
};

/// Identity of the caller, resolved by the web layer from the auth header
/// and the profile row. Passed explicitly so nothing here reads ambient
/// session state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Machine-readable grounds for denying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    CompetitionClosed,
    DeadlinePassed,
    AlreadyRegistered,
    AlreadySubmitted,
    RegistrationNotFound,
}

impl ReasonCode {
    /// Canonical user-facing message for this reason. The duplicate-write
    /// errors surfaced by the unique constraints reuse these, so a race
    /// lost at insert time reads the same as a denied pre-check.
    pub fn message(&self) -> &'static str {
        match self {
            ReasonCode::CompetitionClosed => "This competition is not currently open",
            ReasonCode::DeadlinePassed => "The deadline has passed",
            ReasonCode::AlreadyRegistered => "You are already registered for this competition",
            ReasonCode::AlreadySubmitted => {
                "You have already submitted work for this registration"
            }
            ReasonCode::RegistrationNotFound => "No registration found for this competition",
        }
    }
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Eligibility {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
}

impl Eligibility {
    pub fn granted() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: ReasonCode) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Whether `auth` may register for `competition` at instant `now`.
///
/// `existing_registrations` are the caller's own registrations across all
/// competitions; any row for this competition blocks re-registration, a
/// cancelled one included.
pub fn can_register(
    auth: &AuthContext,
    competition: &Competition,
    existing_registrations: &[Registration],
    now: DateTime<Utc>,
) -> Eligibility {
    debug_assert!(
        existing_registrations
            .iter()
            .all(|r| r.user_id == auth.user_id),
        "existing registrations must belong to the evaluated user"
    );

    if !CompetitionStatus::parse(&competition.status).is_open() {
        return Eligibility::denied(ReasonCode::CompetitionClosed);
    }

    if now >= competition.registration_deadline {
        return Eligibility::denied(ReasonCode::DeadlinePassed);
    }

    if existing_registrations
        .iter()
        .any(|r| r.competition_id == competition.id)
    {
        return Eligibility::denied(ReasonCode::AlreadyRegistered);
    }

    Eligibility::granted()
}

/// Whether `auth` may submit work for `competition` at instant `now`.
///
/// An existing submission denies before the deadline check does, so the
/// caller can route to the submission that already exists even after the
/// deadline has passed.
pub fn can_submit(
    auth: &AuthContext,
    registration: Option<&Registration>,
    competition: &Competition,
    existing_submission: Option<&Submission>,
    now: DateTime<Utc>,
) -> Eligibility {
    let Some(registration) = registration else {
        return Eligibility::denied(ReasonCode::RegistrationNotFound);
    };

    debug_assert_eq!(registration.user_id, auth.user_id);
    debug_assert_eq!(registration.competition_id, competition.id);

    if existing_submission.is_some() {
        return Eligibility::denied(ReasonCode::AlreadySubmitted);
    }

    if now >= competition.submission_deadline {
        return Eligibility::denied(ReasonCode::DeadlinePassed);
    }

    Eligibility::granted()
}

/// Registrations partitioned by stored status. Every input row lands in
/// exactly one bucket; values outside the vocabulary land in `unrecognized`
/// rather than disappearing.
#[derive(Debug, Default)]
pub struct RegistrationBuckets<'a> {
    pub registered: Vec<&'a Registration>,
    pub confirmed: Vec<&'a Registration>,
    pub cancelled: Vec<&'a Registration>,
    pub unrecognized: Vec<&'a Registration>,
}

impl RegistrationBuckets<'_> {
    pub fn counts(&self) -> RegistrationCounts {
        RegistrationCounts {
            total: self.registered.len()
                + self.confirmed.len()
                + self.cancelled.len()
                + self.unrecognized.len(),
            registered: self.registered.len(),
            confirmed: self.confirmed.len(),
            cancelled: self.cancelled.len(),
            unrecognized: self.unrecognized.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegistrationCounts {
    pub total: usize,
    pub registered: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub unrecognized: usize,
}

pub fn classify_registrations<'a, I>(registrations: I) -> RegistrationBuckets<'a>
where
    I: IntoIterator<Item = &'a Registration>,
{
    let mut buckets = RegistrationBuckets::default();

    for registration in registrations {
        match RegistrationStatus::parse(&registration.status) {
            RegistrationStatus::Registered => buckets.registered.push(registration),
            RegistrationStatus::Confirmed => buckets.confirmed.push(registration),
            RegistrationStatus::Cancelled => buckets.cancelled.push(registration),
            RegistrationStatus::Unknown(_) => buckets.unrecognized.push(registration),
        }
    }

    buckets
}

/// The derived "still owes a submission" view over a participant's
/// registrations: no submission yet, competition open, deadline not passed.
/// Registration status is deliberately not consulted.
pub fn pending_submissions<'a>(
    registrations: &'a [RegistrationWithCompetition],
    submitted_registration_ids: &HashSet<Uuid>,
    now: DateTime<Utc>,
) -> Vec<&'a RegistrationWithCompetition> {
    registrations
        .iter()
        .filter(|row| {
            !submitted_registration_ids.contains(&row.registration.id)
                && CompetitionStatus::parse(&row.competition_status).is_open()
                && now < row.submission_deadline
        })
        .collect()
}

/// Submissions partitioned by stored review status, same totality rules as
/// `RegistrationBuckets`.
#[derive(Debug, Default)]
pub struct SubmissionBuckets<'a> {
    pub submitted: Vec<&'a Submission>,
    pub reviewed: Vec<&'a Submission>,
    pub approved: Vec<&'a Submission>,
    pub rejected: Vec<&'a Submission>,
    pub unrecognized: Vec<&'a Submission>,
}

impl SubmissionBuckets<'_> {
    pub fn counts(&self) -> SubmissionCounts {
        SubmissionCounts {
            total: self.submitted.len()
                + self.reviewed.len()
                + self.approved.len()
                + self.rejected.len()
                + self.unrecognized.len(),
            submitted: self.submitted.len(),
            reviewed: self.reviewed.len(),
            approved: self.approved.len(),
            rejected: self.rejected.len(),
            unrecognized: self.unrecognized.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionCounts {
    pub total: usize,
    pub submitted: usize,
    pub reviewed: usize,
    pub approved: usize,
    pub rejected: usize,
    pub unrecognized: usize,
}

pub fn classify_submissions<'a, I>(submissions: I) -> SubmissionBuckets<'a>
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut buckets = SubmissionBuckets::default();

    for submission in submissions {
        match ReviewStatus::parse(&submission.status) {
            ReviewStatus::Submitted => buckets.submitted.push(submission),
            ReviewStatus::Reviewed => buckets.reviewed.push(submission),
            ReviewStatus::Approved => buckets.approved.push(submission),
            ReviewStatus::Rejected => buckets.rejected.push(submission),
            ReviewStatus::Unknown(_) => buckets.unrecognized.push(submission),
        }
    }

    buckets
}

/// A record that exposes the text fields admin search should look at.
pub trait Searchable {
    /// Fields to match against; `None` entries never match anything.
    fn search_fields(&self) -> Vec<Option<&str>>;
}

/// Lazily filter `records` by a case-insensitive substring match over each
/// record's search fields. An empty term matches every record; input order
/// is preserved and the returned iterator can be rebuilt at will.
pub fn filter_by_search<'a, T: Searchable>(
    records: &'a [T],
    term: &str,
) -> impl Iterator<Item = &'a T> {
    let needle = term.to_lowercase();

    records.iter().filter(move |record| {
        if needle.is_empty() {
            return true;
        }

        record
            .search_fields()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    })
}

/// Headline totals over the competition overview rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CompetitionTotals {
    pub total_competitions: i64,
    pub active_competitions: i64,
    pub total_participants: i64,
}

/// `active` means status parses to `open`; a missing registration count
/// contributes zero participants.
pub fn aggregate_counts(competitions: &[CompetitionSummary]) -> CompetitionTotals {
    let mut totals = CompetitionTotals {
        total_competitions: competitions.len() as i64,
        active_competitions: 0,
        total_participants: 0,
    };

    for row in competitions {
        if CompetitionStatus::parse(&row.status).is_open() {
            totals.active_competitions += 1;
        }
        totals.total_participants += row.registration_count.unwrap_or(0);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn competition(status: &str) -> Competition {
        Competition {
            id: Uuid::new_v4(),
            name: "Eco Innovation Challenge".to_string(),
            description: "Annual environmental competition".to_string(),
            category: "LKTI".to_string(),
            status: status.to_string(),
            registration_deadline: instant(2025, 3, 1),
            submission_deadline: instant(2025, 4, 1),
            announcement_date: None,
            registration_fee: Decimal::ZERO,
            prize_pool: None,
            max_team_size: 3,
            requirements: None,
            created_at: instant(2025, 1, 1),
        }
    }

    fn registration_for(auth: &AuthContext, competition_id: Uuid, status: &str) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            user_id: auth.user_id,
            competition_id,
            team_name: None,
            team_members: None,
            institution: "Universitas Hijau".to_string(),
            contact_phone: "0812000111".to_string(),
            status: status.to_string(),
            created_at: instant(2025, 2, 1),
        }
    }

    fn submission_for(registration_id: Uuid, status: &str) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            registration_id,
            title: "Waste Mapping Study".to_string(),
            description: "Final paper".to_string(),
            file_url: "https://files.example.com/paper.pdf".to_string(),
            additional_links: None,
            notes: None,
            status: status.to_string(),
            created_at: instant(2025, 3, 15),
        }
    }

    fn participant() -> AuthContext {
        AuthContext::new(Uuid::new_v4(), Role::Participant)
    }

    #[test]
    fn test_can_register_when_all_checks_pass() {
        let auth = participant();
        let comp = competition("open");

        let verdict = can_register(&auth, &comp, &[], instant(2025, 2, 1));

        assert_eq!(verdict, Eligibility::granted());
    }

    #[test]
    fn test_closed_competition_denies_regardless_of_deadline() {
        let auth = participant();
        let before_deadline = instant(2025, 2, 1);

        for status in ["closed", "upcoming", "paused"] {
            let comp = competition(status);
            let verdict = can_register(&auth, &comp, &[], before_deadline);
            assert_eq!(
                verdict,
                Eligibility::denied(ReasonCode::CompetitionClosed),
                "status {status} must deny with COMPETITION_CLOSED"
            );
        }
    }

    #[test]
    fn test_registration_deadline_is_strict() {
        let auth = participant();
        let comp = competition("open");

        // One microsecond before the deadline still passes.
        let just_before = comp.registration_deadline - chrono::Duration::microseconds(1);
        assert_eq!(
            can_register(&auth, &comp, &[], just_before),
            Eligibility::granted()
        );

        // The deadline instant itself is already too late.
        assert_eq!(
            can_register(&auth, &comp, &[], comp.registration_deadline),
            Eligibility::denied(ReasonCode::DeadlinePassed)
        );
    }

    #[test]
    fn test_existing_registration_denies_before_deadline() {
        let auth = participant();
        let comp = competition("open");
        let existing = vec![registration_for(&auth, comp.id, "registered")];

        let verdict = can_register(&auth, &comp, &existing, instant(2025, 2, 1));

        assert_eq!(verdict, Eligibility::denied(ReasonCode::AlreadyRegistered));
    }

    #[test]
    fn test_cancelled_registration_still_blocks_reregistration() {
        // The unique constraint does not care about status, so neither does
        // the pre-check.
        let auth = participant();
        let comp = competition("open");
        let existing = vec![registration_for(&auth, comp.id, "cancelled")];

        let verdict = can_register(&auth, &comp, &existing, instant(2025, 2, 1));

        assert_eq!(verdict, Eligibility::denied(ReasonCode::AlreadyRegistered));
    }

    #[test]
    fn test_registration_for_other_competition_does_not_block() {
        let auth = participant();
        let comp = competition("open");
        let existing = vec![registration_for(&auth, Uuid::new_v4(), "registered")];

        let verdict = can_register(&auth, &comp, &existing, instant(2025, 2, 1));

        assert_eq!(verdict, Eligibility::granted());
    }

    #[test]
    fn test_closed_wins_over_deadline_and_duplicate() {
        let auth = participant();
        let comp = competition("closed");
        let existing = vec![registration_for(&auth, comp.id, "registered")];

        let verdict = can_register(&auth, &comp, &existing, instant(2025, 6, 1));

        assert_eq!(verdict, Eligibility::denied(ReasonCode::CompetitionClosed));
    }

    #[test]
    fn test_can_submit_when_all_checks_pass() {
        let auth = participant();
        let comp = competition("open");
        let registration = registration_for(&auth, comp.id, "registered");

        let verdict = can_submit(&auth, Some(&registration), &comp, None, instant(2025, 3, 15));

        assert_eq!(verdict, Eligibility::granted());
    }

    #[test]
    fn test_missing_registration_denies_submission() {
        let auth = participant();
        let comp = competition("open");

        let verdict = can_submit(&auth, None, &comp, None, instant(2025, 3, 15));

        assert_eq!(
            verdict,
            Eligibility::denied(ReasonCode::RegistrationNotFound)
        );
    }

    #[test]
    fn test_existing_submission_denies_even_past_deadline() {
        let auth = participant();
        let comp = competition("open");
        let registration = registration_for(&auth, comp.id, "registered");
        let existing = submission_for(registration.id, "submitted");

        let past_deadline = instant(2025, 6, 1);
        let verdict = can_submit(
            &auth,
            Some(&registration),
            &comp,
            Some(&existing),
            past_deadline,
        );

        assert_eq!(verdict, Eligibility::denied(ReasonCode::AlreadySubmitted));
    }

    #[test]
    fn test_can_submit_is_deterministic_for_fixed_now() {
        let auth = participant();
        let comp = competition("open");
        let registration = registration_for(&auth, comp.id, "registered");
        let now = instant(2025, 3, 15);

        let first = can_submit(&auth, Some(&registration), &comp, None, now);
        let second = can_submit(&auth, Some(&registration), &comp, None, now);

        assert_eq!(first, second);
    }

    #[test]
    fn test_submission_deadline_is_strict() {
        let auth = participant();
        let comp = competition("open");
        let registration = registration_for(&auth, comp.id, "registered");

        let just_before = comp.submission_deadline - chrono::Duration::microseconds(1);
        assert_eq!(
            can_submit(&auth, Some(&registration), &comp, None, just_before),
            Eligibility::granted()
        );

        assert_eq!(
            can_submit(
                &auth,
                Some(&registration),
                &comp,
                None,
                comp.submission_deadline
            ),
            Eligibility::denied(ReasonCode::DeadlinePassed)
        );
    }

    #[test]
    fn test_classify_registrations_partitions_every_row() {
        let auth = participant();
        let comp_id = Uuid::new_v4();
        let rows = vec![
            registration_for(&auth, comp_id, "registered"),
            registration_for(&auth, comp_id, "confirmed"),
            registration_for(&auth, comp_id, "cancelled"),
            registration_for(&auth, comp_id, "waitlisted"),
            registration_for(&auth, comp_id, "registered"),
        ];

        let buckets = classify_registrations(&rows);
        let counts = buckets.counts();

        assert_eq!(counts.registered, 2);
        assert_eq!(counts.confirmed, 1);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(counts.unrecognized, 1);
        assert_eq!(counts.total, rows.len());
        assert_eq!(buckets.unrecognized[0].status, "waitlisted");
    }

    #[test]
    fn test_classify_registrations_preserves_input_order() {
        let auth = participant();
        let comp_id = Uuid::new_v4();
        let rows = vec![
            registration_for(&auth, comp_id, "registered"),
            registration_for(&auth, comp_id, "registered"),
            registration_for(&auth, comp_id, "registered"),
        ];

        let buckets = classify_registrations(&rows);

        let ids: Vec<Uuid> = buckets.registered.iter().map(|r| r.id).collect();
        let expected: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_classify_submissions_partitions_every_row() {
        let registration_id = Uuid::new_v4();
        let rows = vec![
            submission_for(registration_id, "submitted"),
            submission_for(registration_id, "reviewed"),
            submission_for(registration_id, "approved"),
            submission_for(registration_id, "rejected"),
            submission_for(registration_id, "graded"),
        ];

        let buckets = classify_submissions(&rows);
        let counts = buckets.counts();

        assert_eq!(counts.submitted, 1);
        assert_eq!(counts.reviewed, 1);
        assert_eq!(counts.approved, 1);
        assert_eq!(counts.rejected, 1);
        assert_eq!(counts.unrecognized, 1);
        assert_eq!(counts.total, rows.len());
        assert_eq!(buckets.unrecognized[0].status, "graded");
    }

    struct Applicant {
        full_name: Option<String>,
        email: Option<String>,
        institution: Option<String>,
    }

    impl Searchable for Applicant {
        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![
                self.full_name.as_deref(),
                self.email.as_deref(),
                self.institution.as_deref(),
            ]
        }
    }

    fn applicants() -> Vec<Applicant> {
        vec![
            Applicant {
                full_name: Some("Budi Santoso".to_string()),
                email: Some("budi@kampus.ac.id".to_string()),
                institution: Some("Universitas Hijau".to_string()),
            },
            Applicant {
                full_name: Some("Rina Wati".to_string()),
                email: None,
                institution: Some("Institut Lestari".to_string()),
            },
            Applicant {
                full_name: None,
                email: None,
                institution: None,
            },
        ]
    }

    #[test]
    fn test_empty_search_term_matches_everything_in_order() {
        let records = applicants();
        let matched: Vec<_> = filter_by_search(&records, "").collect();
        assert_eq!(matched.len(), records.len());

        let names: Vec<_> = matched.iter().map(|r| r.full_name.as_deref()).collect();
        let expected: Vec<_> = records.iter().map(|r| r.full_name.as_deref()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = applicants();

        let matched: Vec<_> = filter_by_search(&records, "BUDI").collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].full_name.as_deref(), Some("Budi Santoso"));

        let matched: Vec<_> = filter_by_search(&records, "lestari").collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].institution.as_deref(), Some("Institut Lestari"));
    }

    #[test]
    fn test_absent_fields_never_match() {
        let records = applicants();
        // The all-None record matches no non-empty term, not even one that
        // would match the literal string "null" or "".
        let matched: Vec<_> = filter_by_search(&records, "null").collect();
        assert!(matched.is_empty());
    }

    #[test]
    fn test_search_iterator_is_restartable() {
        let records = applicants();
        let filtered = filter_by_search(&records, "universitas");
        assert_eq!(filtered.count(), 1);

        // Building the filter again over the same slice works just as well.
        assert_eq!(filter_by_search(&records, "universitas").count(), 1);
    }

    fn summary(status: &str, registration_count: Option<i64>) -> CompetitionSummary {
        CompetitionSummary {
            id: Uuid::new_v4(),
            name: "Summary".to_string(),
            category: "Other".to_string(),
            status: status.to_string(),
            registration_deadline: instant(2025, 3, 1),
            submission_deadline: instant(2025, 4, 1),
            registration_fee: Decimal::ZERO,
            prize_pool: None,
            created_at: instant(2025, 1, 1),
            registration_count,
        }
    }

    #[test]
    fn test_aggregate_counts_totals() {
        let rows = vec![summary("open", Some(2)), summary("closed", Some(1))];

        let totals = aggregate_counts(&rows);

        assert_eq!(totals.total_competitions, 2);
        assert_eq!(totals.active_competitions, 1);
        assert_eq!(totals.total_participants, 3);
    }

    #[test]
    fn test_aggregate_counts_treats_missing_count_as_zero() {
        let rows = vec![summary("open", None), summary("upcoming", Some(4))];

        let totals = aggregate_counts(&rows);

        assert_eq!(totals.total_competitions, 2);
        assert_eq!(totals.active_competitions, 1);
        assert_eq!(totals.total_participants, 4);
    }

    #[test]
    fn test_aggregate_counts_on_empty_input() {
        let totals = aggregate_counts(&[]);

        assert_eq!(totals.total_competitions, 0);
        assert_eq!(totals.active_competitions, 0);
        assert_eq!(totals.total_participants, 0);
    }

    fn registration_with_competition(
        auth: &AuthContext,
        competition_status: &str,
        submission_deadline: DateTime<Utc>,
    ) -> RegistrationWithCompetition {
        RegistrationWithCompetition {
            registration: registration_for(auth, Uuid::new_v4(), "registered"),
            competition_name: "Eco Challenge".to_string(),
            competition_category: "LKTI".to_string(),
            competition_status: competition_status.to_string(),
            submission_deadline,
        }
    }

    #[test]
    fn test_pending_submissions_selects_open_unsubmitted_in_time() {
        let auth = participant();
        let now = instant(2025, 3, 15);
        let future = instant(2025, 4, 1);
        let past = instant(2025, 3, 1);

        let rows = vec![
            registration_with_competition(&auth, "open", future),
            registration_with_competition(&auth, "closed", future),
            registration_with_competition(&auth, "open", past),
            registration_with_competition(&auth, "open", future),
        ];

        let mut submitted = HashSet::new();
        submitted.insert(rows[3].registration.id);

        let pending = pending_submissions(&rows, &submitted, now);

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].registration.id, rows[0].registration.id);
    }

    #[test]
    fn test_pending_submissions_ignores_registration_status() {
        let auth = participant();
        let now = instant(2025, 3, 15);
        let future = instant(2025, 4, 1);

        let mut row = registration_with_competition(&auth, "open", future);
        row.registration.status = "cancelled".to_string();

        let pending = pending_submissions(std::slice::from_ref(&row), &HashSet::new(), now);

        assert_eq!(pending.len(), 1);
    }
}
