use chrono::{DateTime, Utc};
use uuid::Uuid;

use pagewise_domain::book::BookStatus;
use pagewise_domain::pagination::Sort;
use pagewise_domain::user::UserRole;

/// A school (tenant).
#[derive(Debug, Clone)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    pub created_at: DateTime<Utc>,
}

/// Platform user. Platform admins carry no tenant.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub role: UserRole,
    /// Opaque client-owned profile document.
    pub profile: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Class {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub grade_level: i32,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A class together with the number of student profiles placed in it.
#[derive(Debug, Clone)]
pub struct ClassWithCount {
    pub class: Class,
    pub student_count: u64,
}

/// Partial update of a class. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ClassChanges {
    pub name: Option<String>,
    pub grade_level: Option<i32>,
    pub teacher_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct StudentProfile {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub class_id: Option<Uuid>,
    pub parent_user_id: Option<Uuid>,
    pub total_books_read: i32,
    pub total_reading_time_seconds: i64,
    pub created_at: DateTime<Utc>,
}

/// Shared catalog book.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub language: String,
    pub description: Option<String>,
    pub status: BookStatus,
    pub page_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BookPage {
    pub id: Uuid,
    pub book_id: Uuid,
    pub page_number: i32,
    pub narration_text: Option<String>,
    pub narration_audio_url: Option<String>,
    pub asset_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A book with its pages ordered by page number.
#[derive(Debug, Clone)]
pub struct BookWithPages {
    pub book: Book,
    pub pages: Vec<BookPage>,
}

#[derive(Debug, Clone)]
pub struct BookAssignment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub book_id: Uuid,
    pub class_id: Option<Uuid>,
    pub student_user_id: Option<Uuid>,
    pub assigned_by_user_id: Uuid,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ── Reading progress ─────────────────────────────────────────────────────────

/// One client-reported progress event.
///
/// Position fields are a snapshot; `reading_time_seconds` and
/// `interaction_count` are deltas since the previous event.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub book_id: Uuid,
    pub current_page: i32,
    pub total_pages: i32,
    pub reading_time_seconds: i64,
    pub interaction_count: i64,
    pub is_completed: bool,
}

/// Largest reading-time delta one event may carry (a full day).
pub const MAX_READING_TIME_DELTA_SECONDS: i64 = 86_400;
/// Largest interaction delta one event may carry.
pub const MAX_INTERACTION_DELTA: i64 = 100_000;

impl ProgressEvent {
    pub fn is_valid(&self) -> bool {
        self.current_page >= 0
            && self.total_pages >= 0
            && (0..=MAX_READING_TIME_DELTA_SECONDS).contains(&self.reading_time_seconds)
            && (0..=MAX_INTERACTION_DELTA).contains(&self.interaction_count)
    }
}

/// The single authoritative progress record of a (user, book) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingProgress {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub current_page: i32,
    pub total_pages: i32,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub reading_time_seconds: i64,
    pub interaction_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReadingProgress {
    /// Record created by the first event of a (user, book) pair.
    pub fn start(tenant_id: Uuid, user_id: Uuid, event: &ProgressEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            book_id: event.book_id,
            current_page: event.current_page,
            total_pages: event.total_pages,
            is_completed: event.is_completed,
            completed_at: event.is_completed.then_some(now),
            reading_time_seconds: event.reading_time_seconds,
            interaction_count: event.interaction_count,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a later event into the record.
    ///
    /// Position is overwritten, counters accumulate, completion never reverts
    /// and `completed_at` is set only on the first transition to completed.
    pub fn apply(&mut self, event: &ProgressEvent, now: DateTime<Utc>) {
        self.current_page = event.current_page;
        self.total_pages = event.total_pages;
        self.reading_time_seconds = self
            .reading_time_seconds
            .saturating_add(event.reading_time_seconds);
        self.interaction_count = self
            .interaction_count
            .saturating_add(event.interaction_count);
        if event.is_completed && !self.is_completed {
            self.is_completed = true;
            self.completed_at = Some(now);
        }
        self.updated_at = now;
    }
}

/// A progress record joined with its book title for listings.
#[derive(Debug, Clone)]
pub struct ProgressView {
    pub progress: ReadingProgress,
    pub book_title: Option<String>,
}

/// Aggregate counters derived from a user's progress rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTotals {
    pub completed: u64,
    pub in_progress: u64,
    pub reading_time_seconds: i64,
    pub interaction_count: i64,
}

impl ProgressTotals {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ReadingProgress>) -> Self {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            if row.is_completed {
                acc.completed += 1;
            } else {
                acc.in_progress += 1;
            }
            acc.reading_time_seconds = acc
                .reading_time_seconds
                .saturating_add(row.reading_time_seconds);
            acc.interaction_count = acc.interaction_count.saturating_add(row.interaction_count);
            acc
        })
    }

    pub fn total(&self) -> u64 {
        self.completed + self.in_progress
    }

    /// Completed share in percent; 0 when there are no rows.
    pub fn completion_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed as f64 / total as f64 * 100.0,
        }
    }
}

/// Analytics over a set of progress rows.
#[derive(Debug, Clone)]
pub struct ProgressSummary {
    pub totals: ProgressTotals,
    pub recent: Vec<ProgressView>,
}

pub const RECENT_ACTIVITY_LIMIT: u64 = 10;

/// Sort options for progress list queries.
#[derive(Debug, Clone, Copy)]
pub enum ProgressSortBy {
    CreatedAt(Sort),
    UpdatedAt(Sort),
}

impl Default for ProgressSortBy {
    fn default() -> Self {
        Self::UpdatedAt(Sort::Desc)
    }
}

impl ProgressSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            "updated-at-desc" => Some(Self::UpdatedAt(Sort::Desc)),
            "updated-at-asc" => Some(Self::UpdatedAt(Sort::Asc)),
            _ => None,
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Subdomain derived from a school name: trimmed, lowercased, runs of
/// whitespace replaced by a single `-`.
pub fn subdomain_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Subdomain label: 1-63 chars of `[a-z0-9-]`, not starting or ending with `-`.
pub fn validate_subdomain(subdomain: &str) -> bool {
    !subdomain.is_empty()
        && subdomain.len() <= 63
        && !subdomain.starts_with('-')
        && !subdomain.ends_with('-')
        && subdomain
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Emails are compared trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal email shape check: one `@`, non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
