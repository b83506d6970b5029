//! # Reminder API Module
//!
//! Reminder partitioning for the reminders view and the home screen.
//! Buckets are computed over the domain service mirror; completion
//! toggling itself lives on the service.

use crate::consts;
use crate::models::reminder::Reminder;
use chrono::{DateTime, Utc};

/// Disjoint partition of the reminder mirror for the reminders view.
#[derive(Debug, Default)]
pub struct ReminderBuckets {
    /// open and past due, soonest-overdue first
    pub overdue: Vec<Reminder>,
    /// open and due at/after now, soonest first
    pub upcoming: Vec<Reminder>,
    /// done, most recently completed first, capped for display
    pub completed: Vec<Reminder>,
}

/// Splits reminders into overdue/upcoming/completed buckets.
///
/// The completed bucket keeps only the
/// [consts::COMPLETED_REMINDERS_DISPLAY_LIMIT] most recent entries;
/// completions without a timestamp sort last.
pub fn bucket_reminders(reminders: &[Reminder], now: DateTime<Utc>) -> ReminderBuckets {
    let mut buckets = ReminderBuckets::default();

    for reminder in reminders {
        if reminder.completed {
            buckets.completed.push(reminder.clone());
        } else if reminder.due_date < now {
            buckets.overdue.push(reminder.clone());
        } else {
            buckets.upcoming.push(reminder.clone());
        }
    }

    buckets.overdue.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    buckets.upcoming.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    buckets
        .completed
        .sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    buckets
        .completed
        .truncate(consts::COMPLETED_REMINDERS_DISPLAY_LIMIT);

    buckets
}

/// Home-screen slice of the upcoming bucket.
pub fn upcoming_preview(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<Reminder> {
    let mut upcoming = bucket_reminders(reminders, now).upcoming;
    upcoming.truncate(consts::UPCOMING_PREVIEW_LIMIT);

    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
    }

    fn create_test_reminder(id: &str, due_date: DateTime<Utc>, completed: bool) -> Reminder {
        Reminder {
            id: id.to_string(),
            pet_id: "pet-1".to_string(),
            title: "Rabies booster".to_string(),
            due_date,
            completed,
            completed_at: completed.then_some(due_date),
            ..Default::default()
        }
    }

    #[test]
    fn test_buckets_partition_and_sort() {
        let reminders = vec![
            create_test_reminder("late-b", at(5), false),
            create_test_reminder("soon-b", at(20), false),
            create_test_reminder("late-a", at(1), false),
            create_test_reminder("done", at(3), true),
            create_test_reminder("soon-a", at(15), false),
        ];

        let buckets = bucket_reminders(&reminders, at(10));

        let ids = |bucket: &[Reminder]| {
            bucket.iter().map(|r| r.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&buckets.overdue), ["late-a", "late-b"]);
        assert_eq!(ids(&buckets.upcoming), ["soon-a", "soon-b"]);
        assert_eq!(ids(&buckets.completed), ["done"]);
    }

    #[test]
    fn test_due_right_now_counts_as_upcoming() {
        let reminders = vec![create_test_reminder("now", at(10), false)];

        let buckets = bucket_reminders(&reminders, at(10));

        assert!(buckets.overdue.is_empty());
        assert_eq!(buckets.upcoming.len(), 1);
    }

    #[test]
    fn test_completed_bucket_is_capped_and_most_recent_first() {
        let mut reminders: Vec<_> = (1..=12)
            .map(|day| create_test_reminder(&format!("done-{day}"), at(day), true))
            .collect();
        reminders.push(create_test_reminder("no-stamp", at(1), true));
        reminders.last_mut().unwrap().completed_at = None;

        let buckets = bucket_reminders(&reminders, at(20));

        assert_eq!(buckets.completed.len(), 10);
        assert_eq!(buckets.completed[0].id, "done-12");
        assert_eq!(buckets.completed[9].id, "done-3");
    }

    #[test]
    fn test_upcoming_preview_takes_first_three() {
        let reminders: Vec<_> = (11..=16)
            .map(|day| create_test_reminder(&format!("r-{day}"), at(day), false))
            .collect();

        let preview = upcoming_preview(&reminders, at(10));

        let ids: Vec<_> = preview.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["r-11", "r-12", "r-13"]);
    }
}
