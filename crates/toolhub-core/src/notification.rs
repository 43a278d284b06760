//! In-app notifications

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Unknown labels fall back to `Info`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Entries shown before the notifications table has any rows
pub fn welcome_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: "1".to_string(),
            title: "Welcome to GS AI Tools!".to_string(),
            message: "Start exploring our collection of AI tools.".to_string(),
            kind: NotificationKind::Info,
            is_read: false,
            created_at: now,
        },
        Notification {
            id: "2".to_string(),
            title: "New Tools Added".to_string(),
            message: "Check out the latest AI tools in our catalog.".to_string(),
            kind: NotificationKind::Success,
            is_read: false,
            created_at: now - Duration::hours(1),
        },
    ]
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

/// Returns whether a notification with `id` was found
pub fn mark_read(notifications: &mut [Notification], id: &str) -> bool {
    match notifications.iter_mut().find(|n| n.id == id) {
        Some(n) => {
            n.is_read = true;
            true
        }
        None => false,
    }
}

pub fn mark_all_read(notifications: &mut [Notification]) {
    notifications.iter_mut().for_each(|n| n.is_read = true);
}

/// Compact age label: `42m ago`, `5h ago`, `3d ago`, or the calendar date
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(created_at);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 60 {
        format!("{}m ago", minutes.max(0))
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        created_at.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn test_relative_age_buckets() {
        let now = at(12, 0);
        assert_eq!(relative_age(at(11, 18), now), "42m ago");
        assert_eq!(relative_age(at(7, 0), now), "5h ago");
        assert_eq!(relative_age(now - Duration::days(3), now), "3d ago");
        assert_eq!(relative_age(now - Duration::days(10), now), "2025-02-28");
    }

    #[test]
    fn test_future_timestamp_clamps_to_zero() {
        let now = at(12, 0);
        assert_eq!(relative_age(at(12, 5), now), "0m ago");
    }

    #[test]
    fn test_unknown_kind_is_info() {
        let n: Notification = serde_json::from_str(
            r#"{"id":"9","title":"t","message":"m","type":"promo","created_at":"2025-03-10T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Info);
        assert!(!n.is_read);
    }

    #[test]
    fn test_mark_read_and_all() {
        let mut list = welcome_notifications(at(12, 0));
        assert_eq!(unread_count(&list), 2);

        assert!(mark_read(&mut list, "2"));
        assert!(!mark_read(&mut list, "nope"));
        assert_eq!(unread_count(&list), 1);

        mark_all_read(&mut list);
        assert_eq!(unread_count(&list), 0);
    }
}
