use chrono::NaiveDateTime;

use super::theme::Tone;

/// Rows per page in the activity table
pub const ACTIVITY_PAGE_SIZE: usize = 5;

/// Display format for activity timestamps
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Login,
    Update,
    Create,
    Delete,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Login => "login",
            ActivityType::Update => "update",
            ActivityType::Create => "create",
            ActivityType::Delete => "delete",
        }
    }

    /// Chip colour for the type column
    pub fn tone(&self) -> Tone {
        match self {
            ActivityType::Create => Tone::Success,
            ActivityType::Update => Tone::Info,
            ActivityType::Delete => Tone::Error,
            ActivityType::Login => Tone::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: u32,
    pub user: String,
    pub action: String,
    pub kind: ActivityType,
    pub timestamp: NaiveDateTime,
}

impl Activity {
    fn parse(id: u32, user: &str, action: &str, kind: ActivityType, timestamp: &str) -> Option<Self> {
        Some(Self {
            id,
            user: user.to_string(),
            action: action.to_string(),
            kind,
            timestamp: NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?,
        })
    }

    pub fn timestamp_display(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

pub fn recent_activity() -> Vec<Activity> {
    [
        (1, "John Doe", "Updated profile", ActivityType::Update, "2024-01-26 14:30"),
        (2, "Jane Smith", "Created new project", ActivityType::Create, "2024-01-26 13:45"),
        (3, "Mike Johnson", "Logged in", ActivityType::Login, "2024-01-26 13:15"),
        (4, "Sarah Wilson", "Deleted task", ActivityType::Delete, "2024-01-26 12:30"),
    ]
    .into_iter()
    .filter_map(|(id, user, action, kind, ts)| Activity::parse(id, user, action, kind, ts))
    .collect()
}

/// Number of pages needed for `len` rows; an empty table still has one page
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Rows on `page` (zero-based). Out-of-range pages are empty.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_activity() {
        let rows = recent_activity();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].user, "John Doe");
        assert_eq!(rows[0].timestamp_display(), "2024-01-26 14:30");
        assert_eq!(rows[3].kind, ActivityType::Delete);
        // Newest first
        assert!(rows.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn test_activity_tones() {
        assert_eq!(ActivityType::Create.tone(), Tone::Success);
        assert_eq!(ActivityType::Update.tone(), Tone::Info);
        assert_eq!(ActivityType::Delete.tone(), Tone::Error);
        assert_eq!(ActivityType::Login.tone(), Tone::Default);
        assert_eq!(ActivityType::Login.as_str(), "login");
    }

    #[test]
    fn test_pagination() {
        let rows: Vec<u32> = (0..12).collect();
        assert_eq!(page_count(rows.len(), 5), 3);
        assert_eq!(page_slice(&rows, 0, 5), &[0, 1, 2, 3, 4]);
        assert_eq!(page_slice(&rows, 2, 5), &[10, 11]);
        assert!(page_slice(&rows, 3, 5).is_empty());

        assert_eq!(page_count(0, 5), 1);
        assert_eq!(page_count(4, ACTIVITY_PAGE_SIZE), 1);
        assert_eq!(page_count(10, 0), 1);
    }
}
