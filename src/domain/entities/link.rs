//! Link entity representing a short code mapped to a target URL.

use chrono::{DateTime, Utc};

/// A short link with its click metadata.
///
/// `code`, `target_url` and `created_at` never change after creation.
/// `total_clicks` and `last_clicked_at` are only touched by the redirect path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a freshly allocated link: zero clicks, never visited.
    pub fn new(id: i64, code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            target_url,
            total_clicks: 0,
            last_clicked_at: None,
            created_at,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }

    /// Records one visit at `at`.
    ///
    /// The timestamp is clamped so that it never precedes `created_at`.
    pub fn record_click(&mut self, at: DateTime<Utc>) {
        self.total_clicks += 1;
        self.last_clicked_at = Some(at.max(self.created_at));
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc1234".to_string(),
            "https://example.com".to_string(),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc1234");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.total_clicks, 0);
        assert!(link.last_clicked_at.is_none());
        assert_eq!(link.created_at, now);
        assert!(!link.was_clicked());
    }

    #[test]
    fn test_record_click_increments_and_stamps() {
        let created = Utc::now();
        let mut link = Link::new(1, "mycode1".to_string(), "https://a.io".to_string(), created);

        let at = created + Duration::seconds(5);
        link.record_click(at);
        link.record_click(at + Duration::seconds(1));

        assert_eq!(link.total_clicks, 2);
        assert_eq!(link.last_clicked_at, Some(at + Duration::seconds(1)));
        assert!(link.was_clicked());
    }

    #[test]
    fn test_record_click_never_precedes_creation() {
        let created = Utc::now();
        let mut link = Link::new(1, "mycode1".to_string(), "https://a.io".to_string(), created);

        link.record_click(created - Duration::seconds(30));

        assert_eq!(link.last_clicked_at, Some(created));
    }
}
