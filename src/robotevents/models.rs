use serde::Deserialize;
use serde_json::Value;

/// One page of a paginated RobotEvents listing.
///
/// Records are kept as raw JSON here; each normaliser decodes them into its
/// own typed shape so that a bad record only fails the stage that needs it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    pub data: Option<Vec<Value>>,
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    /// Absolute URL of the next page; absent, `null` or empty on the last page.
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
}

impl Page {
    pub fn next_page_url(&self) -> Option<&str> {
        self.meta
            .as_ref()?
            .next_page_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

/// Only the field needed to decide whether a match record is kept.
#[derive(Debug, Deserialize)]
pub struct RoundProbe {
    pub round: i64,
}

#[derive(Debug, Deserialize)]
pub struct RawMatch {
    pub matchnum: u32,
    /// Index 0 is blue, index 1 is red.
    pub alliances: Vec<RawAlliance>,
}

#[derive(Debug, Deserialize)]
pub struct RawAlliance {
    pub score: i32,
    pub teams: Vec<RawAllianceTeam>,
}

#[derive(Debug, Deserialize)]
pub struct RawAllianceTeam {
    pub team: TeamRef,
}

#[derive(Debug, Deserialize)]
pub struct TeamRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawRanking {
    pub team: TeamRef,
    pub rank: u32,
}

/// An entry of the `/events?sku=` search result.
#[derive(Debug, Deserialize)]
pub struct EventSummary {
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_without_meta_has_no_next() {
        let page: Page = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(page.next_page_url().is_none());
    }

    #[test]
    fn test_page_with_null_next_has_no_next() {
        let page: Page = serde_json::from_value(json!({
            "data": [1, 2],
            "meta": { "next_page_url": null, "current_page": 2, "last_page": 2 }
        }))
        .unwrap();
        assert!(page.next_page_url().is_none());
        assert_eq!(page.data.unwrap().len(), 2);
    }

    #[test]
    fn test_page_with_empty_next_has_no_next() {
        let page: Page = serde_json::from_value(json!({
            "data": [1],
            "meta": { "next_page_url": "" }
        }))
        .unwrap();
        assert!(page.next_page_url().is_none());
    }

    #[test]
    fn test_page_with_next_url() {
        let page: Page = serde_json::from_value(json!({
            "meta": { "next_page_url": "https://example.com/x?page=2" }
        }))
        .unwrap();
        assert!(page.data.is_none());
        assert_eq!(page.next_page_url(), Some("https://example.com/x?page=2"));
    }
}
