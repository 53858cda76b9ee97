use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::Page;
use crate::error::Result;

/// Anything that can fetch a single page of a paginated listing by URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Page>;
}

/// Follow `meta.next_page_url` from `start_url` until it runs out, returning
/// every page's `data` records in page order.
///
/// Pages are fetched one at a time. The first failing page aborts the whole
/// listing; nothing collected so far is returned.
pub async fn collect_pages<S>(source: &S, start_url: &str) -> Result<Vec<Value>>
where
    S: PageSource + ?Sized,
{
    let mut records = Vec::new();
    let mut next = Some(start_url.to_string());
    let mut pages = 0usize;

    while let Some(url) = next.take() {
        let page = source.fetch_page(&url).await?;
        pages += 1;

        if let Some(meta) = &page.meta {
            debug!(
                "Fetched page {}/{} from {}",
                meta.current_page.map_or("?".to_string(), |p| p.to_string()),
                meta.last_page.map_or("?".to_string(), |p| p.to_string()),
                url
            );
        }

        next = page.next_page_url().map(str::to_string);

        match page.data {
            Some(data) => records.extend(data),
            None => warn!("Page {} from {} carried no data array", pages, url),
        }
    }

    debug!("Collected {} record(s) across {} page(s)", records.len(), pages);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpsetError;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages keyed by URL and records the order of requests.
    struct FakeSource {
        pages: HashMap<String, Value>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(pages: Vec<(&str, Value)>) -> Self {
            FakeSource {
                pages: pages
                    .into_iter()
                    .map(|(url, body)| (url.to_string(), body))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn fetch_page(&self, url: &str) -> Result<Page> {
            self.requested.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => Ok(serde_json::from_value(body.clone()).unwrap()),
                None => Err(UpsetError::Http {
                    url: url.to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".into(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_three_pages_concatenate_in_order() {
        let source = FakeSource::new(vec![
            ("p1", json!({ "data": [1, 2], "meta": { "next_page_url": "p2" } })),
            ("p2", json!({ "data": [3], "meta": { "next_page_url": "p3" } })),
            ("p3", json!({ "data": [4, 5], "meta": { "next_page_url": null } })),
        ]);

        let records = collect_pages(&source, "p1").await.unwrap();

        assert_eq!(records, vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
        assert_eq!(source.requested(), vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_missing_meta_ends_pagination() {
        let source = FakeSource::new(vec![("p1", json!({ "data": [1] }))]);

        let records = collect_pages(&source, "p1").await.unwrap();

        assert_eq!(records, vec![json!(1)]);
        assert_eq!(source.requested(), vec!["p1"]);
    }

    #[tokio::test]
    async fn test_empty_next_url_ends_pagination() {
        let source = FakeSource::new(vec![
            ("p1", json!({ "data": [1], "meta": { "next_page_url": "p2" } })),
            ("p2", json!({ "data": [2], "meta": { "next_page_url": "" } })),
        ]);

        let records = collect_pages(&source, "p1").await.unwrap();

        assert_eq!(records, vec![json!(1), json!(2)]);
        assert_eq!(source.requested(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_page_without_data_contributes_nothing() {
        let source = FakeSource::new(vec![
            ("p1", json!({ "meta": { "next_page_url": "p2" } })),
            ("p2", json!({ "data": ["a"] })),
        ]);

        let records = collect_pages(&source, "p1").await.unwrap();

        assert_eq!(records, vec![json!("a")]);
        assert_eq!(source.requested(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_failing_page_aborts_listing() {
        let source = FakeSource::new(vec![
            ("p1", json!({ "data": [1], "meta": { "next_page_url": "p2" } })),
            // p2 is missing, so the fake answers 500
        ]);

        let err = collect_pages(&source, "p1").await.unwrap_err();

        assert!(matches!(err, UpsetError::Http { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(source.requested(), vec!["p1", "p2"]);
    }
}
