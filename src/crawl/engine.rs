// src/crawl/engine.rs
// =============================================================================
// This module runs the crawl loop.
//
// How it works:
// 1. Put the seed URL in the frontier and mark it visited
// 2. Pop a URL, fetch it, derive its filename, record its text
// 3. Extract the page's links and normalize them against the seed's domain
// 4. Push every link we have never seen, marking it visited right away
// 5. Repeat until the frontier is empty
// 6. Clean up whitespace in every record (and write the CSV if asked)
//
// A URL is marked visited when it is PUSHED, not when it is popped. That
// way a page that is still waiting in the frontier can't be pushed again
// by another page that links to it.
//
// A failed fetch never stops the crawl: the error message becomes the
// page's text and we carry on with the next URL.
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - VecDeque: Works as a stack (pop_back) or a queue (pop_front)
// - Generics: crawl_with works with any Fetch implementation
// =============================================================================

use anyhow::{anyhow, Result};
use log::{debug, info, trace, warn};
use std::collections::{HashSet, VecDeque};
use url::Url;

use super::filename::derive_filename;
use super::links::{domain_links, netloc};
use super::{persist, CrawlOptions, CrawlOrder, PageRecord};
use crate::page::{extract_hrefs, extract_text, Fetch, HttpFetcher};

/// Text shown by client-side rendered apps when scripts don't run
pub const JS_PLACEHOLDER: &str = "You need to enable JavaScript to run this app.";

// The work list plus the set of every URL that was ever put on it
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<String>,
    visited: HashSet<String>,
    order: CrawlOrder,
}

impl Frontier {
    pub fn new(seed: &str, order: CrawlOrder) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            order,
        };
        frontier.push(seed.to_string());
        frontier
    }

    // Adds a URL unless it was seen before
    //
    // Returns: true if the URL was new and is now waiting to be crawled
    pub fn push(&mut self, url: String) -> bool {
        if !self.visited.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        match self.order {
            CrawlOrder::DepthFirst => self.queue.pop_back(),
            CrawlOrder::BreadthFirst => self.queue.pop_front(),
        }
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

// Crawls a website over HTTP starting from seed_url
//
// Parameters:
//   seed_url: where to start; its host[:port] bounds the crawl
//   options: persistence, shallow mode and pop order
//
// Returns: one PageRecord per crawled page, in the order they were crawled
//
// Errors only come from an invalid seed URL or, with persist enabled,
// from the filesystem. Network problems end up in the records instead.
pub async fn crawl(seed_url: &str, options: &CrawlOptions) -> Result<Vec<PageRecord>> {
    let fetcher = HttpFetcher::new()?;
    crawl_with(&fetcher, seed_url, options).await
}

// Same as crawl, but with a caller-supplied fetcher
pub async fn crawl_with<F: Fetch>(
    fetcher: &F,
    seed_url: &str,
    options: &CrawlOptions,
) -> Result<Vec<PageRecord>> {
    let local_domain = local_domain(seed_url)?;

    if options.persist {
        persist::create_dirs(&options.output_dir, &local_domain)?;
    }

    let mut frontier = Frontier::new(seed_url, options.order);
    let mut records = Vec::new();

    while let Some(url) = frontier.pop() {
        info!("{}", url);

        let filename = derive_filename(&local_domain, &url);

        let (text, hrefs) = match fetcher.fetch(&url).await {
            Ok(page) => {
                info!("{} {}", page.status, url);
                (extract_text(&page.body), extract_hrefs(&page.body))
            }
            Err(e) => {
                warn!("failed to fetch {}: {}", url, e);
                (e.to_string(), Vec::new())
            }
        };

        if text.contains(JS_PLACEHOLDER) {
            warn!("Unable to parse page {} due to JavaScript being required", url);
        }

        if options.persist {
            persist::write_page(&options.output_dir, &filename, &text)?;
        }

        records.push(PageRecord { filename, text });

        if options.shallow {
            continue;
        }

        let links = domain_links(&local_domain, &hrefs);
        debug!("{} same-domain link(s) on {}", links.len(), url);

        for link in links {
            if frontier.is_visited(&link) {
                continue;
            }
            trace!("queued {}", link);
            frontier.push(link);
        }
    }

    info!(
        "crawled {} page(s), {} url(s) seen",
        records.len(),
        frontier.visited_count()
    );

    for record in &mut records {
        record.text = remove_newlines(&record.text);
    }

    if options.persist {
        let path = persist::write_csv(&options.output_dir, &records)?;
        info!("wrote {}", path.display());
    }

    Ok(records)
}

// Finds the host[:port] of the seed URL
//
// The seed must be a valid absolute URL with a network location.
fn local_domain(seed_url: &str) -> Result<String> {
    Url::parse(seed_url).map_err(|e| anyhow!("Invalid URL '{}': {}", seed_url, e))?;

    match netloc(seed_url) {
        Some(domain) if !domain.is_empty() => Ok(domain.to_string()),
        _ => Err(anyhow!("URL has no domain: {}", seed_url)),
    }
}

// Turns newlines into spaces, then halves double spaces twice
//
// Two passes are not a full collapse: a run of 5 spaces ends up as 2.
pub fn remove_newlines(text: &str) -> String {
    text.replace('\n', " ").replace("  ", " ").replace("  ", " ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why mark URLs visited on push instead of on pop?
//    - Page A and page B can both link to page C
//    - If we only marked C when we crawled it, both A and B would queue it
//    - Marking on push means C is queued once, no matter how many links
//
// 2. What does `F: Fetch` mean?
//    - crawl_with accepts any type that implements the Fetch trait
//    - In the real program that's HttpFetcher
//    - In tests it's a fake that returns canned pages, no network needed
//
// 3. Why is the error turned into text?
//    - One broken page should not throw away everything else we crawled
//    - Keeping the message in the record shows what went wrong for that URL
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{FetchError, FetchedPage};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;
    use tempfile::TempDir;

    enum Canned {
        Page(u16, &'static str),
        Timeout,
    }

    // Serves pages from a map and remembers which URLs were requested
    struct FakeFetcher {
        pages: HashMap<&'static str, Canned>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn new(pages: Vec<(&'static str, Canned)>) -> Self {
            Self {
                pages: pages.into_iter().collect(),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            match self.pages.get(url) {
                Some(Canned::Page(status, body)) => Ok(FetchedPage {
                    status: *status,
                    body: body.to_string(),
                }),
                Some(Canned::Timeout) => Err(FetchError::Timeout(Duration::from_secs(10))),
                None => Err(FetchError::NotHtml("text/plain".to_string())),
            }
        }
    }

    fn site() -> FakeFetcher {
        FakeFetcher::new(vec![
            (
                "https://example.com",
                Canned::Page(
                    200,
                    r##"<h1>Home</h1>
                    <a href="/about">About</a>
                    <a href="https://other.com/x">Other</a>
                    <a href="#top">Top</a>"##,
                ),
            ),
            (
                "https://example.com/about",
                Canned::Page(200, r#"<p>About us</p><a href="/">Home</a><a href="team/">Team</a>"#),
            ),
            (
                "https://example.com/team",
                Canned::Page(200, r#"<p>Team</p><a href="/about">About</a>"#),
            ),
        ])
    }

    #[test]
    fn test_frontier_marks_on_push() {
        let mut frontier = Frontier::new("https://example.com", CrawlOrder::DepthFirst);
        assert!(frontier.is_visited("https://example.com"));

        assert!(frontier.push("https://example.com/a".to_string()));
        // Still pending, but a second push is refused
        assert!(!frontier.push("https://example.com/a".to_string()));
        assert!(!frontier.push("https://example.com".to_string()));

        assert_eq!(frontier.pop().as_deref(), Some("https://example.com/a"));
        assert_eq!(frontier.pop().as_deref(), Some("https://example.com"));
        assert_eq!(frontier.pop(), None);

        // Popping never forgets
        assert!(!frontier.push("https://example.com/a".to_string()));
        assert_eq!(frontier.visited_count(), 2);
    }

    #[test]
    fn test_frontier_pop_order() {
        let mut lifo = Frontier::new("s", CrawlOrder::DepthFirst);
        let mut fifo = Frontier::new("s", CrawlOrder::BreadthFirst);
        for url in ["a", "b"] {
            lifo.push(url.to_string());
            fifo.push(url.to_string());
        }
        assert_eq!(lifo.pop().as_deref(), Some("b"));
        assert_eq!(fifo.pop().as_deref(), Some("s"));
    }

    #[test]
    fn test_remove_newlines() {
        assert_eq!(remove_newlines("a\nb"), "a b");
        assert_eq!(remove_newlines("a\n\nb"), "a b");
        assert_eq!(remove_newlines("a   b"), "a b");
        assert_eq!(remove_newlines("a\n\n\n\nb"), "a b");
        assert_eq!(remove_newlines("a     b"), "a  b");
    }

    #[test]
    fn test_remove_newlines_stable_up_to_three_spaces() {
        for input in ["a b", "a  b", "a   b", "x\ny\n\nz  w"] {
            let once = remove_newlines(input);
            assert_eq!(remove_newlines(&once), once);
        }
        // Longer runs are only partly collapsed
        assert_eq!(remove_newlines("a        b"), "a  b");
    }

    #[test]
    fn test_local_domain() {
        assert_eq!(local_domain("https://example.com/start").unwrap(), "example.com");
        assert_eq!(local_domain("http://localhost:8080").unwrap(), "localhost:8080");
        assert!(local_domain("not a url").is_err());
        assert!(local_domain("/relative/path").is_err());
    }

    #[tokio::test]
    async fn test_seed_page_discovers_only_same_domain_links() {
        let fetcher = FakeFetcher::new(vec![(
            "https://example.com",
            Canned::Page(
                200,
                r##"<a href="/about">About</a><a href="https://other.com/x">x</a><a href="#top">Top</a>"##,
            ),
        )]);

        let records = crawl_with(&fetcher, "https://example.com", &CrawlOptions::default())
            .await
            .unwrap();

        let requested = fetcher.requested.borrow();
        assert_eq!(
            *requested,
            vec!["https://example.com".to_string(), "https://example.com/about".to_string()]
        );
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_crawls_every_page_once() {
        let fetcher = site();
        let records = crawl_with(&fetcher, "https://example.com", &CrawlOptions::default())
            .await
            .unwrap();

        let filenames: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(
            filenames,
            vec![
                "text/example.com/example.com.txt",
                "text/example.com/example.com_about.txt",
                "text/example.com/example.com_team.txt",
            ]
        );

        let requested = fetcher.requested.borrow();
        let unique: HashSet<&String> = requested.iter().collect();
        assert_eq!(unique.len(), requested.len());
        assert_eq!(records[1].text, "About usHomeTeam");
    }

    #[tokio::test]
    async fn test_breadth_first_visits_same_set() {
        let options = CrawlOptions {
            order: CrawlOrder::BreadthFirst,
            ..CrawlOptions::default()
        };
        let records = crawl_with(&site(), "https://example.com", &options)
            .await
            .unwrap();
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_timeout_becomes_page_text() {
        let fetcher = FakeFetcher::new(vec![
            (
                "https://example.com",
                Canned::Page(200, r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#),
            ),
            ("https://example.com/slow", Canned::Timeout),
            ("https://example.com/fast", Canned::Page(200, "<p>quick</p>")),
        ]);

        let records = crawl_with(&fetcher, "https://example.com", &CrawlOptions::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        let slow = records
            .iter()
            .find(|r| r.filename.ends_with("example.com_slow.txt"))
            .unwrap();
        assert_eq!(
            slow.text,
            FetchError::Timeout(Duration::from_secs(10)).to_string()
        );
        assert!(records.iter().any(|r| r.text == "quick"));
    }

    #[tokio::test]
    async fn test_shallow_stops_after_seed() {
        let fetcher = site();
        let options = CrawlOptions {
            shallow: true,
            ..CrawlOptions::default()
        };
        let records = crawl_with(&fetcher, "https://example.com", &options)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(fetcher.requested.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_text_is_normalized_after_crawl() {
        let fetcher = FakeFetcher::new(vec![(
            "https://example.com",
            Canned::Page(200, "<p>one</p>\n\n<p>two</p>"),
        )]);
        let records = crawl_with(&fetcher, "https://example.com", &CrawlOptions::default())
            .await
            .unwrap();
        assert_eq!(records[0].text, "one two");
    }

    #[tokio::test]
    async fn test_javascript_placeholder_survives_extraction() {
        let fetcher = FakeFetcher::new(vec![(
            "https://example.com",
            Canned::Page(
                200,
                r#"<html><head><script src="/app.js"></script></head>
                <body><noscript>You need to enable JavaScript to run this app.</noscript>
                <div id="root"></div></body></html>"#,
            ),
        )]);

        let records = crawl_with(&fetcher, "https://example.com", &CrawlOptions::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].text.contains(JS_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_invalid_seed_is_an_error() {
        let result = crawl_with(&site(), "example.com", &CrawlOptions::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_persist_writes_pages_and_csv() {
        let dir = TempDir::new().unwrap();
        let options = CrawlOptions {
            persist: true,
            output_dir: dir.path().to_path_buf(),
            ..CrawlOptions::default()
        };

        let records = crawl_with(&site(), "https://example.com", &options)
            .await
            .unwrap();

        for record in &records {
            assert!(dir.path().join(&record.filename).is_file());
        }

        // Page files keep the raw text, newlines included
        let home = std::fs::read_to_string(dir.path().join("text/example.com/example.com.txt")).unwrap();
        assert!(home.contains('\n'));

        let csv = std::fs::read_to_string(dir.path().join("processed/scraped.csv")).unwrap();
        assert!(csv.starts_with(",fname,text"));
        assert_eq!(csv.lines().count(), records.len() + 1);
    }
}
