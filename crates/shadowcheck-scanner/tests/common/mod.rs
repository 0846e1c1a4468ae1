//! Scripted stand-ins for the structured API and the browser.
#![allow(dead_code)]

use async_trait::async_trait;
use shadowcheck_api::{ApiError, Lookup, PlatformApi, PostStub};
use shadowcheck_browser::{BrowserActions, BrowserError, BrowserSession, SessionLauncher};
use shadowcheck_core::{Handle, ProfileSummary};
use shadowcheck_scanner::{PlatformPages, ProbeContext, ProbeSettings, ProbeTiming, SearchFilter};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const POST: &str = r#"[data-testid="tweet"]"#;
pub const REPLY: &str = r#"[data-testid="reply"]"#;
pub const REPLY_LINK: &str = r#"[data-testid="tweet"] a[href^="/"][href*="/status/"]"#;
pub const SEARCH_BOX: &str = r#"input[data-testid="SearchBox_Search_Input"]"#;
pub const THREAD_URL: &str = "https://x.com/someone/status/1790000000000000001";

pub fn handle(raw: &str) -> Handle {
    Handle::parse(raw).expect("valid handle")
}

pub fn pages() -> PlatformPages {
    PlatformPages::new("https://x.com").expect("valid base")
}

pub fn settings() -> ProbeSettings {
    ProbeSettings {
        pages: pages(),
        timing: ProbeTiming {
            page_load: Duration::from_secs(1),
            wait: Duration::from_secs(1),
            suggestion_settle: Duration::ZERO,
        },
        renderer_available: true,
    }
}

pub fn context(api: Arc<FakeApi>, launcher: Arc<FakeLauncher>) -> ProbeContext {
    ProbeContext::new(api, launcher, settings())
}

// ============================================================================
// Structured API
// ============================================================================

/// What the fake returns for a profile lookup.
#[derive(Debug, Clone)]
pub enum ProfileReply {
    Found,
    NotFound,
    Upstream(u16),
}

pub struct FakeApi {
    profile: ProfileReply,
    search: Lookup<Vec<PostStub>>,
    exists: Lookup<bool>,
    pub profile_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub exists_calls: AtomicUsize,
}

impl FakeApi {
    /// A fully cooperative API: profile found, posts searchable, account resolves.
    pub fn healthy() -> Self {
        Self {
            profile: ProfileReply::Found,
            search: Lookup::Answered(vec![PostStub {
                id: "1790000000000000001".to_string(),
                text: "gm".to_string(),
            }]),
            exists: Lookup::Answered(true),
            profile_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            exists_calls: AtomicUsize::new(0),
        }
    }

    /// Both probe lookups report the API cannot answer.
    pub fn rate_limited() -> Self {
        Self::healthy()
            .with_search(Lookup::Unavailable("HTTP 429".to_string()))
            .with_exists(Lookup::Unavailable("HTTP 429".to_string()))
    }

    pub fn with_profile(mut self, reply: ProfileReply) -> Self {
        self.profile = reply;
        self
    }

    pub fn with_search(mut self, search: Lookup<Vec<PostStub>>) -> Self {
        self.search = search;
        self
    }

    pub fn with_exists(mut self, exists: Lookup<bool>) -> Self {
        self.exists = exists;
        self
    }
}

#[async_trait]
impl PlatformApi for FakeApi {
    async fn lookup_profile(&self, handle: &Handle) -> shadowcheck_api::Result<ProfileSummary> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        match self.profile {
            ProfileReply::Found => Ok(ProfileSummary::new(handle.as_str())
                .with_display_name(Some(format!("{} (display)", handle)))
                .with_followers(Some(1_000))
                .with_bio(Some("posting".to_string()))
                .with_avatar_url(None)),
            ProfileReply::NotFound => Err(ApiError::NotFound {
                handle: handle.to_string(),
            }),
            ProfileReply::Upstream(status) => Err(ApiError::Upstream { status }),
        }
    }

    async fn search_recent(&self, _handle: &Handle) -> Lookup<Vec<PostStub>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.search.clone()
    }

    async fn account_exists(&self, _handle: &Handle) -> Lookup<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.exists.clone()
    }
}

// ============================================================================
// Browser
// ============================================================================

/// One scripted page of the fake site.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    markers: HashSet<String>,
    attributes: HashMap<(String, String), String>,
    text: String,
    suggestions: Option<(String, String)>,
    stalls: bool,
    fails: bool,
    unreadable: bool,
}

impl FakePage {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, selector: &str) -> Self {
        self.markers.insert(selector.to_string());
        self
    }

    pub fn with_attribute(mut self, selector: &str, name: &str, value: &str) -> Self {
        self.markers.insert(selector.to_string());
        self.attributes
            .insert((selector.to_string(), name.to_string()), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Type-ahead text that renders only once exactly `query` has been
    /// typed into a focused element.
    pub fn with_suggestions(mut self, query: &str, text: &str) -> Self {
        self.suggestions = Some((query.to_string(), text.to_string()));
        self
    }

    /// The page loads but reading its text fails.
    pub fn with_unreadable_text(mut self) -> Self {
        self.unreadable = true;
        self
    }

    /// Navigation to this page never becomes ready.
    pub fn stalled() -> Self {
        Self {
            stalls: true,
            ..Self::default()
        }
    }

    /// Navigation to this page fails outright.
    pub fn broken() -> Self {
        Self {
            fails: true,
            ..Self::default()
        }
    }
}

/// URL-keyed pages. Anything not scripted renders blank.
#[derive(Debug, Clone, Default)]
pub struct FakeSite {
    pages: HashMap<String, FakePage>,
}

impl FakeSite {
    /// A site where the account looks entirely unrestricted.
    pub fn visible(handle: &Handle) -> Self {
        let pages = pages();
        Self::default()
            .with_page(pages.profile(handle), FakePage::blank().with_marker(POST))
            .with_page(
                pages.live_search(handle, SearchFilter::Posts),
                FakePage::blank().with_marker(POST),
            )
            .with_page(
                pages.explore(),
                FakePage::blank()
                    .with_marker(SEARCH_BOX)
                    .with_text("Explore")
                    .with_suggestions(
                        &handle.mention(),
                        &format!("{}\n{}", handle, handle.mention()),
                    ),
            )
            .with_page(
                pages.live_search(handle, SearchFilter::Replies),
                FakePage::blank()
                    .with_marker(POST)
                    .with_attribute(REPLY_LINK, "href", "/someone/status/1790000000000000001"),
            )
            .with_page(
                THREAD_URL.to_string(),
                FakePage::blank()
                    .with_marker(POST)
                    .with_marker(REPLY)
                    .with_text("Post\nReplying to @someone\nReply"),
            )
    }

    pub fn with_page(mut self, url: String, page: FakePage) -> Self {
        self.pages.insert(url, page);
        self
    }

    fn page(&self, url: &str) -> FakePage {
        self.pages.get(url).cloned().unwrap_or_default()
    }
}

/// What the fake launcher observed.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub visits: Mutex<Vec<String>>,
    pub typed: Mutex<Vec<String>>,
}

impl SessionStats {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn visited(&self, url: &str) -> bool {
        self.visits.lock().expect("visits lock").iter().any(|v| v == url)
    }

    /// Every string typed into any session, in order.
    pub fn typed(&self) -> Vec<String> {
        self.typed.lock().expect("typed lock").clone()
    }
}

pub struct FakeLauncher {
    site: Arc<FakeSite>,
    pub stats: Arc<SessionStats>,
    fail_launch: bool,
}

impl FakeLauncher {
    pub fn new(site: FakeSite) -> Self {
        Self {
            site: Arc::new(site),
            stats: Arc::new(SessionStats::default()),
            fail_launch: false,
        }
    }

    /// A launcher whose renderer cannot start.
    pub fn broken() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(FakeSite::default())
        }
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    async fn launch(&self) -> shadowcheck_browser::Result<Box<dyn BrowserSession>> {
        self.stats.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(BrowserError::LaunchError(
                "no Chrome executable found".to_string(),
            ));
        }
        Ok(Box::new(FakeSession {
            site: self.site.clone(),
            stats: self.stats.clone(),
            current: Mutex::new(FakePage::blank()),
            focused: Mutex::new(None),
            typed: Mutex::new(String::new()),
        }))
    }
}

pub struct FakeSession {
    site: Arc<FakeSite>,
    stats: Arc<SessionStats>,
    current: Mutex<FakePage>,
    focused: Mutex<Option<String>>,
    typed: Mutex<String>,
}

impl FakeSession {
    fn current(&self) -> FakePage {
        self.current.lock().expect("page lock").clone()
    }
}

#[async_trait]
impl BrowserActions for FakeSession {
    async fn navigate(&self, url: &str, _timeout: Duration) -> shadowcheck_browser::Result<()> {
        self.stats
            .visits
            .lock()
            .expect("visits lock")
            .push(url.to_string());

        let page = self.site.page(url);
        if page.fails {
            return Err(BrowserError::NavigationError(format!(
                "net::ERR_CONNECTION_RESET at {url}"
            )));
        }
        if page.stalls {
            return Err(BrowserError::Timeout(format!("loading {url}")));
        }
        *self.current.lock().expect("page lock") = page;
        *self.focused.lock().expect("focus lock") = None;
        self.typed.lock().expect("typed lock").clear();
        Ok(())
    }

    async fn element_exists(&self, selector: &str) -> shadowcheck_browser::Result<bool> {
        Ok(self.current().markers.contains(selector))
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> shadowcheck_browser::Result<()> {
        if self.current().markers.contains(selector) {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!("waiting for {selector}")))
        }
    }

    async fn attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> shadowcheck_browser::Result<Option<String>> {
        Ok(self
            .current()
            .attributes
            .get(&(selector.to_string(), name.to_string()))
            .cloned())
    }

    async fn body_text(&self) -> shadowcheck_browser::Result<String> {
        let page = self.current();
        if page.unreadable {
            return Err(BrowserError::ScriptError(
                "Execution context was destroyed".to_string(),
            ));
        }
        let typed = self.typed.lock().expect("typed lock").clone();
        match page.suggestions {
            Some((query, suggestions)) if query == typed => {
                Ok(format!("{}\n{}", page.text, suggestions))
            }
            _ => Ok(page.text),
        }
    }

    async fn click(&self, selector: &str) -> shadowcheck_browser::Result<()> {
        if !self.current().markers.contains(selector) {
            return Err(BrowserError::SelectorNotFound(selector.to_string()));
        }
        *self.focused.lock().expect("focus lock") = Some(selector.to_string());
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> shadowcheck_browser::Result<()> {
        if self.focused.lock().expect("focus lock").as_deref() != Some(selector) {
            return Err(BrowserError::ChromiumError(format!(
                "{selector} is not focused"
            )));
        }
        self.typed.lock().expect("typed lock").push_str(text);
        self.stats
            .typed
            .lock()
            .expect("typed lock")
            .push(text.to_string());
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn close(self: Box<Self>) -> shadowcheck_browser::Result<()> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
