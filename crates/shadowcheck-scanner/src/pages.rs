//! Public web UI locations and structural markers the probes rely on.

use shadowcheck_browser::actions::resolve_link;
use shadowcheck_core::Handle;
use url::Url;

/// A rendered post.
pub const POST_MARKER: &str = r#"[data-testid="tweet"]"#;

/// The reply control rendered under a post inside a thread.
pub const REPLY_MARKER: &str = r#"[data-testid="reply"]"#;

/// Permalink to a post, relative to the site root.
pub const REPLY_LINK: &str = r#"[data-testid="tweet"] a[href^="/"][href*="/status/"]"#;

/// The search input on the explore surface.
pub const SEARCH_BOX: &str = r#"input[data-testid="SearchBox_Search_Input"]"#;

/// Text of the control that collapses low-ranked replies.
pub const COLLAPSED_REPLIES_TEXT: &str = "Show more replies";

/// Which live search a probe runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    /// Every recent post by the account
    Posts,
    /// Only the account's replies
    Replies,
}

impl SearchFilter {
    fn query(self, handle: &Handle) -> String {
        match self {
            Self::Posts => format!("from:{}", handle.mention()),
            Self::Replies => format!("from:{} filter:replies", handle.mention()),
        }
    }
}

/// URL builder for the platform's public web UI.
#[derive(Debug, Clone)]
pub struct PlatformPages {
    base: Url,
}

impl PlatformPages {
    pub fn new(web_base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(web_base_url)?,
        })
    }

    pub fn profile(&self, handle: &Handle) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(handle.as_str());
        }
        url.into()
    }

    /// Newest-first search, the way a signed-out visitor would type it.
    pub fn live_search(&self, handle: &Handle, filter: SearchFilter) -> String {
        let mut url = self.page("search");
        url.query_pairs_mut()
            .append_pair("q", &filter.query(handle))
            .append_pair("src", "typed_query")
            .append_pair("f", "live");
        url.into()
    }

    pub fn explore(&self) -> String {
        self.page("explore").into()
    }

    /// Absolute URL for a link scraped off a page.
    pub fn resolve(&self, href: &str) -> shadowcheck_browser::Result<String> {
        resolve_link(self.base.as_str(), href)
    }

    fn page(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> PlatformPages {
        PlatformPages::new("https://x.com").expect("valid base")
    }

    fn handle(raw: &str) -> Handle {
        Handle::parse(raw).expect("valid handle")
    }

    #[test]
    fn test_profile_url() {
        assert_eq!(pages().profile(&handle("@jack")), "https://x.com/jack");
    }

    #[test]
    fn test_live_search_url() {
        let url = pages().live_search(&handle("jack"), SearchFilter::Posts);
        assert_eq!(
            url,
            "https://x.com/search?q=from%3A%40jack&src=typed_query&f=live"
        );
    }

    #[test]
    fn test_reply_search_url() {
        let url = pages().live_search(&handle("jack"), SearchFilter::Replies);
        let parsed = Url::parse(&url).expect("valid url");
        let query = parsed
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned());
        assert_eq!(query.as_deref(), Some("from:@jack filter:replies"));
    }

    #[test]
    fn test_explore_and_base_with_path() {
        assert_eq!(pages().explore(), "https://x.com/explore");

        let nested = PlatformPages::new("http://127.0.0.1:4000/mirror/").expect("valid base");
        assert_eq!(nested.explore(), "http://127.0.0.1:4000/mirror/explore");
    }

    #[test]
    fn test_resolve_relative_permalink() {
        assert_eq!(
            pages().resolve("/jack/status/20").expect("resolve"),
            "https://x.com/jack/status/20"
        );
    }
}
