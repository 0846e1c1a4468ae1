use rand::seq::SliceRandom;
use shadowcheck_core::BrowserConfig;

// Common desktop user agents
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

/// Client identity a session presents to the site
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

/// Pick one of the common desktop user agents
fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
}

impl FingerprintConfig {
    /// Identity for one session: the configured window size, and the
    /// configured user agent when set or a random realistic one otherwise.
    pub fn for_session(config: &BrowserConfig) -> Self {
        let user_agent = match &config.user_agent {
            Some(agent) => agent.clone(),
            None => random_user_agent().to_string(),
        };
        Self {
            user_agent,
            viewport_width: config.window_width,
            viewport_height: config.window_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_identity_uses_known_agent() {
        let fp = FingerprintConfig::for_session(&BrowserConfig::default());
        assert!(USER_AGENTS.contains(&fp.user_agent.as_str()));
        assert!(fp.viewport_width > 0);
        assert!(fp.viewport_height > 0);
    }

    #[test]
    fn test_user_agent_variation() {
        // Probabilistic, but twenty identical draws out of three agents is very unlikely
        let agents: Vec<_> = (0..20).map(|_| random_user_agent()).collect();
        assert!(
            agents.iter().any(|a| *a != agents[0]),
            "Expected variation in user agents"
        );
    }

    #[test]
    fn test_configured_user_agent_wins() {
        let config = BrowserConfig {
            user_agent: Some("Custom/1.0".to_string()),
            window_width: 1280,
            window_height: 720,
            ..BrowserConfig::default()
        };

        let fp = FingerprintConfig::for_session(&config);
        assert_eq!(fp.user_agent, "Custom/1.0");
        assert_eq!((fp.viewport_width, fp.viewport_height), (1280, 720));
    }
}
