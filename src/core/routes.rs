//! Static route classification, consulted before any auth check.

/// Paths reachable without a session
pub const PUBLIC_PREFIXES: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/auth/login",
    "/auth/register",
    "/api/auth",
    "/favicon.ico",
    "/_next",
    "/static",
    "/pkg",
];

/// Paths that require a session
pub const PROTECTED_PREFIXES: &[&str] = &[
    "/dashboard",
    "/dashboard-simple",
    "/documents",
    "/analyses",
    "/coaching",
    "/coaching-carriere",
    "/analyse-salariale",
    "/bulletin-paie",
    "/historique",
    "/test",
    "/test-auth",
    "/auth-test",
    "/auth-test-simple",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
    /// Matches neither list; allowed
    Unlisted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    public: Vec<String>,
    protected: Vec<String>,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new(PUBLIC_PREFIXES, PROTECTED_PREFIXES)
    }
}

impl RoutePolicy {
    pub fn new(public: &[&str], protected: &[&str]) -> Self {
        Self {
            public: public.iter().map(|p| p.to_string()).collect(),
            protected: protected.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Public prefixes win over protected ones.
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = path.split(['?', '#']).next().unwrap_or(path);

        if self.public.iter().any(|prefix| matches_prefix(path, prefix)) {
            RouteClass::Public
        } else if self.protected.iter().any(|prefix| matches_prefix(path, prefix)) {
            RouteClass::Protected
        } else {
            RouteClass::Unlisted
        }
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        self.classify(path) == RouteClass::Protected
    }
}

/// `path` is `prefix` itself or lives under `prefix/`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/') && !prefix.ends_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths() {
        let policy = RoutePolicy::default();

        assert_eq!(policy.classify("/dashboard"), RouteClass::Protected);
        assert_eq!(policy.classify("/dashboard/"), RouteClass::Protected);
        assert_eq!(policy.classify("/bulletin-paie/upload"), RouteClass::Protected);
        assert_eq!(policy.classify("/coaching-carriere"), RouteClass::Protected);
        assert!(policy.requires_auth("/historique?page=2"));
    }

    #[test]
    fn test_public_paths() {
        let policy = RoutePolicy::default();

        assert_eq!(policy.classify("/"), RouteClass::Public);
        assert_eq!(policy.classify("/auth/login"), RouteClass::Public);
        assert_eq!(policy.classify("/api/auth/me"), RouteClass::Public);
        assert_eq!(policy.classify("/pkg/paycoach.wasm"), RouteClass::Public);
        assert!(!policy.requires_auth("/auth/register"));
    }

    #[test]
    fn test_root_only_matches_exactly() {
        let policy = RoutePolicy::new(&["/"], &["/dashboard"]);

        assert_eq!(policy.classify("/"), RouteClass::Public);
        assert_eq!(policy.classify("/dashboard"), RouteClass::Protected);
        assert_eq!(policy.classify("/pricing"), RouteClass::Unlisted);
    }

    #[test]
    fn test_prefix_must_end_at_segment_boundary() {
        let policy = RoutePolicy::default();

        assert_eq!(policy.classify("/dashboards"), RouteClass::Unlisted);
        assert_eq!(policy.classify("/testimonials"), RouteClass::Unlisted);
        assert_eq!(policy.classify("/coaching-tips"), RouteClass::Unlisted);
    }

    #[test]
    fn test_public_wins_over_protected() {
        let policy = RoutePolicy::new(&["/dashboard/demo"], &["/dashboard"]);

        assert_eq!(policy.classify("/dashboard/demo"), RouteClass::Public);
        assert_eq!(policy.classify("/dashboard/reports"), RouteClass::Protected);
    }

    #[test]
    fn test_unlisted_paths_are_allowed() {
        let policy = RoutePolicy::default();

        assert_eq!(policy.classify("/about"), RouteClass::Unlisted);
        assert!(!policy.requires_auth("/about"));
    }
}
