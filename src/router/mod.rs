//! Path routing with the login guard applied.

use tracing::debug;

use crate::auth::AuthGate;

/// A page the shell can render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Account summary; needs a login
    Home,
    /// Sign-in prompt
    Login,
    /// Banking data fetched from the backend
    Test,
    /// App metadata JSON
    Metadata,
    /// Any other path
    NotFound(String),
}

impl View {
    /// Canonical path of the view
    pub fn path(&self) -> &str {
        match self {
            View::Home => "/",
            View::Login => "/login",
            View::Test => "/test",
            View::Metadata => "/metadata",
            View::NotFound(path) => path,
        }
    }
}

/// Drop query string, fragment, and trailing slashes.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Resolve `path` to the view that ends up on screen, following redirects.
///
/// `/logout` logs the user out as a side effect.
pub fn navigate(path: &str, auth: &mut AuthGate) -> View {
    let path = normalize(path);

    let view = match path {
        "/" | "/home" if auth.is_logged_in() => View::Home,
        "/" | "/home" => View::Login,
        "/login" if auth.is_logged_in() => View::Home,
        "/login" => View::Login,
        "/logout" => {
            auth.logout();
            View::Login
        }
        "/test" => View::Test,
        "/metadata" => View::Metadata,
        other => View::NotFound(other.to_string()),
    };

    debug!(requested = %path, resolved = %view.path(), "Route resolved");
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> AuthGate {
        let mut gate = AuthGate::new();
        gate.login("johndoe", "test123").unwrap();
        gate
    }

    #[test]
    fn test_home_requires_login() {
        let mut gate = AuthGate::new();
        assert_eq!(navigate("/", &mut gate), View::Login);
        assert_eq!(navigate("/", &mut logged_in()), View::Home);
    }

    #[test]
    fn test_login_redirects_when_logged_in() {
        assert_eq!(navigate("/login", &mut logged_in()), View::Home);
        assert_eq!(navigate("/login", &mut AuthGate::new()), View::Login);
    }

    #[test]
    fn test_logout_clears_session() {
        let mut gate = logged_in();
        assert_eq!(navigate("/logout", &mut gate), View::Login);
        assert!(!gate.is_logged_in());
    }

    #[test]
    fn test_public_views() {
        let mut gate = AuthGate::new();
        assert_eq!(navigate("/test", &mut gate), View::Test);
        assert_eq!(navigate("/metadata/", &mut gate), View::Metadata);
        assert_eq!(navigate("/test?debug=1", &mut gate), View::Test);
    }

    #[test]
    fn test_unknown_path() {
        let mut gate = AuthGate::new();
        assert_eq!(
            navigate("/nope/", &mut gate),
            View::NotFound("/nope".to_string())
        );
    }
}
