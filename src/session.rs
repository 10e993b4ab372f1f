//! Per-viewer login state.

use tracing::{info, warn};

use crate::config::Secrets;

/// Login state of one viewer.
///
/// Authenticated viewers see the private grade sheet; everybody else gets
/// the demo sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Checks `password` against the configured one and updates the session.
    /// A failed attempt logs the viewer out. Without a configured password
    /// every attempt fails.
    pub fn login(&mut self, password: &str, secrets: &Secrets) -> bool {
        self.authenticated = secrets.password.as_deref() == Some(password);
        if self.authenticated {
            info!("Login successful");
        } else {
            warn!("Incorrect password");
        }
        self.authenticated
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn title(&self) -> &'static str {
        if self.authenticated {
            "CLA Programming Grades"
        } else {
            "[Demo] CLA Programming Grades"
        }
    }

    /// Sheet this session reads from.
    pub fn sheet_url<'a>(&self, secrets: &'a Secrets) -> Option<&'a str> {
        if self.authenticated {
            secrets.private_sheet_url.as_deref()
        } else {
            secrets.demo_sheet_url.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets() -> Secrets {
        Secrets {
            password: Some("pw".into()),
            private_sheet_url: Some("private.csv".into()),
            demo_sheet_url: Some("demo.csv".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_anonymous_session_reads_demo_sheet() {
        let session = Session::anonymous();

        assert!(!session.is_authenticated());
        assert_eq!(session.title(), "[Demo] CLA Programming Grades");
        assert_eq!(session.sheet_url(&secrets()), Some("demo.csv"));
    }

    #[test]
    fn test_login_with_correct_password() {
        let mut session = Session::anonymous();

        assert!(session.login("pw", &secrets()));
        assert_eq!(session.title(), "CLA Programming Grades");
        assert_eq!(session.sheet_url(&secrets()), Some("private.csv"));
    }

    #[test]
    fn test_failed_login_logs_out() {
        let mut session = Session::anonymous();
        session.login("pw", &secrets());

        assert!(!session.login("wrong", &secrets()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_without_configured_password_fails() {
        let mut session = Session::anonymous();
        assert!(!session.login("", &Secrets::default()));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Session::anonymous();
        let b = Session::anonymous();
        a.login("pw", &secrets());

        assert!(a.is_authenticated());
        assert!(!b.is_authenticated());
    }
}
