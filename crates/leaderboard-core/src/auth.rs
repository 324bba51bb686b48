// Authentication gate: cookie/session validity state machine.
//
// Checking --valid--> Valid          (unlocks a refresh cycle)
// Checking --other--> Invalid        (surfaces the cookie uploader)
// Checking --fail---> Error          (same handling as Invalid)
//
// A successful cookie upload re-enters Checking. There is no automatic retry.

use tracing::{debug, info, warn};

use crate::api::{ApiError, LeaderboardApi};
use crate::model::{CookieStatus, COOKIE_STATUS_ERROR};

/// Current validity of the backend's session cookies.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Checking,
    Valid {
        message: Option<String>,
    },
    /// The backend answered with a status other than `valid`
    /// (`missing`, `invalid`, ...).
    Invalid {
        status: String,
        message: Option<String>,
    },
    /// The status endpoint could not be reached or answered garbage.
    Error {
        message: String,
    },
}

impl AuthState {
    pub fn is_valid(&self) -> bool {
        matches!(self, AuthState::Valid { .. })
    }

    /// Invalid and Error both require re-authentication.
    pub fn needs_cookies(&self) -> bool {
        matches!(self, AuthState::Invalid { .. } | AuthState::Error { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            AuthState::Checking => None,
            AuthState::Valid { message } | AuthState::Invalid { message, .. } => {
                message.as_deref()
            }
            AuthState::Error { message } => Some(message),
        }
    }
}

/// What the orchestrator must do after a status check resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransition {
    /// Checking -> Valid: start exactly one refresh cycle.
    Unlocked,
    /// Checking -> Invalid/Error: show the cookie uploader.
    NeedsCookies,
    /// The gate was not checking; the result is dropped.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    state: AuthState,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn begin_check(&mut self) {
        self.state = AuthState::Checking;
    }

    /// Apply the result of a status query.
    pub fn resolve(&mut self, result: Result<CookieStatus, ApiError>) -> AuthTransition {
        if self.state != AuthState::Checking {
            debug!("Ignoring cookie status result; gate is {:?}", self.state);
            return AuthTransition::Ignored;
        }

        let status = match result {
            Ok(status) => status,
            Err(e) => {
                warn!("Failed to check cookie status: {}", e);
                CookieStatus::unreachable()
            }
        };

        if status.is_valid() {
            info!("Cookies valid: {}", status.message.as_deref().unwrap_or("-"));
            self.state = AuthState::Valid {
                message: status.message,
            };
            return AuthTransition::Unlocked;
        }

        if status.status == COOKIE_STATUS_ERROR {
            self.state = AuthState::Error {
                message: status
                    .message
                    .unwrap_or_else(|| "Cookie status check failed".to_string()),
            };
        } else {
            info!("Cookies not usable (status={})", status.status);
            self.state = AuthState::Invalid {
                status: status.status,
                message: status.message,
            };
        }
        AuthTransition::NeedsCookies
    }
}

/// Query the backend for cookie validity.
pub async fn check_status(api: &dyn LeaderboardApi) -> Result<CookieStatus, ApiError> {
    api.cookie_status().await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn status(s: &str, msg: Option<&str>) -> CookieStatus {
        CookieStatus {
            status: s.to_string(),
            message: msg.map(str::to_string),
            cookie_count: None,
        }
    }

    #[test]
    fn starts_checking() {
        let gate = AuthGate::new();
        assert_eq!(gate.state(), &AuthState::Checking);
        assert!(!gate.state().is_valid());
        assert!(!gate.state().needs_cookies());
    }

    #[test]
    fn valid_status_unlocks() {
        let mut gate = AuthGate::new();
        let t = gate.resolve(Ok(status("valid", Some("Found 12 cookies"))));
        assert_eq!(t, AuthTransition::Unlocked);
        assert!(gate.state().is_valid());
        assert_eq!(gate.state().message(), Some("Found 12 cookies"));
    }

    #[test]
    fn other_status_needs_cookies() {
        let mut gate = AuthGate::new();
        let t = gate.resolve(Ok(status("missing", Some("No cookies.json found"))));
        assert_eq!(t, AuthTransition::NeedsCookies);
        assert_eq!(
            gate.state(),
            &AuthState::Invalid {
                status: "missing".into(),
                message: Some("No cookies.json found".into())
            }
        );
        assert!(gate.state().needs_cookies());
    }

    #[test]
    fn backend_error_status_maps_to_error_state() {
        let mut gate = AuthGate::new();
        let t = gate.resolve(Ok(status("error", Some("boom"))));
        assert_eq!(t, AuthTransition::NeedsCookies);
        assert_eq!(gate.state(), &AuthState::Error { message: "boom".into() });
    }

    #[test]
    fn request_failure_synthesizes_error() {
        let mut gate = AuthGate::new();
        let t = gate.resolve(Err(ApiError::Status { status: 502 }));
        assert_eq!(t, AuthTransition::NeedsCookies);
        assert_eq!(
            gate.state(),
            &AuthState::Error {
                message: "Cannot connect to backend".into()
            }
        );
    }

    #[test]
    fn result_outside_checking_is_ignored() {
        let mut gate = AuthGate::new();
        gate.resolve(Ok(status("valid", None)));
        let t = gate.resolve(Ok(status("missing", None)));
        assert_eq!(t, AuthTransition::Ignored);
        assert!(gate.state().is_valid());
    }

    #[test]
    fn recheck_after_valid_unlocks_again() {
        let mut gate = AuthGate::new();
        assert_eq!(gate.resolve(Ok(status("valid", None))), AuthTransition::Unlocked);
        gate.begin_check();
        assert_eq!(gate.state(), &AuthState::Checking);
        assert_eq!(gate.resolve(Ok(status("valid", None))), AuthTransition::Unlocked);
    }

    #[test]
    fn recheck_after_invalid_can_unlock() {
        let mut gate = AuthGate::new();
        gate.resolve(Ok(status("invalid", None)));
        gate.begin_check();
        assert_eq!(gate.resolve(Ok(status("valid", None))), AuthTransition::Unlocked);
    }
}
