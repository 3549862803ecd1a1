use std::time::Duration;

use argon2::{password_hash::PasswordVerifier, Argon2, PasswordHash};
use subtle::ConstantTimeEq;
use tracing::{error, info, instrument, warn};

use super::errors::AuthError;

/// Value stored in the session cookie. Only its presence is checked.
pub const SESSION_MARKER: &str = "authenticated";

/// The one administrator credential, supplied at deployment time.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// How the session marker is carried by the transport.
#[derive(Clone, Debug)]
pub struct SessionPolicy {
    pub cookie_name: String,
    pub ttl: Duration,
    pub secure: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            cookie_name: "admin_token".into(),
            ttl: Duration::from_secs(60 * 60 * 24),
            secure: false,
        }
    }
}

/// Decides whether a caller may mutate the catalog.
///
/// There is no user registry: `authenticate` compares against the single
/// configured pair, and `is_authenticated` trusts any non-empty marker. Expiry
/// is left to the client honouring the cookie's max-age.
#[derive(Debug)]
pub struct SessionGate {
    credentials: AdminCredentials,
    policy: SessionPolicy,
}

impl SessionGate {
    /// Build a gate, rejecting a password hash that is not a PHC string.
    pub fn new(credentials: AdminCredentials, policy: SessionPolicy) -> Result<Self, AuthError> {
        PasswordHash::new(&credentials.password_hash).map_err(|e| AuthError::InvalidHash(e.to_string()))?;
        Ok(Self { credentials, policy })
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Check a login attempt. The password is always verified, even when the
    /// username is wrong, so both mismatches cost the same.
    #[instrument(skip_all)]
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let user_ok: bool = username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes())
            .into();

        let parsed = match PasswordHash::new(&self.credentials.password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(error = %e, "configured password hash no longer parses");
                return false;
            }
        };
        let pass_ok = Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok();

        let ok = user_ok & pass_ok;
        if ok {
            info!("admin_login_succeeded");
        } else {
            warn!("admin_login_rejected");
        }
        ok
    }

    /// Whether the caller presented a session marker.
    pub fn is_authenticated(&self, marker: Option<&str>) -> bool {
        marker.map_or(false, |m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use argon2::Params;

    use super::*;
    use crate::auth::hash_password_with;

    fn cheap_params() -> anyhow::Result<Params> {
        Params::new(1024, 1, 1, None).map_err(|e| anyhow::anyhow!(e.to_string()))
    }

    fn gate() -> anyhow::Result<SessionGate> {
        let password_hash = hash_password_with("s3cret-pass", cheap_params()?)?;
        Ok(SessionGate::new(
            AdminCredentials { username: "admin".into(), password_hash },
            SessionPolicy::default(),
        )?)
    }

    #[test]
    fn accepts_only_the_configured_pair() -> anyhow::Result<()> {
        let gate = gate()?;
        assert!(gate.authenticate("admin", "s3cret-pass"));
        assert!(!gate.authenticate("admin", "wrong"));
        assert!(!gate.authenticate("Admin", "s3cret-pass"));
        assert!(!gate.authenticate("", ""));
        Ok(())
    }

    #[test]
    fn marker_presence_is_enough() -> anyhow::Result<()> {
        let gate = gate()?;
        assert!(gate.is_authenticated(Some(SESSION_MARKER)));
        assert!(gate.is_authenticated(Some("anything")));
        assert!(!gate.is_authenticated(Some("")));
        assert!(!gate.is_authenticated(None));
        Ok(())
    }

    #[test]
    fn rejects_plaintext_in_place_of_hash() {
        let result = SessionGate::new(
            AdminCredentials { username: "admin".into(), password_hash: "roberto530".into() },
            SessionPolicy::default(),
        );
        assert!(matches!(result, Err(AuthError::InvalidHash(_))));
    }

    #[test]
    fn default_policy_lasts_a_day() {
        let policy = SessionPolicy::default();
        assert_eq!(policy.ttl, Duration::from_secs(86_400));
        assert_eq!(policy.cookie_name, "admin_token");
    }

    #[test]
    fn debug_output_hides_hash() -> anyhow::Result<()> {
        let rendered = format!("{:?}", gate()?);
        assert!(!rendered.contains("$argon2"));
        Ok(())
    }
}
