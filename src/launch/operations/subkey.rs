//! Scoped credential negotiation for manifest actions

use crate::api::ApiError;
use crate::launch::error::LaunchError;
use crate::launch::types::{RunEnv, ENV_API_KEY, ENV_API_KEY_EXPIRES_AT};

/// A short-lived, scope-limited API key
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct ScopedToken {
    #[serde(rename = "key")]
    pub token: String,
    /// Absolute expiry as reported by the server
    pub expires_at: String,
}

/// Client bound to the user's long-lived credential
pub trait CredentialClient {
    fn request_scoped_token(&self, game_id: u64, scope: &str) -> Result<ScopedToken, ApiError>;
}

/// Request a token for `scope` and write it, with its expiry, into `env`.
/// There is no fallback: a failed request fails the launch.
pub fn negotiate_scope(
    client: &dyn CredentialClient,
    game_id: u64,
    scope: &str,
    env: &mut RunEnv,
) -> Result<(), LaunchError> {
    tracing::info!("launch::subkey - Requesting '{}' subkey for game {}", scope, game_id);

    let token = client
        .request_scoped_token(game_id, scope)
        .map_err(|e| LaunchError::Credential {
            scope: scope.to_string(),
            reason: e.to_string(),
        })?;

    env.insert(ENV_API_KEY.to_string(), token.token);
    env.insert(ENV_API_KEY_EXPIRES_AT.to_string(), token.expires_at);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticClient(Result<ScopedToken, String>);

    impl CredentialClient for StaticClient {
        fn request_scoped_token(&self, _game_id: u64, _scope: &str) -> Result<ScopedToken, ApiError> {
            self.0.clone().map_err(ApiError::Api)
        }
    }

    #[test]
    fn token_and_expiry_land_in_env() {
        let client = StaticClient(Ok(ScopedToken {
            token: "sub-123".into(),
            expires_at: "2026-10-16T12:00:00Z".into(),
        }));
        let mut env = RunEnv::new();
        negotiate_scope(&client, 7, "profile:me", &mut env).unwrap();
        assert_eq!(env.get(ENV_API_KEY).map(String::as_str), Some("sub-123"));
        assert_eq!(
            env.get(ENV_API_KEY_EXPIRES_AT).map(String::as_str),
            Some("2026-10-16T12:00:00Z")
        );
    }

    #[test]
    fn failure_is_a_credential_error() {
        let client = StaticClient(Err("invalid scope".into()));
        let mut env = RunEnv::new();
        let err = negotiate_scope(&client, 7, "bogus", &mut env).unwrap_err();
        match err {
            LaunchError::Credential { scope, reason } => {
                assert_eq!(scope, "bogus");
                assert!(reason.contains("invalid scope"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(env.is_empty());
    }
}
