//! Remote API client
//!
//! Talks to the store's HTTP API with the user's long-lived key. Used for
//! scoped subkeys at launch time and for game metadata in failure reports.

use crate::cave::Game;
use crate::launch::{CredentialClient, ScopedToken};
use crate::paths::PATH_GAME_CACHE;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Api(String),

    #[error("no API key configured")]
    MissingKey,

    #[error("game cache: {0}")]
    Cache(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorsResponse {
    errors: Vec<String>,
}

#[derive(Deserialize)]
struct SubkeyResponse {
    subkey: ScopedToken,
}

#[derive(Deserialize)]
struct GameResponse {
    game: Game,
}

/// Decode a response body, surfacing the server's `errors` list if present
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    if let Ok(errors) = serde_json::from_str::<ErrorsResponse>(body) {
        if !errors.errors.is_empty() {
            return Err(ApiError::Api(errors.errors.join(", ")));
        }
    }
    Ok(serde_json::from_str(body)?)
}

pub fn parse_subkey(body: &str) -> Result<ScopedToken, ApiError> {
    parse_response::<SubkeyResponse>(body).map(|r| r.subkey)
}

pub fn parse_game(body: &str) -> Result<Game, ApiError> {
    parse_response::<GameResponse>(body).map(|r| r.game)
}

pub struct ApiClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("cavelaunch")
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    fn key(&self) -> Result<&str, ApiError> {
        self.api_key.as_deref().ok_or(ApiError::MissingKey)
    }

    fn read_body(response: reqwest::blocking::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text()?;
        // Error bodies usually carry an `errors` list worth showing
        if !status.is_success() {
            if let Err(ApiError::Api(msg)) = parse_response::<serde_json::Value>(&body) {
                return Err(ApiError::Api(msg));
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    pub fn fetch_game(&self, game_id: u64) -> Result<Game, ApiError> {
        let url = format!("{}/games/{}", self.base_url, game_id);
        tracing::debug!("api - GET {}", url);
        let response = self.client.get(&url).bearer_auth(self.key()?).send()?;
        parse_game(&Self::read_body(response)?)
    }
}

impl CredentialClient for ApiClient {
    fn request_scoped_token(&self, game_id: u64, scope: &str) -> Result<ScopedToken, ApiError> {
        let url = format!("{}/games/{}/subkey", self.base_url, game_id);
        tracing::debug!("api - POST {} scope={}", url, scope);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.key()?)
            .form(&[("scope", scope)])
            .send()?;
        parse_subkey(&Self::read_body(response)?)
    }
}

/// Where game metadata comes from
pub trait GameSource {
    fn game(&self, game_id: u64) -> Result<Game, ApiError>;
}

impl<T: GameSource + ?Sized> GameSource for &T {
    fn game(&self, game_id: u64) -> Result<Game, ApiError> {
        (**self).game(game_id)
    }
}

impl GameSource for ApiClient {
    fn game(&self, game_id: u64) -> Result<Game, ApiError> {
        self.fetch_game(game_id)
    }
}

/// Local JSON cache in front of a remote source
pub struct CachedGames<S> {
    dir: PathBuf,
    remote: Option<S>,
}

impl<S: GameSource> CachedGames<S> {
    pub fn new(remote: Option<S>) -> Self {
        Self::in_dir(PATH_GAME_CACHE.clone(), remote)
    }

    pub fn in_dir(dir: PathBuf, remote: Option<S>) -> Self {
        Self { dir, remote }
    }

    fn path(&self, game_id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", game_id))
    }

    fn cached(&self, game_id: u64) -> Option<Game> {
        let data = std::fs::read_to_string(self.path(game_id)).ok()?;
        serde_json::from_str(&data).ok()
    }

    fn store(&self, game: &Game) -> Result<(), ApiError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(game.id), serde_json::to_string_pretty(game)?)?;
        Ok(())
    }
}

impl<S: GameSource> GameSource for CachedGames<S> {
    fn game(&self, game_id: u64) -> Result<Game, ApiError> {
        if let Some(game) = self.cached(game_id) {
            return Ok(game);
        }
        let remote = self.remote.as_ref().ok_or(ApiError::MissingKey)?;
        let game = remote.game(game_id)?;
        if let Err(e) = self.store(&game) {
            tracing::warn!("api - Could not cache game {}: {}", game_id, e);
        }
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subkey_body() {
        let token = parse_subkey(
            r#"{"subkey": {"key": "abc", "expires_at": "2026-10-16 12:00:00"}}"#,
        )
        .unwrap();
        assert_eq!(token.token, "abc");
        assert_eq!(token.expires_at, "2026-10-16 12:00:00");
    }

    #[test]
    fn errors_list_wins() {
        let err = parse_subkey(r#"{"errors": ["invalid scope", "nope"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid scope, nope");
    }

    #[test]
    fn game_body_ignores_extra_fields() {
        let game = parse_game(
            r#"{"game": {"id": 3, "title": "Overland", "url": "https://x.itch.io/o", "min_price": 0}}"#,
        )
        .unwrap();
        assert_eq!(game.id, 3);
        assert_eq!(game.url.as_deref(), Some("https://x.itch.io/o"));
        assert_eq!(game.cover_url, None);
    }

    #[test]
    fn missing_key_fails_before_network() {
        let client = ApiClient::new("http://127.0.0.1:9", Some(String::new())).unwrap();
        let err = client.request_scoped_token(1, "profile:me").unwrap_err();
        assert!(matches!(err, ApiError::MissingKey));
    }

    struct CountingSource(Cell<u32>);

    impl GameSource for CountingSource {
        fn game(&self, game_id: u64) -> Result<Game, ApiError> {
            self.0.set(self.0.get() + 1);
            Ok(Game {
                id: game_id,
                title: "Fetched".into(),
                cover_url: None,
                url: None,
            })
        }
    }

    #[test]
    fn cache_is_filled_then_used() {
        let dir = tempfile::tempdir().unwrap();
        let games = CachedGames::in_dir(dir.path().to_path_buf(), Some(CountingSource(Cell::new(0))));

        assert_eq!(games.game(5).unwrap().title, "Fetched");
        assert_eq!(games.game(5).unwrap().title, "Fetched");
        assert_eq!(games.remote.as_ref().unwrap().0.get(), 1);
        assert!(dir.path().join("5.json").exists());
    }

    #[test]
    fn no_remote_and_no_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let games: CachedGames<CountingSource> = CachedGames::in_dir(dir.path().to_path_buf(), None);
        assert!(games.game(5).is_err());
    }
}
