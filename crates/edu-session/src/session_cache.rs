use crate::{ProfileSource, SessionError, SessionResult};

use edu_auth::Credential;
use edu_client::ClientError;
use edu_core::{Clock, UserProfile};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::{debug, warn};

/// Default freshness window for a cached profile (5 minutes)
pub const DEFAULT_FRESHNESS_SECS: i64 = 300;

/// What every waiter on one fetch receives. Cloned per waiter, so the
/// failure side holds shared handles rather than the error itself.
#[derive(Debug, Clone)]
enum FetchFailure {
    Client(Arc<ClientError>),
    Aborted(Arc<str>),
}

type FetchOutcome = Result<UserProfile, FetchFailure>;
type PendingFetch = Shared<BoxFuture<'static, FetchOutcome>>;

#[derive(Debug)]
struct CachedProfile {
    profile: UserProfile,
    token: String,
    fetched_at: DateTime<Utc>,
}

struct PendingProfile {
    token: String,
    fetch: PendingFetch,
}

#[derive(Default)]
struct CacheState {
    entry: Option<CachedProfile>,
    pending: Option<PendingProfile>,
    /// Bumped on every invalidation; a fetch only stores its result if the
    /// generation it started under is still current.
    generation: u64,
}

/// In-memory cache of the signed-in user's profile.
///
/// Serves a fresh entry without network access and collapses concurrent
/// fetches into one request whose outcome every caller shares. Fetches run
/// on a spawned Tokio task, so a caller that gives up waiting does not cancel
/// the request for the others.
pub struct SessionCache {
    source: Arc<dyn ProfileSource>,
    clock: Arc<dyn Clock>,
    freshness: TimeDelta,
    state: Arc<Mutex<CacheState>>,
}

impl SessionCache {
    pub fn new(source: Arc<dyn ProfileSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            freshness: TimeDelta::seconds(DEFAULT_FRESHNESS_SECS),
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    pub fn with_freshness(mut self, freshness: TimeDelta) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn freshness(&self) -> TimeDelta {
        self.freshness
    }

    /// Profile for `credential`, from cache when fresh.
    ///
    /// `force_refresh` skips the cached entry but still joins a fetch that is
    /// already running for the same credential. A different credential
    /// supersedes whatever is pending. Failures are never cached.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn get(
        &self,
        credential: &Credential,
        force_refresh: bool,
    ) -> SessionResult<UserProfile> {
        let fetch = {
            let mut state = lock(&self.state);

            if !force_refresh
                && let Some(entry) = state.entry.as_ref()
                && entry.token == credential.token()
                && self.is_fresh(entry, self.clock.now())
            {
                debug!("Serving cached profile for user {}", entry.profile.id);
                return Ok(entry.profile.clone());
            }

            match state.pending.as_ref() {
                Some(pending) if pending.token == credential.token() => {
                    debug!("Joining in-flight profile fetch");
                    pending.fetch.clone()
                }
                _ => self.start_fetch(&mut state, credential),
            }
        };

        fetch.await.map_err(|failure| match failure {
            FetchFailure::Client(source) => SessionError::profile_fetch(source),
            FetchFailure::Aborted(message) => SessionError::fetch_aborted(message.to_string()),
        })
    }

    /// The cached profile if it is still fresh. Never fetches.
    pub fn peek(&self) -> Option<UserProfile> {
        let state = lock(&self.state);
        let now = self.clock.now();
        state
            .entry
            .as_ref()
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.profile.clone())
    }

    /// Drop the cached entry and detach any fetch in flight; its result will
    /// still reach its waiters but is not stored.
    pub fn invalidate(&self) {
        let mut state = lock(&self.state);
        state.entry = None;
        state.pending = None;
        state.generation = state.generation.wrapping_add(1);
        debug!("Session cache invalidated");
    }

    pub fn is_fetching(&self) -> bool {
        lock(&self.state).pending.is_some()
    }

    fn is_fresh(&self, entry: &CachedProfile, now: DateTime<Utc>) -> bool {
        now - entry.fetched_at < self.freshness
    }

    fn start_fetch(&self, state: &mut CacheState, credential: &Credential) -> PendingFetch {
        let pending_other = state.pending.take().is_some();
        let cached_other = state
            .entry
            .as_ref()
            .is_some_and(|entry| entry.token != credential.token());
        if pending_other || cached_other {
            debug!("Superseding profile state held for a different credential");
            state.entry = None;
            state.generation = state.generation.wrapping_add(1);
        }

        let generation = state.generation;
        let source = Arc::clone(&self.source);
        let clock = Arc::clone(&self.clock);
        let shared_state = Arc::clone(&self.state);
        let token = credential.token().to_string();
        let credential = credential.clone();

        let task = tokio::spawn(async move {
            let result = source.fetch_profile(&credential).await.map_err(Arc::new);

            let mut state = lock(&shared_state);
            if state.generation != generation {
                debug!("Discarding profile fetched under a stale generation");
                return result;
            }
            state.pending = None;
            match &result {
                Ok(profile) => {
                    debug!("Cached profile for user {}", profile.id);
                    state.entry = Some(CachedProfile {
                        profile: profile.clone(),
                        token: credential.token().to_string(),
                        fetched_at: clock.now(),
                    });
                }
                Err(e) => warn!("Profile fetch failed: {e}"),
            }
            result
        });

        let fetch = async move {
            match task.await {
                Ok(result) => result.map_err(FetchFailure::Client),
                Err(e) => Err(FetchFailure::Aborted(Arc::from(e.to_string()))),
            }
        }
        .boxed()
        .shared();

        state.pending = Some(PendingProfile {
            token,
            fetch: fetch.clone(),
        });
        fetch
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("freshness", &self.freshness)
            .field("fetching", &self.is_fetching())
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
