//! Single-slot bearer-token session, persisted across runs.
//!
//! The durable form is one file holding the raw token string; absence of the
//! file means unauthenticated. The token is never validated locally (format
//! or expiry) — the only source of truth for invalidity is a server 401,
//! which the API client routes back through [`SessionStore::expire`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug)]
struct Inner {
    token: Option<String>,
    /// Bumped on every login/logout. Requests capture the generation they
    /// were issued under so a 401 from a stale request cannot tear down a
    /// session established after it was sent.
    generation: u64,
}

/// Process-wide session state with file persistence.
///
/// Thread-safe; the aggregator's concurrent category fetches read the token
/// from multiple threads.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl SessionStore {
    /// Open the store at `path`, adopting any previously persisted token.
    ///
    /// A non-empty token file counts as authenticated without any server
    /// round-trip; an unreadable file is treated as no session.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let token = match fs::read_to_string(&path) {
            Ok(s) => {
                let t = s.trim().to_string();
                if t.is_empty() { None } else { Some(t) }
            }
            Err(_) => None,
        };
        if token.is_some() {
            log::debug!("session: adopted persisted token from {}", path.display());
        }
        Self {
            path,
            inner: RwLock::new(Inner {
                token,
                generation: 0,
            }),
        }
    }

    /// Default token location under the user data dir, falling back to the
    /// working directory when no data dir is available.
    pub fn default_path() -> PathBuf {
        match dirs::data_dir() {
            Some(d) => d.join("econdash").join("token"),
            None => PathBuf::from(".econdash_token"),
        }
    }

    /// Persist `token` and flip to authenticated. Overwrites the single slot.
    pub fn login(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        let mut inner = self.inner.write().expect("session lock poisoned");
        inner.token = Some(token.to_string());
        inner.generation += 1;
        log::debug!("session: logged in (generation {})", inner.generation);
        Ok(())
    }

    /// Clear the persisted token and flip to unauthenticated.
    pub fn logout(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        let mut inner = self.inner.write().expect("session lock poisoned");
        inner.token = None;
        inner.generation += 1;
        log::debug!("session: logged out (generation {})", inner.generation);
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().expect("session lock poisoned").token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").token.is_some()
    }

    /// Generation the next request should be tagged with.
    pub fn generation(&self) -> u64 {
        self.inner.read().expect("session lock poisoned").generation
    }

    /// Tear the session down in response to a 401, but only when the request
    /// was issued under the current generation. A stale request racing a
    /// fresh login is ignored. The check and the clear happen under one
    /// write lock so a concurrent login cannot be wiped in between.
    /// Persistence failures are logged, not surfaced: the in-memory state is
    /// already unauthenticated either way.
    pub fn expire(&self, generation: u64) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        if inner.generation != generation {
            log::debug!(
                "session: ignoring 401 from stale generation {} (current {})",
                generation,
                inner.generation
            );
            return;
        }
        log::warn!("session: 401 received, clearing token");
        inner.token = None;
        inner.generation += 1;
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("session: failed to remove token file: {}", e),
        }
    }
}
