//! In-memory link registry and short code generation
//!
//! This module owns the only piece of state in the service: a map from short
//! code to target URL. The map lives behind a single mutex and is shared by
//! cloning the `LinkRegistry` handle into every request handler.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;

/// Symbols a short code is drawn from: lowercase, uppercase, then digits
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in every generated short code
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code using the current thread's generator
///
/// Each of the `CODE_LENGTH` characters is drawn independently and uniformly
/// from `ALPHABET`. No check is made against codes already in use.
pub fn generate_code() -> String {
    generate_code_with(&mut rand::rng())
}

/// Generates a short code from an explicit random source
///
/// # Example
///
/// ```
/// # use rand::SeedableRng;
/// # use shortlink::registry::{generate_code_with, CODE_LENGTH};
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let code = generate_code_with(&mut rng);
/// assert_eq!(code.len(), CODE_LENGTH);
/// ```
pub fn generate_code_with<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Thread-safe map from short code to target URL
///
/// Cloning the registry is cheap and every clone sees the same entries.
/// Entries are never removed; the map is dropped with the last handle.
#[derive(Clone, Debug, Default)]
pub struct LinkRegistry {
    links: Arc<Mutex<HashMap<String, String>>>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `url` under `code`, returning the URL it replaced (if any).
    pub fn insert(&self, code: impl Into<String>, url: impl Into<String>) -> Option<String> {
        self.links().insert(code.into(), url.into())
    }

    /// Returns the URL stored under `code`.
    pub fn lookup(&self, code: &str) -> Option<String> {
        self.links().get(code).cloned()
    }

    /// Allocates a fresh code for `url`, stores it and returns the code
    ///
    /// Collisions are not prevented: if the generated code is already taken
    /// the previous target is overwritten and becomes unreachable.
    pub fn register(&self, url: impl Into<String>) -> String {
        let code = generate_code();
        if let Some(previous) = self.insert(code.clone(), url) {
            tracing::warn!(%code, %previous, "short code collision, previous link overwritten");
        }
        code
    }

    pub fn len(&self) -> usize {
        self.links().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links().is_empty()
    }

    // A panic elsewhere can't leave the map half-written: every critical
    // section is one HashMap call.
    fn links(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.links.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared short code to URL map
    pub registry: LinkRegistry,

    /// Prefix prepended to a code to form the returned short URL
    /// (e.g. "https://fer.link/")
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(registry: LinkRegistry, base_url: &str) -> Self {
        Self {
            registry,
            base_url: Arc::from(base_url),
        }
    }

    /// Builds the public short URL for `code`
    pub fn short_url(&self, code: &str) -> String {
        format!("{}{}", self.base_url, code)
    }
}
