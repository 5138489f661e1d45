//! Fixed user roster.

use std::collections::HashMap;

use recauth_config::UserEntry;
use tracing::warn;

use crate::hash::{sha224_hex, verify_password};

/// Immutable set of valid username/password pairs.
///
/// Passwords are kept only as SHA-224 digests. Username lookup is exact and
/// case-sensitive.
#[derive(Clone, Default)]
pub struct UserRoster {
    /// Map from username to password hash
    users: HashMap<String, String>,
}

impl UserRoster {
    /// Build from configuration entries.
    ///
    /// An entry carrying a `password_hash` uses it as-is; otherwise the
    /// plaintext `password` is hashed. Entries with neither are skipped.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a UserEntry>,
    {
        let mut users = HashMap::new();
        for entry in entries {
            let hash = match (&entry.password_hash, &entry.password) {
                (Some(hash), _) => hash.to_ascii_lowercase(),
                (None, Some(password)) => sha224_hex(password),
                (None, None) => {
                    warn!(username = %entry.username, "roster entry has no credential, skipping");
                    continue;
                }
            };
            users.insert(entry.username.clone(), hash);
        }
        Self { users }
    }

    /// Build from plaintext username/password pairs.
    ///
    /// # Example
    /// ```
    /// use recauth_auth::UserRoster;
    ///
    /// let roster = UserRoster::from_pairs([("alice", "pw1"), ("bob", "pw2")]);
    /// assert!(roster.verify("alice", "pw1"));
    /// ```
    pub fn from_pairs<I, U, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: AsRef<str>,
    {
        let users = pairs
            .into_iter()
            .map(|(u, p)| (u.into(), sha224_hex(p.as_ref())))
            .collect();
        Self { users }
    }

    /// Check a password against the stored digest for `username`.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|hash| verify_password(password, hash))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl std::fmt::Debug for UserRoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRoster")
            .field("users", &self.users.len())
            .finish()
    }
}
