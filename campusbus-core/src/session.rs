use std::sync::Arc;

use campusbus_shared::Secret;
use tokio::sync::RwLock;

/// Holds the one bearer token the client may have at a time.
///
/// Cloning yields another handle onto the same slot, so the HTTP layer and the
/// auth workflow always agree on the current credential.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<Secret<String>>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token, replacing whatever was there
    pub async fn set_token(&self, token: Secret<String>) {
        *self.token.write().await = Some(token);
        tracing::debug!("Session token stored");
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
        tracing::debug!("Session token cleared");
    }

    pub async fn token(&self) -> Option<Secret<String>> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_overwrite_and_clear() {
        let session = Session::new();
        assert!(!session.is_authenticated().await);

        session.set_token("first".into()).await;
        session.set_token("second".into()).await;
        assert_eq!(session.token().await.unwrap().expose(), "second");

        // Clones share the slot
        let handle = session.clone();
        handle.clear().await;
        assert!(!session.is_authenticated().await);
    }
}
