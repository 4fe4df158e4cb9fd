use crate::core::TokenStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const TOKEN_FILE: &str = "token";

/// Keeps the token for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    async fn set(&self, token: &str) -> Result<()> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        self.token.lock().await.take();
        Ok(())
    }
}

/// Persists the token in a file named `token` under `base_path`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    base_path: String,
}

impl FileTokenStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn token_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(TOKEN_FILE)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self) -> Option<String> {
        match tokio::fs::read_to_string(self.token_path()).await {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) => {
                tracing::debug!("No stored token at {}: {}", self.token_path().display(), e);
                None
            }
        }
    }

    async fn set(&self, token: &str) -> Result<()> {
        let full_path = self.token_path();

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, token).await?;
        tracing::debug!("Token written to {}", full_path.display());
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        match tokio::fs::remove_file(self.token_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
