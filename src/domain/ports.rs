use crate::domain::model::Coordinates;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Holds the single bearer token of the signed-in user.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns `None` when no token is stored or it cannot be read.
    async fn get(&self) -> Option<String>;
    async fn set(&self, token: &str) -> Result<()>;
    async fn delete(&self) -> Result<()>;
}

/// Resolves a free-text address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn token_dir(&self) -> &str;
    fn closed_label(&self) -> &str;
}
