use crate::core::{ConfigProvider, TokenStore};
use crate::domain::model::{
    AccessToken, CoffeeShop, CoffeeShopUpdate, Coordinates, CurrentUser, LoginOutcome,
    NewCoffeeShop,
};
use crate::utils::error::{CoffeeFilterError, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Client for the shop directory backend.
///
/// The token store is consulted on every authenticated request, so a login through
/// one client is visible to any other client sharing the same store.
pub struct CoffeeFilterClient<T: TokenStore> {
    client: Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenStore> CoffeeFilterClient<T> {
    pub fn new(base_url: impl Into<String>, tokens: T) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, tokens: T) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn list_shops(&self) -> Result<Vec<CoffeeShop>> {
        let url = self.url("/coffee-shops");
        tracing::debug!("Fetching coffee shops from {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check(response, "fetch coffee shops").await?;
        let shops: Vec<CoffeeShop> = response.json().await?;

        tracing::debug!("Fetched {} coffee shops", shops.len());
        Ok(shops)
    }

    pub async fn get_shop(&self, id: i64) -> Result<CoffeeShop> {
        let url = self.url(&format!("/coffee-shops/{}", id));
        tracing::debug!("Fetching coffee shop from {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check(response, "fetch coffee shop").await?;
        Ok(response.json().await?)
    }

    /// Shops within `radius_km` of `center`, filtered by the backend.
    pub async fn search_by_location(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<CoffeeShop>> {
        let url = self.url("/coffee-shops/search/by-location");
        tracing::debug!(
            "Searching coffee shops near {},{} within {} km",
            center.latitude,
            center.longitude,
            radius_km
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", center.latitude),
                ("longitude", center.longitude),
                ("radius", radius_km),
            ])
            .send()
            .await?;
        let response = check(response, "search coffee shops").await?;
        Ok(response.json().await?)
    }

    pub async fn create_shop(&self, shop: &NewCoffeeShop) -> Result<CoffeeShop> {
        let url = self.url("/coffee-shops");
        tracing::debug!("Creating coffee shop '{}'", shop.name);

        let request = self.authorized(self.client.post(&url).json(shop)).await;
        let response = check(request.send().await?, "create coffee shop").await?;
        let created: CoffeeShop = response.json().await?;

        tracing::info!("Created coffee shop {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_shop(&self, id: i64, update: &CoffeeShopUpdate) -> Result<CoffeeShop> {
        let url = self.url(&format!("/coffee-shops/{}", id));
        tracing::debug!("Updating coffee shop {}", id);

        let request = self.authorized(self.client.put(&url).json(update)).await;
        let response = check(request.send().await?, "update coffee shop").await?;
        Ok(response.json().await?)
    }

    pub async fn delete_shop(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/coffee-shops/{}", id));
        tracing::debug!("Deleting coffee shop {}", id);

        let request = self.authorized(self.client.delete(&url)).await;
        check(request.send().await?, "delete coffee shop").await?;

        tracing::info!("Deleted coffee shop {}", id);
        Ok(())
    }

    /// Exchanges credentials for a token, stores it, and reports the user's role.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let url = self.url("/auth/login");
        tracing::debug!("Logging in as {}", username);

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Login rejected with status {}", response.status());
            return Err(CoffeeFilterError::InvalidCredentials);
        }

        let token: AccessToken = response.json().await?;
        self.tokens.set(&token.access_token).await?;

        let user = self.current_user().await?;
        Ok(LoginOutcome {
            token: token.access_token,
            is_admin: user.is_admin,
        })
    }

    pub async fn current_user(&self) -> Result<CurrentUser> {
        let url = self.url("/auth/me");
        let request = self.authorized(self.client.get(&url)).await;
        let response = request.send().await?;

        if !response.status().is_success() {
            tracing::debug!("Current user lookup failed with status {}", response.status());
            return Err(CoffeeFilterError::NotAuthenticated);
        }

        Ok(response.json().await?)
    }

    pub async fn logout(&self) -> Result<()> {
        self.tokens.delete().await
    }
}

/// Passes successful responses through; otherwise builds an error from the server's
/// `detail` or the status text.
async fn check(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(str::to_string));

    let message = detail.unwrap_or_else(|| {
        format!(
            "Failed to {}: {}",
            action,
            status.canonical_reason().unwrap_or(status.as_str())
        )
    });

    tracing::warn!("Request to {} failed ({}): {}", action, status, message);
    Err(CoffeeFilterError::ApiError {
        status: status.as_u16(),
        message,
    })
}
