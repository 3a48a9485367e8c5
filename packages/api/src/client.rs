//! # Remote catalog API client
//!
//! [`ApiClient`] issues typed requests against the catalog API. When a session
//! is set, every request carries `Authorization: Bearer <token>`.
//!
//! Reads go through the shared [`QueryCache`], keyed by the full request URL.
//! Writes invalidate the tags listed in [`crate::cache`]. The client is cheap
//! to clone and all clones share the token and the cache, so one instance can
//! be provided to the whole UI.

use std::sync::{Arc, RwLock};

use catalog::{
    AuthResponse, CatalogConfig, Category, CreateProductInput, ListParams, Product, Session,
    UpdateProductInput,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{QueryCache, Tag};
use crate::error::{ApiError, ApiResult};

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams<'a> {
    searched_text: &'a str,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    cache: QueryCache,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
            cache: QueryCache::new(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.api.base_url.clone())
            .with_cache(QueryCache::with_ttl(config.api.cache_ttl()))
    }

    /// Replace the response cache, e.g. to use a different time-to-live.
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Use the session's token for subsequent requests.
    pub fn set_session(&self, session: &Session) {
        let mut token = self.token.write().unwrap_or_else(|e| e.into_inner());
        *token = session.token().map(str::to_string);
    }

    /// Forget the token and every cached response.
    pub fn clear_session(&self) {
        let mut token = self.token.write().unwrap_or_else(|e| e.into_inner());
        *token = None;
        drop(token);
        self.cache.reset();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .map(|t| t.is_some())
            .unwrap_or(false)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        let token = self.token.read().ok().and_then(|t| t.clone());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Execute `request` and return the body of a successful response.
    async fn execute(&self, request: Request) -> ApiResult<String> {
        tracing::debug!("{} {}", request.method(), request.url());
        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!("Catalog API responded {status}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(builder.build()?).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET through the cache. `tags` derives the provided tags from the response.
    async fn query<T>(&self, builder: RequestBuilder, tags: impl FnOnce(&T) -> Vec<Tag>) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let request = builder.build()?;
        let key = request.url().to_string();
        if let Some(hit) = self.cache.get::<T>(&key) {
            tracing::debug!("cache hit {key}");
            return Ok(hit);
        }
        let body = self.execute(request).await?;
        let value: T = serde_json::from_str(&body)?;
        self.cache.put(&key, &value, tags(&value));
        Ok(value)
    }

    /// `POST /auth`. Does not change the client's session; the caller decides.
    pub async fn login(&self, email: &str) -> ApiResult<AuthResponse> {
        self.send(self.request(Method::POST, "/auth").json(&LoginBody { email }))
            .await
    }

    /// `GET /products` with pagination and an optional category.
    pub async fn get_products(&self, params: &ListParams) -> ApiResult<Vec<Product>> {
        let builder = self.request(Method::GET, "/products").query(params);
        self.query(builder, |products: &Vec<Product>| {
            products
                .iter()
                .map(|p| Tag::Product(p.id.clone()))
                .chain(std::iter::once(Tag::ProductList))
                .collect()
        })
        .await
    }

    /// `GET /products/search`.
    pub async fn search_products(&self, text: &str) -> ApiResult<Vec<Product>> {
        let builder = self
            .request(Method::GET, "/products/search")
            .query(&SearchParams {
                searched_text: text,
            });
        self.query(builder, |_: &Vec<Product>| vec![Tag::ProductSearch])
            .await
    }

    /// `GET /products/:slug`.
    pub async fn get_product_by_slug(&self, slug: &str) -> ApiResult<Product> {
        let builder = self.request(Method::GET, &format!("/products/{slug}"));
        self.query(builder, |p: &Product| vec![Tag::Product(p.id.clone())])
            .await
    }

    /// `POST /products`.
    pub async fn create_product(&self, body: &CreateProductInput) -> ApiResult<Product> {
        let created: Product = self
            .send(self.request(Method::POST, "/products").json(body))
            .await?;
        self.cache.invalidate(&Tag::product_writes());
        tracing::info!("Created product {}", created.slug);
        Ok(created)
    }

    /// `PUT /products/:id`.
    pub async fn update_product(&self, id: &str, body: &UpdateProductInput) -> ApiResult<Product> {
        let result: ApiResult<Product> = self
            .send(self.request(Method::PUT, &format!("/products/{id}")).json(body))
            .await;
        let mut tags = Tag::product_writes();
        if let Ok(updated) = &result {
            tags.push(Tag::Product(updated.id.clone()));
        }
        self.cache.invalidate(&tags);
        result
    }

    /// `DELETE /products/:id`. The response body is ignored.
    pub async fn delete_product(&self, id: &str) -> ApiResult<()> {
        let request = self
            .request(Method::DELETE, &format!("/products/{id}"))
            .build()?;
        self.execute(request).await?;
        self.cache.invalidate(&Tag::product_writes());
        tracing::info!("Deleted product {id}");
        Ok(())
    }

    /// `GET /categories`.
    pub async fn get_categories(&self, params: &ListParams) -> ApiResult<Vec<Category>> {
        let builder = self.request(Method::GET, "/categories").query(params);
        self.query(builder, |_: &Vec<Category>| vec![Tag::CategoryList])
            .await
    }

    /// `GET /categories/search`.
    pub async fn search_categories(&self, text: &str) -> ApiResult<Vec<Category>> {
        let builder = self
            .request(Method::GET, "/categories/search")
            .query(&SearchParams {
                searched_text: text,
            });
        self.query(builder, |_: &Vec<Category>| vec![Tag::CategorySearch])
            .await
    }
}
