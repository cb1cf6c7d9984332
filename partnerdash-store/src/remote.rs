//! Client for a hosted backend exposing REST tables and object storage.
//!
//! Tables live under `/rest/v1/<table>` and are filtered with
//! `column=eq.value` query parameters; writes ask for the affected rows back
//! with `Prefer: return=representation`. Media goes to
//! `/storage/v1/object/<bucket>/<name>`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use partnerdash_common::{
    Activation, ActivationUpdate, Collection, CollectionUpdate, ExternalLink, LinkDraft,
    NewActivation, NewCollection, NewPartner, NewUser, OverallMetrics, Partner, PartnerUpdate,
    RemoteConfig, Series, User, UserUpdate,
};

use crate::error::{Result, StoreError};
use crate::media::{self, MediaUpload};
use crate::source::{Bucket, DataSource, SeriesScope};

const APIKEY: HeaderName = HeaderName::from_static("apikey");
const PREFER: HeaderName = HeaderName::from_static("prefer");
const RETURN_REPRESENTATION: &str = "return=representation";

/// Select clause embedding the attached link.
const WITH_LINK: &str = "*,external_link:external_links(*)";

/// Columns of the series view that are not metrics.
const SERIES_KEYS: &[&str] = &["partner_id", "id"];

#[derive(Debug, Deserialize)]
struct LinkRef {
    external_link_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Data source backed by the remote REST and storage APIs.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    image_bucket: String,
    video_bucket: String,
}

impl RemoteStore {
    /// Build a client from the remote configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(StoreError::config("remote.url is not set"));
        }
        let api_key = config.resolved_api_key().ok_or_else(|| {
            StoreError::config(format!(
                "no API key: set remote.api_key or {}",
                partnerdash_common::config::API_KEY_ENV
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .default_headers(auth_headers(&api_key)?)
            .build()
            .map_err(|e| StoreError::config(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(url = %base_url, "Using remote data source");

        Ok(Self {
            client,
            base_url,
            image_bucket: config.image_bucket.clone(),
            video_bucket: config.video_bucket.clone(),
        })
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
    }

    fn bucket_name(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Images => &self.image_bucket,
            Bucket::Videos => &self.video_bucket,
        }
    }

    /// Public URL of a stored object.
    pub fn public_url(&self, bucket: &str, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, name
        )
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        Ok(send(req).await?.json::<T>().await?)
    }

    /// Send a write and return the affected rows.
    async fn write_rows<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Vec<T>> {
        self.fetch(req.header(PREFER, RETURN_REPRESENTATION)).await
    }

    async fn insert_one<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        body: &Value,
    ) -> Result<T> {
        let req = self
            .table(Method::POST, table)
            .query(&[("select", select)])
            .json(body);
        self.write_rows(req)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode(format!("insert into {table} returned no rows")))
    }

    async fn update_one<T: DeserializeOwned>(
        &self,
        table: &'static str,
        entity: &'static str,
        id: &str,
        select: &str,
        body: &Value,
    ) -> Result<T> {
        let req = self
            .table(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}")), ("select", select.to_string())])
            .json(body);
        self.write_rows(req)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(entity, id))
    }

    async fn delete_one(&self, table: &'static str, entity: &'static str, id: &str) -> Result<LinkRef> {
        let req = self
            .table(Method::DELETE, table)
            .query(&[("id", format!("eq.{id}")), ("select", "external_link_id".to_string())]);
        self.write_rows(req)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(entity, id))
    }

    async fn link_of(&self, table: &'static str, entity: &'static str, id: &str) -> Result<Option<String>> {
        let req = self
            .table(Method::GET, table)
            .query(&[("id", format!("eq.{id}")), ("select", "external_link_id".to_string())]);
        let rows: Vec<LinkRef> = self.fetch(req).await?;
        rows.into_iter()
            .next()
            .map(|r| r.external_link_id)
            .ok_or_else(|| StoreError::not_found(entity, id))
    }

    async fn create_link(&self, draft: &LinkDraft) -> Result<Option<ExternalLink>> {
        if !draft.is_complete() {
            return Ok(None);
        }
        let link: ExternalLink = self.insert_one("external_links", "*", &link_body(draft)).await?;
        tracing::debug!(link = %link.id, "Created external link");
        Ok(Some(link))
    }

    /// Update the attached link or create one; returns the link id to store.
    async fn upsert_link(&self, current: Option<String>, draft: &LinkDraft) -> Result<Option<String>> {
        match current {
            Some(link_id) => {
                let req = self
                    .table(Method::PATCH, "external_links")
                    .query(&[("id", format!("eq.{link_id}"))])
                    .json(&link_body(draft));
                send(req).await?;
                Ok(Some(link_id))
            }
            None => Ok(self.create_link(draft).await?.map(|l| l.id)),
        }
    }

    async fn delete_link(&self, link_id: &str) -> Result<()> {
        let req = self
            .table(Method::DELETE, "external_links")
            .query(&[("id", format!("eq.{link_id}"))]);
        send(req).await?;
        Ok(())
    }

    async fn list_owned<T: DeserializeOwned>(&self, table: &str, user_id: &str) -> Result<Vec<T>> {
        let req = self.table(Method::GET, table).query(&[
            ("select", WITH_LINK.to_string()),
            ("user_id", format!("eq.{user_id}")),
            ("order", "created_at.desc".to_string()),
        ]);
        self.fetch(req).await
    }
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(api_key)
        .map_err(|e| StoreError::config(format!("invalid API key header: {e}")))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| StoreError::config(format!("invalid auth header: {e}")))?;
    headers.insert(APIKEY, key);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// Send a request, turning non-success statuses into [`StoreError::Remote`].
async fn send(req: RequestBuilder) -> Result<Response> {
    let resp = req.send().await?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or(text);

    tracing::warn!(status = status.as_u16(), error = %message, "Remote request failed");
    Err(StoreError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn link_body(draft: &LinkDraft) -> Value {
    json!({
        "title": draft.title,
        "url": draft.url,
        "image_url": draft.image_url,
    })
}

/// Insert optional scalar fields of an update into a JSON object.
fn put_some(body: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        body.insert(key.to_string(), Value::String(v.clone()));
    }
}

/// Partner columns differ from the model: `company_description`, `avatar_url`,
/// and no e-mail column.
fn partner_insert_body(draft: &NewPartner) -> Value {
    let description = Some(draft.description.trim()).filter(|d| !d.is_empty());
    json!({
        "first_name": draft.first_name,
        "last_name": draft.last_name,
        "company_name": draft.company_name,
        "company_description": description,
        "username": draft.username,
        "avatar_url": draft.logo_url,
    })
}

fn partner_patch_body(update: &PartnerUpdate) -> Value {
    let mut body = Map::new();
    put_some(&mut body, "first_name", &update.first_name);
    put_some(&mut body, "last_name", &update.last_name);
    put_some(&mut body, "company_name", &update.company_name);
    put_some(&mut body, "company_description", &update.description);
    put_some(&mut body, "username", &update.username);
    put_some(&mut body, "avatar_url", &update.logo_url);
    if let Some(active) = update.is_active {
        body.insert("is_active".to_string(), json!(active));
    }
    Value::Object(body)
}

/// Users have no e-mail column; the address belongs to the auth account.
fn user_insert_body(draft: &NewUser) -> Value {
    json!({
        "partner_id": draft.partner_id,
        "first_name": draft.first_name,
        "last_name": draft.last_name,
        "username": draft.username,
        "avatar_url": draft.avatar_url,
        "social_links": draft.social_links,
    })
}

fn user_patch_body(update: &UserUpdate) -> Value {
    let mut body = Map::new();
    put_some(&mut body, "first_name", &update.first_name);
    put_some(&mut body, "last_name", &update.last_name);
    put_some(&mut body, "username", &update.username);
    put_some(&mut body, "avatar_url", &update.avatar_url);
    if let Some(links) = &update.social_links {
        body.insert("social_links".to_string(), json!(links));
    }
    if let Some(active) = update.is_active {
        body.insert("is_active".to_string(), json!(active));
    }
    Value::Object(body)
}

#[async_trait]
impl DataSource for RemoteStore {
    fn backend_tag(&self) -> &'static str {
        "remote"
    }

    async fn list_partners(&self) -> Result<Vec<Partner>> {
        let req = self
            .table(Method::GET, "partners")
            .query(&[("select", "*"), ("order", "company_name.asc")]);
        self.fetch(req).await
    }

    async fn create_partner(&self, draft: NewPartner) -> Result<Partner> {
        draft.validate()?;
        let partner: Partner = self.insert_one("partners", "*", &partner_insert_body(&draft)).await?;
        tracing::info!(partner = %partner.id, "Created partner");
        Ok(partner)
    }

    async fn update_partner(&self, id: &str, update: PartnerUpdate) -> Result<Partner> {
        update.validate()?;
        self.update_one("partners", "partner", id, "*", &partner_patch_body(&update))
            .await
    }

    async fn list_users(&self, partner_id: &str) -> Result<Vec<User>> {
        let req = self.table(Method::GET, "users").query(&[
            ("select", "*".to_string()),
            ("partner_id", format!("eq.{partner_id}")),
            ("order", "first_name.asc".to_string()),
        ]);
        self.fetch(req).await
    }

    async fn create_user(&self, draft: NewUser) -> Result<User> {
        draft.validate()?;
        let user: User = self.insert_one("users", "*", &user_insert_body(&draft)).await?;
        tracing::info!(user = %user.id, partner = %user.partner_id, "Created user");
        Ok(user)
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User> {
        update.validate()?;
        self.update_one("users", "user", id, "*", &user_patch_body(&update))
            .await
    }

    async fn list_collections(&self, user_id: &str) -> Result<Vec<Collection>> {
        self.list_owned("collections", user_id).await
    }

    async fn create_collection(&self, draft: NewCollection) -> Result<Collection> {
        draft.validate()?;

        let link = match &draft.external_link {
            Some(link) => self.create_link(link).await?,
            None => None,
        };
        let body = json!({
            "user_id": draft.user_id,
            "title": draft.title.trim(),
            "description": draft.description,
            "cover_image_url": draft.cover_image_url,
            "category": draft.category,
            "activation_ids": draft.activation_ids,
            "external_link_id": link.map(|l| l.id),
        });

        let collection: Collection = self.insert_one("collections", WITH_LINK, &body).await?;
        tracing::info!(collection = %collection.id, user = %collection.user_id, "Created collection");
        Ok(collection)
    }

    async fn update_collection(&self, id: &str, update: CollectionUpdate) -> Result<Collection> {
        update.validate()?;

        let mut body = Map::new();
        if let Some(draft) = &update.external_link {
            let current = self.link_of("collections", "collection", id).await?;
            let link_id = self.upsert_link(current, draft).await?;
            body.insert("external_link_id".to_string(), json!(link_id));
        }
        if let Some(title) = &update.title {
            body.insert("title".to_string(), json!(title.trim()));
        }
        put_some(&mut body, "description", &update.description);
        put_some(&mut body, "cover_image_url", &update.cover_image_url);
        put_some(&mut body, "category", &update.category);
        if let Some(ids) = &update.activation_ids {
            body.insert("activation_ids".to_string(), json!(ids));
        }
        body.insert("updated_at".to_string(), json!(Utc::now()));

        self.update_one("collections", "collection", id, WITH_LINK, &Value::Object(body))
            .await
    }

    async fn delete_collection(&self, id: &str) -> Result<()> {
        let removed = self.delete_one("collections", "collection", id).await?;
        if let Some(link_id) = removed.external_link_id {
            self.delete_link(&link_id).await?;
        }
        tracing::info!(collection = %id, "Deleted collection");
        Ok(())
    }

    async fn list_activations(&self, user_id: &str) -> Result<Vec<Activation>> {
        self.list_owned("activations", user_id).await
    }

    async fn create_activation(&self, draft: NewActivation) -> Result<Activation> {
        draft.validate()?;

        let link = match &draft.external_link {
            Some(link) => self.create_link(link).await?,
            None => None,
        };
        let body = json!({
            "user_id": draft.user_id,
            "title": draft.title.trim(),
            "description": draft.description,
            "trigger_image_url": draft.trigger_image_url,
            "video_url": draft.video_url,
            "external_link_id": link.map(|l| l.id),
        });

        let activation: Activation = self.insert_one("activations", WITH_LINK, &body).await?;
        tracing::info!(activation = %activation.id, user = %activation.user_id, "Created activation");
        Ok(activation)
    }

    async fn update_activation(&self, id: &str, update: ActivationUpdate) -> Result<Activation> {
        update.validate()?;

        let mut body = Map::new();
        if let Some(draft) = &update.external_link {
            let current = self.link_of("activations", "activation", id).await?;
            let link_id = self.upsert_link(current, draft).await?;
            body.insert("external_link_id".to_string(), json!(link_id));
        }
        if let Some(title) = &update.title {
            body.insert("title".to_string(), json!(title.trim()));
        }
        put_some(&mut body, "description", &update.description);
        put_some(&mut body, "trigger_image_url", &update.trigger_image_url);
        put_some(&mut body, "video_url", &update.video_url);
        body.insert("updated_at".to_string(), json!(Utc::now()));

        self.update_one("activations", "activation", id, WITH_LINK, &Value::Object(body))
            .await
    }

    async fn delete_activation(&self, id: &str) -> Result<()> {
        let removed = self.delete_one("activations", "activation", id).await?;
        if let Some(link_id) = removed.external_link_id {
            self.delete_link(&link_id).await?;
        }
        tracing::info!(activation = %id, "Deleted activation");
        Ok(())
    }

    async fn overall_metrics(&self) -> Result<OverallMetrics> {
        let req = self
            .table(Method::GET, "overall_metrics")
            .query(&[("select", "*")]);
        let rows: Vec<OverallMetrics> = self.fetch(req).await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    async fn metric_series(&self, scope: SeriesScope) -> Result<Series> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "timestamp.asc".to_string()),
        ];
        // Platform rows carry no partner.
        match scope.partner_id() {
            Some(partner_id) => query.push(("partner_id", format!("eq.{partner_id}"))),
            None => query.push(("partner_id", "is.null".to_string())),
        }

        let req = self.table(Method::GET, "metric_series").query(&query);
        let mut records: Vec<Map<String, Value>> = self.fetch(req).await?;
        for record in &mut records {
            for key in SERIES_KEYS {
                record.remove(*key);
            }
        }

        let series = Series::from_records(&records)?;
        tracing::debug!(scope = ?scope, samples = series.len(), "Fetched metric series");
        Ok(series)
    }

    async fn upload(&self, bucket: Bucket, upload: MediaUpload) -> Result<String> {
        let prepared = media::prepare_for(bucket, upload).await?;
        let bucket = self.bucket_name(bucket);
        let name = media::object_name(&prepared.file_name);

        let req = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url, bucket, name
            ))
            .header(CONTENT_TYPE, prepared.content_type)
            .header("cache-control", "3600")
            .header("x-upsert", "false")
            .body(prepared.bytes);
        send(req).await?;

        let url = self.public_url(bucket, &name);
        tracing::info!(url = %url, "Uploaded media");
        Ok(url)
    }
}
