//! In-memory data source seeded with fixtures and generated demo series.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use partnerdash_common::{
    Activation, ActivationUpdate, Collection, CollectionUpdate, ExternalLink, LinkDraft,
    NewActivation, NewCollection, NewPartner, NewUser, OverallMetrics, Partner, PartnerUpdate,
    Series, User, UserUpdate,
};

use crate::demo::DemoGenerator;
use crate::error::{Result, StoreError};
use crate::fixtures;
use crate::media::{self, MediaUpload};
use crate::source::{Bucket, DataSource, SeriesScope};

#[derive(Default)]
struct State {
    partners: Vec<Partner>,
    users: Vec<User>,
    /// Newest first.
    collections: Vec<Collection>,
    /// Newest first.
    activations: Vec<Activation>,
    metrics: OverallMetrics,
    series: HashMap<SeriesScope, Series>,
    objects: HashMap<String, MediaUpload>,
}

/// Data source holding everything in process memory.
///
/// Series are generated on first request per scope and then reused, so
/// repeated renders of the same graph see the same data.
pub struct MemoryStore {
    state: RwLock<State>,
    generator: Mutex<DemoGenerator>,
}

impl MemoryStore {
    /// Store seeded with fixture partners, users and random metrics.
    pub fn new() -> Self {
        Self::seeded(DemoGenerator::new())
    }

    /// Fixture store with a reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::seeded(DemoGenerator::with_seed(seed))
    }

    /// Store with no records at all.
    pub fn empty() -> Self {
        Self {
            state: RwLock::new(State::default()),
            generator: Mutex::new(DemoGenerator::new()),
        }
    }

    fn seeded(mut generator: DemoGenerator) -> Self {
        let partners = fixtures::partners();
        let users = fixtures::users(&partners, &mut generator);
        let metrics = fixtures::overall_metrics(&mut generator);

        tracing::debug!(
            partners = partners.len(),
            users = users.len(),
            "Seeded in-memory store"
        );

        Self {
            state: RwLock::new(State {
                partners,
                users,
                metrics,
                ..State::default()
            }),
            generator: Mutex::new(generator),
        }
    }

    /// Bytes stored under an uploaded object's URL.
    pub fn object(&self, url: &str) -> Option<MediaUpload> {
        self.state.read().objects.get(url).cloned()
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn new_link(draft: &LinkDraft) -> Option<ExternalLink> {
    draft.is_complete().then(|| ExternalLink {
        id: new_id(),
        title: draft.title.clone(),
        url: draft.url.clone(),
        image_url: draft.image_url.clone(),
    })
}

/// Update an attached link, or attach a new one from a complete draft.
fn merge_link(current: &mut Option<ExternalLink>, draft: &LinkDraft) {
    match current {
        Some(link) => {
            link.title = draft.title.clone();
            link.url = draft.url.clone();
            link.image_url = draft.image_url.clone();
        }
        None => *current = new_link(draft),
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl DataSource for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list_partners(&self) -> Result<Vec<Partner>> {
        let mut partners = self.state.read().partners.clone();
        partners.sort_by(|a, b| a.company_name.cmp(&b.company_name));
        Ok(partners)
    }

    async fn create_partner(&self, draft: NewPartner) -> Result<Partner> {
        draft.validate()?;

        let partner = Partner {
            id: new_id(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            company_name: draft.company_name,
            description: draft.description,
            username: draft.username,
            email: draft.email,
            logo_url: draft.logo_url,
            managers_count: 0,
            users_count: 0,
            engagement: Default::default(),
            is_active: true,
            created_at: Utc::now(),
        };

        tracing::info!(partner = %partner.id, company = %partner.company_name, "Created partner");
        self.state.write().partners.push(partner.clone());
        Ok(partner)
    }

    async fn update_partner(&self, id: &str, update: PartnerUpdate) -> Result<Partner> {
        update.validate()?;

        let mut state = self.state.write();
        let partner = state
            .partners
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("partner", id))?;
        update.apply_to(partner);

        tracing::debug!(partner = %id, "Updated partner");
        Ok(partner.clone())
    }

    async fn list_users(&self, partner_id: &str) -> Result<Vec<User>> {
        let mut users: Vec<User> = self
            .state
            .read()
            .users
            .iter()
            .filter(|u| u.partner_id == partner_id)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.first_name.cmp(&b.first_name));
        Ok(users)
    }

    async fn create_user(&self, draft: NewUser) -> Result<User> {
        draft.validate()?;

        let mut state = self.state.write();
        let partner = state
            .partners
            .iter_mut()
            .find(|p| p.id == draft.partner_id)
            .ok_or_else(|| StoreError::not_found("partner", &draft.partner_id))?;
        partner.users_count += 1;

        let user = User {
            id: new_id(),
            partner_id: draft.partner_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            username: draft.username,
            email: draft.email,
            avatar_url: draft.avatar_url,
            social_links: draft.social_links,
            engagement: Default::default(),
            is_active: true,
            created_at: Utc::now(),
        };

        tracing::info!(user = %user.id, partner = %user.partner_id, "Created user");
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User> {
        update.validate()?;

        let mut state = self.state.write();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        update.apply_to(user);

        tracing::debug!(user = %id, "Updated user");
        Ok(user.clone())
    }

    async fn list_collections(&self, user_id: &str) -> Result<Vec<Collection>> {
        let mut collections: Vec<Collection> = self
            .state
            .read()
            .collections
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        collections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(collections)
    }

    async fn create_collection(&self, draft: NewCollection) -> Result<Collection> {
        draft.validate()?;

        let now = Utc::now();
        let collection = Collection {
            id: new_id(),
            user_id: draft.user_id,
            title: draft.title.trim().to_string(),
            description: optional_text(draft.description),
            cover_image_url: optional_text(draft.cover_image_url),
            category: optional_text(draft.category),
            activation_ids: draft.activation_ids,
            external_link: draft.external_link.as_ref().and_then(new_link),
            created_at: now,
            updated_at: now,
        };

        tracing::info!(collection = %collection.id, user = %collection.user_id, "Created collection");
        self.state.write().collections.insert(0, collection.clone());
        Ok(collection)
    }

    async fn update_collection(&self, id: &str, update: CollectionUpdate) -> Result<Collection> {
        update.validate()?;

        let mut state = self.state.write();
        let collection = state
            .collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("collection", id))?;
        update.apply_to(collection);
        if let Some(draft) = &update.external_link {
            merge_link(&mut collection.external_link, draft);
        }
        collection.updated_at = Utc::now();

        tracing::debug!(collection = %id, "Updated collection");
        Ok(collection.clone())
    }

    async fn delete_collection(&self, id: &str) -> Result<()> {
        let mut state = self.state.write();
        let before = state.collections.len();
        state.collections.retain(|c| c.id != id);
        if state.collections.len() == before {
            return Err(StoreError::not_found("collection", id));
        }

        tracing::info!(collection = %id, "Deleted collection");
        Ok(())
    }

    async fn list_activations(&self, user_id: &str) -> Result<Vec<Activation>> {
        let mut activations: Vec<Activation> = self
            .state
            .read()
            .activations
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        activations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(activations)
    }

    async fn create_activation(&self, draft: NewActivation) -> Result<Activation> {
        draft.validate()?;

        let now = Utc::now();
        let activation = Activation {
            id: new_id(),
            user_id: draft.user_id,
            title: draft.title.trim().to_string(),
            description: optional_text(draft.description),
            trigger_image_url: draft.trigger_image_url,
            video_url: draft.video_url,
            external_link: draft.external_link.as_ref().and_then(new_link),
            created_at: now,
            updated_at: now,
        };

        tracing::info!(activation = %activation.id, user = %activation.user_id, "Created activation");
        self.state.write().activations.insert(0, activation.clone());
        Ok(activation)
    }

    async fn update_activation(&self, id: &str, update: ActivationUpdate) -> Result<Activation> {
        update.validate()?;

        let mut state = self.state.write();
        let activation = state
            .activations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("activation", id))?;
        update.apply_to(activation);
        if let Some(draft) = &update.external_link {
            merge_link(&mut activation.external_link, draft);
        }
        activation.updated_at = Utc::now();

        tracing::debug!(activation = %id, "Updated activation");
        Ok(activation.clone())
    }

    async fn delete_activation(&self, id: &str) -> Result<()> {
        let mut state = self.state.write();
        let before = state.activations.len();
        state.activations.retain(|a| a.id != id);
        if state.activations.len() == before {
            return Err(StoreError::not_found("activation", id));
        }

        tracing::info!(activation = %id, "Deleted activation");
        Ok(())
    }

    async fn overall_metrics(&self) -> Result<OverallMetrics> {
        Ok(self.state.read().metrics)
    }

    async fn metric_series(&self, scope: SeriesScope) -> Result<Series> {
        if let Some(series) = self.state.read().series.get(&scope) {
            return Ok(series.clone());
        }

        if let Some(partner_id) = scope.partner_id() {
            if !self.state.read().partners.iter().any(|p| p.id == partner_id) {
                return Err(StoreError::not_found("partner", partner_id));
            }
        }

        let series = self.generator.lock().series(Self::today());
        tracing::debug!(scope = ?scope, samples = series.len(), "Generated demo series");

        // A concurrent request may have generated the same scope first.
        let mut state = self.state.write();
        Ok(state.series.entry(scope).or_insert(series).clone())
    }

    async fn upload(&self, bucket: Bucket, upload: MediaUpload) -> Result<String> {
        let prepared = media::prepare_for(bucket, upload).await?;
        let url = format!(
            "memory://{}/{}",
            bucket.as_str(),
            media::object_name(&prepared.file_name)
        );

        tracing::info!(url = %url, bytes = prepared.bytes.len(), "Stored upload");
        self.state.write().objects.insert(url.clone(), prepared);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_draft(user_id: &str, title: &str) -> NewCollection {
        NewCollection {
            user_id: user_id.to_string(),
            title: title.to_string(),
            ..NewCollection::default()
        }
    }

    #[tokio::test]
    async fn test_partners_sorted_by_company() {
        let store = MemoryStore::with_seed(1);
        let names: Vec<String> = store
            .list_partners()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.company_name)
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.first().map(String::as_str), Some("EcoSmart Industries"));
    }

    #[tokio::test]
    async fn test_series_is_cached_per_scope() {
        let store = MemoryStore::with_seed(2);

        let first = store.metric_series(SeriesScope::Global).await.unwrap();
        let second = store.metric_series(SeriesScope::Global).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 366);
        assert_eq!(first.last_day(), Some(MemoryStore::today()));

        let partner = store
            .metric_series(SeriesScope::Partner("p11".to_string()))
            .await
            .unwrap();
        assert_ne!(partner, first);
    }

    #[tokio::test]
    async fn test_series_for_unknown_partner() {
        let store = MemoryStore::with_seed(2);
        let err = store
            .metric_series(SeriesScope::Partner("nope".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_incomplete_link_is_not_attached() {
        let store = MemoryStore::empty();
        let mut draft = collection_draft("u1", "Spring");
        draft.external_link = Some(LinkDraft::new("Shop", ""));

        let created = store.create_collection(draft).await.unwrap();
        assert!(created.external_link.is_none());

        let updated = store
            .update_collection(
                &created.id,
                CollectionUpdate {
                    external_link: Some(LinkDraft::new("Shop", "https://shop")),
                    ..CollectionUpdate::default()
                },
            )
            .await
            .unwrap();
        let link = updated.external_link.unwrap();
        assert_eq!(link.url, "https://shop");

        let relinked = store
            .update_collection(
                &created.id,
                CollectionUpdate {
                    external_link: Some(LinkDraft::new("Store", "https://store")),
                    ..CollectionUpdate::default()
                },
            )
            .await
            .unwrap();
        let same = relinked.external_link.unwrap();
        assert_eq!(same.id, link.id);
        assert_eq!(same.title, "Store");
    }

    #[tokio::test]
    async fn test_delete_unknown_collection() {
        let store = MemoryStore::empty();
        assert!(store.delete_collection("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_upload_keeps_bytes() {
        let store = MemoryStore::empty();
        let url = store
            .upload(Bucket::Videos, MediaUpload::new("clip.MP4", "video/mp4", vec![7; 32]))
            .await
            .unwrap();

        assert!(url.starts_with("memory://videos/"));
        assert!(url.ends_with(".mp4"));
        assert_eq!(store.object(&url).unwrap().bytes, vec![7; 32]);
    }
}
