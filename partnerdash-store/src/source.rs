//! The data-access interface shared by every backend.

use async_trait::async_trait;
use partnerdash_common::{
    Activation, ActivationUpdate, Collection, CollectionUpdate, NewActivation, NewCollection,
    NewPartner, NewUser, OverallMetrics, Partner, PartnerUpdate, Series, User, UserUpdate,
};

use crate::error::Result;
use crate::media::MediaUpload;

/// Which slice of activity a metric series covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeriesScope {
    /// Platform-wide activity.
    Global,
    /// Activity of one partner.
    Partner(String),
}

impl SeriesScope {
    pub fn partner_id(&self) -> Option<&str> {
        match self {
            SeriesScope::Global => None,
            SeriesScope::Partner(id) => Some(id),
        }
    }
}

/// Storage bucket for uploaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Images,
    Videos,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Images => "images",
            Bucket::Videos => "videos",
        }
    }
}

/// Backend for partner, user and content records plus dashboard metrics.
///
/// Implementations are shared behind `Arc<dyn DataSource>` and called from
/// async tasks. Writes are last-write-wins and never retried.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short backend name for logs.
    fn backend_tag(&self) -> &'static str;

    /// All partners, ordered by company name.
    async fn list_partners(&self) -> Result<Vec<Partner>>;

    async fn create_partner(&self, draft: NewPartner) -> Result<Partner>;

    /// Partial update; also used for the active toggle.
    async fn update_partner(&self, id: &str, update: PartnerUpdate) -> Result<Partner>;

    /// Users of one partner, ordered by first name.
    async fn list_users(&self, partner_id: &str) -> Result<Vec<User>>;

    async fn create_user(&self, draft: NewUser) -> Result<User>;

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User>;

    /// Collections owned by a user, newest first.
    async fn list_collections(&self, user_id: &str) -> Result<Vec<Collection>>;

    /// Create a collection. A complete link draft is stored first and attached.
    async fn create_collection(&self, draft: NewCollection) -> Result<Collection>;

    /// Update a collection. A link draft updates the attached link, or creates
    /// one when none is attached and the draft is complete.
    async fn update_collection(&self, id: &str, update: CollectionUpdate) -> Result<Collection>;

    async fn delete_collection(&self, id: &str) -> Result<()>;

    /// Activations owned by a user, newest first.
    async fn list_activations(&self, user_id: &str) -> Result<Vec<Activation>>;

    async fn create_activation(&self, draft: NewActivation) -> Result<Activation>;

    async fn update_activation(&self, id: &str, update: ActivationUpdate) -> Result<Activation>;

    async fn delete_activation(&self, id: &str) -> Result<()>;

    /// Platform totals for the overview cards.
    async fn overall_metrics(&self) -> Result<OverallMetrics>;

    /// Daily metric series for the given scope.
    async fn metric_series(&self, scope: SeriesScope) -> Result<Series>;

    /// Store media and return its public URL.
    async fn upload(&self, bucket: Bucket, media: MediaUpload) -> Result<String>;
}
