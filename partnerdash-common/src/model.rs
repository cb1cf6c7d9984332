//! Dashboard domain records: partners, users, their content and the
//! aggregate metrics shown on the overview.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-account engagement counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Engagement {
    pub collections_count: u64,
    pub activations_count: u64,
    pub scans_count: u64,
    pub likes_count: u64,
    pub views_count: u64,
}

/// A partner organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    #[serde(default, alias = "company_description", deserialize_with = "null_as_empty")]
    pub description: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "avatar_url")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub managers_count: u64,
    #[serde(default)]
    pub users_count: u64,
    #[serde(flatten)]
    pub engagement: Engagement,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Nullable text column read as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Partner {
    pub fn contact_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First letter of the company name, for avatar placeholders.
    pub fn initial(&self) -> char {
        initial_of(&self.company_name)
    }

    /// Case-insensitive match on company name, contact name or username.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.company_name.to_lowercase().contains(&query)
            || self.contact_name().to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
    }
}

/// Social handles attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub x: String,
    pub instagram: String,
    pub tiktok: String,
}

/// An end user belonging to a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub partner_id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(flatten)]
    pub engagement: Engagement,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    pub fn initial(&self) -> char {
        initial_of(&self.first_name)
    }

    /// Case-insensitive match on display name, username or e-mail.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.display_name().to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

fn initial_of(name: &str) -> char {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

/// An outbound link attached to a collection or activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Link fields as entered in a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl LinkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            image_url: None,
        }
    }

    /// A link is only stored once both title and URL are filled in.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}

/// Fixed list of collection categories offered in forms.
pub const COLLECTION_CATEGORIES: &[&str] = &[
    "Art & Design",
    "Business",
    "Education",
    "Entertainment",
    "Fashion",
    "Food & Drink",
    "Health & Fitness",
    "Lifestyle",
    "Music",
    "Photography",
    "Sports",
    "Technology",
    "Travel",
    "Other",
];

/// A user's curated set of activations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub activation_ids: Vec<String>,
    #[serde(default)]
    pub external_link: Option<ExternalLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A trigger image paired with the video it plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub trigger_image_url: String,
    pub video_url: String,
    #[serde(default)]
    pub external_link: Option<ExternalLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn null_as_empty_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Platform-wide totals shown as overview cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallMetrics {
    #[serde(rename = "partners_count")]
    pub partners: u64,
    #[serde(rename = "users_count")]
    pub users: u64,
    #[serde(rename = "collections_count")]
    pub collections: u64,
    #[serde(rename = "activations_count")]
    pub activations: u64,
    #[serde(rename = "scans_count")]
    pub scans: u64,
    pub collection_views: u64,
    pub activation_views: u64,
    #[serde(rename = "likes_count")]
    pub likes: u64,
}

impl OverallMetrics {
    /// Card label and value, in display order.
    pub fn entries(&self) -> [(&'static str, u64); 8] {
        [
            ("Partners", self.partners),
            ("Users", self.users),
            ("Collections", self.collections),
            ("Activations", self.activations),
            ("Scans", self.scans),
            ("Collection Views", self.collection_views),
            ("Activation Views", self.activation_views),
            ("Likes", self.likes),
        ]
    }
}

// Drafts and partial updates

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn require_email(value: &str) -> Result<()> {
    require("email", value)?;
    if !value.contains('@') {
        return Err(Error::validation(format!("'{value}' is not an e-mail address")));
    }
    Ok(())
}

fn check_optional(field: &str, value: &Option<String>) -> Result<()> {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPartner {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    #[serde(default)]
    pub description: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl NewPartner {
    pub fn validate(&self) -> Result<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("company_name", &self.company_name)?;
        require("username", &self.username)?;
        require_email(&self.email)
    }
}

/// Partial partner update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl PartnerUpdate {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_optional("first_name", &self.first_name)?;
        check_optional("last_name", &self.last_name)?;
        check_optional("company_name", &self.company_name)?;
        check_optional("username", &self.username)?;
        match &self.email {
            Some(email) => require_email(email),
            None => Ok(()),
        }
    }

    pub fn apply_to(&self, partner: &mut Partner) {
        if let Some(v) = &self.first_name {
            partner.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            partner.last_name = v.clone();
        }
        if let Some(v) = &self.company_name {
            partner.company_name = v.clone();
        }
        if let Some(v) = &self.description {
            partner.description = v.clone();
        }
        if let Some(v) = &self.username {
            partner.username = v.clone();
        }
        if let Some(v) = &self.email {
            partner.email = v.clone();
        }
        if let Some(v) = &self.logo_url {
            partner.logo_url = Some(v.clone());
        }
        if let Some(v) = self.is_active {
            partner.is_active = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub partner_id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub social_links: SocialLinks,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        require("partner_id", &self.partner_id)?;
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("username", &self.username)?;
        require_email(&self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_optional("first_name", &self.first_name)?;
        check_optional("last_name", &self.last_name)?;
        check_optional("username", &self.username)?;
        match &self.email {
            Some(email) => require_email(email),
            None => Ok(()),
        }
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(v) = &self.first_name {
            user.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            user.last_name = v.clone();
        }
        if let Some(v) = &self.username {
            user.username = v.clone();
        }
        if let Some(v) = &self.email {
            user.email = v.clone();
        }
        if let Some(v) = &self.avatar_url {
            user.avatar_url = Some(v.clone());
        }
        if let Some(v) = &self.social_links {
            user.social_links = v.clone();
        }
        if let Some(v) = self.is_active {
            user.is_active = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCollection {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub category: Option<String>,
    pub activation_ids: Vec<String>,
    pub external_link: Option<LinkDraft>,
}

impl NewCollection {
    pub fn validate(&self) -> Result<()> {
        require("user_id", &self.user_id)?;
        require("title", &self.title)
    }
}

/// Collection edit. The link draft, when given, updates or creates the link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub category: Option<String>,
    pub activation_ids: Option<Vec<String>>,
    pub external_link: Option<LinkDraft>,
}

impl CollectionUpdate {
    pub fn validate(&self) -> Result<()> {
        check_optional("title", &self.title)
    }

    /// Apply scalar fields; links are handled by the store.
    pub fn apply_to(&self, collection: &mut Collection) {
        if let Some(v) = &self.title {
            collection.title = v.trim().to_string();
        }
        if let Some(v) = &self.description {
            collection.description = Some(v.clone());
        }
        if let Some(v) = &self.cover_image_url {
            collection.cover_image_url = Some(v.clone());
        }
        if let Some(v) = &self.category {
            collection.category = Some(v.clone());
        }
        if let Some(v) = &self.activation_ids {
            collection.activation_ids = v.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewActivation {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub trigger_image_url: String,
    pub video_url: String,
    pub external_link: Option<LinkDraft>,
}

impl NewActivation {
    pub fn validate(&self) -> Result<()> {
        require("user_id", &self.user_id)?;
        require("title", &self.title)?;
        require("trigger_image_url", &self.trigger_image_url)?;
        require("video_url", &self.video_url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trigger_image_url: Option<String>,
    pub video_url: Option<String>,
    pub external_link: Option<LinkDraft>,
}

impl ActivationUpdate {
    pub fn validate(&self) -> Result<()> {
        check_optional("title", &self.title)?;
        check_optional("trigger_image_url", &self.trigger_image_url)?;
        check_optional("video_url", &self.video_url)
    }

    pub fn apply_to(&self, activation: &mut Activation) {
        if let Some(v) = &self.title {
            activation.title = v.trim().to_string();
        }
        if let Some(v) = &self.description {
            activation.description = Some(v.clone());
        }
        if let Some(v) = &self.trigger_image_url {
            activation.trigger_image_url = v.clone();
        }
        if let Some(v) = &self.video_url {
            activation.video_url = v.clone();
        }
    }
}

/// Leaderboard rows shown on the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardCategory {
    Users,
    Scans,
    Views,
    Collections,
    Activations,
}

impl LeaderboardCategory {
    pub const ALL: &'static [LeaderboardCategory] = &[
        LeaderboardCategory::Users,
        LeaderboardCategory::Scans,
        LeaderboardCategory::Views,
        LeaderboardCategory::Collections,
        LeaderboardCategory::Activations,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            LeaderboardCategory::Users => "Most Users",
            LeaderboardCategory::Scans => "Most Scans",
            LeaderboardCategory::Views => "Most Views",
            LeaderboardCategory::Collections => "Most Collections",
            LeaderboardCategory::Activations => "Most Activations",
        }
    }

    /// Unit shown under the winning value.
    pub fn unit(&self) -> &'static str {
        match self {
            LeaderboardCategory::Users => "users",
            LeaderboardCategory::Scans => "scans",
            LeaderboardCategory::Views => "views",
            LeaderboardCategory::Collections => "collections",
            LeaderboardCategory::Activations => "activations",
        }
    }

    pub fn value(&self, partner: &Partner) -> u64 {
        match self {
            LeaderboardCategory::Users => partner.users_count,
            LeaderboardCategory::Scans => partner.engagement.scans_count,
            LeaderboardCategory::Views => partner.engagement.views_count,
            LeaderboardCategory::Collections => partner.engagement.collections_count,
            LeaderboardCategory::Activations => partner.engagement.activations_count,
        }
    }
}

/// Partner with the highest value in a category. Ties go to the earliest.
pub fn top_partner(partners: &[Partner], category: LeaderboardCategory) -> Option<&Partner> {
    partners.iter().reduce(|best, p| {
        if category.value(p) > category.value(best) {
            p
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn partner(id: &str, company: &str, users: u64, scans: u64) -> Partner {
        Partner {
            id: id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            company_name: company.to_string(),
            description: String::new(),
            username: company.to_lowercase(),
            email: "ada@example.com".to_string(),
            logo_url: None,
            managers_count: 1,
            users_count: users,
            engagement: Engagement {
                scans_count: scans,
                ..Engagement::default()
            },
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_partner_flat_json() {
        let value = json!({
            "id": "p11",
            "first_name": "Sarah",
            "last_name": "Chen",
            "company_name": "TechVision Solutions",
            "username": "techvision",
            "users_count": 175,
            "scans_count": 130,
            "created_at": "2025-03-01T00:00:00Z",
        });

        let p: Partner = serde_json::from_value(value).unwrap();
        assert_eq!(p.users_count, 175);
        assert_eq!(p.engagement.scans_count, 130);
        assert_eq!(p.engagement.likes_count, 0);
        assert!(p.is_active);
        assert_eq!(p.initial(), 'T');
        assert!(p.matches("vision"));
        assert!(p.matches("sarah chen"));
        assert!(!p.matches("quantum"));
    }

    #[test]
    fn test_partner_table_columns() {
        let value = json!({
            "id": "p12",
            "user_id": "auth-1",
            "first_name": "Marcus",
            "last_name": "Rodriguez",
            "company_name": "EcoSmart Industries",
            "company_description": "Sustainable packaging",
            "avatar_url": "https://cdn.example.com/eco.png",
            "username": "ecosmart",
            "social_links": {},
            "created_at": "2025-03-01T00:00:00Z",
            "updated_at": "2025-03-02T00:00:00Z",
        });

        let p: Partner = serde_json::from_value(value).unwrap();
        assert_eq!(p.description, "Sustainable packaging");
        assert_eq!(p.logo_url.as_deref(), Some("https://cdn.example.com/eco.png"));
        assert!(p.email.is_empty());

        let value = json!({
            "id": "p13",
            "first_name": "Lena",
            "last_name": "Park",
            "company_name": "Northwind",
            "company_description": null,
            "avatar_url": null,
            "username": "northwind",
            "created_at": "2025-03-01T00:00:00Z",
        });
        let p: Partner = serde_json::from_value(value).unwrap();
        assert!(p.description.is_empty());
        assert!(p.logo_url.is_none());
    }

    #[test]
    fn test_collection_null_activation_ids() {
        let value = json!({
            "id": "c1",
            "user_id": "u1",
            "title": "Spring",
            "activation_ids": null,
            "external_link": null,
            "created_at": "2025-03-01T00:00:00Z",
            "updated_at": "2025-03-01T00:00:00Z",
        });

        let c: Collection = serde_json::from_value(value).unwrap();
        assert!(c.activation_ids.is_empty());
        assert!(c.external_link.is_none());
    }

    #[test]
    fn test_overall_metrics_names() {
        let m: OverallMetrics =
            serde_json::from_value(json!({"partners_count": 3, "collection_views": 9})).unwrap();
        assert_eq!(m.partners, 3);
        assert_eq!(m.collection_views, 9);
        assert_eq!(m.entries()[0], ("Partners", 3));
        assert_eq!(m.entries()[5], ("Collection Views", 9));
    }

    #[test]
    fn test_partner_draft_validation() {
        let mut draft = NewPartner {
            first_name: "Sarah".to_string(),
            last_name: "Chen".to_string(),
            company_name: "TechVision".to_string(),
            username: "techvision".to_string(),
            email: "sarah@techvision.io".to_string(),
            ..NewPartner::default()
        };
        assert!(draft.validate().is_ok());

        draft.email = "sarah.techvision.io".to_string();
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));

        draft.email = "sarah@techvision.io".to_string();
        draft.company_name = "   ".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_collection_title_required() {
        let draft = NewCollection {
            user_id: "u1".to_string(),
            title: "  ".to_string(),
            ..NewCollection::default()
        };
        assert!(draft.validate().is_err());

        let update = CollectionUpdate {
            title: Some(String::new()),
            ..CollectionUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_activation_requires_media() {
        let draft = NewActivation {
            user_id: "u1".to_string(),
            title: "Poster".to_string(),
            trigger_image_url: "https://cdn/x.jpg".to_string(),
            ..NewActivation::default()
        };
        assert!(draft.validate().is_err());

        let draft = NewActivation {
            video_url: "https://cdn/x.mp4".to_string(),
            ..draft
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_link_draft_completeness() {
        assert!(LinkDraft::new("Shop", "https://shop").is_complete());
        assert!(!LinkDraft::new("Shop", "").is_complete());
        assert!(!LinkDraft::new("", "https://shop").is_complete());
    }

    #[test]
    fn test_partner_update_toggles_active() {
        let mut p = partner("p1", "Acme", 1, 1);
        PartnerUpdate::active(false).apply_to(&mut p);
        assert!(!p.is_active);
        assert_eq!(p.company_name, "Acme");
    }

    #[test]
    fn test_top_partner() {
        let partners = vec![
            partner("p1", "Acme", 10, 50),
            partner("p2", "Globex", 30, 20),
            partner("p3", "Initech", 30, 5),
        ];

        let top = top_partner(&partners, LeaderboardCategory::Users).unwrap();
        assert_eq!(top.id, "p2");
        let top = top_partner(&partners, LeaderboardCategory::Scans).unwrap();
        assert_eq!(top.id, "p1");
        assert!(top_partner(&[], LeaderboardCategory::Views).is_none());
    }

    #[test]
    fn test_user_display_name() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "partner_id": "p11",
            "first_name": "User",
            "last_name": "1",
            "username": "user1",
            "created_at": "2025-03-01T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(user.display_name(), "User 1");
        assert_eq!(user.social_links, SocialLinks::default());
    }
}
