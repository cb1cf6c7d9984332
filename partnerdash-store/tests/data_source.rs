//! Store behavior exercised through the `DataSource` trait object.

use std::sync::Arc;

use partnerdash_common::{
    ActivationUpdate, CollectionUpdate, DashboardConfig, LinkDraft, NewActivation,
    NewCollection, NewPartner, NewUser, PartnerUpdate, UserUpdate,
};
use partnerdash_store::{Bucket, DataSource, MediaUpload, MemoryStore, SeriesScope, StoreError};

fn store() -> Arc<dyn DataSource> {
    Arc::new(MemoryStore::with_seed(5))
}

fn new_partner(company: &str) -> NewPartner {
    NewPartner {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        company_name: company.to_string(),
        description: "Analytical engines".to_string(),
        username: company.to_lowercase(),
        email: "ada@example.com".to_string(),
        logo_url: None,
    }
}

#[tokio::test]
async fn test_connect_defaults_to_memory() {
    let store = partnerdash_store::connect(&DashboardConfig::default()).unwrap();
    assert_eq!(store.backend_tag(), "memory");
    assert_eq!(store.list_partners().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_partner_appears_in_order() {
    let store = store();
    let created = store.create_partner(new_partner("Acme Robotics")).await.unwrap();

    let partners = store.list_partners().await.unwrap();
    assert_eq!(partners.len(), 6);
    assert_eq!(partners[0].id, created.id);
    assert!(created.is_active);
}

#[tokio::test]
async fn test_invalid_partner_rejected() {
    let store = store();
    let mut draft = new_partner("Acme");
    draft.email = "not-an-email".to_string();

    let err = store.create_partner(draft).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.list_partners().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_toggle_partner_active() {
    let store = store();
    let updated = store
        .update_partner("p13", PartnerUpdate::active(false))
        .await
        .unwrap();
    assert!(!updated.is_active);

    let partners = store.list_partners().await.unwrap();
    let p13 = partners.iter().find(|p| p.id == "p13").unwrap();
    assert!(!p13.is_active);
    assert_eq!(p13.company_name, "HealthPlus Medical");

    let err = store
        .update_partner("p99", PartnerUpdate::active(true))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_users_scoped_to_partner() {
    let store = store();
    let users = store.list_users("p12").await.unwrap();
    assert_eq!(users.len(), 4);
    assert!(users.iter().all(|u| u.partner_id == "p12"));

    let created = store
        .create_user(NewUser {
            partner_id: "p12".to_string(),
            first_name: "Aaron".to_string(),
            last_name: "Park".to_string(),
            username: "apark".to_string(),
            email: "aaron@example.com".to_string(),
            ..NewUser::default()
        })
        .await
        .unwrap();

    let users = store.list_users("p12").await.unwrap();
    assert_eq!(users.len(), 5);
    assert_eq!(users[0].id, created.id, "sorted by first name");

    let toggled = store
        .update_user(&created.id, UserUpdate::active(false))
        .await
        .unwrap();
    assert!(!toggled.is_active);
}

#[tokio::test]
async fn test_user_for_unknown_partner() {
    let store = store();
    let err = store
        .create_user(NewUser {
            partner_id: "nope".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            username: "ab".to_string(),
            email: "ab@example.com".to_string(),
            ..NewUser::default()
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_collection_lifecycle() {
    let store = store();
    let first = store
        .create_collection(NewCollection {
            user_id: "u1".to_string(),
            title: "  Spring Drop  ".to_string(),
            category: Some("Fashion".to_string()),
            external_link: Some(LinkDraft::new("Shop", "https://shop.example.com")),
            ..NewCollection::default()
        })
        .await
        .unwrap();
    assert_eq!(first.title, "Spring Drop");
    assert_eq!(first.external_link.as_ref().unwrap().title, "Shop");

    let second = store
        .create_collection(NewCollection {
            user_id: "u1".to_string(),
            title: "Summer".to_string(),
            ..NewCollection::default()
        })
        .await
        .unwrap();

    let listed = store.list_collections("u1").await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id, "newest first");
    assert!(store.list_collections("u2").await.unwrap().is_empty());

    let updated = store
        .update_collection(
            &second.id,
            CollectionUpdate {
                title: Some("Summer Drop".to_string()),
                activation_ids: Some(vec!["a1".to_string()]),
                ..CollectionUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Summer Drop");
    assert_eq!(updated.activation_ids, vec!["a1"]);
    assert!(updated.updated_at >= updated.created_at);

    store.delete_collection(&first.id).await.unwrap();
    let listed = store.list_collections("u1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(store.delete_collection(&first.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_blank_collection_title_rejected() {
    let store = store();
    let err = store
        .create_collection(NewCollection {
            user_id: "u1".to_string(),
            title: "   ".to_string(),
            ..NewCollection::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn test_activation_lifecycle() {
    let store = store();
    let draft = NewActivation {
        user_id: "u3".to_string(),
        title: "Poster".to_string(),
        description: Some("Lobby poster".to_string()),
        trigger_image_url: "memory://images/poster.jpg".to_string(),
        video_url: "memory://videos/poster.mp4".to_string(),
        external_link: None,
    };
    let created = store.create_activation(draft.clone()).await.unwrap();
    assert!(created.external_link.is_none());

    let updated = store
        .update_activation(
            &created.id,
            ActivationUpdate {
                external_link: Some(LinkDraft::new("Tickets", "https://tickets.example.com")),
                ..ActivationUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.external_link.unwrap().url, "https://tickets.example.com");

    let missing_video = NewActivation {
        video_url: String::new(),
        ..draft
    };
    assert!(store.create_activation(missing_video).await.is_err());

    store.delete_activation(&created.id).await.unwrap();
    assert!(store.list_activations("u3").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_metrics_and_series() {
    let store = store();
    let metrics = store.overall_metrics().await.unwrap();
    assert!(metrics.partners >= 20);

    let global = store.metric_series(SeriesScope::Global).await.unwrap();
    assert_eq!(global.len(), 366);
    assert_eq!(
        global.metric_names(),
        vec!["activations", "collections", "likes", "partners", "scans", "users", "views"]
    );

    let again = store.metric_series(SeriesScope::Global).await.unwrap();
    assert_eq!(global, again);
}

#[tokio::test]
async fn test_concurrent_series_requests_agree() {
    let store = store();
    let a = tokio::spawn({
        let store = store.clone();
        async move { store.metric_series(SeriesScope::Partner("p14".into())).await }
    });
    let b = tokio::spawn({
        let store = store.clone();
        async move { store.metric_series(SeriesScope::Partner("p14".into())).await }
    });

    let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_image_upload_is_reencoded() {
    let store = Arc::new(MemoryStore::with_seed(1));
    let png = {
        let img = image_png(40, 20);
        MediaUpload::new("cover.png", "image/png", img)
    };

    let url = store.upload(Bucket::Images, png).await.unwrap();
    assert!(url.starts_with("memory://images/"));
    assert!(url.ends_with(".png"));
    assert_eq!(store.object(&url).unwrap().content_type, "image/jpeg");

    let err = store
        .upload(Bucket::Images, MediaUpload::new("clip.mp4", "video/mp4", vec![0; 8]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Media(_)));
}

/// Minimal valid PNG produced without extra dev-dependencies.
fn image_png(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageFormat, RgbImage};
    let img = RgbImage::from_pixel(width, height, image::Rgb([10, 200, 90]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
