//! Fixture records for the in-memory store.

use chrono::Utc;

use partnerdash_common::{Engagement, OverallMetrics, Partner, SocialLinks, User};

use crate::demo::DemoGenerator;

/// Number of generated fixture users, spread round-robin across partners.
pub const FIXTURE_USERS: usize = 20;

struct PartnerSeed {
    id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    company_name: &'static str,
    description: &'static str,
    username: &'static str,
    email: &'static str,
    logo_topic: &'static str,
    managers: u64,
    users: u64,
    // collections, activations, scans, likes, views
    engagement: [u64; 5],
}

const PARTNERS: &[PartnerSeed] = &[
    PartnerSeed {
        id: "p11",
        first_name: "Sarah",
        last_name: "Chen",
        company_name: "TechVision Solutions",
        description: "Pioneering AI-driven solutions for enterprise automation and digital transformation.",
        username: "techvision",
        email: "sarah.chen@techvision.io",
        logo_topic: "tech",
        managers: 8,
        users: 175,
        engagement: [90, 120, 130, 220, 250],
    },
    PartnerSeed {
        id: "p12",
        first_name: "Marcus",
        last_name: "Rodriguez",
        company_name: "EcoSmart Industries",
        description: "Sustainable manufacturing solutions for a greener tomorrow.",
        username: "ecosmart",
        email: "marcus@ecosmart.com",
        logo_topic: "green",
        managers: 12,
        users: 120,
        engagement: [110, 80, 190, 190, 180],
    },
    PartnerSeed {
        id: "p13",
        first_name: "Emma",
        last_name: "Thompson",
        company_name: "HealthPlus Medical",
        description: "Advanced healthcare technology solutions for modern medical facilities.",
        username: "healthplus",
        email: "emma.t@healthplus.med",
        logo_topic: "medical",
        managers: 15,
        users: 220,
        engagement: [150, 180, 220, 250, 220],
    },
    PartnerSeed {
        id: "p14",
        first_name: "Alexander",
        last_name: "Petrov",
        company_name: "Quantum Dynamics",
        description: "Cutting-edge quantum computing solutions for complex data processing.",
        username: "quantumdyn",
        email: "alex@quantumdynamics.tech",
        logo_topic: "quantum",
        managers: 6,
        users: 150,
        engagement: [80, 110, 150, 180, 120],
    },
    PartnerSeed {
        id: "p15",
        first_name: "Sophia",
        last_name: "Nakamura",
        company_name: "FoodTech Innovations",
        description: "Revolutionary food technology solutions for sustainable agriculture and smart kitchens.",
        username: "foodtech",
        email: "sophia@foodtech.io",
        logo_topic: "food",
        managers: 10,
        users: 195,
        engagement: [140, 160, 210, 280, 310],
    },
];

/// The five fixture partners.
pub fn partners() -> Vec<Partner> {
    let now = Utc::now();
    PARTNERS
        .iter()
        .map(|seed| {
            let [collections, activations, scans, likes, views] = seed.engagement;
            Partner {
                id: seed.id.to_string(),
                first_name: seed.first_name.to_string(),
                last_name: seed.last_name.to_string(),
                company_name: seed.company_name.to_string(),
                description: seed.description.to_string(),
                username: seed.username.to_string(),
                email: seed.email.to_string(),
                logo_url: Some(format!(
                    "https://source.unsplash.com/100x100/?{}",
                    seed.logo_topic
                )),
                managers_count: seed.managers,
                users_count: seed.users,
                engagement: Engagement {
                    collections_count: collections,
                    activations_count: activations,
                    scans_count: scans,
                    likes_count: likes,
                    views_count: views,
                },
                is_active: true,
                created_at: now,
            }
        })
        .collect()
}

/// Fixture users with random engagement, assigned round-robin to `partners`.
pub fn users(partners: &[Partner], generator: &mut DemoGenerator) -> Vec<User> {
    if partners.is_empty() {
        return Vec::new();
    }

    let now = Utc::now();
    (0..FIXTURE_USERS)
        .map(|i| {
            let n = i + 1;
            User {
                id: format!("u{n}"),
                partner_id: partners[i % partners.len()].id.clone(),
                first_name: "User".to_string(),
                last_name: n.to_string(),
                username: format!("user{n}"),
                email: format!("user{n}@example.com"),
                avatar_url: Some(format!(
                    "https://source.unsplash.com/100x100/?portrait&sig={i}"
                )),
                social_links: SocialLinks::default(),
                engagement: Engagement {
                    collections_count: generator.count(5..30),
                    activations_count: generator.count(10..40),
                    scans_count: generator.count(15..55),
                    likes_count: generator.count(20..70),
                    views_count: generator.count(25..85),
                },
                is_active: true,
                created_at: now,
            }
        })
        .collect()
}

/// Random platform totals for the overview cards.
pub fn overall_metrics(generator: &mut DemoGenerator) -> OverallMetrics {
    OverallMetrics {
        partners: generator.count(20..70),
        users: generator.count(100..350),
        collections: generator.count(200..700),
        activations: generator.count(300..1100),
        scans: generator.count(400..1300),
        collection_views: generator.count(450..1400),
        activation_views: generator.count(400..1300),
        likes: generator.count(350..1200),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_fixtures() {
        let partners = partners();
        assert_eq!(partners.len(), 5);
        assert_eq!(partners[0].company_name, "TechVision Solutions");
        assert_eq!(partners[4].engagement.views_count, 310);
        assert!(partners.iter().all(|p| p.is_active));
    }

    #[test]
    fn test_users_round_robin() {
        let partners = partners();
        let users = users(&partners, &mut DemoGenerator::with_seed(1));

        assert_eq!(users.len(), FIXTURE_USERS);
        for partner in &partners {
            assert_eq!(users.iter().filter(|u| u.partner_id == partner.id).count(), 4);
        }
        assert_eq!(users[5].partner_id, "p11");
        for user in &users {
            assert!((5..30).contains(&user.engagement.collections_count));
            assert!((25..85).contains(&user.engagement.views_count));
        }
    }

    #[test]
    fn test_users_without_partners() {
        assert!(users(&[], &mut DemoGenerator::with_seed(1)).is_empty());
    }

    #[test]
    fn test_overall_metric_ranges() {
        let metrics = overall_metrics(&mut DemoGenerator::with_seed(9));
        assert!((20..70).contains(&metrics.partners));
        assert!((100..350).contains(&metrics.users));
        assert!((350..1200).contains(&metrics.likes));
    }
}
