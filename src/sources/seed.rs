use crate::models::{Category, Media, PropertyRecord, Status};
use crate::sources::traits::PropertySource;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

/// Built-in demonstration portfolio, used when no backend is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedSource;

#[async_trait]
impl PropertySource for SeedSource {
    async fn load(&self) -> Result<Vec<PropertyRecord>> {
        info!("📋 Using built-in seed portfolio");
        Ok(seed_records())
    }

    fn source_name(&self) -> &'static str {
        "seed"
    }
}

fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn photo(id: &str, unsplash_id: &str) -> Vec<Media> {
    vec![Media::new(
        id,
        format!(
            "https://images.unsplash.com/photo-{}?w=1200&h=720&fit=crop",
            unsplash_id
        ),
    )]
}

/// The six Conakry properties shown on the manager dashboard
pub fn seed_records() -> Vec<PropertyRecord> {
    vec![
        PropertyRecord {
            id: "b-1001".to_string(),
            address: "Villa moderne avec piscine, Kaloum, Conakry".to_string(),
            category: Category::House,
            status: Status::Rented,
            monthly_rent: Some(2_500_000.0),
            owner_name: Some("Mr. Camara".to_string()),
            occupancy_percent: Some(100.0),
            surface_area_sqm: Some(180.0),
            bedroom_count: Some(4),
            floor_number: Some(2),
            description: Some(
                "Villa lumineuse avec jardin, piscine et garage 2 places.".to_string(),
            ),
            photos: photo("p1", "1600596542815-ffad4c1539a9"),
            floor_plans: vec![],
            created_at: at("2024-10-01T12:00:00Z"),
            updated_at: at("2024-11-01T12:00:00Z"),
        },
        PropertyRecord {
            id: "b-1002".to_string(),
            address: "Appartement haut standing, Dixinn, Conakry".to_string(),
            category: Category::Apartment,
            status: Status::Vacant,
            monthly_rent: Some(1_800_000.0),
            owner_name: Some("Mme. Bah".to_string()),
            occupancy_percent: Some(0.0),
            surface_area_sqm: Some(120.0),
            bedroom_count: Some(3),
            floor_number: Some(5),
            description: Some(
                "Appartement vue mer, résidence sécurisée avec ascenseur.".to_string(),
            ),
            photos: photo("p2", "1600607687939-ce8a6c25118c"),
            floor_plans: vec![],
            created_at: at("2024-09-20T10:00:00Z"),
            updated_at: at("2024-11-03T08:00:00Z"),
        },
        PropertyRecord {
            id: "b-1003".to_string(),
            address: "Bureau 120m² centre-ville, Matam".to_string(),
            category: Category::Office,
            status: Status::Rented,
            monthly_rent: Some(2_200_000.0),
            owner_name: Some("Itchoh Group".to_string()),
            occupancy_percent: Some(100.0),
            surface_area_sqm: Some(120.0),
            bedroom_count: None,
            floor_number: Some(8),
            description: Some(
                "Open space + 2 salles de réunion, climatisation centralisée.".to_string(),
            ),
            photos: photo("p3", "1497366216548-37526070297c"),
            floor_plans: vec![],
            created_at: at("2024-08-12T09:00:00Z"),
            updated_at: at("2024-10-30T14:00:00Z"),
        },
        PropertyRecord {
            id: "b-1004".to_string(),
            address: "Studio meublé, Sandervalia".to_string(),
            category: Category::Apartment,
            status: Status::Maintenance,
            monthly_rent: Some(1_000_000.0),
            owner_name: Some("SCI Sandervalia".to_string()),
            occupancy_percent: Some(75.0),
            surface_area_sqm: Some(45.0),
            bedroom_count: None,
            floor_number: None,
            description: Some(
                "Studio équipé, proche commodités. Travaux mineurs en cours.".to_string(),
            ),
            photos: photo("p4", "1600607687644-c7171b42498b"),
            floor_plans: vec![],
            created_at: at("2024-07-05T11:00:00Z"),
            updated_at: at("2024-11-05T11:00:00Z"),
        },
        PropertyRecord {
            id: "b-1005".to_string(),
            address: "Local commercial, Dixinn marché".to_string(),
            category: Category::Commercial,
            status: Status::Rented,
            monthly_rent: Some(2_200_000.0),
            owner_name: Some("Mme. Sylla".to_string()),
            occupancy_percent: Some(100.0),
            surface_area_sqm: Some(45.0),
            bedroom_count: None,
            floor_number: None,
            description: Some("Local en rez-de-chaussée, fort passage, vitrine 6m.".to_string()),
            photos: photo("p5", "1441986300917-64674bd600d8"),
            floor_plans: vec![],
            created_at: at("2024-06-01T08:00:00Z"),
            updated_at: at("2024-11-02T10:00:00Z"),
        },
        PropertyRecord {
            id: "b-1006".to_string(),
            address: "Entrepôt 200m², Ratoma".to_string(),
            category: Category::Warehouse,
            status: Status::Vacant,
            monthly_rent: Some(1_500_000.0),
            owner_name: Some("LogiStock SARL".to_string()),
            occupancy_percent: Some(0.0),
            surface_area_sqm: Some(200.0),
            bedroom_count: None,
            floor_number: None,
            description: Some("Entrepôt sécurisé, accès camions, proximité RN.".to_string()),
            photos: photo("p6", "1586528116311-ad8dd3c8310d"),
            floor_plans: vec![],
            created_at: at("2024-05-18T13:00:00Z"),
            updated_at: at("2024-10-28T16:00:00Z"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_loads_six_valid_records() {
        let records = SeedSource.load().await.unwrap();
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.validate().is_ok()));
        assert_eq!(records[0].created_at.to_rfc3339(), "2024-10-01T12:00:00+00:00");
    }
}
