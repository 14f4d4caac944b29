//! Hand-authored restaurant record, served whenever live enrichment is off or broken.

use crate::data::{RestaurantData, Review};
use once_cell::sync::Lazy;

pub static FALLBACK_DATA: Lazy<RestaurantData> = Lazy::new(|| {
    let review = |author: &str, rating, text: &str| Review {
        author: author.to_string(),
        rating,
        text: text.to_string(),
        source: "Google Maps".to_string(),
    };

    RestaurantData {
        name: "Ortaköy Mantı Evi".to_string(),
        description: "Located in the historic heart of Istanbul, Ortaköy Mantı Evi serves the most authentic Turkish dumplings (Mantı), prepared with traditional recipes passed down through generations.".to_string(),
        address: "Ortaköy, İstanbul, Turkey".to_string(),
        rating: 4.5,
        review_count: "1000+".to_string(),
        reviews: vec![
            review("Local Guide", 5, "The best mantı in Istanbul! The sauce is incredible."),
            review("Visitor", 5, "A cozy place with authentic vibes. The fried mantı is a must-try."),
            review("Foodie", 4, "Great atmosphere and delicious food right near the Bosphorus."),
        ],
        google_maps_uri: Some(
            "https://www.google.com/maps/place/Ortak%C3%B6y+Mant%C4%B1+Evi/@41.0544475,29.019425,17z"
                .to_string(),
        ),
    }
});

#[test]
fn test_fallback_is_well_formed() {
    let data = &*FALLBACK_DATA;
    assert!(!data.name.is_empty());
    assert!((0.0..=5.0).contains(&data.rating));
    assert_eq!(data.reviews.len(), 3);
    assert!(data.reviews.iter().all(|r| (0..=5).contains(&r.rating)));
    assert!(data.google_maps_uri.is_some());
}

#[test]
fn test_fallback_json_uses_camel_case() {
    let json = serde_json::to_value(&*FALLBACK_DATA).unwrap();
    assert_eq!(json["reviewCount"], "1000+");
    assert!(json["googleMapsUri"].as_str().unwrap().contains("maps"));
    assert_eq!(json["reviews"][2]["author"], "Foodie");
}
