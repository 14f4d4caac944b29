use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantData {
    pub name: String,
    pub description: String,
    pub address: String,
    /// average score in [0, 5]
    pub rating: f64,
    /// display label, e.g. "1000+"
    pub review_count: String,
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    /// Not clamped here. Renderers must clamp to the 5 star slots.
    pub rating: i32,
    pub text: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// pre-formatted, currency sign included
    pub price: &'static str,
    /// url to image
    pub image: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
}

impl MenuItem {
    pub fn is_popular(&self) -> bool {
        self.popular.unwrap_or(false)
    }
}
