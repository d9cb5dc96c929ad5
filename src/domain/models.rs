use serde::{Deserialize, Serialize};

/// A validated geographic position.
///
/// Construction goes through [`Coordinates::new`], which rejects
/// non-finite values, so any `Coordinates` held by an entity can be
/// handed to the map widget as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Builds coordinates from raw latitude/longitude, returning `None`
    /// when either component is NaN or infinite.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() {
            Some(Self { lat, lon })
        } else {
            None
        }
    }
}

/// A directory listing with contact info and an optional position.
///
/// Immutable after catalog load. Entities without coordinates are
/// valid; they simply never appear on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub image: String,
    pub featured: bool,
    pub coords: Option<Coordinates>,
}

/// The in-memory business catalog, ordered as loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub businesses: Vec<Business>,
}

impl Catalog {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self { businesses }
    }

    pub fn get(&self, id: u32) -> Option<&Business> {
        self.businesses.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }

    /// Distinct categories in first-seen order, used to build the
    /// category filter row.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for business in &self.businesses {
            if !seen.contains(&business.category.as_str()) {
                seen.push(business.category.as_str());
            }
        }
        seen
    }
}

/// Active filter state: case-insensitive search text plus an optional
/// category restriction (`None` means all categories).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<String>,
}

impl FilterCriteria {
    pub fn with_search(search: &str) -> Self {
        Self {
            search: search.to_string(),
            category: None,
        }
    }

    pub fn with_category(category: &str) -> Self {
        Self {
            search: String::new(),
            category: Some(category.to_string()),
        }
    }
}

/// A reader comment attached to an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub email: String,
    pub text: String,
}

/// A news article shown in the paginated articles view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub full_content: String,
    pub image: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub comments: Vec<Comment>,
}
