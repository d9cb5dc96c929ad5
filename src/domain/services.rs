//! Pure directory services: filtering, pagination, comment validation,
//! and the CSV export used by the directory views.
//!
//! Everything in this module is side-effect free. The application layer
//! calls these services on every relevant UI event and re-renders from
//! the returned data.

use super::errors::{DomainError, DomainResult};
use super::models::{Article, Business, Catalog, Comment, FilterCriteria};

/// Derives the visible subset of the catalog from the active filter.
///
/// The engine borrows the catalog and never mutates it. Results keep
/// catalog insertion order and are recomputed from scratch on each
/// call; filtering is cheap enough to run per keystroke.
///
/// A business is visible when its category matches the criteria (or no
/// category restriction is set) and the search text, lowercased, is a
/// substring of its name or address. Empty search text matches
/// everything.
///
/// # Examples
///
/// ```
/// use vitrina::domain::{builtin_catalog, FilterCriteria, FilterEngine};
///
/// let catalog = builtin_catalog();
/// let engine = FilterEngine::new(&catalog);
///
/// let all = engine.visible(&FilterCriteria::default());
/// assert_eq!(all.len(), catalog.len());
///
/// let hits = engine.visible(&FilterCriteria::with_search("miqueles"));
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Miqueles Boutique");
/// ```
pub struct FilterEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> FilterEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Returns the businesses matching `criteria`, in catalog order.
    pub fn visible(&self, criteria: &FilterCriteria) -> Vec<&'a Business> {
        self.catalog
            .businesses
            .iter()
            .filter(|business| Self::matches(business, criteria))
            .collect()
    }

    /// Checks a single business against the criteria.
    pub fn matches(business: &Business, criteria: &FilterCriteria) -> bool {
        let matches_category = criteria
            .category
            .as_deref()
            .map(|category| business.category == category)
            .unwrap_or(true);

        let query = criteria.search.to_lowercase();
        let matches_search = query.is_empty()
            || business.name.to_lowercase().contains(&query)
            || business.address.to_lowercase().contains(&query);

        matches_category && matches_search
    }
}

/// Fixed-size pagination over an ordered list.
///
/// Pages are one-based. The current page is clamped into
/// `[1, total_pages]` whenever the total changes, so removing items
/// never leaves the view pointing past the end.
///
/// # Examples
///
/// ```
/// use vitrina::domain::Paginator;
///
/// let paginator = Paginator::new(4);
/// assert_eq!(paginator.total_pages(4), 1);
/// assert_eq!(paginator.total_pages(5), 2);
///
/// let items: Vec<u32> = (0..5).collect();
/// assert_eq!(paginator.page_slice(&items, 2), &[4]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator with the given page size (must be nonzero).
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be nonzero");
        Self { page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` items. An empty list still has one
    /// (empty) page so the view always has a valid current page.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Clamps a one-based page number into range for `total` items.
    pub fn clamp_page(&self, page: usize, total: usize) -> usize {
        page.clamp(1, self.total_pages(total))
    }

    /// The slice of `items` shown on `page` (one-based, clamped).
    pub fn page_slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let page = self.clamp_page(page, items.len());
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Validates comment fields and builds the comment to append.
///
/// All three fields must be non-empty after trimming; the first empty
/// field is reported. The stored comment keeps the trimmed values.
pub fn validate_comment(name: &str, email: &str, text: &str) -> DomainResult<Comment> {
    let name = name.trim();
    let email = email.trim();
    let text = text.trim();

    if name.is_empty() {
        return Err(DomainError::EmptyField("name"));
    }
    if email.is_empty() {
        return Err(DomainError::EmptyField("email"));
    }
    if text.is_empty() {
        return Err(DomainError::EmptyField("comment"));
    }

    Ok(Comment {
        name: name.to_string(),
        email: email.to_string(),
        text: text.to_string(),
    })
}

/// Appends a validated comment to the article with `article_id`.
///
/// Validation failures leave the article list untouched.
pub fn append_comment(
    articles: &mut [Article],
    article_id: u32,
    name: &str,
    email: &str,
    text: &str,
) -> DomainResult<()> {
    let comment = validate_comment(name, email, text)?;
    let article = articles
        .iter_mut()
        .find(|a| a.id == article_id)
        .ok_or(DomainError::UnknownArticle(article_id))?;
    article.comments.push(comment);
    Ok(())
}

/// Escapes `&`, `<`, `>` and `"` so entity-supplied text is safe to
/// embed in popup markup.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Writes business listings to a CSV file.
pub struct CsvExporter;

impl CsvExporter {
    /// Exports the given (already filtered) listings to `filename`.
    ///
    /// # Returns
    ///
    /// The filename on success, or an error message suitable for the
    /// status bar.
    pub fn export_businesses(businesses: &[&Business], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        writer
            .write_record([
                "id", "name", "category", "phone", "email", "address", "featured", "lat", "lon",
            ])
            .map_err(|e| e.to_string())?;

        for business in businesses {
            let (lat, lon) = match business.coords {
                Some(coords) => (coords.lat.to_string(), coords.lon.to_string()),
                None => (String::new(), String::new()),
            };
            writer
                .write_record([
                    business.id.to_string(),
                    business.name.clone(),
                    business.category.clone(),
                    business.phone.clone(),
                    business.email.clone(),
                    business.address.clone(),
                    business.featured.to_string(),
                    lat,
                    lon,
                ])
                .map_err(|e| e.to_string())?;
        }

        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Coordinates;
    use crate::domain::seed::{builtin_articles, builtin_catalog};

    fn business(id: u32, name: &str, category: &str, address: &str) -> Business {
        Business {
            id,
            name: name.to_string(),
            category: category.to_string(),
            phone: String::new(),
            email: String::new(),
            address: address.to_string(),
            image: String::new(),
            featured: false,
            coords: Coordinates::new(-35.0, -71.2),
        }
    }

    #[test]
    fn test_empty_criteria_returns_whole_catalog() {
        let catalog = builtin_catalog();
        let engine = FilterEngine::new(&catalog);

        let visible = engine.visible(&FilterCriteria::default());
        assert_eq!(visible.len(), catalog.len());
        let ids: Vec<u32> = visible.iter().map(|b| b.id).collect();
        let expected: Vec<u32> = catalog.businesses.iter().map(|b| b.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_filter_is_pure_and_idempotent() {
        let catalog = builtin_catalog();
        let engine = FilterEngine::new(&catalog);
        let criteria = FilterCriteria::with_search("curicó");

        let first: Vec<u32> = engine.visible(&criteria).iter().map(|b| b.id).collect();
        let second: Vec<u32> = engine.visible(&criteria).iter().map(|b| b.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_and_address() {
        let catalog = Catalog::new(vec![
            business(1, "Panadería Sol", "Alimentos", "Calle Larga 10"),
            business(2, "Ferretería Luna", "Hogar", "Avenida SOL 99"),
            business(3, "Otro", "Hogar", "Pasaje Corto 5"),
        ]);
        let engine = FilterEngine::new(&catalog);

        let hits = engine.visible(&FilterCriteria::with_search("SoL"));
        let ids: Vec<u32> = hits.iter().map(|b| b.id).collect();
        // Matches by name (1) and by address (2), catalog order kept.
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let catalog = Catalog::new(vec![
            business(1, "Panadería Sol", "Alimentos", "Calle Larga 10"),
            business(2, "Ferretería Luna", "Hogar", "Avenida Sol 99"),
        ]);
        let engine = FilterEngine::new(&catalog);

        let criteria = FilterCriteria {
            search: "sol".to_string(),
            category: Some("Hogar".to_string()),
        };
        let ids: Vec<u32> = engine.visible(&criteria).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2]);

        let only = engine.visible(&FilterCriteria::with_category("Alimentos"));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].id, 1);
    }

    #[test]
    fn test_single_entity_example() {
        let catalog = Catalog::new(vec![business(
            3,
            "Miqueles Boutique",
            "Venta de productos",
            "O'Higgins 487, Curicó",
        )]);
        let engine = FilterEngine::new(&catalog);

        let hits = engine.visible(&FilterCriteria::with_search("bout"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);

        assert!(engine.visible(&FilterCriteria::with_search("zzz")).is_empty());
    }

    #[test]
    fn test_pagination_boundaries() {
        let paginator = Paginator::new(4);

        assert_eq!(paginator.total_pages(0), 1);
        assert_eq!(paginator.total_pages(4), 1);
        assert_eq!(paginator.total_pages(5), 2);

        let five: Vec<u32> = (1..=5).collect();
        assert_eq!(paginator.page_slice(&five, 1), &[1, 2, 3, 4]);
        assert_eq!(paginator.page_slice(&five, 2), &[5]);
        // Out-of-range pages clamp instead of panicking.
        assert_eq!(paginator.page_slice(&five, 9), &[5]);
        assert_eq!(paginator.clamp_page(0, 5), 1);
        assert_eq!(paginator.clamp_page(3, 5), 2);
    }

    #[test]
    fn test_page_slices_preserve_order() {
        let paginator = Paginator::new(2);
        let items: Vec<u32> = (10..16).collect();

        let mut seen = Vec::new();
        for page in 1..=paginator.total_pages(items.len()) {
            seen.extend_from_slice(paginator.page_slice(&items, page));
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_comment_validation_rejects_empty_fields() {
        assert_eq!(
            validate_comment("", "a@b.cl", "Hola"),
            Err(DomainError::EmptyField("name"))
        );
        assert_eq!(
            validate_comment("Ana", "   ", "Hola"),
            Err(DomainError::EmptyField("email"))
        );
        assert_eq!(
            validate_comment("Ana", "a@b.cl", "\t"),
            Err(DomainError::EmptyField("comment"))
        );
    }

    #[test]
    fn test_comment_validation_trims() {
        let comment = validate_comment("  Ana ", " a@b.cl ", " Muy buen dato ").unwrap();
        assert_eq!(comment.name, "Ana");
        assert_eq!(comment.email, "a@b.cl");
        assert_eq!(comment.text, "Muy buen dato");
    }

    #[test]
    fn test_append_comment_success_and_failure() {
        let mut articles = builtin_articles();

        // Rejected submissions leave the list untouched.
        assert!(append_comment(&mut articles, 1, "", "a@b.cl", "Hola").is_err());
        assert!(articles[0].comments.is_empty());

        append_comment(&mut articles, 1, "Ana", "a@b.cl", "Primera").unwrap();
        append_comment(&mut articles, 1, "Beto", "b@c.cl", "Segunda").unwrap();
        assert_eq!(articles[0].comments.len(), 2);
        assert_eq!(articles[0].comments[0].text, "Primera");
        assert_eq!(articles[0].comments[1].text, "Segunda");

        assert_eq!(
            append_comment(&mut articles, 99, "Ana", "a@b.cl", "Hola"),
            Err(DomainError::UnknownArticle(99))
        );
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup(r#"Café "El Rincón" <& Cía>"#),
            "Café &quot;El Rincón&quot; &lt;&amp; Cía&gt;"
        );
        assert_eq!(escape_markup("sin cambios"), "sin cambios");
    }
}
