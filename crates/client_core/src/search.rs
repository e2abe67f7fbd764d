//! Client-side search over the in-memory product collection.
//!
//! A row matches when at least one searchable attribute contains the query
//! as a case- and accent-insensitive substring. The fold applied to both
//! sides is [`shared::text::fold`].

use shared::{domain::Product, text::fold};

pub type FieldExtractor = fn(&Product) -> String;

/// Ordered list of searchable attributes. The dashboard search box has
/// always matched against every column of a row, including ones the table
/// does not display (identifier, wire codes); the list keeps that behavior
/// but makes the matched field set an explicit configuration.
pub const SEARCHABLE_FIELDS: &[(&str, FieldExtractor)] = &[
    ("id", |p| p.id.as_str().to_string()),
    ("name", |p| p.name.clone()),
    ("description", |p| p.description.clone()),
    ("category", |p| p.category.clone()),
    ("price", |p| p.price.to_string()),
    ("discount", |p| p.discount.to_string()),
    ("status", |p| p.status.label().to_string()),
    ("status_code", |p| p.status.code().to_string()),
    ("condition", |p| p.condition.label().to_string()),
    ("condition_code", |p| p.condition.code().to_string()),
    ("image", |p| p.image_url.clone().unwrap_or_default()),
];

pub fn matches(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = fold(query);
    SEARCHABLE_FIELDS
        .iter()
        .any(|(_, extract)| fold(&extract(product)).contains(&needle))
}

/// Filters the collection, preserving order. An empty query keeps every row.
pub fn filter<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| matches(product, query))
        .collect()
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
