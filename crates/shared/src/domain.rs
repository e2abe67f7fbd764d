use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::fold;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Available,
    Reserved,
    Sold,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [Self::Available, Self::Reserved, Self::Sold];

    /// Wire code as the backend stores it.
    pub fn code(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
        }
    }

    /// Display label shown in the product table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Disponível",
            Self::Reserved => "Reservado",
            Self::Sold => "Vendido",
        }
    }

    /// Accepts either the wire code or the display label, case- and
    /// accent-insensitively. The deployed backend emits both spellings.
    pub fn parse(value: &str) -> Option<Self> {
        let folded = fold(value);
        Self::ALL
            .into_iter()
            .find(|status| fold(status.code()) == folded || fold(status.label()) == folded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCondition {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "semi-new")]
    SemiNew,
    #[serde(rename = "little-used")]
    LittleUsed,
    #[serde(rename = "with-malfunction")]
    Damaged,
}

impl ProductCondition {
    pub const ALL: [ProductCondition; 4] =
        [Self::New, Self::SemiNew, Self::LittleUsed, Self::Damaged];

    pub fn code(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::SemiNew => "semi-new",
            Self::LittleUsed => "little-used",
            Self::Damaged => "with-malfunction",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "Novo",
            Self::SemiNew => "Semi Novo",
            Self::LittleUsed => "Pouco Usado",
            Self::Damaged => "Com Avaria",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let folded = fold(value);
        Self::ALL
            .into_iter()
            .find(|cond| fold(cond.code()) == folded || fold(cond.label()) == folded)
    }
}

/// One catalog item as held by the store after boundary normalization.
/// `id` is assigned by the backend and never reused; `image_url` is the
/// persisted side of the image reference (the pre-submission side is an
/// [`ImageUpload`] carried by a draft).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub discount: f64,
    pub status: ProductStatus,
    pub condition: ProductCondition,
    pub image_url: Option<String>,
}

/// Image payload selected locally but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Fixed, externally supplied ordered list of category labels. Read-only
/// for the core; it only populates selection controls.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    labels: Vec<String>,
}

impl CategoryCatalog {
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_code_and_label() {
        assert_eq!(ProductStatus::parse("available"), Some(ProductStatus::Available));
        assert_eq!(ProductStatus::parse("Disponível"), Some(ProductStatus::Available));
        assert_eq!(ProductStatus::parse("DISPONIVEL"), Some(ProductStatus::Available));
        assert_eq!(ProductStatus::parse("on-hold"), None);
    }

    #[test]
    fn condition_parses_code_and_label() {
        assert_eq!(ProductCondition::parse("semi-new"), Some(ProductCondition::SemiNew));
        assert_eq!(ProductCondition::parse("Semi Novo"), Some(ProductCondition::SemiNew));
        assert_eq!(
            ProductCondition::parse("com avaria"),
            Some(ProductCondition::Damaged)
        );
        assert_eq!(ProductCondition::parse(""), None);
    }
}
