use serde::{Deserialize, Serialize};

use crate::{
    domain::{ImageUpload, Product, ProductCondition, ProductId, ProductStatus},
    error::ApiError,
};

/// One product exactly as `GET /products` returns it. Field names follow
/// the backend document shape; `status` and `state` arrive as free strings
/// and are normalized into their enums by [`ProductRecord::into_product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    pub status: String,
    #[serde(rename = "state")]
    pub condition: String,
    #[serde(rename = "imgProduct", default)]
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// Boundary normalization: after this point the enumerated fields are
    /// never free text. Unknown spellings are a validation error rather
    /// than a silently kept string.
    pub fn into_product(self) -> Result<Product, ApiError> {
        let status = ProductStatus::parse(&self.status).ok_or_else(|| {
            ApiError::validation(format!(
                "produto {}: status desconhecido \"{}\"",
                self.id, self.status
            ))
        })?;
        let condition = ProductCondition::parse(&self.condition).ok_or_else(|| {
            ApiError::validation(format!(
                "produto {}: estado desconhecido \"{}\"",
                self.id, self.condition
            ))
        })?;
        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            discount: self.discount,
            status,
            condition,
            image_url: self.image_url,
        })
    }
}

/// Submission payload for `POST /products` and `PUT /products/{id}`.
/// Sent as a multipart form; the optional image travels as a file part.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub discount: f64,
    pub status: ProductStatus,
    pub condition: ProductCondition,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str, condition: &str) -> ProductRecord {
        ProductRecord {
            id: "66f0".into(),
            name: "Cadeira".into(),
            description: String::new(),
            category: "Móveis".into(),
            price: 100.0,
            discount: 0.0,
            status: status.into(),
            condition: condition.into(),
            image_url: None,
        }
    }

    #[test]
    fn normalizes_wire_codes() {
        let product = record("available", "semi-new").into_product().unwrap();
        assert_eq!(product.status, ProductStatus::Available);
        assert_eq!(product.condition, ProductCondition::SemiNew);
    }

    #[test]
    fn normalizes_display_labels() {
        let product = record("Disponível", "Com Avaria").into_product().unwrap();
        assert_eq!(product.status, ProductStatus::Available);
        assert_eq!(product.condition, ProductCondition::Damaged);
    }

    #[test]
    fn rejects_free_text() {
        let err = record("maybe", "new").into_product().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Validation);
    }

    #[test]
    fn decodes_backend_document_shape() {
        let raw = r#"{
            "_id": "1",
            "name": "Cadeira",
            "category": "Móveis",
            "price": 100,
            "status": "Disponível",
            "state": "new",
            "imgProduct": "https://cdn.example/1.jpg"
        }"#;
        let record: ProductRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.discount, 0.0);
        let product = record.into_product().unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.image_url.as_deref(), Some("https://cdn.example/1.jpg"));
    }
}
