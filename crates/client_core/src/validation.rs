//! Client-side form validation. Failures here are resolved inline on the
//! form and never reach the remote collaborator.

use shared::protocol::ProductDraft;

pub const NAME_REQUIRED: &str = "Nome do produto é obrigatório";
pub const CATEGORY_REQUIRED: &str = "Categoria é obrigatória";
pub const PRICE_REQUIRED: &str = "Preço é obrigatório";
pub const PRICE_NON_NEGATIVE: &str = "Preço deve ser maior ou igual a 0";
pub const DISCOUNT_NON_NEGATIVE: &str = "Desconto deve ser maior ou igual a 0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
    Price,
    Discount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: FormField, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub fn validate_draft(draft: &ProductDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if draft.name.trim().is_empty() {
        errors.push(FieldError::new(FormField::Name, NAME_REQUIRED));
    }
    if draft.category.trim().is_empty() {
        errors.push(FieldError::new(FormField::Category, CATEGORY_REQUIRED));
    }
    if !draft.price.is_finite() {
        errors.push(FieldError::new(FormField::Price, PRICE_REQUIRED));
    } else if draft.price < 0.0 {
        errors.push(FieldError::new(FormField::Price, PRICE_NON_NEGATIVE));
    }
    if !draft.discount.is_finite() || draft.discount < 0.0 {
        errors.push(FieldError::new(FormField::Discount, DISCOUNT_NON_NEGATIVE));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{ProductCondition, ProductStatus};

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Cadeira".into(),
            description: String::new(),
            category: "Móveis".into(),
            price: 100.0,
            discount: 0.0,
            status: ProductStatus::Available,
            condition: ProductCondition::New,
            image: None,
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate_draft(&draft()).is_empty());
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let mut d = draft();
        d.name = "   ".into();
        d.category = String::new();
        let errors = validate_draft(&d);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], FieldError::new(FormField::Name, NAME_REQUIRED));
        assert_eq!(
            errors[1],
            FieldError::new(FormField::Category, CATEGORY_REQUIRED)
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut d = draft();
        d.price = -0.01;
        d.discount = -5.0;
        let errors = validate_draft(&d);
        assert!(errors.contains(&FieldError::new(FormField::Price, PRICE_NON_NEGATIVE)));
        assert!(errors.contains(&FieldError::new(
            FormField::Discount,
            DISCOUNT_NON_NEGATIVE
        )));
    }

    #[test]
    fn non_finite_price_counts_as_missing() {
        let mut d = draft();
        d.price = f64::NAN;
        let errors = validate_draft(&d);
        assert!(errors.contains(&FieldError::new(FormField::Price, PRICE_REQUIRED)));
    }
}
