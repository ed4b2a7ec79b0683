//! Field rules shared by create and update.

use crate::catalog::domain::{CatalogKind, Item};
use crate::errors::{FieldViolation, ServiceError};

const EMPTY: &str = "must not be empty";
const NEGATIVE: &str = "must not be negative";

/// Every rule the item breaks, in field order.
pub fn violations(item: &Item) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    if item.name.trim().is_empty() {
        out.push(FieldViolation { field: "name", reason: EMPTY });
    }
    if item.maker.trim().is_empty() {
        out.push(FieldViolation { field: "maker", reason: EMPTY });
    }
    if item.price < 0 {
        out.push(FieldViolation { field: "price", reason: NEGATIVE });
    }
    if item.image.trim().is_empty() {
        out.push(FieldViolation { field: "image", reason: EMPTY });
    }
    out
}

pub fn validate(kind: CatalogKind, item: &Item) -> Result<(), ServiceError> {
    let violations = violations(item);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::InvalidField { kind, violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(item: &Item) -> Vec<&'static str> {
        violations(item).into_iter().map(|v| v.field).collect()
    }

    #[test]
    fn valid_item_passes() {
        assert!(validate(CatalogKind::Product, &Item::of("n", "m", 0, "http://x")).is_ok());
    }

    #[test]
    fn each_rule_is_checked() {
        assert_eq!(fields(&Item::of("", "m", 100, "http://x")), ["name"]);
        assert_eq!(fields(&Item::of("n", "", 100, "http://x")), ["maker"]);
        assert_eq!(fields(&Item::of("n", "m", -1, "http://x")), ["price"]);
        assert_eq!(fields(&Item::of("n", "m", 100, "")), ["image"]);
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        assert_eq!(fields(&Item::of("  ", "m", 1, "\t")), ["name", "image"]);
    }

    #[test]
    fn violations_are_aggregated() {
        let err = validate(CatalogKind::CatToy, &Item::of("", "", -5, "")).unwrap_err();
        match err {
            ServiceError::InvalidField { kind, violations } => {
                assert_eq!(kind, CatalogKind::CatToy);
                assert_eq!(violations.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
