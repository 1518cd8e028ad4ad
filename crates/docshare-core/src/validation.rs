//! Payment record validation: status, product and order-id checks.

use crate::types::{IdentityToken, PaymentRecord, Role};

/// Gateway status of a completed payment.
pub const SUCCESS_STATUS: &str = "success";

/// Separates the payer's email from the free comment inside an order id.
pub const ORDER_ID_SEPARATOR: &str = " /// ";

/// The access level every paying user receives.
pub const GRANTED_ROLE: Role = Role::Commenter;

/// Extract the identity token from an order id.
///
/// The token is the trimmed text before the first [`ORDER_ID_SEPARATOR`].
/// Anything after the separator is ignored. Returns `None` when the
/// separator is missing or the token would be empty.
pub fn parse_order_id(order_id: &str) -> Option<IdentityToken> {
    let (candidate, _comment) = order_id.split_once(ORDER_ID_SEPARATOR)?;
    IdentityToken::new(candidate).ok()
}

/// Decide whether a record is a completed purchase of the expected product.
///
/// This performs:
/// - Status check against [`SUCCESS_STATUS`]
/// - Exact, case-sensitive description match
/// - Order id parsing via [`parse_order_id`]
///
/// Returns the payer's token for a valid record and `None` otherwise.
pub fn paid_token(record: &PaymentRecord, expected_description: &str) -> Option<IdentityToken> {
    // 1. Payment must have completed
    if record.status != SUCCESS_STATUS {
        return None;
    }

    // 2. Payment must be for this product
    if record.description != expected_description {
        return None;
    }

    // 3. Order id must carry a token
    parse_order_id(&record.order_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT: &str = "Unit testing masterclass";

    fn record(description: &str, status: &str, order_id: &str) -> PaymentRecord {
        PaymentRecord::new(description, status, order_id)
    }

    #[test]
    fn test_valid_record_yields_token() {
        let r = record(PRODUCT, "success", "a@x.com /// ref123");
        assert_eq!(
            paid_token(&r, PRODUCT),
            Some(IdentityToken::new("a@x.com").unwrap())
        );
    }

    #[test]
    fn test_non_success_status_rejected() {
        let r = record(PRODUCT, "notSuccess", "a@x.com /// ref123");
        assert_eq!(paid_token(&r, PRODUCT), None);

        let r = record(PRODUCT, "Success", "a@x.com /// ref123");
        assert_eq!(paid_token(&r, PRODUCT), None);
    }

    #[test]
    fn test_description_must_match_exactly() {
        let r = record("wrong", "success", "a@x.com /// ref123");
        assert_eq!(paid_token(&r, PRODUCT), None);

        let r = record(&PRODUCT.to_uppercase(), "success", "a@x.com /// ref123");
        assert_eq!(paid_token(&r, PRODUCT), None);

        let r = record(&format!("{PRODUCT} "), "success", "a@x.com /// ref123");
        assert_eq!(paid_token(&r, PRODUCT), None);
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert_eq!(parse_order_id("a@x.com //WRONG ID// some text"), None);
        assert_eq!(parse_order_id("a@x.com///ref"), None);
        assert_eq!(parse_order_id("a@x.com"), None);
        assert_eq!(parse_order_id(""), None);
    }

    #[test]
    fn test_empty_candidate_rejected() {
        assert_eq!(parse_order_id(" /// ref123"), None);
        assert_eq!(parse_order_id("    /// ref123"), None);
    }

    #[test]
    fn test_only_first_separator_counts() {
        let token = parse_order_id("a@x.com /// note /// more").unwrap();
        assert_eq!(token.as_str(), "a@x.com");
    }

    #[test]
    fn test_candidate_is_trimmed() {
        let token = parse_order_id("\t a@x.com  /// ").unwrap();
        assert_eq!(token.as_str(), "a@x.com");
    }

    #[test]
    fn test_default_record_is_invalid() {
        assert_eq!(paid_token(&PaymentRecord::default(), PRODUCT), None);
    }

    #[test]
    fn test_granted_role_is_commenter() {
        assert_eq!(GRANTED_ROLE.as_str(), "commenter");
    }
}
