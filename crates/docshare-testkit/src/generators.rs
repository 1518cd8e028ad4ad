//! Proptest generators for property-based testing.

use proptest::prelude::*;

use docshare_core::{PaymentRecord, ORDER_ID_SEPARATOR, SUCCESS_STATUS};

use crate::fixtures::EXPECTED_DESCRIPTION;

/// Generate a plausible email address.
pub fn email() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}@[a-z]{1,8}\\.(com|org|email)".prop_map(String::from)
}

/// Generate a free-text order comment. May itself contain the separator.
pub fn comment() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,24}".prop_map(String::from),
        (".{0,8}", ".{0,8}").prop_map(|(a, b)| format!("{a}{ORDER_ID_SEPARATOR}{b}")),
    ]
}

/// Generate surrounding whitespace for a token.
pub fn padding() -> impl Strategy<Value = String> {
    "[ \t]{0,3}".prop_map(String::from)
}

/// Generate a gateway status, mostly successful.
pub fn status() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(SUCCESS_STATUS.to_string()),
        1 => prop_oneof![
            Just("failure".to_string()),
            Just("reversed".to_string()),
            Just("Success".to_string()),
            Just(String::new()),
        ],
    ]
}

/// Generate a product description, mostly the expected one.
pub fn description() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(EXPECTED_DESCRIPTION.to_string()),
        1 => prop_oneof![
            Just("BAD DESCRIPTION".to_string()),
            Just(EXPECTED_DESCRIPTION.to_uppercase()),
            ".{0,16}".prop_map(String::from),
        ],
    ]
}

/// Parameters for generating a payment record.
#[derive(Debug, Clone)]
pub struct PaymentParams {
    pub email: String,
    pub padding: (String, String),
    pub comment: String,
    pub status: String,
    pub description: String,
    pub has_separator: bool,
}

impl PaymentParams {
    /// Whether the record built from these params should validate.
    pub fn is_valid(&self) -> bool {
        self.has_separator
            && self.status == SUCCESS_STATUS
            && self.description == EXPECTED_DESCRIPTION
    }
}

impl Arbitrary for PaymentParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            email(),
            (padding(), padding()),
            comment(),
            status(),
            description(),
            prop::bool::weighted(0.9),
        )
            .prop_map(
                |(email, padding, comment, status, description, has_separator)| PaymentParams {
                    email,
                    padding,
                    comment,
                    status,
                    description,
                    has_separator,
                },
            )
            .boxed()
    }
}

/// Build a payment record from parameters.
///
/// Without a separator the order id is just the padded email.
pub fn payment_from_params(params: &PaymentParams) -> PaymentRecord {
    let (lead, trail) = &params.padding;
    let order_id = if params.has_separator {
        format!(
            "{lead}{}{trail}{ORDER_ID_SEPARATOR}{}",
            params.email, params.comment
        )
    } else {
        format!("{lead}{}{trail}", params.email)
    };
    PaymentRecord::new(params.description.clone(), params.status.clone(), order_id)
}
