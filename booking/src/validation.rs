//! Form validation run when the buyer tries to advance.
//!
//! Both validators are pure: they build a fresh error map from the form and
//! never look at previous errors.

use crate::steps::contact::ContactForm;
use crate::steps::payment::PaymentForm;
use crate::types::{ContactField, FieldErrors, PaymentField};
use regex::Regex;
use std::sync::LazyLock;

/// Message for an empty first name
pub const FIRST_NAME_REQUIRED: &str = "Prénom requis";
/// Message for an empty last name
pub const LAST_NAME_REQUIRED: &str = "Nom requis";
/// Message for a malformed e-mail address
pub const EMAIL_INVALID: &str = "E-mail invalide";
/// Message for a payment number that is not 10 digits
pub const NUMBER_INVALID: &str = "Numéro invalide (10 chiffres)";

/// `local@domain.tld`, no whitespace, a dot after the `@`
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern is valid")
});

/// Exactly ten ASCII digits
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[0-9]{10}$").expect("payment number pattern is valid")
});

/// Validates the contact form
///
/// Names are required after trimming; the e-mail must look like `local@domain.tld`.
#[must_use]
pub fn validate_contact(form: &ContactForm) -> FieldErrors<ContactField> {
    let mut errors = FieldErrors::new();

    if form.first_name.trim().is_empty() {
        errors.insert(ContactField::FirstName, FIRST_NAME_REQUIRED);
    }
    if form.last_name.trim().is_empty() {
        errors.insert(ContactField::LastName, LAST_NAME_REQUIRED);
    }
    if !EMAIL_PATTERN.is_match(form.email.trim()) {
        errors.insert(ContactField::Email, EMAIL_INVALID);
    }

    errors
}

/// Validates the payment form
///
/// Whitespace is ignored, so `01 90 00 00 00` is accepted.
#[must_use]
pub fn validate_payment(form: &PaymentForm) -> FieldErrors<PaymentField> {
    let mut errors = FieldErrors::new();

    if !NUMBER_PATTERN.is_match(&normalize_number(&form.number)) {
        errors.insert(PaymentField::Number, NUMBER_INVALID);
    }

    errors
}

/// The payment number with every whitespace character removed
#[must_use]
pub fn normalize_number(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;

    fn contact(first: &str, last: &str, email: &str) -> ContactForm {
        ContactForm {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
        }
    }

    fn payment(number: &str) -> PaymentForm {
        PaymentForm {
            method: PaymentMethod::Mtn,
            number: number.to_string(),
        }
    }

    #[test]
    fn test_missing_first_name_only() {
        let errors = validate_contact(&contact("", "Martin", "a@b.fr"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&ContactField::FirstName), Some(FIRST_NAME_REQUIRED));
    }

    #[test]
    fn test_invalid_email_only() {
        let errors = validate_contact(&contact("Jean", "Dupont", "not-an-email"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&ContactField::Email), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_whitespace_names_are_missing() {
        let errors = validate_contact(&contact("   ", "\t", "jean@exemple.fr"));

        assert_eq!(errors.get(&ContactField::FirstName), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.get(&ContactField::LastName), Some(LAST_NAME_REQUIRED));
        assert_eq!(errors.get(&ContactField::Email), None);
    }

    #[test]
    fn test_email_shapes() {
        for valid in ["a@b.fr", "jean.dupont@mail.example.com", "  x@y.io  "] {
            assert!(validate_contact(&contact("J", "D", valid)).is_empty(), "{valid} should pass");
        }
        for invalid in ["", "a@b", "@b.fr", "a@.fr.", "a b@c.fr", "a@@b.fr", "a@b c.fr"] {
            assert_eq!(
                validate_contact(&contact("J", "D", invalid)).get(&ContactField::Email),
                Some(EMAIL_INVALID),
                "{invalid:?} should fail"
            );
        }
    }

    #[test]
    fn test_all_fields_missing() {
        let errors = validate_contact(&ContactForm::default());
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_payment_number_length() {
        let errors = validate_payment(&payment("123456789"));
        assert_eq!(errors.get(&PaymentField::Number), Some(NUMBER_INVALID));
        assert_eq!(errors.len(), 1);

        assert!(validate_payment(&payment("0190000000")).is_empty());
        assert!(!validate_payment(&payment("01900000001")).is_empty());
    }

    #[test]
    fn test_payment_number_ignores_whitespace() {
        assert!(validate_payment(&payment("01 90 00 00 00")).is_empty());
        assert!(validate_payment(&payment(" 0190000000\t")).is_empty());
    }

    #[test]
    fn test_payment_number_rejects_non_digits() {
        assert!(!validate_payment(&payment("01900O0000")).is_empty());
        assert!(!validate_payment(&payment("+229019000")).is_empty());
        // Non-ASCII digits do not count
        assert!(!validate_payment(&payment("٠١٩٠٠٠٠٠٠٠")).is_empty());
    }
}
