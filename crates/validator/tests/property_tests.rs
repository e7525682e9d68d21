//! Property-based tests for fieldcheck-validator.

use std::collections::HashMap;

use fieldcheck_validator::prelude::*;
use proptest::prelude::*;

fn signup_schema() -> ValidationComposite {
    let name = ValidationBuilder::field("name")
        .required()
        .min(3, "Too short")
        .max(40, "Too long")
        .build()
        .unwrap();
    let cep = ValidationBuilder::field("cep").required().cep().build().unwrap();
    let email = ValidationBuilder::field("email").email().build().unwrap();
    ValidationComposite::build(rules![name, cep, email]).unwrap()
}

fn bag() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map(
        prop_oneof![
            Just("name".to_owned()),
            Just("cep".to_owned()),
            Just("email".to_owned()),
            "[a-z]{1,8}",
        ],
        ".{0,24}",
        0..6,
    )
}

// ============================================================================
// COMPOSITE
// ============================================================================

proptest! {
    #[test]
    fn validate_is_deterministic(values in bag()) {
        let schema = signup_schema();
        prop_assert_eq!(schema.validate(&values), schema.validate(&values));
    }

    #[test]
    fn only_registered_fields_are_reported(values in bag()) {
        let schema = signup_schema();
        if let Err(report) = schema.validate(&values) {
            prop_assert!(!report.is_empty());
            for field in report.fields() {
                prop_assert!(["name", "cep", "email"].contains(&field));
            }
        }
    }

    #[test]
    fn report_matches_per_field_validation(values in bag()) {
        let schema = signup_schema();
        let report = schema.validate(&values).err().unwrap_or_default();
        for field in ["name", "cep", "email"] {
            let value = values.get(field).map_or("", String::as_str);
            let field_err = schema.validate_field(field, value).err();
            prop_assert_eq!(field_err.as_ref(), report.get(field));
        }
    }
}

// ============================================================================
// LEAF RULES
// ============================================================================

proptest! {
    #[test]
    fn required_accepts_exactly_non_blank(s in "\\PC{0,12}|[ \\t\\n]{0,6}") {
        prop_assert_eq!(required().validate(&s).is_ok(), !s.trim().is_empty());
    }

    #[test]
    fn remove_special_characters_is_idempotent(s in ".{0,32}") {
        let once = remove_special_characters(&s);
        prop_assert_eq!(remove_special_characters(&once), once.clone());
    }

    #[test]
    fn masked_eight_digits_pass_cep(digits in "[0-9]{8}", masked in any::<bool>()) {
        let value = if masked {
            format!("{}-{}", &digits[..5], &digits[5..])
        } else {
            digits
        };
        prop_assert!(cep().validate(&value).is_ok());
    }

    #[test]
    fn wrong_digit_count_fails_cep(digits in "[0-9]{0,7}|[0-9]{9,14}") {
        prop_assert!(cep().validate(&digits).is_err());
    }

    #[test]
    fn min_and_max_agree_with_trimmed_char_count(s in ".{0,16}", bound in 0usize..12) {
        let count = s.trim().chars().count();
        prop_assert_eq!(min_length(bound).validate(&s).is_ok(), count >= bound);
        prop_assert_eq!(max_length(bound).validate(&s).is_ok(), count <= bound);
    }
}
