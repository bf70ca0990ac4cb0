use mortgage_credit_core::rut::{check_digit, clean_rut, format_rut, validate_rut, Rut};
use proptest::prelude::*;

const CHECK_CHARS: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'k'];

#[test]
fn test_k_alias() {
    // 10.000.013: weighted sum 12, 11 - 1 = 10 -> 'k'
    assert_eq!(check_digit("10000013").unwrap(), 'k');
    assert!(validate_rut("10.000.013-k"));
    assert!(validate_rut("10.000.013-K"));
    assert!(!validate_rut("10.000.013-0"));
    assert!(!validate_rut("10.000.013-1"));
}

#[test]
fn test_zero_alias() {
    // 10.000.004: weighted sum 11, 11 - 0 = 11 -> '0'
    assert_eq!(check_digit("10000004").unwrap(), '0');
    assert!(validate_rut("10.000.004-0"));
    assert!(!validate_rut("10.000.004-k"));
    assert!(!validate_rut("10.000.004-1"));
}

#[test]
fn test_clean_strips_formatting() {
    assert_eq!(clean_rut(" 12.345.678-K "), "12345678k");
}

#[test]
fn test_serde_accepts_any_formatting_and_emits_dotted() {
    let rut: Rut = serde_json::from_str("\"123456785\"").unwrap();
    assert_eq!(serde_json::to_string(&rut).unwrap(), "\"12.345.678-5\"");
    assert!(serde_json::from_str::<Rut>("\"123456786\"").is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_formatted_rut_validates(body in 1_000_000u32..=99_999_999) {
        let body = body.to_string();
        let dv = check_digit(&body).unwrap();
        let formatted = format_rut(&format!("{body}{dv}"));
        prop_assert!(validate_rut(&formatted), "{} should validate", formatted);
    }

    #[test]
    fn prop_mutated_check_digit_fails(body in 1_000_000u32..=99_999_999, pick in 0usize..11) {
        let body = body.to_string();
        let dv = check_digit(&body).unwrap();
        let wrong = CHECK_CHARS[pick];
        prop_assume!(wrong != dv);
        let raw = format!("{body}-{wrong}");
        prop_assert!(!validate_rut(&raw), "{} should not validate", raw);
    }

    #[test]
    fn prop_format_is_stable(body in 1u32..=99_999_999, pick in 0usize..11) {
        let raw = format!("{body}{}", CHECK_CHARS[pick]);
        let once = format_rut(&raw);
        prop_assert_eq!(format_rut(&once), once);
    }
}
