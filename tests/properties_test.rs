use combi_calc::{
    combination, count_onto_functions, evaluate_expression, factorial, permutation,
    stirling_second_kind, CalcError,
};
use proptest::prelude::*;

#[test]
fn test_reference_values() {
    assert_eq!(evaluate_expression("C(10,3)").unwrap(), 120);
    assert_eq!(evaluate_expression("P(5,2)").unwrap(), 20);
    assert_eq!(evaluate_expression("C(4,2) and P(3,1)").unwrap(), 18);
    assert_eq!(count_onto_functions(3, 3).unwrap(), 6);
    assert_eq!(count_onto_functions(4, 2).unwrap(), 14);
}

#[test]
fn test_invalid_inputs() {
    assert!(matches!(
        evaluate_expression("nonsense"),
        Err(CalcError::InvalidFormat { .. })
    ));
    assert!(matches!(
        evaluate_expression(""),
        Err(CalcError::InvalidFormat { .. })
    ));
}

proptest! {
    #[test]
    fn factorial_is_product_of_range(n in 0i64..=30) {
        let expected: u128 = (1..=n as u128).product();
        prop_assert_eq!(factorial(n).unwrap(), expected);
    }

    #[test]
    fn factorial_of_negative_is_zero(n in i64::MIN..0) {
        prop_assert_eq!(factorial(n).unwrap(), 0);
    }

    #[test]
    fn combination_is_symmetric(n in 0i64..=60, r_frac in 0.0f64..=1.0) {
        let r = (n as f64 * r_frac).floor() as i64;
        prop_assert_eq!(combination(n, r).unwrap(), combination(n, n - r).unwrap());
    }

    #[test]
    fn r_above_n_gives_zero(n in 0i64..1000, extra in 1i64..1000) {
        prop_assert_eq!(combination(n, n + extra).unwrap(), 0);
        prop_assert_eq!(permutation(n, n + extra).unwrap(), 0);
    }

    #[test]
    fn permutation_is_combination_times_r_factorial(n in 0i64..=25, r in 0i64..=25) {
        prop_assume!(r <= n);
        prop_assert_eq!(
            permutation(n, r).unwrap(),
            combination(n, r).unwrap() * factorial(r).unwrap()
        );
    }

    #[test]
    fn onto_is_zero_when_codomain_larger(m in 0i64..50, extra in 1i64..50) {
        prop_assert_eq!(count_onto_functions(m, m + extra).unwrap(), 0);
    }

    #[test]
    fn onto_is_n_factorial_times_stirling(m in 0i64..=40, n in 0i64..=40) {
        let stirling = stirling_second_kind(m, n);
        prop_assert!(stirling.is_ok());
        let expected = factorial(n).ok().and_then(|f| f.checked_mul(stirling.unwrap()));
        prop_assert_eq!(count_onto_functions(m, n).ok(), expected);
    }

    #[test]
    fn text_without_markers_is_invalid(s in "[a-zA-Z0-9 ,()]{0,40}") {
        prop_assume!(!s.contains('C') && !s.contains('P'));
        let is_invalid_format = matches!(
            evaluate_expression(&s),
            Err(CalcError::InvalidFormat { .. })
        );
        prop_assert!(is_invalid_format);
    }

    #[test]
    fn wide_r_above_n_gives_zero(n in 0u128..1000, r_digits in "[1-9][0-9]{20,60}") {
        prop_assert_eq!(evaluate_expression(&format!("C({},{})", n, r_digits)).unwrap(), 0);
        prop_assert_eq!(evaluate_expression(&format!("P({},{})", n, r_digits)).unwrap(), 0);
    }

    #[test]
    fn single_call_matches_direct_evaluation(n in 0i64..=30, r in 0i64..=30, spaces in 0usize..4) {
        let expr = format!("C({},{}{})", n, " ".repeat(spaces), r);
        prop_assert_eq!(evaluate_expression(&expr).unwrap(), combination(n, r).unwrap());
    }
}
