//! Property-based containment tests.
//!
//! Each property draws exact rationals, encloses them in balls (sometimes at a
//! coarser precision than the operation, so inputs carry real radii), applies
//! an operation, and checks that the exact result lies in the output ball.

#[cfg(test)]
mod tests {
    use dashu::integer::IBig;
    use num_traits::Zero;
    use proptest::prelude::*;

    use certus_integers::Rational;

    use crate::{sqr, Ball};

    fn rational() -> impl Strategy<Value = Rational> {
        (-5000i64..5000i64, 1i64..500i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn non_zero_rational() -> impl Strategy<Value = Rational> {
        (prop_oneof![(-5000i64..=-1i64), (1i64..=5000i64)], 1i64..500i64)
            .prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn precision() -> impl Strategy<Value = u32> {
        2u32..160u32
    }

    /// `|x| * 2^-prec`, the largest rounding error allowed for a result `x`.
    fn relative_bound(x: &Rational, prec: u32) -> Rational {
        &x.abs() * &Rational::from_dyadic(&IBig::ONE, -(prec as isize))
    }

    proptest! {
        #[test]
        fn rounding_contains_and_is_deterministic(x in rational(), prec in precision()) {
            let a = Ball::from_rational(&x, prec);
            prop_assert!(a.contains_rational(&x));
            prop_assert_eq!(&a, &Ball::from_rational(&x, prec));
        }

        #[test]
        fn rounding_radius_is_relative_to_precision(x in non_zero_rational(), prec in precision()) {
            let a = Ball::from_rational(&x, prec);
            prop_assert!(a.rad().to_rational().unwrap() <= relative_bound(&x, prec));
        }

        #[test]
        fn exact_inputs_round_within_relative_precision(
            x in -100_000i64..100_000i64,
            y in -100_000i64..100_000i64,
            prec in 2u32..24u32
        ) {
            let a = Ball::from_i64(x);
            let b = Ball::from_i64(y);
            let product = Rational::from_i64(x * y, 1);
            prop_assert!(a.mul(&b, prec).rad().to_rational().unwrap() <= relative_bound(&product, prec));
            let sum = Rational::from_i64(x + y, 1);
            prop_assert!(a.add(&b, prec).rad().to_rational().unwrap() <= relative_bound(&sum, prec));
        }

        #[test]
        fn add_sub_contain(x in rational(), y in rational(), p in precision(), q in precision()) {
            let a = Ball::from_rational(&x, p);
            let b = Ball::from_rational(&y, p);
            prop_assert!(a.add(&b, q).contains_rational(&(&x + &y)));
            prop_assert!(a.sub(&b, q).contains_rational(&(&x - &y)));
        }

        #[test]
        fn mul_sqr_contain(x in rational(), y in rational(), p in precision(), q in precision()) {
            let a = Ball::from_rational(&x, p);
            let b = Ball::from_rational(&y, p);
            prop_assert!(a.mul(&b, q).contains_rational(&(&x * &y)));
            prop_assert!(sqr(&a, q).contains_rational(&(&x * &x)));
        }

        #[test]
        fn fused_updates_contain(
            x in rational(),
            y in rational(),
            z in rational(),
            p in precision(),
            q in precision()
        ) {
            let a = Ball::from_rational(&x, p);
            let b = Ball::from_rational(&y, p);
            let mut acc = Ball::from_rational(&z, p);
            acc.submul(&a, &b, q);
            prop_assert!(acc.contains_rational(&(&z - &(&x * &y))));
            acc.addmul(&a, &b, q);
            prop_assert!(acc.contains_rational(&z));
        }

        #[test]
        fn div_contains_or_is_indeterminate(
            x in rational(),
            y in non_zero_rational(),
            p in precision(),
            q in precision()
        ) {
            let a = Ball::from_rational(&x, p);
            let b = Ball::from_rational(&y, p);
            let quotient = a.div(&b, q);
            if b.contains_zero() {
                prop_assert!(!quotient.is_finite());
            } else {
                prop_assert!(quotient.contains_rational(&(&x / &y)));
            }
        }

        #[test]
        fn positivity_is_a_proof(x in rational(), prec in precision()) {
            let a = Ball::from_rational(&x, prec);
            if a.is_positive() {
                prop_assert!(!x.is_negative() && !x.is_zero());
                prop_assert!(!a.contains_zero());
            }
        }

        #[test]
        fn negation_is_exact(x in rational(), prec in precision()) {
            let a = Ball::from_rational(&x, prec);
            let negated = -&a;
            prop_assert_eq!(negated.rad(), a.rad());
            prop_assert!(negated.contains_rational(&-&x));
        }
    }
}
