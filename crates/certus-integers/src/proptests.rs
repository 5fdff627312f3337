//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use dashu::integer::IBig;
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn rational_add_commutative(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn rational_distributive(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int(),
            num_c in small_int(),
            den_c in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            let c = Rational::from_i64(num_c, den_c);
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            prop_assert!((&a * &a.recip()).is_one());
        }

        #[test]
        fn rational_division_undoes_multiplication(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in non_zero_int(),
            den_b in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            prop_assert_eq!(&(&a * &b) / &b, a);
        }

        #[test]
        fn dyadic_scaling_matches_power_of_two(m in small_int(), e in -80isize..80isize) {
            let x = Rational::from_dyadic(&IBig::from(m), e);
            let two = Rational::from(2);
            let scale = if e >= 0 {
                (0..e).fold(Rational::one(), |acc, _| &acc * &two)
            } else {
                (0..-e).fold(Rational::one(), |acc, _| &acc / &two)
            };
            prop_assert_eq!(x, &Rational::from(m) * &scale);
        }

        #[test]
        fn abs_is_non_negative(num in small_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den).abs();
            prop_assert!(!a.is_negative());
            prop_assert_eq!(a.is_zero(), num == 0);
        }
    }
}
