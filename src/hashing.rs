//! Digest and bucket-index derivation.
//!
//! The default digest reproduces Java's `String.hashCode`: a multiplicative
//! polynomial hash over UTF-16 code units with wrapping 32-bit arithmetic.
//! A digest is reduced to a bucket index by either modulo division or the
//! multiplication method with a fractional constant.

use crate::error::{Error, Result};

/// Bucket-index derivation discipline. Immutable once a map is built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HashingMethod {
    /// `((digest % n) + n) % n`; maps negative digests into `[0, n)`.
    #[default]
    Modulo,
    /// `floor(n * frac(digest * factor))` with `factor` in (0, 1).
    Multiplication,
}

/// Default multiplication-method constant, the reciprocal of the golden
/// ratio.
pub const DEFAULT_MULTIPLICATION_FACTOR: f64 = 0.618;

/// Pluggable digest function from a normalized key to a signed 32-bit
/// digest. The map treats it as opaque; negative outputs are fine.
pub type DigestFn = Box<dyn Fn(&str) -> i32>;

/// Java-`hashCode`-compatible digest: `hash = 31 * hash + unit` over every
/// UTF-16 code unit, wrapping at 32 bits each step.
pub fn default_digest(key: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in key.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash
}

/// Reduces `digest` to an index in `[0, bucket_count)`.
///
/// Fails with [`Error::NoBuckets`] when `bucket_count` is zero, and with
/// [`Error::InvalidConfig`] when a multiplication factor is supplied under
/// the modulo method or lies outside (0, 1).
pub fn bucket_index(
    digest: i32,
    bucket_count: usize,
    method: HashingMethod,
    multiplication_factor: Option<f64>,
) -> Result<usize> {
    if bucket_count == 0 {
        return Err(Error::NoBuckets);
    }
    match method {
        HashingMethod::Modulo => {
            if let Some(factor) = multiplication_factor {
                return Err(Error::InvalidConfig {
                    reason: format!(
                        "multiplication factor {} supplied with the modulo method",
                        factor
                    ),
                });
            }
            let n = bucket_count as i64;
            Ok((((i64::from(digest) % n) + n) % n) as usize)
        }
        HashingMethod::Multiplication => {
            let factor = multiplication_factor.unwrap_or(DEFAULT_MULTIPLICATION_FACTOR);
            if !(factor > 0.0 && factor < 1.0) {
                return Err(Error::InvalidConfig {
                    reason: format!("multiplication factor {} outside (0, 1)", factor),
                });
            }
            let product = f64::from(digest) * factor;
            let frac = product - product.floor();
            // frac is in [0, 1); the min() guards the rounding edge where
            // n * frac lands exactly on n.
            let index = (bucket_count as f64 * frac).floor() as usize;
            Ok(index.min(bucket_count - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Digest values match Java's `String.hashCode` for the same strings.
    #[test]
    fn default_digest_matches_java_hash_code() {
        assert_eq!(default_digest(""), 0);
        assert_eq!(default_digest("a"), 97);
        assert_eq!(default_digest("abc"), 96354);
        assert_eq!(default_digest("hello"), 99_162_322);
        assert_eq!(default_digest("jerry"), 101_015_326);
    }

    /// Wrapping arithmetic reproduces Java's overflow behavior, including
    /// the string that hashes to `i32::MIN`.
    #[test]
    fn default_digest_wraps_like_java() {
        assert_eq!(default_digest("polygenelubricants"), i32::MIN);
        assert_eq!(default_digest("liskov"), -1_102_516_932);
    }

    /// Non-ASCII keys hash over UTF-16 code units, not bytes.
    #[test]
    fn default_digest_uses_utf16_units() {
        assert_eq!(default_digest("€uro"), 249_288_006);
    }

    #[test]
    fn known_java_collision_pair_collides() {
        assert_eq!(default_digest("Aa"), default_digest("BB"));
    }

    #[test]
    fn modulo_maps_negative_digests_into_range() {
        assert_eq!(bucket_index(-7, 5, HashingMethod::Modulo, None).unwrap(), 3);
        assert_eq!(
            bucket_index(i32::MIN, 7, HashingMethod::Modulo, None).unwrap(),
            ((i64::from(i32::MIN) % 7 + 7) % 7) as usize
        );
        for digest in [-100, -1, 0, 1, 100, i32::MAX, i32::MIN] {
            let idx = bucket_index(digest, 11, HashingMethod::Modulo, None).unwrap();
            assert!(idx < 11);
        }
    }

    #[test]
    fn multiplication_stays_in_range_for_any_digest() {
        for digest in [i32::MIN, -12345, -1, 0, 1, 12345, i32::MAX] {
            let idx =
                bucket_index(digest, 16, HashingMethod::Multiplication, Some(0.618)).unwrap();
            assert!(idx < 16, "digest {} produced index {}", digest, idx);
        }
    }

    #[test]
    fn multiplication_defaults_factor_when_absent() {
        let with_default = bucket_index(12345, 16, HashingMethod::Multiplication, None).unwrap();
        let explicit = bucket_index(
            12345,
            16,
            HashingMethod::Multiplication,
            Some(DEFAULT_MULTIPLICATION_FACTOR),
        )
        .unwrap();
        assert_eq!(with_default, explicit);
    }

    #[test]
    fn zero_buckets_fails() {
        assert_eq!(
            bucket_index(1, 0, HashingMethod::Modulo, None),
            Err(Error::NoBuckets)
        );
        assert_eq!(
            bucket_index(1, 0, HashingMethod::Multiplication, None),
            Err(Error::NoBuckets)
        );
    }

    #[test]
    fn factor_with_modulo_is_rejected() {
        assert!(matches!(
            bucket_index(1, 4, HashingMethod::Modulo, Some(0.5)),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn factor_outside_unit_interval_is_rejected() {
        for factor in [0.0, 1.0, -0.2, 1.5] {
            assert!(matches!(
                bucket_index(1, 4, HashingMethod::Multiplication, Some(factor)),
                Err(Error::InvalidConfig { .. })
            ));
        }
    }
}
