// File: src/codegen.rs

use chrono::{DateTime, Utc};
use rand::Rng;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lowercase base-36 rendering of `n`.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Builds a redemption code: `BRD` + 4 random uppercase base-36 chars + last 4
/// chars of the base-36 millisecond timestamp.
///
/// Codes are not guaranteed unique. Two redemptions of the same brand in the
/// same millisecond collide with probability 36^-4.
pub fn generate_voucher_code<R: Rng>(brand: &str, now: DateTime<Utc>, rng: &mut R) -> String {
    let brand_code = brand.chars().take(3).collect::<String>().to_uppercase();

    let random: String = (0..4)
        .map(|_| BASE36_DIGITS[rng.random_range(0..36usize)] as char)
        .collect::<String>()
        .to_uppercase();

    let stamp = to_base36(now.timestamp_millis().max(0) as u64);
    let tail_start = stamp.len().saturating_sub(4);

    format!("{}{}{}", brand_code, random, &stamp[tail_start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn code_has_brand_random_and_timestamp_parts() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let code = generate_voucher_code("Amazon", now, &mut rng);

        assert_eq!(code.len(), 11);
        assert!(code.starts_with("AMA"));
        assert!(code.ends_with("3v28"));
        assert!(code[3..7].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn short_brands_use_what_they_have() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let code = generate_voucher_code("hk", now, &mut rng);
        assert!(code.starts_with("HK"));
        assert_eq!(code.len(), 10);
    }
}
