//! Random password generation over four character groups.

use crate::constants;
use rand::rngs::OsRng;
use rand::Rng;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"~!@#$%&*()-_=+[]|;:',<.>/?";

const GROUPS: [&[u8]; 4] = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS];

/// Whether `length` is acceptable for a generated password.
pub fn length_in_bounds(length: usize) -> bool {
    (constants::MIN_PASSWORD_LENGTH..=constants::MAX_PASSWORD_LENGTH).contains(&length)
}

/// Generate a password of `length` characters. The first four come from
/// each group in turn so every group is represented; the rest come from
/// randomly chosen groups.
pub fn generate(length: usize) -> String {
    let mut rng = OsRng;
    let mut password = String::with_capacity(length);
    for group in GROUPS.iter().take(length) {
        password.push(pick(&mut rng, group));
    }
    for _ in GROUPS.len()..length {
        let group = GROUPS[rng.gen_range(0..GROUPS.len())];
        password.push(pick(&mut rng, group));
    }
    password
}

fn pick<R: Rng>(rng: &mut R, group: &[u8]) -> char {
    group[rng.gen_range(0..group.len())] as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(!length_in_bounds(7));
        assert!(length_in_bounds(8));
        assert!(length_in_bounds(32));
        assert!(!length_in_bounds(33));
        assert!(!length_in_bounds(0));
    }

    #[test]
    fn test_generate_length() {
        for length in [8, 16, 32] {
            assert_eq!(generate(length).chars().count(), length);
        }
    }

    #[test]
    fn test_generate_covers_all_groups() {
        let password = generate(8);
        let chars: Vec<char> = password.chars().collect();
        for (i, group) in GROUPS.iter().enumerate() {
            assert!(
                group.contains(&(chars[i] as u8)),
                "char {} not from group {}",
                chars[i],
                i
            );
        }
    }

    #[test]
    fn test_generate_only_known_characters() {
        let password = generate(32);
        for c in password.chars() {
            assert!(
                GROUPS.iter().any(|g| g.contains(&(c as u8))),
                "unexpected char {}",
                c
            );
        }
    }
}
