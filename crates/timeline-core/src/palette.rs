//! Deterministic color buckets for item names.

use serde::Serialize;
use std::fmt;

/// The eight item colors, in bucket order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Indigo,
    Pink,
    Teal,
}

impl ColorBucket {
    pub const ALL: [Self; 8] = [
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Red,
        Self::Indigo,
        Self::Pink,
        Self::Teal,
    ];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Indigo => "indigo",
            Self::Pink => "pink",
            Self::Teal => "teal",
        }
    }
}

impl fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 32-bit `h * 31 + unit` hash over the UTF-16 code units of `name`.
#[must_use]
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0_i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Pick the color bucket for an item name. Same name, same bucket.
#[must_use]
pub fn bucket_for_name(name: &str) -> ColorBucket {
    let index = name_hash(name).unsigned_abs() as usize % ColorBucket::ALL.len();
    ColorBucket::ALL[index]
}

#[cfg(test)]
mod tests {
    use super::{ColorBucket, bucket_for_name, name_hash};
    use std::collections::HashSet;

    #[test]
    fn same_name_same_bucket() {
        assert_eq!(bucket_for_name("Test Task"), bucket_for_name("Test Task"));
    }

    #[test]
    fn names_differing_in_last_char_differ() {
        assert_ne!(bucket_for_name("Task A"), bucket_for_name("Task B"));
    }

    #[test]
    fn empty_name_is_first_bucket() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(bucket_for_name(""), ColorBucket::Blue);
    }

    #[test]
    fn hash_matches_known_values() {
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn long_names_wrap_without_panicking() {
        let name = "Debug mobile notification error ".repeat(20);
        let _ = bucket_for_name(&name);
    }

    #[test]
    fn unicode_names_get_a_bucket() {
        for name in ["Tâche française", "タスク", "задача", "🚀 launch"] {
            assert!(ColorBucket::ALL.contains(&bucket_for_name(name)));
        }
    }

    #[test]
    fn greek_letters_spread_across_buckets() {
        let names = [
            "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
        ];
        let buckets: HashSet<_> = names.iter().map(|n| bucket_for_name(n)).collect();
        assert!(buckets.len() > 1);
    }
}
