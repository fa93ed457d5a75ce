//! String similarity based on Levenshtein edit distance.

use rust_decimal::Decimal;

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
///
/// Operates on Unicode scalar values, so accented vendor names count one edit
/// per character. Uses two rolling rows instead of a full matrix.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Normalized similarity in `[0, 1]`: `(max_len - distance) / max_len`.
///
/// Two empty strings are identical and score 1.
#[must_use]
pub fn similarity(a: &str, b: &str) -> Decimal {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return Decimal::ONE;
    }

    let distance = levenshtein_distance(a, b).min(longest);
    let ratio = Decimal::from(longest - distance) / Decimal::from(longest);
    ratio.clamp(Decimal::ZERO, Decimal::ONE)
}
