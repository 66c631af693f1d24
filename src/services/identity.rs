//! Offline identifier generation and name similarity.

use crate::domain::constants::{HONORIFICS, ID_PREFIX};
use sha2::{Digest, Sha256};

/// Deterministic farmer ID from locally available attributes.
///
/// SHA-256 over `NAME|plot|village|device`, truncated to `digest_len` upper-case
/// hex characters and prefixed with `JK-`. No network or database is involved, so
/// two disconnected devices capturing the same holding produce the same ID.
///
/// Truncation to 10 hex chars leaves 40 bits: expect about n²/2⁴¹ collisions
/// across n records (roughly one in three at a million rows).
pub fn generate_id(
    name: &str,
    plot_no: &str,
    village_code: &str,
    device_id: &str,
    digest_len: usize,
) -> String {
    let raw = format!(
        "{}|{}|{}|{}",
        name.trim().to_uppercase(),
        plot_no.trim(),
        village_code,
        device_id
    );
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    let digest = hex::encode_upper(hasher.finalize());
    format!("{}{}", ID_PREFIX, &digest[..digest_len.min(digest.len())])
}

fn normalize_name(raw: &str) -> Vec<char> {
    let mut s = raw.to_lowercase();
    for h in HONORIFICS {
        s = s.replace(h, "");
    }
    s.trim().chars().collect()
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`. Ties go to the
/// block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // prev[j - blo + 1] = length of the match ending at (i - 1, j)
    let mut prev = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        let mut cur = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                cur[j - blo + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = cur;
    }
    best
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![((0, a.len()), (0, b.len()))];
    while let Some(((alo, ahi), (blo, bhi))) = queue.pop() {
        let (i, j, k) = longest_match(a, b, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push(((alo, i), (blo, j)));
        }
        if i + k < ahi && j + k < bhi {
            queue.push(((i + k, ahi), (j + k, bhi)));
        }
    }
    total
}

/// Name similarity as a percentage rounded to one decimal.
///
/// Honorifics are stripped, then the gestalt ratio `2·M / (|a| + |b|)` is taken,
/// where M counts characters in recursively found common blocks. A missing side
/// scores 0, which callers must treat as a mismatch rather than "no data".
pub fn similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    let a = normalize_name(a);
    let b = normalize_name(b);
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let ratio = 2.0 * matching_chars(&a, &b) as f64 / total as f64;
    let percent = ratio * 100.0;
    // exact halves go to the even digit: 6.25 -> 6.2
    (percent * 10.0).round_ties_even() / 10.0
}
