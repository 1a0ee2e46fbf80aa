//! Text Helpers
//!
//! Keyword extraction and prompt-derived seeds shared by the fallback
//! generator, transcript simulator, and interview digest. Everything here is
//! pure: identical input always yields identical output.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

/// Words ignored when extracting keywords.
const STOPWORDS: &[&str] = &[
    "the", "and", "or", "to", "for", "with", "a", "an", "of", "in", "on", "by", "is", "are",
    "from", "that", "this", "we", "our", "their", "they", "as", "at", "be", "it", "into",
    "across", "within", "around", "over", "need", "looking", "seeking", "what", "how", "your",
    "you", "who", "which", "where", "any", "not", "provided",
];

/// Derive a stable 64-bit seed from a sequence of text parts.
///
/// Parts are joined with `|` and hashed with SHA-256; the first eight bytes of
/// the digest form the seed.
pub fn stable_seed<I, S>(parts: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            hasher.update(b"|");
        }
        hasher.update(part.as_ref().as_bytes());
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Lowercased alphanumeric tokens longer than two characters, minus stopwords.
pub fn keywords(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(|t| t.to_ascii_lowercase())
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// The `max` most frequent keywords, ties broken by first appearance.
pub fn ranked_keywords(text: &str, max: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, token) in keywords(text).into_iter().enumerate() {
        counts.entry(token).or_insert((0, position)).0 += 1;
    }
    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(max).map(|(term, _)| term).collect()
}
