//! Weak entity tags and the conditional request headers that carry them.
//!
//! A tag is a checksum over the current JSON representation. The stored
//! `version` is part of that representation, so every successful mutation
//! yields a new tag without keeping the tag anywhere.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::num::IntErrorKind;

use crate::actor_framework::Precondition;

/// Hex characters of the SHA-256 digest kept in the tag (64 bits).
const ETAG_HEX_LEN: usize = 16;

/// Computes `W/"<first 16 hex chars of sha256(payload)>"`.
pub fn compute_etag(payload: &[u8]) -> String {
    let digest = Sha256::digest(payload);
    let mut hex = String::with_capacity(ETAG_HEX_LEN);
    for b in digest.iter().take(ETAG_HEX_LEN / 2) {
        hex.push_str(&format!("{:02x}", b));
    }
    format!("W/\"{}\"", hex)
}

/// Serializes `value` to JSON and tags the resulting bytes.
///
/// Serialization order follows the struct's field order, so equal values
/// always produce equal tags.
pub fn etag_for<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let body = serde_json::to_vec(value)?;
    Ok(compute_etag(&body))
}

/// Reads the update precondition out of an `If-Match` value such as `"3"`.
///
/// A value that is not an integer at all means the caller gave no usable
/// precondition. An integer that no version can equal (negative, or too
/// large for a version) still counts as a precondition, one that always fails.
pub fn parse_if_match(if_match: Option<&str>) -> Precondition {
    let Some(raw) = if_match else {
        return Precondition::Unconditional;
    };
    match raw.trim().trim_matches('"').trim().parse::<i128>() {
        Ok(version) => u64::try_from(version)
            .map(Precondition::Version)
            .unwrap_or(Precondition::Unsatisfiable),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Precondition::Unsatisfiable
        }
        Err(_) => Precondition::Unconditional,
    }
}

/// True when an `If-None-Match` value names `etag` (or is `*`).
pub fn if_none_match_matches(if_none_match: &str, etag: &str) -> bool {
    let header = if_none_match.trim();
    header == etag
        || header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == "*" || candidate == etag)
}
