//! Deterministic draw IDs using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A deterministic draw ID derived from the game and draw date.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawId(String);

impl DrawId {
    /// Generate a DrawId from input fields.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for DrawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DrawId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_id_deterministic() {
        let id1 = DrawId::generate(&["powerball", "2015-01-03"]);
        let id2 = DrawId::generate(&["powerball", "2015-01-03"]);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_draw_id_different_inputs() {
        let id1 = DrawId::generate(&["powerball", "2015-01-03"]);
        let id2 = DrawId::generate(&["mega-millions", "2015-01-03"]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_draw_id_field_separator() {
        // "ab|c" and "a|bc" must not collide
        assert_ne!(DrawId::generate(&["ab", "c"]), DrawId::generate(&["a", "bc"]));
    }

    #[test]
    fn test_draw_id_format() {
        let id = DrawId::generate(&["wa-lotto", "2014-12-31"]);
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(format!("{:?}", id).starts_with("DrawId("));
    }
}
