//! Bundle valuation and content fingerprints.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ids::TypeId;

/// Aggregated market value and packaged volume of a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationTotals {
    pub buy: f64,
    pub sell: f64,
    pub volume: f64,
}

impl ValuationTotals {
    /// Clamp negative or non-finite oracle values to zero.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            buy: clean(self.buy),
            sell: clean(self.sell),
            volume: clean(self.volume),
        }
    }
}

/// One line of a human-readable appraisal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalLine {
    pub name: String,
    pub quantity: i64,
}

impl std::fmt::Display for AppraisalLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.name, self.quantity)
    }
}

/// Deterministic digest of a bundle's `(type, quantity)` multiset.
///
/// Order of the input does not matter; any change of a quantity or type
/// changes the fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(pairs: impl IntoIterator<Item = (TypeId, i64)>) -> Self {
        let mut pairs: Vec<(i64, i64)> = pairs.into_iter().map(|(t, q)| (t.get(), q)).collect();
        pairs.sort_unstable();

        let mut hasher = Sha256::new();
        for (type_id, quantity) in pairs {
            hasher.update(type_id.to_le_bytes());
            hasher.update(quantity.to_le_bytes());
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(pairs: &[(i64, i64)]) -> Fingerprint {
        Fingerprint::of(pairs.iter().map(|&(t, q)| (TypeId::new(t), q)))
    }

    #[test]
    fn fingerprint_ignores_order() {
        assert_eq!(fp(&[(34, 10), (35, 5)]), fp(&[(35, 5), (34, 10)]));
    }

    #[test]
    fn fingerprint_changes_with_quantity() {
        assert_ne!(fp(&[(34, 10)]), fp(&[(34, 11)]));
    }

    #[test]
    fn fingerprint_keeps_duplicates() {
        assert_ne!(fp(&[(34, 10)]), fp(&[(34, 10), (34, 10)]));
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        let f = fp(&[]);
        assert_eq!(f.as_str().len(), 64);
        assert!(f.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn appraisal_line_format() {
        let line = AppraisalLine {
            name: "Tritanium".into(),
            quantity: 1_000,
        };
        assert_eq!(line.to_string(), "Tritanium x1000");
    }

    #[test]
    fn sanitized_drops_negative_and_nan() {
        let totals = ValuationTotals {
            buy: -1.0,
            sell: f64::NAN,
            volume: 12.5,
        }
        .sanitized();
        assert_eq!(totals, ValuationTotals { buy: 0.0, sell: 0.0, volume: 12.5 });
    }
}
