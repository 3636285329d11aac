//! Dynamically typed index keys for JSON records

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

/// A totally ordered key built from a JSON scalar.
///
/// Ordering across types is fixed: Null < Bool < numbers < String. `Int` and
/// `Float` are one numeric domain compared by value, so `25.5 < 26 < 26.5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// Missing field, null, array or object
    Null,
    /// Boolean value (false < true)
    Bool(bool),
    /// Integer value, including integral floats
    Int(i64),
    /// Non-integral or out-of-range float, as order-preserving bits.
    /// Build it with `from_float` so integral values land in `Int`.
    Float(u64),
    /// String value
    String(String),
}

/// 2^63, the first float above the `i64` range
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl IndexKey {
    /// Create a key from a float.
    ///
    /// Integral values inside the `i64` range, and both zeros, become `Int`
    /// so `30.0`, `-0.0` and `0` match their integer forms. Everything else
    /// is stored as bits remapped so integer comparison of the bits matches
    /// numeric order, including negatives.
    pub fn from_float(v: f64) -> Self {
        if v.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&v) {
            return IndexKey::Int(v as i64);
        }
        let bits = v.to_bits();
        let ordered = if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        };
        IndexKey::Float(ordered)
    }

    /// Numeric value as a float; `None` for non-numeric keys
    pub fn as_float(&self) -> Option<f64> {
        match self {
            IndexKey::Int(i) => Some(*i as f64),
            IndexKey::Float(ordered) => {
                let bits = if (ordered >> 63) == 1 {
                    ordered ^ (1 << 63)
                } else {
                    !ordered
                };
                Some(f64::from_bits(bits))
            }
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            IndexKey::Null => 0,
            IndexKey::Bool(_) => 1,
            IndexKey::Int(_) | IndexKey::Float(_) => 2,
            IndexKey::String(_) => 3,
        }
    }

    /// Create a key from a JSON value.
    ///
    /// Returns `None` for arrays and objects, which are not indexable.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(IndexKey::Null),
            Value::Bool(b) => Some(IndexKey::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(IndexKey::Int(i))
                } else {
                    n.as_f64().map(IndexKey::from_float)
                }
            }
            Value::String(s) => Some(IndexKey::String(s.clone())),
            _ => None,
        }
    }

    /// Parse a command-line literal: JSON scalars first, plain string otherwise.
    ///
    /// `42` is an Int, `"42"` and `abc` are Strings.
    pub fn parse_literal(literal: &str) -> Self {
        serde_json::from_str::<Value>(literal)
            .ok()
            .and_then(|v| IndexKey::from_json(&v))
            .unwrap_or_else(|| IndexKey::String(literal.to_string()))
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (IndexKey::Bool(a), IndexKey::Bool(b)) => a.cmp(b),
            (IndexKey::Int(a), IndexKey::Int(b)) => a.cmp(b),
            (IndexKey::Float(a), IndexKey::Float(b)) => a.cmp(b),
            (IndexKey::String(a), IndexKey::String(b)) => a.cmp(b),
            // A Float is never integral inside the i64 range, so the only
            // tie is at the range edge; break it so Ord agrees with Eq.
            (IndexKey::Int(i), IndexKey::Float(_)) => {
                let f = other.as_float().unwrap_or(f64::NAN);
                (*i as f64).total_cmp(&f).then(Ordering::Less)
            }
            (IndexKey::Float(_), IndexKey::Int(_)) => other.cmp(self).reverse(),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Null => write!(f, "null"),
            IndexKey::Bool(b) => write!(f, "{}", b),
            IndexKey::Int(i) => write!(f, "{}", i),
            IndexKey::Float(_) => write!(f, "{}", self.as_float().unwrap_or(f64::NAN)),
            IndexKey::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// Field extractor over JSON object records.
///
/// Records lacking the field, or holding a non-scalar there, index as `Null`.
pub fn json_field(name: impl Into<String>) -> impl Fn(&Value) -> IndexKey + Send + Sync + 'static {
    let name = name.into();
    move |record: &Value| {
        record
            .get(&name)
            .and_then(IndexKey::from_json)
            .unwrap_or(IndexKey::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_ordering() {
        let keys = vec![
            IndexKey::Null,
            IndexKey::Bool(false),
            IndexKey::Bool(true),
            IndexKey::from_float(f64::NEG_INFINITY),
            IndexKey::Int(-100),
            IndexKey::from_float(-2.5),
            IndexKey::Int(0),
            IndexKey::from_float(1.5),
            IndexKey::Int(100),
            IndexKey::from_float(1e30),
            IndexKey::String("aaa".to_string()),
            IndexKey::String("zzz".to_string()),
        ];

        for i in 1..keys.len() {
            assert!(keys[i - 1] < keys[i], "{} should sort before {}", keys[i - 1], keys[i]);
        }
    }

    #[test]
    fn test_float_bits_round_trip() {
        for v in [-10.25, -0.5, 0.0, 3.75, 1e9, 1e30] {
            assert_eq!(IndexKey::from_float(v).as_float(), Some(v));
        }
        assert_eq!(IndexKey::Bool(true).as_float(), None);
    }

    #[test]
    fn test_integral_floats_and_zeros_normalize_to_int() {
        assert_eq!(IndexKey::from_float(30.0), IndexKey::Int(30));
        assert_eq!(IndexKey::from_float(-0.0), IndexKey::Int(0));
        assert_eq!(IndexKey::from_float(0.0), IndexKey::from_float(-0.0));
        assert_eq!(IndexKey::from_json(&json!(-0.0)), Some(IndexKey::Int(0)));
        assert_eq!(IndexKey::parse_literal("30.0"), IndexKey::Int(30));
    }

    #[test]
    fn test_int_and_float_compare_by_value() {
        assert!(IndexKey::from_float(25.5) < IndexKey::Int(26));
        assert!(IndexKey::Int(26) < IndexKey::from_float(26.5));
        assert!(IndexKey::Int(i64::MIN) > IndexKey::from_float(-1e30));
        assert!(IndexKey::Int(i64::MAX) < IndexKey::from_float(I64_BOUND));
        assert!(IndexKey::from_float(f64::INFINITY) > IndexKey::Int(i64::MAX));
        assert!(IndexKey::from_float(-0.5) < IndexKey::Int(0));
    }

    #[test]
    fn test_mixed_numeric_field_queries() {
        use crate::index::{BTreeIndex, SearchMethod};
        use std::sync::Arc;

        let records = vec![
            json!({"age": 30}),
            json!({"age": 25.5}),
            json!({"age": -0.0}),
            json!({"age": 26.0}),
            json!({"age": 0}),
        ];
        let index = BTreeIndex::new(Arc::new(records), json_field("age"));

        let mut gt = index.find(&IndexKey::parse_literal("26"), SearchMethod::Gt);
        gt.sort_unstable();
        assert_eq!(gt, vec![0]);

        let mut lt = index.find(&IndexKey::parse_literal("26"), SearchMethod::Lt);
        lt.sort_unstable();
        assert_eq!(lt, vec![1, 2, 4]);

        let mut zeros = index.get(&IndexKey::parse_literal("0"));
        zeros.sort_unstable();
        assert_eq!(zeros, vec![2, 4]);

        assert_eq!(index.get(&IndexKey::Int(26)), vec![3]);
        let mut range = index.get_range(&IndexKey::Int(1), &IndexKey::Int(30), true, false);
        range.sort_unstable();
        assert_eq!(range, vec![1, 3]);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(IndexKey::from_json(&json!(true)), Some(IndexKey::Bool(true)));
        assert_eq!(IndexKey::from_json(&json!(42)), Some(IndexKey::Int(42)));
        assert_eq!(
            IndexKey::from_json(&json!("hello")),
            Some(IndexKey::String("hello".to_string()))
        );
        assert_eq!(IndexKey::from_json(&json!(null)), Some(IndexKey::Null));
        assert_eq!(IndexKey::from_json(&json!([1, 2, 3])), None);
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(IndexKey::parse_literal("42"), IndexKey::Int(42));
        assert_eq!(IndexKey::parse_literal("4.5"), IndexKey::from_float(4.5));
        assert_eq!(IndexKey::parse_literal("\"42\""), IndexKey::String("42".to_string()));
        assert_eq!(IndexKey::parse_literal("bob"), IndexKey::String("bob".to_string()));
        assert_eq!(IndexKey::parse_literal("[1]"), IndexKey::String("[1]".to_string()));
    }

    #[test]
    fn test_json_field_extractor() {
        let field = json_field("age");
        assert_eq!(field(&json!({"age": 30})), IndexKey::Int(30));
        assert_eq!(field(&json!({"name": "x"})), IndexKey::Null);
        assert_eq!(field(&json!({"age": {"years": 3}})), IndexKey::Null);
    }
}
