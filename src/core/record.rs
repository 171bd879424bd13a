use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One dataset row: a unique key plus integer-valued fields in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    key: String,
    fields: IndexMap<String, i64>,
}

impl Record {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field insertion, mostly used by tests and fixtures.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: i64) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn set_field(&mut self, field: impl Into<String>, value: i64) {
        self.fields.insert(field.into(), value);
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the field value, or `0` when the field is absent.
    ///
    /// Absent fields follow the same policy as defective cells: they count as
    /// zero so category comparisons and axis placement stay well-defined.
    #[must_use]
    pub fn value(&self, field: &str) -> i64 {
        self.fields.get(field).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<i64> {
        self.fields.get(field).copied()
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, i64> {
        &self.fields
    }
}

/// A cell that failed integer coercion and was defaulted to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityIssue {
    /// Zero-based data row (header excluded).
    pub row: usize,
    pub key: String,
    pub field: String,
    pub raw: String,
}

/// Coerces a raw cell with integer-prefix semantics.
///
/// Leading/trailing whitespace is ignored, an optional sign is accepted and
/// the longest run of leading ASCII digits is parsed, so `"4.9"` yields `4`
/// and `"12abc"` yields `12`. Returns `None` when no digit follows the
/// optional sign or when the prefix overflows `i64`.
#[must_use]
pub fn coerce_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::{Record, coerce_integer};

    #[test]
    fn coerce_integer_uses_leading_digits() {
        assert_eq!(coerce_integer("245"), Some(245));
        assert_eq!(coerce_integer(" 4.9 "), Some(4));
        assert_eq!(coerce_integer("12abc"), Some(12));
        assert_eq!(coerce_integer("-3"), Some(-3));
        assert_eq!(coerce_integer("+7"), Some(7));
    }

    #[test]
    fn coerce_integer_rejects_non_numeric_cells() {
        assert_eq!(coerce_integer(""), None);
        assert_eq!(coerce_integer("n/a"), None);
        assert_eq!(coerce_integer("-"), None);
        assert_eq!(coerce_integer(".5"), None);
    }

    #[test]
    fn missing_field_reads_as_zero() {
        let record = Record::new("Andorra").with_field("beer_servings", 245);
        assert_eq!(record.value("beer_servings"), 245);
        assert_eq!(record.value("wine_servings"), 0);
        assert_eq!(record.get("wine_servings"), None);
    }
}
