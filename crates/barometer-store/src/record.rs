//! History record layout and migration of older encodings.
//!
//! The current on-disk encoding of a record is a positional JSON array:
//! the ISO date followed by [`FIELD_COUNT`] nullable numbers in
//! [`FIELD_NAMES`] order. Older artifacts hold either shorter positional rows
//! or objects keyed by field name; both are read through [`StoredRecord`] and
//! converted immediately.

use std::collections::BTreeMap;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use barometer_traits::{BarometerError, Date, Result};

/// Number of value fields in a record.
pub const FIELD_COUNT: usize = 18;

/// Value fields in positional order.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "growth_index",
    "inflation_index",
    "liquidity_index",
    "sentiment_index",
    "leading_index",
    "z_pmi",
    "z_ratio",
    "z_t5yifr",
    "z_commodity",
    "net_liquidity_raw",
    "score_momentum",
    "score_vix",
    "score_putcall",
    "score_safehaven",
    "score_junk",
    "z_coppergold",
    "z_betavol",
    "z_yieldspread",
];

/// Field names used by legacy keyed records, mapped to their current field.
pub const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("macro", "growth_index"),
    ("growth", "growth_index"),
    ("inflation", "inflation_index"),
    ("liquidity", "liquidity_index"),
    ("sentiment", "sentiment_index"),
    ("leading", "leading_index"),
];

/// Decimal places kept when a record is built from computed values.
pub const RECORD_DECIMALS: i32 = 4;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Position of a field, accepting current names and legacy aliases.
pub fn field_index(name: &str) -> Option<usize> {
    let canonical = LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, field)| *field);
    FIELD_NAMES.iter().position(|field| *field == canonical)
}

/// Rounds to [`RECORD_DECIMALS`] places.
pub fn round_value(value: f64) -> f64 {
    let scale = 10f64.powi(RECORD_DECIMALS);
    (value * scale).round() / scale
}

/// One dated observation of every index and component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct HistoryRecord {
    date: Date,
    values: [Option<f64>; FIELD_COUNT],
}

impl HistoryRecord {
    /// Creates a record from positional values.
    pub const fn new(date: Date, values: [Option<f64>; FIELD_COUNT]) -> Self {
        Self { date, values }
    }

    /// Builds a record by looking up every field by name.
    ///
    /// Values are rounded to [`RECORD_DECIMALS`] places; non-finite values
    /// become undefined.
    pub fn from_lookup(date: Date, lookup: impl Fn(&str) -> Option<f64>) -> Self {
        let values = FIELD_NAMES.map(|field| {
            lookup(field)
                .filter(|v| v.is_finite())
                .map(round_value)
        });
        Self { date, values }
    }

    /// Returns the record date.
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Returns the positional values.
    pub const fn values(&self) -> &[Option<f64>; FIELD_COUNT] {
        &self.values
    }

    /// Returns a value by field name (legacy aliases accepted).
    pub fn get(&self, field: &str) -> Option<f64> {
        field_index(field).and_then(|i| self.values[i])
    }

    /// Number of defined fields.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

impl Serialize for HistoryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(FIELD_COUNT + 1))?;
        seq.serialize_element(&self.date.format(DATE_FORMAT).to_string())?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

/// A record as found on disk, before migration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    /// `[date, f1, f2, ...]`, possibly shorter or longer than the current layout.
    Positional(Vec<Value>),
    /// `{"date": ..., "<field>": ...}` with current or legacy field names.
    LegacyNamed(LegacyRecord),
}

/// Body of a field-keyed legacy record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyRecord {
    /// Record date as written
    pub date: String,

    /// Every other key
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl StoredRecord {
    /// Whether this record is in an older encoding.
    pub fn needs_migration(&self) -> bool {
        match self {
            Self::Positional(row) => row.len() != FIELD_COUNT + 1,
            Self::LegacyNamed(_) => true,
        }
    }
}

impl TryFrom<StoredRecord> for HistoryRecord {
    type Error = BarometerError;

    fn try_from(stored: StoredRecord) -> Result<Self> {
        match stored {
            StoredRecord::Positional(row) => {
                let (date, fields) = row.split_first().ok_or_else(|| {
                    BarometerError::InvalidData("empty positional record".to_string())
                })?;
                let date = match date {
                    Value::String(s) => parse_date(s)?,
                    other => {
                        return Err(BarometerError::InvalidData(format!(
                            "record date must be a string, found {other}"
                        )));
                    }
                };

                let mut values = [None; FIELD_COUNT];
                for (slot, value) in values.iter_mut().zip(fields) {
                    *slot = number(value);
                }
                Ok(Self::new(date, values))
            }
            StoredRecord::LegacyNamed(legacy) => {
                let date = parse_date(&legacy.date)?;
                let mut values = [None; FIELD_COUNT];

                // aliases first so a current field name present in the same
                // record takes precedence
                let (current, aliased): (Vec<_>, Vec<_>) = legacy
                    .fields
                    .iter()
                    .partition(|(key, _)| FIELD_NAMES.contains(&key.as_str()));
                for (key, value) in aliased.into_iter().chain(current) {
                    if let Some(i) = field_index(key) {
                        values[i] = number(value);
                    }
                }
                Ok(Self::new(date, values))
            }
        }
    }
}

fn parse_date(raw: &str) -> Result<Date> {
    Date::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| {
            // timestamps such as "2024-01-02T00:00:00" or "2024-01-02 00:00:00"
            let prefix = raw.get(..10).unwrap_or(raw);
            Date::parse_from_str(prefix, DATE_FORMAT)
        })
        .map_err(|e| BarometerError::InvalidData(format!("invalid record date '{raw}': {e}")))
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn parse(value: Value) -> HistoryRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_field_index_and_aliases() {
        assert_eq!(field_index("growth_index"), Some(0));
        assert_eq!(field_index("macro"), Some(0));
        assert_eq!(field_index("leading"), Some(4));
        assert_eq!(field_index("z_yieldspread"), Some(17));
        assert_eq!(field_index("unknown"), None);
    }

    #[test]
    fn test_from_lookup_rounds() {
        let record = HistoryRecord::from_lookup(d(1), |field| match field {
            "growth_index" => Some(0.123_456),
            "score_vix" => Some(66.666_66),
            "z_pmi" => Some(f64::NAN),
            _ => None,
        });

        assert_eq!(record.get("growth_index"), Some(0.1235));
        assert_eq!(record.get("score_vix"), Some(66.6667));
        assert_eq!(record.get("z_pmi"), None);
        assert_eq!(record.defined_count(), 2);
    }

    #[test]
    fn test_serializes_positionally() {
        let mut values = [None; FIELD_COUNT];
        values[0] = Some(0.5);
        values[17] = Some(-1.25);
        let json = serde_json::to_string(&HistoryRecord::new(d(2), values)).unwrap();

        assert!(json.starts_with(r#"["2024-05-02",0.5,null,"#));
        assert!(json.ends_with(",-1.25]"));
        assert_eq!(json.matches(',').count(), FIELD_COUNT);
    }

    #[test]
    fn test_positional_round_trip() {
        let record = HistoryRecord::from_lookup(d(3), |field| {
            field_index(field).map(|i| i as f64 * 0.5 - 2.0)
        });
        let json = serde_json::to_string(&record).unwrap();
        let back: HistoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_short_positional_row_is_padded() {
        let record = parse(json!(["2024-05-06", 0.1, 0.2, 0.3, 0.4, 0.5]));

        assert_eq!(record.get("leading_index"), Some(0.5));
        assert!(record.values()[5..].iter().all(Option::is_none));
    }

    #[test]
    fn test_long_positional_row_is_truncated() {
        let mut row = vec![json!("2024-05-06")];
        row.extend((0..20).map(|i| json!(i)));
        let record = parse(Value::Array(row));

        assert_eq!(record.values()[17], Some(17.0));
    }

    #[test]
    fn test_legacy_named_record() {
        let record = parse(json!({
            "date": "2024-05-07",
            "macro": 0.42,
            "liquidity": -0.1,
            "sentiment": 55.0,
            "leading": null,
            "comment": "ignored"
        }));

        assert_eq!(record.date(), d(7));
        assert_eq!(record.get("growth_index"), Some(0.42));
        assert_eq!(record.get("liquidity_index"), Some(-0.1));
        assert_eq!(record.get("sentiment_index"), Some(55.0));
        assert_eq!(record.get("inflation_index"), None);
        assert_eq!(record.get("leading_index"), None);
        assert_eq!(record.defined_count(), 3);
    }

    #[test]
    fn test_current_name_wins_over_alias() {
        let record = parse(json!({
            "date": "2024-05-07",
            "macro": 1.0,
            "growth_index": 2.0
        }));
        assert_eq!(record.get("growth_index"), Some(2.0));
    }

    #[test]
    fn test_migration_matches_new_format() {
        let legacy = parse(json!({
            "date": "2024-05-08",
            "growth": 0.3,
            "inflation": 0.2,
            "z_vix": 1.0,
            "score_vix": 40.0
        }));
        let positional = parse(json!([
            "2024-05-08", 0.3, 0.2, null, null, null, null, null, null, null, null, null, 40.0
        ]));
        assert_eq!(legacy, positional);
    }

    #[test]
    fn test_timestamp_dates_accepted() {
        let record = parse(json!({"date": "2024-05-09 16:00:00", "growth": 1.0}));
        assert_eq!(record.date(), d(9));
    }

    #[test]
    fn test_invalid_records_rejected() {
        assert!(serde_json::from_value::<HistoryRecord>(json!([])).is_err());
        assert!(serde_json::from_value::<HistoryRecord>(json!([20240501, 1.0])).is_err());
        assert!(serde_json::from_value::<HistoryRecord>(json!(["yesterday", 1.0])).is_err());
        assert!(serde_json::from_value::<HistoryRecord>(json!({"growth": 1.0})).is_err());
    }

    #[test]
    fn test_needs_migration() {
        let short: StoredRecord = serde_json::from_value(json!(["2024-05-01", 1.0])).unwrap();
        let keyed: StoredRecord =
            serde_json::from_value(json!({"date": "2024-05-01", "macro": 1.0})).unwrap();
        assert!(short.needs_migration());
        assert!(keyed.needs_migration());

        let current = serde_json::to_value(HistoryRecord::new(d(1), [None; FIELD_COUNT])).unwrap();
        let current: StoredRecord = serde_json::from_value(current).unwrap();
        assert!(!current.needs_migration());
    }
}
