use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const GPA_COLUMN: &str = "GPA";
pub const MAJOR_COLUMN: &str = "Major";

/// A single cell of the scholarship table, typed per column at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Integer(n) => serializer.serialize_i64(*n),
            CellValue::Float(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One row of the dataset.
///
/// `gpa` and `major` are the two filter keys pulled out at load time; `fields`
/// holds every column (those two included) in source order and is what gets
/// serialized back to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ScholarshipRecord {
    /// `None` when the cell was empty or not a finite number. Such rows never match.
    pub gpa: Option<f64>,
    pub major: String,
    /// `major` lower-cased once at load so matching never allocates per record.
    pub major_lower: String,
    pub fields: Vec<(String, CellValue)>,
}

impl ScholarshipRecord {
    pub fn new(gpa: Option<f64>, major: String, fields: Vec<(String, CellValue)>) -> Self {
        Self {
            gpa,
            major_lower: major.to_lowercase(),
            major,
            fields,
        }
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }
}

impl Serialize for ScholarshipRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// The in-memory scholarship table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<ScholarshipRecord>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<ScholarshipRecord>) -> Self {
        Self { headers, records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Request body for `POST /scholarships`.
///
/// Every field is optional and lenient: `gpa` accepts a number or a numeric
/// string and falls back to 0, `major` falls back to an empty string. Extra
/// fields sent by the form (grade level, state, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StudentQuery {
    #[serde(default, deserialize_with = "lenient_gpa")]
    pub gpa: f64,
    #[serde(default, deserialize_with = "lenient_major")]
    pub major: String,
    #[serde(default, rename = "gpaScale", deserialize_with = "lenient_scale")]
    pub gpa_scale: Option<String>,
}

impl StudentQuery {
    pub fn new(gpa: f64, major: impl Into<String>) -> Self {
        Self {
            gpa,
            major: major.into(),
            gpa_scale: None,
        }
    }
}

/// Coerces a JSON value into a GPA. Anything that is not a finite number
/// (directly or as a string) becomes 0.
pub fn coerce_gpa(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|g| g.is_finite()).unwrap_or(0.0)
}

fn lenient_gpa<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(coerce_gpa(&Value::deserialize(deserializer)?))
}

fn lenient_major<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_scale<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}
