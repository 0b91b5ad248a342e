use crate::error::{SiteSplitError, SiteSplitResult};
use crate::normalize::normalize;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Departments and sub-categories
//==============================================================================

/// Department column groups of the attendance sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    Inbound,
    #[serde(rename = "DA")]
    Da,
    #[serde(rename = "ICQA")]
    Icqa,
    #[serde(rename = "CRETs")]
    Crets,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Inbound,
        Department::Da,
        Department::Icqa,
        Department::Crets,
    ];

    /// Name used as the payload key and in printed mappings
    pub fn name(self) -> &'static str {
        match self {
            Department::Inbound => "Inbound",
            Department::Da => "DA",
            Department::Icqa => "ICQA",
            Department::Crets => "CRETs",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Workforce split inside a department: regular (AMZN) or temporary (TEMP)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubCategory {
    #[serde(rename = "AMZN")]
    Amzn,
    #[serde(rename = "TEMP")]
    Temp,
}

impl SubCategory {
    pub const ALL: [SubCategory; 2] = [SubCategory::Amzn, SubCategory::Temp];

    /// Payload key, which is also the normalized header token
    pub fn key(self) -> &'static str {
        match self {
            SubCategory::Amzn => "AMZN",
            SubCategory::Temp => "TEMP",
        }
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

//==============================================================================
// Cell references
//==============================================================================

/// Convert a 1-based column number to its letter form
///
/// Examples:
/// - 1 → A
/// - 26 → Z
/// - 27 → AA
pub fn column_letter(column: u32) -> String {
    let mut result = String::new();
    let mut idx = column.saturating_sub(1);

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert column letters (case-insensitive) to a 1-based column number
pub fn column_number(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, ch| {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// A1-style address of a single cell, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.column), self.row)
    }
}

impl FromStr for CellRef {
    type Err = SiteSplitError;

    fn from_str(s: &str) -> SiteSplitResult<Self> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| SiteSplitError::InvalidCellRef(s.to_string()))?;
        let (letters, digits) = trimmed.split_at(split);

        let column =
            column_number(letters).ok_or_else(|| SiteSplitError::InvalidCellRef(s.to_string()))?;
        let row: u32 = digits
            .parse()
            .map_err(|_| SiteSplitError::InvalidCellRef(s.to_string()))?;
        if row == 0 {
            return Err(SiteSplitError::InvalidCellRef(s.to_string()));
        }

        Ok(CellRef { row, column })
    }
}

impl Serialize for CellRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

//==============================================================================
// Cell mapping
//==============================================================================

/// The AMZN/TEMP target pair of one department on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeptCells {
    #[serde(rename = "AMZN")]
    pub amzn: CellRef,
    #[serde(rename = "TEMP")]
    pub temp: CellRef,
}

impl DeptCells {
    pub fn get(&self, sub: SubCategory) -> CellRef {
        match sub {
            SubCategory::Amzn => self.amzn,
            SubCategory::Temp => self.temp,
        }
    }

    /// Both targets in write order (AMZN first)
    pub fn cells(&self) -> [(SubCategory, CellRef); 2] {
        [(SubCategory::Amzn, self.amzn), (SubCategory::Temp, self.temp)]
    }
}

/// Row label → department → AMZN/TEMP cell
///
/// Insertion order is the label enumeration order; writers iterate it as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellMapping {
    rows: IndexMap<String, IndexMap<Department, DeptCells>>,
}

impl CellMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the departments of one label
    pub fn insert(&mut self, label: impl Into<String>, departments: IndexMap<Department, DeptCells>) {
        self.rows.insert(label.into(), departments);
    }

    pub fn get(&self, label: &str) -> Option<&IndexMap<Department, DeptCells>> {
        self.rows.get(label)
    }

    pub fn cell(&self, label: &str, department: Department, sub: SubCategory) -> Option<CellRef> {
        self.rows
            .get(label)
            .and_then(|depts| depts.get(&department))
            .map(|cells| cells.get(sub))
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.rows.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<Department, DeptCells>)> {
        self.rows.iter().map(|(label, depts)| (label.as_str(), depts))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of individual target cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|depts| depts.len() * 2).sum()
    }

    pub fn from_json_str(json: &str) -> SiteSplitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> SiteSplitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//==============================================================================
// Payload
//==============================================================================

/// Caller-supplied values: label → department → {AMZN, TEMP}
///
/// Any JSON shape deserializes; slices that are not objects read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new(rows: Map<String, Value>) -> Self {
        Self(rows)
    }

    /// Non-null value for one target, if supplied
    pub fn value(&self, label: &str, department: Department, sub: SubCategory) -> Option<&Value> {
        self.department(label, department)
            .and_then(|dept| dept.get(sub.key()))
            .filter(|value| !value.is_null())
    }

    /// The department object of a label, if it is an object
    pub fn department(&self, label: &str, department: Department) -> Option<&Map<String, Value>> {
        self.row(label)
            .and_then(|row| row.get(department.name()))
            .and_then(Value::as_object)
    }

    /// Row object for a label, exact key only
    pub fn row(&self, label: &str) -> Option<&Map<String, Value>> {
        self.0.get(label).and_then(Value::as_object)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    /// A key that differs from `label` but has the same normalized text
    /// (`"Shift Swap Out"` for `"Shift Swap Out "`). Never used for writes.
    pub fn near_key(&self, label: &str) -> Option<&str> {
        let wanted = normalize(label);
        self.0
            .keys()
            .filter(|key| key.as_str() != label)
            .find(|key| normalize(key) == wanted)
            .map(String::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(rows) => Payload(rows),
            _ => Payload::default(),
        })
    }
}
