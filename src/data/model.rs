use std::collections::BTreeMap;
use std::fmt;

use super::filter;

// ---------------------------------------------------------------------------
// Field – the fixed catalog schema
// ---------------------------------------------------------------------------

/// The eleven columns of the reference dataset, in feature-record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Make,
    Model,
    Trim,
    Mileage,
    Type,
    Cylinder,
    Liter,
    Doors,
    Cruise,
    Sound,
    Leather,
}

/// How a column's cells are typed when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Bool,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Make,
        Field::Model,
        Field::Trim,
        Field::Mileage,
        Field::Type,
        Field::Cylinder,
        Field::Liter,
        Field::Doors,
        Field::Cruise,
        Field::Sound,
        Field::Leather,
    ];

    /// Column header as it appears in the dataset files.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Make => "Make",
            Field::Model => "Model",
            Field::Trim => "Trim",
            Field::Mileage => "Mileage",
            Field::Type => "Type",
            Field::Cylinder => "Cylinder",
            Field::Liter => "Liter",
            Field::Doors => "Doors",
            Field::Cruise => "Cruise",
            Field::Sound => "Sound",
            Field::Leather => "Leather",
        }
    }

    /// Resolve a file header to a field, case-insensitively.
    pub fn from_column(name: &str) -> Option<Field> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.column_name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Make | Field::Model | Field::Trim | Field::Type => FieldKind::Text,
            Field::Mileage | Field::Cylinder | Field::Doors => FieldKind::Integer,
            Field::Liter => FieldKind::Float,
            Field::Cruise | Field::Sound | Field::Leather => FieldKind::Bool,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// FieldValue – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Kept `Ord` so values can live in
/// `BTreeSet`s, which gives option lists their ascending order for free.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so FieldValue can go in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Text(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v:.1}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl FieldValue {
    /// Interpret the value as `f64` for the linear model's numeric term.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Bool(b) => Some(*b as i64 as f64),
            _ => None,
        }
    }

    /// Null or blank text. Such values never appear in option lists and, as
    /// filter values, void the downstream options entirely.
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the reference dataset
// ---------------------------------------------------------------------------

/// A single vehicle listing (one row of the source table).
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Cell values by column; absent columns read as `Null`.
    pub fields: BTreeMap<Field, FieldValue>,
}

const NULL: FieldValue = FieldValue::Null;

impl Listing {
    pub fn get(&self, field: Field) -> &FieldValue {
        self.fields.get(&field).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full reference table, loaded once at startup and read-only for the
/// lifetime of the process. Top-level option lists (no upstream dependency)
/// are precomputed here; dependent lists (Model, Trim, Type) are derived on
/// demand via [`filter::options_for`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All listings (rows), in file order.
    pub listings: Vec<Listing>,
    /// Static option list for `Make`.
    pub make_options: Vec<FieldValue>,
    /// Static option list for `Cylinder`.
    pub cylinder_options: Vec<FieldValue>,
    /// Static option list for `Doors`.
    pub door_options: Vec<FieldValue>,
}

impl Catalog {
    /// Build the catalog and its static option lists from loaded rows.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let no_filter = BTreeMap::new();
        let make_options = filter::options_for(&listings, Field::Make, &no_filter);
        let cylinder_options = filter::options_for(&listings, Field::Cylinder, &no_filter);
        let door_options = filter::options_for(&listings, Field::Doors, &no_filter);
        Catalog {
            listings,
            make_options,
            cylinder_options,
            door_options,
        }
    }

    /// The degraded catalog used when the dataset fails to load: every
    /// option list is empty and stays empty.
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Distinct non-null values of `target` among rows matching `filters`.
    pub fn options_for(
        &self,
        target: Field,
        filters: &BTreeMap<Field, FieldValue>,
    ) -> Vec<FieldValue> {
        filter::options_for(&self.listings, target, filters)
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_ordering_is_ascending_per_type() {
        let mut vals = vec![
            FieldValue::Text("LeSabre".into()),
            FieldValue::Text("Century".into()),
            FieldValue::Integer(8),
            FieldValue::Integer(4),
            FieldValue::Float(3.5),
            FieldValue::Float(1.6),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                FieldValue::Integer(4),
                FieldValue::Integer(8),
                FieldValue::Float(1.6),
                FieldValue::Float(3.5),
                FieldValue::Text("Century".into()),
                FieldValue::Text("LeSabre".into()),
            ]
        );
    }

    #[test]
    fn blank_text_counts_as_missing() {
        assert!(FieldValue::Null.is_missing());
        assert!(FieldValue::Text("".into()).is_missing());
        assert!(FieldValue::Text("  ".into()).is_missing());
        assert!(!FieldValue::Text("Buick".into()).is_missing());
        assert!(!FieldValue::Integer(0).is_missing());
    }

    #[test]
    fn column_name_round_trips() {
        for field in Field::ALL {
            assert_eq!(Field::from_column(field.column_name()), Some(field));
        }
        assert_eq!(Field::from_column("make"), Some(Field::Make));
        assert_eq!(Field::from_column("Price"), None);
    }
}
