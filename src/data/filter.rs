use std::collections::{BTreeMap, BTreeSet};

use super::model::{Field, FieldValue, Listing};

// ---------------------------------------------------------------------------
// Cascading option filter: distinct target values under fixed upstream fields
// ---------------------------------------------------------------------------

/// Upstream constraints: field → required value, all of which must match.
pub type FilterMap = BTreeMap<Field, FieldValue>;

/// Return the sorted distinct non-null values of `target` among listings
/// matching every entry in `filters`.
///
/// * Any filter value that is null or blank voids the whole query → empty
///   result (an incomplete upstream selection offers no downstream options).
/// * An empty catalog yields an empty result for any target and filters.
/// * Deduplication happens in a `BTreeSet`, so the output is strictly
///   ascending with no ties.
pub fn options_for(listings: &[Listing], target: Field, filters: &FilterMap) -> Vec<FieldValue> {
    if filters.values().any(FieldValue::is_missing) {
        return Vec::new();
    }

    let mut values: BTreeSet<FieldValue> = BTreeSet::new();
    for listing in listings {
        if filters.iter().all(|(field, want)| listing.get(*field) == want) {
            let value = listing.get(target);
            if !value.is_missing() {
                values.insert(value.clone());
            }
        }
    }
    values.into_iter().collect()
}

/// Convenience for building a [`FilterMap`] from field/value pairs.
pub fn filter_map<I>(pairs: I) -> FilterMap
where
    I: IntoIterator<Item = (Field, FieldValue)>,
{
    pairs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(make: &str, model: &str, trim: &str, vtype: &str) -> Listing {
        let mut fields = BTreeMap::new();
        fields.insert(Field::Make, FieldValue::Text(make.into()));
        fields.insert(Field::Model, FieldValue::Text(model.into()));
        fields.insert(Field::Trim, FieldValue::Text(trim.into()));
        fields.insert(Field::Type, FieldValue::Text(vtype.into()));
        fields.insert(Field::Cylinder, FieldValue::Integer(6));
        Listing { fields }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("Buick", "Century", "Base", "Sedan"),
            listing("Buick", "LeSabre", "Base", "Sedan"),
            listing("Buick", "Century", "Base", "Sedan"),
            listing("Cadillac", "CTS", "Luxury", "Sedan"),
        ]
    }

    #[test]
    fn models_for_make_are_sorted_and_distinct() {
        let rows = sample();
        let opts = options_for(
            &rows,
            Field::Model,
            &filter_map([(Field::Make, FieldValue::Text("Buick".into()))]),
        );
        assert_eq!(
            opts,
            vec![
                FieldValue::Text("Century".into()),
                FieldValue::Text("LeSabre".into()),
            ]
        );
    }

    #[test]
    fn output_is_strictly_ascending() {
        let rows = sample();
        let opts = options_for(&rows, Field::Model, &FilterMap::new());
        assert!(opts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn missing_filter_value_yields_no_options() {
        let rows = sample();
        for empty in [FieldValue::Null, FieldValue::Text(String::new())] {
            let opts = options_for(
                &rows,
                Field::Trim,
                &filter_map([
                    (Field::Make, FieldValue::Text("Buick".into())),
                    (Field::Model, empty),
                ]),
            );
            assert!(opts.is_empty());
        }
    }

    #[test]
    fn empty_catalog_yields_no_options() {
        let rows: Vec<Listing> = Vec::new();
        for field in Field::ALL {
            assert!(options_for(&rows, field, &FilterMap::new()).is_empty());
            assert!(options_for(
                &rows,
                field,
                &filter_map([(Field::Make, FieldValue::Text("Buick".into()))]),
            )
            .is_empty());
        }
    }

    #[test]
    fn unmatched_filter_yields_no_options() {
        let rows = sample();
        let opts = options_for(
            &rows,
            Field::Model,
            &filter_map([(Field::Make, FieldValue::Text("Saturn".into()))]),
        );
        assert!(opts.is_empty());
    }

    #[test]
    fn null_target_cells_are_excluded() {
        let mut rows = sample();
        rows[0].fields.insert(Field::Trim, FieldValue::Null);
        let opts = options_for(
            &rows,
            Field::Trim,
            &filter_map([
                (Field::Make, FieldValue::Text("Buick".into())),
                (Field::Model, FieldValue::Text("Century".into())),
            ]),
        );
        // Row 2 still carries "Base"; row 0's null must not surface.
        assert_eq!(opts, vec![FieldValue::Text("Base".into())]);
        assert!(!opts.contains(&FieldValue::Null));
    }

    #[test]
    fn type_depends_on_full_upstream_chain() {
        let rows = sample();
        let opts = options_for(
            &rows,
            Field::Type,
            &filter_map([
                (Field::Make, FieldValue::Text("Cadillac".into())),
                (Field::Model, FieldValue::Text("CTS".into())),
                (Field::Trim, FieldValue::Text("Luxury".into())),
            ]),
        );
        assert_eq!(opts, vec![FieldValue::Text("Sedan".into())]);
    }
}
