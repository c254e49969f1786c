//! Display ordering: upper-chamber members are listed before lower-chamber
//! members.

use std::cmp::Ordering;

use crate::types::DisplayRecord;

const UPPER_CHAMBERS: [&str; 2] = ["senate", "upper"];

#[must_use]
pub fn is_upper_chamber(chamber: &str) -> bool {
    UPPER_CHAMBERS.contains(&chamber)
}

/// Pairwise comparison used for display.
///
/// Equal chambers compare equal; otherwise `a` sorts first exactly when it is
/// an upper chamber. This is not a total order across providers (`senate`
/// vs `upper` is `Less` both ways), so sorting goes through
/// [`order_for_display`] instead.
#[must_use]
pub fn compare_for_display(a: &DisplayRecord, b: &DisplayRecord) -> Ordering {
    if a.chamber == b.chamber {
        Ordering::Equal
    } else if is_upper_chamber(&a.chamber) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Stable two-bucket partition: upper chambers first, everything else after,
/// input order kept within each bucket.
pub fn order_for_display(records: &mut [DisplayRecord]) {
    records.sort_by_key(|r| !is_upper_chamber(&r.chamber));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, chamber: &str) -> DisplayRecord {
        DisplayRecord {
            name: name.to_string(),
            chamber: chamber.to_string(),
            ..DisplayRecord::default()
        }
    }

    fn chambers(records: &[DisplayRecord]) -> Vec<&str> {
        records.iter().map(|r| r.chamber.as_str()).collect()
    }

    #[test]
    fn senate_before_house() {
        let mut records = vec![rec("a", "house"), rec("b", "senate")];
        order_for_display(&mut records);
        assert_eq!(chambers(&records), ["senate", "house"]);
    }

    #[test]
    fn partition_is_stable_within_buckets() {
        let mut records = vec![
            rec("rep-1", "house"),
            rec("sen-1", "senate"),
            rec("rep-2", "house"),
            rec("sen-2", "senate"),
        ];
        order_for_display(&mut records);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["sen-1", "sen-2", "rep-1", "rep-2"]);
    }

    #[test]
    fn openstates_upper_before_lower() {
        let mut records = vec![rec("a", "lower"), rec("b", "upper"), rec("c", "lower")];
        order_for_display(&mut records);
        assert_eq!(chambers(&records), ["upper", "lower", "lower"]);
    }

    #[test]
    fn unknown_chambers_sort_with_lower() {
        let mut records = vec![rec("a", ""), rec("b", "senate")];
        order_for_display(&mut records);
        assert_eq!(chambers(&records), ["senate", ""]);
    }

    #[test]
    fn compare_matches_pairwise_contract() {
        assert_eq!(
            compare_for_display(&rec("a", "senate"), &rec("b", "senate")),
            Ordering::Equal
        );
        assert_eq!(
            compare_for_display(&rec("a", "senate"), &rec("b", "house")),
            Ordering::Less
        );
        assert_eq!(
            compare_for_display(&rec("a", "house"), &rec("b", "senate")),
            Ordering::Greater
        );
        assert_eq!(
            compare_for_display(&rec("a", "lower"), &rec("b", "house")),
            Ordering::Greater
        );
    }
}
