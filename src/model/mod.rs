use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structural facts for one declared type: its name, the supertype names
/// its declaration lists, and the type names appearing as member
/// annotations in its body.
///
/// All names are syntactic identifiers exactly as written in source; no
/// resolution to fully-qualified names happens anywhere. Duplicate names
/// across files are possible and tolerated downstream, where the name is
/// the join key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Analysis {
    pub name: String,
    pub inherits: BTreeSet<String>,
    pub uses: BTreeSet<String>,
}

impl Analysis {
    pub fn new(name: String, inherits: BTreeSet<String>, uses: BTreeSet<String>) -> Self {
        Analysis {
            name,
            inherits,
            uses,
        }
    }
}

/// Derived, whole-project view for one entity: who extends it and who
/// composes/references it. Recomputed fully on each aggregation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct UsageReport {
    pub name: String,
    pub inheritors: BTreeSet<String>,
    pub users: BTreeSet<String>,
}

/// Joins a flat list of per-type analyses into one usage report per entry.
///
/// For every entity `e` (the input is not de-duplicated by name),
/// `inheritors` collects the names of all entities listing `e.name` in
/// their `inherits` set, and `users` the names of all entities listing it
/// in `uses`. Self-references are reported as-is. O(n^2) membership join;
/// analysis runs are batch and offline, so this is not a hot path.
pub fn to_usage_report(analyses: &[Analysis]) -> Vec<UsageReport> {
    analyses
        .iter()
        .map(|entity| UsageReport {
            name: entity.name.clone(),
            inheritors: analyses
                .iter()
                .filter(|other| other.inherits.contains(&entity.name))
                .map(|other| other.name.clone())
                .collect(),
            users: analyses
                .iter()
                .filter(|other| other.uses.contains(&entity.name))
                .map(|other| other.name.clone())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(name: &str, inherits: &[&str], uses: &[&str]) -> Analysis {
        Analysis::new(
            name.to_string(),
            inherits.iter().map(|s| s.to_string()).collect(),
            uses.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_yields_empty_report() {
        assert_eq!(to_usage_report(&[]), Vec::new());
    }

    #[test]
    fn inheritors_and_users_are_joined_by_name() {
        let analyses = vec![
            analysis("Processor", &[], &[]),
            analysis("ProcessorDelay", &["Processor", "Chip"], &["FormFactor"]),
            analysis("FormFactor", &[], &[]),
            analysis("Chip", &[], &["Processor"]),
        ];

        let report = to_usage_report(&analyses);
        assert_eq!(report.len(), analyses.len());

        let processor = &report[0];
        assert_eq!(processor.name, "Processor");
        assert_eq!(processor.inheritors, names(&["ProcessorDelay"]));
        assert_eq!(processor.users, names(&["Chip"]));

        let form_factor = &report[2];
        assert_eq!(form_factor.inheritors, names(&[]));
        assert_eq!(form_factor.users, names(&["ProcessorDelay"]));

        let chip = &report[3];
        assert_eq!(chip.inheritors, names(&["ProcessorDelay"]));
        assert_eq!(chip.users, names(&[]));
    }

    #[test]
    fn self_inheritance_appears_in_own_inheritors() {
        let analyses = vec![analysis("Ouroboros", &["Ouroboros"], &[])];
        let report = to_usage_report(&analyses);
        assert_eq!(report[0].inheritors, names(&["Ouroboros"]));
    }

    #[test]
    fn name_in_both_sets_is_counted_twice() {
        let analyses = vec![
            analysis("Base", &[], &[]),
            analysis("Wrapper", &["Base"], &["Base"]),
        ];
        let report = to_usage_report(&analyses);
        assert_eq!(report[0].inheritors, names(&["Wrapper"]));
        assert_eq!(report[0].users, names(&["Wrapper"]));
    }

    #[test]
    fn duplicate_names_produce_independent_entries() {
        let analyses = vec![
            analysis("Config", &[], &[]),
            analysis("Config", &[], &[]),
            analysis("Loader", &[], &["Config"]),
        ];

        let report = to_usage_report(&analyses);
        assert_eq!(report.len(), 3);
        assert_eq!(report[0].users, names(&["Loader"]));
        assert_eq!(report[1].users, names(&["Loader"]));
    }

    #[test]
    fn aggregation_matches_membership_definition() {
        let analyses = vec![
            analysis("A", &["B"], &["C"]),
            analysis("B", &["B"], &["A", "C"]),
            analysis("C", &[], &["C"]),
        ];

        let report = to_usage_report(&analyses);
        for entry in &report {
            let expected_inheritors: BTreeSet<String> = analyses
                .iter()
                .filter(|a| a.inherits.contains(&entry.name))
                .map(|a| a.name.clone())
                .collect();
            let expected_users: BTreeSet<String> = analyses
                .iter()
                .filter(|a| a.uses.contains(&entry.name))
                .map(|a| a.name.clone())
                .collect();
            assert_eq!(entry.inheritors, expected_inheritors);
            assert_eq!(entry.users, expected_users);
        }
    }
}
