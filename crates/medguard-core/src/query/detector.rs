//! Cross-medicine interaction detector.
//!
//! For every pair of distinct selected medicines, compares each component of
//! one against each component of the other. Every non-identical component
//! pair yields one `"Checked {a} and {b}: no known interaction"` line.
//!
//! Known limitation: the interaction catalog only exists at build time, and the
//! detector never reports a positive cross-medicine interaction. Each
//! medicine's own warning is precomputed in
//! [`Medicine::interaction_warning`](crate::models::Medicine).

use crate::models::Medicine;

/// Report lines for every cross-medicine component comparison.
///
/// Expects at least two medicines; callers enforce this. Medicines are keyed by
/// name: a repeated name keeps its first position and its last components.
/// Output follows combination order over the input sequence.
pub fn detect(medicines: &[Medicine]) -> Vec<String> {
    let mut by_name: Vec<(&str, &[String])> = Vec::with_capacity(medicines.len());
    for medicine in medicines {
        let components = medicine.components.as_slice();
        match by_name.iter_mut().find(|(name, _)| *name == medicine.name) {
            Some(entry) => entry.1 = components,
            None => by_name.push((medicine.name.as_str(), components)),
        }
    }

    let mut report = Vec::new();
    for (i, (first, first_components)) in by_name.iter().enumerate() {
        for (second, second_components) in &by_name[i + 1..] {
            for a in first_components.iter() {
                for b in second_components.iter() {
                    if a == b {
                        continue;
                    }
                    report.push(format!(
                        "Checked {} and {}: no known interaction",
                        first, second
                    ));
                }
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(name: &str, components: &[&str]) -> Medicine {
        let mut medicine = Medicine::new(name.into(), String::new());
        medicine.components = components.iter().map(|c| c.to_string()).collect();
        medicine
    }

    #[test]
    fn test_disjoint_pair_yields_one_line() {
        let report = detect(&[medicine("crocin", &["paracetamol"]), medicine("brufen", &["ibuprofen"])]);

        assert_eq!(report, vec!["Checked crocin and brufen: no known interaction"]);
    }

    #[test]
    fn test_one_line_per_non_identical_component_pair() {
        let report = detect(&[
            medicine("m1", &["a", "b"]),
            medicine("m2", &["b", "c"]),
        ]);

        // (a,b) (a,c) (b,c) are reported, (b,b) is skipped
        assert_eq!(report.len(), 3);
        assert!(report.iter().all(|line| line == "Checked m1 and m2: no known interaction"));
    }

    #[test]
    fn test_identical_components_only() {
        let report = detect(&[medicine("m1", &["a"]), medicine("m2", &["a"])]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_combination_order() {
        let report = detect(&[
            medicine("m1", &["a"]),
            medicine("m2", &["b"]),
            medicine("m3", &["c"]),
        ]);

        assert_eq!(
            report,
            vec![
                "Checked m1 and m2: no known interaction",
                "Checked m1 and m3: no known interaction",
                "Checked m2 and m3: no known interaction",
            ]
        );
    }

    #[test]
    fn test_repeated_name_keeps_first_position_last_components() {
        let report = detect(&[
            medicine("m1", &["a"]),
            medicine("m2", &["b"]),
            medicine("m1", &["b"]),
        ]);

        // m1 now has only "b", identical to m2's only component
        assert!(report.is_empty());
    }

    #[test]
    fn test_medicine_without_components() {
        let report = detect(&[medicine("m1", &[]), medicine("m2", &["b"])]);
        assert!(report.is_empty());
    }
}
