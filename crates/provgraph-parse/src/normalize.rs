//! Field normalizers
//!
//! Two bespoke repairs the transport format needs: locale-tolerant
//! parsing of string-encoded elapsed times, and resolution of
//! snapshot-typed data values against the run's provenance directory.

use provgraph_model::{DataNode, Environment};

/// Parse an elapsed-time string, repairing locale-damaged punctuation.
///
/// Legacy producers format the number under whatever locale the traced
/// script ran in, so `.` and `,` may be swapped or used as digit
/// grouping. The repair splits at every separator, keeps the last
/// segment as the fraction, and re-joins the rest: `"1,234.5"` and
/// `"1.234,5"` both come back as `1234.5`.
///
/// Returns `None` when the repaired text still is not a number; the
/// caller surfaces that as a decode error.
#[must_use]
pub fn parse_elapsed(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return Some(v);
    }
    let segments: Vec<&str> = trimmed.split([',', '.']).collect();
    let (fraction, whole) = segments.split_last()?;
    if whole.is_empty() {
        return None;
    }
    format!("{}.{fraction}", whole.concat()).parse().ok()
}

/// Rewrite snapshot-typed data values to absolute paths under the
/// provenance directory.
///
/// Runs exactly once, during model construction, after both the data
/// table and the environment have been decoded; the built model is
/// immutable, so the rewrite cannot be reapplied.
pub fn resolve_snapshot_paths(data: &mut [DataNode], environment: &Environment) {
    let Some(dir) = environment.prov_directory() else {
        return;
    };
    for row in data.iter_mut().filter(|row| row.data_type.is_snapshot()) {
        row.value = format!("{dir}/{}", row.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use provgraph_model::DataType;

    #[test]
    fn plain_decimal_parses_directly() {
        assert_eq!(parse_elapsed("0.441"), Some(0.441));
        assert_eq!(parse_elapsed(" 12 "), Some(12.0));
    }

    #[test]
    fn grouping_punctuation_is_repaired_either_way() {
        assert_eq!(parse_elapsed("1,234.5"), Some(1234.5));
        assert_eq!(parse_elapsed("1.234,5"), Some(1234.5));
        assert_eq!(parse_elapsed("1,5"), Some(1.5));
        assert_eq!(parse_elapsed("-2,75"), Some(-2.75));
        // Leading-zero-omitted continental style
        assert_eq!(parse_elapsed(",5"), Some(0.5));
    }

    #[test]
    fn unrepairable_text_is_none() {
        assert_eq!(parse_elapsed("fast"), None);
        assert_eq!(parse_elapsed(""), None);
        assert_eq!(parse_elapsed("1.2.3x"), None);
    }

    fn environment(dir: &str) -> Environment {
        let mut pairs = IndexMap::new();
        pairs.insert("provDirectory".to_string(), dir.to_string());
        Environment::from_pairs(pairs)
    }

    fn data_node(id: &str, data_type: DataType, value: &str) -> DataNode {
        DataNode {
            id: id.to_string(),
            name: id.to_string(),
            value: value.to_string(),
            val_type: String::new(),
            data_type,
            scope: None,
            from_env: false,
            hash: None,
            timestamp: String::new(),
            location: None,
        }
    }

    #[test]
    fn only_snapshot_kinds_are_resolved() {
        let mut data = vec![
            data_node("d1", DataType::Snapshot, "snap1"),
            data_node("d2", DataType::File, "data.csv"),
            data_node("d3", DataType::StandardOutputSnapshot, "out1"),
        ];
        resolve_snapshot_paths(&mut data, &environment("/tmp/prov"));
        assert_eq!(data[0].value, "/tmp/prov/snap1");
        assert_eq!(data[1].value, "data.csv");
        assert_eq!(data[2].value, "/tmp/prov/out1");
    }

    #[test]
    fn missing_prov_directory_leaves_values_alone() {
        let mut data = vec![data_node("d1", DataType::Snapshot, "snap1")];
        resolve_snapshot_paths(&mut data, &Environment::default());
        assert_eq!(data[0].value, "snap1");
    }

    proptest! {
        // Any magnitude rendered with either separator convention must
        // come back intact.
        #[test]
        fn repair_recovers_grouped_magnitudes(whole in 0u64..10_000_000, frac in 0u32..1000) {
            let expected = format!("{whole}.{frac:03}").parse::<f64>().unwrap();
            let mut grouped = String::new();
            let digits = whole.to_string();
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(c);
            }

            let anglo = format!("{grouped}.{frac:03}");
            prop_assert_eq!(parse_elapsed(&anglo), Some(expected));

            let continental: String = anglo
                .chars()
                .map(|c| match c {
                    ',' => '.',
                    '.' => ',',
                    other => other,
                })
                .collect();
            prop_assert_eq!(parse_elapsed(&continental), Some(expected));
        }
    }
}
