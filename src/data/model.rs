use std::ops::Range;

use serde::Serialize;

/// Default label of the first input file.
pub const MINICORE: &str = "Minicore";
/// Default label of the second input file.
pub const COMPOSITECORE: &str = "Compositecore";

// ---------------------------------------------------------------------------
// Row – one (label, value) pair
// ---------------------------------------------------------------------------

/// A single observation tagged with the group it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    #[serde(rename = "Dataset")]
    pub label: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

// ---------------------------------------------------------------------------
// LabeledTable – the combined long-format table
// ---------------------------------------------------------------------------

/// Rows of every group concatenated in input order.
#[derive(Debug, Clone, Default)]
pub struct LabeledTable {
    /// All rows; rows of one group are contiguous.
    pub rows: Vec<Row>,
    /// Group labels in the order they were added.
    pub labels: Vec<String>,
    /// Row range of each group, parallel to `labels`.
    spans: Vec<Range<usize>>,
}

impl LabeledTable {
    /// Emit every sample of `first` under its label, then every sample of
    /// `second` under its label.
    pub fn from_groups(first: (&str, &[f64]), second: (&str, &[f64])) -> Self {
        let mut table = LabeledTable::default();
        table.push_group(first.0, first.1);
        table.push_group(second.0, second.1);
        table
    }

    fn push_group(&mut self, label: &str, samples: &[f64]) {
        let start = self.rows.len();
        self.labels.push(label.to_string());
        self.spans.push(start..start + samples.len());
        self.rows.reserve(samples.len());
        self.rows.extend(samples.iter().map(|&value| Row {
            label: label.to_string(),
            value,
        }));
    }

    /// Values of the group at `index`, in the order they were read.
    pub fn values_at(&self, index: usize) -> Vec<f64> {
        self.spans
            .get(index)
            .map(|span| self.rows[span.clone()].iter().map(|row| row.value).collect())
            .unwrap_or_default()
    }

    /// Iterate `(label, values)` in group order.
    ///
    /// Groups are recovered by position, so two groups sharing a label stay
    /// apart.
    pub fn groups(&self) -> impl Iterator<Item = (&str, Vec<f64>)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| (label.as_str(), self.values_at(index)))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], &[])]
    #[case(&[1.0], &[])]
    #[case(&[], &[4.0, 5.0])]
    #[case(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0, 7.0])]
    fn table_has_rows_of_both_inputs_in_order(#[case] first: &[f64], #[case] second: &[f64]) {
        let table = LabeledTable::from_groups((MINICORE, first), (COMPOSITECORE, second));

        assert_eq!(table.len(), first.len() + second.len());
        let (head, tail) = table.rows.split_at(first.len());
        assert!(head.iter().all(|row| row.label == MINICORE));
        assert!(tail.iter().all(|row| row.label == COMPOSITECORE));

        let values: Vec<f64> = table.rows.iter().map(|row| row.value).collect();
        assert_eq!(values, [first, second].concat());
    }

    #[test]
    fn groups_recover_input_sequences() {
        let table = LabeledTable::from_groups(("a", &[3.0, 1.0][..]), ("b", &[2.0][..]));

        let groups: Vec<_> = table.groups().collect();

        assert_eq!(groups, vec![("a", vec![3.0, 1.0]), ("b", vec![2.0])]);
    }

    #[test]
    fn shared_label_keeps_groups_apart() {
        let table = LabeledTable::from_groups((MINICORE, &[1.0, 2.0, 3.0][..]), (MINICORE, &[4.0, 5.0][..]));

        let groups: Vec<_> = table.groups().collect();

        assert_eq!(groups[0].1, vec![1.0, 2.0, 3.0]);
        assert_eq!(groups[1].1, vec![4.0, 5.0]);
        assert!(table.values_at(2).is_empty());
    }
}
