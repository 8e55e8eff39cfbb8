use crate::dataset::{Table, TableSchema};

/// Ten-jet table with a cleanly separated `prob_b` discriminant (perfect
/// under a 0.5 cut) and a `nnbjet` benchmark that misses one signal jet and
/// mistags one background jet.
pub fn jet_table() -> Table {
    let schema = TableSchema::new(vec!["prob_b".into(), "nnbjet".into(), "isb".into()]);
    let rows = vec![
        vec![0.92, 0.88, 1.0],
        vec![0.85, 0.75, 1.0],
        vec![0.77, 0.22, 1.0],
        vec![0.66, 0.91, 1.0],
        vec![0.58, 0.64, 1.0],
        vec![0.41, 0.35, 0.0],
        vec![0.33, 0.81, 0.0],
        vec![0.27, 0.12, 0.0],
        vec![0.15, 0.29, 0.0],
        vec![0.08, 0.05, 0.0],
    ];
    Table::new(schema, rows)
}
