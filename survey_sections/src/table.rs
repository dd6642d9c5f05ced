use std::collections::HashMap;

/// A flat dataset: one header with the column labels, and one list of cells per row.
///
/// The labels are expected to be unique. Readers are responsible for renaming
/// duplicated headers first (see [crate::dedup_headers]).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Table {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (idx, label) in columns.iter().enumerate() {
            // Last write wins if the labels were not made unique.
            positions.insert(label.clone(), idx);
        }
        Table {
            columns,
            positions,
            rows: Vec::new(),
        }
    }

    /// Adds a row. Missing trailing cells are treated as absent values.
    pub fn push_row(&mut self, cells: Vec<Option<String>>) {
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        if index < self.rows.len() {
            Some(Row { table: self, index })
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }
}

/// A read-only view over one row of a [Table].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// The position of this row in the table (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The column labels, in their original order.
    pub fn columns(&self) -> &'a [String] {
        &self.table.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.table.positions.contains_key(column)
    }

    /// The raw cell for the given label, if the column exists and the cell is present.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let pos = *self.table.positions.get(column)?;
        self.table.rows[self.index]
            .get(pos)
            .and_then(|cell| cell.as_deref())
    }
}
