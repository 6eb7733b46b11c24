use crate::feature::Row;

/// Rows handed over by a spreadsheet reader, plus the column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
}

impl Table {
    pub fn new(rows: Vec<Row>, columns: Vec<String>) -> Self { Self { rows, columns } }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}
