//! Editable process list.
//!
//! Mirrors the process-entry table: rows are appended with default values,
//! removed with automatic renumbering, and edited one at a time. Every
//! operation returns a new list; the receiver is never mutated.

use super::ProcessInput;

/// An immutable, ordered list of process rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessList {
    rows: Vec<ProcessInput>,
}

impl ProcessList {
    /// A list with the single default row `P1`.
    pub fn new() -> Self {
        Self::default().push_default()
    }

    /// Wraps existing rows as-is.
    pub fn from_rows(rows: Vec<ProcessInput>) -> Self {
        Self { rows }
    }

    /// Rows in order.
    pub fn rows(&self) -> &[ProcessInput] {
        &self.rows
    }

    /// Consumes the list, returning its rows.
    pub fn into_rows(self) -> Vec<ProcessInput> {
        self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends `P{n+1}` with arrival 0, burst 1 and priority 1.
    pub fn push_default(&self) -> Self {
        let id = sequential_id(self.rows.len());
        self.push(ProcessInput::new(id, 0, 1).with_priority(1))
    }

    /// Appends a row.
    pub fn push(&self, row: ProcessInput) -> Self {
        let mut rows = self.rows.clone();
        rows.push(row);
        Self { rows }
    }

    /// Removes the row at `index` and renumbers the rest `P1..Pn`.
    ///
    /// Returns `None` if `index` is out of range or the list would become empty.
    pub fn remove(&self, index: usize) -> Option<Self> {
        if index >= self.rows.len() || self.rows.len() <= 1 {
            return None;
        }
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, row)| row.clone())
            .collect();
        Some(Self { rows }.renumbered())
    }

    /// Returns a list where the row at `index` is replaced by `edit(row)`.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn update<F>(&self, index: usize, edit: F) -> Option<Self>
    where
        F: FnOnce(&ProcessInput) -> ProcessInput,
    {
        let mut rows = self.rows.clone();
        let slot = rows.get_mut(index)?;
        *slot = edit(slot);
        Some(Self { rows })
    }

    /// Assigns IDs `P1..Pn` in row order.
    pub fn renumbered(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| ProcessInput {
                id: sequential_id(i),
                ..row.clone()
            })
            .collect();
        Self { rows }
    }
}

impl From<ProcessList> for Vec<ProcessInput> {
    fn from(list: ProcessList) -> Self {
        list.rows
    }
}

fn sequential_id(index: usize) -> String {
    format!("P{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_default_row() {
        let list = ProcessList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.rows()[0], ProcessInput::new("P1", 0, 1).with_priority(1));
    }

    #[test]
    fn test_push_default_numbers_sequentially() {
        let list = ProcessList::new().push_default().push_default();
        let ids: Vec<&str> = list.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_remove_renumbers_and_preserves_original() {
        let list = ProcessList::from_rows(vec![
            ProcessInput::new("P1", 0, 5),
            ProcessInput::new("P2", 1, 3),
            ProcessInput::new("P3", 2, 8),
        ]);
        let removed = list.remove(0).unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(removed.rows()[0], ProcessInput::new("P1", 1, 3));
        assert_eq!(removed.rows()[1], ProcessInput::new("P2", 2, 8));
        // Original untouched
        assert_eq!(list.len(), 3);
        assert_eq!(list.rows()[0].id, "P1");
        assert_eq!(list.rows()[0].burst_time, 5);
    }

    #[test]
    fn test_remove_last_row_refused() {
        assert!(ProcessList::new().remove(0).is_none());
        assert!(ProcessList::new().push_default().remove(5).is_none());
    }

    #[test]
    fn test_update_single_row() {
        let list = ProcessList::new().push_default();
        let edited = list
            .update(1, |row| ProcessInput {
                burst_time: 9,
                ..row.clone()
            })
            .unwrap();
        assert_eq!(edited.rows()[1].burst_time, 9);
        assert_eq!(edited.rows()[0].burst_time, 1);
        assert_eq!(list.rows()[1].burst_time, 1);
        assert!(list.update(7, |row| row.clone()).is_none());
    }

    #[test]
    fn test_renumbered() {
        let list = ProcessList::from_rows(vec![
            ProcessInput::new("alpha", 0, 1),
            ProcessInput::new("beta", 0, 1),
        ]);
        let ids: Vec<String> = list.renumbered().into_rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }
}
