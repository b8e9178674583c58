//! Newest-first record list
//!
//! `DatedList` keeps its elements sorted by date, newest first, no matter
//! how they are inserted. Ties keep their relative insertion order. The list
//! knows nothing about the element type beyond two injected functions: one
//! that reads an element's date, and a validator that runs before every
//! insertion. Validator failures are returned untouched.
//!
//! Callers only ever see the contents through [`DatedList::view`], a shared
//! slice, so nothing outside this module can reorder or overwrite entries:
//!
//! ```compile_fail
//! use fintrack::storage::expense_list;
//!
//! let list = expense_list();
//! let view = list.view();
//! view.sort_by_key(|e| e.amount() as i64);
//! ```

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};

/// Reads the date an element is ordered by
pub type DateOf<T> = fn(&T) -> NaiveDate;

/// Accepts or rejects an element before insertion
pub type Validator<T> = fn(&T) -> LedgerResult<()>;

/// A list kept in reverse-chronological order
#[derive(Debug, Clone)]
pub struct DatedList<T> {
    items: Vec<T>,
    date_of: DateOf<T>,
    validator: Validator<T>,
}

impl<T> DatedList<T> {
    /// Create an empty list ordered by `date_of` and guarded by `validator`
    pub fn new(date_of: DateOf<T>, validator: Validator<T>) -> Self {
        Self {
            items: Vec::new(),
            date_of,
            validator,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only, newest-first view of the entries
    pub fn view(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Entry at a 0-based index
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Validate and add one entry
    pub fn add(&mut self, item: T) -> LedgerResult<()> {
        (self.validator)(&item)?;
        self.items.push(item);
        self.restore_order();
        Ok(())
    }

    /// Validate and add one entry, placing it at `index` before re-sorting
    ///
    /// The index only matters for ties: the final position is decided by
    /// date. `index` may equal `len()`.
    pub fn insert(&mut self, index: usize, item: T) -> LedgerResult<()> {
        self.check_insert_index(index)?;
        (self.validator)(&item)?;
        self.items.insert(index, item);
        self.restore_order();
        Ok(())
    }

    /// Validate every entry, then add them all
    ///
    /// If any entry is rejected nothing is added, and the error carries the
    /// 1-based batch position of the first offender. Returns whether the
    /// list changed.
    pub fn add_all<I>(&mut self, items: I) -> LedgerResult<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.items.len();
        self.insert_all(len, items)
    }

    /// Like [`DatedList::add_all`], placing the batch at `index` before re-sorting
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> LedgerResult<bool>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_insert_index(index)?;
        let batch: Vec<T> = items.into_iter().collect();
        self.validate_batch(&batch)?;

        if batch.is_empty() {
            return Ok(false);
        }

        self.items.splice(index..index, batch);
        self.restore_order();
        Ok(true)
    }

    /// Add a batch that may contain missing entries
    ///
    /// A `None` anywhere in the batch fails the whole call with
    /// `InvalidElement` before anything is added.
    pub fn add_all_present<I>(&mut self, items: I) -> LedgerResult<bool>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let batch = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                item.ok_or_else(|| {
                    LedgerError::in_batch(i + 1, LedgerError::InvalidElement { field: "entry" })
                })
            })
            .collect::<LedgerResult<Vec<T>>>()?;

        self.add_all(batch)
    }

    /// Swap the entry at `index` for `candidate`, returning the old entry
    ///
    /// The candidate is validated first; on failure the list is untouched.
    /// The swap happens in place before re-sorting, so the list never
    /// loses an entry and ties keep the old entry's relative slot.
    pub fn replace(&mut self, index: usize, candidate: T) -> LedgerResult<T> {
        self.check_index(index)?;
        (self.validator)(&candidate)?;

        let old = std::mem::replace(&mut self.items[index], candidate);
        self.restore_order();
        Ok(old)
    }

    /// Remove and return the entry at `index`
    pub fn remove(&mut self, index: usize) -> LedgerResult<T> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        debug_assert!(self.is_sorted());
        Ok(removed)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check the newest-first invariant
    pub fn is_sorted(&self) -> bool {
        let date_of = self.date_of;
        self.items
            .windows(2)
            .all(|pair| date_of(&pair[0]) >= date_of(&pair[1]))
    }

    fn validate_batch(&self, batch: &[T]) -> LedgerResult<()> {
        for (i, item) in batch.iter().enumerate() {
            (self.validator)(item).map_err(|e| LedgerError::in_batch(i + 1, e))?;
        }
        Ok(())
    }

    fn restore_order(&mut self) {
        let date_of = self.date_of;
        // Stable: equal dates keep their current relative order
        self.items.sort_by(|a, b| date_of(b).cmp(&date_of(a)));
        debug_assert!(self.is_sorted());
    }

    fn check_index(&self, index: usize) -> LedgerResult<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(LedgerError::IndexOutOfRange {
                position: index + 1,
                len: self.items.len(),
            })
        }
    }

    fn check_insert_index(&self, index: usize) -> LedgerResult<()> {
        if index <= self.items.len() {
            Ok(())
        } else {
            Err(LedgerError::IndexOutOfRange {
                position: index + 1,
                len: self.items.len(),
            })
        }
    }
}

impl<'a, T> IntoIterator for &'a DatedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
