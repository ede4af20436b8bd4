use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use crate::error::{Result, SelnmError};

const INDEX_HEADER: &str = "Index";
const ID_HEADER: &str = "ID";
const COLUMN_SEPARATOR: &str = "  ";

/// Append-only list whose items are reachable by insertion position or by a
/// unique string ID.
///
/// Entries are read-only once added. Positions are assigned in insertion order
/// and never change. `list[i]` is the
/// fast path for tight iteration: it skips the `Result` wrapping of
/// [`get`](Self::get) and panics when `i` is out of range, while
/// [`get_unchecked`](Self::get_unchecked) skips the check entirely.
///
/// Not internally synchronized.
#[derive(Debug, Clone)]
pub struct IndexedList<T> {
    name: String,
    description: String,
    values: Vec<T>,
    ids: Vec<String>,
    indices: HashMap<String, usize>,
    max_id_width: usize,
}

impl<T> IndexedList<T> {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            values: Vec::new(),
            ids: Vec::new(),
            indices: HashMap::new(),
            max_id_width: 0,
        }
    }

    /// Appends `value` under `id`.
    ///
    /// Fails with [`SelnmError::DuplicateIdentifier`] if `id` is already in use,
    /// in which case the list is left as it was.
    pub fn add(&mut self, id: impl Into<String>, value: T) -> Result<()> {
        let id = id.into();
        if self.indices.contains_key(&id) {
            return Err(SelnmError::DuplicateIdentifier {
                list: self.name.clone(),
                id,
            });
        }
        let position = self.values.len();
        log::debug!("Adding \"{}\" to \"{}\" at index {}", id, self.name, position);
        self.max_id_width = self.max_id_width.max(id.len());
        self.indices.insert(id.clone(), position);
        self.ids.push(id);
        self.values.push(value);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn out_of_range(&self, index: usize) -> SelnmError {
        SelnmError::OutOfRange(format!(
            "index {} in \"{}\" of size {}",
            index,
            self.name,
            self.len()
        ))
    }

    fn key_not_found(&self, id: &str) -> SelnmError {
        SelnmError::KeyNotFound {
            list: self.name.clone(),
            id: id.to_string(),
        }
    }

    /// Returns the ID stored at `index`.
    pub fn id(&self, index: usize) -> Result<&str> {
        self.ids
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns the position of `id`, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.indices.get(id).copied()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.values.get(index).ok_or_else(|| self.out_of_range(index))
    }

    pub fn get_by_id(&self, id: &str) -> Result<&T> {
        match self.position(id) {
            Some(position) => Ok(&self.values[position]),
            None => Err(self.key_not_found(id)),
        }
    }

    /// Returns the value at `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: the caller guarantees `index < len`.
        unsafe { self.values.get_unchecked(index) }
    }

    /// Iterates `(position, id, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &T)> + '_ {
        self.ids
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (id, value))| (i, id.as_str(), value))
    }
}

impl<T: fmt::Display> IndexedList<T> {
    /// Renders the list as a three-column table: position, ID and value.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<T> Index<usize> for IndexedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<T> Index<&str> for IndexedList<T> {
    type Output = T;

    /// Panics if `id` is not in the list; use [`IndexedList::get_by_id`] to handle that case.
    fn index(&self, id: &str) -> &Self::Output {
        match self.position(id) {
            Some(position) => &self.values[position],
            None => panic!("{}", self.key_not_found(id)),
        }
    }
}

/// Right-aligns `text` in `width` bytes; text at least that wide is written as is.
fn write_right_aligned(f: &mut fmt::Formatter<'_>, text: &str, width: usize) -> fmt::Result {
    for _ in text.len()..width {
        f.write_str(" ")?;
    }
    f.write_str(text)
}

impl<T: fmt::Display> fmt::Display for IndexedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Widths count bytes, so multi-byte IDs get less padding than their glyph count suggests.
        // An empty list has no last index, so only the header sets the width.
        let largest_index_width = self
            .len()
            .checked_sub(1)
            .map_or(0, |last| last.to_string().len());
        let index_width = INDEX_HEADER.len().max(largest_index_width);
        let id_width = ID_HEADER.len().max(self.max_id_width);

        write!(f, "{:>index_width$}{}", INDEX_HEADER, COLUMN_SEPARATOR)?;
        write_right_aligned(f, ID_HEADER, id_width)?;
        writeln!(f, "{}{}", COLUMN_SEPARATOR, self.description)?;
        for (i, id, value) in self.iter() {
            write!(f, "{:>index_width$}{}", i, COLUMN_SEPARATOR)?;
            write_right_aligned(f, id, id_width)?;
            writeln!(f, "{}{}", COLUMN_SEPARATOR, value)?;
        }
        Ok(())
    }
}
