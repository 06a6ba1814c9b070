// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of cells consumed by placed items.
//!
//! An [`Occupancy`] is a derived view: rebuild it from the current placement
//! list whenever that list changes rather than keeping it in sync by hand.

use alloc::vec::Vec;

use hashbrown::HashSet;

/// Cell indices currently consumed by a collection of placed items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    cells: HashSet<usize>,
}

impl Occupancy {
    /// Creates an empty occupancy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the occupancy of a collection of items, each given as its cell indices.
    pub fn from_items<I, C>(items: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[usize]>,
    {
        let mut occupancy = Self::new();
        for cells in items {
            occupancy.insert_all(cells.as_ref().iter().copied());
        }
        occupancy
    }

    /// Marks `cells` as occupied.
    pub fn insert_all(&mut self, cells: impl IntoIterator<Item = usize>) {
        self.cells.extend(cells);
    }

    /// Marks `cells` as free.
    pub fn remove_all(&mut self, cells: impl IntoIterator<Item = usize>) {
        for cell in cells {
            self.cells.remove(&cell);
        }
    }

    /// Whether `index` is occupied.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    /// Whether any of `cells` is occupied.
    #[must_use]
    pub fn any_occupied(&self, cells: &[usize]) -> bool {
        cells.iter().any(|c| self.cells.contains(c))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied indices in ascending order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.cells.iter().copied().collect();
        out.sort_unstable();
        out
    }
}

impl FromIterator<usize> for Occupancy {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for Occupancy {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        self.insert_all(iter);
    }
}
