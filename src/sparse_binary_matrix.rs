//! SparseBinaryMatrix - per-row connected-synapse masks over input space.
//!
//! Each row mirrors one column's set of *connected* synapses (permanence >=
//! `syn_perm_connected`) as a dense [`BitField`] the width of the input
//! space, so that computing a column's overlap with an input vector is a
//! single [`BitField::num_similar`] call rather than a walk over the
//! potential pool. Grounded on `gnomics::BlockMemory`'s `d_conns: Vec<BitArray>`
//! connected-synapse mirror and its `overlap_conn`/`update_conns` methods.

use crate::bitfield::BitField;

/// A dense connected-synapse mask per row (column), all rows sharing the same
/// width (the number of inputs).
#[derive(Clone, Debug)]
pub struct SparseBinaryMatrix {
    rows: Vec<BitField>,
    num_inputs: usize,
}

impl SparseBinaryMatrix {
    /// Create a matrix with `num_rows` rows, each `num_inputs` bits wide and
    /// initially all-zero.
    pub fn new(num_rows: usize, num_inputs: usize) -> Self {
        Self {
            rows: (0..num_rows).map(|_| BitField::new(num_inputs)).collect(),
            num_inputs,
        }
    }

    /// Number of rows (columns).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of each row (number of inputs).
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Overwrite `row` so that exactly the bits at `indices` are set.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range (programmer error).
    pub fn set_row(&mut self, row: usize, indices: &[usize]) {
        let r = &mut self.rows[row];
        r.clear_all();
        r.set_acts(indices);
    }

    /// Indices of the set bits in `row`, ascending.
    pub fn row_indices(&self, row: usize) -> Vec<usize> {
        self.rows[row].get_acts()
    }

    /// Number of set bits in `row`.
    pub fn row_count(&self, row: usize) -> usize {
        self.rows[row].num_set()
    }

    /// Overlap of `row` with `input`: the count of bits set in both.
    ///
    /// # Panics
    ///
    /// Panics if `input`'s width does not match `num_inputs()` (programmer
    /// error; callers validate vector sizes before reaching this layer).
    pub fn overlap(&self, row: usize, input: &BitField) -> usize {
        self.rows[row].num_similar(input)
    }
}
