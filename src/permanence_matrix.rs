//! PermanenceMatrix - aggregate owner of every column's dendrite, its
//! connected-synapse mirror, and per-column connected counts.
//!
//! Grounded on `gnomics::BlockMemory`, which keeps a flattened permanence
//! store alongside a `d_conns: Vec<BitArray>` connected-bit mirror refreshed
//! by `update_conns` after every permanence write. Here the permanence store
//! is one [`Column`] per column (variable-size pool, `f64` permanences)
//! rather than `BlockMemory`'s fixed-`num_rpd`/`u8` layout, but the
//! write-then-refresh-mirror discipline is the same.

use crate::bitfield::BitField;
use crate::column::Column;
use crate::config::{SYN_PERM_MAX, SYN_PERM_MIN};
use crate::sparse_binary_matrix::SparseBinaryMatrix;

/// Owns every column's potential pool + permanences, plus the derived
/// connected-synapse mirror and per-column connected counts (invariant 3).
#[derive(Clone, Debug)]
pub struct PermanenceMatrix {
    columns: Vec<Column>,
    connected: SparseBinaryMatrix,
    connected_counts: Vec<usize>,
    connected_indices: Vec<Vec<usize>>,
    num_inputs: usize,
}

impl PermanenceMatrix {
    /// Allocate storage for `num_columns` columns, each with an initially
    /// empty potential pool (step 1 of `initMatrices`).
    pub fn new(num_columns: usize, num_inputs: usize) -> Self {
        Self {
            columns: (0..num_columns).map(|_| Column::new(vec![], vec![])).collect(),
            connected: SparseBinaryMatrix::new(num_columns, num_inputs),
            connected_counts: vec![0; num_columns],
            connected_indices: vec![Vec::new(); num_columns],
            num_inputs,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Width of the input space each column's pool indexes into.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Borrow one column.
    #[inline]
    pub fn column(&self, idx: usize) -> &Column {
        &self.columns[idx]
    }

    /// Install a freshly-initialized column, replacing its (empty) placeholder.
    /// Does not refresh the connected mirror; callers run
    /// [`PermanenceMatrix::update_permanences_for_column`] afterward.
    pub fn set_column(&mut self, idx: usize, column: Column) {
        self.columns[idx] = column;
    }

    /// Ascending input indices of `idx`'s connected synapses, kept in sync by
    /// [`PermanenceMatrix::update_permanences_for_column`].
    #[inline]
    pub fn connected_indices(&self, idx: usize) -> &[usize] {
        &self.connected_indices[idx]
    }

    /// Adjust every permanence in column `idx`'s potential pool by
    /// `delta_fn(input_index)`, without refreshing the connected mirror.
    /// Callers follow up with [`PermanenceMatrix::update_permanences_for_column`].
    pub fn adjust_column<F: Fn(usize) -> f64>(&mut self, idx: usize, delta_fn: F) {
        let column = &mut self.columns[idx];
        let potential = column.potential().to_vec();
        let perms = column.permanences_mut();
        for (i, &input_idx) in potential.iter().enumerate() {
            perms[i] += delta_fn(input_idx);
        }
    }

    /// Connected-synapse count for column `idx` (invariant 3, kept in sync by
    /// [`PermanenceMatrix::update_permanences_for_column`]).
    #[inline]
    pub fn connected_count(&self, idx: usize) -> usize {
        self.connected_counts[idx]
    }

    /// Raw overlap of column `idx` with `input`: count of connected synapses
    /// whose input bit is 1.
    #[inline]
    pub fn overlap(&self, idx: usize, input: &BitField) -> usize {
        self.connected.overlap(idx, input)
    }

    /// While fewer than `stimulus_threshold` of column `idx`'s pool entries
    /// are connected, add `syn_perm_below_stimulus_inc` to *every* permanence
    /// in the column (not just under-threshold ones).
    ///
    /// This brute-force "raise all" behavior is deliberate bug-for-bug
    /// parity (see DESIGN.md): a targeted raise of only the weak synapses
    /// would converge faster but diverge from the reference's output.
    pub fn raise_permanence_to_threshold(
        &mut self,
        idx: usize,
        syn_perm_connected: f64,
        stimulus_threshold: usize,
        syn_perm_below_stimulus_inc: f64,
    ) {
        let column = &mut self.columns[idx];
        if column.is_empty() {
            return;
        }
        loop {
            let connected = column.connected_count(syn_perm_connected);
            if connected >= stimulus_threshold {
                break;
            }
            for p in column.permanences_mut() {
                *p += syn_perm_below_stimulus_inc;
            }
        }
    }

    /// Trim any permanence `<= syn_perm_trim_threshold` to zero, then clip
    /// every permanence into `[SYN_PERM_MIN, SYN_PERM_MAX]`, truncating to
    /// five decimal places for cross-platform reproducibility of the
    /// connected-bit mask.
    pub fn trim_and_clip(&mut self, idx: usize, syn_perm_trim_threshold: f64) {
        for p in self.columns[idx].permanences_mut() {
            *p = (*p * 1e5).floor() / 1e5;
            if *p <= syn_perm_trim_threshold {
                *p = 0.0;
            }
            *p = p.clamp(SYN_PERM_MIN, SYN_PERM_MAX);
        }
    }

    /// Refresh the connected-synapse mirror and connected count for `idx`
    /// from its current permanences (step 4 of `updatePermanencesForColumn`).
    pub fn refresh_connected(&mut self, idx: usize, syn_perm_connected: f64) {
        let indices = self.columns[idx].connected_indices(syn_perm_connected);
        self.connected_counts[idx] = indices.len();
        self.connected.set_row(idx, &indices);
        self.connected_indices[idx] = indices;
    }

    /// The dense-input variant of `updatePermanencesForColumn` (spec.md
    /// §4.6): optionally raise to threshold, trim/clip, then refresh the
    /// connected mirror and count.
    pub fn update_permanences_for_column(
        &mut self,
        idx: usize,
        syn_perm_connected: f64,
        syn_perm_trim_threshold: f64,
        stimulus_threshold: usize,
        syn_perm_below_stimulus_inc: f64,
        raise: bool,
    ) {
        if raise {
            self.raise_permanence_to_threshold(
                idx,
                syn_perm_connected,
                stimulus_threshold,
                syn_perm_below_stimulus_inc,
            );
        }
        self.trim_and_clip(idx, syn_perm_trim_threshold);
        self.refresh_connected(idx, syn_perm_connected);
    }
}
