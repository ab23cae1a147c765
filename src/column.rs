//! Column - one column's potential pool and permanence vector.
//!
//! A potential pool is a strictly increasing sequence of input indices; the
//! parallel `permanences` vector holds one permanence value per pool entry.
//! Analogous to one dendrite slice of `gnomics::BlockMemory`'s flattened
//! `r_addrs`/`r_perms` arrays, but sized per-column rather than fixed at a
//! uniform `num_rpd`.

/// A single column's proximal dendrite: potential pool plus permanences.
#[derive(Clone, Debug)]
pub struct Column {
    /// Strictly increasing, unique input indices this column may connect to.
    potential: Vec<usize>,
    /// Permanence value for the i-th entry of `potential`.
    permanences: Vec<f64>,
}

impl Column {
    /// Build a column from a sorted, deduplicated potential pool and its
    /// parallel permanence vector.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors differ in length (programmer error: callers
    /// build both together in `init`).
    pub fn new(potential: Vec<usize>, permanences: Vec<f64>) -> Self {
        debug_assert_eq!(potential.len(), permanences.len());
        Self {
            potential,
            permanences,
        }
    }

    /// The potential pool, ascending input indices.
    #[inline]
    pub fn potential(&self) -> &[usize] {
        &self.potential
    }

    /// Permanence values, parallel to `potential()`.
    #[inline]
    pub fn permanences(&self) -> &[f64] {
        &self.permanences
    }

    /// Mutable access to the permanence values.
    #[inline]
    pub fn permanences_mut(&mut self) -> &mut [f64] {
        &mut self.permanences
    }

    /// Size of the potential pool. Fixed for the lifetime of the column
    /// (invariant 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.potential.len()
    }

    /// Whether the potential pool is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.potential.is_empty()
    }

    /// Position of `input_idx` within the potential pool, if present.
    pub fn position_of(&self, input_idx: usize) -> Option<usize> {
        self.potential.binary_search(&input_idx).ok()
    }

    /// Permanence of the synapse to `input_idx`, if it is in the pool.
    pub fn permanence_at_input(&self, input_idx: usize) -> Option<f64> {
        self.position_of(input_idx).map(|i| self.permanences[i])
    }

    /// Input indices whose permanence is >= `syn_perm_connected`, ascending
    /// (a subsequence of `potential()`).
    pub fn connected_indices(&self, syn_perm_connected: f64) -> Vec<usize> {
        self.potential
            .iter()
            .zip(self.permanences.iter())
            .filter(|(_, &p)| p >= syn_perm_connected)
            .map(|(&idx, _)| idx)
            .collect()
    }

    /// Count of synapses with permanence >= `syn_perm_connected` (invariant 3).
    pub fn connected_count(&self, syn_perm_connected: f64) -> usize {
        self.permanences
            .iter()
            .filter(|&&p| p >= syn_perm_connected)
            .count()
    }
}
