//! Connections - the spatial pooler's state bundle and public facade.
//!
//! Owns every tunable, every learned array, and the seeded RNG; `compute`
//! is the only thing that mutates it after `init`. Grounded on
//! `gnomics::BlockBase`'s pattern of a per-instance seeded `StdRng` stored on
//! the state struct rather than a process-wide PRNG, generalized here to a
//! single-block facade instead of a dataflow network node.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bitfield::BitField;
use crate::column::Column;
use crate::config::SpConfig;
use crate::error::{Result, SpError};
use crate::inhibition;
use crate::init;
use crate::permanence_matrix::PermanenceMatrix;
use crate::topology::Topology;
use crate::utils::round_away_from_zero;

/// The spatial pooler's full state: configuration, topology, learned
/// permanences, duty cycles, boost factors, iteration counters and RNG.
///
/// Construct with [`Connections::new`], then call [`Connections::init`]
/// exactly once before the first [`Connections::compute`].
pub struct Connections {
    config: SpConfig,
    input_topology: Topology,
    column_topology: Topology,
    permanences: PermanenceMatrix,
    overlap_duty_cycles: Vec<f64>,
    active_duty_cycles: Vec<f64>,
    min_overlap_duty_cycles: Vec<f64>,
    min_active_duty_cycles: Vec<f64>,
    boost_factors: Vec<f64>,
    tie_breaker: Vec<f64>,
    inhibition_radius: usize,
    iteration_num: u64,
    iteration_learn_num: u64,
    rng: StdRng,
    initialized: bool,
}

impl Connections {
    /// Validate `config` and allocate (zeroed) state. Does not run the
    /// initialization pipeline - call [`Connections::init`] before
    /// [`Connections::compute`].
    pub fn new(config: SpConfig) -> Result<Self> {
        config.validate()?;

        let num_inputs = config.num_inputs();
        let num_columns = config.num_columns();
        let input_topology = Topology::new(config.input_dimensions.clone());
        let column_topology = Topology::new(config.column_dimensions.clone());
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            permanences: PermanenceMatrix::new(num_columns, num_inputs),
            overlap_duty_cycles: vec![0.0; num_columns],
            active_duty_cycles: vec![0.0; num_columns],
            min_overlap_duty_cycles: vec![0.0; num_columns],
            min_active_duty_cycles: vec![0.0; num_columns],
            boost_factors: vec![1.0; num_columns],
            tie_breaker: vec![0.0; num_columns],
            inhibition_radius: 0,
            iteration_num: 0,
            iteration_learn_num: 0,
            rng,
            initialized: false,
            input_topology,
            column_topology,
            config,
        })
    }

    /// Run the initialization pipeline (spec.md §4.2): seed tie-breakers and
    /// boost factors, zero the duty-cycle arrays, build every column's
    /// potential pool and initial permanences, then set the initial
    /// inhibition radius.
    ///
    /// `init_permanence`'s "initially connected" fraction reuses
    /// `potential_pct` (no separate field exists in the configuration
    /// surface for it - see DESIGN.md Open Question resolutions).
    pub fn init(&mut self) -> Result<()> {
        let num_columns = self.num_columns();

        for i in 0..num_columns {
            self.tie_breaker[i] = 0.01 * self.rng.gen::<f64>();
            self.boost_factors[i] = 1.0;
        }
        self.overlap_duty_cycles = vec![0.0; num_columns];
        self.active_duty_cycles = vec![0.0; num_columns];
        self.min_overlap_duty_cycles = vec![0.0; num_columns];
        self.min_active_duty_cycles = vec![0.0; num_columns];

        for c in 0..num_columns {
            let potential = init::map_potential(
                &self.input_topology,
                &self.column_topology,
                c,
                self.config.potential_radius,
                self.config.potential_pct,
                self.config.wrap_around,
                &mut self.rng,
            );
            let perm = init::init_permanence(
                &potential,
                self.config.potential_pct,
                self.config.syn_perm_connected,
                self.config.syn_perm_active_inc,
                self.config.syn_perm_trim_threshold,
                &mut self.rng,
            );
            self.permanences.set_column(c, Column::new(potential, perm));
            self.permanences.update_permanences_for_column(
                c,
                self.config.syn_perm_connected,
                self.config.syn_perm_trim_threshold,
                self.config.stimulus_threshold,
                self.config.syn_perm_below_stimulus_inc,
                true,
            );
        }

        self.update_inhibition_radius();
        self.initialized = true;
        Ok(())
    }

    /// Run one step of the compute pipeline (spec.md §4.4).
    ///
    /// Validates `input_vector`/`active_array` sizes up front and returns
    /// [`SpError::InvalidInputSize`] without mutating `self` on mismatch.
    /// Returns [`SpError::NotInitialized`] if called before [`Connections::init`].
    pub fn compute(
        &mut self,
        input_vector: &BitField,
        active_array: &mut BitField,
        learn: bool,
        strip_unlearned: bool,
    ) -> Result<()> {
        if !self.initialized {
            return Err(SpError::NotInitialized);
        }
        if input_vector.num_bits() != self.num_inputs() {
            return Err(SpError::InvalidInputSize {
                expected: self.num_inputs(),
                actual: input_vector.num_bits(),
            });
        }
        if active_array.num_bits() != self.num_columns() {
            return Err(SpError::InvalidInputSize {
                expected: self.num_columns(),
                actual: active_array.num_bits(),
            });
        }

        self.iteration_num += 1;
        if learn {
            self.iteration_learn_num += 1;
        }

        let overlaps = self.calculate_overlap(input_vector);

        let boosted: Vec<f64> = if learn {
            overlaps
                .iter()
                .zip(self.boost_factors.iter())
                .map(|(&o, &b)| o as f64 * b)
                .collect()
        } else {
            overlaps.iter().map(|&o| o as f64).collect()
        };

        let mut active_columns = inhibition::inhibit_columns(
            &overlaps,
            &boosted,
            &self.tie_breaker,
            self.config.global_inhibition,
            self.config.local_area_density,
            self.config.num_active_columns_per_inh_area,
            self.inhibition_radius,
            &self.column_topology,
        );

        if learn {
            self.adapt_synapses(input_vector, &active_columns);
            self.update_duty_cycles(&overlaps, &active_columns);
            self.bump_up_weak_columns();
            self.update_boost_factors();
            if self.iteration_num % self.config.update_period as u64 == 0 {
                self.update_inhibition_radius();
                self.update_min_duty_cycles();
            }
        } else if strip_unlearned {
            active_columns.retain(|&c| self.active_duty_cycles[c] != 0.0);
        }

        active_array.clear_all();
        active_array.set_acts(&active_columns);

        Ok(())
    }

    fn calculate_overlap(&self, input_vector: &BitField) -> Vec<usize> {
        (0..self.num_columns())
            .map(|c| {
                let raw = self.permanences.overlap(c, input_vector);
                if raw < self.config.stimulus_threshold {
                    0
                } else {
                    raw
                }
            })
            .collect()
    }

    fn adapt_synapses(&mut self, input_vector: &BitField, active_columns: &[usize]) {
        let active_inc = self.config.syn_perm_active_inc;
        let inactive_dec = self.config.syn_perm_inactive_dec;
        let syn_perm_connected = self.config.syn_perm_connected;
        let syn_perm_trim_threshold = self.config.syn_perm_trim_threshold;
        let stimulus_threshold = self.config.stimulus_threshold;
        let syn_perm_below_stimulus_inc = self.config.syn_perm_below_stimulus_inc;

        for &a in active_columns {
            self.permanences.adjust_column(a, |input_idx| {
                if input_vector.get_bit(input_idx) > 0 {
                    active_inc
                } else {
                    -inactive_dec
                }
            });
            self.permanences.update_permanences_for_column(
                a,
                syn_perm_connected,
                syn_perm_trim_threshold,
                stimulus_threshold,
                syn_perm_below_stimulus_inc,
                true,
            );
        }
    }

    fn bump_up_weak_columns(&mut self) {
        let inc = self.config.syn_perm_below_stimulus_inc;
        let syn_perm_connected = self.config.syn_perm_connected;
        let syn_perm_trim_threshold = self.config.syn_perm_trim_threshold;
        let stimulus_threshold = self.config.stimulus_threshold;

        for i in 0..self.num_columns() {
            if self.overlap_duty_cycles[i] < self.min_overlap_duty_cycles[i] {
                self.permanences.adjust_column(i, |_| inc);
                self.permanences.update_permanences_for_column(
                    i,
                    syn_perm_connected,
                    syn_perm_trim_threshold,
                    stimulus_threshold,
                    inc,
                    false,
                );
            }
        }
    }

    fn update_duty_cycles(&mut self, overlaps: &[usize], active_columns: &[usize]) {
        let period = (self.config.duty_cycle_period as u64).min(self.iteration_num.max(1)) as f64;

        let mut active_mask = vec![false; self.num_columns()];
        for &c in active_columns {
            active_mask[c] = true;
        }

        for i in 0..self.num_columns() {
            let overlap_hit = if overlaps[i] > 0 { 1.0 } else { 0.0 };
            self.overlap_duty_cycles[i] =
                ((period - 1.0) * self.overlap_duty_cycles[i] + overlap_hit) / period;

            let active_hit = if active_mask[i] { 1.0 } else { 0.0 };
            self.active_duty_cycles[i] =
                ((period - 1.0) * self.active_duty_cycles[i] + active_hit) / period;
        }
    }

    fn update_min_duty_cycles(&mut self) {
        if self.config.global_inhibition || self.inhibition_radius > self.num_inputs() {
            let max_overlap = self.overlap_duty_cycles.iter().cloned().fold(0.0, f64::max);
            let max_active = self.active_duty_cycles.iter().cloned().fold(0.0, f64::max);
            for i in 0..self.num_columns() {
                self.min_overlap_duty_cycles[i] = self.config.min_pct_overlap_duty_cycle * max_overlap;
                self.min_active_duty_cycles[i] = self.config.min_pct_active_duty_cycle * max_active;
            }
        } else {
            for i in 0..self.num_columns() {
                let neighbors = self.column_topology.neighbors_nd(i, self.inhibition_radius, true);
                let max_overlap = neighbors
                    .iter()
                    .map(|&n| self.overlap_duty_cycles[n])
                    .fold(0.0, f64::max);
                let max_active = neighbors
                    .iter()
                    .map(|&n| self.active_duty_cycles[n])
                    .fold(0.0, f64::max);
                self.min_overlap_duty_cycles[i] = self.config.min_pct_overlap_duty_cycle * max_overlap;
                self.min_active_duty_cycles[i] = self.config.min_pct_active_duty_cycle * max_active;
            }
        }
    }

    fn update_boost_factors(&mut self) {
        if self.min_active_duty_cycles.iter().all(|&m| m == 0.0) {
            return;
        }
        for i in 0..self.num_columns() {
            if self.min_active_duty_cycles[i] > 0.0 {
                let boost = (1.0 - self.config.max_boost) / self.min_active_duty_cycles[i]
                    * self.active_duty_cycles[i]
                    + self.config.max_boost;
                self.boost_factors[i] = boost;
            }
            if self.active_duty_cycles[i] > self.min_active_duty_cycles[i] {
                self.boost_factors[i] = 1.0;
            }
        }
    }

    fn connected_span_for_column(&self, idx: usize) -> f64 {
        let connected = self.permanences.connected_indices(idx);
        if connected.is_empty() {
            return 0.0;
        }
        let ndim = self.input_topology.num_dimensions();
        let mut min_coord = vec![usize::MAX; ndim];
        let mut max_coord = vec![0usize; ndim];
        for &input_idx in connected {
            let coord = self.input_topology.compute_coordinates(input_idx);
            for d in 0..ndim {
                min_coord[d] = min_coord[d].min(coord[d]);
                max_coord[d] = max_coord[d].max(coord[d]);
            }
        }
        let total: f64 = (0..ndim).map(|d| (max_coord[d] - min_coord[d] + 1) as f64).sum();
        total / ndim as f64
    }

    fn update_inhibition_radius(&mut self) {
        if self.config.global_inhibition {
            self.inhibition_radius = *self.column_topology.dimensions().iter().max().unwrap();
            return;
        }

        let num_columns = self.num_columns();
        let avg_span: f64 = (0..num_columns)
            .map(|c| self.connected_span_for_column(c))
            .sum::<f64>()
            / num_columns as f64;

        let ndim = self.input_topology.num_dimensions();
        let avg_columns_per_input: f64 = (0..ndim)
            .map(|d| self.column_topology.dimensions()[d] as f64 / self.input_topology.dimensions()[d] as f64)
            .sum::<f64>()
            / ndim as f64;

        let diameter = avg_span * avg_columns_per_input;
        let radius = round_away_from_zero((diameter - 1.0) / 2.0).max(1) as usize;
        self.inhibition_radius = radius;
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.column_topology.num_elements()
    }

    /// Number of inputs.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.input_topology.num_elements()
    }

    /// Current inhibition radius.
    #[inline]
    pub fn inhibition_radius(&self) -> usize {
        self.inhibition_radius
    }

    /// Total number of `compute` calls so far (learning or not).
    #[inline]
    pub fn iteration_num(&self) -> u64 {
        self.iteration_num
    }

    /// Total number of `compute` calls made with `learn = true`.
    #[inline]
    pub fn iteration_learn_num(&self) -> u64 {
        self.iteration_learn_num
    }

    /// Ascending input indices of `column`'s connected synapses.
    #[inline]
    pub fn column_connected_indices(&self, column: usize) -> &[usize] {
        self.permanences.connected_indices(column)
    }

    /// Permanence values for `column`'s potential pool, parallel to its
    /// potential-pool input indices.
    #[inline]
    pub fn column_permanences(&self, column: usize) -> &[f64] {
        self.permanences.column(column).permanences()
    }
}
