//! `SpConfig` - the validated, serializable configuration for a spatial pooler.
//!
//! This is the sole constructor input for [`crate::Connections`]. It carries
//! every tunable parameter named in the data model; nothing about a pooler's
//! behavior is read from the environment or a file by the crate itself.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpError};

/// Minimum permanence value.
pub const SYN_PERM_MIN: f64 = 0.0;
/// Maximum permanence value.
pub const SYN_PERM_MAX: f64 = 1.0;

/// Configuration for a spatial pooler, validated once at construction time.
///
/// `local_area_density` and `num_active_columns_per_inh_area` are mutually
/// exclusive density selectors: exactly one must be positive, the other is
/// the `<= 0` sentinel meaning "disabled". [`SpConfig::validate`] enforces
/// this.
///
/// # Examples
///
/// ```
/// use spatial_pooler::SpConfig;
///
/// let config = SpConfig {
///     input_dimensions: vec![32],
///     column_dimensions: vec![16],
///     potential_radius: 16,
///     potential_pct: 0.5,
///     global_inhibition: true,
///     local_area_density: -1.0,
///     num_active_columns_per_inh_area: 3.0,
///     stimulus_threshold: 0,
///     syn_perm_inactive_dec: 0.008,
///     syn_perm_active_inc: 0.05,
///     syn_perm_below_stimulus_inc: 0.01,
///     syn_perm_trim_threshold: 0.05,
///     syn_perm_connected: 0.1,
///     min_pct_overlap_duty_cycle: 0.001,
///     min_pct_active_duty_cycle: 0.001,
///     duty_cycle_period: 1000,
///     max_boost: 10.0,
///     update_period: 50,
///     seed: 42,
///     wrap_around: true,
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpConfig {
    /// Dimensions of the input space; product is the number of inputs.
    pub input_dimensions: Vec<usize>,
    /// Dimensions of the column space; product is the number of columns.
    pub column_dimensions: Vec<usize>,
    /// Maximum input-coordinate distance from a column's center that is
    /// eligible for its potential pool.
    pub potential_radius: usize,
    /// Fraction of eligible inputs sampled into each column's potential pool.
    pub potential_pct: f64,
    /// Use global (whole-layer) inhibition instead of local.
    pub global_inhibition: bool,
    /// Target fraction of active columns per inhibition area; `<= 0` disables
    /// this selector in favor of `num_active_columns_per_inh_area`.
    pub local_area_density: f64,
    /// Target absolute number of active columns per inhibition area; `<= 0`
    /// disables this selector in favor of `local_area_density`.
    pub num_active_columns_per_inh_area: f64,
    /// Minimum raw overlap for a column to be eligible to win inhibition.
    pub stimulus_threshold: usize,
    /// Permanence decrement applied to inactive-input synapses during learning.
    pub syn_perm_inactive_dec: f64,
    /// Permanence increment applied to active-input synapses during learning.
    pub syn_perm_active_inc: f64,
    /// Permanence increment applied when bumping up weak columns.
    pub syn_perm_below_stimulus_inc: f64,
    /// Permanences at or below this value are truncated to zero.
    pub syn_perm_trim_threshold: f64,
    /// Permanences at or above this value count as "connected".
    pub syn_perm_connected: f64,
    /// Target fraction of neighbors' overlap duty cycle a column should meet.
    pub min_pct_overlap_duty_cycle: f64,
    /// Target fraction of neighbors' active duty cycle a column should meet.
    pub min_pct_active_duty_cycle: f64,
    /// Window, in iterations, over which duty cycles are averaged.
    pub duty_cycle_period: usize,
    /// Maximum multiplicative boost applied to an under-active column's overlap.
    pub max_boost: f64,
    /// How often (in iterations) the inhibition radius and min duty cycles refresh.
    pub update_period: usize,
    /// Seed for the deterministic PRNG driving initialization and learning.
    pub seed: u64,
    /// Whether neighborhood computations wrap around each dimension.
    pub wrap_around: bool,
}

impl SpConfig {
    /// Validate every invariant the data model places on configuration
    /// values, returning [`SpError::InvalidParameter`] describing the first
    /// violation found.
    pub fn validate(&self) -> Result<()> {
        if self.input_dimensions.is_empty() {
            return Err(SpError::InvalidParameter(
                "input_dimensions must not be empty".into(),
            ));
        }
        if self.input_dimensions.iter().any(|&d| d == 0) {
            return Err(SpError::InvalidParameter(
                "input_dimensions must all be positive".into(),
            ));
        }
        if self.column_dimensions.is_empty() {
            return Err(SpError::InvalidParameter(
                "column_dimensions must not be empty".into(),
            ));
        }
        if self.column_dimensions.iter().any(|&d| d == 0) {
            return Err(SpError::InvalidParameter(
                "column_dimensions must all be positive".into(),
            ));
        }
        if self.input_dimensions.len() != self.column_dimensions.len() {
            return Err(SpError::InvalidParameter(
                "input_dimensions and column_dimensions must have the same rank".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.potential_pct) {
            return Err(SpError::InvalidParameter(
                "potential_pct must be in [0, 1]".into(),
            ));
        }

        let density_selectors =
            (self.local_area_density > 0.0) as u8 + (self.num_active_columns_per_inh_area > 0.0) as u8;
        if density_selectors != 1 {
            return Err(SpError::InvalidParameter(
                "exactly one of local_area_density or num_active_columns_per_inh_area must be positive"
                    .into(),
            ));
        }

        if !(SYN_PERM_MIN <= self.syn_perm_trim_threshold
            && self.syn_perm_trim_threshold <= self.syn_perm_connected
            && self.syn_perm_connected <= SYN_PERM_MAX)
        {
            return Err(SpError::InvalidParameter(
                "permanence scalars must satisfy 0 <= trim <= connected <= 1".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.min_pct_overlap_duty_cycle) {
            return Err(SpError::InvalidParameter(
                "min_pct_overlap_duty_cycle must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_pct_active_duty_cycle) {
            return Err(SpError::InvalidParameter(
                "min_pct_active_duty_cycle must be in [0, 1]".into(),
            ));
        }

        if self.duty_cycle_period == 0 {
            return Err(SpError::InvalidParameter(
                "duty_cycle_period must be positive".into(),
            ));
        }
        if self.update_period == 0 {
            return Err(SpError::InvalidParameter(
                "update_period must be positive".into(),
            ));
        }
        if self.max_boost < 1.0 {
            return Err(SpError::InvalidParameter(
                "max_boost must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Number of inputs: the product of `input_dimensions`.
    pub fn num_inputs(&self) -> usize {
        self.input_dimensions.iter().product()
    }

    /// Number of columns: the product of `column_dimensions`.
    pub fn num_columns(&self) -> usize {
        self.column_dimensions.iter().product()
    }
}
