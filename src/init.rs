//! Initialization pipeline: `mapColumn`, `mapPotential`, `initPermanence`,
//! and the per-column wiring that `Connections::init` drives.
//!
//! No direct teacher file mirrors this module; it is built in the teacher's
//! idiom (free functions operating on explicit state, seeded `StdRng` passed
//! by `&mut`, `debug_assert!` for invariants that validated config already
//! rules out) rather than ported from any single source file.

use rand::Rng;

use crate::topology::Topology;
use crate::utils::{round_away_from_zero, sample_without_replacement};

/// Compute the input-space index that is column `column_idx`'s "center",
/// per spec.md §4.3: ratio-scale the column's coordinate by
/// `inputDim/columnDim`, add the half-step offset, clip into range.
pub fn map_column(input_topology: &Topology, column_topology: &Topology, column_idx: usize) -> usize {
    let column_coord = column_topology.compute_coordinates(column_idx);
    let input_dims = input_topology.dimensions();
    let column_dims = column_topology.dimensions();
    debug_assert_eq!(input_dims.len(), column_dims.len());

    let mut input_coord = vec![0usize; input_dims.len()];
    for d in 0..input_dims.len() {
        let ratio = input_dims[d] as f64 / column_dims[d] as f64;
        let scaled = column_coord[d] as f64 * ratio + ratio / 2.0;
        let clipped = (scaled as i64).clamp(0, input_dims[d] as i64 - 1);
        input_coord[d] = clipped as usize;
    }
    input_topology.compute_index(&input_coord)
}

/// Build column `column_idx`'s potential pool: the neighborhood of its
/// mapped center (plus the center itself), sampled down to `potential_pct`
/// of its size, sorted ascending.
pub fn map_potential<R: Rng>(
    input_topology: &Topology,
    column_topology: &Topology,
    column_idx: usize,
    potential_radius: usize,
    potential_pct: f64,
    wrap: bool,
    rng: &mut R,
) -> Vec<usize> {
    let center = map_column(input_topology, column_topology, column_idx);

    let mut candidates = input_topology.neighbors_nd(center, potential_radius, wrap);
    candidates.push(center);
    candidates.sort_unstable();
    candidates.dedup();

    let k = round_away_from_zero(candidates.len() as f64 * potential_pct) as usize;
    sample_without_replacement(&candidates, k, rng)
}

/// Assign an initial permanence to every entry of `pool`: a random subset of
/// size `round(|pool| * connected_pct)` starts "connected" (permanence near
/// `syn_perm_connected`, biased slightly above it); the rest start
/// unconnected (permanence a random fraction of `syn_perm_connected`). Every
/// value is truncated to five decimal places before trimming, per spec.md
/// §4.3's cross-platform reproducibility rationale.
pub fn init_permanence<R: Rng>(
    pool: &[usize],
    connected_pct: f64,
    syn_perm_connected: f64,
    syn_perm_active_inc: f64,
    syn_perm_trim_threshold: f64,
    rng: &mut R,
) -> Vec<f64> {
    let k = round_away_from_zero(pool.len() as f64 * connected_pct) as usize;
    let positions: Vec<usize> = (0..pool.len()).collect();
    let connected_positions = sample_without_replacement(&positions, k, rng);

    let mut permanences = Vec::with_capacity(pool.len());
    for i in 0..pool.len() {
        let is_connected = connected_positions.binary_search(&i).is_ok();
        let mut p = if is_connected {
            syn_perm_connected + rng.gen::<f64>() * syn_perm_active_inc / 4.0
        } else {
            syn_perm_connected * rng.gen::<f64>()
        };
        p = (p * 1e5).floor() / 1e5;
        if p <= syn_perm_trim_threshold {
            p = 0.0;
        }
        permanences.push(p);
    }
    permanences
}
