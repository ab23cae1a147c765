//! Inhibition - winner-take-k column selection (spec.md §4.5).
//!
//! No direct teacher file mirrors this; built in the teacher's idiom (plain
//! functions over explicit slices, no hidden state) from spec.md's
//! description, since NuPIC's own published spatial pooler (the closest
//! prior art for this algorithm) has no source file in the retrieval pack.

use crate::topology::Topology;
use crate::utils::round_away_from_zero;

/// Select the winning columns for one `compute` step.
///
/// `raw_overlaps` has already had `stimulus_threshold` applied by the caller
/// (spec.md §4.4 step 2 zeroes any column whose overlap is strictly below
/// `stimulus_threshold`, so a column meeting the threshold exactly keeps its
/// real nonzero count). A column is eligible to win here iff that surviving
/// overlap is nonzero - this is what makes an all-zero input produce an
/// empty active set even though `tie_breaker` noise would otherwise make
/// every scored overlap strictly positive. Eligible columns are then ranked
/// by `boosted_overlaps + tie_breaker` and dispatched to
/// [`inhibit_columns_global`] or [`inhibit_columns_local`] depending on
/// `global_inhibition` and whether `inhibition_radius` has grown past the
/// largest column dimension.
#[allow(clippy::too_many_arguments)]
pub fn inhibit_columns(
    raw_overlaps: &[usize],
    boosted_overlaps: &[f64],
    tie_breaker: &[f64],
    global_inhibition: bool,
    local_area_density: f64,
    num_active_columns_per_inh_area: f64,
    inhibition_radius: usize,
    column_topology: &Topology,
) -> Vec<usize> {
    let num_columns = boosted_overlaps.len();
    debug_assert_eq!(tie_breaker.len(), num_columns);
    debug_assert_eq!(raw_overlaps.len(), num_columns);

    let scored: Vec<f64> = boosted_overlaps
        .iter()
        .zip(tie_breaker.iter())
        .map(|(&o, &t)| o + t)
        .collect();
    let eligible: Vec<bool> = raw_overlaps.iter().map(|&o| o > 0).collect();

    let density = if local_area_density > 0.0 {
        local_area_density
    } else {
        let base = (2 * inhibition_radius + 1) as u64;
        let exp = column_topology.num_dimensions() as u32;
        let area = base
            .checked_pow(exp)
            .map(|v| v.min(num_columns as u64))
            .unwrap_or(num_columns as u64) as f64;
        (num_active_columns_per_inh_area / area).min(0.5)
    };

    let max_column_dim = *column_topology.dimensions().iter().max().unwrap();
    if global_inhibition || inhibition_radius > max_column_dim {
        inhibit_columns_global(&scored, &eligible, density)
    } else {
        let mut scored = scored;
        inhibit_columns_local(&mut scored, &eligible, density, column_topology, inhibition_radius)
    }
}

/// Return the top `floor(density * numColumns)` *eligible* column indices by
/// overlap, breaking ties by ascending column index, then sorted ascending.
pub fn inhibit_columns_global(scored_overlaps: &[f64], eligible: &[bool], density: f64) -> Vec<usize> {
    let num_winners = (density * scored_overlaps.len() as f64).floor() as usize;

    let mut indices: Vec<usize> = (0..scored_overlaps.len()).filter(|&i| eligible[i]).collect();
    indices.sort_by(|&a, &b| {
        scored_overlaps[b]
            .partial_cmp(&scored_overlaps[a])
            .unwrap()
            .then(a.cmp(&b))
    });

    let mut winners: Vec<usize> = indices.into_iter().take(num_winners).collect();
    winners.sort_unstable();
    winners
}

/// For each *eligible* column `i` in ascending order, let `N` be its
/// non-wrapping `inhibition_radius` neighborhood; `i` wins iff fewer than
/// `round(density * (|N| + 1))` neighbors currently have strictly greater
/// overlap. A tiny boost (`max(overlaps) / 1000`) is added to each winner's
/// overlap as it is found, so later columns see already-selected neighbors
/// as slightly stronger. This makes the result depend on ascending
/// evaluation order (spec.md §9) - do not parallelize this loop.
pub fn inhibit_columns_local(
    scored_overlaps: &mut [f64],
    eligible: &[bool],
    density: f64,
    column_topology: &Topology,
    inhibition_radius: usize,
) -> Vec<usize> {
    let original_max = scored_overlaps.iter().cloned().fold(f64::MIN, f64::max);
    let boost = original_max / 1000.0;

    let mut winners = Vec::new();
    for i in 0..scored_overlaps.len() {
        if !eligible[i] {
            continue;
        }
        let neighbors = column_topology.neighbors_nd(i, inhibition_radius, false);
        let k = round_away_from_zero(density * (neighbors.len() + 1) as f64) as usize;
        let stronger = neighbors
            .iter()
            .filter(|&&n| scored_overlaps[n] > scored_overlaps[i])
            .count();
        if stronger < k {
            winners.push(i);
            scored_overlaps[i] += boost;
        }
    }
    winners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_inhibition_picks_top_by_overlap() {
        let overlaps = vec![1.0, 5.0, 3.0, 4.0, 2.0];
        let eligible = vec![true; 5];
        let winners = inhibit_columns_global(&overlaps, &eligible, 0.4);
        // floor(0.4*5) = 2 winners: indices 1 (5.0) and 3 (4.0)
        assert_eq!(winners, vec![1, 3]);
    }

    #[test]
    fn test_global_inhibition_breaks_ties_by_index() {
        let overlaps = vec![3.0, 3.0, 3.0, 1.0];
        let eligible = vec![true; 4];
        let winners = inhibit_columns_global(&overlaps, &eligible, 0.5);
        // floor(0.5*4) = 2; ties broken by ascending index among equal overlaps
        assert_eq!(winners, vec![0, 1]);
    }

    #[test]
    fn test_global_inhibition_excludes_ineligible_columns() {
        let overlaps = vec![3.0, 3.0, 3.0, 1.0];
        let eligible = vec![false, true, true, true];
        let winners = inhibit_columns_global(&overlaps, &eligible, 0.5);
        assert_eq!(winners, vec![1, 2]);
    }

    #[test]
    fn test_global_inhibition_all_ineligible_yields_no_winners() {
        let overlaps = vec![0.001, 0.002, 0.003];
        let eligible = vec![false, false, false];
        let winners = inhibit_columns_global(&overlaps, &eligible, 0.5);
        assert!(winners.is_empty());
    }

    #[test]
    fn test_sparsity_invariant_distinct_overlaps() {
        let overlaps: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let eligible = vec![true; 100];
        let winners = inhibit_columns_global(&overlaps, &eligible, 0.1);
        assert_eq!(winners.len(), 10);
    }

    #[test]
    fn test_local_inhibition_density_scenario() {
        // spec.md scenario 4: columnDim=[100], inhibitionRadius=4, localAreaDensity=0.5
        // overlaps = index mod 7
        let column_topology = Topology::new(vec![100]);
        let mut scored: Vec<f64> = (0..100).map(|i| (i % 7) as f64).collect();
        let eligible = vec![true; 100];
        let winners = inhibit_columns_local(&mut scored, &eligible, 0.5, &column_topology, 4);

        // every neighbor-window of size 9 (radius 4, wrap=false) has <= 5 winners
        for center in 4..96 {
            let neighbors = column_topology.neighbors_nd(center, 4, false);
            let mut window: Vec<usize> = neighbors.clone();
            window.push(center);
            let count = window.iter().filter(|c| winners.contains(c)).count();
            assert!(count <= 5, "window around {center} had {count} winners");
        }
    }

    #[test]
    fn test_local_inhibition_returns_ascending() {
        let column_topology = Topology::new(vec![50]);
        let mut scored: Vec<f64> = (0..50).map(|i| ((i * 37) % 50) as f64).collect();
        let eligible = vec![true; 50];
        let winners = inhibit_columns_local(&mut scored, &eligible, 0.3, &column_topology, 3);
        let mut sorted = winners.clone();
        sorted.sort_unstable();
        assert_eq!(winners, sorted);
    }

    #[test]
    fn test_local_inhibition_ineligible_columns_never_win() {
        let column_topology = Topology::new(vec![20]);
        let mut scored: Vec<f64> = vec![5.0; 20];
        let mut eligible = vec![true; 20];
        eligible[3] = false;
        let winners = inhibit_columns_local(&mut scored, &eligible, 0.5, &column_topology, 2);
        assert!(!winners.contains(&3));
    }
}
