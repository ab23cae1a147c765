//! `mapColumn`/`mapPotential`/`initPermanence` and the stimulus-threshold
//! raise they feed into (spec.md scenario 6, potential-pool-size invariant 1).

use rand::SeedableRng;
use spatial_pooler::init::{init_permanence, map_column, map_potential};
use spatial_pooler::{Column, PermanenceMatrix, Topology};

#[test]
fn potential_pool_size_is_fixed_at_init_time() {
    let input = Topology::new(vec![200]);
    let column = Topology::new(vec![20]);
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    let pool = map_potential(&input, &column, 3, 10, 0.4, true, &mut rng);
    let expected_candidates = input.neighbors_nd(map_column(&input, &column, 3), 10, true).len() + 1;
    let expected_len = (expected_candidates as f64 * 0.4).round() as usize;
    assert_eq!(pool.len(), expected_len);
}

#[test]
fn map_column_centers_fall_inside_the_input_space() {
    let input = Topology::new(vec![64]);
    let column = Topology::new(vec![8]);
    for c in 0..8 {
        assert!(map_column(&input, &column, c) < 64);
    }
}

#[test]
fn stimulus_threshold_raise_guarantees_minimum_connected_count() {
    // spec.md scenario 6: a column whose initial pool starts under threshold
    // must end up with connectedCount >= stimulusThreshold.
    let input = Topology::new(vec![50]);
    let column = Topology::new(vec![10]);
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    let pool = map_potential(&input, &column, 0, 5, 0.5, true, &mut rng);
    // force every synapse to start unconnected, regardless of what
    // init_permanence happened to draw.
    let mut perms = init_permanence(&pool, 0.5, 0.1, 0.05, 0.0, &mut rng);
    for p in perms.iter_mut() {
        *p = 0.01;
    }

    let mut matrix = PermanenceMatrix::new(1, 50);
    matrix.set_column(0, Column::new(pool, perms));
    matrix.update_permanences_for_column(0, 0.1, 0.0, 3, 0.05, true);

    assert!(matrix.connected_count(0) >= 3);
}
