//! Permanence invariants 2-3, raise-to-threshold, and trim/clip behavior
//! (spec.md §8 invariants, §9 raise-all bug parity).

use spatial_pooler::{Column, PermanenceMatrix, SYN_PERM_MAX, SYN_PERM_MIN};

#[test]
fn permanences_stay_within_min_and_max_after_clipping() {
    let mut m = PermanenceMatrix::new(1, 10);
    m.set_column(0, Column::new(vec![0, 1, 2], vec![-1.0, 0.5, 2.0]));
    m.trim_and_clip(0, 0.0);
    for &p in m.column(0).permanences() {
        assert!(p >= SYN_PERM_MIN && p <= SYN_PERM_MAX);
    }
}

#[test]
fn permanences_at_or_below_trim_threshold_become_exactly_zero() {
    let mut m = PermanenceMatrix::new(1, 10);
    m.set_column(0, Column::new(vec![0, 1, 2], vec![0.01, 0.05, 0.2]));
    m.trim_and_clip(0, 0.05);
    assert_eq!(m.column(0).permanences(), &[0.0, 0.0, 0.2]);
}

#[test]
fn connected_count_matches_number_of_pool_entries_at_or_above_threshold() {
    let mut m = PermanenceMatrix::new(1, 20);
    m.set_column(0, Column::new(vec![0, 5, 9, 14], vec![0.05, 0.1, 0.2, 0.3]));
    m.refresh_connected(0, 0.1);
    assert_eq!(m.connected_count(0), 3);
    assert_eq!(m.connected_indices(0), vec![5, 9, 14]);
}

#[test]
fn raise_permanence_to_threshold_bumps_every_pool_entry_together() {
    // spec.md §9: a targeted raise would diverge from reference behavior -
    // the whole column must move together, preserving relative spacing.
    let mut m = PermanenceMatrix::new(1, 10);
    m.set_column(0, Column::new(vec![0, 1, 2, 3], vec![0.0, 0.01, 0.02, 0.03]));
    m.raise_permanence_to_threshold(0, 0.1, 3, 0.05);

    let perms = m.column(0).permanences();
    let gaps: Vec<f64> = perms.windows(2).map(|w| w[1] - w[0]).collect();
    for g in gaps {
        assert!((g - 0.01).abs() < 1e-9);
    }
    assert!(m.column(0).connected_count(0.1) >= 3);
}

#[test]
fn raise_permanence_to_threshold_is_a_no_op_on_an_empty_pool() {
    let mut m = PermanenceMatrix::new(1, 10);
    m.raise_permanence_to_threshold(0, 0.1, 5, 0.05);
    assert!(m.column(0).is_empty());
}

#[test]
fn update_permanences_for_column_keeps_the_connected_mirror_in_sync() {
    let mut m = PermanenceMatrix::new(1, 10);
    m.set_column(0, Column::new(vec![0, 1, 2, 3], vec![0.01, 0.02, 0.03, 0.04]));
    m.update_permanences_for_column(0, 0.1, 0.0, 2, 0.05, true);
    assert_eq!(m.connected_count(0), m.column(0).connected_count(0.1));
}
