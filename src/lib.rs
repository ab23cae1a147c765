//! A spatial pooler: a biologically inspired learning algorithm that converts
//! an arbitrary binary input vector into a Sparse Distributed Representation
//! (SDR) - a small, fixed-sparsity set of active columns - while
//! continuously adapting its internal synapse strengths so that similar
//! inputs map to overlapping SDRs and rare inputs still obtain
//! representation.
//!
//! # Key Characteristics
//!
//! - Arbitrary-dimensionality input and column topologies
//! - Global or local winner-take-k inhibition
//! - Homeostatic duty-cycle and boosting feedback loops
//! - No hidden global state: everything flows through an explicit
//!   [`Connections`] value
//!
//! # Architecture
//!
//! - **BitField**: dense bit-vector storage for inputs, active columns, and
//!   per-column connected-synapse masks
//! - **Topology**: N-D index/coordinate conversion and neighborhoods
//! - **Column** / **PermanenceMatrix**: per-column potential pools,
//!   permanences, and their derived connected-synapse mirror
//! - **Connections**: the state bundle and public facade (`new`, `init`,
//!   `compute`)
//!
//! # Examples
//!
//! ```
//! use spatial_pooler::{BitField, Connections, SpConfig};
//!
//! let config = SpConfig {
//!     input_dimensions: vec![32],
//!     column_dimensions: vec![16],
//!     potential_radius: 16,
//!     potential_pct: 0.5,
//!     global_inhibition: true,
//!     local_area_density: -1.0,
//!     num_active_columns_per_inh_area: 3.0,
//!     stimulus_threshold: 0,
//!     syn_perm_inactive_dec: 0.008,
//!     syn_perm_active_inc: 0.05,
//!     syn_perm_below_stimulus_inc: 0.01,
//!     syn_perm_trim_threshold: 0.05,
//!     syn_perm_connected: 0.1,
//!     min_pct_overlap_duty_cycle: 0.001,
//!     min_pct_active_duty_cycle: 0.001,
//!     duty_cycle_period: 1000,
//!     max_boost: 10.0,
//!     update_period: 50,
//!     seed: 42,
//!     wrap_around: true,
//! };
//!
//! let mut connections = Connections::new(config).unwrap();
//! connections.init().unwrap();
//!
//! let mut input = BitField::new(32);
//! input.set_all();
//! let mut active = BitField::new(16);
//!
//! connections.compute(&input, &mut active, false, false).unwrap();
//! assert_eq!(active.num_set(), 3);
//! ```
//!
//! # Safety
//!
//! `debug_assert!` guards invariants that a validated [`SpConfig`] already
//! rules out (mismatched coordinate rank, out-of-range bit index), giving
//! zero-cost bounds checking in release builds and full validation in debug
//! builds and tests.

pub mod bitfield;
pub mod column;
pub mod config;
pub mod connections;
pub mod error;
pub mod inhibition;
pub mod init;
pub mod permanence_matrix;
pub mod sparse_binary_matrix;
pub mod topology;
pub mod utils;

pub use bitfield::{bitfield_copy_words, BitField, Word, BITS_PER_WORD};
pub use column::Column;
pub use config::{SpConfig, SYN_PERM_MAX, SYN_PERM_MIN};
pub use connections::Connections;
pub use error::{Result, SpError};
pub use permanence_matrix::PermanenceMatrix;
pub use sparse_binary_matrix::SparseBinaryMatrix;
pub use topology::Topology;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "spatial-pooler";

/// Get a human-readable version string.
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
