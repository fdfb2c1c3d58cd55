//! Deterministic graph fixtures for benchmarks.

use rand::{SeedableRng, rngs::SmallRng};
use smallworld_core::{Graph, LatticeParams};

use crate::{error::BenchSetupError, params::RewireBenchParams};

/// Seed shared by every benchmark fixture.
pub const SEED: u64 = 42;

/// Generates the rewired graph described by `params` with a fixed seed.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when the lattice shape or probability
/// is rejected.
pub fn rewired_graph(params: RewireBenchParams) -> Result<Graph, BenchSetupError> {
    let lattice = LatticeParams::new(params.lattice.nodes, params.lattice.degree)?;
    let mut rng = SmallRng::seed_from_u64(SEED);
    Ok(lattice.generate(params.probability, &mut rng)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::params::LatticeBenchParams;

    #[rstest]
    fn fixtures_are_reproducible() {
        let params = RewireBenchParams {
            lattice: LatticeBenchParams {
                nodes: 60,
                degree: 6,
            },
            probability: 0.2,
        };
        let first = rewired_graph(params).expect("fixture must build");
        let second = rewired_graph(params).expect("fixture must build");
        assert_eq!(first, second);
        assert_eq!(first.edge_count(), 180);
    }

    #[rstest]
    fn invalid_shapes_surface_setup_errors() {
        let params = RewireBenchParams {
            lattice: LatticeBenchParams {
                nodes: 6,
                degree: 3,
            },
            probability: 0.0,
        };
        assert!(matches!(
            rewired_graph(params),
            Err(BenchSetupError::Graph(_))
        ));
    }
}
