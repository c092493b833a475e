use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::election::core::{Algorithm, Identity, MAX_RING_SIZE, MIN_RING_SIZE};

/// Errors detected when a simulation is initialized; no simulation state is
/// created when any of these fire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The requested ring size is outside the supported [3, 8] range
    #[error("ring size {got} is out of bounds [3, 8]")]
    RingSizeOutOfRange { got: usize },

    /// Fewer identities were supplied than there are ring positions
    #[error("need {needed} identities for the ring, got {got}")]
    NotEnoughIdentities { needed: usize, got: usize },

    /// The same identity was supplied for two different ring positions
    #[error("identity {identity} appears more than once")]
    DuplicateIdentity { identity: Identity },
}

/// Caller-supplied configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Which step rule the simulation runs
    pub algorithm: Algorithm,
    /// Number of nodes on the ring (3..=8)
    pub ring_size: usize,
    /// Node identities in ring order; entries beyond `ring_size` are ignored
    pub identities: Vec<Identity>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::ChangRoberts,
            ring_size: 6,
            identities: vec![8, 3, 12, 1, 5, 9],
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration from explicit parts
    pub fn new(algorithm: Algorithm, ring_size: usize, identities: Vec<Identity>) -> Self {
        Self {
            algorithm,
            ring_size,
            identities,
        }
    }

    /// Validates the configuration and returns the identities actually used,
    /// one per ring position
    pub fn validated_identities(&self) -> Result<Vec<Identity>, ValidationError> {
        if self.ring_size < MIN_RING_SIZE || self.ring_size > MAX_RING_SIZE {
            return Err(ValidationError::RingSizeOutOfRange {
                got: self.ring_size,
            });
        }
        if self.identities.len() < self.ring_size {
            return Err(ValidationError::NotEnoughIdentities {
                needed: self.ring_size,
                got: self.identities.len(),
            });
        }

        let used = &self.identities[..self.ring_size];
        for (i, &identity) in used.iter().enumerate() {
            if used[..i].contains(&identity) {
                return Err(ValidationError::DuplicateIdentity { identity });
            }
        }

        Ok(used.to_vec())
    }

    /// Replaces the identities with `ring_size` distinct random values in 1..=20
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let mut identities: Vec<Identity> = Vec::with_capacity(self.ring_size);
        while identities.len() < self.ring_size {
            let candidate = rng.gen_range(1..=20);
            if !identities.contains(&candidate) {
                identities.push(candidate);
            }
        }
        self.identities = identities;
    }

    /// Shuffles the current identities into a new ring order
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.identities.shuffle(rng);
    }
}
