//! Maize chromosome identifiers.
//!
//! Accepts the naming conventions seen in maize map files:
//! - bare numbers: 1, 2, ..., 10
//! - prefixed: chr3, Chr3, CHR3

use crate::error::M2mcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of chromosomes in the maize haploid set.
pub const MAIZE_CHROMOSOMES: u8 = 10;

/// A validated maize chromosome number (1 to 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Chromosome(u8);

impl Chromosome {
    /// Create a chromosome from its number.
    pub fn new(number: u8) -> Result<Self, M2mcError> {
        if (1..=MAIZE_CHROMOSOMES).contains(&number) {
            Ok(Self(number))
        } else {
            Err(M2mcError::InvalidChromosome {
                id: number.to_string(),
            })
        }
    }

    /// Chromosome number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// All maize chromosomes in order.
    pub fn all() -> impl Iterator<Item = Chromosome> {
        (1..=MAIZE_CHROMOSOMES).map(Chromosome)
    }
}

impl FromStr for Chromosome {
    type Err = M2mcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &trimmed[3..],
            _ => trimmed,
        };

        digits
            .parse::<u8>()
            .map_err(|_| M2mcError::InvalidChromosome { id: s.to_string() })
            .and_then(|n| {
                Chromosome::new(n).map_err(|_| M2mcError::InvalidChromosome { id: s.to_string() })
            })
    }
}

impl TryFrom<u8> for Chromosome {
    type Error = M2mcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Chromosome::new(value)
    }
}

impl From<Chromosome> for u8 {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.0
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
