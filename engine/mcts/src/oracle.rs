//! Policy/value oracle used by the guided search.
//!
//! An oracle maps an [`Observation`] to a value estimate for the side to move
//! and a prior over the seven columns. The search checks every answer against
//! the contract below and rejects it instead of repairing it:
//!
//! - `value` is finite and within [-1, 1]
//! - every prior is non-negative
//! - priors sum to 1 within [`PRIOR_TOLERANCE`]
//! - full columns carry no prior mass

use std::sync::Mutex;

use games_connect4::{Observation, COLS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Allowed deviation of the prior sum from 1.
pub const PRIOR_TOLERANCE: f32 = 1e-3;

/// Errors raised by an oracle or by contract validation of its output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("Value {0} outside [-1, 1]")]
    ValueOutOfRange(f32),

    #[error("Prior sums to {0}, expected 1")]
    PriorNotNormalised(f32),

    #[error("Negative prior {prior} for column {col}")]
    NegativePrior { col: usize, prior: f32 },

    #[error("Prior {prior} assigned to full column {col}")]
    IllegalMass { col: usize, prior: f32 },

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),
}

/// Answer of an oracle for one position.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleOutput {
    /// Value estimate for the side to move.
    /// Range: -1.0 (certain loss) to +1.0 (certain win).
    pub value: f32,

    /// Probability of each column being the best move.
    pub prior: [f32; COLS],
}

impl OracleOutput {
    /// Check the output against the contract for a position whose open
    /// columns are the set bits of `legal_mask`.
    pub fn validate(&self, legal_mask: u8) -> Result<(), OracleError> {
        if !self.value.is_finite() || !(-1.0..=1.0).contains(&self.value) {
            return Err(OracleError::ValueOutOfRange(self.value));
        }

        for (col, &prior) in self.prior.iter().enumerate() {
            if prior.is_nan() || prior < 0.0 {
                return Err(OracleError::NegativePrior { col, prior });
            }
            if prior > 0.0 && (legal_mask >> col) & 1 == 0 {
                return Err(OracleError::IllegalMass { col, prior });
            }
        }

        let sum: f32 = self.prior.iter().sum();
        if (sum - 1.0).abs() > PRIOR_TOLERANCE {
            return Err(OracleError::PriorNotNormalised(sum));
        }

        Ok(())
    }
}

/// Trait for policy/value oracles.
///
/// Implementations could be:
/// - UniformOracle: uniform prior, neutral value (for testing)
/// - RandomOracle: uniform prior, random value (stand-in for an untrained model)
/// - a model wrapper performing inference
///
/// Any `Fn(&Observation) -> Result<OracleOutput, OracleError>` closure is an
/// oracle as well.
pub trait Oracle: Send + Sync {
    /// Evaluate a single observation.
    fn evaluate(&self, observation: &Observation) -> Result<OracleOutput, OracleError>;
}

impl<F> Oracle for F
where
    F: Fn(&Observation) -> Result<OracleOutput, OracleError> + Send + Sync,
{
    fn evaluate(&self, observation: &Observation) -> Result<OracleOutput, OracleError> {
        self(observation)
    }
}

/// Uniform prior over the columns open in `legal_mask`.
pub fn uniform_prior(legal_mask: u8) -> [f32; COLS] {
    let mut prior = [0.0f32; COLS];
    let num_legal = (legal_mask & 0x7F).count_ones();
    if num_legal == 0 {
        return prior;
    }

    let prob = 1.0 / num_legal as f32;
    for (col, p) in prior.iter_mut().enumerate() {
        if (legal_mask >> col) & 1 == 1 {
            *p = prob;
        }
    }
    prior
}

/// Oracle that assigns equal probability to all open columns.
/// Value is always 0.0 (neutral). Useful for testing the search without a model.
#[derive(Debug, Clone, Default)]
pub struct UniformOracle;

impl UniformOracle {
    pub fn new() -> Self {
        Self
    }
}

impl Oracle for UniformOracle {
    fn evaluate(&self, observation: &Observation) -> Result<OracleOutput, OracleError> {
        Ok(OracleOutput {
            value: 0.0,
            prior: uniform_prior(observation.legal_mask()),
        })
    }
}

/// Oracle with a uniform prior and a uniformly random value in [-1, 1].
#[derive(Debug)]
pub struct RandomOracle {
    rng: Mutex<ChaCha20Rng>,
}

impl RandomOracle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl Oracle for RandomOracle {
    fn evaluate(&self, observation: &Observation) -> Result<OracleOutput, OracleError> {
        let value = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| OracleError::EvaluationFailed(format!("Lock poisoned: {}", e)))?;
            rng.gen_range(-1.0f32..=1.0)
        };

        Ok(OracleOutput {
            value,
            prior: uniform_prior(observation.legal_mask()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Board;

    fn output(value: f32, prior: [f32; COLS]) -> OracleOutput {
        OracleOutput { value, prior }
    }

    #[test]
    fn test_uniform_oracle() {
        let oracle = UniformOracle::new();
        let obs = Observation::from_board(&Board::new(), true);

        let result = oracle.evaluate(&obs).unwrap();
        for p in &result.prior {
            assert!((p - 1.0 / 7.0).abs() < 1e-6);
        }
        assert!((result.value).abs() < 1e-6);
        assert_eq!(result.validate(obs.legal_mask()), Ok(()));
    }

    #[test]
    fn test_uniform_prior_respects_mask() {
        // Columns 0, 4 and 6 open
        let prior = uniform_prior(0b1010001);
        assert!((prior[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((prior[4] - 1.0 / 3.0).abs() < 1e-6);
        assert!((prior[6] - 1.0 / 3.0).abs() < 1e-6);
        assert!((prior[1]).abs() < 1e-6);

        assert_eq!(uniform_prior(0), [0.0; COLS]);
    }

    #[test]
    fn test_random_oracle_is_seeded() {
        let obs = Observation::from_board(&Board::new(), true);
        let a = RandomOracle::new(9);
        let b = RandomOracle::new(9);

        for _ in 0..10 {
            let va = a.evaluate(&obs).unwrap();
            let vb = b.evaluate(&obs).unwrap();
            assert_eq!(va, vb);
            assert!((-1.0..=1.0).contains(&va.value));
            assert_eq!(va.validate(0x7F), Ok(()));
        }
    }

    #[test]
    fn test_closure_oracle() {
        let oracle = |_: &Observation| {
            Ok::<_, OracleError>(OracleOutput {
                value: 0.5,
                prior: uniform_prior(0x7F),
            })
        };
        let obs = Observation::from_board(&Board::new(), true);
        assert!((oracle.evaluate(&obs).unwrap().value - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_validate_value_range() {
        let prior = uniform_prior(0x7F);
        assert_eq!(output(1.0, prior).validate(0x7F), Ok(()));
        assert_eq!(output(-1.0, prior).validate(0x7F), Ok(()));
        assert_eq!(
            output(1.5, prior).validate(0x7F),
            Err(OracleError::ValueOutOfRange(1.5))
        );
        assert!(matches!(
            output(f32::NAN, prior).validate(0x7F),
            Err(OracleError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_validate_prior_sum() {
        let mut prior = uniform_prior(0x7F);
        prior[0] += 0.1;
        assert!(matches!(
            output(0.0, prior).validate(0x7F),
            Err(OracleError::PriorNotNormalised(_))
        ));

        // Within tolerance
        let mut prior = uniform_prior(0x7F);
        prior[0] += 0.0005;
        assert_eq!(output(0.0, prior).validate(0x7F), Ok(()));
    }

    #[test]
    fn test_validate_negative_prior() {
        let mut prior = [0.0f32; COLS];
        prior[0] = 1.2;
        prior[1] = -0.2;
        assert_eq!(
            output(0.0, prior).validate(0x7F),
            Err(OracleError::NegativePrior {
                col: 1,
                prior: -0.2
            })
        );
    }

    #[test]
    fn test_validate_illegal_mass() {
        // Column 3 full, but the prior still puts mass there
        let prior = uniform_prior(0x7F);
        let mask = 0x7F & !(1 << 3);
        assert!(matches!(
            output(0.0, prior).validate(mask),
            Err(OracleError::IllegalMass { col: 3, .. })
        ));
    }
}
