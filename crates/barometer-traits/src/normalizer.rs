//! Normalizer trait for turning raw aligned columns into scores.
//!
//! A normalizer maps one aligned column (one value per calendar date, `None`
//! where undefined) onto a dimensionless score column of the same length.
//! Implementations hold no state across calls beyond their parameters, so
//! the output depends only on the full historical column passed in.

/// A rolling normalization strategy.
///
/// Implementations should be thread-safe (`Send + Sync`) so a boxed
/// normalizer can be stored in component definitions.
///
/// # Example
///
/// ```
/// use barometer_traits::Normalizer;
///
/// /// Passes values through unchanged.
/// struct Identity;
///
/// impl Normalizer for Identity {
///     fn name(&self) -> &str {
///         "identity"
///     }
///
///     fn normalize(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
///         values.to_vec()
///     }
///
///     fn warm_up(&self) -> usize {
///         1
///     }
/// }
///
/// let scores = Identity.normalize(&[Some(1.0), None]);
/// assert_eq!(scores, vec![Some(1.0), None]);
/// ```
pub trait Normalizer: Send + Sync {
    /// Returns the name of this normalizer.
    ///
    /// Used in logging and in the component listing of the CLI.
    fn name(&self) -> &str;

    /// Computes the score column for an aligned input column.
    ///
    /// The output has the same length as `values`. A position is `None`
    /// whenever the strategy's window requirement is not met there, or the
    /// score would involve a division by a zero spread.
    fn normalize(&self, values: &[Option<f64>]) -> Vec<Option<f64>>;

    /// Returns the number of defined samples required before the first score
    /// can be produced.
    fn warm_up(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Demean;

    impl Normalizer for Demean {
        fn name(&self) -> &str {
            "demean"
        }

        fn normalize(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
            let defined: Vec<f64> = values.iter().flatten().copied().collect();
            if defined.is_empty() {
                return vec![None; values.len()];
            }
            let mean = defined.iter().sum::<f64>() / defined.len() as f64;
            values.iter().map(|v| v.map(|x| x - mean)).collect()
        }

        fn warm_up(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_normalizer_preserves_length() {
        let out = Demean.normalize(&[Some(1.0), None, Some(3.0)]);
        assert_eq!(out, vec![Some(-1.0), None, Some(1.0)]);
    }

    #[test]
    fn test_normalizer_name_and_warm_up() {
        assert_eq!(Demean.name(), "demean");
        assert_eq!(Demean.warm_up(), 1);
    }

    #[test]
    fn test_normalizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Normalizer>();
    }
}
