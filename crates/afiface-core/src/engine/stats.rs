use super::error::EngineError;
use serde::Serialize;

pub fn mean(values: &[f64]) -> Result<f64, EngineError> {
    if values.is_empty() {
        return Err(EngineError::EmptyInput("mean"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; for an even count, the average of the two middle values.
pub fn median(values: &[f64]) -> Result<f64, EngineError> {
    if values.is_empty() {
        return Err(EngineError::EmptyInput("median"));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockSummary {
    pub median: f64,
    pub mean: f64,
}

impl BlockSummary {
    pub fn of(values: &[f64]) -> Result<Self, EngineError> {
        Ok(Self {
            median: median(values)?,
            mean: mean(values)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ErrorKind;

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0);
    }

    #[test]
    fn median_of_odd_count_is_middle_value() {
        assert_eq!(median(&[9.0, 1.0, 5.0]).unwrap(), 5.0);
    }

    #[test]
    fn median_of_even_count_averages_middle_values() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 10.0]).unwrap(), 3.5);
    }

    #[test]
    fn empty_values_are_an_error_not_zero() {
        assert_eq!(mean(&[]).unwrap_err().kind(), ErrorKind::EmptyInput);
        assert_eq!(median(&[]).unwrap_err().kind(), ErrorKind::EmptyInput);
        assert!(BlockSummary::of(&[]).is_err());
    }
}
