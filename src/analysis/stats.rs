/// Running arithmetic mean.
///
/// The mean is updated incrementally so a series of identical values keeps
/// exactly that value, which in turn makes their deviation exactly zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct Average {
    mean: f64,
    count: usize,
}

impl Average {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    /// Mean of the pushed values, `0.0` when nothing was pushed.
    pub fn average(&self) -> f64 {
        self.mean
    }
}

impl FromIterator<f64> for Average {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut average = Self::default();
        for value in iter {
            average.push(value);
        }
        average
    }
}

/// Population standard deviation (divides by N). Zero for fewer than two values.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mean = values.iter().copied().collect::<Average>().average();
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / values.len() as f64;

    variance.sqrt()
}

/// `numerator / denominator`, or `0.0` when the denominator is zero.
pub fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dev_of_textbook_series_is_two() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

        assert!((population_std_dev(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn std_dev_of_identical_values_is_exactly_zero() {
        assert_eq!(population_std_dev(&[0.1, 0.1, 0.1]), 0.0);
        assert_eq!(population_std_dev(&[3.7; 9]), 0.0);
    }

    #[test]
    fn std_dev_below_two_values_is_zero() {
        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(population_std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(Average::default().average(), 0.0);
        assert_eq!([1.0, 2.0, 3.0].into_iter().collect::<Average>().average(), 2.0);
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(5, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }
}
