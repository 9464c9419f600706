//! Tests for the observation trackers and confidence intervals

use auto_body_shop_simulator::statistics::student_t;
use auto_body_shop_simulator::statistics::*;

/// Test counter, tally and aggregate basics
#[test]
fn test_trackers_accumulate() {
    let mut counter = Counter::new("arrivals");
    for _ in 0..4 {
        counter.increment();
    }
    assert_eq!(counter.value(), 4);

    let mut tally = Tally::new("response");
    for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
        tally.record(value);
    }
    assert_eq!(tally.count(), 8);
    assert!((tally.mean() - 5.0).abs() < 1e-12);
    // Sample variance of the classic example is 32 / 7
    assert!((tally.variance() - 32.0 / 7.0).abs() < 1e-12);
    assert_eq!(tally.min(), Some(2.0));
    assert_eq!(tally.max(), Some(9.0));

    let mut cost = Aggregate::new("cost");
    cost.add(100.0);
    cost.add(10.0);
    assert_eq!(cost.total(), 110.0);
}

/// Test an empty tally has no extremes
#[test]
fn test_empty_tally() {
    let tally = Tally::new("empty");
    assert_eq!(tally.count(), 0);
    assert_eq!(tally.min(), None);
    assert_eq!(tally.max(), None);
    assert_eq!(tally.mean(), 0.0);
}

/// Test time weighting of a queue that changes length
#[test]
fn test_time_weighted_average() {
    let mut stats = TimeWeightedQueueStats::new(0.0);
    stats.update(1.0, 2); // empty for one hour
    stats.update(3.0, 1); // two for two hours
    // one for the last hour
    assert!((stats.average_length(4.0) - 5.0 / 4.0).abs() < 1e-12);
    assert_eq!(stats.max_length(), 2);
    assert_eq!(stats.length(), 1);
}

/// Test known Student t quantiles
#[test]
fn test_student_t_quantiles() {
    assert!((student_t::quantile(0.975, 9.0) - 2.262157).abs() < 1e-4);
    assert!((student_t::quantile(0.975, 1.0) - 12.7062).abs() < 1e-3);
    assert!((student_t::quantile(0.95, 30.0) - 1.697261).abs() < 1e-4);
    assert!((student_t::quantile(0.025, 9.0) + 2.262157).abs() < 1e-4);
}

/// Test a confidence interval brackets the mean and narrows with more data
#[test]
fn test_confidence_interval_sanity() {
    let mut small = ConfidenceCalculator::new("small", 0.95);
    let mut large = ConfidenceCalculator::new("large", 0.95);
    let values = [10.0, 12.0, 9.0, 11.0, 13.0, 8.0, 10.0, 12.0, 11.0, 9.0];
    for value in &values[..3] {
        small.update(*value);
    }
    for _ in 0..5 {
        for value in &values {
            large.update(*value);
        }
    }

    for calculator in [&small, &large] {
        let lower = calculator.lower_bound().unwrap();
        let upper = calculator.upper_bound().unwrap();
        assert!(lower <= calculator.mean() && calculator.mean() <= upper);
    }
    assert!(large.half_width().unwrap() < small.half_width().unwrap());
}

/// Test intervals need two observations
#[test]
fn test_single_observation_has_no_interval() {
    let mut calculator = ConfidenceCalculator::new("one", 0.95);
    calculator.update(42.0);
    let summary = calculator.summary();
    assert_eq!(summary.observations, 1);
    assert_eq!(summary.mean, 42.0);
    assert_eq!(summary.lower_bound, None);
    assert!(summary.to_string().starts_with("one"));
}

/// Test a constant series collapses the interval onto the mean
#[test]
fn test_constant_series() {
    let mut calculator = ConfidenceCalculator::new("constant", 0.9);
    for _ in 0..10 {
        calculator.update(3.5);
    }
    assert_eq!(calculator.std_dev(), 0.0);
    assert_eq!(calculator.lower_bound(), Some(3.5));
    assert_eq!(calculator.upper_bound(), Some(3.5));
}
