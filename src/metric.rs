use crate::data::Label;
use crate::errors::DecisionTreeError;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type MetricFn = fn(&[Label], &[Label]) -> f64;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub enum Metric {
    ErrorRate,
    Accuracy,
}

impl FromStr for Metric {
    type Err = DecisionTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ErrorRate" => Ok(Metric::ErrorRate),
            "Accuracy" => Ok(Metric::Accuracy),

            _ => Err(DecisionTreeError::ParseString(
                s.to_string(),
                "Metric".to_string(),
                items_to_strings(vec!["ErrorRate", "Accuracy"]),
            )),
        }
    }
}

pub fn metric_callables(metric_type: &Metric) -> MetricFn {
    match metric_type {
        Metric::ErrorRate => error_rate,
        Metric::Accuracy => accuracy,
    }
}

/// Number of predictions that differ from the true label.
pub fn error_count(y: &[Label], yhat: &[Label]) -> usize {
    y.iter().zip(yhat).filter(|(y_, yhat_)| y_ != yhat_).count()
}

/// Fraction of predictions that differ from the true label, `0` for empty input.
pub fn error_rate(y: &[Label], yhat: &[Label]) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    error_count(y, yhat) as f64 / y.len() as f64
}

pub fn accuracy(y: &[Label], yhat: &[Label]) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    1.0 - error_rate(y, yhat)
}
