//! Confusion matrix over a fixed class count

use crate::error::{Error, Result};
use std::fmt;

/// Confusion matrix for multi-class classification
///
/// Element `[i][j]` counts samples with true class `i` predicted as `j`. The
/// class count is fixed by the label code up front, never inferred from the
/// observed labels: a run where one class happens to be absent must still be
/// scored against the full class set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// `matrix[true_class][predicted_class]` = count
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Create an empty matrix for a fixed number of classes
    pub fn new(n_classes: usize) -> Result<Self> {
        if n_classes == 0 {
            return Err(Error::InvalidLabelCode(
                "cannot score against zero classes".to_string(),
            ));
        }
        Ok(Self {
            matrix: vec![vec![0; n_classes]; n_classes],
            n_classes,
        })
    }

    /// Build from paired predicted and true class indices
    pub fn from_labels(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Result<Self> {
        if y_pred.len() != y_true.len() {
            return Err(Error::MismatchedLengths {
                predicted: y_pred.len(),
                truth: y_true.len(),
            });
        }
        if y_pred.is_empty() {
            return Err(Error::EmptyInput("label set for scoring".to_string()));
        }
        let mut cm = Self::new(n_classes)?;
        for (&pred, &truth) in y_pred.iter().zip(y_true) {
            cm.record(truth, pred)?;
        }
        Ok(cm)
    }

    /// Record one sample
    pub fn record(&mut self, true_class: usize, predicted_class: usize) -> Result<()> {
        for index in [true_class, predicted_class] {
            if index >= self.n_classes {
                return Err(Error::ClassOutOfRange {
                    index,
                    n_classes: self.n_classes,
                });
            }
        }
        self.matrix[true_class][predicted_class] += 1;
        Ok(())
    }

    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count at `[true_class][predicted_class]`
    pub fn get(&self, true_class: usize, predicted_class: usize) -> usize {
        self.matrix[true_class][predicted_class]
    }

    /// True positives for a class
    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// False positives for a class (predicted as it but wasn't)
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&i| i != class)
            .map(|i| self.matrix[i][class])
            .sum()
    }

    /// False negatives for a class (was it but predicted otherwise)
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&j| j != class)
            .map(|j| self.matrix[class][j])
            .sum()
    }

    /// True negatives for a class
    pub fn true_negatives(&self, class: usize) -> usize {
        self.total()
            - self.true_positives(class)
            - self.false_positives(class)
            - self.false_negatives(class)
    }

    /// Number of samples whose true class is `class`
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Fraction of samples on the diagonal
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }

    /// Recall of one class: TP / (TP + FN), 0 when the class has no support
    pub fn recall(&self, class: usize) -> f64 {
        ratio(self.true_positives(class), self.false_negatives(class))
    }

    /// One-vs-rest specificity of one class: TN / (TN + FP)
    pub fn specificity(&self, class: usize) -> f64 {
        ratio(self.true_negatives(class), self.false_positives(class))
    }

    /// Precision of one class: TP / (TP + FP), 0 when never predicted
    pub fn precision(&self, class: usize) -> f64 {
        ratio(self.true_positives(class), self.false_positives(class))
    }

    /// One-vs-rest negative predictive value of one class: TN / (TN + FN)
    pub fn negative_predictive_value(&self, class: usize) -> f64 {
        ratio(self.true_negatives(class), self.false_negatives(class))
    }
}

/// `hits / (hits + misses)`, 0 when the denominator is empty
fn ratio(hits: usize, misses: usize) -> f64 {
    if hits + misses == 0 {
        return 0.0;
    }
    hits as f64 / (hits + misses) as f64
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion matrix:")?;
        write!(f, "      ")?;
        for j in 0..self.n_classes {
            write!(f, "Pred {j} ")?;
        }
        writeln!(f)?;
        for i in 0..self.n_classes {
            write!(f, "True {i}")?;
            for j in 0..self.n_classes {
                write!(f, "{:>6} ", self.matrix[i][j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
