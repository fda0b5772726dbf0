//! Step recording shared by every generator.
//!
//! A [`Recorder`] owns the growing step vector and the running counters of
//! one generator run. Recursive algorithms receive it as an explicit
//! `&mut Recorder` argument.

use algoviz_core::{Algorithm, Metrics, Step, StepState, Trace};

/// Append-only step buffer plus the live metrics of one run.
#[derive(Debug)]
pub struct Recorder<M> {
    algorithm: Algorithm,
    steps: Vec<Step>,
    /// Running counters, copied into every recorded step.
    pub metrics: M,
}

impl<M> Recorder<M>
where
    M: Copy + Default + Into<Metrics>,
{
    pub fn new(algorithm: Algorithm) -> Self {
        Recorder {
            algorithm,
            steps: Vec::new(),
            metrics: M::default(),
        }
    }

    /// Appends a step owning `state` and a copy of the current metrics.
    pub fn record(&mut self, state: StepState, message: impl Into<String>) {
        self.steps.push(Step {
            state,
            message: message.into(),
            metrics: self.metrics.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seals the recording into an immutable trace.
    pub fn finish(self) -> Trace {
        tracing::debug!(
            algorithm = %self.algorithm,
            steps = self.steps.len(),
            "trace recorded"
        );
        Trace::new(self.algorithm, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{ArrayMetrics, ArrayState, SortAlgorithm};

    #[test]
    fn record_copies_current_metrics() {
        let mut rec: Recorder<ArrayMetrics> = Recorder::new(Algorithm::Sort(SortAlgorithm::Bubble));
        rec.record(StepState::Array(ArrayState::new(vec![1])), "first");
        rec.metrics.comparisons += 1;
        rec.record(StepState::Array(ArrayState::new(vec![1])), "second");

        let trace = rec.finish();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.steps[0].metrics.as_array().unwrap().comparisons, 0);
        assert_eq!(trace.steps[1].metrics.as_array().unwrap().comparisons, 1);
    }
}
