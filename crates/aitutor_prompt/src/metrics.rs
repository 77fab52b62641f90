//! Metrics for prompt invocations.
//!
//! Available with the `metrics` feature.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};

/// Counters recorded once per completed invocation.
#[derive(Clone)]
pub struct PromptMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Invocations by template and outcome
    pub invocations: Counter<u64>,
    /// Invocation duration in seconds
    pub duration: Histogram<f64>,
}

impl PromptMetrics {
    /// Create new prompt metrics from the global meter provider.
    pub fn new() -> Self {
        Self::from_meter(global::meter("aitutor_prompt"))
    }

    /// Create prompt metrics on a specific meter.
    pub fn from_meter(meter: Meter) -> Self {
        let invocations = meter
            .u64_counter("prompt_invocations")
            .with_description("Prompt invocations by template and outcome")
            .build();

        let duration = meter
            .f64_histogram("prompt_duration")
            .with_unit("seconds")
            .with_description("Prompt invocation duration")
            .build();

        Self {
            _meter: meter,
            invocations,
            duration,
        }
    }

    /// Record one completed invocation.
    pub fn record(&self, template: &str, outcome: &str, duration_secs: f64) {
        let labels = [
            KeyValue::new("template", template.to_string()),
            KeyValue::new("outcome", outcome.to_string()),
        ];
        self.invocations.add(1, &labels);
        self.duration.record(duration_secs, &labels);
    }
}

impl Default for PromptMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PromptMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptMetrics").finish_non_exhaustive()
    }
}
