//! Measured traces as seen by the exporter.
//!
//! Traces are owned by a [`TraceSource`]; the selection matrix only keeps
//! their [`TraceId`] and looks them up again when it needs the samples.

use crate::axis::FrequencyAxis;
use num::complex::Complex64;
use std::fmt;

/// Non-owning handle of a trace inside a [`TraceSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(pub u64);

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One frequency point of a trace. Frequency is in Hz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub frequency: f64,
    pub response: Complex64,
}

impl Sample {
    pub fn new(frequency: f64, response: Complex64) -> Self {
        Sample {
            frequency,
            response,
        }
    }
}

/// Immutable measurement record, sorted by increasing frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    id: TraceId,
    name: String,
    reflection: bool,
    samples: Vec<Sample>,
}

impl Trace {
    pub fn new(id: TraceId, name: &str, reflection: bool, samples: Vec<Sample>) -> Self {
        debug_assert!(
            samples.windows(2).all(|w| w[0].frequency <= w[1].frequency),
            "samples of trace '{}' are not sorted by frequency",
            name
        );
        Trace {
            id,
            name: name.to_string(),
            reflection,
            samples,
        }
    }

    pub fn id(&self) -> TraceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Measured at a single port (S11, S22, ...) rather than between two
    pub fn is_reflection(&self) -> bool {
        self.reflection
    }

    pub fn size(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample_at(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// 0.0 for an empty trace
    pub fn min_freq(&self) -> f64 {
        self.samples.first().map_or(0.0, |s| s.frequency)
    }

    /// 0.0 for an empty trace
    pub fn max_freq(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.frequency)
    }

    pub fn axis(&self) -> FrequencyAxis {
        FrequencyAxis::new(self.size(), self.min_freq(), self.max_freq())
    }
}

/// Read-only provider of the traces available for export.
pub trait TraceSource {
    /// All traces in a stable order
    fn available_traces(&self) -> Vec<&Trace>;

    fn trace(&self, id: TraceId) -> Option<&Trace> {
        self.available_traces().into_iter().find(|t| t.id() == id)
    }
}

/// In-memory trace collection handing out monotonically increasing ids.
#[derive(Clone, Debug, Default)]
pub struct TraceSet {
    traces: Vec<Trace>,
    next_id: u64,
}

impl TraceSet {
    pub fn new() -> Self {
        TraceSet::default()
    }

    pub fn add(&mut self, name: &str, reflection: bool, samples: Vec<Sample>) -> TraceId {
        let id = TraceId(self.next_id);
        self.next_id += 1;
        self.traces.push(Trace::new(id, name, reflection, samples));
        id
    }

    pub fn remove(&mut self, id: TraceId) -> Option<Trace> {
        let pos = self.traces.iter().position(|t| t.id() == id)?;
        Some(self.traces.remove(pos))
    }

    pub fn by_name(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

impl TraceSource for TraceSet {
    fn available_traces(&self) -> Vec<&Trace> {
        self.traces.iter().collect()
    }

    fn trace(&self, id: TraceId) -> Option<&Trace> {
        self.traces.iter().find(|t| t.id() == id)
    }
}

#[cfg(test)]
mod trace_tests {
    use super::*;
    use num::complex::c64;

    fn samples(freqs: &[f64]) -> Vec<Sample> {
        freqs
            .iter()
            .map(|&f| Sample::new(f, c64(f * 1e-9, 0.0)))
            .collect()
    }

    #[test]
    fn test_min_max_freq() {
        let trace = Trace::new(TraceId(0), "S11", true, samples(&[1e9, 2e9, 3e9]));
        assert_eq!(trace.size(), 3);
        assert_eq!(trace.min_freq(), 1e9);
        assert_eq!(trace.max_freq(), 3e9);
        assert_eq!(trace.sample_at(1).unwrap().response, c64(2.0, 0.0));
        assert!(trace.sample_at(3).is_none());
    }

    #[test]
    fn test_empty_trace() {
        let trace = Trace::new(TraceId(0), "empty", false, vec![]);
        assert_eq!(trace.size(), 0);
        assert_eq!(trace.min_freq(), 0.0);
        assert_eq!(trace.max_freq(), 0.0);
        assert_eq!(trace.axis(), FrequencyAxis::new(0, 0.0, 0.0));
    }

    #[test]
    fn test_trace_set() {
        let mut set = TraceSet::new();
        let a = set.add("S11", true, samples(&[1e9]));
        let b = set.add("S21", false, samples(&[1e9]));
        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
        assert_eq!(set.trace(b).unwrap().name(), "S21");
        assert_eq!(set.by_name("S11").unwrap().id(), a);

        let names: Vec<&str> = set.available_traces().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["S11", "S21"]);

        assert!(set.remove(a).is_some());
        assert!(set.trace(a).is_none());
        assert!(set.remove(a).is_none());

        let c = set.add("S12", false, vec![]);
        assert_ne!(c, a);
    }
}
