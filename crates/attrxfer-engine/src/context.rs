//! Inputs, outputs and diagnostics of one execution.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use attrxfer_core::Data;

/// A collection flowing through a pin.
#[derive(Debug, Clone)]
pub struct TaggedData {
    pub data: Arc<Data>,
    pub pin: String,
    pub tags: BTreeSet<String>,
}

impl TaggedData {
    pub fn new(pin: impl Into<String>, data: impl Into<Arc<Data>>) -> Self {
        Self {
            data: data.into(),
            pin: pin.into(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// True when both refer to the same collection instance.
    pub fn same_data(&self, other: &TaggedData) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A message reported by an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// State of one element execution.
///
/// # Examples
///
/// ```
/// use attrxfer_core::{Data, PointData};
/// use attrxfer_engine::ExecutionContext;
///
/// let context = ExecutionContext::new()
///     .with_input("Source", Data::Point(PointData::default()))
///     .with_input("Target", Data::Point(PointData::default()));
///
/// assert_eq!(context.inputs_by_pin("Source").len(), 1);
/// assert!(context.outputs().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ExecutionContext {
    inputs: Vec<TaggedData>,
    outputs: Vec<TaggedData>,
    diagnostics: Vec<Diagnostic>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, pin: impl Into<String>, data: impl Into<Arc<Data>>) -> Self {
        self.add_input(TaggedData::new(pin, data));
        self
    }

    pub fn add_input(&mut self, input: TaggedData) {
        self.inputs.push(input);
    }

    pub fn inputs(&self) -> &[TaggedData] {
        &self.inputs
    }

    /// Inputs connected to `pin`, in insertion order.
    pub fn inputs_by_pin(&self, pin: &str) -> Vec<&TaggedData> {
        self.inputs.iter().filter(|input| input.pin == pin).collect()
    }

    pub fn outputs(&self) -> &[TaggedData] {
        &self.outputs
    }

    pub fn push_output(&mut self, output: TaggedData) {
        self.outputs.push(output);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn report(&mut self, severity: Severity, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.into(),
        });
    }

    /// True if any diagnostic of error severity was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }
}
