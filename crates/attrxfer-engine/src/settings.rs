//! Copy request settings and pin descriptions.

use attrxfer_config::{ConfigError, CopyAttributeConfig, PinConfig, UnmatchedPolicy, DEFAULT_CHUNK_SIZE};
use attrxfer_core::{AttributeSelector, DataType};

/// Node name used as the task name prefix.
pub const NODE_NAME: &str = "CopyAttribute";

/// Labels of the source, target and output pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinLabels {
    pub source: String,
    pub target: String,
    pub output: String,
}

impl Default for PinLabels {
    fn default() -> Self {
        Self::from(PinConfig::default())
    }
}

impl From<PinConfig> for PinLabels {
    fn from(pins: PinConfig) -> Self {
        Self {
            source: pins.source,
            target: pins.target,
            output: pins.output,
        }
    }
}

/// Description of one pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinProperties {
    pub label: String,
    /// Widest data type the pin accepts.
    pub allowed_types: DataType,
    pub allow_multiple_connections: bool,
}

impl PinProperties {
    fn new(label: &str, allowed_types: DataType, allow_multiple_connections: bool) -> Self {
        Self {
            label: label.to_string(),
            allowed_types,
            allow_multiple_connections,
        }
    }
}

/// Settings of one copy request.
///
/// # Examples
///
/// ```
/// use attrxfer_core::AttributeSelector;
/// use attrxfer_engine::CopyAttributeSettings;
///
/// let settings = CopyAttributeSettings::new(
///     AttributeSelector::attribute("height"),
///     AttributeSelector::attribute("elevation"),
/// );
/// assert_eq!(settings.task_name(), "CopyAttribute height to elevation");
/// assert!(!settings.match_by_attribute);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CopyAttributeSettings {
    pub source: AttributeSelector,
    pub target: AttributeSelector,
    pub match_by_attribute: bool,
    pub source_match: AttributeSelector,
    pub target_match: AttributeSelector,
    pub unmatched: UnmatchedPolicy,
    /// Records per batch in the generic transfer loop. Zero is treated as one.
    pub chunk_size: usize,
    pub pins: PinLabels,
}

impl Default for CopyAttributeSettings {
    fn default() -> Self {
        Self::new(AttributeSelector::last(), AttributeSelector::source())
    }
}

impl CopyAttributeSettings {
    /// Positional copy from `source` into `target`.
    pub fn new(source: AttributeSelector, target: AttributeSelector) -> Self {
        Self {
            source,
            target,
            match_by_attribute: false,
            source_match: AttributeSelector::last(),
            target_match: AttributeSelector::last(),
            unmatched: UnmatchedPolicy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            pins: PinLabels::default(),
        }
    }

    /// Builds settings from a parsed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a selector does not parse or the
    /// chunk size is zero.
    pub fn from_config(config: &CopyAttributeConfig) -> Result<Self, ConfigError> {
        let selectors = config.selectors()?;
        Ok(Self {
            source: selectors.source,
            target: selectors.target,
            match_by_attribute: config.match_by_attribute,
            source_match: selectors.source_match,
            target_match: selectors.target_match,
            unmatched: config.unmatched,
            chunk_size: config.chunk_size,
            pins: PinLabels::from(config.pins.clone()),
        })
    }

    /// Pairs records whose `source_match` and `target_match` values are equal.
    pub fn with_match(mut self, source_match: AttributeSelector, target_match: AttributeSelector) -> Self {
        self.match_by_attribute = true;
        self.source_match = source_match;
        self.target_match = target_match;
        self
    }

    pub fn with_unmatched(mut self, unmatched: UnmatchedPolicy) -> Self {
        self.unmatched = unmatched;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_pins(mut self, pins: PinLabels) -> Self {
        self.pins = pins;
        self
    }

    /// "CopyAttribute A to B", or "CopyAttribute A" when the target names
    /// the same field or nothing.
    pub fn task_name(&self) -> String {
        let source = self.source.name();
        let target = self.target.name();
        if source != target && !target.is_empty() {
            format!("{NODE_NAME} {source} to {target}")
        } else {
            format!("{NODE_NAME} {source}")
        }
    }

    /// Target then source, each accepting one spatial collection.
    pub fn input_pin_properties(&self) -> Vec<PinProperties> {
        vec![
            PinProperties::new(&self.pins.target, DataType::Spatial, false),
            PinProperties::new(&self.pins.source, DataType::Spatial, false),
        ]
    }

    pub fn output_pin_properties(&self) -> Vec<PinProperties> {
        vec![PinProperties::new(&self.pins.output, DataType::Spatial, true)]
    }

    /// Every pin narrows to the same type: points if either input is fed
    /// points, spatial otherwise.
    pub fn current_pin_types(
        &self,
        source_edges: Option<DataType>,
        target_edges: Option<DataType>,
    ) -> DataType {
        let any_point = [source_edges, target_edges]
            .into_iter()
            .flatten()
            .any(|data_type| data_type.is_point());
        if any_point {
            DataType::Point
        } else {
            DataType::Spatial
        }
    }
}

impl TryFrom<&CopyAttributeConfig> for CopyAttributeSettings {
    type Error = ConfigError;

    fn try_from(config: &CopyAttributeConfig) -> Result<Self, Self::Error> {
        Self::from_config(config)
    }
}
