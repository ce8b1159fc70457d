//! Widget configuration and the nine circle attributes.
//!
//! [`GraphConfig`] holds host-side settings (window, stroke policy, timings).
//! Per-circle colors and angles come from an [`AttributeSource`], usually an
//! [`Attributes`] map loaded from YAML:
//!
//! ```yaml
//! circle1Color: "#ff3f51b5"
//! circle1InitialAngle: -90
//! circle1EndAngle: 270
//! circle2Color: "#e91e63"
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use bon::Builder;
use serde::Deserialize;

use crate::animation::Easing;
use crate::canvas::Color;
use crate::error::{AttributeError, Result};
use crate::widget::Circle;

// ============================================================================
// GRAPH CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct GraphConfig {
    // Window configuration
    #[builder(default = "Circle Graph".to_string())]
    pub title: String,
    #[builder(default = 400)]
    pub window_width: usize,
    #[builder(default = 400)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default = true)]
    pub resizable: bool,

    // Stroke configuration
    #[builder(default = 0.065)]
    pub stroke_width_ratio: f64,
    #[builder(default = [0.0, 0.01, 0.02])]
    pub stroke_decrements: [f64; 3],

    // Startup animation, one duration per circle
    #[builder(default = [
        Duration::from_millis(2000),
        Duration::from_millis(3000),
        Duration::from_millis(4000),
    ])]
    pub durations: [Duration; 3],
    #[builder(default)]
    pub easing: Easing,

    // Colors
    #[builder(default = Color::from_argb(0x3c00_0000))]
    pub track_color: Color,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Attribute names for one circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeNames {
    pub color: &'static str,
    pub initial_angle: &'static str,
    pub end_angle: &'static str,
}

pub static ATTRIBUTE_NAMES: [AttributeNames; 3] = [
    AttributeNames {
        color: "circle1Color",
        initial_angle: "circle1InitialAngle",
        end_angle: "circle1EndAngle",
    },
    AttributeNames {
        color: "circle2Color",
        initial_angle: "circle2InitialAngle",
        end_angle: "circle2EndAngle",
    },
    AttributeNames {
        color: "circle3Color",
        initial_angle: "circle3InitialAngle",
        end_angle: "circle3EndAngle",
    },
];

impl AttributeNames {
    pub fn for_circle(circle: Circle) -> &'static AttributeNames {
        &ATTRIBUTE_NAMES[circle.index()]
    }
}

/// Source of declarative widget attributes.
///
/// `Ok(None)` means the attribute is unset; `Err` means it is set but
/// unreadable.
pub trait AttributeSource {
    fn color(&self, name: &str) -> Result<Option<Color>>;
    fn float(&self, name: &str) -> Result<Option<f64>>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Color> for AttributeValue {
    fn from(color: Color) -> Self {
        AttributeValue::Text(format!("#{:08x}", color.as_argb()))
    }
}

/// Name to value map of attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: HashMap<String, AttributeValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Loads attributes from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses attributes from a YAML mapping. An empty document has no attributes.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        let values: HashMap<String, AttributeValue> =
            serde_yaml_ng::from_str(yaml).map_err(|e| AttributeError::Parse {
                line: e.location().map(|l| l.line()).unwrap_or(0),
                message: e.to_string(),
            })?;
        Ok(Self { values })
    }
}

impl AttributeSource for Attributes {
    fn color(&self, name: &str) -> Result<Option<Color>> {
        let invalid = |value: String| AttributeError::InvalidColor {
            name: name.to_string(),
            value,
        };
        match self.values.get(name) {
            None => Ok(None),
            Some(AttributeValue::Text(text)) => Color::parse_hex(text)
                .map(Some)
                .ok_or_else(|| invalid(text.clone())),
            Some(AttributeValue::Number(n)) => {
                if n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(n) {
                    Ok(Some(Color::from_argb(*n as u32)))
                } else {
                    Err(invalid(n.to_string()))
                }
            }
        }
    }

    fn float(&self, name: &str) -> Result<Option<f64>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(AttributeValue::Number(n)) => Ok(Some(*n)),
            Some(AttributeValue::Text(text)) => {
                text.trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| AttributeError::TypeMismatch {
                        name: name.to_string(),
                        expected: "number",
                    })
            }
        }
    }
}
