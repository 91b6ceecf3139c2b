//! Scenario documents
//!
//! A scenario is a YAML or JSON document describing the engine
//! configuration, how many ticks to run, and a time-ordered list of host
//! and telemetry events:
//!
//! ```yaml
//! ticks: 5
//! output_limit: 200
//! events:
//!   - { at: 0, kind: create_effect, effect_type: 1 }
//!   - { at: 0, kind: output, report: "01 01 01 FF FF 00 00 00 00 FF FF 01 00 00 00 00 00 00" }
//!   - { at: 0, kind: output, report: "05 01 2C 01" }
//!   - { at: 0, kind: output, report: "0A 01 01 00" }
//!   - { at: 3, kind: buttons, mask: 1 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pidffb_engine::EngineConfig;
use pidffb_errors::{PidffbError, ValidationError};

use crate::error::SimError;

/// Raw report bytes, written as whitespace-separated hex pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexReport(pub Vec<u8>);

impl HexReport {
    pub fn parse(text: &str) -> pidffb_errors::Result<Self> {
        text.split_whitespace()
            .map(|token| {
                let digits = token
                    .strip_prefix("0x")
                    .or_else(|| token.strip_prefix("0X"))
                    .unwrap_or(token);
                u8::from_str_radix(digits, 16)
                    .map_err(|error| {
                        PidffbError::scenario(format!("invalid report byte {token} ({error})"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(HexReport)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<String> for HexReport {
    type Error = PidffbError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<HexReport> for String {
    fn from(report: HexReport) -> Self {
        report
            .0
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Something that happens to the device at a given millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// Host output report.
    Output { report: HexReport },
    /// Create New Effect feature request.
    CreateEffect { effect_type: u8 },
    /// Position sample; velocity and acceleration are differentiated.
    Position { x: i32, y: i32 },
    /// Externally computed metrics.
    Metrics {
        position: [i32; 2],
        #[serde(default)]
        velocity: [i32; 2],
        #[serde(default)]
        acceleration: [i32; 2],
    },
    /// Pressed button mask, bit 0 is button 1.
    Buttons { mask: u32 },
    /// Host reads a feature report (6 block load, 7 pool).
    ReadFeature { report_id: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since the start of the run.
    pub at: u64,
    #[serde(flatten)]
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Symmetric clamp applied to the engine output.
    #[serde(default)]
    pub output_limit: Option<i32>,
    pub ticks: u64,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl Scenario {
    /// Load a scenario, choosing JSON for `.json` files and YAML otherwise.
    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let scenario = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_yaml(&text)?
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_yaml(text: &str) -> Result<Self, SimError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.engine.validate()?;

        if let Some(limit) = self.output_limit
            && limit <= 0
        {
            return Err(ValidationError::out_of_range("output_limit", limit, 1, i32::MAX).into());
        }

        let ordered = self.events.windows(2).all(|pair| match pair {
            [a, b] => a.at <= b.at,
            _ => true,
        });
        if !ordered {
            return Err(PidffbError::scenario("events must be ordered by `at`").into());
        }
        Ok(())
    }
}
