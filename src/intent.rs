// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Experiment intent: the declarative description of one separation cycle.
//!
//! An [`Intent`] captures everything the operator specifies about a cycle:
//! phase durations, voltage setpoints, per-phase travelling-wave parameters,
//! the path topology, and the per-path travelling-wave ramp profiles.
//! Field names match the external JSON intent format exactly.
//!
//! The intent is constructed once per compilation request and is read-only
//! thereafter.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// High-duty-cycle path topology selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HdcPath {
    /// Drive Path A and Path B as a phase-alternating pair.
    Both,
    /// Single-path operation on Path A.
    #[serde(rename = "Path A")]
    PathA,
    /// Single-path operation on Path B.
    #[serde(rename = "Path B")]
    PathB,
}

impl fmt::Display for HdcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HdcPath::Both => write!(f, "Both"),
            HdcPath::PathA => write!(f, "Path A"),
            HdcPath::PathB => write!(f, "Path B"),
        }
    }
}

/// Jughandle path topology selector. Reserved; the builders do not
/// consume it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JhPath {
    Passthrough,
    Around,
    Alternating,
}

/// Travelling-wave frequency/amplitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Amplitude in percent of full scale.
    pub amplitude: f64,
}

/// One point of a travelling-wave ramp profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampPoint {
    /// Time offset from cycle start in milliseconds.
    pub time: f64,
    /// Target wave state at this time.
    pub state: WaveState,
}

/// Per-path travelling-wave ramp profile.
///
/// Times within `ramps` are expected to be non-decreasing; the ramp
/// encoder checks this, intent validation does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampProfile {
    /// Wave state at cycle start (t = 0).
    pub initial_state: WaveState,
    /// Ordered ramp points.
    pub ramps: Vec<RampPoint>,
}

/// Declarative description of one experiment cycle.
///
/// All durations are milliseconds. Field names follow the external
/// intent JSON format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Single-ion-packet separation period.
    #[serde(rename = "sipPeriod")]
    pub sip_period: f64,

    /// Mid-separation stall duration.
    #[serde(rename = "stallDuration")]
    pub stall_duration: f64,

    /// Fill phase duration.
    pub fill: f64,

    /// Release phase duration.
    pub release: f64,

    /// Trap phase duration.
    pub trap: f64,

    /// Guard flush voltage. The sign selects flush polarity; guard
    /// arming uses its magnitude.
    #[serde(rename = "flushVoltage")]
    pub flush_voltage: f64,

    /// Accumulation wave amplitude during fill.
    #[serde(rename = "fillAmp")]
    pub fill_amp: f64,

    /// Accumulation wave frequency during fill.
    #[serde(rename = "fillFrequency")]
    pub fill_frequency: f64,

    /// Accumulation wave amplitude during trap.
    #[serde(rename = "trapAmp")]
    pub trap_amp: f64,

    /// Accumulation wave frequency during trap.
    #[serde(rename = "trapFrequency")]
    pub trap_frequency: f64,

    /// Accumulation wave amplitude during release.
    #[serde(rename = "releaseAmp")]
    pub release_amp: f64,

    /// Accumulation wave frequency during release.
    #[serde(rename = "releaseFrequency")]
    pub release_frequency: f64,

    /// Whether execution should gate on READY handshakes. Carried for
    /// the hardware owner; the builders currently always emit WAIT
    /// placeholders.
    pub wait_for_ready: bool,

    /// Path topology selector.
    #[serde(rename = "HDCpath")]
    pub hdc_path: HdcPath,

    /// Reserved jughandle topology selector.
    #[serde(rename = "JHpath")]
    pub jh_path: JhPath,

    /// Path A travelling-wave ramp profile.
    #[serde(rename = "pathA_traveling_wave_profile")]
    pub path_a_profile: RampProfile,

    /// Path B travelling-wave ramp profile.
    #[serde(rename = "pathB_traveling_wave_profile")]
    pub path_b_profile: RampProfile,
}

impl Intent {
    /// Load an intent record from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let intent: Intent = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid intent file: {}", e)))?;
        Ok(intent)
    }

    /// Validate the intent before compilation.
    ///
    /// Durations must be finite and non-negative and the flush voltage
    /// finite. Ramp monotonicity is deliberately left to the ramp
    /// encoder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`]; no partial table is ever produced
    /// from an invalid intent.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("sipPeriod", self.sip_period),
            ("stallDuration", self.stall_duration),
            ("fill", self.fill),
            ("release", self.release),
            ("trap", self.trap),
        ];
        for (name, value) in durations {
            if !value.is_finite() {
                return Err(Error::Config(format!("{} must be finite, got {}", name, value)));
            }
            if value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        if !self.flush_voltage.is_finite() {
            return Err(Error::Config(format!(
                "flushVoltage must be finite, got {}",
                self.flush_voltage
            )));
        }
        Ok(())
    }

    /// Ramp profile for the selected single path.
    ///
    /// Returns `None` for the dual-path topology, which has no single
    /// selected profile.
    pub fn selected_profile(&self) -> Option<&RampProfile> {
        match self.hdc_path {
            HdcPath::Both => None,
            HdcPath::PathA => Some(&self.path_a_profile),
            HdcPath::PathB => Some(&self.path_b_profile),
        }
    }
}
