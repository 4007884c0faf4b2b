// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Travelling-wave ramp encoding.
//!
//! Each consecutive pair of ramp points becomes two 32-bit packed
//! register words. The destination registers are float-typed hardware
//! slots that pack two 16-bit sub-fields, so each word is built by
//! concatenating the field's 4 hex digits with the tick delta's 4 hex
//! digits and reinterpreting the 4 bytes big-endian as an IEEE-754
//! single:
//!
//! ```text
//! delta_ticks    = (t_next - t_prev) * 10          // 16-bit field
//! freq_field     = floor(1e8 / (32 * f_next))      // 16-bit field
//! amp_field      = floor(a_next / 100 * 4095)      // 16-bit field
//! frequency_word = f32::from_bits(freq_field << 16 | delta_ticks)
//! amplitude_word = f32::from_bits(amp_field << 16 | delta_ticks)
//! ```
//!
//! Segment 0 runs from the profile's initial state at t = 0 to the
//! first ramp point. Encoding is exercised for single-path topologies
//! only; dual-path profiles are not yet encoded (a documented gap in
//! the instrument, not something to guess at here).

use crate::error::EncodingError;
use crate::intent::RampProfile;
use crate::schedule::TICKS_PER_MS;

/// One encoded ramp segment: two packed register words.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampWord {
    /// Segment duration in clock ticks.
    pub delta_ticks: u16,
    /// Packed frequency word for the ramp-end frequency register.
    pub frequency_word: f32,
    /// Packed amplitude word for the ramp-end amplitude register.
    pub amplitude_word: f32,
}

/// Encode a ramp profile into packed register words.
///
/// # Errors
///
/// - [`EncodingError::EmptyProfile`] when the profile has no ramp points
/// - [`EncodingError::NonMonotonic`] when ramp times decrease
pub fn encode_profile(profile: &RampProfile) -> Result<Vec<RampWord>, EncodingError> {
    if profile.ramps.is_empty() {
        return Err(EncodingError::EmptyProfile);
    }

    let mut prev_time = 0.0;
    for (index, point) in profile.ramps.iter().enumerate() {
        if point.time < prev_time {
            return Err(EncodingError::NonMonotonic {
                index,
                prev_ms: prev_time,
                time_ms: point.time,
            });
        }
        prev_time = point.time;
    }

    let mut words = Vec::with_capacity(profile.ramps.len());
    let mut prev_time = 0.0;
    for point in &profile.ramps {
        let delta_ticks = pack_u16((point.time - prev_time) * TICKS_PER_MS);
        let freq_field = pack_u16(1e8 / (32.0 * point.state.frequency));
        let amp_field = pack_u16(point.state.amplitude / 100.0 * 4095.0);
        words.push(RampWord {
            delta_ticks,
            frequency_word: pack_word(freq_field, delta_ticks),
            amplitude_word: pack_word(amp_field, delta_ticks),
        });
        prev_time = point.time;
    }
    Ok(words)
}

/// Truncate a field value into its 16-bit register slot.
fn pack_u16(value: f64) -> u16 {
    if !value.is_finite() || value <= 0.0 {
        0
    } else if value >= f64::from(u16::MAX) {
        u16::MAX
    } else {
        value as u16
    }
}

/// Concatenate a 16-bit field with a 16-bit tick delta and reinterpret
/// big-endian as an IEEE-754 single.
fn pack_word(field: u16, delta_ticks: u16) -> f32 {
    f32::from_bits((u32::from(field) << 16) | u32::from(delta_ticks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{RampPoint, WaveState};

    fn profile(points: &[(f64, f64, f64)]) -> RampProfile {
        RampProfile {
            initial_state: WaveState {
                frequency: 100.0,
                amplitude: 50.0,
            },
            ramps: points
                .iter()
                .map(|&(time, frequency, amplitude)| RampPoint {
                    time,
                    state: WaveState {
                        frequency,
                        amplitude,
                    },
                })
                .collect(),
        }
    }

    // =========================================================================
    // Worked example: (0ms, 100Hz, 50%) -> (10ms, 200Hz, 60%)
    // =========================================================================

    #[test]
    fn test_worked_example_delta_ticks() {
        let words = encode_profile(&profile(&[(10.0, 200.0, 60.0)])).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].delta_ticks, 0x0064); // 100 ticks
    }

    #[test]
    fn test_worked_example_frequency_word() {
        let words = encode_profile(&profile(&[(10.0, 200.0, 60.0)])).unwrap();
        // floor(1e8 / (32 * 200)) = 15625 = 0x3D09; packed "3D090064"
        assert_eq!(words[0].frequency_word.to_bits(), 0x3D09_0064);
    }

    #[test]
    fn test_worked_example_amplitude_word() {
        let words = encode_profile(&profile(&[(10.0, 200.0, 60.0)])).unwrap();
        // floor(60 / 100 * 4095) = 2457 = 0x0999; packed "09990064"
        assert_eq!(words[0].amplitude_word.to_bits(), 0x0999_0064);
    }

    // =========================================================================
    // Multi-segment profiles
    // =========================================================================

    #[test]
    fn test_consecutive_segments_use_deltas() {
        let words =
            encode_profile(&profile(&[(10.0, 200.0, 60.0), (25.0, 400.0, 80.0)])).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].delta_ticks, 100);
        assert_eq!(words[1].delta_ticks, 150);
        // floor(1e8 / (32 * 400)) = 7812 = 0x1E84
        assert_eq!(words[1].frequency_word.to_bits(), 0x1E84_0096);
    }

    #[test]
    fn test_full_scale_amplitude() {
        let words = encode_profile(&profile(&[(1.0, 100.0, 100.0)])).unwrap();
        // 100% -> 4095 = 0x0FFF, 10 ticks
        assert_eq!(words[0].amplitude_word.to_bits(), 0x0FFF_000A);
    }

    #[test]
    fn test_simultaneous_points_allowed() {
        // Equal times are non-decreasing: a zero-length segment
        let words =
            encode_profile(&profile(&[(10.0, 200.0, 60.0), (10.0, 300.0, 70.0)])).unwrap();
        assert_eq!(words[1].delta_ticks, 0);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_empty_profile_rejected() {
        let err = encode_profile(&profile(&[])).unwrap_err();
        assert!(matches!(err, EncodingError::EmptyProfile));
    }

    #[test]
    fn test_non_monotonic_rejected() {
        let err =
            encode_profile(&profile(&[(10.0, 200.0, 60.0), (5.0, 300.0, 70.0)])).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::NonMonotonic { index: 1, .. }
        ));
    }

    // =========================================================================
    // Field saturation
    // =========================================================================

    #[test]
    fn test_zero_frequency_packs_zero() {
        let words = encode_profile(&profile(&[(1.0, 0.0, 50.0)])).unwrap();
        assert_eq!(words[0].frequency_word.to_bits() >> 16, 0);
    }

    #[test]
    fn test_low_frequency_saturates_field() {
        // 1e8 / (32 * 0.01) far exceeds 16 bits
        let words = encode_profile(&profile(&[(1.0, 0.01, 50.0)])).unwrap();
        assert_eq!(words[0].frequency_word.to_bits() >> 16, 0xFFFF);
    }
}
