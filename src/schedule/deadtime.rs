// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dead-time balancing between the accumulation and separation cycles.
//!
//! The ion mobility cycle is two physically coupled pipelines:
//!
//! ```text
//! fill + trap + release + accumulation_dead_time
//!     == separation + flush + separation_dead_time
//! ```
//!
//! Exactly one of the two dead times is non-zero for any intent; the
//! non-zero one is added as a pure time offset to whichever pipeline
//! would otherwise start too early, so both complete at the same
//! wall-clock boundary. Only the single-path builder consumes this —
//! the dual-path topology serializes both paths onto one accumulation
//! track and needs no balancing.

use crate::intent::Intent;

/// Fixed guard flush duration in milliseconds.
pub const FLUSH_TIME_MS: f64 = 5.0;

/// Derived dead-time offsets for one intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadTime {
    /// Idle time appended to the separation cycle, milliseconds.
    pub separation_ms: f64,
    /// Idle time prepended to the accumulation cycle, milliseconds.
    pub accumulation_ms: f64,
}

impl DeadTime {
    /// Compute the dead-time offsets for an intent.
    pub fn for_intent(intent: &Intent) -> Self {
        let accum = accumulation_duration_ms(intent);
        let sep = separation_duration_ms(intent);
        Self {
            separation_ms: (accum - sep).max(0.0),
            accumulation_ms: (sep - accum).max(0.0),
        }
    }
}

/// Natural accumulation cycle duration: fill + trap + release.
pub fn accumulation_duration_ms(intent: &Intent) -> f64 {
    intent.fill + intent.trap + intent.release
}

/// Natural separation cycle duration: separation period + flush.
pub fn separation_duration_ms(intent: &Intent) -> f64 {
    intent.sip_period + FLUSH_TIME_MS
}
