//! Tail chain with a propagating wave.
//!
//! The tail is an ordered chain of segments hanging off the rear of the
//! body. Each step the chain is walked root to tip: every segment's target
//! angle is its parent's already-updated angle plus a sine term whose phase
//! is staggered along the chain and whose amplitude tapers toward the tip.
//! Because each segment rides on its parent, the oscillation travels down
//! the chain as a visible wave instead of the segments flapping
//! independently.

use arrayvec::ArrayVec;

use crate::math;

/// Hard cap on chain length; the chain is stored inline.
pub const MAX_TAIL_SEGMENTS: usize = 12;

/// One link of the tail.
#[derive(Clone, Copy, Debug)]
pub struct TailSegment {
    /// Segment length in world units. Always > 0.
    pub length: f32,
    /// Current absolute angle in degrees.
    pub angle: f32,
    /// Wave amplitude in degrees. Non-increasing along the chain.
    pub amplitude: f32,
    /// Phase offset in radians relative to the chain clock.
    pub phase_offset: f32,
}

/// The whole tail: a bounded chain plus shared wave parameters.
#[derive(Clone, Debug)]
pub struct TailChain {
    pub segments: ArrayVec<TailSegment, MAX_TAIL_SEGMENTS>,
    /// Wave frequency in radians per second.
    pub frequency: f32,
    /// Exponential smoothing rate in 1/s.
    pub smoothing: f32,
}

/// Construction parameters for a [`TailChain`].
#[derive(Clone, Copy, Debug)]
pub struct TailParams {
    /// Number of segments. Must be 1..=[`MAX_TAIL_SEGMENTS`].
    pub segments: usize,
    /// Length of the root segment.
    pub segment_length: f32,
    /// Length removed per segment toward the tip. Must be >= 0 and small
    /// enough that every segment keeps a positive length.
    pub length_falloff: f32,
    /// Wave amplitude of the root segment, in degrees.
    pub amplitude: f32,
    /// Amplitude removed per segment toward the tip; >= 0 keeps the taper
    /// monotonic. Amplitudes never go below zero.
    pub amplitude_falloff: f32,
    /// Phase stagger between neighboring segments, in radians.
    pub phase_offset: f32,
    /// Wave frequency in radians per second.
    pub frequency: f32,
    /// Exponential smoothing rate in 1/s.
    pub smoothing: f32,
}

impl Default for TailParams {
    fn default() -> Self {
        TailParams {
            segments: 5,
            segment_length: 15.0,
            length_falloff: 2.0,
            amplitude: 15.0,
            amplitude_falloff: 2.5,
            phase_offset: 0.3,
            frequency: 2.0,
            smoothing: 6.0,
        }
    }
}

impl TailChain {
    /// Build a chain hanging straight back from a body facing
    /// `initial_heading`.
    ///
    /// Fails fast on an empty or over-capacity chain, a segment whose
    /// length would not be positive, a negative amplitude or falloff, or a
    /// non-positive frequency/smoothing rate.
    pub fn new(params: TailParams, initial_heading: f32) -> Result<Self, String> {
        if params.segments == 0 {
            return Err("tail chain must have at least one segment".to_string());
        }
        if params.segments > MAX_TAIL_SEGMENTS {
            return Err(format!(
                "tail chain supports at most {} segments, got {}",
                MAX_TAIL_SEGMENTS, params.segments
            ));
        }
        if params.amplitude < 0.0 || params.amplitude_falloff < 0.0 {
            return Err("tail amplitude and falloff must be non-negative".to_string());
        }
        if params.length_falloff < 0.0 {
            return Err("tail length falloff must be non-negative".to_string());
        }
        if params.frequency <= 0.0 || params.smoothing <= 0.0 {
            return Err("tail frequency and smoothing must be positive".to_string());
        }

        let rest_angle = math::normalize_deg(initial_heading + 180.0);
        let mut segments = ArrayVec::new();
        for i in 0..params.segments {
            let length = params.segment_length - params.length_falloff * i as f32;
            if length <= 0.0 {
                return Err(format!(
                    "tail segment {} would have non-positive length {}",
                    i, length
                ));
            }
            segments.push(TailSegment {
                length,
                angle: rest_angle,
                amplitude: (params.amplitude - params.amplitude_falloff * i as f32).max(0.0),
                phase_offset: params.phase_offset * i as f32,
            });
        }

        Ok(TailChain {
            segments,
            frequency: params.frequency,
            smoothing: params.smoothing,
        })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Advance the wave by `dt` seconds.
    ///
    /// `base_angle` is the angle the root rides on (body heading + 180°);
    /// `clock` is the skeleton's accumulated simulation time driving the
    /// sine. Segments update root to tip so each wave term rides on its
    /// parent's current angle.
    pub fn update(&mut self, base_angle: f32, clock: f32, dt: f32) {
        let mut parent_angle = base_angle;
        for segment in self.segments.iter_mut() {
            let wave = (clock * self.frequency + segment.phase_offset).sin() * segment.amplitude;
            let target = parent_angle + wave;
            segment.angle = math::approach_deg(segment.angle, target, self.smoothing, dt);
            parent_angle = segment.angle;
        }
    }
}
