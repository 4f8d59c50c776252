//! Clip sampling.
//!
//! Model:
//! - Keyframes are ordered by strictly increasing time (enforced by `AnimationClip`).
//! - The bracketing pair for `t` is the first `i` with `k[i].time <= t <= k[i+1].time`.
//! - Channels are blended linearly: `ini + f * (fin - ini)`.
//! - Times outside the keyed range follow the clip's `Extrapolation`.

use log::debug;

use crate::data::{AnimationClip, Extrapolation, Keyframe};

/// Bracketing keyframe pair and the interpolation fraction within it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub left: usize,
    pub right: usize,
    pub fraction: f32,
}

/// Channel values of a clip at one time.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipSample {
    /// Time actually sampled (after extrapolation).
    pub time: f32,
    /// `None` when a single keyframe was used as-is.
    pub segment: Option<Segment>,
    pub values: Vec<[f32; 2]>,
}

/// Find the first keyframe pair containing `t`. Scans in order and stops at
/// the first match, so a time equal to an interior keyframe resolves to the
/// segment on its left (with fraction 1).
pub fn find_segment(keyframes: &[Keyframe], t: f32) -> Option<Segment> {
    keyframes.windows(2).enumerate().find_map(|(i, pair)| {
        let (t0, t1) = (pair[0].time, pair[1].time);
        if t0 <= t && t <= t1 {
            Some(Segment {
                left: i,
                right: i + 1,
                fraction: (t - t0) / (t1 - t0),
            })
        } else {
            None
        }
    })
}

/// Linear blend of one channel. Fractions of 0 and 1 return `a` and `b`
/// untouched so that every keyframe time reproduces its keyframe exactly.
#[inline]
pub fn lerp_channel(a: [f32; 2], b: [f32; 2], f: f32) -> [f32; 2] {
    if f <= 0.0 {
        return a;
    }
    if f >= 1.0 {
        return b;
    }
    [a[0] + f * (b[0] - a[0]), a[1] + f * (b[1] - a[1])]
}

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Reflect t into [0, span] with ping-pong behavior, where period = 2 * span.
fn ping_pong(t: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    let period = 2.0 * span;
    let m = fmod(t, period);
    if m <= span {
        m
    } else {
        period - m
    }
}

/// Map a query time into the keyed range according to `mode`.
/// `None` means the clip leaves the skeleton untouched at this time.
pub fn extrapolate(mode: Extrapolation, first: f32, last: f32, t: f32) -> Option<f32> {
    if t >= first && t <= last {
        return Some(t);
    }
    let span = last - first;
    match mode {
        Extrapolation::None => None,
        Extrapolation::Hold => Some(t.clamp(first, last)),
        Extrapolation::Loop => Some(first + fmod(t - first, span)),
        Extrapolation::PingPong => Some(first + ping_pong(t - first, span)),
    }
}

/// Sample every channel of `clip` at time `t`.
///
/// Returns `None` when the clip has no keyframes, when `t` is not finite, or
/// when `t` falls outside the keyed range under `Extrapolation::None`. A clip
/// with a single keyframe has no bracketing pair: it is only applied (as-is)
/// by the extrapolating modes.
pub fn sample_clip(clip: &AnimationClip, t: f32) -> Option<ClipSample> {
    if !t.is_finite() {
        debug!("clip '{}': non-finite sample time {t}", clip.name());
        return None;
    }
    let keyframes = clip.keyframes();
    let (first, last) = clip.time_range()?;

    if keyframes.len() == 1 {
        if clip.extrapolation() == Extrapolation::None {
            return None;
        }
        return Some(ClipSample {
            time: first,
            segment: None,
            values: keyframes[0].channels.clone(),
        });
    }

    let Some(u) = extrapolate(clip.extrapolation(), first, last, t) else {
        debug!(
            "clip '{}': t={t} outside [{first}, {last}], no update",
            clip.name()
        );
        return None;
    };
    let segment = find_segment(keyframes, u)?;
    let ini = &keyframes[segment.left].channels;
    let fin = &keyframes[segment.right].channels;
    let values = ini
        .iter()
        .zip(fin.iter())
        .map(|(a, b)| lerp_channel(*a, *b, segment.fraction))
        .collect();

    Some(ClipSample {
        time: u,
        segment: Some(segment),
        values,
    })
}
