use std::time::Duration;

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for glam::Vec3 {
    #[inline]
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from.lerp(to, t)
    }
}

/// Timing curve applied to the normalized tween progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// Smooth ease-in/ease-out (camera moves).
    SmoothInOut,
    /// Overshoots past the end value and settles back (marker pop).
    BackOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothInOut => t * t * (3.0 - 2.0 * t),
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
        }
    }
}

/// A time-bounded interpolation from a start to an end value.
///
/// The tween carries no callback; the owner polls [`Tween::finished`]
/// after stepping, so abandoning a tween (dropping it) is the whole
/// cancellation story and a cancelled tween can never "fire".
#[derive(Clone, Debug)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `dt` and return the current value. A zero-duration
    /// tween completes on the first step.
    pub fn step(&mut self, dt: Duration) -> T {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> T {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        T::lerp(self.from, self.to, self.easing.apply(t))
    }

    pub fn end_value(&self) -> T {
        self.to
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
