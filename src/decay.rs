/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f32) -> f32;
}

// TODO: better error types
fn validate(rate: f32, vi: f32, vf: f32) -> Result<(), String> {
    if !(rate > 0.0 && rate < 1.0) {
        return Err(String::from("`rate` must be in the open interval (0, 1)"));
    }
    (vi > vf)
        .then_some(())
        .ok_or_else(|| String::from("`vi` must be greater than `vf`"))
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f32) -> f32 {
        self.value
    }
}

/// v(t) = max(v<sub>i</sub> * r<sup>t</sup>, v<sub>f</sub>)
///
/// Evaluated at integer `t` this matches multiplying by `r` once per step and
/// clamping at `vf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometric {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Geometric {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self, String> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Default for Geometric {
    /// Start at `1.0`, shrink by `0.995` per step, never below `0.01`
    fn default() -> Self {
        Self {
            rate: 0.995,
            vi: 1.0,
            vf: 0.01,
        }
    }
}

impl Decay for Geometric {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { rate, vi, vf } = self;
        (vi * rate.powf(t)).max(vf)
    }
}
