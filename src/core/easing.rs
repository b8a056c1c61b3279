use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Mapping from linear scroll progress to perceived motion progress.
///
/// Every curve maps `t <= 0` to `0` and `t >= 1` to `1`; the spring may
/// overshoot slightly in between when underdamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// Cubic ease-out.
    Cubic,
    /// Quintic ease-out.
    Quintic,
    /// Damped spring step response. `frequency` is the period of the
    /// undamped oscillation in progress units, so `omega = 2π / frequency`.
    Spring { damping_ratio: f64, frequency: f64 },
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        // NaN falls through to 0
        if !(t > 0.0) {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::Cubic => 1.0 - (1.0 - t).powi(3),
            Easing::Quintic => 1.0 - (1.0 - t).powi(5),
            Easing::Spring {
                damping_ratio,
                frequency,
            } => spring_response(t, damping_ratio, frequency),
        }
    }
}

/// Closed-form unit step response of a damped harmonic oscillator.
pub fn spring_response(t: f64, damping_ratio: f64, frequency: f64) -> f64 {
    let omega = TAU / frequency.max(f64::EPSILON);
    let zeta = damping_ratio.max(0.0);

    if zeta < 1.0 {
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((wd * t).cos() + (zeta * omega / wd) * (wd * t).sin())
    } else if zeta - 1.0 < 1e-6 {
        // critically damped; the two overdamped roots coincide
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 + (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r1 - r2)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EasingParseError {
    #[error("unknown easing curve `{0}`")]
    UnknownCurve(String),
    #[error("spring parameters must be `spring(damping, frequency)`, got `{0}`")]
    SpringArgs(String),
    #[error("spring frequency must be positive, got {0}")]
    SpringFrequency(f64),
    #[error("spring({damping_ratio}, {frequency}) has not settled by the end of the scroll")]
    SpringUnsettled { damping_ratio: f64, frequency: f64 },
}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "linear" => return Ok(Easing::Linear),
            "cubic" | "ease-out-cubic" => return Ok(Easing::Cubic),
            "quintic" | "ease-out-quint" => return Ok(Easing::Quintic),
            "spring" => {
                return Ok(Easing::Spring {
                    damping_ratio: super::constants::SPRING_DAMPING_RATIO,
                    frequency: super::constants::SPRING_FREQUENCY,
                })
            }
            _ => {}
        }

        let args = s
            .strip_prefix("spring(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| EasingParseError::UnknownCurve(s.clone()))?;
        let mut parts = args.split(',').map(|p| p.trim().parse::<f64>());
        let (Some(Ok(damping_ratio)), Some(Ok(frequency)), None) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(EasingParseError::SpringArgs(s.clone()));
        };
        if !(frequency > 0.0) {
            return Err(EasingParseError::SpringFrequency(frequency));
        }
        // The curve snaps to 1 at t = 1; a spring still moving there would jump.
        let end = spring_response(1.0, damping_ratio, frequency);
        if !((end - 1.0).abs() <= super::constants::SPRING_SETTLE_TOLERANCE) {
            return Err(EasingParseError::SpringUnsettled {
                damping_ratio,
                frequency,
            });
        }
        Ok(Easing::Spring {
            damping_ratio,
            frequency,
        })
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Cubic => f.write_str("cubic"),
            Easing::Quintic => f.write_str("quintic"),
            Easing::Spring {
                damping_ratio,
                frequency,
            } => write!(f, "spring({damping_ratio}, {frequency})"),
        }
    }
}
