use super::constants::*;
use super::easing::{Easing, EasingParseError};
use super::scroll::{RevealRamp, Threshold};
use thiserror::Error;

/// Settings that can be overridden per page, read as `data-<key>` attributes.
pub const CONFIG_KEYS: &[&str] = &[
    "scroll-threshold",
    "easing",
    "shrink",
    "pin-embed",
    "reveal-start",
    "reveal-end",
    "panel-stagger",
    "panel-min-scale",
    "release-ms",
    "viewport-poll-ms",
];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Easing(#[from] EasingParseError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub threshold: Threshold,
    pub easing: Easing,
    pub shrink: f64,
    pub pin_embed: bool,
    pub reveal: RevealRamp,
    pub panel_stagger: f64,
    pub panel_min_scale: f64,
    pub panel_pressed_scale: f64,
    pub panel_release_ms: u32,
    /// `None` disables the fallback viewport poll.
    pub viewport_poll_ms: Option<u32>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::ViewportFraction(THRESHOLD_VIEWPORT_FRACTION),
            easing: Easing::Spring {
                damping_ratio: SPRING_DAMPING_RATIO,
                frequency: SPRING_FREQUENCY,
            },
            shrink: TEXT_SHRINK_FACTOR,
            pin_embed: true,
            reveal: RevealRamp {
                start: PANEL_REVEAL_START_PX,
                end: PANEL_REVEAL_END_PX,
            },
            panel_stagger: PANEL_STAGGER,
            panel_min_scale: PANEL_MIN_SCALE,
            panel_pressed_scale: PANEL_PRESSED_SCALE,
            panel_release_ms: PANEL_RELEASE_MS,
            viewport_poll_ms: Some(VIEWPORT_POLL_MS),
        }
    }
}

impl PageConfig {
    /// Build from defaults plus overrides. Bad overrides are reported and
    /// leave the default in place.
    pub fn from_pairs<'a, I>(pairs: I) -> (Self, Vec<ConfigError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        let errors = pairs
            .into_iter()
            .filter_map(|(key, value)| config.apply(key, value).err())
            .collect();
        (config, errors)
    }

    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();
        match key {
            "scroll-threshold" => self.threshold = parse_threshold(value).ok_or_else(invalid)?,
            "easing" => self.easing = value.parse()?,
            "shrink" => self.shrink = parse_unit(value).ok_or_else(invalid)?,
            "pin-embed" => self.pin_embed = parse_flag(value).ok_or_else(invalid)?,
            "reveal-start" => self.reveal.start = parse_px(value).ok_or_else(invalid)?,
            "reveal-end" => self.reveal.end = parse_px(value).ok_or_else(invalid)?,
            "panel-stagger" => self.panel_stagger = parse_unit(value).ok_or_else(invalid)?,
            "panel-min-scale" => self.panel_min_scale = parse_unit(value).ok_or_else(invalid)?,
            "release-ms" => self.panel_release_ms = value.parse().map_err(|_| invalid())?,
            "viewport-poll-ms" => {
                self.viewport_poll_ms = match value {
                    "off" | "none" | "0" => None,
                    v => Some(v.parse().map_err(|_| invalid())?),
                }
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

/// `"1800px"` -> pixels, `"50vh"` -> viewport fraction, bare `"0.5"` -> fraction.
pub fn parse_threshold(s: &str) -> Option<Threshold> {
    let s = s.trim();
    if let Some(px) = s.strip_suffix("px") {
        return parse_px(px).map(Threshold::Pixels);
    }
    if let Some(vh) = s.strip_suffix("vh") {
        return parse_px(vh).map(|v| Threshold::ViewportFraction(v / 100.0));
    }
    parse_px(s).map(Threshold::ViewportFraction)
}

fn parse_px(s: &str) -> Option<f64> {
    let v: f64 = s.trim().trim_end_matches("px").parse().ok()?;
    (v.is_finite() && v >= 0.0).then_some(v)
}

fn parse_unit(s: &str) -> Option<f64> {
    let v: f64 = s.trim().parse().ok()?;
    (0.0..=1.0).contains(&v).then_some(v)
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
