use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::athlete::EventGroup;
use crate::error::{Result, RosterError};

/// A competition mark: a time, a distance or a combined-events score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub kind: MarkKind,
    pub value: f64, // seconds, meters or points
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    Time,
    Distance,
    Points,
}

struct MarkPatterns {
    hours_minutes_seconds: Regex,
    minutes_seconds: Regex,
    distance: Regex,
    points: Regex,
    bare_number: Regex,
}

fn patterns() -> &'static MarkPatterns {
    static PATTERNS: OnceLock<MarkPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MarkPatterns {
        hours_minutes_seconds: Regex::new(r"^(\d+):(\d{2}):(\d{2}(?:\.\d+)?)$")
            .expect("valid h:mm:ss pattern"),
        minutes_seconds: Regex::new(r"^(\d+):(\d{2}(?:\.\d+)?)$").expect("valid m:ss pattern"),
        distance: Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*m$").expect("valid distance pattern"),
        points: Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(?:pts|points)$").expect("valid points pattern"),
        bare_number: Regex::new(r"^(\d+(?:\.\d+)?)$").expect("valid number pattern"),
    })
}

impl Mark {
    pub fn time(seconds: f64) -> Self {
        Self {
            kind: MarkKind::Time,
            value: seconds,
        }
    }

    pub fn distance(meters: f64) -> Self {
        Self {
            kind: MarkKind::Distance,
            value: meters,
        }
    }

    pub fn points(points: f64) -> Self {
        Self {
            kind: MarkKind::Points,
            value: points,
        }
    }

    /// Parse a mark as written on a results sheet. Bare numbers are read
    /// according to the event group: meters for jumps and throws, points
    /// for multi-events, seconds otherwise.
    pub fn parse(text: &str, event_group: EventGroup) -> Result<Self> {
        let text = text.trim();
        let p = patterns();

        let mark = if let Some(caps) = p.hours_minutes_seconds.captures(text) {
            let hours = parse_number(&caps[1], text)?;
            let minutes = parse_number(&caps[2], text)?;
            let seconds = parse_number(&caps[3], text)?;
            if minutes >= 60.0 || seconds >= 60.0 {
                return Err(RosterError::InvalidMark(text.to_string()));
            }
            Mark::time(hours * 3600.0 + minutes * 60.0 + seconds)
        } else if let Some(caps) = p.minutes_seconds.captures(text) {
            let minutes = parse_number(&caps[1], text)?;
            let seconds = parse_number(&caps[2], text)?;
            if seconds >= 60.0 {
                return Err(RosterError::InvalidMark(text.to_string()));
            }
            Mark::time(minutes * 60.0 + seconds)
        } else if let Some(caps) = p.distance.captures(text) {
            Mark::distance(parse_number(&caps[1], text)?)
        } else if let Some(caps) = p.points.captures(text) {
            Mark::points(parse_number(&caps[1], text)?)
        } else if let Some(caps) = p.bare_number.captures(text) {
            let value = parse_number(&caps[1], text)?;
            match event_group {
                EventGroup::Jumps | EventGroup::Throws => Mark::distance(value),
                EventGroup::MultiEvents => Mark::points(value),
                _ => Mark::time(value),
            }
        } else {
            return Err(RosterError::InvalidMark(text.to_string()));
        };

        if mark.value <= 0.0 {
            return Err(RosterError::InvalidMark(text.to_string()));
        }

        Ok(mark)
    }

    /// Times improve downwards, distances and points upwards
    pub fn is_lower_better(&self) -> bool {
        self.kind == MarkKind::Time
    }

    /// The mark after improving by `fraction` (0.02 = two percent)
    pub fn improved_by(&self, fraction: f64) -> Self {
        let value = if self.is_lower_better() {
            self.value * (1.0 - fraction)
        } else {
            self.value * (1.0 + fraction)
        };
        Self {
            kind: self.kind,
            value,
        }
    }

    /// Whether this mark beats `other` of the same kind
    pub fn is_better_than(&self, other: &Mark) -> bool {
        if self.is_lower_better() {
            self.value < other.value
        } else {
            self.value > other.value
        }
    }

    /// Storage form: parses back to the same kind for any event group and
    /// keeps up to six decimals. Times always carry a minutes field.
    pub fn to_record(&self) -> String {
        match self.kind {
            MarkKind::Time => {
                let micros = (self.value * 1e6).round() as u64;
                let whole = micros / 1_000_000;
                let fraction = trim_fraction(&format!("{:06}", micros % 1_000_000), 2);
                let hours = whole / 3600;
                let minutes = (whole / 60) % 60;
                let seconds = whole % 60;

                if hours > 0 {
                    format!("{}:{:02}:{:02}.{}", hours, minutes, seconds, fraction)
                } else {
                    format!("{}:{:02}.{}", minutes, seconds, fraction)
                }
            }
            MarkKind::Distance => format!("{}m", precise(self.value, 2)),
            MarkKind::Points => format!("{} pts", precise(self.value, 0)),
        }
    }
}

/// `value` with six decimals, trailing zeros dropped down to `min_decimals`
fn precise(value: f64, min_decimals: usize) -> String {
    let text = format!("{:.6}", value);
    let (int, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = trim_fraction(fraction, min_decimals);
    if fraction.is_empty() {
        int.to_string()
    } else {
        format!("{}.{}", int, fraction)
    }
}

fn trim_fraction(fraction: &str, min_digits: usize) -> String {
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.len() >= min_digits {
        trimmed.to_string()
    } else {
        fraction[..min_digits.min(fraction.len())].to_string()
    }
}

fn parse_number(raw: &str, text: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| RosterError::InvalidMark(text.to_string()))
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            MarkKind::Time => {
                let hundredths = (self.value * 100.0).round() as u64;
                let hours = hundredths / 360_000;
                let minutes = (hundredths / 6_000) % 60;
                let seconds = (hundredths / 100) % 60;
                let fraction = hundredths % 100;

                if hours > 0 {
                    write!(f, "{}:{:02}:{:02}.{:02}", hours, minutes, seconds, fraction)
                } else if minutes > 0 {
                    write!(f, "{}:{:02}.{:02}", minutes, seconds, fraction)
                } else {
                    write!(f, "{}.{:02}", seconds, fraction)
                }
            }
            MarkKind::Distance => write!(f, "{:.2}m", self.value),
            MarkKind::Points => write!(f, "{:.0} pts", self.value),
        }
    }
}
