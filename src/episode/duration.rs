// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Custom duration formatting, similar to what `strftime` does for instants.
//!
//! A template such as `{D:02}d {H:02}h {M:02}m {S:02}s` names the fields to
//! show. Fields are filled by successive division in descending unit order,
//! but only for the fields the template references: time belonging to a
//! larger unit that is not referenced is absorbed by the largest referenced
//! field. `{H}h {S}s` therefore renders 260000 seconds as `72h 800s`.

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::error::DurationError;

/// Template used for the episode list, e.g. ` 1:02:05`
pub const EPISODE_TEMPLATE: &str = "{H:2}:{M:02}:{S:02}";

/// General purpose template, e.g. `05d 08h 04m 02s`
pub const DEFAULT_TEMPLATE: &str = "{D:02}d {H:02}h {M:02}m {S:02}s";

/// Unit in which a raw duration value is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    /// The value already is an elapsed time in seconds
    Duration,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl DurationUnit {
    /// Number of seconds in one unit
    pub fn seconds(self) -> u64 {
        match self {
            DurationUnit::Duration | DurationUnit::Seconds => 1,
            DurationUnit::Minutes => 60,
            DurationUnit::Hours => 3_600,
            DurationUnit::Days => 86_400,
            DurationUnit::Weeks => 604_800,
        }
    }
}

impl FromStr for DurationUnit {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duration" => Ok(DurationUnit::Duration),
            "s" | "seconds" => Ok(DurationUnit::Seconds),
            "m" | "minutes" => Ok(DurationUnit::Minutes),
            "h" | "hours" => Ok(DurationUnit::Hours),
            "d" | "days" => Ok(DurationUnit::Days),
            "w" | "weeks" => Ok(DurationUnit::Weeks),
            other => Err(DurationError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DurationUnit::Duration => "duration",
            DurationUnit::Seconds => "seconds",
            DurationUnit::Minutes => "minutes",
            DurationUnit::Hours => "hours",
            DurationUnit::Days => "days",
            DurationUnit::Weeks => "weeks",
        };
        f.write_str(name)
    }
}

/// A field that can appear in a duration template
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// All fields, largest unit first
    pub const DESCENDING: [Field; 5] = [
        Field::Weeks,
        Field::Days,
        Field::Hours,
        Field::Minutes,
        Field::Seconds,
    ];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "W" => Some(Field::Weeks),
            "D" => Some(Field::Days),
            "H" => Some(Field::Hours),
            "M" => Some(Field::Minutes),
            "S" => Some(Field::Seconds),
            _ => None,
        }
    }

    /// Number of seconds in one unit of this field
    pub fn seconds(self) -> u64 {
        match self {
            Field::Weeks => 604_800,
            Field::Days => 86_400,
            Field::Hours => 3_600,
            Field::Minutes => 60,
            Field::Seconds => 1,
        }
    }
}

/// One formatting instruction for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Minimum rendered width
    pub width: usize,
    /// Pad with zeros instead of spaces
    pub zero_pad: bool,
}

impl FieldSpec {
    fn render(&self, value: u64, out: &mut String) {
        let width = self.width;
        let rendered = if self.zero_pad {
            format!("{value:0width$}")
        } else {
            format!("{value:>width$}")
        };
        out.push_str(&rendered);
    }
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(FieldSpec),
}

/// A parsed duration template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationTemplate {
    segments: Vec<Segment>,
}

impl DurationTemplate {
    /// Parse a template into literal text and field instructions
    ///
    /// `{{` and `}}` produce literal braces. A field is `{F}` or `{F:spec}`
    /// where `spec` is an optional `0` flag followed by an optional width.
    pub fn parse(template: &str) -> Result<Self, DurationError> {
        let invalid = |reason: &str| DurationError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(invalid("single '}' encountered")),
                '{' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => return Err(invalid("unexpected '{' in field")),
                            Some(c) => body.push(c),
                            None => return Err(invalid("single '{' encountered")),
                        }
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(parse_field(template, &body)?));
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// The parsed segments, in template order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template references the given field
    pub fn references(&self, field: Field) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Field(spec) if spec.field == field))
    }

    /// Render a number of seconds with this template
    pub fn render(&self, total_seconds: u64) -> String {
        let values = self.decompose(total_seconds);

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(spec) => spec.render(values[spec.field as usize], &mut out),
            }
        }
        out
    }

    /// Split seconds into the referenced fields, indexed by `Field as usize`
    fn decompose(&self, total_seconds: u64) -> [u64; 5] {
        let mut values = [0; 5];
        let mut remainder = total_seconds;

        for field in Field::DESCENDING {
            if self.references(field) {
                values[field as usize] = remainder / field.seconds();
                remainder %= field.seconds();
            }
        }

        values
    }
}

fn parse_field(template: &str, body: &str) -> Result<FieldSpec, DurationError> {
    let (name, spec) = match body.split_once(':') {
        Some((name, spec)) => (name, spec),
        None => (body, ""),
    };

    let field = Field::from_name(name).ok_or_else(|| DurationError::UnknownField {
        template: template.to_string(),
        field: name.to_string(),
    })?;

    let (zero_pad, width) = match spec.strip_prefix('0') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };

    let width = if width.is_empty() {
        0
    } else {
        width.parse().map_err(|_| DurationError::InvalidTemplate {
            template: template.to_string(),
            reason: format!("unsupported format spec '{spec}' for field {name}"),
        })?
    };

    Ok(FieldSpec {
        field,
        width,
        zero_pad,
    })
}

/// Format a duration value with a template
///
/// `value` is interpreted in `unit` (see [`DurationUnit`] for the accepted
/// names) and converted to seconds before the template is applied.
pub fn format_duration(value: u64, template: &str, unit: &str) -> Result<String, DurationError> {
    let unit: DurationUnit = unit.parse()?;
    let total_seconds = value
        .checked_mul(unit.seconds())
        .ok_or_else(|| DurationError::Overflow {
            value,
            unit: unit.to_string(),
        })?;

    let template = DurationTemplate::parse(template)?;
    Ok(template.render(total_seconds))
}

/// Format a `TimeDelta` with a template, ignoring sub-second precision
///
/// Negative deltas are rendered as zero.
pub fn format_time_delta(delta: TimeDelta, template: &str) -> Result<String, DurationError> {
    let seconds = u64::try_from(delta.num_seconds()).unwrap_or(0);
    format_duration(seconds, template, "duration")
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Episode template ===

    #[test]
    fn zero_duration_pads_hours_with_space() {
        assert_eq!(
            format_duration(0, EPISODE_TEMPLATE, "duration").unwrap(),
            " 0:00:00"
        );
    }

    #[test]
    fn episode_template_splits_hours_minutes_seconds() {
        assert_eq!(
            format_duration(3725, EPISODE_TEMPLATE, "duration").unwrap(),
            " 1:02:05"
        );
    }

    #[test]
    fn episode_template_does_not_cap_hours() {
        assert_eq!(
            format_duration(100 * 3600 + 59, EPISODE_TEMPLATE, "duration").unwrap(),
            "100:00:59"
        );
    }

    #[test]
    fn episode_template_matches_decomposition() {
        for d in (0..200_000u64).step_by(997) {
            let rendered = format_duration(d, EPISODE_TEMPLATE, "duration").unwrap();
            let parts: Vec<u64> = rendered
                .split(':')
                .map(|p| p.trim().parse().unwrap())
                .collect();

            assert_eq!(parts.len(), 3);
            assert!(parts[1] < 60 && parts[2] < 60);
            assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], d, "for {d}");
        }
    }

    // === Field selection ===

    #[test]
    fn default_template() {
        let seconds = 5 * 86_400 + 8 * 3_600 + 4 * 60 + 2;
        assert_eq!(
            format_duration(seconds, DEFAULT_TEMPLATE, "s").unwrap(),
            "05d 08h 04m 02s"
        );
    }

    #[test]
    fn weeks_and_days_without_padding() {
        let seconds = 4 * 604_800 + 5 * 86_400 + 8 * 3_600 + 4 * 60 + 2;
        assert_eq!(
            format_duration(seconds, "{W}w {D}d {H}:{M:02}:{S:02}", "seconds").unwrap(),
            "4w 5d 8:04:02"
        );
    }

    #[test]
    fn space_padded_days_and_hours() {
        let seconds = 5 * 86_400 + 8 * 3_600 + 4 * 60 + 2;
        assert_eq!(
            format_duration(seconds, "{D:2}d {H:2}:{M:02}:{S:02}", "seconds").unwrap(),
            " 5d  8:04:02"
        );
    }

    #[test]
    fn unreferenced_units_are_absorbed() {
        assert_eq!(
            format_duration(260_000, "{H}h {S}s", "duration").unwrap(),
            "72h 800s"
        );
        assert_eq!(
            format_duration(3725, "{M}:{S:02}", "duration").unwrap(),
            "62:05"
        );
    }

    #[test]
    fn repeated_field_renders_same_value() {
        assert_eq!(
            format_duration(125, "{M}m ({M:03})", "duration").unwrap(),
            "2m (002)"
        );
    }

    // === Units ===

    #[test]
    fn input_units_scale_to_seconds() {
        assert_eq!(format_duration(90, "{H}:{M:02}", "minutes").unwrap(), "1:30");
        assert_eq!(format_duration(2, "{M}", "h").unwrap(), "120");
        assert_eq!(format_duration(1, "{H}", "days").unwrap(), "24");
        assert_eq!(format_duration(1, "{D}", "w").unwrap(), "7");
        assert_eq!(format_duration(61, "{M} {S}", "s").unwrap(), "1 1");
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert_eq!(
            format_duration(10, EPISODE_TEMPLATE, "fortnights"),
            Err(DurationError::InvalidUnit("fortnights".to_string()))
        );
    }

    #[test]
    fn overflowing_unit_is_rejected() {
        assert!(matches!(
            format_duration(u64::MAX, "{S}", "weeks"),
            Err(DurationError::Overflow { .. })
        ));
    }

    #[test]
    fn time_delta_uses_whole_seconds() {
        let delta = TimeDelta::seconds(3725) + TimeDelta::milliseconds(900);
        assert_eq!(format_time_delta(delta, EPISODE_TEMPLATE).unwrap(), " 1:02:05");
        assert_eq!(
            format_time_delta(TimeDelta::seconds(-5), EPISODE_TEMPLATE).unwrap(),
            " 0:00:00"
        );
    }

    // === Template parsing ===

    #[test]
    fn parse_produces_ordered_instructions() {
        let template = DurationTemplate::parse(EPISODE_TEMPLATE).unwrap();

        assert_eq!(
            template.segments(),
            &[
                Segment::Field(FieldSpec {
                    field: Field::Hours,
                    width: 2,
                    zero_pad: false
                }),
                Segment::Literal(":".to_string()),
                Segment::Field(FieldSpec {
                    field: Field::Minutes,
                    width: 2,
                    zero_pad: true
                }),
                Segment::Literal(":".to_string()),
                Segment::Field(FieldSpec {
                    field: Field::Seconds,
                    width: 2,
                    zero_pad: true
                }),
            ]
        );
    }

    #[test]
    fn parse_handles_escaped_braces() {
        let template = DurationTemplate::parse("{{{S}}}").unwrap();
        assert_eq!(template.render(7), "{7}");
    }

    #[test]
    fn parse_rejects_unknown_field() {
        assert!(matches!(
            DurationTemplate::parse("{X:02}"),
            Err(DurationError::UnknownField { field, .. }) if field == "X"
        ));
    }

    #[test]
    fn parse_rejects_unbalanced_braces() {
        assert!(matches!(
            DurationTemplate::parse("{H"),
            Err(DurationError::InvalidTemplate { .. })
        ));
        assert!(matches!(
            DurationTemplate::parse("H}"),
            Err(DurationError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn parse_rejects_unsupported_spec() {
        assert!(matches!(
            DurationTemplate::parse("{H:>4}"),
            Err(DurationError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn literal_only_template_is_kept() {
        assert_eq!(format_duration(42, "no fields", "s").unwrap(), "no fields");
    }
}
