use crate::foundation::error::{SquarizeError, SquarizeResult};

/// Premultiplied RGBA8 color, the fill format of [`Surface`](crate::Surface).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba8Premul {
    /// Red channel, premultiplied by alpha.
    pub r: u8,
    /// Green channel, premultiplied by alpha.
    pub g: u8,
    /// Blue channel, premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// A background fill color parsed from a user-facing descriptor string.
///
/// Accepted descriptors are CSS named colors (`"white"`, `"black"`, ...) and
/// hex colors (`#RRGGBB` or `#RRGGBBAA`, case-insensitive). The descriptor is
/// kept verbatim so the setting can round-trip through persistence.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundColor {
    descriptor: String,
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

/// Default background descriptor used when no setting has been persisted.
pub const DEFAULT_BACKGROUND: &str = "white";

impl Default for BackgroundColor {
    fn default() -> Self {
        Self {
            descriptor: DEFAULT_BACKGROUND.to_owned(),
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
}

impl BackgroundColor {
    /// Parse a descriptor string into a background color.
    ///
    /// Unknown names and malformed hex strings fail with
    /// [`SquarizeError::Validation`].
    pub fn parse(descriptor: &str) -> SquarizeResult<Self> {
        let trimmed = descriptor.trim();
        let (r, g, b, a) = if trimmed.starts_with('#') {
            parse_hex(trimmed)?
        } else {
            named_rgba(&trimmed.to_ascii_lowercase()).ok_or_else(|| {
                SquarizeError::validation(format!("unknown color descriptor \"{trimmed}\""))
            })?
        };
        Ok(Self {
            descriptor: descriptor.to_owned(),
            r,
            g,
            b,
            a,
        })
    }

    /// The descriptor string this color was parsed from.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Convert to premultiplied RGBA8 for surface fills.
    pub fn to_rgba8_premul(&self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = self.a.clamp(0.0, 1.0);
        Rgba8Premul {
            r: to_u8(self.r.clamp(0.0, 1.0) * a),
            g: to_u8(self.g.clamp(0.0, 1.0) * a),
            b: to_u8(self.b.clamp(0.0, 1.0) * a),
            a: to_u8(a),
        }
    }
}

fn parse_hex(s: &str) -> SquarizeResult<(f64, f64, f64, f64)> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(SquarizeError::validation(format!(
            "invalid hex color \"{s}\""
        )));
    }

    fn hex_byte(pair: &str) -> SquarizeResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| SquarizeError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    let (r, g, b, a) = match s.len() {
        6 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            (r, g, b, 255)
        }
        8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = hex_byte(&s[6..8])?;
            (r, g, b, a)
        }
        _ => {
            return Err(SquarizeError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            ));
        }
    };

    Ok((
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn named_rgba(name: &str) -> Option<(f64, f64, f64, f64)> {
    fn rgb(r: u8, g: u8, b: u8) -> Option<(f64, f64, f64, f64)> {
        Some((
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        ))
    }

    match name {
        "white" => rgb(255, 255, 255),
        "black" => rgb(0, 0, 0),
        "silver" => rgb(192, 192, 192),
        "gray" | "grey" => rgb(128, 128, 128),
        "red" => rgb(255, 0, 0),
        "maroon" => rgb(128, 0, 0),
        "yellow" => rgb(255, 255, 0),
        "olive" => rgb(128, 128, 0),
        "lime" => rgb(0, 255, 0),
        "green" => rgb(0, 128, 0),
        "aqua" | "cyan" => rgb(0, 255, 255),
        "teal" => rgb(0, 128, 128),
        "blue" => rgb(0, 0, 255),
        "navy" => rgb(0, 0, 128),
        "fuchsia" | "magenta" => rgb(255, 0, 255),
        "purple" => rgb(128, 0, 128),
        "orange" => rgb(255, 165, 0),
        "pink" => rgb(255, 192, 203),
        "brown" => rgb(165, 42, 42),
        "transparent" => Some((0.0, 0.0, 0.0, 0.0)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
