use crate::foundation::core::Rgb8;
use crate::foundation::error::{TextclipError, TextclipResult};

const COLOR_FORMAT_HINT: &str = "Color must be in R,G,B format (e.g. 255,0,0)";
const GRADIENT_FORMAT_HINT: &str =
    "Gradient colors must be in R G B;R G B format (e.g. 255 0 0;0 0 255)";

/// Parse a single `"R,G,B"` color.
pub fn parse_color(s: &str) -> TextclipResult<Rgb8> {
    rgb_from_tokens(s.split(',')).ok_or_else(|| TextclipError::format(COLOR_FORMAT_HINT))
}

/// Parse a semicolon-separated list of space-separated triples: `"R G B;R G B"`.
///
/// Unlike [`parse_color`] the channels inside one stop are separated by a single space.
pub fn parse_gradient_colors(s: &str) -> TextclipResult<Vec<Rgb8>> {
    s.split(';')
        .map(|stop| {
            rgb_from_tokens(stop.split(' ')).ok_or_else(|| TextclipError::format(GRADIENT_FORMAT_HINT))
        })
        .collect()
}

/// Parse a caption color: a basic color name, `#RRGGBB`, or `"R,G,B"`.
pub fn parse_text_color(s: &str) -> TextclipResult<Rgb8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if s.contains(',') {
        return parse_color(s);
    }
    named_color(s).ok_or_else(|| {
        TextclipError::format(format!(
            "unknown text color \"{s}\" (use a color name, #RRGGBB or R,G,B)"
        ))
    })
}

fn rgb_from_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<Rgb8> {
    let mut channels = [0u8; 3];
    let mut n = 0usize;
    for token in tokens {
        if n == channels.len() {
            return None;
        }
        channels[n] = token.trim().parse::<u8>().ok()?;
        n += 1;
    }
    (n == channels.len()).then(|| Rgb8::new(channels[0], channels[1], channels[2]))
}

fn parse_hex(s: &str) -> TextclipResult<Rgb8> {
    fn hex_byte(pair: &str) -> TextclipResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| TextclipError::format(format!("invalid hex byte \"{pair}\"")))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err(TextclipError::format(
            "hex color must be #RRGGBB (case-insensitive)",
        ));
    }
    Ok(Rgb8::new(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}

fn named_color(name: &str) -> Option<Rgb8> {
    let rgb: (u8, u8, u8) = match name.to_ascii_lowercase().as_str() {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "gold" => (255, 215, 0),
        _ => return None,
    };
    Some(rgb.into())
}
