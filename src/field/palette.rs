//! Color palette handling.
//!
//! Palettes are lists of hex color strings supplied by the host
//! configuration and converted to normalized RGB before particle
//! generation.

/// Fallback palette used when the configured palette is empty or absent.
pub const DEFAULT_PALETTE: [&str; 3] = ["#a56f6fff", "#49258bff", "#318d72ff"];

/// Parse a hex color to RGB floats.
///
/// Accepts 3-char shorthand (each nibble doubled), 6-char RGB, or 8-char
/// RGBA (alpha is ignored). Returns `None` for anything else.
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 3 {
        let expand = |c: char| {
            let n = c.to_digit(16)?;
            Some((n * 16 + n) as f32 / 255.0)
        };
        let mut chars = hex.chars();
        let r = expand(chars.next()?)?;
        let g = expand(chars.next()?)?;
        let b = expand(chars.next()?)?;
        return Some([r, g, b]);
    }

    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
    Some([r, g, b])
}

/// Resolve a configured palette into normalized RGB entries.
///
/// Malformed entries are skipped with a warning; an empty result (empty
/// input or nothing parseable) falls back to [`DEFAULT_PALETTE`]. The
/// returned list is always non-empty.
pub fn resolve_palette(colors: &[String]) -> Vec<[f32; 3]> {
    let mut resolved: Vec<[f32; 3]> = Vec::with_capacity(colors.len());
    for entry in colors {
        match parse_hex_color(entry) {
            Some(rgb) => resolved.push(rgb),
            None => log::warn!("Ignoring malformed palette color: {:?}", entry),
        }
    }

    if resolved.is_empty() {
        resolved = DEFAULT_PALETTE
            .iter()
            .filter_map(|hex| parse_hex_color(hex))
            .collect();
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("#000000"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("00ff88"), Some([0.0, 1.0, 136.0 / 255.0]));
        // 8-char RGBA: alpha byte is ignored
        assert_eq!(parse_hex_color("#ffffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("#00000080"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(parse_hex_color("#0f0"), Some([0.0, 1.0, 0.0]));
        assert_eq!(parse_hex_color("#fff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("abc"), parse_hex_color("aabbcc"));
        assert_eq!(parse_hex_color("#0g0"), None);
    }

    #[test]
    fn test_resolve_palette_passthrough() {
        let colors = vec!["#ff0000".to_string(), "#00ff00".to_string()];
        let palette = resolve_palette(&colors);
        assert_eq!(palette, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_resolve_palette_skips_malformed() {
        let colors = vec!["not-a-color".to_string(), "#0000ff".to_string()];
        let palette = resolve_palette(&colors);
        assert_eq!(palette, vec![[0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_resolve_palette_empty_falls_back() {
        let palette = resolve_palette(&[]);
        assert_eq!(palette.len(), DEFAULT_PALETTE.len());

        let all_bad = vec!["xyz".to_string()];
        assert_eq!(resolve_palette(&all_bad), palette);
    }
}
