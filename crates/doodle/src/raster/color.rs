use image::{Rgb, Rgba};

use crate::error::{Error, Result};

/// Squared distance over all four channels.
pub fn dist_sq(a: Rgba<u8>, b: Rgba<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let d = i32::from(x) - i32::from(y);
            (d * d) as u32
        })
        .sum()
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(hex: &str) -> Result<Rgb<u8>> {
    let h = hex.trim().trim_start_matches('#');
    let full: String = match h.len() {
        3 => h.chars().flat_map(|c| [c, c]).collect(),
        6 => h.to_string(),
        _ => return Err(Error::InvalidColor(hex.to_string())),
    };
    if !full.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(hex.to_string()));
    }
    let num = u32::from_str_radix(&full, 16).map_err(|_| Error::InvalidColor(hex.to_string()))?;
    Ok(Rgb([(num >> 16) as u8, (num >> 8) as u8, num as u8]))
}

/// Format as lowercase `#rrggbb`.
pub fn to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Hue slider color: HSV with full saturation and value.
pub fn hue_to_rgb(hue: f32) -> Rgb<u8> {
    let h = hue.rem_euclid(360.0);
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();
    let (r, g, b) = match h {
        h if h < 60.0 => (1.0, x, 0.0),
        h if h < 120.0 => (x, 1.0, 0.0),
        h if h < 180.0 => (0.0, 1.0, x),
        h if h < 240.0 => (0.0, x, 1.0),
        h if h < 300.0 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let to_u8 = |v: f32| (v * 255.0).round() as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_sq() {
        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        assert_eq!(dist_sq(white, white), 0);
        assert_eq!(dist_sq(white, black), 3 * 255 * 255);
        assert_eq!(dist_sq(black, Rgba([0, 0, 0, 0])), 255 * 255);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), Rgb([255, 128, 0]));
        assert_eq!(parse_hex_color("111111").unwrap(), Rgb([17, 17, 17]));
        assert_eq!(parse_hex_color("#fa0").unwrap(), Rgb([255, 170, 0]));
        assert!(parse_hex_color("#ff80").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
    }

    #[test]
    fn test_parse_hex_color_rejects_signs() {
        assert!(parse_hex_color("+fffff").is_err());
        assert!(parse_hex_color("#+ff").is_err());
        assert!(parse_hex_color("-00000").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Rgb([255, 128, 0])), "#ff8000");
        assert_eq!(to_hex(parse_hex_color("#ABCDEF").unwrap()), "#abcdef");
    }

    #[test]
    fn test_hue_to_rgb() {
        assert_eq!(hue_to_rgb(0.0), Rgb([255, 0, 0]));
        assert_eq!(hue_to_rgb(120.0), Rgb([0, 255, 0]));
        assert_eq!(hue_to_rgb(240.0), Rgb([0, 0, 255]));
        assert_eq!(hue_to_rgb(60.0), Rgb([255, 255, 0]));
        assert_eq!(hue_to_rgb(360.0), hue_to_rgb(0.0));
    }
}
