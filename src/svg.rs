//! Metadata extracted from arrow and prop SVG text
//!
//! The SVG loader lives outside the engine; it hands us the fetched text and
//! we pull out the two things placement needs: the viewBox size (the
//! bounding box used for centering) and the rotation centre, which the asset
//! marks with a `<circle id="centerPoint" cx=".." cy=".."/>`.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::SvgError;
use crate::log;
use crate::types::{NumericError, Point, Px, PtPx, Size, SizePx};

static VIEW_BOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"viewBox\s*=\s*["']([^"']+)["']"#).expect("valid regex"));
static CENTER_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<circle\b[^>]*\bid\s*=\s*["']centerPoint["'][^>]*>"#).expect("valid regex")
});
static CX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bcx\s*=\s*["']([^"']+)["']"#).expect("valid regex"));
static CY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bcy\s*=\s*["']([^"']+)["']"#).expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgMetadata {
    /// viewBox width/height
    pub view_box: SizePx,
    /// Rotation centre in SVG user units
    pub center: PtPx,
}

impl SvgMetadata {
    /// Read viewBox and centre from SVG text.
    ///
    /// A missing or unreadable `centerPoint` falls back to the viewBox
    /// centre; a missing viewBox is an error since nothing can be centred.
    pub fn from_svg_text(svg: &str) -> Result<Self, SvgError> {
        let raw = VIEW_BOX
            .captures(svg)
            .and_then(|caps| caps.get(1))
            .ok_or(SvgError::MissingViewBox)?
            .as_str();

        let parts: Vec<f64> = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| SvgError::InvalidViewBox { value: raw.to_string() })?;

        let &[min_x, min_y, width, height] = parts.as_slice() else {
            return Err(SvgError::InvalidViewBox { value: raw.to_string() });
        };
        let invalid = |_: NumericError| SvgError::InvalidViewBox { value: raw.to_string() };
        let view_box = Size {
            w: Px::try_non_negative(width).map_err(invalid)?,
            h: Px::try_non_negative(height).map_err(invalid)?,
        };
        let center = center_point(svg).unwrap_or_else(|| {
            log::debug!("svg has no centerPoint, using viewBox centre");
            Point::new(Px(min_x), Px(min_y)) + view_box.half()
        });

        Ok(Self { view_box, center })
    }
}

fn center_point(svg: &str) -> Option<PtPx> {
    let tag = CENTER_POINT.find(svg)?.as_str();
    let read = |re: &Regex| -> Option<f64> {
        re.captures(tag)?.get(1)?.as_str().trim().parse().ok()
    };
    let (x, y) = (read(&CX)?, read(&CY)?);
    match (Px::try_new(x), Px::try_new(y)) {
        (Ok(x), Ok(y)) => Some(Point::new(x, y)),
        _ => {
            log::warn!(cx = x, cy = y, "centerPoint is not finite");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARROW_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 85.4 245.6">
  <path d="M0 0 L85.4 245.6" fill="#ED1C24"/>
  <circle id="centerPoint" cx="42.7" cy="122.8" r="2" fill="none"/>
</svg>"##;

    #[test]
    fn reads_view_box_and_center_point() {
        let meta = SvgMetadata::from_svg_text(ARROW_SVG).unwrap();
        assert_eq!(meta.view_box, Size::px(85.4, 245.6));
        assert_eq!(meta.center, Point::px(42.7, 122.8));
    }

    #[test]
    fn center_falls_back_to_view_box_centre() {
        let svg = r#"<svg viewBox="10,20,100,50"><rect/></svg>"#;
        let meta = SvgMetadata::from_svg_text(svg).unwrap();
        assert_eq!(meta.view_box, Size::px(100.0, 50.0));
        assert_eq!(meta.center, Point::px(60.0, 45.0));
    }

    #[test]
    fn center_point_attribute_order_does_not_matter() {
        let svg =
            r#"<svg viewBox="0 0 10 10"><circle cy="3" r="1" id="centerPoint" cx="4"/></svg>"#;
        let meta = SvgMetadata::from_svg_text(svg).unwrap();
        assert_eq!(meta.center, Point::px(4.0, 3.0));
    }

    #[test]
    fn missing_view_box_is_an_error() {
        assert_eq!(
            SvgMetadata::from_svg_text("<svg><path/></svg>"),
            Err(SvgError::MissingViewBox)
        );
    }

    #[test]
    fn short_view_box_is_an_error() {
        let err = SvgMetadata::from_svg_text(r#"<svg viewBox="0 0 10"></svg>"#).unwrap_err();
        assert_eq!(err, SvgError::InvalidViewBox { value: "0 0 10".into() });
    }

    #[test]
    fn negative_view_box_extent_is_an_error() {
        let err = SvgMetadata::from_svg_text(r#"<svg viewBox="0 0 -10 10"></svg>"#).unwrap_err();
        assert_eq!(err, SvgError::InvalidViewBox { value: "0 0 -10 10".into() });
    }

    #[test]
    fn infinite_center_point_falls_back() {
        let svg = r#"<svg viewBox="0 0 10 20"><circle id="centerPoint" cx="inf" cy="1"/></svg>"#;
        let meta = SvgMetadata::from_svg_text(svg).unwrap();
        assert_eq!(meta.center, Point::px(5.0, 10.0));
    }
}
