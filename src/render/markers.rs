//! Marker glyph geometry shared by backends.

use smallvec::SmallVec;

use crate::core::ScreenPoint;
use crate::render::MarkerType;

/// Backend-neutral outline of one marker glyph.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerShape {
    Ellipse { center: ScreenPoint, radius: f64 },
    /// Closed, fillable outline.
    Polygon(SmallVec<[ScreenPoint; 4]>),
    /// Open strokes only (cross, plus, star).
    Strokes(SmallVec<[(ScreenPoint, ScreenPoint); 4]>),
}

/// Outline of `marker_type` centred on `center`; `size` is the half-extent.
///
/// Returns `None` for [`MarkerType::None`].
#[must_use]
pub fn marker_shape(marker_type: MarkerType, center: ScreenPoint, size: f64) -> Option<MarkerShape> {
    let ScreenPoint { x, y } = center;
    let s = size;
    let shape = match marker_type {
        MarkerType::None => return None,
        MarkerType::Circle => MarkerShape::Ellipse { center, radius: s },
        MarkerType::Square => MarkerShape::Polygon(SmallVec::from_slice(&[
            ScreenPoint::new(x - s, y - s),
            ScreenPoint::new(x + s, y - s),
            ScreenPoint::new(x + s, y + s),
            ScreenPoint::new(x - s, y + s),
        ])),
        MarkerType::Diamond => {
            let d = s * std::f64::consts::SQRT_2;
            MarkerShape::Polygon(SmallVec::from_slice(&[
                ScreenPoint::new(x, y - d),
                ScreenPoint::new(x + d, y),
                ScreenPoint::new(x, y + d),
                ScreenPoint::new(x - d, y),
            ]))
        }
        MarkerType::Triangle => {
            // Equal area with the square of the same size.
            let h = s * std::f64::consts::SQRT_2;
            MarkerShape::Polygon(SmallVec::from_slice(&[
                ScreenPoint::new(x - h, y + s),
                ScreenPoint::new(x + h, y + s),
                ScreenPoint::new(x, y - h - s * 0.5),
            ]))
        }
        MarkerType::Cross => MarkerShape::Strokes(SmallVec::from_slice(&[
            (ScreenPoint::new(x - s, y - s), ScreenPoint::new(x + s, y + s)),
            (ScreenPoint::new(x - s, y + s), ScreenPoint::new(x + s, y - s)),
        ])),
        MarkerType::Plus => MarkerShape::Strokes(SmallVec::from_slice(&[
            (ScreenPoint::new(x - s, y), ScreenPoint::new(x + s, y)),
            (ScreenPoint::new(x, y - s), ScreenPoint::new(x, y + s)),
        ])),
        MarkerType::Star => MarkerShape::Strokes(SmallVec::from_slice(&[
            (ScreenPoint::new(x - s, y - s), ScreenPoint::new(x + s, y + s)),
            (ScreenPoint::new(x - s, y + s), ScreenPoint::new(x + s, y - s)),
            (ScreenPoint::new(x - s, y), ScreenPoint::new(x + s, y)),
            (ScreenPoint::new(x, y - s), ScreenPoint::new(x, y + s)),
        ])),
    };
    Some(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_centred() {
        let Some(MarkerShape::Polygon(points)) =
            marker_shape(MarkerType::Square, ScreenPoint::new(10.0, 20.0), 3.0)
        else {
            panic!("square should be a polygon");
        };
        let cx = points.iter().map(|p| p.x).sum::<f64>() / 4.0;
        let cy = points.iter().map(|p| p.y).sum::<f64>() / 4.0;
        assert!((cx - 10.0).abs() <= 1e-12);
        assert!((cy - 20.0).abs() <= 1e-12);
    }

    #[test]
    fn none_has_no_shape() {
        assert!(marker_shape(MarkerType::None, ScreenPoint::new(0.0, 0.0), 3.0).is_none());
    }
}
