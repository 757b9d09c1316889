//! Render descriptor construction.
//!
//! The embedding shell paints shapes through `roughr` drawables (op-sets of
//! hand-drawn stroke segments). This module is the only place that talks to
//! the generator; everything else treats the descriptor as an opaque value
//! attached to an element. Painting the op-sets onto a surface is the
//! embedder's job.

use euclid::default::Point2D;
use kurbo::{Point, Rect};
use roughr::core::{Drawable, Options, OptionsBuilder};
use roughr::generator::Generator;

use crate::shapes::{ShapeKind, SketchStyle};

fn options_for(style: &SketchStyle) -> Option<Options> {
    OptionsBuilder::default()
        .roughness(style.roughness)
        .stroke_width(style.stroke_width)
        .seed(style.seed)
        .build()
        .ok()
}

/// Build the descriptor for a shape's current geometry.
///
/// Line and rectangle use their anchors directly; circle is the ellipse
/// inscribed in the anchor box; diamond is the polygon through the box's
/// edge midpoints (top, right, bottom, left).
pub(crate) fn build(
    kind: ShapeKind,
    start: Point,
    end: Point,
    style: &SketchStyle,
) -> Drawable<f32> {
    let generator = Generator::default();
    let options = options_for(style);
    match kind {
        ShapeKind::Line => generator.line::<f32>(
            start.x as f32,
            start.y as f32,
            end.x as f32,
            end.y as f32,
            &options,
        ),
        ShapeKind::Rectangle => generator.rectangle::<f32>(
            start.x as f32,
            start.y as f32,
            (end.x - start.x) as f32,
            (end.y - start.y) as f32,
            &options,
        ),
        ShapeKind::Circle => {
            let rect = Rect::from_points(start, end);
            let center = rect.center();
            generator.ellipse::<f32>(
                center.x as f32,
                center.y as f32,
                rect.width() as f32,
                rect.height() as f32,
                &options,
            )
        }
        ShapeKind::Diamond => {
            let rect = Rect::from_points(start, end);
            let center = rect.center();
            let vertices = [
                Point2D::new(center.x as f32, rect.y0 as f32),
                Point2D::new(rect.x1 as f32, center.y as f32),
                Point2D::new(center.x as f32, rect.y1 as f32),
                Point2D::new(rect.x0 as f32, center.y as f32),
            ];
            generator.polygon::<f32>(&vertices, &options)
        }
    }
}
