//! Hit-testing: what the pointer is touching.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::shapes::{Element, ShapeKind};

/// Named hit region of an element.
///
/// Everything except [`Position::Inside`] is a resize handle: rectangle
/// corners, or line endpoints. Circle and diamond expose no handles, only
/// their body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// The lexicographically smaller line endpoint.
    Start,
    /// The other line endpoint.
    End,
    /// Anywhere in the body of the shape.
    Inside,
}

impl Position {
    /// Whether this region starts a resize rather than a move.
    pub fn is_handle(&self) -> bool {
        !matches!(self, Position::Inside)
    }
}

/// Cursor feedback the embedder should show for a hit region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorKind {
    /// Diagonal resize, north-west/south-east.
    NwseResize,
    /// Diagonal resize, north-east/south-west.
    NeswResize,
    Move,
    #[default]
    Default,
}

/// Map a hit region to its cursor hint.
pub fn cursor_for(position: Position) -> CursorKind {
    match position {
        Position::TopLeft | Position::BottomRight | Position::Start | Position::End => {
            CursorKind::NwseResize
        }
        Position::TopRight | Position::BottomLeft => CursorKind::NeswResize,
        Position::Inside => CursorKind::Move,
    }
}

/// Hit region of `p` within a single element, if any.
pub fn position_within(element: &Element, p: Point) -> Option<Position> {
    match element.kind() {
        ShapeKind::Rectangle => {
            let bounds = element.bounds();
            let corners = [
                (Point::new(bounds.x0, bounds.y0), Position::TopLeft),
                (Point::new(bounds.x1, bounds.y0), Position::TopRight),
                (Point::new(bounds.x0, bounds.y1), Position::BottomLeft),
                (Point::new(bounds.x1, bounds.y1), Position::BottomRight),
            ];
            for (corner, position) in corners {
                if geometry::near_point(p, corner) {
                    return Some(position);
                }
            }
            geometry::in_box(bounds, p).then_some(Position::Inside)
        }
        ShapeKind::Line => {
            // Endpoint handles take priority over the body.
            if geometry::near_point(p, element.start()) {
                Some(Position::Start)
            } else if geometry::near_point(p, element.end()) {
                Some(Position::End)
            } else {
                geometry::on_segment(p, element.start(), element.end())
                    .then_some(Position::Inside)
            }
        }
        ShapeKind::Circle => {
            geometry::in_inscribed_ellipse(element.bounds(), p).then_some(Position::Inside)
        }
        ShapeKind::Diamond => {
            geometry::in_inscribed_diamond(element.bounds(), p).then_some(Position::Inside)
        }
    }
}

/// The topmost element under `p` and the region hit.
///
/// "Topmost" here means first in collection order: when shapes overlap the
/// earliest-created one wins, even though painting draws later shapes above
/// it. Long-standing behavior, kept deliberately.
pub fn element_at(p: Point, shapes: &[Element]) -> Option<(&Element, Position)> {
    shapes
        .iter()
        .find_map(|element| position_within(element, p).map(|position| (element, position)))
}
