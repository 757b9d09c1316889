//! Shape model: the four drawable kinds and the elements built from them.

use kurbo::{Point, Rect};
use roughr::core::Drawable;
use serde::{Deserialize, Serialize};

use crate::drawable;
use crate::error::EditorError;

/// Identity of an element: its index in the collection at creation time.
/// Elements are never deleted or reordered, so the index stays valid for
/// the lifetime of the document.
pub type ElementId = usize;

/// The drawable shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Diamond,
}

/// Stroke parameters handed to the hand-drawn stroke generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchStyle {
    /// Stroke width in canvas units.
    pub stroke_width: f32,
    /// Roughness of the sketchy stroke.
    pub roughness: f32,
    /// Random seed for the hand-drawn effect. Stable for the lifetime of an
    /// element so its stroke does not shimmer while it is dragged.
    pub seed: u64,
}

impl SketchStyle {
    /// This style with a freshly generated seed, for a new element.
    pub fn with_fresh_seed(self) -> Self {
        Self {
            seed: generate_seed(),
            ..self
        }
    }
}

impl Default for SketchStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            roughness: 1.0,
            seed: generate_seed(),
        }
    }
}

/// Generate a seed for new elements.
/// A global counter mixed through a splitmix64-style finalizer; unique
/// without consulting the clock, which also works on WASM.
fn generate_seed() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    static SEED_COUNTER: AtomicU64 = AtomicU64::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut x = counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    x
}

/// One drawable element: two anchor points, a kind, and the renderer-ready
/// descriptor derived from them.
///
/// For a line the anchors are its endpoints; for the boxed kinds they are
/// opposite corners of the bounding box (circle and diamond are inscribed in
/// it). The descriptor is regenerated by every mutator, so it is always
/// consistent with the anchors; fields are private to keep it that way.
pub struct Element {
    id: ElementId,
    kind: ShapeKind,
    start: Point,
    end: Point,
    style: SketchStyle,
    drawable: Drawable<f32>,
}

// `roughr::core::Drawable` derives neither `Clone` nor `Debug` (its `Options`
// field is not `Debug`), so these impls stand in for `#[derive(Debug, Clone)]`,
// cloning the descriptor field-wise and omitting it from the debug output.
impl Clone for Element {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            start: self.start,
            end: self.end,
            style: self.style,
            drawable: Drawable {
                shape: self.drawable.shape.clone(),
                options: self.drawable.options.clone(),
                sets: self.drawable.sets.clone(),
            },
        }
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("style", &self.style)
            .field("drawable", &self.drawable.shape)
            .finish()
    }
}

impl Element {
    /// Create an element, computing its descriptor.
    pub fn new(
        id: ElementId,
        kind: ShapeKind,
        start: Point,
        end: Point,
        style: SketchStyle,
    ) -> Self {
        let drawable = drawable::build(kind, start, end, &style);
        Self {
            id,
            kind,
            start,
            end,
            style,
            drawable,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// First anchor.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Second anchor.
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn style(&self) -> &SketchStyle {
        &self.style
    }

    /// The render descriptor for the current geometry.
    pub fn drawable(&self) -> &Drawable<f32> {
        &self.drawable
    }

    /// Bounding box of the two anchors.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Replace both anchors and regenerate the descriptor.
    pub fn set_anchors(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
        self.drawable = drawable::build(self.kind, self.start, self.end, &self.style);
    }

    /// Re-anchor the free end while the first anchor stays put.
    pub fn set_end(&mut self, end: Point) {
        self.set_anchors(self.start, end);
    }

    /// Move the element so its first anchor lands on `start`, preserving
    /// its extent.
    pub fn translate_to(&mut self, start: Point) {
        let extent = self.end - self.start;
        self.set_anchors(start, start + extent);
    }

    /// Canonicalize anchor order after a drag: corners sorted min/max per
    /// axis for rectangle and diamond, endpoints ordered lexicographically
    /// (by x, ties by y) for line and circle so the `Start` handle stays the
    /// smaller endpoint across repeated edits. Idempotent.
    pub fn normalize(&mut self) {
        let (start, end) = normalized_anchors(self.kind, self.start, self.end);
        if start != self.start || end != self.end {
            self.set_anchors(start, end);
        }
    }
}

// The descriptor is deliberately left out: the sketchy stroke may differ
// bit-for-bit between regenerations, and geometry is what equality means.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.start == other.start
            && self.end == other.end
            && self.style == other.style
    }
}

fn normalized_anchors(kind: ShapeKind, start: Point, end: Point) -> (Point, Point) {
    match kind {
        ShapeKind::Rectangle | ShapeKind::Diamond => {
            let rect = Rect::from_points(start, end);
            (Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1))
        }
        ShapeKind::Line | ShapeKind::Circle => {
            if start.x < end.x || (start.x == end.x && start.y <= end.y) {
                (start, end)
            } else {
                (end, start)
            }
        }
    }
}

/// Replace the coordinates of element `id` in place, regenerating its
/// descriptor. The collection is left untouched when `id` is out of range.
pub fn update_element(
    shapes: &mut [Element],
    id: ElementId,
    start: Point,
    end: Point,
) -> Result<(), EditorError> {
    let element = shapes.get_mut(id).ok_or(EditorError::InvalidShapeId(id))?;
    element.set_anchors(start, end);
    Ok(())
}
