//! The interaction state machine tying tools, hit-testing and history
//! together.

use std::fmt;
use std::str::FromStr;

use kurbo::{Point, Vec2};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::hit::{self, CursorKind, Position};
use crate::history::History;
use crate::input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::shapes::{Element, ElementId, ShapeKind, SketchStyle, update_element};

/// The toolbar's tool set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Selection,
    Line,
    Rectangle,
    Circle,
    Diamond,
}

impl Tool {
    /// The shape kind this tool draws, if it draws one.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Selection => None,
            Tool::Line => Some(ShapeKind::Line),
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Diamond => Some(ShapeKind::Diamond),
        }
    }
}

impl FromStr for Tool {
    type Err = EditorError;

    /// Parse a toolbar id. Anything outside the fixed id set is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "selection" => Ok(Tool::Selection),
            "line" => Ok(Tool::Line),
            "rectangle" => Ok(Tool::Rectangle),
            "circle" => Ok(Tool::Circle),
            "diamond" => Ok(Tool::Diamond),
            other => Err(EditorError::UnsupportedShapeKind(other.to_string())),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Tool::Selection => "selection",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Diamond => "diamond",
        };
        f.write_str(id)
    }
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
}

/// Bookkeeping for the element grabbed at pointer-down.
#[derive(Debug, Clone)]
struct Dragged {
    id: ElementId,
    /// Snapshot taken at pointer-down; move/resize math works from this,
    /// not from the partially-updated element.
    origin: Element,
    /// Pointer offset from the first anchor at grab time.
    grab: Vec2,
    /// The handle the drag started on.
    handle: Position,
}

/// An in-flight drag gesture. The variant data makes "mid-gesture without a
/// grabbed element" unrepresentable.
#[derive(Debug, Clone)]
enum Gesture {
    Drawing(Dragged),
    Moving(Dragged),
    Resizing(Dragged),
}

/// The top-level editor: current tool, drag state machine and the history
/// service it commits to.
///
/// All mutations happen synchronously inside the pointer/key handlers; the
/// embedder repaints from [`Editor::shapes`] after every call.
#[derive(Debug, Clone)]
pub struct Editor {
    tool: Tool,
    gesture: Option<Gesture>,
    cursor_hint: CursorKind,
    /// Template style for new elements; each element gets a fresh seed.
    style: SketchStyle,
    history: History,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// An editor over an empty canvas, selection tool active.
    pub fn new() -> Self {
        Self {
            tool: Tool::default(),
            gesture: None,
            cursor_hint: CursorKind::Default,
            style: SketchStyle::default(),
            history: History::new(),
        }
    }

    /// The shapes of the snapshot currently shown.
    pub fn shapes(&self) -> &[Element] {
        self.history.current()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. An in-flight gesture is abandoned.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.gesture = None;
        self.cursor_hint = CursorKind::Default;
    }

    pub fn action(&self) -> Action {
        match &self.gesture {
            None => Action::Idle,
            Some(Gesture::Drawing(_)) => Action::Drawing,
            Some(Gesture::Moving(_)) => Action::Moving,
            Some(Gesture::Resizing(_)) => Action::Resizing,
        }
    }

    /// Cursor feedback from the latest hover hit-test.
    pub fn cursor_hint(&self) -> CursorKind {
        self.cursor_hint
    }

    /// Style applied to newly drawn elements.
    pub fn style(&self) -> SketchStyle {
        self.style
    }

    pub fn set_style(&mut self, style: SketchStyle) {
        self.style = style;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one snapshot. Silent no-op at the beginning of history.
    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    /// Step forward one snapshot. Silent no-op at the end of history.
    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    /// Left-button press at `p`.
    ///
    /// With the selection tool this hit-tests the collection: a hit grabs
    /// the element (moving from its body, resizing from a handle) and
    /// freshly commits the unchanged collection, so the following amends
    /// overwrite that copy and the pre-drag state stays reachable through
    /// undo. A miss does nothing. With a drawing tool it appends a
    /// zero-size element at `p` and commits.
    pub fn pointer_down(&mut self, p: Point) -> Result<(), EditorError> {
        match self.tool.shape_kind() {
            None => {
                let Some((element, position)) = hit::element_at(p, self.history.current()) else {
                    return Ok(());
                };
                let origin = element.clone();
                let id = origin.id();
                let grab = p - origin.start();
                let dragged = Dragged {
                    id,
                    origin,
                    grab,
                    handle: position,
                };
                self.gesture = Some(if position == Position::Inside {
                    Gesture::Moving(dragged)
                } else {
                    Gesture::Resizing(dragged)
                });
                let snapshot = self.history.current().to_vec();
                self.history.commit(snapshot);
                debug!("grabbed #{id} at {position:?}");
            }
            Some(kind) => {
                let mut shapes = self.history.current().to_vec();
                let id = shapes.len();
                let element = Element::new(id, kind, p, p, self.style.with_fresh_seed());
                let origin = element.clone();
                shapes.push(element);
                self.history.commit(shapes);
                self.gesture = Some(Gesture::Drawing(Dragged {
                    id,
                    origin,
                    grab: Vec2::ZERO,
                    handle: Position::End,
                }));
                debug!("drawing {kind:?} #{id} from ({:.1}, {:.1})", p.x, p.y);
            }
        }
        Ok(())
    }

    /// Pointer motion to `p`.
    ///
    /// Idle with the selection tool only refreshes the cursor hint. During
    /// a gesture the grabbed element's anchors are recomputed and the
    /// current snapshot is amended in place.
    pub fn pointer_move(&mut self, p: Point) -> Result<(), EditorError> {
        let (id, start, end) = match &self.gesture {
            None => {
                if self.tool == Tool::Selection {
                    self.cursor_hint = hit::element_at(p, self.history.current())
                        .map(|(_, position)| hit::cursor_for(position))
                        .unwrap_or_default();
                }
                return Ok(());
            }
            Some(Gesture::Drawing(drag)) => (drag.id, drag.origin.start(), p),
            Some(Gesture::Moving(drag)) => {
                let start = p - drag.grab;
                let extent = drag.origin.end() - drag.origin.start();
                (drag.id, start, start + extent)
            }
            Some(Gesture::Resizing(drag)) => {
                let (start, end) =
                    resized_anchors(p, drag.handle, drag.origin.start(), drag.origin.end());
                (drag.id, start, end)
            }
        };

        let mut shapes = self.history.current().to_vec();
        update_element(&mut shapes, id, start, end)?;
        self.history.amend(shapes);
        trace!(
            "amend #{id}: ({:.1}, {:.1})-({:.1}, {:.1})",
            start.x, start.y, end.x, end.y
        );
        Ok(())
    }

    /// Left-button release.
    ///
    /// Ends the gesture: drawing and resizing normalize the element's
    /// anchors first, moving accepts the amended position as-is; either way
    /// the result is committed as a fresh snapshot, so the finished shape is
    /// independently undo-able.
    pub fn pointer_up(&mut self, _p: Point) -> Result<(), EditorError> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        let (id, normalize) = match gesture {
            Gesture::Drawing(drag) | Gesture::Resizing(drag) => (drag.id, true),
            Gesture::Moving(drag) => (drag.id, false),
        };

        let mut shapes = self.history.current().to_vec();
        if normalize {
            let element = shapes.get_mut(id).ok_or(EditorError::InvalidShapeId(id))?;
            element.normalize();
        }
        self.history.commit(shapes);
        debug!("gesture on #{id} finished");
        Ok(())
    }

    /// Route a pointer event to the matching handler. Only the left button
    /// drives the state machine; other buttons belong to the embedder.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> Result<(), EditorError> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(*position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(*position),
            PointerEvent::Move { position } => self.pointer_move(*position),
            _ => Ok(()),
        }
    }

    /// Editor shortcuts: mod+Z undoes, mod+Shift+Z redoes. Anything else is
    /// ignored.
    pub fn handle_key_event(&mut self, event: &KeyEvent, modifiers: Modifiers) {
        let KeyEvent::Pressed(key) = event else {
            return;
        };
        if !modifiers.command_or_ctrl() || !key.eq_ignore_ascii_case("z") {
            return;
        }
        if modifiers.shift {
            self.redo();
        } else {
            self.undo();
        }
    }
}

/// New anchors for a resize drag: each handle pins exactly one coordinate
/// pair to the pointer while the opposite corner/endpoint stays fixed.
fn resized_anchors(p: Point, handle: Position, start: Point, end: Point) -> (Point, Point) {
    match handle {
        Position::TopLeft | Position::Start => (p, end),
        Position::TopRight => (Point::new(start.x, p.y), Point::new(p.x, end.y)),
        Position::BottomLeft => (Point::new(p.x, start.y), Point::new(end.x, p.y)),
        Position::BottomRight | Position::End => (start, p),
        Position::Inside => (start, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_rectangle(editor: &mut Editor, from: Point, to: Point) {
        editor.set_tool(Tool::Rectangle);
        editor.pointer_down(from).unwrap();
        editor.pointer_move(to).unwrap();
        editor.pointer_up(to).unwrap();
    }

    #[test]
    fn test_tool_parsing_round_trip() {
        for tool in [
            Tool::Selection,
            Tool::Line,
            Tool::Rectangle,
            Tool::Circle,
            Tool::Diamond,
        ] {
            assert_eq!(tool.to_string().parse::<Tool>().unwrap(), tool);
        }
        let err = "triangle".parse::<Tool>().unwrap_err();
        assert_eq!(
            err,
            EditorError::UnsupportedShapeKind("triangle".to_string())
        );
    }

    #[test]
    fn test_drawing_gesture() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::Rectangle);

        editor.pointer_down(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(editor.action(), Action::Drawing);
        assert_eq!(editor.shapes().len(), 1);

        editor.pointer_move(Point::new(30.0, 20.0)).unwrap();
        editor.pointer_move(Point::new(50.0, 40.0)).unwrap();
        editor.pointer_up(Point::new(50.0, 40.0)).unwrap();

        assert_eq!(editor.action(), Action::Idle);
        let shape = &editor.shapes()[0];
        assert_eq!(shape.kind(), ShapeKind::Rectangle);
        assert_eq!(shape.start(), Point::new(10.0, 10.0));
        assert_eq!(shape.end(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_drawing_normalizes_backwards_drag() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(50.0, 40.0), Point::new(10.0, 10.0));

        let shape = &editor.shapes()[0];
        assert_eq!(shape.start(), Point::new(10.0, 10.0));
        assert_eq!(shape.end(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_end_to_end_draw_then_resize() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(10.0, 10.0), Point::new(50.0, 40.0));

        editor.set_tool(Tool::Selection);
        let (_, position) = hit::element_at(Point::new(12.0, 12.0), editor.shapes()).unwrap();
        assert_eq!(position, Position::TopLeft);

        editor.pointer_down(Point::new(12.0, 12.0)).unwrap();
        assert_eq!(editor.action(), Action::Resizing);

        editor.pointer_move(Point::new(5.0, 5.0)).unwrap();
        editor.pointer_up(Point::new(5.0, 5.0)).unwrap();

        assert_eq!(editor.action(), Action::Idle);
        let shape = &editor.shapes()[0];
        assert_eq!(shape.start(), Point::new(5.0, 5.0));
        assert_eq!(shape.end(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_moving_preserves_extent() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(10.0, 10.0), Point::new(50.0, 40.0));

        editor.set_tool(Tool::Selection);
        editor.pointer_down(Point::new(30.0, 25.0)).unwrap();
        assert_eq!(editor.action(), Action::Moving);

        editor.pointer_move(Point::new(130.0, 125.0)).unwrap();
        editor.pointer_up(Point::new(130.0, 125.0)).unwrap();

        let shape = &editor.shapes()[0];
        assert_eq!(shape.start(), Point::new(110.0, 110.0));
        assert_eq!(shape.end(), Point::new(150.0, 140.0));
    }

    #[test]
    fn test_line_endpoint_resize() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::Line);
        editor.pointer_down(Point::new(0.0, 0.0)).unwrap();
        editor.pointer_move(Point::new(100.0, 0.0)).unwrap();
        editor.pointer_up(Point::new(100.0, 0.0)).unwrap();

        editor.set_tool(Tool::Selection);
        editor.pointer_down(Point::new(100.0, 0.0)).unwrap();
        assert_eq!(editor.action(), Action::Resizing);
        editor.pointer_move(Point::new(120.0, 30.0)).unwrap();
        editor.pointer_up(Point::new(120.0, 30.0)).unwrap();

        let line = &editor.shapes()[0];
        assert_eq!(line.start(), Point::new(0.0, 0.0));
        assert_eq!(line.end(), Point::new(120.0, 30.0));
    }

    #[test]
    fn test_selection_miss_is_a_no_op() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(10.0, 10.0), Point::new(50.0, 40.0));
        let depth_before = editor.shapes().len();

        editor.set_tool(Tool::Selection);
        editor.pointer_down(Point::new(300.0, 300.0)).unwrap();
        assert_eq!(editor.action(), Action::Idle);
        editor.pointer_up(Point::new(300.0, 300.0)).unwrap();

        assert_eq!(editor.shapes().len(), depth_before);
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_zero_motion_click_commits_zero_size_shape() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::Circle);
        editor.pointer_down(Point::new(20.0, 20.0)).unwrap();
        editor.pointer_up(Point::new(20.0, 20.0)).unwrap();

        let shape = &editor.shapes()[0];
        assert_eq!(shape.start(), shape.end());
    }

    #[test]
    fn test_undo_redo_over_gestures() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(10.0, 10.0), Point::new(50.0, 40.0));
        assert_eq!(editor.shapes().len(), 1);

        // A finished gesture is two snapshots deep: the pointer-down commit
        // and the finalizing commit.
        assert!(editor.undo());
        assert!(editor.undo());
        assert!(editor.shapes().is_empty());

        assert!(editor.redo());
        assert!(editor.redo());
        assert_eq!(editor.shapes().len(), 1);
        assert_eq!(editor.shapes()[0].end(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::default()
        };

        editor.handle_key_event(&KeyEvent::Pressed("z".to_string()), ctrl);
        editor.handle_key_event(&KeyEvent::Pressed("z".to_string()), ctrl);
        assert!(editor.shapes().is_empty());

        editor.handle_key_event(&KeyEvent::Pressed("Z".to_string()), ctrl_shift);
        editor.handle_key_event(&KeyEvent::Pressed("Z".to_string()), ctrl_shift);
        assert_eq!(editor.shapes().len(), 1);

        // Without the modifier nothing happens.
        editor.handle_key_event(&KeyEvent::Pressed("z".to_string()), Modifiers::default());
        assert_eq!(editor.shapes().len(), 1);
    }

    #[test]
    fn test_pointer_events_route_left_button_only() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::Rectangle);

        editor
            .handle_pointer_event(&PointerEvent::Down {
                position: Point::new(5.0, 5.0),
                button: MouseButton::Right,
            })
            .unwrap();
        assert_eq!(editor.action(), Action::Idle);

        editor
            .handle_pointer_event(&PointerEvent::Down {
                position: Point::new(5.0, 5.0),
                button: MouseButton::Left,
            })
            .unwrap();
        assert_eq!(editor.action(), Action::Drawing);

        editor
            .handle_pointer_event(&PointerEvent::Move {
                position: Point::new(25.0, 25.0),
            })
            .unwrap();
        editor
            .handle_pointer_event(&PointerEvent::Up {
                position: Point::new(25.0, 25.0),
                button: MouseButton::Left,
            })
            .unwrap();

        assert_eq!(editor.shapes()[0].end(), Point::new(25.0, 25.0));
    }

    #[test]
    fn test_hover_updates_cursor_hint() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(10.0, 10.0), Point::new(50.0, 40.0));

        editor.set_tool(Tool::Selection);
        editor.pointer_move(Point::new(30.0, 25.0)).unwrap();
        assert_eq!(editor.cursor_hint(), CursorKind::Move);

        editor.pointer_move(Point::new(12.0, 12.0)).unwrap();
        assert_eq!(editor.cursor_hint(), CursorKind::NwseResize);

        editor.pointer_move(Point::new(48.0, 12.0)).unwrap();
        assert_eq!(editor.cursor_hint(), CursorKind::NeswResize);

        editor.pointer_move(Point::new(300.0, 300.0)).unwrap();
        assert_eq!(editor.cursor_hint(), CursorKind::Default);
    }

    #[test]
    fn test_new_drawing_discards_redo_states() {
        let mut editor = Editor::new();
        draw_rectangle(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        draw_rectangle(&mut editor, Point::new(20.0, 20.0), Point::new(30.0, 30.0));
        assert_eq!(editor.shapes().len(), 2);

        editor.undo();
        editor.undo();
        assert_eq!(editor.shapes().len(), 1);

        draw_rectangle(&mut editor, Point::new(40.0, 40.0), Point::new(60.0, 60.0));
        assert!(!editor.can_redo());
        assert_eq!(editor.shapes().len(), 2);
        assert_eq!(editor.shapes()[1].start(), Point::new(40.0, 40.0));
    }
}
