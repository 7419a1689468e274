//! Crop box resize handles.
//!
//! A crop box exposes eight handles: four corners and four edge midpoints.
//! Hit testing decides which handle a pointer is over, and [`resize_rect`]
//! applies a drag to the edges that handle controls.

use crate::types::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Size of the square hit area drawn for each handle, in pixels.
pub const HANDLE_HIT_SIZE: f64 = 12.0;

/// Default hit tolerance: half of [`HANDLE_HIT_SIZE`].
pub const DEFAULT_HANDLE_TOLERANCE: f64 = HANDLE_HIT_SIZE / 2.0;

/// Which edge or corner of a rectangle a point is near.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CropResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// Pointer cursor shown while hovering or dragging a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeCursor {
    /// Diagonal, top-left to bottom-right.
    NwseResize,
    /// Diagonal, top-right to bottom-left.
    NeswResize,
    /// Vertical.
    NsResize,
    /// Horizontal.
    EwResize,
}

impl ResizeCursor {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            ResizeCursor::NwseResize => "nwse-resize",
            ResizeCursor::NeswResize => "nesw-resize",
            ResizeCursor::NsResize => "ns-resize",
            ResizeCursor::EwResize => "ew-resize",
        }
    }
}

impl CropResizeHandle {
    /// All handles, corners first in the order hit testing checks them.
    pub const ALL: [CropResizeHandle; 8] = [
        CropResizeHandle::TopLeft,
        CropResizeHandle::TopRight,
        CropResizeHandle::BottomRight,
        CropResizeHandle::BottomLeft,
        CropResizeHandle::Top,
        CropResizeHandle::Right,
        CropResizeHandle::Bottom,
        CropResizeHandle::Left,
    ];

    pub fn cursor(self) -> ResizeCursor {
        match self {
            CropResizeHandle::TopLeft | CropResizeHandle::BottomRight => ResizeCursor::NwseResize,
            CropResizeHandle::TopRight | CropResizeHandle::BottomLeft => ResizeCursor::NeswResize,
            CropResizeHandle::Top | CropResizeHandle::Bottom => ResizeCursor::NsResize,
            CropResizeHandle::Left | CropResizeHandle::Right => ResizeCursor::EwResize,
        }
    }

    /// camelCase name used by the editor front end.
    pub fn name(self) -> &'static str {
        match self {
            CropResizeHandle::TopLeft => "topLeft",
            CropResizeHandle::Top => "top",
            CropResizeHandle::TopRight => "topRight",
            CropResizeHandle::Right => "right",
            CropResizeHandle::BottomRight => "bottomRight",
            CropResizeHandle::Bottom => "bottom",
            CropResizeHandle::BottomLeft => "bottomLeft",
            CropResizeHandle::Left => "left",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    #[inline]
    fn moves_left(self) -> bool {
        matches!(
            self,
            CropResizeHandle::TopLeft | CropResizeHandle::Left | CropResizeHandle::BottomLeft
        )
    }

    #[inline]
    fn moves_right(self) -> bool {
        matches!(
            self,
            CropResizeHandle::TopRight | CropResizeHandle::Right | CropResizeHandle::BottomRight
        )
    }

    #[inline]
    fn moves_top(self) -> bool {
        matches!(
            self,
            CropResizeHandle::TopLeft | CropResizeHandle::Top | CropResizeHandle::TopRight
        )
    }

    #[inline]
    fn moves_bottom(self) -> bool {
        matches!(
            self,
            CropResizeHandle::BottomLeft | CropResizeHandle::Bottom | CropResizeHandle::BottomRight
        )
    }
}

/// Find the resize handle under a point.
///
/// A point is on an edge when it lies within `tolerance` of that edge line.
/// Corners are checked before edges, so a point near both the top and left
/// edges yields [`CropResizeHandle::TopLeft`]. Single edges additionally
/// require the point to lie within the edge's span, extended by `tolerance`
/// at both ends.
pub fn get_handle_at_point(point: Point, rect: &Rect, tolerance: f64) -> Option<CropResizeHandle> {
    let near_left = (point.x - rect.x).abs() <= tolerance;
    let near_right = (point.x - rect.right()).abs() <= tolerance;
    let near_top = (point.y - rect.y).abs() <= tolerance;
    let near_bottom = (point.y - rect.bottom()).abs() <= tolerance;

    let within_x = point.x >= rect.x - tolerance && point.x <= rect.right() + tolerance;
    let within_y = point.y >= rect.y - tolerance && point.y <= rect.bottom() + tolerance;

    if near_top && near_left {
        Some(CropResizeHandle::TopLeft)
    } else if near_top && near_right {
        Some(CropResizeHandle::TopRight)
    } else if near_bottom && near_right {
        Some(CropResizeHandle::BottomRight)
    } else if near_bottom && near_left {
        Some(CropResizeHandle::BottomLeft)
    } else if near_top && within_x {
        Some(CropResizeHandle::Top)
    } else if near_right && within_y {
        Some(CropResizeHandle::Right)
    } else if near_bottom && within_x {
        Some(CropResizeHandle::Bottom)
    } else if near_left && within_y {
        Some(CropResizeHandle::Left)
    } else {
        None
    }
}

/// Apply a drag of (`dx`, `dy`) to the edges controlled by `handle`.
///
/// Edges the handle does not control stay fixed. A moving edge stops
/// `min_size` short of the opposite edge, so the result never inverts.
pub fn resize_rect(rect: &Rect, handle: CropResizeHandle, dx: f64, dy: f64, min_size: f64) -> Rect {
    let min_size = min_size.max(0.0);
    let mut left = rect.x;
    let mut top = rect.y;
    let mut right = rect.right();
    let mut bottom = rect.bottom();

    if handle.moves_left() {
        left = (left + dx).min(right - min_size);
    }
    if handle.moves_right() {
        right = (right + dx).max(left + min_size);
    }
    if handle.moves_top() {
        top = (top + dy).min(bottom - min_size);
    }
    if handle.moves_bottom() {
        bottom = (bottom + dy).max(top + min_size);
    }

    Rect {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    }
}

/// Move a rectangle by (`dx`, `dy`) while keeping it inside `bounds`.
///
/// The size is preserved; a rectangle larger than `bounds` is pinned to
/// the bounds origin.
pub fn translate_within(rect: &Rect, dx: f64, dy: f64, bounds: &Rect) -> Rect {
    let max_x = (bounds.right() - rect.width).max(bounds.x);
    let max_y = (bounds.bottom() - rect.height).max(bounds.y);
    Rect {
        x: (rect.x + dx).clamp(bounds.x, max_x),
        y: (rect.y + dy).clamp(bounds.y, max_y),
        width: rect.width,
        height: rect.height,
    }
}
