//! Views and the generation-checked view arena.

use crate::backend::{SceneNodeId, SurfaceHandle};
use crate::error::{Result, StageError};
use crate::ids::{SlotIndex, ViewId};
use stage_core::Rect;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// A normal top-level window.
    Toplevel,
    /// A screen-lock surface. Never part of a workspace.
    LockSurface,
}

/// The four 1px border rectangles framing a toplevel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borders {
    pub left: SceneNodeId,
    pub top: SceneNodeId,
    pub bottom: SceneNodeId,
    pub right: SceneNodeId,
}

impl Borders {
    pub fn nodes(&self) -> [SceneNodeId; 4] {
        [self.left, self.top, self.bottom, self.right]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub kind: ViewKind,
    pub surface: SurfaceHandle,
    /// Root scene node of the surface tree.
    pub node: SceneNodeId,
    /// `None` for lock surfaces.
    pub borders: Option<Borders>,
    pub geometry: Rect,
    /// Geometry before a full maximize; `Some` while maximized.
    pub saved_maximize: Option<Rect>,
    /// Geometry before a vertical maximize; `Some` while maximized vertically.
    pub saved_max_vertical: Option<Rect>,
    /// Set on the focused view of a workspace when switching away from it.
    pub was_focused: bool,
    pub slot: Option<SlotIndex>,
    /// Carries the focused decoration.
    pub activated: bool,
    pub app_id: Option<String>,
    /// Initial placement has run.
    pub mapped_once: bool,
}

impl View {
    pub fn new(kind: ViewKind, surface: SurfaceHandle, node: SceneNodeId) -> Self {
        View {
            kind,
            surface,
            node,
            borders: None,
            geometry: Rect::default(),
            saved_maximize: None,
            saved_max_vertical: None,
            was_focused: false,
            slot: None,
            activated: false,
            app_id: None,
            mapped_once: false,
        }
    }

    pub fn is_toplevel(&self) -> bool {
        self.kind == ViewKind::Toplevel
    }

    pub fn is_maximized(&self) -> bool {
        self.saved_maximize.is_some()
    }

    pub fn is_max_vertical(&self) -> bool {
        self.saved_max_vertical.is_some()
    }
}

#[derive(Debug)]
struct Entry {
    generation: u32,
    view: Option<View>,
}

/// Owns every view. Lookups by surface and scene node are kept in sync with
/// insertions and removals.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    entries: Vec<Entry>,
    free: Vec<u32>,
    by_surface: HashMap<SurfaceHandle, ViewId>,
    by_node: HashMap<SceneNodeId, ViewId>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, view: View) -> ViewId {
        let surface = view.surface;
        let node = view.node;
        let id = match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.generation = entry.generation.wrapping_add(1);
                entry.view = Some(view);
                ViewId { index, generation: entry.generation }
            }
            None => {
                let index = self.entries.len() as u32;
                self.entries.push(Entry { generation: 0, view: Some(view) });
                ViewId { index, generation: 0 }
            }
        };
        self.by_surface.insert(surface, id);
        self.by_node.insert(node, id);
        id
    }

    pub fn remove(&mut self, id: ViewId) -> Result<View> {
        let entry = self
            .entries
            .get_mut(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .ok_or(StageError::UnknownView(id))?;
        let view = entry.view.take().ok_or(StageError::UnknownView(id))?;
        self.free.push(id.index);
        self.by_surface.remove(&view.surface);
        self.by_node.remove(&view.node);
        Ok(view)
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.entries
            .get(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.view.as_ref())
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.entries
            .get_mut(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.view.as_mut())
    }

    /// Like [`get`](Self::get), but a missing view is an error.
    pub fn try_get(&self, id: ViewId) -> Result<&View> {
        self.get(id).ok_or(StageError::UnknownView(id))
    }

    pub fn try_get_mut(&mut self, id: ViewId) -> Result<&mut View> {
        self.get_mut(id).ok_or(StageError::UnknownView(id))
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.get(id).is_some()
    }

    pub fn by_surface(&self, surface: SurfaceHandle) -> Option<ViewId> {
        self.by_surface.get(&surface).copied()
    }

    pub fn by_node(&self, node: SceneNodeId) -> Option<ViewId> {
        self.by_node.get(&node).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &View)> {
        self.entries.iter().enumerate().filter_map(|(index, e)| {
            e.view.as_ref().map(|v| {
                (
                    ViewId {
                        index: index as u32,
                        generation: e.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.by_surface.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
