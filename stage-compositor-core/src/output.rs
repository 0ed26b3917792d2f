//! Outputs and their placement in the layout.

use crate::backend::OutputHandle;
use crate::ids::WorkspaceIndex;
use stage_core::{Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub handle: OutputHandle,
    /// Position and resolution in layout coordinates.
    pub area: Rect,
    pub current_workspace: WorkspaceIndex,
}

/// Outputs in creation order, arranged left to right.
#[derive(Debug, Default)]
pub struct OutputSet {
    outputs: Vec<Output>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output to the right of the existing layout showing the first
    /// workspace.
    pub fn add(&mut self, handle: OutputHandle, size: Size<i32>) -> &Output {
        self.remove(handle);
        let x = self.outputs.iter().map(|o| o.area.right()).max().unwrap_or(0);
        self.outputs.push(Output {
            handle,
            area: Rect::new(x, 0, size.width, size.height),
            current_workspace: WorkspaceIndex::FIRST,
        });
        &self.outputs[self.outputs.len() - 1]
    }

    pub fn remove(&mut self, handle: OutputHandle) -> Option<Output> {
        let pos = self.outputs.iter().position(|o| o.handle == handle)?;
        Some(self.outputs.remove(pos))
    }

    pub fn get(&self, handle: OutputHandle) -> Option<&Output> {
        self.outputs.iter().find(|o| o.handle == handle)
    }

    pub fn get_mut(&mut self, handle: OutputHandle) -> Option<&mut Output> {
        self.outputs.iter_mut().find(|o| o.handle == handle)
    }

    pub fn output_at(&self, point: Point<f64>) -> Option<&Output> {
        self.outputs.iter().find(|o| o.area.contains(point))
    }

    pub fn first(&self) -> Option<&Output> {
        self.outputs.first()
    }

    /// Bounding box of all outputs.
    pub fn layout_box(&self) -> Option<Rect> {
        self.outputs
            .iter()
            .map(|o| o.area)
            .reduce(|acc, area| acc.union(&area))
    }

    /// Whether any output other than `except` currently shows `workspace`.
    pub fn shows_workspace(&self, workspace: WorkspaceIndex, except: OutputHandle) -> bool {
        self.outputs
            .iter()
            .any(|o| o.handle != except && o.current_workspace == workspace)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}
