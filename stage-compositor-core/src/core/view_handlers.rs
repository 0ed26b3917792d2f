use super::state::{contract_violation, LayerSurface, Stage};
use crate::backend::{Backend, OutputHandle, SurfaceHandle};
use crate::decoration::border_layout;
use crate::error::{Result, StageError};
use crate::ids::{SlotIndex, ViewId, WorkspaceIndex};
use crate::view::{Borders, View, ViewKind};
use stage_core::{Point, Rect, Size};
use tracing::{debug, info, warn};

/// Size given to new layer-shell surfaces.
const LAYER_SURFACE_SIZE: Size<i32> = Size::new(200, 200);

impl<B: Backend> Stage<B> {
    /// Creates the view for a new toplevel. It stays hidden until mapped.
    pub fn handle_new_toplevel(&mut self, surface: SurfaceHandle) -> Result<ViewId> {
        let node = self.backend.create_view_node(surface);
        self.backend.set_node_enabled(node, false);
        let color = self.settings.colors.default;
        let borders = Borders {
            left: self.backend.create_rect(node, color),
            top: self.backend.create_rect(node, color),
            bottom: self.backend.create_rect(node, color),
            right: self.backend.create_rect(node, color),
        };
        let mut view = View::new(ViewKind::Toplevel, surface, node);
        view.borders = Some(borders);
        let id = self.views.insert(view);
        debug!("New toplevel {} for surface {:?}", id, surface);
        Ok(id)
    }

    /// Shows a toplevel on the current workspace of the output under the
    /// pointer and focuses it. Placement runs on the first map only.
    pub fn handle_map(&mut self, id: ViewId, app_id: Option<&str>, preferred: Size<i32>) -> Result<()> {
        let (node, mapped_once) = {
            let view = self.try_view_mut(id)?;
            if let Some(app_id) = app_id {
                view.app_id = Some(app_id.to_string());
            }
            (view.node, view.mapped_once)
        };
        if !self.try_view(id)?.is_toplevel() {
            self.backend.set_node_enabled(node, true);
            return Ok(());
        }

        let output = self
            .pointer_output()
            .or_else(|| self.outputs.first())
            .map(|o| (o.handle, o.area, o.current_workspace));
        let workspace = output.map_or(WorkspaceIndex::FIRST, |(_, _, ws)| ws);

        if !mapped_once {
            let (geometry, slot) = match output {
                Some((handle, area, _)) => self.place(id, handle, area, preferred)?,
                None => {
                    warn!("Mapping {} with no output; placing at the layout origin", id);
                    (Rect::from_parts(Point::new(0, 0), preferred), None)
                }
            };
            let view = self.try_view_mut(id)?;
            view.slot = slot;
            view.mapped_once = true;
            self.apply_geometry(id, geometry)?;
        }

        self.workspaces.insert(workspace, id);
        self.backend.set_node_enabled(node, true);
        info!("Mapped {} on workspace {}", id, workspace);
        self.focus(Some(id))
    }

    /// Initial geometry: a free terminal slot of `output`, or centered.
    fn place(
        &self,
        id: ViewId,
        output: OutputHandle,
        area: Rect,
        preferred: Size<i32>,
    ) -> Result<(Rect, Option<SlotIndex>)> {
        let is_terminal = self
            .try_view(id)?
            .app_id
            .as_deref()
            .is_some_and(|app_id| self.settings.is_terminal(app_id));
        if is_terminal {
            let free = self
                .slots
                .slots_for(output)
                .into_iter()
                .find(|(_, rect)| !self.is_view_at(rect.origin()));
            match free {
                Some((index, rect)) => {
                    debug!("Placing {} in slot {}", id, index);
                    return Ok((rect, Some(index)));
                }
                None => debug!("No free slot for {}; centering", id),
            }
        }
        Ok((area.center_of(preferred), None))
    }

    fn is_view_at(&self, point: Point<i32>) -> bool {
        self.backend
            .node_at(point.to_f64())
            .and_then(|hit| self.views.by_node(hit.node))
            .is_some()
    }

    /// Hides a view and removes it from its workspace. The view stays
    /// registered until destroyed.
    pub fn handle_unmap(&mut self, id: ViewId) -> Result<()> {
        let node = self.try_view(id)?.node;
        self.workspaces.remove(id);
        self.cursor.release_view(id);
        self.clear_focus_of(id);
        self.backend.set_node_enabled(node, false);
        debug!("Unmapped {}", id);
        Ok(())
    }

    pub fn handle_destroy(&mut self, id: ViewId) -> Result<()> {
        self.try_view(id)?;
        self.workspaces.remove(id);
        self.cursor.release_view(id);
        self.clear_focus_of(id);
        self.lock.remove_surface(id);
        let view = self.views.remove(id)?;
        self.backend.destroy_node(view.node);
        debug!("Destroyed {}", id);
        Ok(())
    }

    /// Resolves the view for a backend surface.
    pub fn view_for_surface(&self, surface: SurfaceHandle) -> Result<ViewId> {
        self.views
            .by_surface(surface)
            .ok_or_else(|| contract_violation(StageError::UnknownSurface(surface)))
    }

    /// Moves and resizes a toplevel together with its borders.
    pub fn apply_geometry(&mut self, id: ViewId, geometry: Rect) -> Result<()> {
        let view = self.try_view_mut(id)?;
        view.geometry = geometry;
        let (node, surface, borders) = (view.node, view.surface, view.borders);

        self.backend.set_node_position(node, geometry.origin());
        self.backend.configure_toplevel(surface, geometry.size());
        if let Some(borders) = borders {
            for (rect_node, rect) in borders.nodes().into_iter().zip(border_layout(geometry.size())) {
                self.backend.set_node_position(rect_node, rect.origin());
                self.backend.set_rect_size(rect_node, rect.size());
            }
        }
        Ok(())
    }

    /// Toggles the focused toplevel between its geometry and the full area
    /// of its output.
    pub fn toggle_maximize(&mut self) -> Result<()> {
        self.toggle_fill(false)
    }

    /// Toggles the focused toplevel between its geometry and the full height
    /// of its output, keeping x and width.
    pub fn toggle_max_vertical(&mut self) -> Result<()> {
        self.toggle_fill(true)
    }

    fn toggle_fill(&mut self, vertical: bool) -> Result<()> {
        let Some(id) = self.focused_toplevel() else {
            debug!("No focused toplevel to maximize");
            return Ok(());
        };
        let geometry = self.try_view(id)?.geometry;
        let area = self
            .outputs
            .output_at(geometry.origin().to_f64())
            .or_else(|| self.pointer_output())
            .map(|o| o.area);

        let view = self.try_view_mut(id)?;
        let saved = if vertical {
            &mut view.saved_max_vertical
        } else {
            &mut view.saved_maximize
        };
        if let Some(restore) = saved.take() {
            return self.apply_geometry(id, restore);
        }
        let Some(area) = area else {
            warn!("No output for {}; not maximizing", id);
            return Ok(());
        };
        *saved = Some(geometry);
        let target = if vertical {
            Rect::new(geometry.x, area.y, geometry.width, area.height)
        } else {
            area
        };
        let node = view.node;
        self.apply_geometry(id, target)?;
        self.backend.raise_to_top(node);
        Ok(())
    }

    /// Places a new layer-shell surface on `output`, or on the output under
    /// the pointer.
    pub fn handle_new_layer_surface(
        &mut self,
        surface: SurfaceHandle,
        output: Option<OutputHandle>,
    ) -> Result<()> {
        let node = self.backend.create_layer_node(surface);
        let target = output
            .and_then(|o| self.outputs.get(o))
            .or_else(|| self.pointer_output())
            .map(|o| (o.handle, o.area));
        match target {
            Some((handle, area)) => {
                self.backend.set_node_position(node, area.origin());
                self.backend.configure_layer_surface(surface, handle, LAYER_SURFACE_SIZE);
            }
            None => warn!("No output for layer surface {:?}; leaving it unconfigured", surface),
        }
        self.layer_surfaces.insert(
            surface,
            LayerSurface {
                node,
                output: target.map(|(handle, _)| handle),
            },
        );
        Ok(())
    }

    pub fn handle_layer_surface_destroyed(&mut self, surface: SurfaceHandle) -> Result<()> {
        let layer = self
            .layer_surfaces
            .remove(&surface)
            .ok_or_else(|| contract_violation(StageError::UnknownSurface(surface)))?;
        self.backend.destroy_node(layer.node);
        Ok(())
    }

    /// A client asked to set its own cursor image; the default one is used.
    pub fn handle_cursor_request(&mut self) {
        self.backend.set_cursor_image("left_ptr");
    }
}
