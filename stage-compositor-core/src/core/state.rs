use crate::backend::{Backend, KeyboardHandle, OutputHandle, PointerHandle, SceneNodeId, SurfaceHandle};
use crate::decoration::DecorationColors;
use crate::error::{Result, StageError};
use crate::ids::ViewId;
use crate::input::bindings::KeyBindings;
use crate::input::cursor::Cursor;
use crate::input::{KeymapSettings, ModifierMask, ModifiersState};
use crate::ipc::{DatagramPublisher, StatusPublisher};
use crate::output::{Output, OutputSet};
use crate::session_lock::SessionLock;
use crate::slots::SlotTable;
use crate::view::{View, ViewRegistry};
use crate::workspace::WorkspaceSet;
use stage_core::{ConfigError, StageConfig};
use std::collections::HashMap;
use tracing::{error, info};

/// Environment variable that switches the primary modifier to the
/// development one.
pub const DEV_MODE_ENV: &str = "STAGE_DEV";

/// Runtime settings resolved once from a [`StageConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct StageSettings {
    pub bindings: KeyBindings,
    pub keymap: KeymapSettings,
    pub terminal_app_ids: Vec<String>,
    pub terminal_width: i32,
    pub colors: DecorationColors,
}

impl StageSettings {
    /// Resolves settings, honoring the `STAGE_DEV` environment variable.
    pub fn from_config(config: &StageConfig) -> Result<Self> {
        let dev_mode = std::env::var_os(DEV_MODE_ENV).is_some();
        Self::new(config, dev_mode)
    }

    pub fn new(config: &StageConfig, dev_mode: bool) -> Result<Self> {
        let bindings = &config.bindings;
        let modifier_name = if dev_mode {
            &bindings.dev_modifier
        } else {
            &bindings.primary_modifier
        };
        let primary: ModifierMask = modifier_name.parse()?;
        if dev_mode {
            info!("Development mode: primary modifier is '{}'", modifier_name);
        }
        let terminal_width = config.placement.checked_terminal_width().ok_or_else(|| {
            ConfigError::ValidationError("terminal slot width overflows".to_string())
        })?;
        let helpers = bindings
            .helpers
            .iter()
            .map(|h| (h.key.as_str(), h.command.as_slice()));

        Ok(StageSettings {
            bindings: KeyBindings::new(primary, &bindings.terminal, helpers),
            keymap: KeymapSettings {
                layouts: config.keyboard.layouts.clone(),
                repeat_rate: config.keyboard.repeat_rate,
                repeat_delay: config.keyboard.repeat_delay,
            },
            terminal_app_ids: config.placement.terminal_app_ids.clone(),
            terminal_width,
            colors: DecorationColors::from(&config.decoration),
        })
    }

    pub fn is_terminal(&self, app_id: &str) -> bool {
        self.terminal_app_ids.iter().any(|t| t == app_id)
    }
}

/// A surface and the view it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTarget {
    pub view: ViewId,
    pub surface: SurfaceHandle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    /// Holder of keyboard focus. Lock surfaces can hold it without being
    /// activated.
    pub keyboard: Option<FocusTarget>,
    /// The one toplevel drawn with the focused decoration.
    pub activated: Option<ViewId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSurface {
    pub node: SceneNodeId,
    pub output: Option<OutputHandle>,
}

pub struct Stage<B: Backend> {
    pub(crate) backend: B,
    pub(crate) settings: StageSettings,
    pub(crate) views: ViewRegistry,
    pub(crate) workspaces: WorkspaceSet,
    pub(crate) outputs: OutputSet,
    pub(crate) slots: SlotTable,
    pub(crate) cursor: Cursor,
    pub(crate) focus: FocusState,
    pub(crate) lock: SessionLock,
    pub(crate) keyboards: Vec<KeyboardHandle>,
    pub(crate) pointers: Vec<PointerHandle>,
    pub(crate) modifiers: ModifiersState,
    /// Active keyboard layout index, 0 or 1.
    pub(crate) layout: u32,
    pub(crate) layer_surfaces: HashMap<SurfaceHandle, LayerSurface>,
    pub(crate) publisher: Box<dyn StatusPublisher>,
}

impl<B: Backend> Stage<B> {
    pub fn new(backend: B, settings: StageSettings, publisher: Box<dyn StatusPublisher>) -> Self {
        Stage {
            backend,
            settings,
            views: ViewRegistry::new(),
            workspaces: WorkspaceSet::new(),
            outputs: OutputSet::new(),
            slots: SlotTable::new(),
            cursor: Cursor::new(),
            focus: FocusState::default(),
            lock: SessionLock::new(),
            keyboards: Vec::new(),
            pointers: Vec::new(),
            modifiers: ModifiersState::default(),
            layout: 0,
            layer_surfaces: HashMap::new(),
            publisher,
        }
    }

    /// Builds a stage publishing to the configured status socket.
    pub fn from_config(backend: B, config: &StageConfig) -> Result<Self> {
        let settings = StageSettings::from_config(config)?;
        let publisher = DatagramPublisher::new(config.ipc.status_socket.clone());
        info!("Publishing workspace status to {:?}", publisher.path());
        Ok(Stage::new(backend, settings, Box::new(publisher)))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn settings(&self) -> &StageSettings {
        &self.settings
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    pub fn workspaces(&self) -> &WorkspaceSet {
        &self.workspaces
    }

    pub fn outputs(&self) -> &OutputSet {
        &self.outputs
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn focus_state(&self) -> &FocusState {
        &self.focus
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn session_lock(&self) -> &SessionLock {
        &self.lock
    }

    pub fn keyboards(&self) -> &[KeyboardHandle] {
        &self.keyboards
    }

    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    pub fn keyboard_layout(&self) -> u32 {
        self.layout
    }

    pub fn layer_surface(&self, surface: SurfaceHandle) -> Option<&LayerSurface> {
        self.layer_surfaces.get(&surface)
    }

    /// The output under the pointer.
    pub fn pointer_output(&self) -> Option<&Output> {
        self.outputs.output_at(self.cursor.position)
    }

    pub(crate) fn try_view(&self, id: ViewId) -> Result<&View> {
        self.views.try_get(id).map_err(contract_violation)
    }

    pub(crate) fn try_view_mut(&mut self, id: ViewId) -> Result<&mut View> {
        self.views.try_get_mut(id).map_err(contract_violation)
    }
}

/// Logs an error the backend caused by breaking the event contract.
pub(crate) fn contract_violation(err: StageError) -> StageError {
    error!("Backend contract violation: {}", err);
    err
}
