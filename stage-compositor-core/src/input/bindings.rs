//! Key binding classification.
//!
//! [`KeyBindings::classify`] is pure: it maps the first keysym of a press and
//! the effective modifier mask to a [`Binding`], or `None` when the key must
//! reach the focused client.

use super::ModifierMask;
use crate::actions::DetachedAction;
use crate::ids::WorkspaceIndex;
use std::collections::HashMap;
use tracing::warn;
use xkeysym::Keysym;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    SwitchWorkspace(WorkspaceIndex),
    ToggleMaxVertical,
    ToggleMaximize,
    /// Switch between keyboard layouts 0 and 1.
    ToggleLayout,
    Spawn(DetachedAction),
    /// Consumed without any effect.
    Swallow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    primary: ModifierMask,
    terminal: DetachedAction,
    helpers: HashMap<Keysym, DetachedAction>,
}

impl KeyBindings {
    /// `helpers` maps single-letter key names to program-then-arguments.
    pub fn new<'a, I>(primary: ModifierMask, terminal: &str, helpers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut table = HashMap::new();
        for (key, argv) in helpers {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                warn!("Ignoring helper binding with key '{}'", key);
                continue;
            };
            match DetachedAction::from_argv(argv) {
                Some(action) => {
                    table.insert(Keysym::from_char(c), action);
                }
                None => warn!("Ignoring helper binding '{}' without a command", key),
            }
        }
        KeyBindings {
            primary,
            terminal: DetachedAction::shell(terminal),
            helpers: table,
        }
    }

    pub fn primary(&self) -> ModifierMask {
        self.primary
    }

    pub fn classify(&self, sym: Keysym, mods: ModifierMask, locked: bool) -> Option<Binding> {
        if mods == ModifierMask::CTRL {
            return (sym == Keysym::Return).then_some(Binding::Swallow);
        }
        if mods == self.primary {
            if locked {
                return None;
            }
            return self.classify_primary(sym);
        }
        if mods.is_empty() {
            if sym == Keysym::Alt_R {
                return Some(Binding::ToggleLayout);
            }
            if sym == Keysym::Super_R {
                return Some(Binding::Swallow);
            }
        }
        None
    }

    fn classify_primary(&self, sym: Keysym) -> Option<Binding> {
        if let Some(ws) = workspace_for_digit(sym) {
            return Some(Binding::SwitchWorkspace(ws));
        }
        let binding = if sym == Keysym::m {
            Binding::ToggleMaxVertical
        } else if sym == Keysym::f {
            Binding::ToggleMaximize
        } else if sym == Keysym::minus {
            Binding::Swallow
        } else if sym == Keysym::Return {
            Binding::Spawn(self.terminal.clone())
        } else {
            return self.helpers.get(&sym).cloned().map(Binding::Spawn);
        };
        Some(binding)
    }
}

fn workspace_for_digit(sym: Keysym) -> Option<WorkspaceIndex> {
    let raw = sym.raw();
    if (Keysym::_0.raw()..=Keysym::_9.raw()).contains(&raw) {
        WorkspaceIndex::new((raw - Keysym::_0.raw()) as usize).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bindings() -> KeyBindings {
        let lights = vec!["stage-lights".to_string(), "2".to_string()];
        KeyBindings::new(
            ModifierMask::LOGO,
            "foot",
            [("e", lights.as_slice())],
        )
    }

    fn ws(i: usize) -> Binding {
        Binding::SwitchWorkspace(WorkspaceIndex::new(i).unwrap())
    }

    #[rstest]
    #[case(Keysym::_0, ModifierMask::LOGO, Some(ws(0)))]
    #[case(Keysym::_7, ModifierMask::LOGO, Some(ws(7)))]
    #[case(Keysym::m, ModifierMask::LOGO, Some(Binding::ToggleMaxVertical))]
    #[case(Keysym::f, ModifierMask::LOGO, Some(Binding::ToggleMaximize))]
    #[case(Keysym::minus, ModifierMask::LOGO, Some(Binding::Swallow))]
    #[case(Keysym::Return, ModifierMask::LOGO, Some(Binding::Spawn(DetachedAction::shell("foot"))))]
    #[case(Keysym::e, ModifierMask::LOGO, Some(Binding::Spawn(DetachedAction::new("stage-lights", vec!["2".into()]))))]
    #[case(Keysym::x, ModifierMask::LOGO, None)]
    #[case(Keysym::Return, ModifierMask::CTRL, Some(Binding::Swallow))]
    #[case(Keysym::c, ModifierMask::CTRL, None)]
    #[case(Keysym::Alt_R, ModifierMask::empty(), Some(Binding::ToggleLayout))]
    #[case(Keysym::Super_R, ModifierMask::empty(), Some(Binding::Swallow))]
    #[case(Keysym::_1, ModifierMask::empty(), None)]
    #[case(Keysym::_1, ModifierMask::LOGO | ModifierMask::SHIFT, None)]
    fn classifies_unlocked(
        bindings: KeyBindings,
        #[case] sym: Keysym,
        #[case] mods: ModifierMask,
        #[case] expected: Option<Binding>,
    ) {
        assert_eq!(bindings.classify(sym, mods, false), expected);
    }

    #[rstest]
    #[case(Keysym::_3)]
    #[case(Keysym::m)]
    #[case(Keysym::f)]
    #[case(Keysym::Return)]
    #[case(Keysym::e)]
    fn primary_table_is_disabled_while_locked(bindings: KeyBindings, #[case] sym: Keysym) {
        assert_eq!(bindings.classify(sym, ModifierMask::LOGO, true), None);
    }

    #[rstest]
    fn layout_toggle_survives_lock(bindings: KeyBindings) {
        assert_eq!(
            bindings.classify(Keysym::Alt_R, ModifierMask::empty(), true),
            Some(Binding::ToggleLayout)
        );
    }

    #[test]
    fn malformed_helpers_are_skipped() {
        let empty: Vec<String> = Vec::new();
        let argv = vec!["x".to_string()];
        let bindings = KeyBindings::new(
            ModifierMask::ALT,
            "foot",
            [("ab", argv.as_slice()), ("z", empty.as_slice())],
        );
        assert_eq!(bindings.classify(Keysym::z, ModifierMask::ALT, false), None);
        assert_eq!(bindings.primary(), ModifierMask::ALT);
    }
}
