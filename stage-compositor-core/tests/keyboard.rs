mod common;

use common::{key, stage_with_output, KEYBOARD};
use pretty_assertions::assert_eq;
use rstest::rstest;
use stage_compositor_core::input::{KeyState, ModifierMask};
use stage_compositor_core::{BackendCall, DetachedAction, InputDevice, KeyDispatch, KeyboardHandle, LockHandle};
use stage_core::Size;
use xkeysym::Keysym;

#[rstest]
#[case(Keysym::_4)]
#[case(Keysym::m)]
#[case(Keysym::f)]
#[case(Keysym::Return)]
#[case(Keysym::q)]
#[case(Keysym::minus)]
fn primary_keys_are_forwarded_while_locked(#[case] sym: Keysym) {
    let mut h = stage_with_output(1920, 1080);
    let id = h.map(1, "firefox", Size::new(800, 600));
    let before = h.stage.view(id).unwrap().geometry;
    h.stage.handle_new_lock(LockHandle(1));

    assert_eq!(h.press(sym, ModifierMask::LOGO), KeyDispatch::Forwarded);
    assert_eq!(h.stage.view(id).unwrap().geometry, before);
    assert!(h.sent.borrow().is_empty());
    assert!(h.calls().iter().any(|c| matches!(c, BackendCall::KeyboardKey(_))));
}

#[test]
fn return_spawns_the_terminal_through_the_shell() {
    let mut h = stage_with_output(1920, 1080);
    assert_eq!(
        h.press(Keysym::Return, ModifierMask::LOGO),
        KeyDispatch::Spawn(DetachedAction::shell("foot"))
    );
    assert_eq!(h.count_calls(|c| matches!(c, BackendCall::KeyboardKey(_))), 0);
}

#[rstest]
#[case(Keysym::q, "stage-lights", "0")]
#[case(Keysym::r, "stage-lights", "3")]
#[case(Keysym::a, "stage-display-mode", "0")]
#[case(Keysym::s, "stage-display-mode", "1")]
fn helper_keys_spawn_helpers(#[case] sym: Keysym, #[case] program: &str, #[case] arg: &str) {
    let mut h = stage_with_output(1920, 1080);
    assert_eq!(
        h.press(sym, ModifierMask::LOGO),
        KeyDispatch::Spawn(DetachedAction::new(program, vec![arg.to_string()]))
    );
}

#[test]
fn ctrl_return_is_swallowed() {
    let mut h = stage_with_output(1920, 1080);
    assert_eq!(h.press(Keysym::Return, ModifierMask::CTRL), KeyDispatch::Handled);
    assert_eq!(h.press(Keysym::c, ModifierMask::CTRL), KeyDispatch::Forwarded);
}

#[test]
fn unbound_keys_reach_the_client() {
    let mut h = stage_with_output(1920, 1080);
    h.map(1, "firefox", Size::new(800, 600));
    h.stage.backend_mut().take_calls();

    let event = key(Keysym::a, KeyState::Pressed);
    assert_eq!(h.stage.handle_key(&event).unwrap(), KeyDispatch::Forwarded);
    assert_eq!(h.calls(), &[BackendCall::KeyboardKey(event)]);
}

#[test]
fn releases_and_empty_keys_are_forwarded() {
    let mut h = stage_with_output(1920, 1080);
    h.set_modifiers(ModifierMask::LOGO);
    let release = key(Keysym::_2, KeyState::Released);
    assert_eq!(h.stage.handle_key(&release).unwrap(), KeyDispatch::Forwarded);

    let mut empty = key(Keysym::_2, KeyState::Pressed);
    empty.syms.clear();
    assert_eq!(h.stage.handle_key(&empty).unwrap(), KeyDispatch::Forwarded);
    assert!(h.sent.borrow().is_empty());
}

#[test]
fn right_alt_toggles_layout_on_every_keyboard() {
    let mut h = stage_with_output(1920, 1080);
    let second = KeyboardHandle(2);
    h.stage.handle_new_input(InputDevice::Keyboard(second));
    h.stage.backend_mut().take_calls();

    assert_eq!(h.press(Keysym::Alt_R, ModifierMask::empty()), KeyDispatch::Handled);
    assert_eq!(h.stage.keyboard_layout(), 1);
    for keyboard in [KEYBOARD, second] {
        assert!(h.calls().contains(&BackendCall::KeyboardLayout { keyboard, layout: 1 }));
    }

    h.press(Keysym::Alt_R, ModifierMask::empty());
    assert_eq!(h.stage.keyboard_layout(), 0);
    assert_eq!(h.stage.modifiers().group, 0);
}

#[test]
fn right_super_is_swallowed() {
    let mut h = stage_with_output(1920, 1080);
    assert_eq!(h.press(Keysym::Super_R, ModifierMask::empty()), KeyDispatch::Handled);
}

#[test]
fn new_keyboards_get_keymap_and_current_layout() {
    let mut h = stage_with_output(1920, 1080);
    h.stage.toggle_layout();
    h.stage.backend_mut().take_calls();

    let kb = KeyboardHandle(7);
    h.stage.handle_new_input(InputDevice::Keyboard(kb));
    let keymap = h.stage.settings().keymap.clone();
    assert_eq!(keymap.layouts, "us,ru");
    assert!(h.calls().contains(&BackendCall::KeyboardConfigured { keyboard: kb, keymap }));
    assert!(h.calls().contains(&BackendCall::KeyboardLayout { keyboard: kb, layout: 1 }));
    assert_eq!(h.stage.keyboards().len(), 2);

    h.stage.handle_input_removed(InputDevice::Keyboard(kb));
    h.stage.handle_input_removed(InputDevice::Keyboard(KEYBOARD));
    assert!(h.stage.keyboards().is_empty());
}

#[test]
fn dev_mode_uses_alt_as_primary() {
    let settings = stage_compositor_core::StageSettings::new(&stage_core::StageConfig::default(), true)
        .unwrap();
    assert_eq!(settings.bindings.primary(), ModifierMask::ALT);
}

#[test]
fn super_alias_selects_the_logo_modifier() {
    let mut config = stage_core::StageConfig::default();
    config.bindings.primary_modifier = "super".to_string();
    let settings = stage_compositor_core::StageSettings::new(&config, false).unwrap();
    assert_eq!(settings.bindings.primary(), ModifierMask::LOGO);
}

#[test]
fn oversized_terminal_slot_is_a_config_error() {
    let mut config = stage_core::StageConfig::default();
    config.placement.terminal_font_width = 100_000;
    config.placement.terminal_columns = 100_000;
    let result = stage_compositor_core::StageSettings::new(&config, false);
    assert!(matches!(
        result,
        Err(stage_compositor_core::StageError::Config(_))
    ));
}
