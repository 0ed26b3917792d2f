mod common;

use common::{bare_stage, stage_with_output, OUTPUT};
use pretty_assertions::assert_eq;
use stage_compositor_core::{
    OutputHandle, StageError, StatusPublisher, SurfaceHandle, WorkspaceIndex,
    WorkspaceStatus,
};
use stage_core::{Point, Size};

fn ws(i: usize) -> WorkspaceIndex {
    WorkspaceIndex::new(i).unwrap()
}

#[test]
fn view_belongs_to_exactly_one_workspace_while_mapped() {
    let mut h = stage_with_output(1920, 1080);
    let id = h.stage.handle_new_toplevel(SurfaceHandle(1)).unwrap();
    assert_eq!(h.workspace_of(id), None);

    h.stage.handle_map(id, Some("firefox"), Size::new(800, 600)).unwrap();
    assert_eq!(h.workspace_of(id), Some(0));

    h.stage.handle_unmap(id).unwrap();
    assert_eq!(h.workspace_of(id), None);

    h.switch_to(3);
    h.stage.handle_map(id, Some("firefox"), Size::new(800, 600)).unwrap();
    assert_eq!(h.workspace_of(id), Some(3));
    let members: usize = WorkspaceIndex::all()
        .map(|w| h.stage.workspaces().get(w).views().filter(|v| *v == id).count())
        .sum();
    assert_eq!(members, 1);

    h.stage.handle_destroy(id).unwrap();
    assert_eq!(h.workspace_of(id), None);
    assert!(h.stage.view(id).is_none());
}

#[test]
fn switching_hides_old_views_and_shows_new_ones() {
    let mut h = stage_with_output(1920, 1080);
    let a = h.map(1, "firefox", Size::new(800, 600));
    h.switch_to(1);
    let b = h.map(2, "firefox", Size::new(800, 600));

    let node_a = h.stage.view(a).unwrap().node;
    let node_b = h.stage.view(b).unwrap().node;
    assert!(!h.stage.backend().node(node_a).unwrap().enabled);
    assert!(h.stage.backend().node(node_b).unwrap().enabled);

    h.switch_to(0);
    assert!(h.stage.backend().node(node_a).unwrap().enabled);
    assert!(!h.stage.backend().node(node_b).unwrap().enabled);
    assert_eq!(h.stage.outputs().get(OUTPUT).unwrap().current_workspace, ws(0));
}

#[test]
fn switching_back_restores_focus() {
    let mut h = stage_with_output(1920, 1080);
    let a = h.map(1, "firefox", Size::new(800, 600));
    h.switch_to(2);
    let b = h.map(2, "firefox", Size::new(800, 600));
    assert_eq!(h.stage.focus_state().activated, Some(b));

    h.switch_to(0);
    assert_eq!(h.stage.focus_state().activated, Some(a));
    assert_eq!(h.stage.focus_state().keyboard.map(|t| t.view), Some(a));

    h.switch_to(2);
    assert_eq!(h.stage.focus_state().activated, Some(b));
    assert_eq!(h.activated_count(), 1);
}

#[test]
fn switch_to_current_workspace_does_nothing() {
    let mut h = stage_with_output(1920, 1080);
    h.map(1, "firefox", Size::new(800, 600));
    h.switch_to(0);
    assert!(h.sent.borrow().is_empty());
}

#[test]
fn switch_publishes_occupancy() {
    let mut h = stage_with_output(1920, 1080);
    h.switch_to(5);
    h.map(1, "firefox", Size::new(800, 600));
    h.switch_to(2);
    h.map(2, "firefox", Size::new(800, 600));
    h.switch_to(5);

    assert_eq!(h.last_status().as_deref(), Some("?2!5"));
    let status = h.sent.borrow().last().cloned().unwrap();
    assert_eq!(
        WorkspaceStatus::from_wire(&status.to_datagram()).active(),
        Some(ws(5))
    );
}

mockall::mock! {
    Publisher {}
    impl StatusPublisher for Publisher {
        fn publish(&mut self, status: &WorkspaceStatus) -> stage_compositor_core::Result<()>;
    }
}

#[test]
fn failed_publish_does_not_block_switch() {
    let mut publisher = MockPublisher::new();
    publisher.expect_publish().times(1).returning(|_| {
        Err(StageError::Status(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "no listener",
        )))
    });

    let mut stage = stage_compositor_core::Stage::new(
        stage_compositor_core::HeadlessBackend::new(),
        common::settings(),
        Box::new(publisher),
    );
    stage.backend_mut().add_output(OUTPUT, vec![common::mode(800, 600)]);
    stage.handle_new_output(OUTPUT).unwrap();
    stage.switch_workspace(OUTPUT, ws(4)).unwrap();
    assert_eq!(stage.outputs().get(OUTPUT).unwrap().current_workspace, ws(4));
}

#[test]
fn switch_without_output_under_pointer_is_ignored() {
    let mut h = bare_stage();
    h.stage.switch_workspace_at_pointer(ws(3)).unwrap();
    assert!(h.sent.borrow().is_empty());

    let err = h.stage.switch_workspace(OutputHandle(9), ws(3)).unwrap_err();
    assert!(err.is_contract_violation());
}

#[test]
fn workspace_shown_on_another_output_stays_visible() {
    let mut h = stage_with_output(1920, 1080);
    let second = OutputHandle(2);
    h.stage.backend_mut().add_output(second, vec![common::mode(1920, 1080)]);
    h.stage.handle_new_output(second).unwrap();
    assert_eq!(
        h.stage.outputs().get(second).unwrap().area.origin(),
        Point::new(1920, 0)
    );

    let a = h.map(1, "firefox", Size::new(800, 600));
    let node = h.stage.view(a).unwrap().node;

    // Both outputs show workspace 0; switching the first one away keeps it.
    h.switch_to(1);
    assert!(h.stage.backend().node(node).unwrap().enabled);

    // Now the second output leaves it too.
    h.stage.switch_workspace(second, ws(2)).unwrap();
    assert!(!h.stage.backend().node(node).unwrap().enabled);

    h.switch_to(0);
    assert!(h.stage.backend().node(node).unwrap().enabled);
}
