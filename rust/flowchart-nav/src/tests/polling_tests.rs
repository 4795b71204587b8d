use super::*;

use crate::binder::BinderState;
use crate::config::RendererOptions;

#[test]
fn test_initialize_configures_renderer() {
    let (page, _) = rendered_page(&["Check power connection"]);
    let (binder, renderer) = binder(&page);

    assert_eq!(binder.state(), BinderState::Uninitialized);
    binder.initialize();

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], RendererOptions::default());
    assert!(calls[0].start_on_load);
    assert_eq!(calls[0].security_level, "loose");
    assert!(calls[0].flowchart.html_labels);
    assert_eq!(binder.state(), BinderState::AwaitingRender);
    assert_eq!(page.pending_timers(), 2);
}

#[test]
fn test_initialize_twice_is_ignored() {
    let (page, _) = rendered_page(&["Check power connection"]);
    let (binder, renderer) = binder(&page);

    binder.initialize();
    binder.initialize();

    assert_eq!(renderer.calls.borrow().len(), 1);
    assert_eq!(page.pending_timers(), 2);
}

#[test]
fn test_nodes_bound_after_first_delay() {
    let (page, flowchart) = rendered_page(&["Check power connection", "Run hardware diagnostics"]);
    let (binder, _) = binder(&page);
    binder.initialize();

    page.advance(1999);
    assert_eq!(nodes(&flowchart, &page)[0].listener_count(), 0);

    page.advance(1);
    assert_eq!(binder.state(), BinderState::Bound);
    assert!(nodes(&flowchart, &page).iter().all(|n| n.listener_count() == 1));

    // Verification finds bound nodes and schedules nothing
    page.advance(2000);
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn test_absent_container_retries_once() {
    let page = FakePage::new();
    add_sections(&page);
    let (binder, _) = binder(&page);
    binder.initialize();

    page.advance(2000);
    assert!(binder.enumerate_nodes().is_empty());
    assert_eq!(binder.state(), BinderState::AwaitingRender);

    // Verification at 4000 schedules the retry
    page.advance(2000);
    assert_eq!(page.pending_timers(), 1);
    assert_eq!(binder.state(), BinderState::AwaitingRender);

    // Mermaid finally renders before the retry fires
    let flowchart = page.body().append(container());
    let node = flowchart.append(html_node("Check internal connections"));

    page.advance(2000);
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(node.listener_count(), 1);
    assert_eq!(page.pending_timers(), 0);

    page.click(&node);
    assert_eq!(page.scrolled_ids(), vec!["internal-connections"]);
}

#[test]
fn test_never_rendered_degrades() {
    let page = FakePage::new();
    add_sections(&page);
    let (binder, _) = binder(&page);
    binder.initialize();

    page.advance(6000);
    assert_eq!(binder.state(), BinderState::Degraded);
    assert_eq!(page.pending_timers(), 0);

    // Bounded: no further attempts
    page.advance(60_000);
    assert_eq!(binder.state(), BinderState::Degraded);
}

#[test]
fn test_unmatched_diagram_degrades() {
    let (page, flowchart) = rendered_page(&["Start", "End"]);
    let (binder, _) = binder(&page);
    binder.initialize();

    page.advance(6000);
    assert_eq!(binder.state(), BinderState::Degraded);
    assert!(nodes(&flowchart, &page).iter().all(|n| n.listener_count() == 0));
}

#[test]
fn test_text_only_diagram_binds_in_cycle() {
    let page = FakePage::new();
    let flowchart = page.body().append(container());
    let label_group = flowchart.append(
        FakeNode::new("g").child(FakeNode::new("text").with_text("Graphics card issue")),
    );
    add_sections(&page);
    let (binder, _) = binder(&page);
    binder.initialize();

    page.advance(2000);
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(label_group.listener_count(), 1);

    page.advance(4000);
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn test_renderer_failure_still_polls() {
    let (page, flowchart) = rendered_page(&["Replace indicated component"]);
    let renderer = RecordingRenderer {
        fail: true,
        ..Default::default()
    };
    let binder = NavigationBinder::new(
        Rc::clone(&page),
        Box::new(renderer.clone()),
        SectionMap::troubleshooting(),
        BinderConfig::default(),
    );

    binder.initialize();
    assert_eq!(renderer.calls.borrow().len(), 1);

    page.advance(2000);
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(nodes(&flowchart, &page)[0].listener_count(), 1);
}

#[test]
fn test_attach_waits_for_document_ready() {
    let page = FakePage::loading();
    let flowchart = page.body().append(container());
    flowchart.append(html_node("Count beep pattern"));
    add_sections(&page);
    let (binder, renderer) = binder(&page);

    binder.attach();
    assert_eq!(binder.state(), BinderState::Uninitialized);
    assert!(renderer.calls.borrow().is_empty());

    page.fire_ready();
    assert_eq!(binder.state(), BinderState::AwaitingRender);
    assert_eq!(renderer.calls.borrow().len(), 1);

    page.advance(2000);
    assert_eq!(binder.state(), BinderState::Bound);
}

#[test]
fn test_attach_on_parsed_document_initializes_immediately() {
    let (page, _) = rendered_page(&["Count beep pattern"]);
    let (binder, renderer) = binder(&page);

    binder.attach();
    assert_eq!(binder.state(), BinderState::AwaitingRender);
    assert_eq!(renderer.calls.borrow().len(), 1);
}

#[test]
fn test_visible_with_intact_bindings_does_nothing() {
    let (page, _) = rendered_page(&["Test different outlet"]);
    let (binder, _) = binder(&page);
    binder.attach();
    page.advance(4000);
    assert_eq!(binder.state(), BinderState::Bound);

    page.become_visible();
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn test_rearm_after_rerender() {
    let (page, flowchart) = rendered_page(&["Test different outlet"]);
    let (binder, renderer) = binder(&page);
    binder.attach();
    page.advance(4000);
    assert_eq!(binder.state(), BinderState::Bound);

    // Re-rendered while the tab was in the background
    flowchart.remove_children();
    let fresh = flowchart.append(html_node("Test different outlet"));

    page.become_visible();
    assert_eq!(binder.state(), BinderState::AwaitingRender);
    assert_eq!(fresh.listener_count(), 0);

    page.advance(2000);
    assert_eq!(fresh.listener_count(), 1);
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(binder.debug_report().bound_nodes, 1);

    // Renderer is configured once per page, not per re-arm
    assert_eq!(renderer.calls.borrow().len(), 1);

    page.click(&fresh);
    assert_eq!(page.scrolled_ids(), vec!["test-outlet"]);
}

#[test]
fn test_rearm_from_degraded() {
    let page = FakePage::new();
    add_sections(&page);
    let (binder, _) = binder(&page);
    binder.attach();
    page.advance(6000);
    assert_eq!(binder.state(), BinderState::Degraded);

    let flowchart = page.body().append(container());
    let node = flowchart.append(html_node("Boot from recovery media"));

    page.become_visible();
    page.advance(2000);
    assert_eq!(binder.state(), BinderState::Bound);
    assert_eq!(node.listener_count(), 1);
}

#[test]
fn test_visible_during_polling_does_not_stack_cycles() {
    let page = FakePage::new();
    let (binder, _) = binder(&page);
    binder.attach();
    assert_eq!(page.pending_timers(), 2);

    page.become_visible();
    page.become_visible();
    assert_eq!(page.pending_timers(), 2);
}

#[test]
fn test_dropped_binder_turns_timers_into_noops() {
    let (page, flowchart) = rendered_page(&["Check boot device order"]);
    let (binder, _) = binder(&page);
    binder.initialize();
    drop(binder);

    page.advance(6000);
    assert_eq!(nodes(&flowchart, &page)[0].listener_count(), 0);
    assert_eq!(page.pending_timers(), 0);
}
