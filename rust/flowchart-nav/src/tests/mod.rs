
mod polling_tests;

use std::rc::Rc;

use crate::binder::NavigationBinder;
use crate::config::BinderConfig;
use crate::sections::SectionMap;

use fake_page::{FakeNode, FakePage, RecordingRenderer};

/// `g.node > foreignObject > div > span` as Mermaid emits with HTML labels
fn html_node(label: &str) -> FakeNode {
    FakeNode::new("g").with_class("node").child(
        FakeNode::new("foreignObject")
            .child(FakeNode::new("div").child(FakeNode::new("span").with_text(label))),
    )
}

/// `g.node > text` as Mermaid emits without HTML labels
fn svg_node(label: &str) -> FakeNode {
    FakeNode::new("g")
        .with_class("node")
        .child(FakeNode::new("rect"))
        .child(FakeNode::new("text").with_text(label))
}

fn container() -> FakeNode {
    FakeNode::new("div").with_id("troubleshoot-flowchart")
}

/// One section per built-in target
fn add_sections(page: &FakePage) {
    for link in SectionMap::troubleshooting().links() {
        let id = link.target.trim_start_matches('#');
        page.body()
            .append(FakeNode::new("section").with_id(id).with_text(&link.label));
    }
}

/// Page with sections and a rendered flowchart of HTML-label nodes
fn rendered_page(labels: &[&str]) -> (Rc<FakePage>, FakeNode) {
    let page = FakePage::new();
    let flowchart = page.body().append(container());
    for label in labels {
        flowchart.append(html_node(label));
    }
    add_sections(&page);
    (page, flowchart)
}

fn binder_with(
    page: &Rc<FakePage>,
    sections: SectionMap,
) -> (Rc<NavigationBinder<FakePage>>, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let binder = NavigationBinder::new(
        Rc::clone(page),
        Box::new(renderer.clone()),
        sections,
        BinderConfig::default(),
    );
    (binder, renderer)
}

fn binder(page: &Rc<FakePage>) -> (Rc<NavigationBinder<FakePage>>, RecordingRenderer) {
    binder_with(page, SectionMap::troubleshooting())
}

/// All `.node` children of the flowchart, in order
fn nodes(flowchart: &FakeNode, page: &FakePage) -> Vec<FakeNode> {
    use crate::surface::Surface;
    page.query_all_within(flowchart, ".node")
}
