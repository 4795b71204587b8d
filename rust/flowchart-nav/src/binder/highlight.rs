use std::rc::Rc;

use crate::config::StyleDecl;
use crate::surface::Surface;

use super::NavigationBinder;

const TRANSITION: &str = "transition";

/// A section wearing the highlight, with its pre-highlight styling
///
/// The entry lives until the `transition` declaration has been restored,
/// which happens `settle_ms` after the last pending revert.
pub(crate) struct ActiveHighlight<N> {
    node: N,
    original: Rc<Vec<StyleDecl>>,
    pending_reverts: usize,
}

impl<S: Surface> NavigationBinder<S> {
    /// Apply the highlight styles now and restore the original inline values
    /// after `highlight.duration_ms`
    ///
    /// The revert is never cancelled. Overlapping highlights of one element
    /// share the snapshot taken by the first, so every revert restores the
    /// styling the element had before any highlight.
    pub fn highlight(self: &Rc<Self>, section: &S::Node) {
        let original = self.snapshot(section);

        for decl in &self.config.highlight.styles {
            self.surface
                .set_style_property(section, &decl.property, &decl.value);
        }

        // Strong reference: the section must revert even if the binder is
        // dropped in the meantime
        let binder = Rc::clone(self);
        let node = section.clone();
        self.surface.schedule(
            self.config.highlight.duration_ms,
            Box::new(move || binder.revert(&node, &original)),
        );
    }

    fn snapshot(&self, section: &S::Node) -> Rc<Vec<StyleDecl>> {
        let mut active = self.highlights.borrow_mut();
        if let Some(existing) = active
            .iter_mut()
            .find(|h| self.surface.same_node(&h.node, section))
        {
            existing.pending_reverts += 1;
            return Rc::clone(&existing.original);
        }

        let original: Rc<Vec<StyleDecl>> = Rc::new(
            self.config
                .highlight
                .styles
                .iter()
                .map(|decl| StyleDecl {
                    property: decl.property.clone(),
                    value: self.surface.style_property(section, &decl.property),
                })
                .collect(),
        );
        active.push(ActiveHighlight {
            node: section.clone(),
            original: Rc::clone(&original),
            pending_reverts: 1,
        });
        original
    }

    /// Restore everything but `transition`, which stays so the change animates
    fn revert(self: &Rc<Self>, section: &S::Node, original: &Rc<Vec<StyleDecl>>) {
        for decl in original.iter().filter(|d| d.property != TRANSITION) {
            self.surface
                .set_style_property(section, &decl.property, &decl.value);
        }
        if let Some(entry) = self
            .highlights
            .borrow_mut()
            .iter_mut()
            .find(|h| self.surface.same_node(&h.node, section))
        {
            entry.pending_reverts = entry.pending_reverts.saturating_sub(1);
        }
        tracing::debug!("section highlight reverted");

        let binder = Rc::clone(self);
        let node = section.clone();
        let original = Rc::clone(original);
        self.surface.schedule(
            self.config.highlight.settle_ms,
            Box::new(move || binder.settle_transition(&node, &original)),
        );
    }

    fn settle_transition(&self, section: &S::Node, original: &[StyleDecl]) {
        let mut active = self.highlights.borrow_mut();
        let Some(index) = active
            .iter()
            .position(|h| self.surface.same_node(&h.node, section))
        else {
            return;
        };
        // A newer highlight still owns the transition
        if active[index].pending_reverts > 0 {
            return;
        }
        active.remove(index);
        drop(active);

        for decl in original.iter().filter(|d| d.property == TRANSITION) {
            self.surface
                .set_style_property(section, &decl.property, &decl.value);
        }
    }

    /// Number of sections still waiting for their revert
    pub fn active_highlights(&self) -> usize {
        self.highlights
            .borrow()
            .iter()
            .filter(|h| h.pending_reverts > 0)
            .count()
    }
}
