//! SectionMap: Diagram Label → Page Section Lookup
//!
//! Maps label substrings of rendered flowchart nodes to the anchors of the
//! content sections they describe. Lookup runs an Aho-Corasick automaton over
//! every label at once; when a node's text contains several labels, the link
//! listed first wins regardless of where the labels appear in the text.

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// One label → target pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLink {
    /// Substring expected somewhere in the rendered node text (case-sensitive)
    pub label: String,
    /// Page anchor, e.g. `#power-connection`
    pub target: String,
}

impl SectionLink {
    pub fn new(label: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            target: target.to_string(),
        }
    }
}

/// Labels of the boot-failure troubleshooting flowchart
const TROUBLESHOOTING_LINKS: &[(&str, &str)] = &[
    ("Check power connection", "#power-connection"),
    ("Reconnect power cable", "#reconnect-power"),
    ("Test different outlet", "#test-outlet"),
    ("Replace power supply", "#replace-psu"),
    ("Count beep pattern", "#beep-codes"),
    ("Look up beep code", "#lookup-beep"),
    ("Replace indicated component", "#replace-component"),
    ("Check internal connections", "#internal-connections"),
    ("Reseat RAM and cables", "#reseat-components"),
    ("Test different monitor", "#test-monitor"),
    ("Graphics card issue", "#graphics-issue"),
    ("Check boot device order", "#boot-order"),
    ("Run hardware diagnostics", "#hardware-diagnostics"),
    ("Boot from recovery media", "#recovery-media"),
    ("Repair or reinstall OS", "#repair-os"),
];

// =============================================================================
// SectionMap
// =============================================================================

/// Immutable, ordered label map
#[derive(Debug, Clone)]
pub struct SectionMap {
    links: Vec<SectionLink>,
    /// `None` only if the automaton failed to build; lookups then scan linearly
    automaton: Option<AhoCorasick>,
}

impl Default for SectionMap {
    fn default() -> Self {
        Self::troubleshooting()
    }
}

impl SectionMap {
    /// Build a map from links in priority order
    ///
    /// Empty labels are dropped: they would match every node.
    pub fn new(links: Vec<SectionLink>) -> Self {
        let links: Vec<SectionLink> = links
            .into_iter()
            .filter(|link| {
                if link.label.is_empty() {
                    tracing::warn!(anchor = %link.target, "dropping section link with empty label");
                    false
                } else {
                    true
                }
            })
            .collect();

        // Standard semantics are required for overlapping search
        let automaton = match AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(links.iter().map(|link| link.label.as_str()))
        {
            Ok(automaton) => Some(automaton),
            Err(e) => {
                tracing::warn!(error = %e, "label automaton build failed, using linear scan");
                None
            }
        };

        Self { links, automaton }
    }

    /// The built-in troubleshooting flowchart map
    pub fn troubleshooting() -> Self {
        Self::new(
            TROUBLESHOOTING_LINKS
                .iter()
                .map(|(label, target)| SectionLink::new(label, target))
                .collect(),
        )
    }

    /// Target of the first link whose label occurs in `text`
    pub fn find(&self, text: &str) -> Option<&str> {
        self.find_link(text).map(|link| link.target.as_str())
    }

    /// First link (in map order) whose label occurs in `text`
    pub fn find_link(&self, text: &str) -> Option<&SectionLink> {
        if text.is_empty() {
            return None;
        }

        let index = match &self.automaton {
            Some(automaton) => automaton
                .find_overlapping_iter(text)
                .map(|m| m.pattern().as_usize())
                .min(),
            None => self.links.iter().position(|link| text.contains(&link.label)),
        };

        index.and_then(|i| self.links.get(i))
    }

    pub fn links(&self) -> &[SectionLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
