//! Text overlays: the `[data-fade]` elements of each `[data-section]`.

use crate::dom;
use helix_core::states::{section_index, SECTION_STATES};
use web_sys as web;

pub struct Overlay {
    fades: Vec<Vec<web::HtmlElement>>,
}

impl Overlay {
    /// Collect overlay elements, one list per section in state-table order.
    /// Sections missing from the page get an empty list.
    pub fn collect(document: &web::Document) -> Self {
        let mut fades = vec![Vec::new(); SECTION_STATES.len()];
        let Some(root) = document.document_element() else {
            return Self { fades };
        };
        for section in dom::query_all::<web::HtmlElement>(&root, "[data-section]") {
            let name = section.get_attribute("data-section").unwrap_or_default();
            let Some(index) = section_index(&name) else {
                log::warn!("[overlay] unknown section {name:?} ignored");
                continue;
            };
            fades[index] = dom::query_all::<web::HtmlElement>(&section, "[data-fade]");
        }
        for el in fades.iter().flatten() {
            dom::set_opacity(el, 0.0);
        }
        log::info!(
            "[overlay] sections={} elements={}",
            fades.iter().filter(|f| !f.is_empty()).count(),
            fades.iter().map(Vec::len).sum::<usize>()
        );
        Self { fades }
    }

    pub fn element_counts(&self) -> Vec<usize> {
        self.fades.iter().map(Vec::len).collect()
    }

    pub fn apply(&self, (section, element): (usize, usize), opacity: f32) {
        if let Some(el) = self.fades.get(section).and_then(|s| s.get(element)) {
            dom::set_opacity(el, opacity);
        }
    }
}
