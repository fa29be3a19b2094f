//! Browser collaborators (DOM overlay)

use web_sys::Document;

use super::GameOverScreen;

/// Game-over overlay backed by the `#game-over` element in index.html.
///
/// The `#restart-btn` inside it is bound once at startup, so showing the
/// overlay is all it takes to surface the restart control.
pub struct DomGameOver {
    document: Document,
}

impl DomGameOver {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl GameOverScreen for DomGameOver {
    fn show(&mut self, score: u32) {
        if let Some(score_el) = self.document.get_element_by_id("final-score") {
            score_el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = self.document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "");
        }
    }

    fn dismiss(&mut self) {
        if let Some(el) = self.document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "hidden");
        }
    }
}
