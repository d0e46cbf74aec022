//! Slide navigation
//!
//! Pure position machine over a slide deck. Positions are two-level:
//! the slide index plus an intra-slide page index that is only meaningful on
//! scripture slides. Every slide change, from any source, resets the page
//! index to 0.

use super::schema::Slide;
use serde::{Deserialize, Serialize};

/// Current navigation position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorPosition {
    pub slide_index: usize,
    pub page_index: usize,
}

impl Default for NavigatorPosition {
    fn default() -> Self {
        Self {
            slide_index: 0,
            page_index: 0,
        }
    }
}

/// Computes next/previous positions across a deck
#[derive(Debug, Default)]
pub struct SlideNavigator {
    position: NavigatorPosition,
}

impl SlideNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> NavigatorPosition {
        self.position
    }

    /// Advance one step: next page within a scripture slide, else next slide.
    /// No-op at the end of the deck. Returns true when the position changed.
    pub fn next(&mut self, slides: &[Slide]) -> bool {
        if let Some(slide) = slides.get(self.position.slide_index) {
            if slide.is_scripture() {
                let pages = slide.content.page_count();
                if pages > 0 && self.position.page_index < pages - 1 {
                    self.position.page_index += 1;
                    return true;
                }
            }
        }
        if self.position.slide_index + 1 < slides.len() {
            self.position.slide_index += 1;
            self.position.page_index = 0;
            return true;
        }
        false
    }

    /// Step back: previous page within a scripture slide, else previous
    /// slide. No-op at (0, 0). Returns true when the position changed.
    pub fn prev(&mut self, slides: &[Slide]) -> bool {
        if let Some(slide) = slides.get(self.position.slide_index) {
            if slide.is_scripture() && self.position.page_index > 0 {
                self.position.page_index -= 1;
                return true;
            }
        }
        if self.position.slide_index > 0 {
            self.position.slide_index -= 1;
            self.position.page_index = 0;
            return true;
        }
        false
    }

    /// Reposition to an arbitrary slide, resetting the page index.
    /// Out-of-range indices are ignored.
    pub fn jump_to(&mut self, slides: &[Slide], slide_index: usize) {
        if slide_index < slides.len() {
            self.position = NavigatorPosition {
                slide_index,
                page_index: 0,
            };
        }
    }

    /// Whether forward navigation is exhausted: on the last slide, and past
    /// the last page when that slide is scripture.
    pub fn at_end(&self, slides: &[Slide]) -> bool {
        if slides.is_empty() {
            return true;
        }
        if self.position.slide_index + 1 < slides.len() {
            return false;
        }
        match slides.get(self.position.slide_index) {
            Some(slide) if slide.is_scripture() => {
                let pages = slide.content.page_count();
                pages == 0 || self.position.page_index >= pages - 1
            }
            _ => true,
        }
    }

    /// Whether backward navigation is exhausted
    pub fn at_start(&self) -> bool {
        self.position.slide_index == 0 && self.position.page_index == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::schema::{ScripturePage, SlideContent, SlideType};
    use uuid::Uuid;

    fn scripture(pages: usize) -> Slide {
        let pages = (0..pages)
            .map(|i| ScripturePage {
                id: Uuid::new_v4(),
                book: "John".to_string(),
                chapter: "3".to_string(),
                verses: format!("{}", i + 1),
                text_primary: "primary".to_string(),
                text_secondary: "secondary".to_string(),
            })
            .collect();
        Slide::new(SlideType::Scripture, SlideContent::Scripture { pages })
    }

    fn lyrics() -> Slide {
        Slide::new(
            SlideType::Lyrics,
            SlideContent::Lyrics {
                title: "song".to_string(),
                lines: vec![],
                chords: None,
                audio_url: None,
            },
        )
    }

    fn pos(slide: usize, page: usize) -> NavigatorPosition {
        NavigatorPosition {
            slide_index: slide,
            page_index: page,
        }
    }

    #[test]
    fn next_walks_pages_then_slides() {
        let slides = vec![scripture(3), lyrics()];
        let mut nav = SlideNavigator::new();

        assert!(nav.next(&slides));
        assert_eq!(nav.position(), pos(0, 1));
        assert!(nav.next(&slides));
        assert_eq!(nav.position(), pos(0, 2));
        assert!(nav.next(&slides));
        assert_eq!(nav.position(), pos(1, 0));

        // Last slide, non-scripture: forward is a no-op.
        assert!(!nav.next(&slides));
        assert_eq!(nav.position(), pos(1, 0));
    }

    #[test]
    fn prev_mirrors_next() {
        let slides = vec![scripture(3), lyrics()];
        let mut nav = SlideNavigator::new();
        nav.jump_to(&slides, 1);

        assert!(nav.prev(&slides));
        // Slide change resets the page index, not to the last page.
        assert_eq!(nav.position(), pos(0, 0));

        assert!(!nav.prev(&slides));
        assert_eq!(nav.position(), pos(0, 0));
        assert!(nav.at_start());
    }

    #[test]
    fn prev_steps_back_through_pages() {
        let slides = vec![scripture(3)];
        let mut nav = SlideNavigator::new();
        nav.next(&slides);
        nav.next(&slides);

        assert!(nav.prev(&slides));
        assert_eq!(nav.position(), pos(0, 1));
        assert!(nav.prev(&slides));
        assert_eq!(nav.position(), pos(0, 0));
    }

    #[test]
    fn jump_resets_page_index() {
        let slides = vec![scripture(3), scripture(2)];
        let mut nav = SlideNavigator::new();
        nav.next(&slides);
        assert_eq!(nav.position(), pos(0, 1));

        nav.jump_to(&slides, 1);
        assert_eq!(nav.position(), pos(1, 0));

        // Out of range: ignored.
        nav.jump_to(&slides, 9);
        assert_eq!(nav.position(), pos(1, 0));
    }

    #[test]
    fn at_end_accounts_for_scripture_pages() {
        let slides = vec![lyrics(), scripture(2)];
        let mut nav = SlideNavigator::new();
        assert!(!nav.at_end(&slides));

        nav.jump_to(&slides, 1);
        assert!(!nav.at_end(&slides));

        nav.next(&slides);
        assert_eq!(nav.position(), pos(1, 1));
        assert!(nav.at_end(&slides));
    }

    #[test]
    fn empty_deck_is_both_ends() {
        let slides: Vec<Slide> = vec![];
        let mut nav = SlideNavigator::new();
        assert!(nav.at_end(&slides));
        assert!(nav.at_start());
        assert!(!nav.next(&slides));
        assert!(!nav.prev(&slides));
    }
}
