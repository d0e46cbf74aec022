//! Session and slide schema definitions
//!
//! These types describe the slide deck a service runs from. The `content`
//! payload is tagged by slide type so a deck serializes to the same JSON the
//! companion devices consume.

use crate::utils::error::AppResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slide category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideType {
    Scripture,
    Lyrics,
    Media,
}

/// One page of a multi-page scripture slide
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScripturePage {
    pub id: Uuid,

    pub book: String,

    pub chapter: String,

    /// Verse range, e.g. "1-3"
    pub verses: String,

    /// Primary-language text
    pub text_primary: String,

    /// Secondary-language text
    pub text_secondary: String,
}

/// Kind of media a media slide points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

/// Type-specific slide payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideContent {
    #[serde(rename_all = "camelCase")]
    Scripture { pages: Vec<ScripturePage> },

    #[serde(rename_all = "camelCase")]
    Lyrics {
        title: String,
        lines: Vec<String>,
        /// Chord sheet shown only to the presenter
        chords: Option<String>,
        /// Backing track or recording
        audio_url: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    Media {
        url: String,
        media_type: MediaKind,
        is_loop: bool,
        is_auto_play: bool,
    },
}

impl SlideContent {
    /// Number of intra-slide pages. Only scripture content paginates.
    pub fn page_count(&self) -> usize {
        match self {
            SlideContent::Scripture { pages } => pages.len(),
            _ => 0,
        }
    }
}

/// A single slide in a session deck
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: Uuid,

    /// Position in the deck; always equals the array index after any edit
    pub order: usize,

    #[serde(rename = "type")]
    pub slide_type: SlideType,

    pub content: SlideContent,

    /// Private notes for the presenter
    pub notes: Option<String>,
}

impl Slide {
    pub fn new(slide_type: SlideType, content: SlideContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            order: 0,
            slide_type,
            content,
            notes: None,
        }
    }

    pub fn is_scripture(&self) -> bool {
        self.slide_type == SlideType::Scripture
    }
}

/// A service session: one titled deck of slides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub slides: Vec<Slide>,
}

impl Session {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date: Utc::now(),
            slides: Vec::new(),
        }
    }

    /// Append a slide at the end of the deck
    pub fn push_slide(&mut self, mut slide: Slide) -> Uuid {
        slide.order = self.slides.len();
        let id = slide.id;
        self.slides.push(slide);
        id
    }

    /// Remove a slide by id. Unknown ids are ignored.
    pub fn remove_slide(&mut self, id: Uuid) {
        self.slides.retain(|s| s.id != id);
        self.renumber();
    }

    /// Swap a slide with its predecessor
    pub fn move_slide_up(&mut self, index: usize) {
        if index > 0 && index < self.slides.len() {
            self.slides.swap(index - 1, index);
            self.renumber();
        }
    }

    /// Swap a slide with its successor
    pub fn move_slide_down(&mut self, index: usize) {
        if index + 1 < self.slides.len() {
            self.slides.swap(index, index + 1);
            self.renumber();
        }
    }

    /// Resolve a slide id to its deck index
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// Serialize the deck for hand-off to companion devices
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn renumber(&mut self) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.order = i;
        }
    }
}
