//! Page model.
//!
//! A [`Page`] pairs the metadata the engine navigates by (key, position,
//! required flag, lifecycle state) with a boxed [`PageBehavior`] that
//! implements the concrete step.

mod behavior;

use serde::{Deserialize, Serialize};

use crate::flow::{ActivityOutcome, RequestCode};
use crate::ids::PageKey;
use crate::settings::{SettingsAccumulator, SettingsWriter};

pub use behavior::{PageAction, PageBehavior, PageInput};

/// Insertion-order rank used for default traversal.
pub type Position = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    NotLoaded,
    Loaded,
    Completed,
    Skipped,
}

pub struct Page {
    key: PageKey,
    position: Position,
    title: String,
    icon_ref: Option<String>,
    required: bool,
    state: PageState,
    behavior: Box<dyn PageBehavior>,
}

impl Page {
    pub fn new(
        key: impl Into<PageKey>,
        position: Position,
        behavior: impl PageBehavior + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            position,
            title: String::new(),
            icon_ref: None,
            required: false,
            state: PageState::NotLoaded,
            behavior: Box::new(behavior),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_icon(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = Some(icon_ref.into());
        self
    }

    /// Required pages are visited even when their predicate says skip.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn key(&self) -> &PageKey {
        &self.key
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon_ref(&self) -> Option<&str> {
        self.icon_ref.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn should_skip(&self) -> bool {
        self.behavior.should_skip()
    }

    pub fn is_eligible(&self) -> bool {
        self.required || !self.behavior.should_skip()
    }

    pub fn request_codes(&self) -> &[RequestCode] {
        self.behavior.request_codes()
    }

    pub fn load(&mut self, settings: &SettingsAccumulator) {
        self.behavior.on_load(settings);
        self.state = PageState::Loaded;
    }

    pub fn leave(&mut self, forward: bool, settings: &mut SettingsAccumulator) {
        self.behavior
            .on_leave(forward, &mut SettingsWriter::new(settings));
        self.state = if forward {
            PageState::Completed
        } else {
            PageState::NotLoaded
        };
    }

    pub fn input(&mut self, input: &PageInput) -> bool {
        self.behavior.on_input(input)
    }

    pub fn mark_skipped(&mut self) {
        self.state = PageState::Skipped;
    }

    pub fn deliver_result(
        &mut self,
        code: RequestCode,
        outcome: ActivityOutcome,
        settings: &mut SettingsAccumulator,
    ) -> PageAction {
        self.behavior
            .on_activity_result(code, outcome, &mut SettingsWriter::new(settings))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            key: self.key.clone(),
            position: self.position,
            title: self.title.clone(),
            icon_ref: self.icon_ref.clone(),
            required: self.required,
            state: self.state,
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("key", &self.key)
            .field("position", &self.position)
            .field("required", &self.required)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Owned view of a page handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub key: PageKey,
    pub position: Position,
    pub title: String,
    pub icon_ref: Option<String>,
    pub required: bool,
    pub state: PageState,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Toggle {
        skip: bool,
    }

    impl PageBehavior for Toggle {
        fn on_load(&mut self, _settings: &SettingsAccumulator) {}

        fn on_leave(&mut self, _forward: bool, settings: &mut SettingsWriter<'_>) {
            settings.put_bool("left", true);
        }

        fn should_skip(&self) -> bool {
            self.skip
        }
    }

    #[test]
    fn required_page_is_eligible_even_when_skipping() {
        let page = Page::new("p", 1, Toggle { skip: true }).required();
        assert!(page.should_skip());
        assert!(page.is_eligible());
    }

    #[test]
    fn lifecycle_updates_state() {
        let mut settings = SettingsAccumulator::new();
        let mut page = Page::new("p", 1, Toggle { skip: false });
        assert_eq!(page.state(), PageState::NotLoaded);

        page.load(&settings);
        assert_eq!(page.state(), PageState::Loaded);

        page.leave(true, &mut settings);
        assert_eq!(page.state(), PageState::Completed);
        assert_eq!(settings.get_bool("left"), Some(true));

        page.load(&settings);
        page.leave(false, &mut settings);
        assert_eq!(page.state(), PageState::NotLoaded);
    }

    #[test]
    fn snapshot_carries_display_metadata() {
        let page = Page::new("wifi", 3, Toggle { skip: false })
            .with_title("Wi-Fi")
            .with_icon("ic_wifi");
        let snapshot = page.snapshot();
        assert_eq!(snapshot.key.as_str(), "wifi");
        assert_eq!(snapshot.position, 3);
        assert_eq!(snapshot.title, "Wi-Fi");
        assert_eq!(snapshot.icon_ref.as_deref(), Some("ic_wifi"));
    }
}
