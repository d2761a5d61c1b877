//! Tabs and sections: the form's layout groups.

use crate::capability::{CanSetVisible, Capabilities, Capable, IsTab, Narrowed};
use crate::collection::{ItemCollection, Named};
use crate::events::{EventKind, Evented, Handlers};
use crate::specifier::{Specifier, Target};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Expanded,
    Collapsed,
}

#[derive(Debug)]
struct SectionState {
    visible: bool,
    tab: Option<String>,
}

struct SectionInner {
    name: String,
    state: RefCell<SectionState>,
}

/// A handle to a section inside a tab.
#[derive(Clone)]
pub struct Section(Rc<SectionInner>);

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(SectionInner {
            name: name.into(),
            state: RefCell::new(SectionState {
                visible: true,
                tab: None,
            }),
        }))
    }

    pub fn is_visible(&self) -> bool {
        self.0.state.borrow().visible
    }

    /// Name of the owning tab, once the section has been added to one.
    pub fn tab(&self) -> Option<String> {
        self.0.state.borrow().tab.clone()
    }

    pub fn same(&self, other: &Section) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Named for Section {
    fn name(&self) -> &str {
        &self.0.name
    }
}

impl Capable for Section {
    fn capabilities(&self) -> Capabilities {
        Capabilities::SET_VISIBLE
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("Section")
            .field("name", &self.0.name)
            .field("tab", &state.tab)
            .field("visible", &state.visible)
            .finish()
    }
}

impl Narrowed<Section, CanSetVisible> {
    pub fn set_visible(&self, visible: bool) {
        self.0.state.borrow_mut().visible = visible;
    }
}

#[derive(Debug)]
struct TabState {
    visible: bool,
    display_state: DisplayState,
}

struct TabInner {
    name: String,
    state: RefCell<TabState>,
    sections: RefCell<ItemCollection<Section>>,
    handlers: Handlers,
}

/// A handle to a tab and its sections.
#[derive(Clone)]
pub struct Tab(Rc<TabInner>);

impl Tab {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(TabInner {
            name: name.into(),
            state: RefCell::new(TabState {
                visible: true,
                display_state: DisplayState::Expanded,
            }),
            sections: RefCell::new(ItemCollection::new()),
            handlers: Handlers::new(),
        }))
    }

    /// Adds a section and records this tab as its owner.
    pub fn with_section(self, section: Section) -> Self {
        section.0.state.borrow_mut().tab = Some(self.0.name.clone());
        self.0.sections.borrow_mut().push(section);
        self
    }

    pub fn sections(&self) -> ItemCollection<Section> {
        self.0.sections.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.0.state.borrow().visible
    }

    pub fn display_state(&self) -> DisplayState {
        self.0.state.borrow().display_state
    }

    pub fn same(&self, other: &Tab) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Named for Tab {
    fn name(&self) -> &str {
        &self.0.name
    }
}

impl Capable for Tab {
    fn capabilities(&self) -> Capabilities {
        Capabilities::SET_VISIBLE | Capabilities::TAB_STATE_CHANGE | Capabilities::SET_DISPLAY_STATE
    }
}

impl Evented for Tab {
    fn handlers(&self) -> &Handlers {
        &self.0.handlers
    }

    fn source_name(&self) -> &str {
        &self.0.name
    }
}

impl PartialEq for Tab {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("Tab")
            .field("name", &self.0.name)
            .field("visible", &state.visible)
            .field("display_state", &state.display_state)
            .field("sections", &self.0.sections.borrow().names())
            .finish()
    }
}

impl Narrowed<Tab, CanSetVisible> {
    pub fn set_visible(&self, visible: bool) {
        self.0.state.borrow_mut().visible = visible;
    }
}

impl Narrowed<Tab, IsTab> {
    /// Expands or collapses the tab. A real change raises `TabStateChange`,
    /// as the host does; setting the current state again raises nothing.
    pub fn set_display_state(&self, display_state: DisplayState) {
        let changed = {
            let mut state = self.0.state.borrow_mut();
            let changed = state.display_state != display_state;
            state.display_state = display_state;
            changed
        };
        if changed {
            self.fire(EventKind::TabStateChange);
        }
    }
}

impl From<Tab> for Specifier<Tab> {
    fn from(tab: Tab) -> Self {
        Specifier::Instance(tab)
    }
}

impl From<Tab> for Target<Tab> {
    fn from(tab: Tab) -> Self {
        Target::Instance(tab)
    }
}

impl From<Section> for Specifier<Section> {
    fn from(section: Section) -> Self {
        Specifier::Instance(section)
    }
}

impl From<Section> for Target<Section> {
    fn from(section: Section) -> Self {
        Target::Instance(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{can_set_visible, is_tab, narrow};
    use crate::events::handler;
    use std::cell::Cell;

    #[test]
    fn sections_know_their_tab() {
        let address = Section::new("address");
        let tab = Tab::new("general").with_section(address.clone());
        assert_eq!(address.tab().as_deref(), Some("general"));
        assert_eq!(tab.sections().names(), vec!["address"]);
    }

    #[test]
    fn sections_are_not_tabs() {
        let section = Section::new("address");
        assert!(can_set_visible(&section));
        assert!(!is_tab(&section));
        assert!(is_tab(&Tab::new("general")));
    }

    #[test]
    fn display_state_change_fires_once() {
        let tab = Tab::new("details");
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        tab.handlers().add(
            EventKind::TabStateChange,
            handler(move |_| counter.set(counter.get() + 1)),
        );

        let narrowed = narrow::<_, IsTab>(&tab).unwrap();
        narrowed.set_display_state(DisplayState::Collapsed);
        narrowed.set_display_state(DisplayState::Collapsed);

        assert_eq!(tab.display_state(), DisplayState::Collapsed);
        assert_eq!(fired.get(), 1);
    }
}
