use crate::capability::{CanSetDisabled, CanSetVisible, Capabilities, Capable, Narrowed};
use crate::collection::Named;
use crate::events::{Evented, Handlers};
use crate::specifier::{Specifier, Target};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The host's control kinds. Each kind has a fixed capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlType {
    Standard,
    Lookup,
    OptionSet,
    MultiSelectOptionSet,
    DateTime,
    Subgrid,
    IFrame,
    WebResource,
    KbSearch,
    QuickForm,
    Timer,
    Notes,
    /// A component-framework control bound to a field.
    Custom,
}

impl ControlType {
    pub fn capabilities(&self) -> Capabilities {
        let field_control = Capabilities::SET_VISIBLE | Capabilities::SET_DISABLED;
        match self {
            ControlType::Standard
            | ControlType::OptionSet
            | ControlType::MultiSelectOptionSet
            | ControlType::DateTime => field_control,
            ControlType::Lookup => {
                field_control | Capabilities::LOOKUP_TAG_CLICK | Capabilities::PRE_SEARCH
            }
            ControlType::Custom => field_control | Capabilities::OUTPUT_CHANGE,
            ControlType::Subgrid => Capabilities::SET_VISIBLE | Capabilities::GRID_LOAD,
            ControlType::IFrame => field_control | Capabilities::READY_STATE_COMPLETE,
            ControlType::KbSearch => {
                Capabilities::SET_VISIBLE
                    | Capabilities::POST_SEARCH
                    | Capabilities::RESULT_OPENED
                    | Capabilities::SELECTION
            }
            ControlType::QuickForm => field_control,
            ControlType::WebResource | ControlType::Timer | ControlType::Notes => {
                Capabilities::SET_VISIBLE
            }
        }
    }
}

#[derive(Debug, Default)]
struct ControlState {
    label: String,
    visible: bool,
    disabled: bool,
    attribute: Option<String>,
    section: Option<String>,
}

struct ControlInner {
    name: String,
    control_type: ControlType,
    capabilities: Capabilities,
    state: RefCell<ControlState>,
    handlers: Handlers,
}

/// A handle to a visual control on the form.
#[derive(Clone)]
pub struct Control(Rc<ControlInner>);

impl Control {
    /// A visible, enabled control whose label defaults to its name.
    pub fn new(name: impl Into<String>, control_type: ControlType) -> Self {
        let name = name.into();
        Self(Rc::new(ControlInner {
            capabilities: control_type.capabilities(),
            control_type,
            state: RefCell::new(ControlState {
                label: name.clone(),
                visible: true,
                ..Default::default()
            }),
            name,
            handlers: Handlers::new(),
        }))
    }

    /// Binds the control to a form field.
    pub fn bound_to(self, attribute: impl Into<String>) -> Self {
        self.0.state.borrow_mut().attribute = Some(attribute.into());
        self
    }

    /// Records the section the control is laid out in.
    pub fn in_section(self, section: impl Into<String>) -> Self {
        self.0.state.borrow_mut().section = Some(section.into());
        self
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.0.state.borrow_mut().label = label.into();
        self
    }

    pub fn control_type(&self) -> ControlType {
        self.0.control_type
    }

    pub fn label(&self) -> String {
        self.0.state.borrow().label.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.0.state.borrow().visible
    }

    pub fn is_disabled(&self) -> bool {
        self.0.state.borrow().disabled
    }

    pub fn attribute(&self) -> Option<String> {
        self.0.state.borrow().attribute.clone()
    }

    pub fn section(&self) -> Option<String> {
        self.0.state.borrow().section.clone()
    }

    pub fn same(&self, other: &Control) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Named for Control {
    fn name(&self) -> &str {
        &self.0.name
    }
}

impl Capable for Control {
    fn capabilities(&self) -> Capabilities {
        self.0.capabilities
    }
}

impl Evented for Control {
    fn handlers(&self) -> &Handlers {
        &self.0.handlers
    }

    fn source_name(&self) -> &str {
        &self.0.name
    }
}

impl PartialEq for Control {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("Control")
            .field("name", &self.0.name)
            .field("type", &self.0.control_type)
            .field("visible", &state.visible)
            .field("disabled", &state.disabled)
            .finish()
    }
}

impl Narrowed<Control, CanSetVisible> {
    pub fn set_visible(&self, visible: bool) {
        self.0.state.borrow_mut().visible = visible;
    }
}

impl Narrowed<Control, CanSetDisabled> {
    pub fn set_disabled(&self, disabled: bool) {
        self.0.state.borrow_mut().disabled = disabled;
    }
}

impl From<Control> for Specifier<Control> {
    fn from(control: Control) -> Self {
        Specifier::Instance(control)
    }
}

impl From<Control> for Target<Control> {
    fn from(control: Control) -> Self {
        Target::Instance(control)
    }
}
