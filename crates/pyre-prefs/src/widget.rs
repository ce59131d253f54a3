//! Headless widgets
//!
//! These model the state and signals of the controls on an effect's settings
//! page. A toolkit frontend renders them and forwards user input through the
//! setters; bindings and presets only ever talk to these types.

use crate::action::{ActionGroup, Menu};
use crate::signal::Signal;
use pyre_core::{Color, HandlerId, PyreError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// A bounded numeric value (slider or spin button)
pub struct Adjustment {
    value: Cell<f64>,
    lower: f64,
    upper: f64,
    step: f64,
    value_changed: Signal<f64>,
}

impl Adjustment {
    pub fn new(lower: f64, upper: f64, step: f64) -> Self {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        Self {
            value: Cell::new(lower),
            lower,
            upper,
            step,
            value_changed: Signal::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }

    /// Set the value, clamped to the bounds. Emits only when it changes.
    pub fn set_value(&self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let value = value.clamp(self.lower, self.upper);
        if value != self.value.get() {
            self.value.set(value);
            self.value_changed.emit(&value);
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn connect_value_changed<F: Fn(&f64) + 'static>(&self, f: F) -> HandlerId {
        self.value_changed.connect(f)
    }
}

/// An on/off toggle
#[derive(Default)]
pub struct Switch {
    active: Cell<bool>,
    toggled: Signal<bool>,
}

impl Switch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn set_active(&self, active: bool) {
        if active != self.active.get() {
            self.active.set(active);
            self.toggled.emit(&active);
        }
    }

    pub fn connect_toggled<F: Fn(&bool) + 'static>(&self, f: F) -> HandlerId {
        self.toggled.connect(f)
    }
}

/// A color swatch that opens a color chooser
#[derive(Default)]
pub struct ColorButton {
    rgba: Cell<Color>,
    color_set: Signal<Color>,
}

impl ColorButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rgba(&self) -> Color {
        self.rgba.get()
    }

    pub fn set_rgba(&self, color: Color) {
        if color != self.rgba.get() {
            self.rgba.set(color);
            self.color_set.emit(&color);
        }
    }

    pub fn connect_color_set<F: Fn(&Color) + 'static>(&self, f: F) -> HandlerId {
        self.color_set.connect(f)
    }
}

/// A push button
#[derive(Default)]
pub struct Button {
    label: String,
    clicked: Signal<()>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            clicked: Signal::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn click(&self) {
        self.clicked.emit(&());
    }

    pub fn connect_clicked<F: Fn(&()) + 'static>(&self, f: F) -> HandlerId {
        self.clicked.connect(f)
    }
}

/// Static text
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A button that pops up a menu model
#[derive(Default)]
pub struct MenuButton {
    label: String,
    menu: RefCell<Option<Menu>>,
}

impl MenuButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            menu: RefCell::new(None),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_menu_model(&self, menu: Menu) {
        *self.menu.borrow_mut() = Some(menu);
    }

    pub fn menu_model(&self) -> Option<Menu> {
        self.menu.borrow().clone()
    }

    /// Activate the menu entry at `index`, routed through `window`'s action groups
    pub fn activate_item(&self, index: usize, window: &Window) -> Result<()> {
        let action = {
            let menu = self.menu.borrow();
            let item = menu
                .as_ref()
                .and_then(|m| m.items().get(index))
                .ok_or_else(|| PyreError::ActionNotFound(format!("menu item {index}")))?;
            item.detailed_action.clone()
        };
        window.activate_action(&action)
    }
}

/// The root widget of an effect's settings page
pub struct Page {
    id: String,
    title: String,
    root: RefCell<Option<Rc<Window>>>,
    realize: Signal<Rc<Window>>,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            root: RefCell::new(None),
            realize: Signal::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The window this page was last realized in
    pub fn root(&self) -> Option<Rc<Window>> {
        self.root.borrow().clone()
    }

    /// Called by the host once the page is inserted into `window`.
    /// May be called more than once.
    pub fn realize(&self, window: &Rc<Window>) {
        *self.root.borrow_mut() = Some(window.clone());
        self.realize.emit(window);
    }

    pub fn connect_realize<F: Fn(&Rc<Window>) + 'static>(&self, f: F) -> HandlerId {
        self.realize.connect(f)
    }
}

/// A widget created by the [`Builder`](crate::Builder)
#[derive(Clone)]
pub enum Widget {
    Adjustment(Rc<Adjustment>),
    Switch(Rc<Switch>),
    ColorButton(Rc<ColorButton>),
    Button(Rc<Button>),
    MenuButton(Rc<MenuButton>),
    Label(Rc<Label>),
    Page(Rc<Page>),
}

impl Widget {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Widget::Adjustment(_) => "adjustment",
            Widget::Switch(_) => "switch",
            Widget::ColorButton(_) => "color-button",
            Widget::Button(_) => "button",
            Widget::MenuButton(_) => "menu-button",
            Widget::Label(_) => "label",
            Widget::Page(_) => "page",
        }
    }
}

/// The top-level window hosting preference pages.
///
/// Action groups are attached here under a prefix, and detailed action names
/// such as `"presets.fire0"` are resolved against them.
#[derive(Default)]
pub struct Window {
    title: String,
    action_groups: RefCell<HashMap<String, Rc<ActionGroup>>>,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            title: title.into(),
            action_groups: RefCell::new(HashMap::new()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Attach a group under `prefix`, replacing any group already there
    pub fn insert_action_group(&self, prefix: &str, group: Rc<ActionGroup>) {
        self.action_groups
            .borrow_mut()
            .insert(prefix.to_string(), group);
    }

    pub fn action_group(&self, prefix: &str) -> Option<Rc<ActionGroup>> {
        self.action_groups.borrow().get(prefix).cloned()
    }

    pub fn action_group_count(&self) -> usize {
        self.action_groups.borrow().len()
    }

    /// Activate `"<prefix>.<action>"`
    pub fn activate_action(&self, detailed: &str) -> Result<()> {
        let (prefix, name) = detailed
            .split_once('.')
            .ok_or_else(|| PyreError::ActionNotFound(detailed.to_string()))?;
        let action = self
            .action_group(prefix)
            .and_then(|g| g.lookup(name))
            .ok_or_else(|| PyreError::ActionNotFound(detailed.to_string()))?;
        action.activate();
        Ok(())
    }
}
