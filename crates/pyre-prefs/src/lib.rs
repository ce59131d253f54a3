//! Pyre Prefs - Preference pages for window effects
//!
//! Provides the toolkit-independent side of an effect's settings page:
//! - `Signal` — single-threaded handler dispatch used by every widget
//! - Widgets (`Adjustment`, `Switch`, `ColorButton`, `Button`, `MenuButton`, `Page`)
//!   and the `Window` root that owns action groups
//! - `Builder` — instantiates a page from a TOML template looked up in `Resources`
//! - `PreferencesDialog` / `PageContext` — two-way bindings between widgets and settings
//! - `Preset` / `PresetMenu` — named settings bundles exposed as menu actions

mod action;
mod builder;
mod dialog;
mod preset;
mod signal;
mod template;
mod widget;

pub use action::{Action, ActionGroup, Menu, MenuItem};
pub use builder::Builder;
pub use dialog::{PageContext, PreferencesDialog};
pub use preset::{Preset, PresetMenu};
pub use signal::Signal;
pub use template::{page_resource_path, PageTemplate, Resources, WidgetDef, WidgetKind};
pub use widget::{Adjustment, Button, ColorButton, Label, MenuButton, Page, Switch, Widget, Window};
