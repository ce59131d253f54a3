//! Builder — instantiates the widgets of a page template

use crate::template::{PageTemplate, Resources, WidgetKind};
use crate::widget::{Adjustment, Button, ColorButton, Label, MenuButton, Page, Switch, Widget};
use pyre_core::{PyreError, Result};
use std::collections::HashMap;
use std::rc::Rc;

/// A set of freshly created widgets, addressable by id.
///
/// Every builder owns its own widgets; building the same template twice
/// yields two independent pages.
pub struct Builder {
    objects: HashMap<String, Widget>,
    order: Vec<String>,
    page: Rc<Page>,
}

macro_rules! typed_lookup {
    ($name:ident, $variant:ident, $ty:ty, $kind:literal) => {
        pub fn $name(&self, id: &str) -> Result<Rc<$ty>> {
            match self.object(id)? {
                Widget::$variant(w) => Ok(w),
                other => Err(PyreError::WidgetTypeMismatch {
                    id: id.to_string(),
                    expected: $kind.to_string(),
                    got: other.kind_name().to_string(),
                }),
            }
        }
    };
}

impl Builder {
    /// Build the template stored at `path`
    pub fn from_resource(resources: &Resources, path: &str) -> Result<Self> {
        let content = resources.get(path)?;
        Self::from_template_str(content)
    }

    pub fn from_template_str(content: &str) -> Result<Self> {
        Self::from_template(&PageTemplate::parse(content)?)
    }

    pub fn from_template(template: &PageTemplate) -> Result<Self> {
        let page = Rc::new(Page::new(&template.page.id, &template.page.title));
        let mut objects = HashMap::new();
        let mut order = Vec::new();
        objects.insert(template.page.id.clone(), Widget::Page(page.clone()));
        order.push(template.page.id.clone());

        for def in &template.widget {
            let label = def.label.clone().unwrap_or_default();
            let widget = match def.kind {
                WidgetKind::Adjustment => Widget::Adjustment(Rc::new(Adjustment::new(
                    def.lower.unwrap_or(0.0),
                    def.upper.unwrap_or(1.0),
                    def.step.unwrap_or(0.1),
                ))),
                WidgetKind::Switch => Widget::Switch(Rc::new(Switch::new())),
                WidgetKind::ColorButton => Widget::ColorButton(Rc::new(ColorButton::new())),
                WidgetKind::Button => Widget::Button(Rc::new(Button::new(label))),
                WidgetKind::MenuButton => Widget::MenuButton(Rc::new(MenuButton::new(label))),
                WidgetKind::Label => Widget::Label(Rc::new(Label::new(label))),
            };
            if objects.insert(def.id.clone(), widget).is_some() {
                return Err(PyreError::TemplateParse(format!(
                    "Duplicate widget id '{}'",
                    def.id
                )));
            }
            order.push(def.id.clone());
        }

        Ok(Self {
            objects,
            order,
            page,
        })
    }

    /// Look up any widget by id
    pub fn object(&self, id: &str) -> Result<Widget> {
        self.objects
            .get(id)
            .cloned()
            .ok_or_else(|| PyreError::WidgetNotFound(id.to_string()))
    }

    typed_lookup!(adjustment, Adjustment, Adjustment, "adjustment");
    typed_lookup!(switch, Switch, Switch, "switch");
    typed_lookup!(color_button, ColorButton, ColorButton, "color-button");
    typed_lookup!(button, Button, Button, "button");
    typed_lookup!(menu_button, MenuButton, MenuButton, "menu-button");

    /// The page root
    pub fn page(&self) -> Rc<Page> {
        self.page.clone()
    }

    /// Widget ids in template order, page first
    pub fn ids(&self) -> &[String] {
        &self.order
    }
}
