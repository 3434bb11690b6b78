//! Display view over an assembled form.
//!
//! [`WidgetsView`] runs assembly, exposes a flat widget map across the main
//! fields and every group, and indexes the instantiated groups by name.
//! Rendering is delegated to a [`Template`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::form::{AutoFields, FormDeclaration, FormField, FormMode, Group};

/// Rendering collaborator for [`WidgetsView`].
pub trait Template: Send + Sync {
    /// Renders the updated view.
    ///
    /// # Errors
    ///
    /// Returns whatever error the rendering layer reports.
    fn render(&self, view: &WidgetsView) -> Result<String>;
}

/// Summary of one field's widget, as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    /// External field name.
    pub name: String,
    /// Field title.
    pub label: String,
    /// Widget override, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Effective mode: the field's own mode, else the view's.
    pub mode: String,
}

impl Widget {
    fn for_field(field: &FormField, default_mode: &str) -> Self {
        Self {
            name: field.name.clone(),
            label: field.title().to_owned(),
            widget: field.widget.clone(),
            mode: field.mode.clone().unwrap_or_else(|| default_mode.to_owned()),
        }
    }
}

/// A display view of the widgets of an assembled form.
pub struct WidgetsView {
    form: AutoFields,
    template: Option<Arc<dyn Template>>,
    /// Widgets of every non-omitted field, main fields first, keyed by
    /// external name.
    pub w: IndexMap<String, Widget>,
    /// Instantiated groups keyed by group name, or by position for unnamed
    /// groups.
    pub fieldsets: IndexMap<String, Group>,
    groups: Vec<Group>,
}

impl WidgetsView {
    /// Creates a view over `declaration` with no template.
    #[must_use]
    pub fn new(declaration: Arc<FormDeclaration>) -> Self {
        Self {
            form: AutoFields::new(declaration),
            template: None,
            w: IndexMap::new(),
            fieldsets: IndexMap::new(),
            groups: Vec::new(),
        }
    }

    /// Sets the template used by [`render`](Self::render).
    #[must_use]
    pub fn with_template(mut self, template: Arc<dyn Template>) -> Self {
        self.template = Some(template);
        self
    }

    /// The underlying form state.
    #[must_use]
    pub fn form(&self) -> &AutoFields {
        &self.form
    }

    /// Instantiated groups, in order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Assembles the form and rebuilds the widget map and fieldsets.
    pub fn update(&mut self) {
        self.form.update_fields_from_schemata();
        let mode = FormMode::Display.as_str();

        self.w = self
            .form
            .fields
            .visible()
            .map(|f| (f.name.clone(), Widget::for_field(f, mode)))
            .collect();

        self.groups.clear();
        self.fieldsets.clear();
        for (index, factory) in self.form.groups.iter().enumerate() {
            let group = factory.instantiate();
            for field in group.fields.visible() {
                self.w
                    .insert(field.name.clone(), Widget::for_field(field, mode));
            }
            let key = group.name.clone().unwrap_or_else(|| index.to_string());
            self.fieldsets.insert(key, group.clone());
            self.groups.push(group);
        }
    }

    /// Renders the view with its template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotImplemented`] if no template is set, or the
    /// template's own error.
    pub fn render(&self) -> Result<String> {
        match &self.template {
            Some(template) => template.render(self),
            None => Err(Error::NotImplemented(
                "You must implement the 'render' method".to_owned(),
            )),
        }
    }

    /// Updates, then renders.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn call(&mut self) -> Result<String> {
        self.update();
        self.render()
    }
}

impl fmt::Debug for WidgetsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetsView")
            .field("form", &self.form)
            .field("has_template", &self.template.is_some())
            .field("w", &self.w)
            .field("fieldsets", &self.fieldsets)
            .finish_non_exhaustive()
    }
}
