//! Selection coordinator.
//!
//! Ties attribute choice → operator or choice activation → fragment → buffer
//! edit, and republishes the `{driver, query}` pair to the host after every
//! mutation. One instance per embedded control; nothing is shared.
//!
//! ```text
//! Idle → AttributeSelected → OperatorOrChoiceSelected → FragmentInserted → …
//! Idle → Wrapped → …
//! Idle → Cleared → …
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{AttributeDescriptor, Catalog, CatalogSources, DeviceType, Embedding};
use crate::config::{CaretPlacement, Config, ExampleValues};
use crate::labels::Labels;
use crate::query::{
    actions_for, Action, Composer, Connective, Editor, Fragment, OperatorCode, OperatorLabels,
    Selection, TextSurface,
};
use crate::{Error, Result};

/// Selected driver as exchanged with the host form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRef {
    pub label: String,
    /// Driver name.
    pub value: String,
}

impl From<&DeviceType> for DriverRef {
    fn from(driver: &DeviceType) -> Self {
        Self {
            label: driver.description.clone(),
            value: driver.name.clone(),
        }
    }
}

/// The value handed back to the host, verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBuilderValue {
    pub driver: Option<DriverRef>,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Idle,
    AttributeSelected,
    OperatorOrChoiceSelected,
    FragmentInserted,
    Wrapped,
    Cleared,
}

/// Connective buttons under the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Clear,
    Not,
    And,
    Or,
}

/// Per-instance settings.
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    pub embedding: Embedding,
    pub labels: Labels,
    pub examples: ExampleValues,
    pub caret: CaretPlacement,
    pub any_driver_label: String,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self::from_config(&Config::with_root(""), Labels::new())
    }
}

impl BuilderOptions {
    pub fn from_config(config: &Config, labels: Labels) -> Self {
        Self {
            embedding: Embedding::Dialog,
            labels,
            examples: config.examples.clone(),
            caret: config.caret,
            any_driver_label: config.any_driver_label.clone(),
        }
    }

    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = embedding;
        self
    }
}

type Listener = Box<dyn FnMut(&QueryBuilderValue)>;

/// One query builder control.
pub struct QueryBuilder<S> {
    id: Uuid,
    options: BuilderOptions,
    operator_labels: OperatorLabels,
    sources: CatalogSources,
    driver: Option<DriverRef>,
    catalog: Catalog,
    attribute: Option<AttributeDescriptor>,
    actions: Vec<Action>,
    state: BuilderState,
    editor: Editor<S>,
    listeners: Vec<Listener>,
}

impl<S: TextSurface> QueryBuilder<S> {
    /// Mount a control, seeded from a saved value (or the default empty one).
    pub fn new(
        options: BuilderOptions,
        sources: CatalogSources,
        initial: QueryBuilderValue,
        surface: S,
    ) -> Self {
        let operator_labels = OperatorLabels::localized(&options.labels);
        let mut builder = Self {
            id: Uuid::now_v7(),
            options,
            operator_labels,
            sources,
            driver: initial.driver,
            catalog: Catalog::default(),
            attribute: None,
            actions: Vec::new(),
            state: BuilderState::Idle,
            editor: Editor::new(initial.query, surface),
            listeners: Vec::new(),
        };
        builder.rebuild_catalog();
        tracing::debug!(id = %builder.id, embedding = ?builder.options.embedding, "query builder mounted");
        builder
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn editor(&self) -> &Editor<S> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor<S> {
        &mut self.editor
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    pub fn driver(&self) -> Option<&DriverRef> {
        self.driver.as_ref()
    }

    pub fn any_driver_label(&self) -> &str {
        &self.options.any_driver_label
    }

    /// Known drivers, in source order.
    pub fn drivers(&self) -> Vec<DriverRef> {
        self.sources
            .device_types
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(DriverRef::from)
            .collect()
    }

    pub fn selected_attribute(&self) -> Option<&AttributeDescriptor> {
        self.attribute.as_ref()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Register a listener called with the current value after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&QueryBuilderValue) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Remote collections arrived or changed. The text is kept; the selected
    /// attribute is kept only if it still exists.
    pub fn update_sources(&mut self, sources: CatalogSources) {
        self.sources = sources;
        tracing::debug!(id = %self.id, complete = self.sources.is_complete(), "catalog sources updated");
        self.rebuild_catalog();
    }

    /// Switch driver (`None` = any). Already typed text is left untouched.
    pub fn select_driver(&mut self, name: Option<&str>) -> Result<()> {
        self.driver = match name {
            None => None,
            Some(name) => {
                let driver = self
                    .sources
                    .find_driver(name)
                    .ok_or_else(|| Error::UnknownDriver(name.to_string()))?;
                Some(DriverRef::from(driver))
            }
        };
        tracing::debug!(id = %self.id, driver = ?self.driver, "driver changed");
        self.rebuild_catalog();
        self.publish();
        Ok(())
    }

    /// Pick an attribute by name and resolve its actions.
    ///
    /// An unknown name clears the selection and offers nothing.
    pub fn select_attribute(&mut self, name: &str) -> &[Action] {
        self.transition(BuilderState::Idle);
        self.attribute = self.catalog.find(name).cloned();
        self.refresh_actions();
        if self.attribute.is_some() {
            self.transition(BuilderState::AttributeSelected);
        } else {
            tracing::debug!(id = %self.id, name, "attribute not in catalog");
        }
        &self.actions
    }

    /// Activate the action at `index` of [`QueryBuilder::actions`].
    pub fn activate(&mut self, index: usize) -> Option<Fragment> {
        let action = self.actions.get(index)?.clone();
        let attribute = self.attribute.clone()?;
        self.transition(BuilderState::OperatorOrChoiceSelected);

        let composer = Composer::new(&self.options.examples);
        let fragment = action.fragment(&attribute, &composer);
        let caret = self.editor.insert_fragment(&fragment.text);

        if self.options.caret == CaretPlacement::SelectValue {
            let fragment_start = caret.start - fragment.len();
            self.editor.select(Selection::new(
                fragment_start + fragment.value.start,
                fragment_start + fragment.value.end,
            ));
        }

        self.transition(BuilderState::FragmentInserted);
        self.publish();
        self.settle();
        Some(fragment)
    }

    /// Activate the operator with the given code, if offered.
    pub fn activate_operator(&mut self, code: OperatorCode) -> Option<Fragment> {
        let index = self
            .actions
            .iter()
            .position(|a| matches!(a, Action::Operator(op) if op.code == code))?;
        self.activate(index)
    }

    /// Activate the enum choice with the given label, if offered.
    pub fn activate_choice(&mut self, label: &str) -> Option<Fragment> {
        let index = self
            .actions
            .iter()
            .position(|a| matches!(a, Action::Choice(choice) if choice.label == label))?;
        self.activate(index)
    }

    /// Handle one of the connective buttons.
    pub fn press(&mut self, button: Button) {
        match button {
            Button::Clear => {
                self.editor.clear();
                self.transition(BuilderState::Cleared);
            }
            Button::Not => {
                self.editor.wrap(Connective::Not);
                self.transition(BuilderState::Wrapped);
            }
            Button::And => {
                self.editor.wrap(Connective::And);
                self.transition(BuilderState::Wrapped);
            }
            Button::Or => {
                self.editor.wrap(Connective::Or);
                self.transition(BuilderState::Wrapped);
            }
        }
        self.publish();
        self.settle();
    }

    /// The host finished rendering: apply any deferred caret placement.
    pub fn after_render(&mut self) {
        self.editor.after_render();
    }

    /// The user typed in the text area.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.editor.type_text(text);
        self.publish();
    }

    /// The user moved the caret or selected text.
    pub fn select(&mut self, selection: Selection) {
        self.editor.select(selection);
    }

    /// Current `{driver, query}` pair.
    pub fn value(&self) -> QueryBuilderValue {
        QueryBuilderValue {
            driver: self.driver.clone(),
            query: self.editor.text().to_string(),
        }
    }

    /// Hand the value to the host. No trimming or validation happens here.
    pub fn submit(self) -> QueryBuilderValue {
        tracing::debug!(id = %self.id, "query builder submitted");
        self.value()
    }

    fn rebuild_catalog(&mut self) {
        let driver = self
            .driver
            .as_ref()
            .and_then(|d| self.sources.find_driver(&d.value));
        self.catalog = Catalog::build(&self.sources, driver, self.options.embedding, &self.options.labels);

        self.attribute = self
            .attribute
            .take()
            .and_then(|a| self.catalog.find(&a.name).cloned());
        self.refresh_actions();
    }

    fn refresh_actions(&mut self) {
        self.actions = match &self.attribute {
            Some(attribute) => actions_for(attribute, &self.operator_labels),
            None => Vec::new(),
        };
    }

    /// Back to `Idle` after an edit; a held attribute stays selected.
    fn settle(&mut self) {
        self.transition(BuilderState::Idle);
        if self.attribute.is_some() {
            self.transition(BuilderState::AttributeSelected);
        }
    }

    fn transition(&mut self, to: BuilderState) {
        tracing::debug!(id = %self.id, from = ?self.state, to = ?to, "state transition");
        self.state = to;
    }

    fn publish(&mut self) {
        let value = self.value();
        for listener in &mut self.listeners {
            listener(&value);
        }
    }
}

impl<S> fmt::Debug for QueryBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("driver", &self.driver)
            .field("attribute", &self.attribute.as_ref().map(|a| &a.name))
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
