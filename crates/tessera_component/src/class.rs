//! Component class descriptors
//!
//! A [`ComponentClass`] is the static, per-class half of a component: its
//! identifier, how it mounts its content, its optional template and style,
//! the property schema and the class-level hooks. It is built once, shared as
//! `Arc<ComponentClass>` and never mutated afterwards, apart from the
//! write-once record of the element name the host accepted it under.
//!
//! ```rust
//! use tessera_component::{ComponentClass, RenderMode};
//!
//! let counter = ComponentClass::builder("ui.widgets.Counter")
//!     .css(":host { display: block }")
//!     .property("count", 0)
//!     .declare("label")
//!     .build();
//!
//! assert_eq!(counter.render_mode(), RenderMode::Shadow);
//! assert_eq!(counter.element_name(), "c-counter");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tessera_core::{PropValue, PropertySchema};
use tessera_platform::{DisplayElement, PlatformError};

use crate::component::Component;
use crate::define::element_name_for;
use crate::lifecycle::ReadyApi;
use crate::template::TemplateBuilder;

/// How a component mounts its visual content
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Content goes into an isolated sub-tree the element exclusively owns
    #[default]
    Shadow,
    /// Content goes directly into the element itself
    NoShadow,
}

/// Populates the in-progress template during materialization
pub type TemplateHook =
    Arc<dyn Fn(&TemplateBuilder<'_>) -> Result<(), PlatformError> + Send + Sync>;

/// Class-level ready hook, used when an instance supplies none
pub type ClassReadyHook = Arc<dyn Fn(&ReadyApi<'_>) + Send + Sync>;

/// Class-level focus handler, run after any instance focus handler
pub type ClassFocusHook = Arc<dyn Fn(&Component) + Send + Sync>;

/// Static description of a component class
pub struct ComponentClass {
    id: String,
    render_mode: RenderMode,
    template: Option<String>,
    css: Option<String>,
    properties: PropertySchema,
    create_template: Option<TemplateHook>,
    on_ready: Option<ClassReadyHook>,
    on_focus: Option<ClassFocusHook>,
    defined_as: OnceLock<String>,
}

impl ComponentClass {
    /// Start describing a class with a dot-separated identifier
    pub fn builder(id: impl Into<String>) -> ComponentClassBuilder {
        ComponentClassBuilder {
            class: ComponentClass {
                id: id.into(),
                render_mode: RenderMode::default(),
                template: None,
                css: None,
                properties: PropertySchema::new(),
                create_template: None,
                on_ready: None,
                on_focus: None,
                defined_as: OnceLock::new(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Selector of the host template cloned in at construction
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }

    pub fn properties(&self) -> &PropertySchema {
        &self.properties
    }

    pub(crate) fn create_template_hook(&self) -> Option<&TemplateHook> {
        self.create_template.as_ref()
    }

    pub(crate) fn on_ready_hook(&self) -> Option<&ClassReadyHook> {
        self.on_ready.as_ref()
    }

    pub(crate) fn on_focus_hook(&self) -> Option<&ClassFocusHook> {
        self.on_focus.as_ref()
    }

    /// Element name the host accepted this class under, once defined
    pub fn defined_as(&self) -> Option<&str> {
        self.defined_as.get().map(String::as_str)
    }

    pub(crate) fn record_defined_as(&self, name: &str) {
        // First definition wins, matching the host registry
        let _ = self.defined_as.set(name.to_string());
    }

    /// Tag used for instance elements: the defined name, else the derived one
    pub fn element_name(&self) -> String {
        match self.defined_as() {
            Some(name) => name.to_string(),
            None => element_name_for(&self.id),
        }
    }
}

impl DisplayElement for ComponentClass {
    fn class_id(&self) -> &str {
        &self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("id", &self.id)
            .field("render_mode", &self.render_mode)
            .field("template", &self.template)
            .field("css", &self.css.as_ref().map(String::len))
            .field("properties", &self.properties.names().collect::<Vec<_>>())
            .field("defined_as", &self.defined_as.get())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ComponentClass`]
pub struct ComponentClassBuilder {
    class: ComponentClass,
}

impl ComponentClassBuilder {
    pub fn render_mode(mut self, mode: RenderMode) -> Self {
        self.class.render_mode = mode;
        self
    }

    /// Mount content directly into the element
    pub fn no_shadow(self) -> Self {
        self.render_mode(RenderMode::NoShadow)
    }

    /// Clone the host template matching `selector` into every instance
    pub fn template(mut self, selector: impl Into<String>) -> Self {
        self.class.template = Some(selector.into());
        self
    }

    /// Style payload injected on materialization
    pub fn css(mut self, css: impl Into<String>) -> Self {
        self.class.css = Some(css.into());
        self
    }

    /// Declare a property with a default
    pub fn property(mut self, name: impl Into<String>, default: impl Into<PropValue>) -> Self {
        self.class.properties = self.class.properties.property(name, default);
        self
    }

    /// Declare a property without a default
    pub fn declare(mut self, name: impl Into<String>) -> Self {
        self.class.properties = self.class.properties.declare(name);
        self
    }

    /// Replace the whole schema
    pub fn properties(mut self, schema: PropertySchema) -> Self {
        self.class.properties = schema;
        self
    }

    pub fn create_template<F>(mut self, hook: F) -> Self
    where
        F: Fn(&TemplateBuilder<'_>) -> Result<(), PlatformError> + Send + Sync + 'static,
    {
        self.class.create_template = Some(Arc::new(hook));
        self
    }

    pub fn on_ready<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ReadyApi<'_>) + Send + Sync + 'static,
    {
        self.class.on_ready = Some(Arc::new(hook));
        self
    }

    pub fn on_focus<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Component) + Send + Sync + 'static,
    {
        self.class.on_focus = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Arc<ComponentClass> {
        Arc::new(self.class)
    }
}
