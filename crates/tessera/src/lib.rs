//! Tessera
//!
//! Reactive display components for host display trees.
//!
//! This crate re-exports the workspace crates and owns process-wide setup:
//!
//! - [`tessera_core`] - value holders, property stores, class registry
//! - [`tessera_platform`] - host traits and the headless host
//! - [`tessera_component`] - component classes, instances and definitions
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tessera::prelude::*;
//!
//! tessera::init(&RuntimeConfig::default()).unwrap();
//!
//! let host = Rc::new(HeadlessHost::new());
//! let main = host.create_element("main");
//! host.append_child(host.document(), main).unwrap();
//!
//! let class = ComponentClass::builder("docs.Clock").property("time", "00:00").build();
//! define_component(&*host, class.clone()).unwrap();
//!
//! let clock = Component::new(&class, host.clone(), ComponentConfig::new()).unwrap();
//! clock.attach(main).unwrap();
//! assert_eq!(clock.get("time").unwrap(), PropValue::from("00:00"));
//! ```

mod config;

pub use tessera_component;
pub use tessera_core;
pub use tessera_platform;

pub use config::{ConfigError, RuntimeConfig};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::RuntimeConfig;
    pub use tessera_component::prelude::{
        define_component, lookup_class, ChangeMeta, Component, ComponentClass, ComponentConfig,
        ComponentError, Definable, Destination, PropValue, PropertyChange, ReadyApi,
        RenderMode, TemplateBuilder, ValueHolder,
    };
    pub use tessera_platform::prelude::{
        HeadlessConfig, HeadlessHost, HostRegistry, HostTree, NodeId, NodeKind, Placeholder,
        PlatformError,
    };
}

/// Initialize the Tessera runtime
///
/// Installs a `tracing` subscriber filtered by `RUST_LOG`, or by
/// `config.log_filter` when that is unset, and fixes the element prefix.
/// Calling it again is harmless: the first subscriber and prefix stay.
pub fn init(config: &RuntimeConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("Invalid log filter {:?}", config.log_filter))?,
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    let prefix = &config.element_prefix;
    if !tessera_component::set_element_prefix(prefix)
        && tessera_component::element_prefix() != prefix
    {
        tracing::warn!(
            requested = %prefix,
            active = tessera_component::element_prefix(),
            "element prefix already fixed"
        );
    }

    tracing::info!(prefix = tessera_component::element_prefix(), "tessera initialized");
    Ok(())
}

/// Load `path` and initialize from it
pub fn init_from_file(path: &std::path::Path) -> anyhow::Result<RuntimeConfig> {
    let config = RuntimeConfig::load(path)?;
    init(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        let config = RuntimeConfig::default();
        init(&config).unwrap();
        init(&config).unwrap();
        assert_eq!(tessera_component::element_prefix(), "c-");
    }

    #[test]
    fn test_init_rejects_invalid_prefix() {
        let config = RuntimeConfig {
            element_prefix: "Nope".to_string(),
            ..Default::default()
        };
        let err = init(&config).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_init_rejects_bad_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = RuntimeConfig {
            log_filter: "tessera=loud".to_string(),
            ..Default::default()
        };
        assert!(init(&config).is_err());
    }
}
