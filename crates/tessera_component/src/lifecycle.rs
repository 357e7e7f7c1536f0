//! Ready signal
//!
//! The host reports each time a component's element joins the live tree. The
//! first report fires the ready hook; later ones are ignored. The hook gets a
//! [`ReadyApi`] rather than the whole instance.

use std::rc::{Rc, Weak};

use tessera_core::{ChangeMeta, PropValue, SubscriptionId};

use crate::component::{Component, ComponentInner};
use crate::error::Result;

/// What a ready hook may do with its component: [`ReadyApi::listen`] only
pub struct ReadyApi<'a> {
    component: &'a Component,
}

impl<'a> ReadyApi<'a> {
    pub(crate) fn new(component: &'a Component) -> Self {
        Self { component }
    }

    /// Subscribe to a property and replay its current value
    ///
    /// `callback` runs once immediately with an empty [`ChangeMeta`], then on
    /// every subsequent change.
    pub fn listen<F>(&self, name: &str, callback: F) -> Result<SubscriptionId>
    where
        F: Fn(&PropValue, &ChangeMeta) + 'static,
    {
        let holder = self.component.inner.values.holder(name)?;
        let callback: Rc<dyn Fn(&PropValue, &ChangeMeta)> = Rc::new(callback);
        let id = holder.sub_rc(Rc::clone(&callback));
        callback(&holder.get(), &ChangeMeta::default());
        Ok(id)
    }
}

impl Component {
    pub(crate) fn wire_connected(&self) -> Result<()> {
        let weak: Weak<ComponentInner> = Rc::downgrade(&self.inner);
        self.inner.host.on_connected(
            self.inner.node,
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Component { inner }.connected();
                }
            }),
        )?;
        Ok(())
    }

    /// Fire the ready hook on the first connected notification
    fn connected(&self) {
        if self.inner.ready_called.replace(true) {
            return;
        }

        tracing::debug!(
            class = self.inner.class.id(),
            instance = self.inner.id.to_raw(),
            "component ready"
        );

        let api = ReadyApi::new(self);
        if let Some(hook) = self.inner.on_ready.clone() {
            hook(&api);
        } else if let Some(hook) = self.inner.class.on_ready_hook().cloned() {
            hook(&api);
        }
    }
}
