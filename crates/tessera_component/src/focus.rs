//! Focus bridging
//!
//! Every instance registers exactly one low-level focus listener with the
//! host, forwarding to its `on_focus` handler. Programmatic focus goes
//! through [`Component::focus`], which asks the host for native focus and
//! also queues a deferred notification for hosts that raise no event for
//! programmatic focus. Each call carries its own token: a focus event the
//! host raises from inside that call marks the token, and the deferred task
//! only fires for unmarked tokens. Focus events arriving at any other time
//! always notify.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::component::{Component, ComponentInner, FocusToken};
use crate::config::FocusHandler;
use crate::error::Result;

impl Component {
    /// Install the effective handler and the host listener
    ///
    /// A configured handler runs first, then the class-level one.
    pub(crate) fn wire_focus(&self, configured: Option<FocusHandler>) -> Result<()> {
        let prior: Option<FocusHandler> = self.inner.class.on_focus_hook().cloned().map(|hook| {
            let weak = Rc::downgrade(&self.inner);
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    hook(&Component { inner });
                }
            }) as FocusHandler
        });

        let effective = match (configured, prior) {
            (Some(first), Some(second)) => Some(Rc::new(move || {
                first();
                second();
            }) as FocusHandler),
            (first, second) => first.or(second),
        };
        *self.inner.on_focus.borrow_mut() = effective;

        let weak = Rc::downgrade(&self.inner);
        self.inner.host.add_focus_listener(
            self.inner.node,
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    if let Some(token) = inner.native_focus.borrow().as_ref() {
                        token.set(true);
                    }
                    fire_on_focus(&inner);
                }
            }),
        )?;
        Ok(())
    }

    /// Focus the component's element
    ///
    /// `on_focus` fires exactly once per call: synchronously if the host
    /// raises a focus event, otherwise from a deferred task. The deferred
    /// task does nothing if the component has been dropped by then.
    pub fn focus(&self) -> Result<()> {
        let inner = &self.inner;
        let token: FocusToken = Rc::new(Cell::new(false));

        let previous = inner.native_focus.replace(Some(Rc::clone(&token)));
        let result = inner.host.focus(inner.node);
        *inner.native_focus.borrow_mut() = previous;
        result?;

        let weak: Weak<ComponentInner> = Rc::downgrade(inner);
        inner.host.defer(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                tracing::trace!("deferred focus for dropped component");
                return;
            };
            if !token.get() {
                fire_on_focus(&inner);
            }
        }));
        Ok(())
    }

    /// Replace the instance focus handler
    pub fn set_on_focus<F>(&self, handler: F)
    where
        F: Fn() + 'static,
    {
        *self.inner.on_focus.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn clear_on_focus(&self) {
        self.inner.on_focus.borrow_mut().take();
    }

    /// Whether a focus handler is installed
    pub fn has_focus_handler(&self) -> bool {
        self.inner.on_focus.borrow().is_some()
    }
}

fn fire_on_focus(inner: &ComponentInner) {
    // Release the borrow before calling out; handlers may replace themselves
    let handler = inner.on_focus.borrow().clone();
    if let Some(handler) = handler {
        handler();
    }
}
