//! Counter Demo
//!
//! A counter component on the headless host:
//! - declares a `count` property with a default
//! - builds its content from a template hook
//! - logs every change and the ready signal
//!
//! Run with: RUST_LOG=debug cargo run -p tessera --example counter

use std::rc::Rc;

use anyhow::Result;
use tessera::prelude::*;

fn main() -> Result<()> {
    tessera::init(&RuntimeConfig::default())?;

    let host = Rc::new(HeadlessHost::new());
    let main = host.create_element("main");
    host.append_child(host.document(), main)?;

    let class = ComponentClass::builder("demo.Counter")
        .css(":host { font-family: monospace }")
        .property("count", 0)
        .create_template(|template| {
            let label = template.element("span");
            let text = template.text("count");
            template.append(label, text)?;
            template.push(label)
        })
        .on_focus(|counter| tracing::info!(id = ?counter.id(), "counter focused"))
        .build();

    let definition = define_component(&*host, class.clone())?;
    tracing::info!(?definition, "defined");

    let placeholder = host.create_placeholder();
    host.append_child(main, placeholder.node)?;

    let counter = Component::new(
        &class,
        host.clone(),
        ComponentConfig::new()
            .value("count", 1)
            .on_change("count", |value, change| {
                tracing::info!(%value, instance = ?change.meta.instance, "count changed");
            })
            .on_ready(|ready| {
                let result = ready.listen("count", |value, meta| {
                    tracing::info!(%value, version = meta.version, "ready listener");
                });
                if let Err(err) = result {
                    tracing::error!(%err, "listen failed");
                }
            }),
    )?;

    counter.attach(&placeholder)?;

    for _ in 0..3 {
        let next = counter.get("count")?.as_i64().unwrap_or_default() + 1;
        counter.set("count", next)?;
    }

    counter.focus()?;
    host.run_until_idle();

    tracing::info!(stats = ?host.stats(), "done");
    Ok(())
}
