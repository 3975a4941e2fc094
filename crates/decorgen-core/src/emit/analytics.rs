//! `<Service>Analytics`: one analytics event per call.
//!
//! ```ignore
//! pub struct HelloWorldAnalytics<N, C> { next: N, client: C }
//!
//! async fn speak(&self, ctx: &CallContext, input: Words) -> CallResult<Words> {
//!     analytics::track(&self.client, ctx, "HelloWorld Speak", self.next.speak(ctx, input)).await
//! }
//! ```

use super::{DecoratorSpec, Emitter};
use crate::error::Result;
use crate::writer::SourceWriter;

pub(super) fn render(w: &mut SourceWriter, spec: &DecoratorSpec, emitter: &Emitter<'_, '_>) -> Result<()> {
    let rt = emitter.runtime();
    let name = &spec.decorator_name;

    w.doc(&format!(
        "`{name}` is a middleware for `{}` that submits one analytics event per call.",
        spec.trait_name
    ))?;
    emitter.propagate_doc(w, spec.comments.as_deref())?;
    w.line("#[derive(Debug, Clone)]")?;
    w.block(&format!("pub struct {name}<N, C>"), |w| {
        w.line("next: N,")?;
        w.line("client: C,")
    })?;
    w.blank()?;

    w.block(&format!("impl<N, C> {name}<N, C>"), |w| {
        w.block("pub fn new(next: N, client: C) -> Self", |w| {
            w.line("Self { next, client }")
        })
    })?;
    w.blank()?;

    let bounds = [
        format!("N: {}", spec.trait_name),
        format!("C: {rt}::analytics::EventSink"),
    ];
    emitter.trait_impl(w, spec, "N, C", &bounds, |w, method| {
        let event = format!("{} {}", spec.trait_name, method.proto_name);
        w.line(&format!(
            "{rt}::analytics::track(&self.client, ctx, {event:?}, self.next.{}(ctx, input)).await",
            method.rust_name
        ))
    })
}
