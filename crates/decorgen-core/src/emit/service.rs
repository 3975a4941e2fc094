//! The service capability trait decorators implement.

use super::{DecoratorSpec, Emitter};
use crate::error::Result;
use crate::writer::SourceWriter;

pub(super) fn render(w: &mut SourceWriter, spec: &DecoratorSpec, emitter: &Emitter<'_, '_>) -> Result<()> {
    let rt = emitter.runtime();
    let name = &spec.trait_name;

    emitter.comments_doc(w, spec.comments.as_deref())?;
    w.line(&format!("#[{rt}::async_trait]"))?;
    w.block(&format!("pub trait {name}: Send + Sync"), |w| {
        for (i, method) in spec.methods.iter().enumerate() {
            if i > 0 {
                w.blank()?;
            }
            if let (true, Some(text)) = (emitter.config.propagate_comments, method.comments.as_deref()) {
                w.doc(text)?;
            }
            w.line(&format!("{};", emitter.method_signature(method)))?;
        }
        Ok(())
    })?;

    for pointer in ["::std::sync::Arc", "::std::boxed::Box"] {
        w.blank()?;
        w.line(&format!("#[{rt}::async_trait]"))?;
        w.block(&format!("impl<T: {name} + ?Sized> {name} for {pointer}<T>"), |w| {
            for (i, method) in spec.methods.iter().enumerate() {
                if i > 0 {
                    w.blank()?;
                }
                w.block(&emitter.method_signature(method), |w| {
                    w.line(&format!("(**self).{}(ctx, input).await", method.rust_name))
                })?;
            }
            Ok(())
        })?;
    }
    Ok(())
}
