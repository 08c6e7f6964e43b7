//! Documentation strategy: appends one example block per attribute.

use tracing::{debug, error, warn};

use super::{Leaf, LeafEnv, LeafStrategy};
use crate::config::{DocOptions, DocSerializer, HarnessConfig};
use crate::render::RenderBackend;
use crate::render::jsx::{JsxOptions, to_jsx_string};

/// Serializes each attribute into its component's example buffer.
///
/// A descriptor that cannot be built is logged and leaves an empty example
/// body; the remaining attributes are unaffected.
pub struct DocStrategy<'b> {
    backend: &'b dyn RenderBackend,
}

impl<'b> DocStrategy<'b> {
    /// Creates a strategy building descriptors through `backend`.
    #[must_use]
    pub const fn new(backend: &'b dyn RenderBackend) -> Self {
        Self { backend }
    }

    fn body(&self, leaf: &Leaf<'_>, options: &DocOptions) -> String {
        if let Some(snippet) = &leaf.attribute.doc.snippet {
            return snippet(leaf);
        }
        if let Some(DocSerializer::Attribute(produce)) = &options.serialize {
            return produce(leaf);
        }
        let built = match (&leaf.attribute.doc.build, &options.build_render_tree) {
            (Some(build), _) | (None, Some(build)) => build(leaf),
            (None, None) => leaf.build_default(self.backend),
        };
        let descriptor = match built {
            Ok(descriptor) => descriptor,
            Err(err) => {
                error!(title = %leaf.title, error = %err, "could not build example");
                return String::new();
            }
        };
        match &options.serialize {
            Some(DocSerializer::Descriptor(serialize)) => serialize(&descriptor),
            Some(DocSerializer::Attribute(_)) | None => {
                to_jsx_string(&descriptor, self.backend, JsxOptions::default())
            }
        }
    }
}

impl LeafStrategy for DocStrategy<'_> {
    fn run(&self, leaf: &Leaf<'_>, config: &HarnessConfig, env: &mut LeafEnv<'_>) {
        let Some(options) = config.doc.as_ref().filter(|doc| doc.enabled) else {
            return;
        };
        let Some(buffer) = env.buffer.as_deref_mut() else {
            warn!(title = %leaf.title, "documentation enabled without an example buffer");
            return;
        };
        let preamble = leaf
            .attribute
            .doc
            .script
            .as_deref()
            .or(options.preamble_script.as_deref());
        let body = self.body(leaf, options);
        buffer.push_example(&leaf.display_name, preamble, &body);
        debug!(title = %leaf.title, "appended example");
        env.registry.register_case(
            &format!("{} styleguide example appended", leaf.title),
            leaf.name,
            Ok(()),
        );
    }
}
