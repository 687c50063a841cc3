//! # Sanitizer
//!
//! Runs the cleaning passes over a parsed document, always in the same order.
//! The order matters: styles and Word-only tags have to be gone before empty
//! nodes are pruned, or containers that only held them would survive.

pub mod passes;

use markup5ever_rcdom::RcDom;
use tracing::debug;

pub use passes::{
    CleanHtmlTagAttributes, EnsureQuotedAttributes, NormalizeNbsp, Pass, RemoveComments,
    RemoveEmptyNodes, RemoveFromHeadSection, RemoveInlineStyles, RemoveLinkAttributes,
    RemoveMsoClasses, RemoveStyleTags, RemoveTableAttributes, RemoveWordTags,
};

/// An ordered list of passes
pub struct Sanitizer {
    passes: Vec<Box<dyn Pass>>,
}

impl Sanitizer {
    /// Creates a sanitizer holding every pass in pipeline order
    pub fn new() -> Self {
        let mut sanitizer = Self::empty();
        sanitizer.register_default_passes();
        sanitizer
    }

    /// Creates a sanitizer with no passes registered
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// Appends a pass to the end of the pipeline
    pub fn register<P: Pass + 'static>(&mut self, pass: P) {
        self.passes.push(Box::new(pass));
    }

    fn register_default_passes(&mut self) {
        self.register(RemoveInlineStyles);
        self.register(RemoveMsoClasses);
        self.register(RemoveStyleTags);
        self.register(RemoveWordTags);
        self.register(CleanHtmlTagAttributes);
        self.register(RemoveFromHeadSection);
        self.register(RemoveComments);
        self.register(RemoveEmptyNodes);
        self.register(NormalizeNbsp);
        self.register(RemoveLinkAttributes);
        self.register(RemoveTableAttributes);
        self.register(EnsureQuotedAttributes);
    }

    /// Names of the registered passes, in the order they run
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Runs every registered pass over the document, in order
    pub fn sanitize(&self, dom: RcDom) -> RcDom {
        for pass in self.passes.iter() {
            debug!(pass = pass.name(), "applying pass");
            pass.apply(&dom.document);
        }

        dom
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the full pipeline over a document
pub fn sanitize(dom: RcDom) -> RcDom {
    Sanitizer::new().sanitize(dom)
}
