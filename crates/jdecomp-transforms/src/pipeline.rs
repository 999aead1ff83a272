//! Ordered execution of tree rewrites over one method body.

use crate::context::DecompilerContext;
use crate::error::TransformResult;
use crate::insert_conversions::InsertNecessaryConversionsTransform;
use jdecomp_ast::{NodeArena, NodeIndex};
use tracing::{debug, debug_span};

/// A rewrite pass over a subtree.
pub trait AstTransform {
    fn name(&self) -> &'static str;

    fn run(&mut self, arena: &mut NodeArena, root: NodeIndex) -> TransformResult;
}

/// The passes enabled by `context.settings`, in execution order.
pub fn enabled_transforms(context: &DecompilerContext) -> Vec<Box<dyn AstTransform + '_>> {
    let mut transforms: Vec<Box<dyn AstTransform + '_>> = Vec::new();
    if context.settings.insert_necessary_conversions {
        transforms.push(Box::new(InsertNecessaryConversionsTransform::new(context)));
    }
    transforms
}

/// Run every enabled pass over the subtree at `root`. Stops at the first
/// structural error.
pub fn run_transforms(context: &DecompilerContext, arena: &mut NodeArena, root: NodeIndex) -> TransformResult {
    for mut transform in enabled_transforms(context) {
        let _span = debug_span!("transform", name = transform.name()).entered();
        debug!(root = root.0, nodes = arena.len(), "running transform");
        transform.run(arena, root)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/pipeline_tests.rs"]
mod tests;
