//! Ambient state shared by the passes over one method body.

use crate::ast_builder::{AstBuilder, ConvertTypeOptions};
use crate::settings::DecompilerSettings;
use jdecomp_metadata::{MemberReference, TypeCatalog, TypeRef};
use std::sync::Arc;

pub struct DecompilerContext {
    pub catalog: Arc<dyn TypeCatalog>,
    pub settings: DecompilerSettings,
    /// Type-syntax builder. Rules that need to build a cast type are skipped
    /// when it is absent.
    pub ast_builder: Option<Arc<AstBuilder>>,
    /// The class whose method is being rewritten; the type of `this`.
    pub current_type: Option<TypeRef>,
    /// The method being rewritten; supplies the return type for `return`.
    pub current_method: Option<Arc<MemberReference>>,
}

impl DecompilerContext {
    /// Context with default settings and an AST builder.
    pub fn new(catalog: Arc<dyn TypeCatalog>) -> Self {
        Self::with_settings(catalog, DecompilerSettings::default())
    }

    pub fn with_settings(catalog: Arc<dyn TypeCatalog>, settings: DecompilerSettings) -> Self {
        let options = ConvertTypeOptions {
            allow_wildcards: settings.allow_wildcards_in_casts,
            ..ConvertTypeOptions::default()
        };
        let ast_builder = AstBuilder::new(Arc::clone(&catalog)).with_options(options);
        Self {
            catalog,
            settings,
            ast_builder: Some(Arc::new(ast_builder)),
            current_type: None,
            current_method: None,
        }
    }

    pub fn without_ast_builder(mut self) -> Self {
        self.ast_builder = None;
        self
    }

    pub fn in_type(mut self, ty: TypeRef) -> Self {
        self.current_type = Some(ty);
        self
    }

    pub fn in_method(mut self, method: Arc<MemberReference>) -> Self {
        self.current_method = Some(method);
        self
    }

    #[inline]
    pub fn catalog(&self) -> &dyn TypeCatalog {
        self.catalog.as_ref()
    }

    pub fn ast_builder(&self) -> Option<&AstBuilder> {
        self.ast_builder.as_deref()
    }
}
