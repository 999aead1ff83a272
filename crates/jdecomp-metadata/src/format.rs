//! Java source rendering of type references, for logs and test assertions.

use crate::catalog::TypeCatalog;
use crate::types::{TypeRef, WildcardBound};
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    catalog: &'a dyn TypeCatalog,
    qualified: bool,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(catalog: &'a dyn TypeCatalog) -> Self {
        Self {
            catalog,
            qualified: false,
        }
    }

    /// Render class names fully qualified (`java.util.List`).
    pub fn qualified(mut self) -> Self {
        self.qualified = true;
        self
    }

    pub fn format(&self, ty: &TypeRef) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    fn write_type(&self, out: &mut String, ty: &TypeRef) {
        match ty {
            TypeRef::Primitive(p) => out.push_str(p.keyword().unwrap_or("?")),
            TypeRef::Null => out.push_str("null"),
            TypeRef::TypeVariable(var) => out.push_str(&var.name),
            TypeRef::Array(element) => {
                self.write_type(out, element);
                out.push_str("[]");
            }
            TypeRef::Wildcard(WildcardBound::Unbounded) => out.push('?'),
            TypeRef::Wildcard(WildcardBound::Extends(bound)) => {
                out.push_str("? extends ");
                self.write_type(out, bound);
            }
            TypeRef::Wildcard(WildcardBound::Super(bound)) => {
                out.push_str("? super ");
                self.write_type(out, bound);
            }
            TypeRef::Class(class) => {
                match self.catalog.definition(class.def) {
                    Some(def) if self.qualified => out.push_str(&def.full_name()),
                    Some(def) => out.push_str(def.simple_name()),
                    None => {
                        let _ = write!(out, "<unknown {}>", class.def);
                    }
                }
                if !class.is_raw() {
                    out.push('<');
                    for (i, arg) in class.type_arguments.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_type(out, arg);
                    }
                    out.push('>');
                }
            }
        }
    }
}
