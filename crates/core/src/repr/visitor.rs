use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::visit::Visit;

/// One `let` binding inside a function body.
#[derive(Debug, Clone)]
pub struct BindingIr {
    pub name: String,
    pub line: usize,
    pub column: usize,
}

/// One method call inside a function body.
#[derive(Debug, Clone)]
pub struct MethodCallIr {
    pub method: String,
    pub line: usize,
    pub column: usize,
}

/// Plain-data view of one function, safe to share across checker threads
/// (unlike the syn AST it is extracted from).
#[derive(Debug, Clone)]
pub struct FunctionIr {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub bindings: Vec<BindingIr>,
    pub method_calls: Vec<MethodCallIr>,
}

/// Extracts [`FunctionIr`] records from a parsed file. Functions inside
/// `#[cfg(test)]` modules are skipped: checkers judge shipped code.
pub struct FileVisitor {
    pub functions: Vec<FunctionIr>,
}

impl FileVisitor {
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    pub fn extract(ast: &syn::File) -> Vec<FunctionIr> {
        let mut visitor = Self::new();
        visitor.visit_file(ast);
        visitor.functions
    }

    fn record_fn(&mut self, name: String, span: Span, block: &syn::Block) {
        let mut body = BodyVisitor {
            bindings: Vec::new(),
            method_calls: Vec::new(),
        };
        body.visit_block(block);

        self.functions.push(FunctionIr {
            name,
            start_line: span.start().line,
            end_line: span.end().line,
            bindings: body.bindings,
            method_calls: body.method_calls,
        });
    }
}

impl Default for FileVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ast> Visit<'ast> for FileVisitor {
    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if is_test_module(node) {
            return;
        }
        syn::visit::visit_item_mod(self, node);
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.record_fn(node.sig.ident.to_string(), node.span(), &node.block);
        syn::visit::visit_item_fn(self, node);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        self.record_fn(node.sig.ident.to_string(), node.span(), &node.block);
        syn::visit::visit_impl_item_fn(self, node);
    }
}

struct BodyVisitor {
    bindings: Vec<BindingIr>,
    method_calls: Vec<MethodCallIr>,
}

impl<'ast> Visit<'ast> for BodyVisitor {
    fn visit_local(&mut self, node: &'ast syn::Local) {
        if let Some(ident) = binding_ident(&node.pat) {
            let span = ident.span();
            self.bindings.push(BindingIr {
                name: ident.to_string(),
                line: span.start().line,
                column: span.start().column,
            });
        }
        syn::visit::visit_local(self, node);
    }

    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        let span = node.method.span();
        self.method_calls.push(MethodCallIr {
            method: node.method.to_string(),
            line: span.start().line,
            column: span.start().column,
        });
        syn::visit::visit_expr_method_call(self, node);
    }
}

fn binding_ident(pat: &syn::Pat) -> Option<&syn::Ident> {
    match pat {
        syn::Pat::Ident(p) => Some(&p.ident),
        syn::Pat::Type(p) => binding_ident(&p.pat),
        _ => None,
    }
}

fn is_test_module(node: &syn::ItemMod) -> bool {
    node.attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .meta
                .require_list()
                .ok()
                .is_some_and(|list| list.tokens.to_string().contains("test"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn functions_of(source: &str) -> Vec<FunctionIr> {
        let ast = syn::parse_file(source).unwrap();
        FileVisitor::extract(&ast)
    }

    #[test]
    fn test_extracts_bindings_and_calls() {
        let source = "fn f() {\n    let x = 1;\n    let x = compute().unwrap();\n}\n";
        let functions = functions_of(source);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "f");
        assert_eq!(functions[0].bindings.len(), 2);
        assert_eq!(functions[0].bindings[1].line, 3);
        assert_eq!(functions[0].method_calls.len(), 1);
        assert_eq!(functions[0].method_calls[0].method, "unwrap");
    }

    #[test]
    fn test_skips_test_modules() {
        let source =
            "#[cfg(test)]\nmod tests {\n    fn helper() { let x = 1; }\n}\nfn real() {}\n";
        let functions = functions_of(source);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "real");
    }

    #[test]
    fn test_impl_methods_are_extracted() {
        let source = "struct S;\nimpl S {\n    fn m(&self) { let v = self.get().expect(\"x\"); }\n}\n";
        let functions = functions_of(source);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "m");
        assert_eq!(functions[0].method_calls.len(), 2);
    }
}
