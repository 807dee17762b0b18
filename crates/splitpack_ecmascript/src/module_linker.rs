use oxc::{
  ast::ast,
  ast_visit::{walk, Visit},
  span::{GetSpan, Span},
};

/// Name of the local holding the `default` export of `export default <expression>`.
const DEFAULT_EXPORT: &str = "__splitpack_default__";

pub struct LinkedModule {
  /// Module body with its import and export syntax rewritten.
  pub code: String,
  /// Statements run before `code` in the registry factory. Defines the export getters of an
  /// ES module, empty for scripts.
  pub prologue: String,
}

/// Rewrites a module into the body of a registry factory `function (module, exports, require)`.
///
/// Module requests become `require` calls on the ids the resolver picked, exports become live
/// getters on `exports`. An edit never changes the number of lines it covers, so a source map
/// of the module stays line accurate.
pub struct ModuleLinker<'r, F: Fn(&str) -> Option<String>> {
  resolve: &'r F,
  edits: Vec<(Span, String)>,
  generated_exports: Vec<(String, String)>,
  has_module_syntax: bool,
  import_count: usize,
}

fn quote(value: &str) -> String {
  serde_json::Value::from(value).to_string()
}

/// The value of `name` imported from the module held by `binding`.
fn imported_member(binding: &str, name: &str) -> String {
  if name == "default" {
    format!("require.i({binding})")
  } else {
    format!("{binding}[{}]", quote(name))
  }
}

fn declared_names(declaration: &ast::Declaration<'_>) -> Vec<String> {
  match declaration {
    ast::Declaration::VariableDeclaration(decl) => decl
      .declarations
      .iter()
      .flat_map(|declarator| declarator.id.get_binding_identifiers())
      .map(|ident| ident.name.to_string())
      .collect(),
    ast::Declaration::FunctionDeclaration(func) => {
      func.id.iter().map(|ident| ident.name.to_string()).collect()
    }
    ast::Declaration::ClassDeclaration(class) => {
      class.id.iter().map(|ident| ident.name.to_string()).collect()
    }
    _ => vec![],
  }
}

impl<'r, F: Fn(&str) -> Option<String>> ModuleLinker<'r, F> {
  pub fn new(resolve: &'r F) -> Self {
    Self {
      resolve,
      edits: vec![],
      generated_exports: vec![],
      has_module_syntax: false,
      import_count: 0,
    }
  }

  pub fn finish(self, source: &str) -> LinkedModule {
    let prologue = if self.has_module_syntax {
      let getters = self
        .generated_exports
        .iter()
        .map(|(name, local)| format!("{}: function () {{ return {local}; }}", quote(name)))
        .collect::<Vec<_>>();
      format!("\"use strict\"; require.d(exports, {{ {} }});", getters.join(", "))
    } else {
      String::new()
    };
    LinkedModule { code: apply_edits(source, self.edits), prologue }
  }

  fn replace(&mut self, span: Span, replacement: String) {
    self.edits.push((span, replacement));
  }

  fn export(&mut self, name: impl Into<String>, local: impl Into<String>) {
    self.generated_exports.push((name.into(), local.into()));
  }

  fn require(&self, specifier: &str) -> String {
    let id = (self.resolve)(specifier).unwrap_or_else(|| specifier.to_string());
    format!("require({})", quote(&id))
  }

  fn next_binding(&mut self) -> String {
    let binding = format!("__splitpack_import_{}__", self.import_count);
    self.import_count += 1;
    binding
  }
}

impl<'a, F: Fn(&str) -> Option<String>> Visit<'a> for ModuleLinker<'_, F> {
  fn visit_import_declaration(&mut self, decl: &ast::ImportDeclaration<'a>) {
    self.has_module_syntax = true;
    let require = self.require(decl.source.value.as_str());
    let Some(specifiers) = decl.specifiers.as_ref().filter(|specifiers| !specifiers.is_empty())
    else {
      self.replace(decl.span, format!("{require};"));
      return;
    };

    let binding = self.next_binding();
    let mut declarators = vec![format!("{binding} = {require}")];
    for specifier in specifiers {
      declarators.push(match specifier {
        ast::ImportDeclarationSpecifier::ImportSpecifier(specifier) => {
          let member = imported_member(&binding, &specifier.imported.name());
          format!("{} = {member}", specifier.local.name)
        }
        ast::ImportDeclarationSpecifier::ImportDefaultSpecifier(specifier) => {
          format!("{} = {}", specifier.local.name, imported_member(&binding, "default"))
        }
        ast::ImportDeclarationSpecifier::ImportNamespaceSpecifier(specifier) => {
          format!("{} = {binding}", specifier.local.name)
        }
      });
    }
    self.replace(decl.span, format!("var {};", declarators.join(", ")));
  }

  fn visit_export_named_declaration(&mut self, decl: &ast::ExportNamedDeclaration<'a>) {
    self.has_module_syntax = true;

    if let Some(source) = &decl.source {
      let binding = self.next_binding();
      let require = self.require(source.value.as_str());
      for specifier in &decl.specifiers {
        let member = imported_member(&binding, &specifier.local.name());
        self.export(specifier.exported.name().as_str(), member);
      }
      self.replace(decl.span, format!("var {binding} = {require};"));
      return;
    }

    if let Some(declaration) = &decl.declaration {
      // `export const a = 1;` keeps the declaration, only the keyword goes.
      self.replace(Span::new(decl.span.start, declaration.span().start), String::new());
      for name in declared_names(declaration) {
        self.export(name.clone(), name);
      }
      self.visit_declaration(declaration);
      return;
    }

    for specifier in &decl.specifiers {
      self.export(specifier.exported.name().as_str(), specifier.local.name().as_str());
    }
    self.replace(decl.span, String::new());
  }

  fn visit_export_default_declaration(&mut self, decl: &ast::ExportDefaultDeclaration<'a>) {
    self.has_module_syntax = true;
    let declaration_span = decl.declaration.span();
    let keyword = Span::new(decl.span.start, declaration_span.start);

    let named = match &decl.declaration {
      ast::ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        func.id.as_ref().map(|ident| ident.name.to_string())
      }
      ast::ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        class.id.as_ref().map(|ident| ident.name.to_string())
      }
      _ => None,
    };

    match named {
      Some(name) => {
        self.replace(keyword, String::new());
        self.export("default", name);
      }
      None => {
        self.replace(keyword, format!("var {DEFAULT_EXPORT} = "));
        if decl.declaration.as_expression().is_none() {
          // An anonymous function or class is now an expression and needs its own `;`.
          let end = Span::new(declaration_span.end, declaration_span.end);
          self.replace(end, ";".to_string());
        }
        self.export("default", DEFAULT_EXPORT);
      }
    }
    walk::walk_export_default_declaration(self, decl);
  }

  fn visit_export_all_declaration(&mut self, decl: &ast::ExportAllDeclaration<'a>) {
    self.has_module_syntax = true;
    let require = self.require(decl.source.value.as_str());
    if let Some(exported) = &decl.exported {
      let binding = self.next_binding();
      self.export(exported.name().as_str(), binding.as_str());
      self.replace(decl.span, format!("var {binding} = {require};"));
    } else {
      self.replace(decl.span, format!("require.s(exports, {require});"));
    }
  }

  fn visit_import_expression(&mut self, expr: &ast::ImportExpression<'a>) {
    if let ast::Expression::StringLiteral(source) = &expr.source {
      let require = self.require(source.value.as_str());
      let replacement = format!("Promise.resolve().then(function () {{ return {require}; }})");
      self.replace(expr.span, replacement);
    } else {
      walk::walk_import_expression(self, expr);
    }
  }

  fn visit_call_expression(&mut self, expr: &ast::CallExpression<'a>) {
    if expr.callee.is_specific_id("require") && expr.arguments.len() == 1 {
      if let ast::Argument::StringLiteral(source) = &expr.arguments[0] {
        let id = (self.resolve)(source.value.as_str());
        if let Some(id) = id {
          self.replace(source.span, quote(&id));
        }
        return;
      }
    }
    walk::walk_call_expression(self, expr);
  }
}

/// Applies non overlapping `edits`. Lines removed by an edit are put back as empty lines.
fn apply_edits(source: &str, mut edits: Vec<(Span, String)>) -> String {
  edits.sort_by_key(|(span, _)| span.start);

  let mut code = String::with_capacity(source.len());
  let mut last = 0;
  for (span, replacement) in edits {
    let (start, end) = (span.start as usize, span.end as usize);
    code.push_str(&source[last..start]);
    code.push_str(&replacement);
    code.push_str(&"\n".repeat(source[start..end].matches('\n').count()));
    last = end;
  }
  code.push_str(&source[last..]);
  code
}
