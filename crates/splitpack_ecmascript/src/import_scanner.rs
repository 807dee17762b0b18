use oxc::{
  ast::ast,
  ast_visit::{walk, Visit},
};

use splitpack_common::{ImportKind, RawImportRecord};

/// Collects every module request of a program: import/export declarations, `import('x')`
/// and `require('x')` with a string literal argument.
#[derive(Default)]
pub struct ImportScanner {
  pub records: Vec<RawImportRecord>,
}

impl ImportScanner {
  fn add(&mut self, specifier: &str, kind: ImportKind, start: u32) {
    self.records.push(RawImportRecord::new(specifier.to_string(), kind, start));
  }
}

impl<'a> Visit<'a> for ImportScanner {
  fn visit_import_declaration(&mut self, decl: &ast::ImportDeclaration<'a>) {
    self.add(decl.source.value.as_str(), ImportKind::Import, decl.span.start);
  }

  fn visit_export_named_declaration(&mut self, decl: &ast::ExportNamedDeclaration<'a>) {
    if let Some(source) = &decl.source {
      self.add(source.value.as_str(), ImportKind::ExportFrom, decl.span.start);
    }
    walk::walk_export_named_declaration(self, decl);
  }

  fn visit_export_all_declaration(&mut self, decl: &ast::ExportAllDeclaration<'a>) {
    self.add(decl.source.value.as_str(), ImportKind::ExportFrom, decl.span.start);
  }

  fn visit_import_expression(&mut self, expr: &ast::ImportExpression<'a>) {
    if let ast::Expression::StringLiteral(source) = &expr.source {
      self.add(source.value.as_str(), ImportKind::DynamicImport, expr.span.start);
    }
    walk::walk_import_expression(self, expr);
  }

  fn visit_call_expression(&mut self, expr: &ast::CallExpression<'a>) {
    if expr.callee.is_specific_id("require") && expr.arguments.len() == 1 {
      if let ast::Argument::StringLiteral(source) = &expr.arguments[0] {
        self.add(source.value.as_str(), ImportKind::Require, expr.span.start);
      }
    }
    walk::walk_call_expression(self, expr);
  }
}
