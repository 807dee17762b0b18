use std::path::Path;

use itertools::Itertools;
use oxc::{
  allocator::Allocator,
  ast_visit::Visit,
  codegen::{Codegen, CodegenOptions},
  diagnostics::OxcDiagnostic,
  parser::{Parser, ParserReturn},
  semantic::SemanticBuilder,
  span::SourceType,
  transformer::{TransformOptions, Transformer},
};

use splitpack_common::RawImportRecord;

use crate::{
  import_scanner::ImportScanner,
  module_linker::{LinkedModule, ModuleLinker},
};

fn join_diagnostics(errors: &[OxcDiagnostic]) -> String {
  errors.iter().map(ToString::to_string).join("; ")
}

pub struct TranspileReturn {
  pub code: String,
  /// Source map JSON pointing back at `source_path`.
  pub map: Option<String>,
}

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parses as an ES module first and falls back to a classic script, which is what
  /// untransformed third-party code usually is.
  fn parse<'a>(allocator: &'a Allocator, source: &'a str) -> Result<ParserReturn<'a>, String> {
    let ret = Parser::new(allocator, source, SourceType::mjs()).parse();
    if ret.errors.is_empty() && !ret.panicked {
      return Ok(ret);
    }
    let module_errors = join_diagnostics(&ret.errors);

    let ret = Parser::new(allocator, source, SourceType::cjs()).parse();
    if ret.errors.is_empty() && !ret.panicked {
      Ok(ret)
    } else {
      Err(module_errors)
    }
  }

  /// Module requests of `source`, in source order.
  pub fn scan_imports(source: &str) -> Result<Vec<RawImportRecord>, String> {
    let allocator = Allocator::default();
    let ret = Self::parse(&allocator, source)?;

    let mut scanner = ImportScanner::default();
    scanner.visit_program(&ret.program);
    Ok(scanner.records)
  }

  /// Rewrites `source` into the body of a module registry factory. `resolve` maps each
  /// module request to the id of the module it resolved to.
  pub fn link_module<F: Fn(&str) -> Option<String>>(
    source: &str,
    resolve: &F,
  ) -> Result<LinkedModule, String> {
    let allocator = Allocator::default();
    let ret = Self::parse(&allocator, source)?;

    let mut linker = ModuleLinker::new(resolve);
    linker.visit_program(&ret.program);
    Ok(linker.finish(source))
  }

  pub fn validate_target(target: &str) -> Result<(), String> {
    TransformOptions::from_target(target).map(|_| ())
  }

  /// Lowers `source` to the syntax of `target` (`es2015`, `es2020`, `esnext`, ...).
  pub fn transpile(
    source: &str,
    source_path: &Path,
    target: &str,
  ) -> Result<TranspileReturn, String> {
    let options = TransformOptions::from_target(target)?;

    let allocator = Allocator::default();
    let ParserReturn { mut program, .. } = Self::parse(&allocator, source)?;

    let semantic_ret = SemanticBuilder::new().build(&program);
    if !semantic_ret.errors.is_empty() {
      return Err(join_diagnostics(&semantic_ret.errors));
    }
    let scoping = semantic_ret.semantic.into_scoping();

    let transformer_ret = Transformer::new(&allocator, source_path, &options)
      .build_with_scoping(scoping, &mut program);
    if !transformer_ret.errors.is_empty() {
      return Err(join_diagnostics(&transformer_ret.errors));
    }

    let ret = Codegen::new()
      .with_options(CodegenOptions {
        source_map_path: Some(source_path.to_path_buf()),
        ..CodegenOptions::default()
      })
      .build(&program);

    Ok(TranspileReturn { code: ret.code, map: ret.map.map(|map| map.to_json_string()) })
  }
}

#[cfg(test)]
mod tests {
  use splitpack_common::ImportKind;

  use super::*;

  #[test]
  fn scan_all_kinds_of_imports() {
    let records = EcmaCompiler::scan_imports(
      r"
        import Modernizr from 'modernizr';
        import $ from 'jquery';
        import './components/test';
        export { default as Alert } from 'Alert';
        export * from './utils';
        const lazy = () => import('./lazy');
        const legacy = require('./legacy');
        require(dynamicName);
      ",
    )
    .unwrap();

    let found =
      records.iter().map(|rec| (rec.specifier.as_str(), rec.kind)).collect::<Vec<_>>();
    assert_eq!(
      found,
      vec![
        ("modernizr", ImportKind::Import),
        ("jquery", ImportKind::Import),
        ("./components/test", ImportKind::Import),
        ("Alert", ImportKind::ExportFrom),
        ("./utils", ImportKind::ExportFrom),
        ("./lazy", ImportKind::DynamicImport),
        ("./legacy", ImportKind::Require),
      ]
    );
  }

  #[test]
  fn scripts_that_are_not_modules_still_scan() {
    let records = EcmaCompiler::scan_imports("with (window) { require('./a'); }").unwrap();
    assert_eq!(records.len(), 1);
  }

  #[test]
  fn syntax_errors_are_reported() {
    assert!(EcmaCompiler::scan_imports("import from from;").is_err());
  }

  #[test]
  fn transpile_lowers_syntax_newer_than_the_target() {
    let ret =
      EcmaCompiler::transpile("const add = (a, b) => a + b;", Path::new("add.js"), "es2015")
        .unwrap();
    assert!(ret.code.contains("a + b"));
    assert!(ret.map.unwrap().contains("add.js"));

    let ret = EcmaCompiler::transpile("a ??= b;", Path::new("a.js"), "es2015").unwrap();
    assert!(!ret.code.contains("??="));
  }

  #[test]
  fn unknown_targets_are_rejected() {
    assert!(EcmaCompiler::transpile("a;", Path::new("a.js"), "es1999").is_err());
  }
}
