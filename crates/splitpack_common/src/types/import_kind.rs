#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ImportKind {
  /// `import foo from 'foo'`, `import 'foo'`
  Import,
  /// `export { foo } from 'foo'`, `export * from 'foo'`
  ExportFrom,
  /// `import('foo')`
  DynamicImport,
  /// `require('foo')`
  Require,
}
