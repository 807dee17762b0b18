mod ecma_compiler;
mod import_scanner;
mod module_linker;

pub use crate::{
  ecma_compiler::{EcmaCompiler, TranspileReturn},
  module_linker::LinkedModule,
};
