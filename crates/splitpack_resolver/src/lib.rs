// A wrapper around the `oxc_resolver` crate adding the alias table and the ordered module
// roots search of the bundler.

mod resolver;

pub use crate::resolver::{is_path_like_specifier, ResolveFailure, ResolveReturn, Resolver};

pub use splitpack_common::NormalizedResolveOptions;
