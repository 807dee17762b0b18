use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use dashmap::DashMap;
use oxc_resolver::{ResolveError, ResolveOptions as OxcResolverOptions, Resolver as OxcResolver};
use sugar_path::SugarPath;

use splitpack_common::{AliasItem, NormalizedResolveOptions};
use splitpack_utils::path_ext::PathExt;

/// `./a`, `../a`, `/a`, `C:\a` are paths. Everything else is looked up in the module roots.
pub fn is_path_like_specifier(specifier: &str) -> bool {
  specifier == "."
    || specifier == ".."
    || specifier.starts_with("./")
    || specifier.starts_with("../")
    || specifier.starts_with('/')
    || Path::new(specifier).is_absolute()
}

/// A plain directory name such as `node_modules` is searched hierarchically.
fn is_hierarchical_root(root: &str) -> bool {
  !root.contains(['/', '\\']) && root != "." && root != ".." && !Path::new(root).is_absolute()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReturn {
  pub path: ArcStr,
  pub via_alias: bool,
}

#[derive(Debug)]
pub struct ResolveFailure {
  pub searched: Vec<String>,
  pub reason: String,
}

/// One entry of the module search path, with a resolver that only looks there. Bare
/// specifiers go through it unchanged, so package `exports` and `browser` fields apply.
#[derive(Debug)]
struct ModuleRoot {
  /// `node_modules` for a hierarchical root, an absolute directory otherwise.
  modules_dir: String,
  hierarchical: bool,
  resolver: OxcResolver,
}

impl ModuleRoot {
  fn search_path(&self, dir: &Path) -> Vec<String> {
    if self.hierarchical {
      let candidate = |ancestor: &Path| ancestor.join(&self.modules_dir);
      dir.ancestors().map(|ancestor| candidate(ancestor).to_slash_lossy().into_owned()).collect()
    } else {
      vec![Path::new(&self.modules_dir).to_slash_lossy().into_owned()]
    }
  }
}

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
  alias: Vec<AliasItem>,
  inner: OxcResolver,
  roots: Vec<ModuleRoot>,
  resolved: DashMap<(PathBuf, String), ResolveReturn>,
}

impl Resolver {
  pub fn new(options: &NormalizedResolveOptions, cwd: PathBuf) -> Self {
    let resolve_options = OxcResolverOptions {
      extensions: options.extensions.clone(),
      main_fields: vec!["browser".to_string(), "module".to_string(), "main".to_string()],
      alias_fields: vec![vec!["browser".to_string()]],
      condition_names: vec!["import".to_string(), "browser".to_string(), "default".to_string()],
      // Keep the paths the way the project spells them, ids are derived from them.
      symlinks: false,
      ..OxcResolverOptions::default()
    };

    // Exact aliases are consulted before prefix ones, each group in declaration order.
    let mut alias = options.alias.clone();
    alias.sort_by_key(|item| !item.exact);

    let inner = OxcResolver::new(resolve_options.clone());
    let roots = options
      .modules
      .iter()
      .map(|root| {
        let hierarchical = is_hierarchical_root(root);
        let modules_dir = if hierarchical {
          root.clone()
        } else {
          cwd.join(root).normalize().to_string_lossy().into_owned()
        };
        let resolver = inner.clone_with_options(OxcResolverOptions {
          modules: vec![modules_dir.clone()],
          ..resolve_options.clone()
        });
        ModuleRoot { modules_dir, hierarchical, resolver }
      })
      .collect();

    Self { cwd, alias, inner, roots, resolved: DashMap::default() }
  }

  /// Resolves `specifier` as imported from a file in `dir`. Successful results are memoized
  /// per `(dir, specifier)`, so repeated lookups always agree.
  pub fn resolve(&self, dir: &Path, specifier: &str) -> Result<ResolveReturn, ResolveFailure> {
    let key = (dir.to_path_buf(), specifier.to_string());
    if let Some(hit) = self.resolved.get(&key) {
      return Ok(hit.value().clone());
    }

    let resolved = self.resolve_uncached(dir, specifier)?;
    log::trace!("Resolved {specifier:?} from {} to {}", dir.display(), resolved.path);
    Ok(self.resolved.entry(key).or_insert(resolved).value().clone())
  }

  fn resolve_uncached(&self, dir: &Path, specifier: &str) -> Result<ResolveReturn, ResolveFailure> {
    if let Some(replaced) = self.alias.iter().find_map(|alias| alias.apply(specifier)) {
      let path = if is_path_like_specifier(&replaced) {
        self.resolve_alias_target(&self.cwd.join(&replaced).normalize())?
      } else {
        self.resolve_bare(dir, &replaced)?
      };
      return Ok(ResolveReturn { path, via_alias: true });
    }

    let path = if is_path_like_specifier(specifier) {
      self.resolve_path(dir, specifier)?
    } else {
      self.resolve_bare(dir, specifier)?
    };
    Ok(ResolveReturn { path, via_alias: false })
  }

  /// An alias points at a concrete file. The file is taken as is when it exists, the
  /// extension search only kicks in when it doesn't.
  fn resolve_alias_target(&self, target: &Path) -> Result<ArcStr, ResolveFailure> {
    self.resolve_path(&self.cwd, target.expect_to_str())
  }

  fn resolve_path(&self, dir: &Path, specifier: &str) -> Result<ArcStr, ResolveFailure> {
    self
      .inner
      .resolve(dir, specifier)
      .map(|resolution| into_arcstr(&resolution.full_path()))
      .map_err(|err| ResolveFailure {
        searched: vec![dir.join(specifier).normalize().to_slash_lossy().into_owned()],
        reason: err.to_string(),
      })
  }

  /// Tries each module root in declaration order. Only "not found" moves on to the next
  /// root, any other failure (e.g. a path a package doesn't export) is final.
  fn resolve_bare(&self, dir: &Path, specifier: &str) -> Result<ArcStr, ResolveFailure> {
    let mut searched = vec![];

    for root in &self.roots {
      searched.extend(root.search_path(dir));
      match root.resolver.resolve(dir, specifier) {
        Ok(resolution) => return Ok(into_arcstr(&resolution.full_path())),
        Err(ResolveError::NotFound(_)) => {}
        Err(err) => return Err(ResolveFailure { searched, reason: err.to_string() }),
      }
    }

    Err(ResolveFailure { searched, reason: "Cannot find module".to_string() })
  }
}

fn into_arcstr(path: &Path) -> ArcStr {
  path.expect_to_str().into()
}
