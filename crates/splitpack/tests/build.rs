mod common;

use common::{app_project, Project, APP_CONFIG, JQUERY, JQUERY_SOURCE};
use splitpack::{BuildStage, ChunkKind, OutputAssetKind};

const SINGLE_ENTRY: &str = r#"{ "entry": { "index": "./index.js" } }"#;

#[tokio::test]
async fn vendor_and_application_modules_are_split() {
  let project = app_project();
  let mut bundler = project.bundler(APP_CONFIG);
  let output = bundler.write().await.unwrap();
  assert_eq!(bundler.stage(), BuildStage::Emitted);

  let names = output.chunks.iter().map(|chunk| chunk.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["index", "vendor"]);

  let index = output.chunk("index").unwrap();
  assert!(index.kind.is_entry());
  assert_eq!(index.url, "/index.js");
  let stable_ids = index.modules.iter().map(|module| module.stable_id.as_str()).collect::<Vec<_>>();
  assert_eq!(
    stable_ids,
    [".modernizrrc", "src/util/dom.js", "src/scripts/components/test.js", "src/scripts/index.js"]
  );

  let vendor = output.chunk("vendor").unwrap();
  assert_eq!(vendor.kind, ChunkKind::Vendor);
  assert_eq!(vendor.modules.len(), 1);
  assert_eq!(vendor.modules[0].stable_id, JQUERY);
  assert_eq!(vendor.modules[0].importers, ["src/scripts/index.js"]);

  for file in ["index.js", "index.js.map", "vendor.js", "vendor.js.map"] {
    assert!(project.exists(&format!("dist/js/{file}")), "{file} was not written");
  }
  let maps = output.assets.iter().filter(|asset| asset.kind == OutputAssetKind::SourceMap);
  assert_eq!(maps.count(), 2);
  assert_eq!(output.assets.len(), 4);
}

#[tokio::test]
async fn modules_go_through_the_first_matching_rule() {
  let project = app_project();
  let output = project.bundler(APP_CONFIG).generate().await.unwrap();

  let pipeline_of = |stable_id: &str| {
    output
      .chunks
      .iter()
      .flat_map(|chunk| &chunk.modules)
      .find(|module| module.stable_id == stable_id)
      .and_then(|module| module.pipeline.clone())
  };
  assert_eq!(pipeline_of("src/scripts/index.js").as_deref(), Some("script"));
  assert_eq!(pipeline_of(".modernizrrc").as_deref(), Some("modernizr"));
  assert_eq!(pipeline_of(JQUERY), None);

  // Excluded modules are emitted byte for byte.
  assert!(output.asset("vendor.js").unwrap().contains(JQUERY_SOURCE));

  let index = output.asset("index.js").unwrap();
  assert!(!index.contains("?."));
  assert!(!index.contains("??"));
  assert!(index.contains("Modernizr"));
  assert!(index.contains("\"featureDetects\":[\"touchevents\"]"));
}

#[tokio::test]
async fn bundles_register_their_modules_and_start_their_entries() {
  let project = app_project();
  let output = project.bundler(APP_CONFIG).generate().await.unwrap();
  let index = output.asset("index.js").unwrap();
  let vendor = output.asset("vendor.js").unwrap();

  for bundle in [index, vendor] {
    let module_syntax = bundle.lines().map(str::trim_start).find(|line| {
      line.starts_with("import ") || line.starts_with("import{") || line.starts_with("export ")
    });
    assert_eq!(module_syntax, None, "{bundle}");
    assert!(bundle.starts_with("var __splitpack__ = (function (root) {"), "{bundle}");
  }

  for stable_id in [".modernizrrc", "src/util/dom.js", "src/scripts/index.js"] {
    let define = format!("__splitpack__.define(\"{stable_id}\", function (module, exports, ");
    assert!(index.contains(&define), "{stable_id} is not registered");
  }
  // Requests are rewritten to the ids of the modules they resolved to.
  assert!(index.contains(&format!("require(\"{JQUERY}\")")));
  assert!(index.contains("require(\"src/util/dom.js\")"));
  assert!(index.contains("require(\".modernizrrc\")"));
  let getters = "require.d(exports, { \"initTest\": function () { return initTest; } });";
  assert!(index.contains(getters), "{index}");

  let start =
    "__splitpack__.require(\"src/scripts/index.js\");\n//# sourceMappingURL=index.js.map\n";
  assert!(index.ends_with(start), "{index}");
  assert!(vendor.contains(&format!("__splitpack__.define(\"{JQUERY}\"")));
  assert!(!vendor.contains("__splitpack__.require("), "the vendor bundle only registers modules");
}

#[tokio::test]
async fn external_source_maps_are_linked_from_their_bundle() {
  let project = app_project();
  project.bundler(APP_CONFIG).write().await.unwrap();

  let index = project.read("dist/js/index.js");
  assert!(index.ends_with("//# sourceMappingURL=index.js.map\n"), "{index}");

  let map: serde_json::Value = serde_json::from_str(&project.read("dist/js/index.js.map")).unwrap();
  let sources = map["sources"].as_array().unwrap();
  for source in [".modernizrrc", "src/scripts/index.js", "src/util/dom.js"] {
    assert!(sources.iter().any(|s| s.as_str().unwrap().ends_with(source)), "{source}");
  }
}

#[tokio::test]
async fn development_builds_inline_their_source_maps() {
  let project = app_project();
  let mut options = project.options(APP_CONFIG);
  options.mode = Some(splitpack::Mode::Development);
  let output = splitpack::Bundler::new(options).unwrap().generate().await.unwrap();

  assert_eq!(output.assets.len(), 2);
  assert!(output.chunks.iter().all(|chunk| chunk.sourcemap_filename.is_none()));
  assert!(output
    .asset("index.js")
    .unwrap()
    .contains("//# sourceMappingURL=data:application/json;charset=utf-8;base64,"));
}

#[tokio::test]
async fn source_maps_can_be_turned_off() {
  let project = app_project();
  let mut options = project.options(APP_CONFIG);
  options.devtool = Some(splitpack::SourceMapKind::None);
  let output = splitpack::Bundler::new(options).unwrap().generate().await.unwrap();

  assert_eq!(output.assets.len(), 2);
  assert!(output.assets.iter().all(|asset| !asset.content.contains("sourceMappingURL")));
}

#[tokio::test]
async fn exact_alias_beats_a_file_on_the_search_path() {
  let project = app_project();
  project.write("src/modernizr.js", "export default 'shadowed';\n");
  let output = project.bundler(APP_CONFIG).generate().await.unwrap();

  let index = output.chunk("index").unwrap();
  assert!(index.contains(".modernizrrc"));
  assert!(!index.contains("src/modernizr.js"));
}

const TWO_ENTRIES: &[(&str, &str)] = &[
  ("a.js", "import './shared';\nimport 'lib';\n"),
  ("b.js", "import './shared';\nimport './only-b';\nimport 'lib';\n"),
  ("shared.js", "export const shared = 1;\n"),
  ("only-b.js", "export const onlyB = 1;\n"),
  ("node_modules/lib/index.js", "export default 1;\n"),
];

#[tokio::test]
async fn shared_modules_belong_to_the_first_entry_that_reaches_them() {
  let project = Project::new(TWO_ENTRIES);

  for (entries, first, second) in [
    (r#"{ "a": "./a.js", "b": "./b.js" }"#, "a", "b"),
    (r#"{ "b": "./b.js", "a": "./a.js" }"#, "b", "a"),
  ] {
    let config = format!(r#"{{ "entry": {entries} }}"#);
    let output = project.bundler(&config).generate().await.unwrap();

    let names = output.chunks.iter().map(|chunk| chunk.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, [first, second, "vendor"]);
    assert!(output.chunk(first).unwrap().contains("shared.js"));
    assert!(!output.chunk(second).unwrap().contains("shared.js"));
    assert!(output.chunk("b").unwrap().contains("only-b.js"));
    assert!(output.chunk("vendor").unwrap().contains("node_modules/lib/index.js"));

    let mut placed = output
      .chunks
      .iter()
      .flat_map(|chunk| chunk.modules.iter().map(|module| module.stable_id.as_str()))
      .collect::<Vec<_>>();
    placed.sort_unstable();
    assert_eq!(placed, ["a.js", "b.js", "node_modules/lib/index.js", "only-b.js", "shared.js"]);
  }
}

#[tokio::test]
async fn no_vendor_chunk_without_vendor_modules() {
  let project = Project::new(&[("index.js", "import './a';\n"), ("a.js", "export {};\n")]);
  let output = project.bundler(SINGLE_ENTRY).generate().await.unwrap();

  assert_eq!(output.chunks.len(), 1);
  assert_eq!(output.chunks[0].name, "index");
  assert!(output.warnings.is_empty());
}

#[tokio::test]
async fn entries_made_only_of_vendor_modules_are_reported() {
  let project = Project::new(&[("node_modules/lib/index.js", "export default 1;\n")]);
  let output = project.bundler(r#"{ "entry": { "lib": "lib" } }"#).generate().await.unwrap();

  assert_eq!(output.chunk("lib").unwrap().modules.len(), 0);
  assert!(output.chunk("vendor").unwrap().contains("node_modules/lib/index.js"));
  let warnings = output.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
  assert!(
    warnings.iter().any(|w| w.starts_with("Entry \"lib\" only reaches vendor modules")),
    "{warnings:?}"
  );
}

#[tokio::test]
async fn entries_whose_modules_were_claimed_earlier_are_reported() {
  let project = Project::new(&[("x.js", "export default 1;\n")]);
  let config = r#"{ "entry": { "a": "./x.js", "b": "./x.js" } }"#;
  let output = project.bundler(config).generate().await.unwrap();

  assert!(output.chunk("a").unwrap().contains("x.js"));
  assert_eq!(output.chunk("b").unwrap().modules.len(), 0);
  let warnings = output.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
  assert!(
    warnings.iter().any(|w| w.starts_with("Entry \"b\" has an empty bundle, its modules were \
      claimed by an earlier entry")),
    "{warnings:?}"
  );
  assert!(!warnings.iter().any(|w| w.contains("only reaches vendor modules")), "{warnings:?}");
}

#[tokio::test]
async fn circular_dependencies_are_bundled_with_a_warning() {
  let project = Project::new(&[
    ("index.js", "import './a';\n"),
    ("a.js", "import './b';\nexport const a = 1;\n"),
    ("b.js", "import './a';\nexport const b = 1;\n"),
  ]);
  let output = project.bundler(SINGLE_ENTRY).generate().await.unwrap();

  let index = output.chunk("index").unwrap();
  assert_eq!(index.modules.len(), 3);
  assert_eq!(index.modules.last().unwrap().stable_id, "index.js");
  let warnings = output.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
  assert!(warnings.iter().any(|warning| warning.contains("Circular dependency")), "{warnings:?}");
}

#[tokio::test]
async fn dynamic_imports_are_bundled_with_their_importer() {
  let project = Project::new(&[
    ("index.js", "const load = () => import('./lazy');\n"),
    ("lazy.js", "export default 1;\n"),
  ]);
  let output = project.bundler(SINGLE_ENTRY).generate().await.unwrap();

  assert!(output.chunk("index").unwrap().contains("lazy.js"));
  assert!(output.warnings.iter().any(|warning| warning.to_string().contains("import(\"./lazy\")")));
}

#[tokio::test]
async fn filename_templates_are_applied() {
  let project = Project::new(TWO_ENTRIES);
  let output = project
    .bundler(
      r#"{
        "entry": { "a": "./a.js", "b": "./b.js" },
        "output": {
          "publicPath": "https://cdn.example.com/js/",
          "filename": "entries/[name].bundle.js",
          "chunkFilename": "chunks/[name].js",
          "sourceMapFilename": "maps/[file].map"
        },
        "devtool": "external"
      }"#,
    )
    .write()
    .await
    .unwrap();

  let a = output.chunk("a").unwrap();
  assert_eq!(a.filename, "entries/a.bundle.js");
  assert_eq!(a.url, "https://cdn.example.com/js/entries/a.bundle.js");
  assert_eq!(a.sourcemap_filename.as_deref(), Some("maps/entries/a.bundle.js.map"));
  assert_eq!(output.chunk("vendor").unwrap().filename, "chunks/vendor.js");

  let bundle = project.read("dist/entries/a.bundle.js");
  assert!(bundle.ends_with("//# sourceMappingURL=../maps/entries/a.bundle.js.map\n"), "{bundle}");
  assert!(project.exists("dist/maps/entries/a.bundle.js.map"));
}

#[tokio::test]
async fn builds_are_deterministic() {
  let first = app_project().bundler(APP_CONFIG).generate().await.unwrap();
  let second = app_project().bundler(APP_CONFIG).generate().await.unwrap();

  let contents = |output: &splitpack::BundleOutput| {
    output
      .assets
      .iter()
      .map(|asset| (asset.filename.clone(), asset.content.clone()))
      .collect::<Vec<_>>()
  };
  assert_eq!(contents(&first), contents(&second));
}
