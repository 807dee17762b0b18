#![allow(dead_code)]

use std::{
  fs,
  path::{Path, PathBuf},
};

use splitpack::{Bundler, BundlerOptions};
use tempfile::TempDir;

pub struct Project {
  dir: TempDir,
}

impl Project {
  pub fn new(files: &[(&str, &str)]) -> Self {
    let project = Self { dir: tempfile::tempdir().unwrap() };
    for (path, content) in files {
      project.write(path, content);
    }
    project
  }

  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  pub fn path(&self, path: &str) -> PathBuf {
    self.root().join(path)
  }

  pub fn write(&self, path: &str, content: &str) {
    let path = self.path(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  pub fn read(&self, path: &str) -> String {
    fs::read_to_string(self.path(path)).unwrap()
  }

  pub fn exists(&self, path: &str) -> bool {
    self.path(path).exists()
  }

  pub fn options(&self, config: &str) -> BundlerOptions {
    let mut options = BundlerOptions::from_json(config).unwrap();
    options.cwd = Some(self.root().to_path_buf());
    options
  }

  pub fn bundler(&self, config: &str) -> Bundler {
    Bundler::new(self.options(config)).unwrap()
  }
}

pub const JQUERY: &str = "node_modules/jquery/dist/jquery.js";
pub const JQUERY_SOURCE: &str = "var jQuery = function (selector) { return selector; };\n\
                                 window.jQuery = window.$ = jQuery;\n\
                                 module.exports = jQuery;\n";

/// A site with an entry script pulling in jQuery, a Modernizr custom build and local
/// components.
pub fn app_project() -> Project {
  Project::new(&[
    (
      "src/scripts/index.js",
      "import $ from 'jquery';\n\
       import Modernizr from 'modernizr';\n\
       import { initTest } from './components/test';\n\
       $(() => initTest(document.body, Modernizr));\n",
    ),
    (
      "src/scripts/components/test.js",
      "import { on } from 'util/dom';\n\
       export function initTest(root, features) {\n\
       \x20 on(root, 'click', (event) => event.target?.dataset ?? features);\n\
       }\n",
    ),
    ("src/util/dom.js", "export const on = (el, type, fn) => el.addEventListener(type, fn);\n"),
    (
      ".modernizrrc",
      r#"{ "minify": true, "options": ["setClasses"], "feature-detects": ["touchevents"] }"#,
    ),
    ("node_modules/jquery/package.json", r#"{ "name": "jquery", "main": "dist/jquery.js" }"#),
    (JQUERY, JQUERY_SOURCE),
  ])
}

pub const APP_CONFIG: &str = r#"{
  "mode": "production",
  "context": "./src",
  "entry": { "index": ["./scripts/index.js"] },
  "output": {
    "path": "./dist/js",
    "publicPath": "/",
    "filename": "[name].js",
    "chunkFilename": "[name].js",
    "sourceMapFilename": "[file].map"
  },
  "resolve": {
    "extensions": [".webpack-loader.js", ".web-loader.js", ".loader.js", ".js"],
    "modules": ["./src", "node_modules"],
    "alias": { "modernizr$": "./.modernizrrc" }
  },
  "splitChunks": { "test": "[\\\\/]node_modules[\\\\/]", "name": "vendor" },
  "rules": [
    {
      "test": "\\.js$",
      "exclude": "node_modules",
      "use": ["script"],
      "options": { "target": "es2015" }
    },
    { "test": "\\.modernizrrc(\\.json)?$", "exclude": "node_modules", "use": ["modernizr"] }
  ]
}"#;
