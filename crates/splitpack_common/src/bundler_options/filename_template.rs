#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: String) -> Self {
    Self { template }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// `[name]` is replaced by `name` and `[file]` by `file`. Patterns without a value are
  /// left untouched.
  pub fn render(&self, name: Option<&str>, file: Option<&str>) -> String {
    let mut rendered = self.template.clone();
    if let Some(name) = name {
      rendered = rendered.replace("[name]", name);
    }
    if let Some(file) = file {
      rendered = rendered.replace("[file]", file);
    }
    rendered
  }
}

impl From<String> for FilenameTemplate {
  fn from(template: String) -> Self {
    Self::new(template)
  }
}

#[test]
fn render_filename_templates() {
  let entry = FilenameTemplate::new("[name].js".to_string());
  assert_eq!(entry.render(Some("index"), None), "index.js");

  let map = FilenameTemplate::new("[file].map".to_string());
  assert_eq!(map.render(Some("index"), Some("index.js")), "index.js.map");

  let nested = FilenameTemplate::new("maps/[name]/[file].map".to_string());
  assert_eq!(nested.render(Some("vendor"), Some("vendor.js")), "maps/vendor/vendor.js.map");
}
