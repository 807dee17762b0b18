use super::LoaderOutput;

pub fn transform(source: &str) -> Result<LoaderOutput, String> {
  let value = serde_json::from_str::<serde_json::Value>(source)
    .map_err(|err| format!("Invalid JSON: {err}"))?;
  let json = serde_json::to_string_pretty(&value).map_err(|err| err.to_string())?;
  Ok(LoaderOutput::code(format!("export default {json};\n")))
}

#[test]
fn json_becomes_a_default_export() {
  let output = transform(r#"{ "name": "splitpack", "tags": ["a"] }"#).unwrap();
  assert!(output.code.starts_with("export default {"));
  assert!(output.code.contains(r#""name": "splitpack""#));
  assert!(output.code.ends_with("};\n"));

  assert!(transform("{ name: 1 }").unwrap_err().starts_with("Invalid JSON"));
}
