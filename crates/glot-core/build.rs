const SETTINGS_PATH: &str = "src/default_settings.toml";

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS_PATH}");
    check_settings(include_str!("src/default_settings.toml"));
}

/// The settings singleton `expect`s the embedded defaults to parse, so a
/// broken file must fail the build instead.
fn check_settings(content: &str) {
    let value: toml::Value = match content.parse() {
        Ok(value) => value,
        Err(e) => panic!("{SETTINGS_PATH} contains invalid TOML: {e}"),
    };
    for section in ["patterns", "pronunciation"] {
        if value.get(section).and_then(toml::Value::as_table).is_none() {
            panic!("{SETTINGS_PATH} is missing the [{section}] table");
        }
    }
}
