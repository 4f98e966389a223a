const SECTIONS: [&str; 3] = ["table", "query", "ingest"];

fn main() {
    println!("cargo:rerun-if-changed=src/default_settings.toml");
    check_default_settings(include_str!("src/default_settings.toml"));
}

/// Reject an embedded settings file that is not TOML or lacks a section.
fn check_default_settings(content: &str) {
    let value: toml::Value = match content.parse() {
        Ok(v) => v,
        Err(e) => panic!("src/default_settings.toml contains invalid TOML: {e}"),
    };
    for section in SECTIONS {
        if !value.get(section).is_some_and(toml::Value::is_table) {
            panic!("src/default_settings.toml is missing the [{section}] table");
        }
    }
}
