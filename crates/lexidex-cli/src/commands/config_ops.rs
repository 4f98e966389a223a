use std::fs;
use std::process;

use lexidex_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: table.max_load_factor={}, query.default_top_k={}, ingest.max_word_len={}",
        s.table.max_load_factor, s.query.default_top_k, s.ingest.max_word_len
    );
}

/// Install `file` as the process-wide settings. Must run before any query.
pub fn settings_install(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::init_custom(content), "Error in {file}: {}");
}
