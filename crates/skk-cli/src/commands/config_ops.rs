use std::fs;
use std::process;

use skk_engine::skk_core::{romaji, settings};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn romaji_export() {
    print!("{}", romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(romaji::parse_romaji_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!("{}", settings_summary(&s));
}

fn settings_summary(s: &settings::Settings) -> String {
    format!(
        "OK: candidates.inline_count={}, candidates.display_count={}, \
         dictionary.private_mode={}, date_conversions={}",
        s.candidates.inline_count,
        s.candidates.display_count,
        s.dictionary.private_mode,
        s.date_conversions.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_summary() {
        let s = settings::parse_settings_toml(settings::default_toml()).unwrap();
        assert_eq!(
            settings_summary(&s),
            "OK: candidates.inline_count=3, candidates.display_count=9, \
             dictionary.private_mode=false, date_conversions=2"
        );
    }

    #[test]
    fn exported_romaji_table_validates() {
        let map = romaji::parse_romaji_toml(romaji::default_toml()).unwrap();
        assert_eq!(map.get("ka").map(String::as_str), Some("か"));
    }
}
