use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::store_io;
use crate::model::cabinet::Cabinet;

const DOSETTE_TOML_TEMPLATE: &str = r##"[store]
name = "{name}"

[display]
language = "en"
low_stock_threshold = 5

# --- Dose-time windows ---
# Hours are half-open [start, end); night may wrap past midnight.
# Uncomment and edit to override defaults.
#
# [windows]
# morning = { start = 6, end = 10 }
# afternoon = { start = 11, end = 14 }
# evening = { start = 17, end = 21 }
# night = { start = 21, end = 2 }

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# highlight = "#FB4196"
# dim = "#5A5580"
#
# [ui.level_colors]
# enough = "#44FF88"
# half = "#FFD700"
# empty = "#FF4444"
"##;

/// Infer a store name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let dosette_dir = cwd.join("dosette");

    if dosette_dir.is_dir() && !args.force {
        return Err("dosette store already exists in ./dosette/ (use --force to reinitialize)".into());
    }

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Untitled".to_string())
    });

    fs::create_dir_all(&dosette_dir)?;

    let toml_content = DOSETTE_TOML_TEMPLATE.replace("{name}", &name);
    fs::write(dosette_dir.join("dosette.toml"), toml_content)?;

    let cabinet = if args.sample {
        store_io::sample_cabinet()
    } else {
        Cabinet::default()
    };
    store_io::save_cabinet(&dosette_dir, &cabinet)?;

    println!("Initialized dosette store: {}", name);
    if args.sample {
        println!(
            "  {} sample medicines, {} time tags, {} purpose tags",
            cabinet.medicines.len(),
            cabinet.time_tags.len(),
            cabinet.purpose_tags.len()
        );
    }

    Ok(())
}
