mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Datelike, Local, NaiveDate, Timelike};

/// Global override for store directory (set by -C flag)
static STORE_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::lock::StoreLock;
use crate::io::store_io::{self, StoreError};
use crate::model::cabinet::Store;
use crate::model::medicine::StockLevel;
use crate::model::tag::TagKind;
use crate::ops::{calc, cost, med_ops, schedule, tag_ops};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_store_cwd()
    if let Some(ref dir) = cli.store_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        STORE_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        None => unreachable!("no-subcommand case is handled in main"),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before store discovery
            Commands::Init(args) => cmd_init(args),

            // Calc needs no store at all
            Commands::Calc(args) => cmd_calc(args, json),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Due(args) => cmd_due(args, json),
            Commands::Search(args) => cmd_search(args, json),
            Commands::Costs(args) => cmd_costs(args, json),

            // Write commands
            Commands::Add(args) => cmd_add(args),
            Commands::Edit(args) => cmd_edit(args),
            Commands::Rm(args) => cmd_rm(args),
            Commands::Take(args) => cmd_take(args),
            Commands::Tag(args) => cmd_tag(args, json),

            // Config
            Commands::Config(args) => cmd_config(args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_store_cwd() -> Result<Store, StoreError> {
    let start = match STORE_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(StoreError::IoError)?,
    };
    let root = store_io::discover_store(&start)?;
    store_io::load_store(&root)
}

/// Acquire the write lock and persist the cabinet.
fn save_store(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire_default(&store.dosette_dir)?;
    store_io::save_cabinet(&store.dosette_dir, &store.cabinet)?;
    Ok(())
}

fn parse_level(s: &str) -> Result<StockLevel, String> {
    StockLevel::from_label(s)
        .ok_or_else(|| format!("unknown level '{}' (expected: enough, half, empty)", s))
}

fn parse_kind(s: &str) -> Result<TagKind, String> {
    TagKind::from_label(s)
        .ok_or_else(|| format!("unknown tag kind '{}' (expected: time, purpose)", s))
}

/// Parse YYYY-MM into the first day of that month.
fn parse_month(s: &str) -> Result<NaiveDate, String> {
    let err = || format!("invalid month '{}' (expected YYYY-MM)", s);
    let (year, month) = s.split_once('-').ok_or_else(err)?;
    let year: i32 = year.parse().map_err(|_| err())?;
    let month: u32 = month.parse().map_err(|_| err())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(err)
}

fn parse_hour(hour: u32) -> Result<u32, String> {
    if hour < 24 {
        Ok(hour)
    } else {
        Err(format!("invalid hour {} (expected 0-23)", hour))
    }
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    let level_filter = args.level.as_deref().map(parse_level).transpose()?;

    let medicines: Vec<_> = store
        .cabinet
        .medicines
        .iter()
        .filter(|m| {
            if let Some(level) = level_filter
                && m.level != level
            {
                return false;
            }
            if let Some(ref purpose) = args.purpose
                && m.purpose_tag != *purpose
            {
                return false;
            }
            if let Some(ref tag) = args.tag {
                return m.time_tags.iter().any(|t| t == tag) || m.purpose_tag == *tag;
            }
            true
        })
        .collect();

    if json {
        let out = MedicineListJson {
            medicines: medicines.iter().map(|m| medicine_to_json(m)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if medicines.is_empty() {
        println!("cabinet is empty");
    } else {
        for med in medicines {
            println!("{}", medicine_line(med));
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    match store.cabinet.find_medicine(args.id) {
        Some(med) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&medicine_to_json(med))?);
            } else {
                print_medicine_details(med);
            }
        }
        None => println!("no medicine with id {}", args.id),
    }
    Ok(())
}

fn cmd_due(args: DueArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    let hour = match args.at {
        Some(h) => parse_hour(h)?,
        None => Local::now().hour(),
    };

    let due = schedule::due_medicines(&store.cabinet.medicines, hour, &store.config.windows);
    if json {
        let out = DueJson {
            hour,
            medicines: due.iter().map(|m| medicine_to_json(m)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if due.is_empty() {
        println!("nothing due at {}:00", hour);
    } else {
        println!("due at {}:00", hour);
        for med in due {
            println!("{}", medicine_line(med));
        }
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    let hits = med_ops::search(&store.cabinet.medicines, &args.query);

    if json {
        let out = MedicineListJson {
            medicines: hits.iter().map(|m| medicine_to_json(m)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if hits.is_empty() {
        println!("no matches for '{}'", args.query);
    } else {
        for med in hits {
            println!("{}", medicine_line(med));
        }
    }
    Ok(())
}

fn cmd_costs(args: CostsArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store_cwd()?;
    let date = match args.month {
        Some(ref m) => parse_month(m)?,
        None => Local::now().date_naive(),
    };
    let month = format!("{:04}-{:02}", date.year(), date.month());
    let summary = cost::aggregate(&store.cabinet.medicines, date);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&costs_to_json(&summary, &month))?
        );
    } else {
        print_costs(&summary, &month);
    }
    Ok(())
}

fn cmd_calc(args: CalcArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let value = calc::eval(&args.expression)?;
    if json {
        println!("{}", serde_json::json!({ "result": value }));
    } else {
        println!("{}", value);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;

    // Unknown tag names are registered on the fly (no-op on duplicates)
    for tag in &args.time_tags {
        tag_ops::add_tag(&mut store.cabinet, TagKind::Time, tag);
    }
    if let Some(ref purpose) = args.purpose {
        tag_ops::add_tag(&mut store.cabinet, TagKind::Purpose, purpose);
    }

    let patch = med_ops::MedicinePatch {
        name: Some(args.name),
        time_tags: Some(args.time_tags),
        purpose_tag: args.purpose,
        amount_left: Some(args.amount),
        unit_price: Some(args.price),
        daily_needed: Some(args.daily),
        level: None,
    };

    match med_ops::add_medicine(&mut store.cabinet, patch) {
        Some(id) => {
            save_store(&store)?;
            println!("{}", id);
        }
        None => println!("nothing added (name is empty)"),
    }
    Ok(())
}

fn cmd_edit(args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    let level = args.level.as_deref().map(parse_level).transpose()?;

    let patch = med_ops::MedicinePatch {
        name: args.name,
        time_tags: args.time_tags,
        purpose_tag: args.purpose,
        amount_left: args.amount,
        unit_price: args.price,
        daily_needed: args.daily,
        level,
    };

    if med_ops::update_medicine(&mut store.cabinet, args.id, patch) {
        save_store(&store)?;
        println!("updated {}", args.id);
    } else {
        println!("no medicine with id {}", args.id);
    }
    Ok(())
}

fn cmd_rm(args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    match med_ops::delete_medicine(&mut store.cabinet, args.id) {
        Some(name) => {
            save_store(&store)?;
            println!("removed {} ({})", args.id, name);
        }
        None => println!("no medicine with id {}", args.id),
    }
    Ok(())
}

fn cmd_take(args: TakeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store_cwd()?;
    if !med_ops::record_dose(&mut store.cabinet, args.id, !args.undo) {
        println!("no medicine with id {}", args.id);
        return Ok(());
    }
    save_store(&store)?;
    if let Some(med) = store.cabinet.find_medicine(args.id) {
        let verb = if args.undo { "returned to" } else { "taken from" };
        println!("{} {} ({} left)", verb, med.name, med.amount_left);
    }
    Ok(())
}

fn cmd_tag(args: TagCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        TagAction::List(kind_arg) => {
            let store = load_store_cwd()?;
            let kind_filter = kind_arg.kind.as_deref().map(parse_kind).transpose()?;
            let mut tags = Vec::new();
            for kind in [TagKind::Time, TagKind::Purpose] {
                if let Some(f) = kind_filter
                    && f != kind
                {
                    continue;
                }
                for tag in store.cabinet.tags(kind) {
                    tags.push(tag_to_json(tag, kind.label()));
                }
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&TagListJson { tags })?);
            } else {
                for tag in &tags {
                    println!("{:>3} [{}] {}", tag.id, tag.kind, tag.name);
                }
            }
            Ok(())
        }
        TagAction::Add(add_args) => {
            let kind = parse_kind(&add_args.kind)?;
            let mut store = load_store_cwd()?;
            match tag_ops::add_tag(&mut store.cabinet, kind, &add_args.name) {
                Some(id) => {
                    save_store(&store)?;
                    println!("{}", id);
                }
                None => println!("nothing added (empty or duplicate name)"),
            }
            Ok(())
        }
        TagAction::Rename(rename_args) => {
            let kind = parse_kind(&rename_args.kind)?;
            let mut store = load_store_cwd()?;
            if tag_ops::rename_tag(&mut store.cabinet, kind, rename_args.id, &rename_args.name) {
                save_store(&store)?;
                println!("renamed {} tag {} to {}", kind.label(), rename_args.id, rename_args.name);
            } else {
                println!("nothing renamed (unknown id, empty name, or name in use)");
            }
            Ok(())
        }
        TagAction::Rm(rm_args) => {
            let kind = parse_kind(&rm_args.kind)?;
            let mut store = load_store_cwd()?;
            match tag_ops::delete_tag(&mut store.cabinet, kind, rm_args.id) {
                Some(name) => {
                    save_store(&store)?;
                    println!("removed {} tag {} ({})", kind.label(), rm_args.id, name);
                }
                None => println!("no {} tag with id {}", kind.label(), rm_args.id),
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Config handlers
// ---------------------------------------------------------------------------

fn cmd_config(args: ConfigCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let store = load_store_cwd()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&store.config)?);
            } else {
                print!("{}", toml::to_string_pretty(&store.config)?);
            }
            Ok(())
        }
        ConfigAction::Window(w) => {
            if !matches!(w.period.as_str(), "morning" | "afternoon" | "evening" | "night") {
                return Err(format!(
                    "unknown window '{}' (expected: morning, afternoon, evening, night)",
                    w.period
                )
                .into());
            }
            parse_hour(w.start)?;
            parse_hour(w.end)?;
            let store = load_store_cwd()?;
            let _lock = StoreLock::acquire_default(&store.dosette_dir)?;
            let (_, mut doc) = config_io::read_config(&store.dosette_dir)?;
            config_io::set_window(&mut doc, &w.period, w.start, w.end);
            config_io::write_config(&store.dosette_dir, &doc)?;
            println!("{} window set to {}:00-{}:00", w.period, w.start, w.end);
            Ok(())
        }
        ConfigAction::Language(l) => {
            let store = load_store_cwd()?;
            let _lock = StoreLock::acquire_default(&store.dosette_dir)?;
            let (_, mut doc) = config_io::read_config(&store.dosette_dir)?;
            config_io::set_language(&mut doc, &l.language);
            config_io::write_config(&store.dosette_dir, &doc)?;
            println!("language set to {}", l.language);
            Ok(())
        }
        ConfigAction::Threshold(t) => {
            let store = load_store_cwd()?;
            let _lock = StoreLock::acquire_default(&store.dosette_dir)?;
            let (_, mut doc) = config_io::read_config(&store.dosette_dir)?;
            config_io::set_low_stock_threshold(&mut doc, t.threshold);
            config_io::write_config(&store.dosette_dir, &doc)?;
            println!("low stock threshold set to {}", t.threshold);
            Ok(())
        }
    }
}
