use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dose", about = concat!("[+] dosette v", env!("CARGO_PKG_VERSION"), " - your medicine cabinet, scheduled"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different store directory
    #[arg(short = 'C', long = "store-dir", global = true)]
    pub store_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new dosette store in the current directory
    Init(InitArgs),
    /// List medicines in the cabinet
    List(ListArgs),
    /// Show medicine details
    Show(ShowArgs),
    /// Show medicines due now (or at a given hour)
    Due(DueArgs),
    /// Search medicines by name or tag
    Search(SearchArgs),
    /// Add a medicine
    Add(AddArgs),
    /// Edit a medicine
    Edit(EditArgs),
    /// Remove a medicine
    Rm(RmArgs),
    /// Record a taken dose (or undo one)
    Take(TakeArgs),
    /// Manage dose-time and purpose tags
    Tag(TagCmd),
    /// Show cabinet cost totals
    Costs(CostsArgs),
    /// Evaluate a dose arithmetic expression
    Calc(CalcArgs),
    /// Show or edit store configuration
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Store name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Seed the cabinet with sample medicines and tags
    #[arg(long)]
    pub sample: bool,
    /// Reinitialize even if dosette/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter by tag name (dose-time or purpose)
    #[arg(long)]
    pub tag: Option<String>,
    /// Filter by purpose tag only
    #[arg(long)]
    pub purpose: Option<String>,
    /// Filter by stock level (enough, half, empty)
    #[arg(long)]
    pub level: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Medicine ID to show
    pub id: u32,
}

#[derive(Args)]
pub struct DueArgs {
    /// Evaluate at this hour (0-23) instead of the current time
    #[arg(long)]
    pub at: Option<u32>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive substring to search for
    pub query: String,
}

#[derive(Args)]
pub struct CostsArgs {
    /// Month to project (YYYY-MM, default: current month)
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args)]
pub struct CalcArgs {
    /// Arithmetic expression, e.g. "3 * 0.5 + 1"
    pub expression: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Medicine name
    pub name: String,
    /// Dose-time tag (repeatable)
    #[arg(long = "time")]
    pub time_tags: Vec<String>,
    /// Purpose tag
    #[arg(long)]
    pub purpose: Option<String>,
    /// Units on hand
    #[arg(long, default_value = "0")]
    pub amount: u32,
    /// Price per unit
    #[arg(long, default_value = "0")]
    pub price: f64,
    /// Units taken per day
    #[arg(long, default_value = "0")]
    pub daily: u32,
}

#[derive(Args)]
pub struct EditArgs {
    /// Medicine ID
    pub id: u32,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// Replace dose-time tags (repeatable; pass none to keep)
    #[arg(long = "time")]
    pub time_tags: Option<Vec<String>>,
    /// New purpose tag ("" clears it)
    #[arg(long)]
    pub purpose: Option<String>,
    /// New unit count
    #[arg(long)]
    pub amount: Option<u32>,
    /// New price per unit
    #[arg(long)]
    pub price: Option<f64>,
    /// New daily dose
    #[arg(long)]
    pub daily: Option<u32>,
    /// Manual stock level override (enough, half, empty)
    #[arg(long)]
    pub level: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Medicine ID
    pub id: u32,
}

#[derive(Args)]
pub struct TakeArgs {
    /// Medicine ID
    pub id: u32,
    /// Put the dose back instead
    #[arg(long)]
    pub undo: bool,
}

// ---------------------------------------------------------------------------
// Tag management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TagCmd {
    #[command(subcommand)]
    pub action: TagAction,
}

#[derive(Subcommand)]
pub enum TagAction {
    /// List registered tags
    List(TagKindArg),
    /// Register a new tag
    Add(TagAddArgs),
    /// Rename a tag (updates every medicine carrying it)
    Rename(TagRenameArgs),
    /// Unregister a tag (scrubs it from every medicine)
    Rm(TagRmArgs),
}

#[derive(Args)]
pub struct TagKindArg {
    /// Tag kind (time, purpose); omit for both
    #[arg(long)]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct TagAddArgs {
    /// Tag kind (time, purpose)
    #[arg(long)]
    pub kind: String,
    /// Tag name
    pub name: String,
}

#[derive(Args)]
pub struct TagRenameArgs {
    /// Tag kind (time, purpose)
    #[arg(long)]
    pub kind: String,
    /// Tag ID
    pub id: u32,
    /// New name
    pub name: String,
}

#[derive(Args)]
pub struct TagRmArgs {
    /// Tag kind (time, purpose)
    #[arg(long)]
    pub kind: String,
    /// Tag ID
    pub id: u32,
}

// ---------------------------------------------------------------------------
// Config management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (default)
    Show,
    /// Set a dose-time window: config window morning 6 10
    Window(ConfigWindowArgs),
    /// Set the display language
    Language(ConfigLanguageArgs),
    /// Set the low-stock threshold
    Threshold(ConfigThresholdArgs),
}

#[derive(Args)]
pub struct ConfigWindowArgs {
    /// Which window (morning, afternoon, evening, night)
    pub period: String,
    /// Start hour (inclusive, 0-23)
    pub start: u32,
    /// End hour (exclusive, 0-23)
    pub end: u32,
}

#[derive(Args)]
pub struct ConfigLanguageArgs {
    /// Language code (e.g. "en")
    pub language: String,
}

#[derive(Args)]
pub struct ConfigThresholdArgs {
    /// Unit count below which stock counts as low
    pub threshold: u32,
}
