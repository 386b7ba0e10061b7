use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{Local, Timelike};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::lock::StoreLock;
use crate::io::store_io::{self, discover_store, load_store};
use crate::io::watcher::StoreWatcher;
use crate::model::cabinet::Store;
use crate::model::medicine::Medicine;
use crate::ops::{med_ops, schedule};

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Cabinet,
    Due,
    Costs,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
}

/// Re-evaluates the wall clock once a minute so the due list follows
/// window boundaries without hammering the clock every frame.
pub struct Ticker {
    last: Instant,
    interval: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker {
            last: Instant::now(),
            interval,
        }
    }

    pub fn tick(&mut self) -> bool {
        if self.last.elapsed() >= self.interval {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}

/// Main application state
pub struct App {
    pub store: Store,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Current hour of day, refreshed by the minute ticker
    pub hour: u32,
    /// Cursor for cabinet view
    pub cabinet_cursor: usize,
    /// Cursor for due view
    pub due_cursor: usize,
    /// Medicine ids toggled as taken this session (space un-takes them)
    pub taken: HashSet<u32>,
    /// Tag filter for the cabinet view, if any
    pub tag_filter: Option<String>,
    /// Search mode: current query being typed
    pub search_input: String,
    /// Last executed search query
    pub last_search: Option<String>,
    /// Transient message shown in the status row
    pub status: Option<String>,
}

impl App {
    pub fn new(store: Store) -> Self {
        let theme = Theme::from_config(&store.config.ui);
        App {
            store,
            view: View::Cabinet,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            hour: Local::now().hour(),
            cabinet_cursor: 0,
            due_cursor: 0,
            taken: HashSet::new(),
            tag_filter: None,
            search_input: String::new(),
            last_search: None,
            status: None,
        }
    }

    /// Medicines visible in the cabinet view, after tag filter and search.
    pub fn visible_medicines(&self) -> Vec<&Medicine> {
        self.store
            .cabinet
            .medicines
            .iter()
            .filter(|m| {
                if let Some(ref tag) = self.tag_filter
                    && !m.time_tags.iter().any(|t| t == tag)
                    && m.purpose_tag != *tag
                {
                    return false;
                }
                if let Some(ref query) = self.last_search {
                    return med_ops::matches_query(m, query);
                }
                true
            })
            .collect()
    }

    /// Medicines due at the current hour.
    pub fn due_list(&self) -> Vec<&Medicine> {
        schedule::due_medicines(&self.store.cabinet.medicines, self.hour, &self.store.config.windows)
    }

    /// Toggle a dose for the medicine under the due cursor and persist.
    pub fn toggle_dose(&mut self, id: u32) {
        let take = !self.taken.contains(&id);
        if !med_ops::record_dose(&mut self.store.cabinet, id, take) {
            return;
        }
        if take {
            self.taken.insert(id);
        } else {
            self.taken.remove(&id);
        }
        if let Err(e) = self.persist() {
            self.status = Some(format!("save failed: {}", e));
        }
    }

    fn persist(&self) -> Result<(), Box<dyn std::error::Error>> {
        let _lock = StoreLock::acquire_default(&self.store.dosette_dir)?;
        store_io::save_cabinet(&self.store.dosette_dir, &self.store.cabinet)?;
        Ok(())
    }

    /// Reload the store from disk, keeping cursors in range.
    pub fn reload(&mut self) {
        match load_store(&self.store.root) {
            Ok(store) => {
                self.theme = Theme::from_config(&store.config.ui);
                self.store = store;
                self.clamp_cursors();
                // Drop filter tags that no longer exist
                if let Some(ref tag) = self.tag_filter
                    && self
                        .store
                        .cabinet
                        .time_tags
                        .iter()
                        .chain(&self.store.cabinet.purpose_tags)
                        .all(|t| t.name != *tag)
                {
                    self.tag_filter = None;
                }
            }
            Err(e) => self.status = Some(format!("reload failed: {}", e)),
        }
    }

    pub fn clamp_cursors(&mut self) {
        let cabinet_len = self.visible_medicines().len();
        if self.cabinet_cursor >= cabinet_len {
            self.cabinet_cursor = cabinet_len.saturating_sub(1);
        }
        let due_len = self.due_list().len();
        if self.due_cursor >= due_len {
            self.due_cursor = due_len.saturating_sub(1);
        }
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let ui_state = match read_ui_state(&app.store.dosette_dir) {
        Some(s) => s,
        None => return,
    };

    match ui_state.view.as_str() {
        "cabinet" => app.view = View::Cabinet,
        "due" => app.view = View::Due,
        "costs" => app.view = View::Costs,
        _ => {}
    }
    app.cabinet_cursor = ui_state.cabinet_cursor;
    app.due_cursor = ui_state.due_cursor;
    // A persisted filter naming a since-deleted tag resets to show-all
    app.tag_filter = ui_state.tag_filter.filter(|tag| {
        app.store
            .cabinet
            .time_tags
            .iter()
            .chain(&app.store.cabinet.purpose_tags)
            .any(|t| t.name == *tag)
    });
    app.last_search = ui_state.last_search;
    app.clamp_cursors();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let view_str = match app.view {
        View::Cabinet => "cabinet",
        View::Due => "due",
        View::Costs => "costs",
    };

    let ui_state = UiState {
        view: view_str.to_string(),
        cabinet_cursor: app.cabinet_cursor,
        due_cursor: app.due_cursor,
        tag_filter: app.tag_filter.clone(),
        last_search: app.last_search.clone(),
    };

    let _ = write_ui_state(&app.store.dosette_dir, &ui_state);
}

/// Run the TUI application
pub fn run(store_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    // Discover and load store
    let start = match store_dir {
        Some(dir) => std::fs::canonicalize(Path::new(dir))
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let root = discover_store(&start)?;
    let store = load_store(&root)?;

    let mut app = App::new(store);
    restore_ui_state(&mut app);

    let watcher = StoreWatcher::start(&app.store.dosette_dir).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut clock = Ticker::new(Duration::from_secs(60));
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        // External edits to cabinet.json or dosette.toml
        if let Some(w) = watcher
            && w.changed()
        {
            app.reload();
        }

        if clock.tick() {
            app.hour = Local::now().hour();
            app.clamp_cursors();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
