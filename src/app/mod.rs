//! Application state and core data types for slicetui.

mod actions;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::config::Config;
use crate::slice::{DisplayMode, PackageRegistry, Slice, SliceBinder, SliceUpdate};
use crate::suggest::AuthoritySuggester;
use crate::ui::fields::TextField;

/// Which input field currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Authority,
    Path,
}

/// Top-level application state. All mutation happens on the interaction
/// thread; background work arrives through channels drained in [`App::tick`].
pub struct App {
    pub config: Config,
    pub registry: PackageRegistry,
    pub focus: Focus,
    pub authority: TextField,
    pub path: TextField,
    pub mode: DisplayMode,
    /// Authorities from the latest refresh tick; replaced wholesale.
    pub suggestions: Vec<String>,
    /// Selection inside the filtered dropdown, when open.
    pub suggestion_selected: Option<usize>,
    pub binder: SliceBinder,
    /// Slice currently shown in the pane; `None` renders the empty state.
    pub current: Option<Slice>,
    /// When the last live update arrived.
    pub last_update: Option<DateTime<Local>>,
    /// Scroll offset of the slice pane (large density only).
    pub scroll: u16,
    pub should_quit: bool,
    suggester: Option<AuthoritySuggester>,
}

impl App {
    pub fn new() -> Result<Self> {
        let mut config = Config::load().context("Failed to load configuration")?;
        config.validate();
        Ok(Self::with_config(config))
    }

    /// Build an app over an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        let registry = PackageRegistry::new(config.packages_dir.clone());
        let mode = config.default_mode;
        Self {
            config,
            registry,
            focus: Focus::default(),
            authority: TextField::default(),
            path: TextField::default(),
            mode,
            suggestions: Vec::new(),
            suggestion_selected: None,
            binder: SliceBinder::new(),
            current: None,
            last_update: None,
            scroll: 0,
            should_quit: false,
            suggester: None,
        }
    }

    /// Host lifecycle entry point: begin interactive operation. Resets the
    /// input fields and starts the periodic authority refresh.
    pub fn start(&mut self) -> Result<()> {
        self.authority = TextField::default();
        self.path = TextField::default();
        self.suggester = Some(AuthoritySuggester::spawn(
            self.config.packages_dir.clone(),
            self.config.refresh_period(),
        )?);
        Ok(())
    }

    /// Host lifecycle exit point: cancel the periodic refresh and release
    /// the live binding. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(suggester) = self.suggester.take() {
            suggester.cancel();
        }
        self.binder.unbind();
        self.current = None;
    }

    /// One event-loop tick: marshal background results onto this thread.
    /// The suggestion list and displayed slice are only ever mutated here
    /// and in the user-action paths, never from another thread.
    pub fn tick(&mut self) {
        let refreshed = self.suggester.as_ref().and_then(|s| s.try_recv());
        if let Some(authorities) = refreshed {
            self.suggestions.clear();
            self.suggestions.extend(authorities);
            self.clamp_suggestion_selection();
        }

        match self.binder.poll() {
            Some(SliceUpdate::Content(slice)) => {
                self.current = Some(slice);
                self.last_update = Some(Local::now());
            }
            Some(SliceUpdate::Gone) => {
                self.current = None;
            }
            None => {}
        }
    }
}
