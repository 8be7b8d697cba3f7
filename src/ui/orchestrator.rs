//! # Orchestrator
//!
//! Owns the output log, the prompt, the menu and the console tray, and is the
//! only component that knows the command set and the navigation targets.
//!
//! ## Modes
//!
//! ```text
//!              submit "menu"
//!   ┌────────┐ ───────────────> ┌──────┐
//!   │ Prompt │                  │ Menu │
//!   └────────┘ <─────────────── └──────┘
//!              confirm  (log "Navigating to ...", then navigate)
//!              Esc      (log "Menu cancelled.")
//! ```
//!
//! ## Focus
//!
//! In prompt mode, `Tab` moves keyboard focus between the prompt (a
//! text-entry surface) and the page. Single-letter shortcuts only fire from
//! the page, without ctrl/alt/meta held, and never in menu mode.
//!
//! ## Outbound Events
//!
//! Navigation requests and tray visibility changes are queued as
//! [`HostEvent`]s and collected by the host with
//! [`Orchestrator::drain_events`]. Any status line logged for a transition is
//! appended before the corresponding navigation request is queued.
//!
//! ## Lifecycle
//!
//! [`Orchestrator::initialize`] subscribes to the event source and greets the
//! user; [`Orchestrator::dispose`] releases the subscription.
//! [`Orchestrator::into_store`] hands the session store back so the next page
//! can reuse it.

use crate::session::{SessionStore, VISITED_KEY};
use crate::ui::commands::{Command, CommandTable, ShortcutTable};
use crate::ui::config::{Config, ConfigError};
use crate::ui::events::{EventSource, Subscription};
use crate::ui::menu::{MenuEvent, SelectableMenu};
use crate::ui::output::{Category, Content, OutputLog};
use crate::ui::prompt::{CommandPrompt, PromptEvent};
use crate::ui::surface::{InputSurface, Surface};
use crate::ui::tray::ConsoleTray;
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

/// Lines printed the first time a tab opens the site.
pub const WELCOME_LINES: [(&str, Category); 4] = [
    ("termfolio interactive shell", Category::Success),
    ("Type 'help' for a list of commands.", Category::System),
    (
        "Type 'menu' to browse pages with the arrow keys.",
        Category::System,
    ),
    (
        "Press Tab to leave the prompt and use single-key shortcuts.",
        Category::System,
    ),
];

/// Hint printed after an unknown command.
pub const UNKNOWN_COMMAND_HINT: &str = "Type 'help' for a list of commands.";

const HELP_COMMANDS: &str = "<b>Commands</b>
  <code>help</code>      show this summary
  <code>menu</code>      browse pages with the arrow keys (Esc to cancel)
  <code>clear</code>     clear the screen";

const HELP_CONSOLE: &str = "<b>Console</b>
  <kbd>Tab</kbd>       switch between the prompt and the page
  <kbd>Ctrl+T</kbd>    show or hide the console (drag its top border to resize)";

const MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::META)
    .union(KeyModifiers::SUPER);

/// Rows scrolled per mouse wheel tick.
const WHEEL_ROWS: usize = 3;

/// The active input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Prompt,
    Menu,
}

/// Where keyboard input goes while in prompt mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The active input surface.
    Surface,
    /// The page behind the console; keys here are shortcuts.
    Page,
}

/// Requests for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Load another page. Terminal for this orchestrator.
    Navigate(String),
    /// The console tray was hidden or shown.
    ConsoleToggle { hidden: bool },
}

/// Screen regions from the last draw, used for pointer hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub viewport: Rect,
    /// Whole tray including its top border (the drag handle).
    pub tray: Rect,
    pub log: Rect,
    pub prompt: Rect,
    /// One row per menu item, starting at the top.
    pub menu_items: Rect,
}

impl LayoutSnapshot {
    fn menu_index_at(&self, position: Position) -> Option<usize> {
        self.menu_items
            .contains(position)
            .then(|| usize::from(position.y - self.menu_items.y))
    }

    fn is_drag_handle(&self, position: Position) -> bool {
        self.tray.height > 0 && position.y == self.tray.y && self.tray.contains(position)
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    page: String,
    output: OutputLog,
    prompt: CommandPrompt,
    menu: SelectableMenu,
    tray: ConsoleTray,
    mode: Mode,
    focus: Focus,
    commands: CommandTable,
    shortcuts: ShortcutTable,
    store: Box<dyn SessionStore>,
    subscription: Option<Subscription>,
    events: Vec<HostEvent>,
    layout: LayoutSnapshot,
    navigating: bool,
}

impl Orchestrator {
    /// Build the orchestrator for `page` from the site configuration.
    pub fn new(
        page: impl Into<String>,
        config: &Config,
        store: Box<dyn SessionStore>,
    ) -> Result<Self, ConfigError> {
        let shortcuts = config.shortcut_table()?;
        let menu = SelectableMenu::new(config.targets.clone(), config.menu_heading.clone());
        let prompt = CommandPrompt::new(
            config.prompt.glyph.clone(),
            config.prompt.placeholder.clone(),
        );
        Ok(Self {
            page: page.into(),
            output: OutputLog::new(),
            prompt,
            menu,
            tray: ConsoleTray::new(config.console.height, config.console.min_height),
            mode: Mode::Prompt,
            focus: Focus::Surface,
            commands: CommandTable::new(),
            shortcuts,
            store,
            subscription: None,
            events: Vec::new(),
            layout: LayoutSnapshot::default(),
            navigating: false,
        })
    }

    /// Replace the menu, e.g. with one built from a serialized payload.
    pub fn with_menu(mut self, mut menu: SelectableMenu) -> Self {
        menu.deactivate();
        self.menu = menu;
        self
    }

    /// Subscribe to the event source and greet the user.
    ///
    /// A second call on an initialized orchestrator does nothing.
    pub fn initialize(&mut self, source: &mut dyn EventSource) -> Result<()> {
        if self.subscription.is_some() {
            return Ok(());
        }
        self.subscription = Some(source.subscribe()?);
        self.set_mode(Mode::Prompt);
        self.greet();
        info!(page = %self.page, "orchestrator initialized");
        Ok(())
    }

    /// Release the event subscription and suppress both surfaces.
    pub fn dispose(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
            debug!(page = %self.page, "orchestrator disposed");
        }
        self.prompt.deactivate();
        self.menu.deactivate();
    }

    /// Dispose and return the session store for the next page.
    pub fn into_store(mut self) -> Box<dyn SessionStore> {
        self.dispose();
        self.store
    }

    pub fn is_initialized(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    /// Menu label of the current page, or its identifier.
    pub fn page_label(&self) -> &str {
        self.label_for(&self.page)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputLog {
        &mut self.output
    }

    pub fn prompt(&self) -> &CommandPrompt {
        &self.prompt
    }

    pub fn menu(&self) -> &SelectableMenu {
        &self.menu
    }

    pub fn tray(&self) -> &ConsoleTray {
        &self.tray
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Set once a navigation request has been queued; later input is ignored.
    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    pub fn layout(&self) -> LayoutSnapshot {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutSnapshot) {
        self.layout = layout;
    }

    /// Take all queued host events, oldest first.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Dispatch one terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        if self.navigating {
            return;
        }
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => {}
        }
    }

    /// Flip the console tray between hidden and shown.
    ///
    /// Hiding closes an open menu and leaves keyboard focus on the page.
    pub fn toggle_console(&mut self) {
        let hidden = self.tray.toggle();
        if hidden && self.mode == Mode::Menu {
            self.on_menu_event(MenuEvent::Cancel);
        }
        self.set_focus(if hidden { Focus::Page } else { Focus::Surface });
        debug!(hidden, height = self.tray.height(), "console toggled");
        self.events.push(HostEvent::ConsoleToggle { hidden });
    }

    /// Run a submitted command. Ignored outside prompt mode.
    pub fn run_command(&mut self, input: &str) {
        if self.mode != Mode::Prompt {
            return;
        }
        debug!(command = input, "running command");
        match self.commands.lookup(input).cloned() {
            Some(Command::Menu) => self.set_mode(Mode::Menu),
            Some(Command::Help) => self.print_help(),
            Some(Command::Clear) => {
                self.output.clear();
                self.store.remove(VISITED_KEY);
            }
            Some(Command::Navigate(path)) => {
                let message = format!("Navigating to {}…", self.label_for(&path));
                self.output.append_line(&message, Category::System);
                self.navigate(path);
            }
            None => {
                self.output
                    .append_line(&format!("Unknown command: {input}"), Category::Error);
                self.output
                    .append_line(UNKNOWN_COMMAND_HINT, Category::System);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_console_toggle(&key) {
            self.toggle_console();
            return;
        }

        match key.code {
            KeyCode::PageUp => {
                self.output.scroll_up(self.page_rows());
                return;
            }
            KeyCode::PageDown => {
                self.output.scroll_down(self.page_rows());
                return;
            }
            _ => {}
        }

        if self.try_shortcut(&key) {
            return;
        }

        match self.mode {
            Mode::Menu => {
                if let Some(event) = self.menu.handle_key(key) {
                    self.on_menu_event(event);
                }
            }
            Mode::Prompt if key.code == KeyCode::Tab && !self.tray.is_hidden() => {
                let next = match self.focus {
                    Focus::Surface => Focus::Page,
                    Focus::Page => Focus::Surface,
                };
                self.set_focus(next);
            }
            Mode::Prompt => match self.focus {
                Focus::Surface => {
                    if let Some(event) = self.prompt.handle_key(key) {
                        self.on_prompt_event(event);
                    }
                }
                Focus::Page => self.handle_page_key(key),
            },
        }
    }

    /// Fire a shortcut if the key qualifies. Returns whether it was consumed.
    fn try_shortcut(&mut self, key: &KeyEvent) -> bool {
        let from_text_entry =
            self.focus == Focus::Surface && self.active_surface().accepts_text();
        if from_text_entry || key.modifiers.intersects(MODIFIERS) || self.mode == Mode::Menu {
            return false;
        }
        let KeyCode::Char(letter) = key.code else {
            return false;
        };
        let Some(path) = self.shortcuts.lookup(letter) else {
            return false;
        };
        let path = path.to_string();
        info!(key = %letter, path = %path, "shortcut");
        self.navigate(path);
        true
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.output.scroll_up(1),
            KeyCode::Down => self.output.scroll_down(1),
            KeyCode::Esc | KeyCode::Enter if !self.tray.is_hidden() => {
                self.set_focus(Focus::Surface);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let layout = self.layout;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.tray.is_hidden() {
                    if layout.tray.contains(position) {
                        self.toggle_console();
                    }
                } else if layout.is_drag_handle(position) {
                    self.tray.begin_drag();
                } else if self.mode == Mode::Menu {
                    if let Some(index) = layout.menu_index_at(position) {
                        for event in self.menu.click(index) {
                            self.on_menu_event(event);
                        }
                    }
                } else if layout.prompt.contains(position) {
                    self.set_focus(Focus::Surface);
                } else {
                    self.set_focus(Focus::Page);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.tray
                    .drag_to(mouse.row, layout.tray.bottom(), layout.viewport.height);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.tray.is_dragging() {
                    if let Some(height) =
                        self.tray
                            .drag_to(mouse.row, layout.tray.bottom(), layout.viewport.height)
                    {
                        debug!(height, "console resized");
                    }
                    self.tray.end_drag();
                }
            }
            MouseEventKind::Moved if self.mode == Mode::Menu => {
                if let Some(event) = layout
                    .menu_index_at(position)
                    .and_then(|index| self.menu.hover(index))
                {
                    self.on_menu_event(event);
                }
            }
            MouseEventKind::ScrollUp => self.output.scroll_up(WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.output.scroll_down(WHEEL_ROWS),
            _ => {}
        }
    }

    fn on_prompt_event(&mut self, event: PromptEvent) {
        match event {
            PromptEvent::Submit { command } => self.run_command(&command),
            PromptEvent::Cancel => debug!("prompt cleared"),
        }
    }

    fn on_menu_event(&mut self, event: MenuEvent) {
        match event {
            MenuEvent::Select { index, item } => {
                debug!(index, label = %item.label, "menu selection");
            }
            MenuEvent::Confirm { item, .. } => {
                let message = format!("Navigating to {}…", item.label);
                self.output.append_line(&message, Category::System);
                self.set_mode(Mode::Prompt);
                self.navigate(item.target);
            }
            MenuEvent::Cancel => {
                self.output.append_line("Menu cancelled.", Category::System);
                self.set_mode(Mode::Prompt);
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        let (active, suppressed) = match mode {
            Mode::Prompt => (Surface::Prompt, Surface::Menu),
            Mode::Menu => (Surface::Menu, Surface::Prompt),
        };
        self.surface_mut(suppressed).deactivate();
        self.surface_mut(active).activate();
        self.mode = mode;
        self.set_focus(Focus::Surface);
        debug!(?mode, "mode changed");
    }

    fn set_focus(&mut self, focus: Focus) {
        let surface = self.active();
        match focus {
            Focus::Surface => self.surface_mut(surface).focus(),
            Focus::Page => self.surface_mut(surface).blur(),
        }
        self.focus = focus;
    }

    fn active(&self) -> Surface {
        match self.mode {
            Mode::Prompt => Surface::Prompt,
            Mode::Menu => Surface::Menu,
        }
    }

    fn active_surface(&self) -> &dyn InputSurface {
        match self.active() {
            Surface::Prompt => &self.prompt,
            Surface::Menu => &self.menu,
        }
    }

    fn surface_mut(&mut self, surface: Surface) -> &mut dyn InputSurface {
        match surface {
            Surface::Prompt => &mut self.prompt,
            Surface::Menu => &mut self.menu,
        }
    }

    fn greet(&mut self) {
        if self.store.contains(VISITED_KEY) {
            let line = format!("Connected to {}", self.page);
            self.output.append_line(&line, Category::System);
            return;
        }
        for (line, category) in WELCOME_LINES {
            self.output.append_line(line, category);
        }
        self.store.set(VISITED_KEY, "true");
    }

    fn print_help(&mut self) {
        let pages = self
            .commands
            .navigation_keywords()
            .map(|keyword| format!("<code>{}</code>", crate::ui::markup::escape(keyword)))
            .collect::<Vec<_>>()
            .join(" ");
        let shortcuts = self
            .shortcuts
            .iter()
            .map(|(key, path)| {
                format!(
                    "<kbd>{}</kbd> {}",
                    key,
                    crate::ui::markup::escape(self.label_for(path))
                )
            })
            .collect::<Vec<_>>()
            .join("  ");
        let help = format!(
            "{HELP_COMMANDS}\n  {pages}\n            go to that page\n{HELP_CONSOLE}\n\
             <b>Shortcuts</b> (from the page, not the prompt)\n  {shortcuts}"
        );
        self.output.append(Content::Markup(help), Category::None);
    }

    fn navigate(&mut self, path: String) {
        info!(from = %self.page, to = %path, "navigation requested");
        self.events.push(HostEvent::Navigate(path));
        self.navigating = true;
    }

    fn label_for<'a>(&'a self, path: &'a str) -> &'a str {
        self.menu
            .items()
            .iter()
            .find(|item| item.target == path)
            .map_or(path, |item| item.label.as_str())
    }

    fn page_rows(&self) -> usize {
        usize::from(self.layout.log.height.max(1))
    }
}

fn is_console_toggle(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::F(2) => true,
        KeyCode::Char('t') | KeyCode::Char('T') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
