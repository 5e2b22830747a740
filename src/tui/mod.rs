mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::catalogue::Catalogue;
use crate::models::{CatalogueEntry, Category, Status};
use crate::notes::NotesStore;
use crate::practice;
use crate::sync::{self, SyncAction};
use crate::tracker::{EditHandle, TrackerStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Categories,
    Questions,
    Answer,
    Asked,
    Notes,
}

impl View {
    fn next(&self) -> Self {
        match self {
            View::Categories | View::Questions | View::Answer => View::Asked,
            View::Asked => View::Notes,
            View::Notes => View::Categories,
        }
    }

    fn prev(&self) -> Self {
        match self {
            View::Categories | View::Questions | View::Answer => View::Notes,
            View::Asked => View::Categories,
            View::Notes => View::Asked,
        }
    }
}

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn first(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(0);
        }
    }

    fn last(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(self.items.len() - 1);
        }
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

/// The question currently on display, as handed over by the catalogue browser.
#[derive(Debug, Clone)]
pub struct DisplayedQuestion {
    pub index: usize,
    pub entry: CatalogueEntry,
}

pub struct App {
    notes: NotesStore,
    pub tracker: TrackerStore,
    pub view: View,
    pub categories: StatefulList<Category>,
    pub questions: StatefulList<CatalogueEntry>,
    pub selected_category: Option<String>,
    pub displayed: Option<DisplayedQuestion>,
    pub answer_scroll: u16,
    pub asked: StatefulList<()>,
    pub edit: Option<EditHandle>,
    pub notes_text: String,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalogue: Catalogue, notes: NotesStore) -> Result<Self, Box<dyn std::error::Error>> {
        let notes_text = notes.load()?;

        Ok(Self {
            notes,
            tracker: TrackerStore::new(),
            view: View::Categories,
            categories: StatefulList::with_items(catalogue.categories().to_vec()),
            questions: StatefulList::with_items(Vec::new()),
            selected_category: None,
            displayed: None,
            answer_scroll: 0,
            asked: StatefulList::with_items(Vec::new()),
            edit: None,
            notes_text,
            notice: None,
            should_quit: false,
        })
    }

    pub fn notes_path(&self) -> String {
        self.notes.path().display().to_string()
    }

    fn select_category(&mut self) {
        if let Some(category) = self.categories.selected_item() {
            self.selected_category = Some(category.name.clone());
            self.questions = StatefulList::with_items(category.questions.clone());
            self.view = View::Questions;
        }
    }

    fn show_question(&mut self, index: usize) {
        if let Some(entry) = self.questions.items.get(index) {
            self.questions.selected = Some(index);
            self.displayed = Some(DisplayedQuestion {
                index,
                entry: entry.clone(),
            });
            self.answer_scroll = 0;
            self.view = View::Answer;
        }
    }

    fn question_under_cursor(&self) -> Option<String> {
        match self.view {
            View::Questions => self.questions.selected_item().map(|e| e.question.clone()),
            View::Answer => self.displayed.as_ref().map(|d| d.entry.question.clone()),
            _ => None,
        }
    }

    fn mark_asked(&mut self) {
        let Some(question) = self.question_under_cursor() else {
            return;
        };
        match self.tracker.add_asked_question(&question) {
            Ok(index) => {
                self.sync_asked_list();
                // Reveal the new item the next time the Asked view is shown.
                self.asked.selected = Some(index);
                self.notice = Some(format!("Marked as asked (#{})", index + 1));
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn pick_next_question(&mut self) {
        let mut rng = rand::thread_rng();
        match practice::pick_next(&self.questions.items, &self.tracker, &mut rng) {
            Some(index) => self.show_question(index),
            None => self.notice = Some("No questions in this category".to_string()),
        }
    }

    fn sync_asked_list(&mut self) {
        self.asked.items = vec![(); self.tracker.len()];
        if self.asked.selected.is_none() && !self.asked.items.is_empty() {
            self.asked.selected = Some(0);
        }
    }

    fn grade_selected(&mut self, status: Status) {
        if let Some(index) = self.asked.selected {
            if let Err(e) = self.tracker.set_status(index, status) {
                self.notice = Some(e.to_string());
            }
        }
    }

    fn begin_edit(&mut self) {
        if let Some(index) = self.asked.selected {
            match self.tracker.begin_edit(index) {
                Ok(handle) => self.edit = Some(handle),
                Err(e) => self.notice = Some(e.to_string()),
            }
        }
    }

    /// Focus left the edit field: write the buffer back.
    fn commit_edit(&mut self) {
        if let Some(handle) = self.edit.take() {
            if let Err(e) = self.tracker.commit_edit(handle.index, &handle.buffer) {
                self.notice = Some(e.to_string());
            }
        }
    }

    fn reload_notes(&mut self) {
        match self.notes.load() {
            Ok(text) => self.notes_text = text,
            Err(e) => {
                warn!("event=notes_load module=tui status=error error={}", e);
                self.notice = Some(e.to_string());
            }
        }
    }

    fn back(&mut self) {
        match self.view {
            View::Answer => {
                self.view = View::Questions;
                self.displayed = None;
            }
            View::Questions => {
                self.view = View::Categories;
                self.selected_category = None;
            }
            _ => {}
        }
    }

    fn switch_view(&mut self, view: View) {
        if view == View::Notes {
            self.reload_notes();
        }
        self.view = view;
    }

    fn handle_edit_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab) {
            self.commit_edit();
            return;
        }
        let Some(handle) = self.edit.as_mut() else {
            return;
        };
        match key {
            KeyCode::Enter => handle.insert('\n'),
            KeyCode::Backspace => handle.backspace(),
            KeyCode::Left => handle.move_left(),
            KeyCode::Right => handle.move_right(),
            KeyCode::Char(c) => handle.insert(c),
            _ => {}
        }
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.edit.is_some() {
            self.handle_edit_key(key);
            return Ok(());
        }

        self.notice = None;

        match key {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.reload_notes();
            }

            KeyCode::Char('P') => self.notice = Some(sync::instructions(SyncAction::Push)),
            KeyCode::Char('F') => self.notice = Some(sync::instructions(SyncAction::Fetch)),

            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => match self.view {
                View::Answer | View::Questions => self.back(),
                _ if key == KeyCode::Esc => {}
                _ => self.switch_view(self.view.prev()),
            },
            KeyCode::Char('l') | KeyCode::Right => match self.view {
                View::Categories => self.select_category(),
                View::Questions => {
                    if let Some(index) = self.questions.selected {
                        self.show_question(index);
                    }
                }
                _ => self.switch_view(self.view.next()),
            },

            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.switch_view(self.view.prev());
                } else {
                    self.switch_view(self.view.next());
                }
            }
            KeyCode::BackTab => self.switch_view(self.view.prev()),

            KeyCode::Char('j') | KeyCode::Down => match self.view {
                View::Categories => self.categories.next(),
                View::Questions => self.questions.next(),
                View::Answer => self.answer_scroll = self.answer_scroll.saturating_add(1),
                View::Asked => self.asked.next(),
                View::Notes => {}
            },
            KeyCode::Char('k') | KeyCode::Up => match self.view {
                View::Categories => self.categories.previous(),
                View::Questions => self.questions.previous(),
                View::Answer => self.answer_scroll = self.answer_scroll.saturating_sub(1),
                View::Asked => self.asked.previous(),
                View::Notes => {}
            },

            KeyCode::Char('g') => match self.view {
                View::Categories => self.categories.first(),
                View::Questions => self.questions.first(),
                View::Answer => self.answer_scroll = 0,
                View::Asked => self.asked.first(),
                View::Notes => {}
            },
            KeyCode::Char('G') => match self.view {
                View::Categories => self.categories.last(),
                View::Questions => self.questions.last(),
                View::Asked => self.asked.last(),
                _ => {}
            },

            KeyCode::Enter => match self.view {
                View::Categories => self.select_category(),
                View::Questions => {
                    if let Some(index) = self.questions.selected {
                        self.show_question(index);
                    }
                }
                View::Asked => self.begin_edit(),
                _ => {}
            },

            KeyCode::Char('m') => self.mark_asked(),
            KeyCode::Char('n') if self.view == View::Questions => self.pick_next_question(),
            KeyCode::Char('e') if self.view == View::Asked => self.begin_edit(),
            KeyCode::Char(c @ '1'..='4') if self.view == View::Asked => {
                if let Some(status) = Status::from_key(c) {
                    self.grade_selected(status);
                }
            }

            _ => {}
        }
        Ok(())
    }
}

/// Runs the interactive session and hands back the tracker it built up.
pub fn run(
    catalogue: Catalogue,
    notes: NotesStore,
) -> Result<TrackerStore, Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("event=tui_start module=tui status=ok");

    let result = App::new(catalogue, notes)
        .and_then(|mut app| run_app(&mut terminal, &mut app).map(|()| app.tracker));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("event=tui_stop module=tui status={}", if result.is_ok() { "ok" } else { "error" });
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    const CATALOGUE: &str = r#"{"categories":[
        {"name":"OOP","questions":[
            {"question":"What is polymorphism?","answer":"<p>Many forms.</p>"},
            {"question":"What is encapsulation?","answer":"<p>Hiding state.</p>"}]},
        {"name":"Networking","questions":[
            {"question":"TCP vs UDP?","answer":"<p>Reliable vs datagram.</p>"}]}]}"#;

    fn app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let catalogue = Catalogue::from_json(CATALOGUE).unwrap();
        let app = App::new(catalogue, NotesStore::in_dir(dir.path())).unwrap();
        (app, dir)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    mod navigation_tests {
        use super::*;

        #[test]
        fn starts_on_categories() {
            let (app, _dir) = app();
            assert_eq!(app.view, View::Categories);
            assert_eq!(app.categories.items.len(), 2);
            assert_eq!(app.categories.selected, Some(0));
        }

        #[test]
        fn enter_opens_category_then_question() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.view, View::Questions);
            assert_eq!(app.selected_category.as_deref(), Some("OOP"));
            assert_eq!(app.questions.items.len(), 2);

            press(&mut app, KeyCode::Char('j'));
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.view, View::Answer);
            let displayed = app.displayed.as_ref().unwrap();
            assert_eq!(displayed.index, 1);
            assert_eq!(displayed.entry.question, "What is encapsulation?");
        }

        #[test]
        fn back_walks_up_the_drill_down() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.view, View::Questions);
            assert!(app.displayed.is_none());
            press(&mut app, KeyCode::Char('h'));
            assert_eq!(app.view, View::Categories);
        }

        #[test]
        fn tab_cycles_top_level_views() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.view, View::Asked);
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.view, View::Notes);
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.view, View::Categories);
            press(&mut app, KeyCode::BackTab);
            assert_eq!(app.view, View::Notes);
        }

        #[test]
        fn quit_sets_flag() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit);
        }
    }

    mod mark_tests {
        use super::*;

        #[test]
        fn mark_from_question_list() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('m'));

            assert_eq!(app.tracker.len(), 1);
            assert_eq!(app.tracker.items()[0].text, "What is polymorphism?");
            assert_eq!(app.asked.selected, Some(0));
        }

        #[test]
        fn mark_twice_shows_duplicate_notice() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('m'));
            press(&mut app, KeyCode::Char('m'));

            assert_eq!(app.tracker.len(), 1);
            assert_eq!(
                app.notice.as_deref(),
                Some("This question has already been marked as asked.")
            );
        }

        #[test]
        fn mark_selects_newest_item() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('m'));
            press(&mut app, KeyCode::Char('j'));
            press(&mut app, KeyCode::Char('m'));

            assert_eq!(app.tracker.len(), 2);
            assert_eq!(app.asked.selected, Some(1));
        }

        #[test]
        fn mark_on_categories_does_nothing() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Char('m'));
            assert!(app.tracker.is_empty());
        }

        #[test]
        fn next_pick_opens_a_question() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('n'));
            assert_eq!(app.view, View::Answer);
            assert!(app.displayed.is_some());
        }
    }

    mod asked_tests {
        use super::*;

        fn app_with_two_asked() -> (App, tempfile::TempDir) {
            let (mut app, dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('m'));
            press(&mut app, KeyCode::Char('j'));
            press(&mut app, KeyCode::Char('m'));
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.view, View::Asked);
            (app, dir)
        }

        #[test]
        fn grade_keys_set_status() {
            let (mut app, _dir) = app_with_two_asked();
            press(&mut app, KeyCode::Char('3'));
            assert_eq!(app.tracker.items()[1].status, Status::Confusing);
            assert_eq!(app.tracker.items()[0].status, Status::Unset);

            press(&mut app, KeyCode::Char('1'));
            assert_eq!(app.tracker.items()[1].status, Status::Answered);
        }

        #[test]
        fn edit_commits_on_blur() {
            let (mut app, _dir) = app_with_two_asked();
            press(&mut app, KeyCode::Char('g'));
            press(&mut app, KeyCode::Char('2'));
            press(&mut app, KeyCode::Char('e'));
            assert!(app.edit.is_some());
            assert_eq!(app.tracker.editing(), Some(0));

            type_text(&mut app, " (twice)");
            press(&mut app, KeyCode::Esc);

            assert!(app.edit.is_none());
            assert_eq!(app.tracker.editing(), None);
            assert_eq!(app.tracker.items()[0].text, "What is polymorphism? (twice)");
            assert_eq!(app.tracker.items()[0].status, Status::NotAnswered);
        }

        #[test]
        fn edit_mode_swallows_command_keys() {
            let (mut app, _dir) = app_with_two_asked();
            press(&mut app, KeyCode::Enter);
            type_text(&mut app, "q1");
            assert!(!app.should_quit);
            assert_eq!(app.tracker.items()[1].status, Status::Unset);

            press(&mut app, KeyCode::Tab);
            assert_eq!(app.view, View::Asked);
            assert!(app.tracker.items()[1].text.ends_with("q1"));
        }

        #[test]
        fn enter_in_edit_inserts_newline() {
            let (mut app, _dir) = app_with_two_asked();
            press(&mut app, KeyCode::Char('e'));
            press(&mut app, KeyCode::Enter);
            type_text(&mut app, "more");
            press(&mut app, KeyCode::Esc);

            assert_eq!(app.tracker.items()[1].text, "What is encapsulation?\nmore");
        }

        #[test]
        fn clearing_text_commits_empty() {
            let (mut app, _dir) = app_with_two_asked();
            press(&mut app, KeyCode::Char('e'));
            for _ in 0.."What is encapsulation?".len() {
                press(&mut app, KeyCode::Backspace);
            }
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.tracker.items()[1].text, "");
        }

        #[test]
        fn edit_on_empty_tracker_is_noop() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Tab);
            press(&mut app, KeyCode::Char('e'));
            press(&mut app, KeyCode::Char('1'));
            assert!(app.edit.is_none());
            assert!(app.tracker.is_empty());
        }
    }

    mod notice_tests {
        use super::*;

        #[test]
        fn push_and_fetch_show_instructions() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Char('P'));
            assert!(app.notice.as_deref().unwrap().contains("git push"));

            press(&mut app, KeyCode::Char('F'));
            assert!(app.notice.as_deref().unwrap().contains("git pull"));
        }

        #[test]
        fn notice_clears_on_next_key() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Char('P'));
            press(&mut app, KeyCode::Char('j'));
            assert!(app.notice.is_none());
        }

        #[test]
        fn notes_view_reloads_file() {
            let (mut app, dir) = app();
            NotesStore::in_dir(dir.path()).append("look up CAP").unwrap();

            press(&mut app, KeyCode::BackTab);
            assert_eq!(app.view, View::Notes);
            assert!(app.notes_text.contains("look up CAP"));
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn renders_categories() {
            let (app, _dir) = app();
            let text = screen(&app);
            assert!(text.contains("OOP"));
            assert!(text.contains("Networking"));
        }

        #[test]
        fn renders_answer_text() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
            let text = screen(&app);
            assert!(text.contains("What is polymorphism?"));
            assert!(text.contains("Many forms."));
        }

        #[test]
        fn renders_asked_items_with_status() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('m'));
            press(&mut app, KeyCode::Tab);
            press(&mut app, KeyCode::Char('4'));

            let text = screen(&app);
            assert!(text.contains("1. What is polymorphism?"));
            assert!(text.contains("Partially correct"));
        }

        #[test]
        fn renders_duplicate_notice() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Char('m'));
            press(&mut app, KeyCode::Char('m'));
            let text = screen(&app);
            assert!(text.contains("already been marked as asked"));
        }

        #[test]
        fn renders_empty_asked_view() {
            let (mut app, _dir) = app();
            press(&mut app, KeyCode::Tab);
            let text = screen(&app);
            assert!(text.contains("No questions marked as asked yet"));
        }
    }
}
