//! Application state and event handling.
//!
//! [`App`] owns the three components and turns key presses into registry
//! and coordinator calls. Task timer requests travel from the
//! [`TaskRegistry`] to the [`TimerCoordinator`] as [`TimerSignal`] values;
//! the registry and coordinator never reference each other.
//!
//! [`TimerSignal`]: studydash_core::signal::TimerSignal

pub mod form;

use std::sync::Arc;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use studydash_core::material::StudyMaterial;
use studydash_core::task::{PROGRESS_STEP, Task, TaskFilter, TaskId, TaskSort};

pub use form::{MaterialForm, RenameForm, RenameTarget, TaskForm, TextField};

use crate::clock::Clock;
use crate::config::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, DashConfig, checked_format};
use crate::materials::{self, MaterialError, MaterialRegistry};
use crate::store::KvStore;
use crate::tasks::{TaskError, TaskRegistry, parse_expected_minutes};
use crate::timer::TimerCoordinator;

/// Which list has keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelFocus {
    /// Task list (default).
    #[default]
    Tasks,
    /// Study materials list.
    Materials,
}

/// Whether a form is open, and which one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are dashboard commands.
    #[default]
    Normal,
    /// Add-task form is open.
    AddTask(TaskForm),
    /// Add-material form is open.
    AddMaterial(MaterialForm),
    /// Inline rename is open.
    Rename(RenameForm),
}

/// Top-level dashboard state.
pub struct App {
    /// Task list.
    pub tasks: TaskRegistry,
    /// Stopwatch.
    pub timer: TimerCoordinator,
    /// Study links.
    pub materials: MaterialRegistry,
    /// Focused list.
    pub focus: PanelFocus,
    /// Selected row in the filtered task list.
    pub selected_task: usize,
    /// Selected row in the materials list.
    pub selected_material: usize,
    /// Task list filter.
    pub filter: TaskFilter,
    /// Task list order.
    pub sort: TaskSort,
    /// Open form, if any.
    pub mode: InputMode,
    /// Material picked up for a move, by id.
    pub dragging: Option<String>,
    /// Set when the user asks to exit.
    pub should_quit: bool,
    clock: Arc<dyn Clock>,
    time_format: String,
    date_format: String,
    max_task_name_len: usize,
}

impl App {
    /// Loads every component from `store`.
    ///
    /// Seconds that passed while the dashboard was closed with a task timer
    /// running are credited to that task. If the stopwatch is idle, stale
    /// active flags are cleared.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, config: &DashConfig) -> Self {
        let mut tasks = TaskRegistry::load(Arc::clone(&store), Arc::clone(&clock))
            .with_max_name_len(config.max_task_name_len);
        let mut timer = TimerCoordinator::load(Arc::clone(&store), Arc::clone(&clock));
        let materials = MaterialRegistry::load(store);

        tasks.credit_active(timer.take_resume_credit());
        if !timer.is_running() && tasks.clear_active() {
            tracing::info!("cleared stale active task flag");
        }

        Self {
            tasks,
            timer,
            materials,
            focus: PanelFocus::default(),
            selected_task: 0,
            selected_material: 0,
            filter: TaskFilter::default(),
            sort: TaskSort::default(),
            mode: InputMode::default(),
            dragging: None,
            should_quit: false,
            clock,
            time_format: checked_format(
                Some(&config.time_format),
                DEFAULT_TIME_FORMAT,
                "time_format",
            ),
            date_format: checked_format(
                Some(&config.date_format),
                DEFAULT_DATE_FORMAT,
                "date_format",
            ),
            max_task_name_len: config.max_task_name_len,
        }
    }

    /// Advances the stopwatch and credits the elapsed seconds to the active
    /// task.
    pub fn tick(&mut self) {
        let advanced = self.timer.tick();
        self.tasks.credit_active(advanced);
    }

    /// Local wall-clock time.
    #[must_use]
    pub fn now_local(&self) -> DateTime<Local> {
        self.clock.now_utc().with_timezone(&Local)
    }

    /// Clock panel time string.
    #[must_use]
    pub fn clock_time(&self) -> String {
        self.now_local().format(&self.time_format).to_string()
    }

    /// Clock panel date string.
    #[must_use]
    pub fn clock_date(&self) -> String {
        self.now_local().format(&self.date_format).to_string()
    }

    /// The task list as currently filtered and sorted.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.list_filtered(self.filter, self.sort)
    }

    /// The highlighted task.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_task).copied()
    }

    /// The highlighted material.
    #[must_use]
    pub fn selected_material(&self) -> Option<&StudyMaterial> {
        self.materials.materials().get(self.selected_material)
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.mode == InputMode::Normal {
            self.handle_normal_key(key);
        } else {
            self.handle_form_key(key);
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc if self.dragging.is_some() => self.dragging = None,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') => self.toggle_timer(),
            KeyCode::Char('r') => self.reset_timer(),
            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.clamp_task_selection();
            }
            KeyCode::Char('o') => self.sort = self.sort.next(),
            _ => match self.focus {
                PanelFocus::Tasks => self.handle_task_key(key),
                PanelFocus::Materials => self.handle_material_key(key),
            },
        }
    }

    fn handle_task_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('a') {
            self.mode = InputMode::AddTask(TaskForm::default());
            return;
        }
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        let progress = task.progress;
        match key.code {
            KeyCode::Enter => self.toggle_task_timer(&id),
            KeyCode::Char('x' | ' ') => {
                self.tasks.toggle_completion(&id);
                self.clamp_task_selection();
            }
            KeyCode::Char('+' | '=') => {
                self.tasks
                    .set_progress(&id, progress.saturating_add(PROGRESS_STEP));
            }
            KeyCode::Char('-') => {
                self.tasks
                    .set_progress(&id, progress.saturating_sub(PROGRESS_STEP));
            }
            KeyCode::Char('e') => {
                self.mode = InputMode::Rename(RenameForm {
                    input: TextField::with_value(task.name.clone()),
                    target: RenameTarget::Task(id),
                    error: None,
                });
            }
            KeyCode::Char('d') => {
                self.tasks.delete_task(&id);
                self.clamp_task_selection();
            }
            _ => {}
        }
    }

    fn handle_material_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('a') {
            self.mode = InputMode::AddMaterial(MaterialForm::default());
            return;
        }
        let Some(material) = self.selected_material() else {
            return;
        };
        let id = material.id.clone();
        match key.code {
            KeyCode::Enter | KeyCode::Char('m') if self.dragging.is_some() => self.drop_material(),
            KeyCode::Char('m') => self.dragging = Some(id),
            KeyCode::Enter => materials::open_in_browser(material),
            KeyCode::Char('e') => {
                self.mode = InputMode::Rename(RenameForm {
                    input: TextField::with_value(material.title.clone()),
                    target: RenameTarget::Material(id),
                    error: None,
                });
            }
            KeyCode::Char('d') => {
                if self.materials.delete_material(&id) {
                    self.clamp_material_selection();
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => self.submit_form(),
            _ => match &mut self.mode {
                InputMode::AddTask(form) => form.handle_key(key),
                InputMode::AddMaterial(form) => form.handle_key(key),
                InputMode::Rename(form) => {
                    form.input.handle_key(key);
                }
                InputMode::Normal => {}
            },
        }
    }

    /// Applies the open form. A rejected submit keeps the form open with
    /// its input and an error message.
    fn submit_form(&mut self) {
        let mode = std::mem::take(&mut self.mode);
        self.mode = match mode {
            InputMode::AddTask(mut form) => {
                let added = parse_expected_minutes(form.minutes.value()).and_then(|minutes| {
                    self.tasks
                        .add_task(form.name.value(), minutes, form.priority)
                });
                match added {
                    Ok(_) => InputMode::Normal,
                    Err(e) => {
                        form.error = Some(e.to_string());
                        InputMode::AddTask(form)
                    }
                }
            }
            InputMode::AddMaterial(mut form) => {
                let added = self.materials.add_material(
                    form.title.value(),
                    form.url.value(),
                    Some(form.description.value()),
                );
                match added {
                    Ok(_) => {
                        self.selected_material = self.materials.len().saturating_sub(1);
                        InputMode::Normal
                    }
                    Err(e) => {
                        form.error = Some(e.to_string());
                        InputMode::AddMaterial(form)
                    }
                }
            }
            InputMode::Rename(mut form) => {
                let new_name = form.input.value();
                let blank = new_name.trim().is_empty();
                let rejected = match &form.target {
                    RenameTarget::Task(id) => {
                        (!self.tasks.rename_task(id, new_name)).then(|| {
                            if blank {
                                TaskError::NameEmpty.to_string()
                            } else {
                                TaskError::NameTooLong(self.max_task_name_len).to_string()
                            }
                        })
                    }
                    RenameTarget::Material(id) => (!self.materials.rename_material(id, new_name))
                        .then(|| MaterialError::TitleEmpty.to_string()),
                };
                match rejected {
                    None => InputMode::Normal,
                    Some(reason) => {
                        form.error = Some(reason);
                        InputMode::Rename(form)
                    }
                }
            }
            InputMode::Normal => InputMode::Normal,
        };
    }

    /// Brings the stopwatch and the active task's `actual_time` up to date
    /// before a timer transition.
    fn settle(&mut self) {
        self.tick();
    }

    fn toggle_timer(&mut self) {
        self.settle();
        let was_running = self.timer.is_running();
        self.timer.manual_toggle();
        if was_running {
            self.tasks.clear_active();
        }
    }

    fn reset_timer(&mut self) {
        self.settle();
        self.timer.reset();
        self.tasks.clear_active();
    }

    fn toggle_task_timer(&mut self, id: &TaskId) {
        self.settle();
        let is_active = self.tasks.get(id).is_some_and(|t| t.is_active);
        let signal = if is_active {
            self.tasks.stop_timer_for(id)
        } else {
            self.tasks.start_timer_for(id)
        };
        if let Some(signal) = signal {
            signal.deliver(&mut self.timer);
        }
        self.clamp_task_selection();
    }

    fn drop_material(&mut self) {
        let Some(dragged) = self.dragging.take() else {
            return;
        };
        let Some(target) = self.selected_material().map(|m| m.id.clone()) else {
            return;
        };
        self.materials.reorder(&dragged, &target);
        if let Some(index) = self.materials.materials().iter().position(|m| m.id == dragged) {
            self.selected_material = index;
        }
    }

    const fn switch_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Tasks => PanelFocus::Materials,
            PanelFocus::Materials => PanelFocus::Tasks,
        };
    }

    const fn select_prev(&mut self) {
        match self.focus {
            PanelFocus::Tasks => self.selected_task = self.selected_task.saturating_sub(1),
            PanelFocus::Materials => {
                self.selected_material = self.selected_material.saturating_sub(1);
            }
        }
    }

    fn select_next(&mut self) {
        match self.focus {
            PanelFocus::Tasks => {
                if self.selected_task + 1 < self.visible_tasks().len() {
                    self.selected_task += 1;
                }
            }
            PanelFocus::Materials => {
                if self.selected_material + 1 < self.materials.len() {
                    self.selected_material += 1;
                }
            }
        }
    }

    fn clamp_task_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    fn clamp_material_selection(&mut self) {
        self.selected_material = self
            .selected_material
            .min(self.materials.len().saturating_sub(1));
    }
}
