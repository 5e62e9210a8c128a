//! Text entry for the add and rename forms.

use crossterm::event::{KeyCode, KeyEvent};
use studydash_core::task::{Priority, TaskId};

/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    /// A field pre-filled with `value`, cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Current contents.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applies an editing key. Returns `false` for keys it does not handle.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            _ => return false,
        }
        true
    }

    /// Insert a character at the cursor position.
    pub fn enter_char(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    const fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

/// Which input of the add-task form has focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskField {
    /// Task name.
    #[default]
    Name,
    /// Expected minutes.
    Minutes,
    /// Priority selector.
    Priority,
}

impl TaskField {
    const fn next(self) -> Self {
        match self {
            Self::Name => Self::Minutes,
            Self::Minutes => Self::Priority,
            Self::Priority => Self::Name,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Priority,
            Self::Minutes => Self::Name,
            Self::Priority => Self::Minutes,
        }
    }
}

/// State of the add-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Name input.
    pub name: TextField,
    /// Expected minutes input.
    pub minutes: TextField,
    /// Selected priority.
    pub priority: Priority,
    /// Focused input.
    pub field: TaskField,
    /// Message from the last rejected submit.
    pub error: Option<String>,
}

impl TaskForm {
    /// Routes a key that is not submit or cancel.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            _ => match self.field {
                TaskField::Name => {
                    self.name.handle_key(key);
                }
                TaskField::Minutes => {
                    if matches!(key.code, KeyCode::Char(c) if !c.is_ascii_digit()) {
                        return;
                    }
                    self.minutes.handle_key(key);
                }
                TaskField::Priority => match key.code {
                    KeyCode::Left | KeyCode::Char('h') => self.priority = self.priority.prev(),
                    KeyCode::Right | KeyCode::Char('l' | ' ') => {
                        self.priority = self.priority.next();
                    }
                    _ => {}
                },
            },
        }
    }
}

/// Which input of the add-material form has focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaterialField {
    /// Link title.
    #[default]
    Title,
    /// Link URL.
    Url,
    /// Optional description.
    Description,
}

impl MaterialField {
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Url,
            Self::Url => Self::Description,
            Self::Description => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Url => Self::Title,
            Self::Description => Self::Url,
        }
    }
}

/// State of the add-material form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialForm {
    /// Title input.
    pub title: TextField,
    /// URL input.
    pub url: TextField,
    /// Description input.
    pub description: TextField,
    /// Focused input.
    pub field: MaterialField,
    /// Message from the last rejected submit.
    pub error: Option<String>,
}

impl MaterialForm {
    /// Routes a key that is not submit or cancel.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            _ => {
                let input = match self.field {
                    MaterialField::Title => &mut self.title,
                    MaterialField::Url => &mut self.url,
                    MaterialField::Description => &mut self.description,
                };
                input.handle_key(key);
            }
        }
    }
}

/// What a rename form applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameTarget {
    /// A task.
    Task(TaskId),
    /// A study material, by id.
    Material(String),
}

/// State of the inline rename form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameForm {
    /// Item being renamed.
    pub target: RenameTarget,
    /// New name input, pre-filled with the current one.
    pub input: TextField,
    /// Message from the last rejected submit.
    pub error: Option<String>,
}
