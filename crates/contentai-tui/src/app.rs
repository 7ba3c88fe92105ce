use std::sync::Arc;
use ratatui::layout::Rect;
use tokio::task::JoinHandle;
use contentai_core::{
    ClientError, ContentType, GenerateRequest, GenerateResponse, GenerationBackend, Rejection,
    Session,
};

/// Tiles per row in the content type grid
pub const TILE_COLUMNS: usize = 3;

pub const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Tiles,
    Output,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Prompt => Focus::Tiles,
            Focus::Tiles => Focus::Output,
            Focus::Output => Focus::Prompt,
        }
    }
}

pub type GenerationTask = JoinHandle<Result<GenerateResponse, ClientError>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: Focus,
    pub session: Session,

    // Prompt editing
    pub prompt_cursor: usize, // char index into session.prompt_text

    // Tile grid
    pub tile_cursor: usize,

    // Generated content view
    pub output_scroll: u16,
    pub output_height: u16,
    pub output_lines: u16,

    // The single in-flight request, if any
    pub generation_task: Option<GenerationTask>,
    pub backend: Arc<dyn GenerationBackend>,
    pub api_base_url: String,

    pub animation_frame: usize,
    pub status_message: Option<String>,

    // Panel areas for mouse hit-testing (updated during render)
    pub prompt_area: Option<Rect>,
    pub tile_areas: Vec<Rect>,
    pub output_area: Option<Rect>,
}

impl App {
    pub fn new(backend: Arc<dyn GenerationBackend>, api_base_url: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            focus: Focus::Prompt,
            session: Session::new(),
            prompt_cursor: 0,
            tile_cursor: 0,
            output_scroll: 0,
            output_height: 0,
            output_lines: 0,
            generation_task: None,
            backend,
            api_base_url: api_base_url.into(),
            animation_frame: 0,
            status_message: None,
            prompt_area: None,
            tile_areas: Vec::new(),
            output_area: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.animation_frame % SPINNER_FRAMES.len()]
    }

    pub fn selected_tile(&self) -> ContentType {
        ContentType::ALL[self.tile_cursor.min(ContentType::ALL.len() - 1)]
    }

    // Triggers

    /// Returns true if a request went out
    pub fn submit_freeform(&mut self) -> bool {
        let request = self.session.submit_freeform();
        self.dispatch(request)
    }

    pub fn submit_typed(&mut self, content_type: ContentType) -> bool {
        let request = self.session.submit_typed(content_type);
        let sent = self.dispatch(request);
        if sent {
            self.tile_cursor = content_type.index();
        }
        sent
    }

    fn dispatch(&mut self, request: Result<GenerateRequest, Rejection>) -> bool {
        match request {
            Ok(request) => {
                let backend = Arc::clone(&self.backend);
                self.animation_frame = 0;
                self.generation_task = Some(tokio::spawn(async move {
                    backend.generate(&request).await
                }));
                true
            }
            Err(Rejection::EmptyPrompt) => {
                self.focus = Focus::Prompt;
                false
            }
            Err(Rejection::Busy) => false,
        }
    }

    /// Apply the generation result once the task has finished. Returns true if it did.
    pub async fn poll_generation(&mut self) -> bool {
        let finished = self
            .generation_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return false;
        }

        let Some(task) = self.generation_task.take() else {
            return false;
        };
        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(ClientError::Task(e.to_string())),
        };

        let generated = matches!(&result, Ok(response) if response.success);
        self.session.complete(result);
        if generated {
            self.output_scroll = 0;
        }
        true
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    // Prompt editing

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.session.prompt_text, self.prompt_cursor);
        self.session.prompt_text.insert(byte_pos, c);
        self.prompt_cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        // Pasted CRLF from some terminals
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let byte_pos = char_to_byte_index(&self.session.prompt_text, self.prompt_cursor);
        self.session.prompt_text.insert_str(byte_pos, &text);
        self.prompt_cursor += text.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.prompt_cursor > 0 {
            self.prompt_cursor -= 1;
            let byte_pos = char_to_byte_index(&self.session.prompt_text, self.prompt_cursor);
            self.session.prompt_text.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.prompt_cursor < self.session.prompt_text.chars().count() {
            let byte_pos = char_to_byte_index(&self.session.prompt_text, self.prompt_cursor);
            self.session.prompt_text.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.prompt_cursor = self.prompt_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.session.prompt_text.chars().count();
        self.prompt_cursor = (self.prompt_cursor + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.prompt_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.prompt_cursor = self.session.prompt_text.chars().count();
    }

    pub fn clear_prompt(&mut self) {
        self.session.prompt_text.clear();
        self.prompt_cursor = 0;
    }

    /// (line, column) of the cursor within the prompt, counted in chars
    pub fn prompt_cursor_position(&self) -> (usize, usize) {
        let before: String = self.session.prompt_text.chars().take(self.prompt_cursor).collect();
        let line = before.matches('\n').count();
        let column = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0);
        (line, column)
    }

    // Tile grid navigation

    pub fn tile_left(&mut self) {
        if self.tile_cursor % TILE_COLUMNS > 0 {
            self.tile_cursor -= 1;
        }
    }

    pub fn tile_right(&mut self) {
        if self.tile_cursor % TILE_COLUMNS < TILE_COLUMNS - 1
            && self.tile_cursor + 1 < ContentType::ALL.len()
        {
            self.tile_cursor += 1;
        }
    }

    pub fn tile_up(&mut self) {
        if self.tile_cursor >= TILE_COLUMNS {
            self.tile_cursor -= TILE_COLUMNS;
        }
    }

    pub fn tile_down(&mut self) {
        if self.tile_cursor + TILE_COLUMNS < ContentType::ALL.len() {
            self.tile_cursor += TILE_COLUMNS;
        }
    }

    // Output scrolling

    pub fn max_output_scroll(&self) -> u16 {
        self.output_lines.saturating_sub(self.output_height)
    }

    pub fn scroll_down(&mut self) {
        self.output_scroll = self.output_scroll.saturating_add(1).min(self.max_output_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half = (self.output_height / 2).max(1);
        self.output_scroll = self.output_scroll.saturating_add(half).min(self.max_output_scroll());
    }

    pub fn scroll_half_page_up(&mut self) {
        let half = (self.output_height / 2).max(1);
        self.output_scroll = self.output_scroll.saturating_sub(half);
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
