// src/test_support.rs
//
// In-memory host surfaces for unit tests. Every fake is a cheap handle over
// shared state, so a test keeps one clone and hands another to the controller.

use crate::core::controller::{Host, SessionController};
use crate::models::ActiveDocument;
use crate::system::editor::Editor;
use crate::system::fs::Filesystem;
use crate::system::prompt::{ContextIndicators, PromptError, Prompter};
use crate::system::store::{MemoryStore, StateStore, StoreError};
use crate::system::terminal::{Terminal, TerminalError, TerminalId, TerminalSpawner};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use uuid::Uuid;

// --- Editor ---

#[derive(Debug, Default)]
struct EditorState {
    active: Option<ActiveDocument>,
    saves: usize,
    fail_saves: bool,
}

#[derive(Debug, Default, Clone)]
pub struct FakeEditor(Rc<RefCell<EditorState>>);

impl FakeEditor {
    pub fn focus(&self, path: &str, is_dirty: bool) {
        self.0.borrow_mut().active = Some(ActiveDocument {
            path: PathBuf::from(path),
            is_dirty,
        });
    }

    pub fn fail_saves(&self) {
        self.0.borrow_mut().fail_saves = true;
    }

    pub fn saves(&self) -> usize {
        self.0.borrow().saves
    }
}

impl Editor for FakeEditor {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.0.borrow().active.clone()
    }

    fn save_active(&mut self) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_saves {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        state.saves += 1;
        if let Some(doc) = state.active.as_mut() {
            doc.is_dirty = false;
        }
        Ok(())
    }

    fn open(&mut self, path: &Path) {
        self.0.borrow_mut().active = Some(ActiveDocument {
            path: path.to_path_buf(),
            is_dirty: false,
        });
    }
}

// --- Terminal ---

#[derive(Debug)]
pub struct TerminalRecord {
    pub name: String,
    pub lines: Vec<String>,
    pub shown: bool,
    pub exited: bool,
    pub closed: bool,
}

#[derive(Debug)]
struct FakeTerminal {
    id: TerminalId,
    record: Rc<RefCell<TerminalRecord>>,
    name: String,
    all_lines: Rc<RefCell<Vec<String>>>,
}

impl Terminal for FakeTerminal {
    fn id(&self) -> TerminalId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn show(&mut self) {
        self.record.borrow_mut().shown = true;
    }

    fn send_text(&mut self, line: &str) -> Result<(), TerminalError> {
        let mut record = self.record.borrow_mut();
        if record.exited {
            return Err(TerminalError::Exited(record.name.clone()));
        }
        record.lines.push(line.to_string());
        self.all_lines.borrow_mut().push(line.to_string());
        Ok(())
    }

    fn has_exited(&mut self) -> bool {
        self.record.borrow().exited
    }

    fn close(&mut self) -> Result<(), TerminalError> {
        let mut record = self.record.borrow_mut();
        record.closed = true;
        record.exited = true;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SpawnerState {
    order: Vec<TerminalId>,
    terminals: HashMap<TerminalId, Rc<RefCell<TerminalRecord>>>,
    all_lines: Rc<RefCell<Vec<String>>>,
}

#[derive(Debug, Default, Clone)]
pub struct FakeSpawner(Rc<RefCell<SpawnerState>>);

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.0.borrow().order.len()
    }

    /// Ids of every terminal created, oldest first.
    pub fn ids(&self) -> Vec<TerminalId> {
        self.0.borrow().order.clone()
    }

    pub fn terminal(&self, id: TerminalId) -> Rc<RefCell<TerminalRecord>> {
        self.0
            .borrow()
            .terminals
            .get(&id)
            .cloned()
            .expect("no terminal with this id was created")
    }

    /// Every line sent to any terminal, in order.
    pub fn all_lines(&self) -> Vec<String> {
        self.0.borrow().all_lines.borrow().clone()
    }
}

impl TerminalSpawner for FakeSpawner {
    fn create_terminal(&mut self, name: &str) -> Result<Box<dyn Terminal>, TerminalError> {
        let mut state = self.0.borrow_mut();
        let id = Uuid::new_v4();
        let record = Rc::new(RefCell::new(TerminalRecord {
            name: name.to_string(),
            lines: Vec::new(),
            shown: false,
            exited: false,
            closed: false,
        }));
        state.order.push(id);
        state.terminals.insert(id, record.clone());
        Ok(Box::new(FakeTerminal {
            id,
            record,
            name: name.to_string(),
            all_lines: state.all_lines.clone(),
        }))
    }
}

// --- Prompts ---

#[derive(Debug, Default)]
struct PromptState {
    inputs: VecDeque<Option<String>>,
    choices: VecDeque<Option<String>>,
    prefills: Vec<String>,
    questions: Vec<String>,
    infos: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct FakePrompter(Rc<RefCell<PromptState>>);

impl FakePrompter {
    /// Queues the answer for the next input box (`None` = dismissed).
    pub fn answer_input(&self, answer: Option<&str>) {
        self.0
            .borrow_mut()
            .inputs
            .push_back(answer.map(str::to_string));
    }

    /// Queues the answer for the next choice (`None` = dismissed).
    pub fn answer_choice(&self, answer: Option<&str>) {
        self.0
            .borrow_mut()
            .choices
            .push_back(answer.map(str::to_string));
    }

    pub fn prefills(&self) -> Vec<String> {
        self.0.borrow().prefills.clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.0.borrow().questions.clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.0.borrow().infos.clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.0.borrow().warnings.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.0.borrow().errors.clone()
    }
}

impl Prompter for FakePrompter {
    fn input(
        &mut self,
        _prompt: &str,
        prefill: &str,
        _placeholder: &str,
    ) -> Result<Option<String>, PromptError> {
        let mut state = self.0.borrow_mut();
        state.prefills.push(prefill.to_string());
        Ok(state.inputs.pop_front().flatten())
    }

    fn choose(&mut self, message: &str, _choices: &[&str]) -> Result<Option<String>, PromptError> {
        let mut state = self.0.borrow_mut();
        state.questions.push(message.to_string());
        Ok(state.choices.pop_front().flatten())
    }

    fn info(&mut self, message: &str) {
        self.0.borrow_mut().infos.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.0.borrow_mut().warnings.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.0.borrow_mut().errors.push(message.to_string());
    }
}

// --- Filesystem ---

#[derive(Debug, Default)]
struct FsState {
    modes: HashMap<PathBuf, u32>,
    chmod_calls: usize,
    fail_writes: bool,
}

#[derive(Debug, Default, Clone)]
pub struct FakeFilesystem(Rc<RefCell<FsState>>);

impl FakeFilesystem {
    pub fn add_file(&self, path: &str, mode: u32) {
        self.0.borrow_mut().modes.insert(PathBuf::from(path), mode);
    }

    pub fn fail_writes(&self) {
        self.0.borrow_mut().fail_writes = true;
    }

    pub fn mode_of(&self, path: &str) -> Option<u32> {
        self.0.borrow().modes.get(Path::new(path)).copied()
    }

    pub fn chmod_calls(&self) -> usize {
        self.0.borrow().chmod_calls
    }
}

impl Filesystem for FakeFilesystem {
    fn mode(&self, path: &Path) -> io::Result<u32> {
        self.0
            .borrow()
            .modes
            .get(path)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "operation not permitted",
            ));
        }
        state.chmod_calls += 1;
        state.modes.insert(path.to_path_buf(), mode);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.borrow().modes.contains_key(path)
    }
}

// --- Store ---

#[derive(Debug, Default, Clone)]
pub struct SharedStore(Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn set_read_only(&self, read_only: bool) {
        self.0.borrow_mut().set_read_only(read_only);
    }
}

impl StateStore for SharedStore {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.0.borrow().get_raw(key)
    }

    fn update_raw(&mut self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.0.borrow_mut().update_raw(key, bytes)
    }
}

// --- Harness ---

/// One set of fakes; `controller()` may be called repeatedly to simulate restarts.
#[derive(Debug, Default)]
pub struct Harness {
    pub editor: FakeEditor,
    pub spawner: FakeSpawner,
    pub prompts: FakePrompter,
    pub fs: FakeFilesystem,
    pub ui: ContextIndicators,
    pub store: SharedStore,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(&self) -> Host {
        Host {
            editor: Box::new(self.editor.clone()),
            terminals: Box::new(self.spawner.clone()),
            prompts: Box::new(self.prompts.clone()),
            fs: Box::new(self.fs.clone()),
            ui: Box::new(self.ui.clone()),
            store: Box::new(self.store.clone()),
        }
    }

    pub fn controller(&self) -> SessionController {
        SessionController::start(self.host(), "Shell Runner")
    }
}
