use crate::domain::state::TenureState;
use crate::error::Result;
use std::cell::{Cell, RefCell};

pub mod json_file;

pub use json_file::JsonFileStore;

/// Durable home of the [`TenureState`]. Single writer, no locking.
pub trait StateStore {
    /// Returns an empty state when nothing has been persisted yet.
    fn load(&self) -> Result<TenureState>;

    fn save(&self, state: &TenureState) -> Result<()>;
}

/// In-process store for fixtures and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RefCell<Option<TenureState>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: TenureState) -> Self {
        Self {
            state: RefCell::new(Some(state)),
            saves: Cell::new(0),
        }
    }

    /// Last saved (or seeded) state.
    pub fn current(&self) -> Option<TenureState> {
        self.state.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<TenureState> {
        Ok(self.state.borrow().clone().unwrap_or_default())
    }

    fn save(&self, state: &TenureState) -> Result<()> {
        *self.state.borrow_mut() = Some(state.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
