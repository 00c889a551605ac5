// src/state.rs

use crate::constants::{STATE_KEY_CLEAR_MODE, STATE_KEY_SUDO_MODE};
use crate::models::SessionFlags;
use crate::system::store::{StateStore, StateStoreExt, StoreError};
use crate::system::terminal::{Terminal, TerminalError, TerminalId, TerminalSpawner};

/// The single reusable terminal owned by the controller.
///
/// `Active` may hold a terminal whose process already exited; `acquire`
/// notices that and replaces it, and a closure notification for the held
/// terminal moves the state back to `NoTerminal`.
#[derive(Default)]
pub enum TerminalState {
    #[default]
    NoTerminal,
    Active(Box<dyn Terminal>),
}

impl std::fmt::Debug for TerminalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTerminal => f.write_str("NoTerminal"),
            Self::Active(terminal) => f
                .debug_tuple("Active")
                .field(&terminal.id())
                .finish(),
        }
    }
}

impl TerminalState {
    /// Returns the live terminal, creating a fresh one when there is none or
    /// the held one has exited.
    pub fn acquire(
        &mut self,
        spawner: &mut dyn TerminalSpawner,
        name: &str,
    ) -> Result<&mut dyn Terminal, TerminalError> {
        let terminal = match std::mem::take(self) {
            Self::Active(mut terminal) => {
                if terminal.has_exited() {
                    log::debug!("Terminal {} has exited, creating a new one", terminal.id());
                    spawner.create_terminal(name)?
                } else {
                    terminal
                }
            }
            Self::NoTerminal => spawner.create_terminal(name)?,
        };
        *self = Self::Active(terminal);

        match self {
            Self::Active(terminal) => Ok(&mut **terminal),
            Self::NoTerminal => Err(TerminalError::Exited(name.to_string())),
        }
    }

    /// Host notification that terminal `id` was closed. Returns whether it
    /// was the one held here.
    pub fn on_closed(&mut self, id: TerminalId) -> bool {
        let ours = matches!(self, Self::Active(terminal) if terminal.id() == id);
        if ours {
            log::debug!("Terminal {} closed, releasing it", id);
            *self = Self::NoTerminal;
        }
        ours
    }

    /// The held terminal's id, if any.
    pub fn active_id(&self) -> Option<TerminalId> {
        match self {
            Self::Active(terminal) => Some(terminal.id()),
            Self::NoTerminal => None,
        }
    }

    /// Polls the held terminal and returns its id if it has exited.
    pub fn exited_id(&mut self) -> Option<TerminalId> {
        if let Self::Active(terminal) = self {
            if terminal.has_exited() {
                return Some(terminal.id());
            }
        }
        None
    }

    /// Ends the held terminal's input and waits for it to finish.
    pub fn shutdown(&mut self) -> Result<(), TerminalError> {
        match std::mem::take(self) {
            Self::Active(mut terminal) => terminal.close(),
            Self::NoTerminal => Ok(()),
        }
    }
}

/// Loads the persisted toggles, using the defaults for missing keys.
pub fn load_flags(store: &dyn StateStore) -> SessionFlags {
    let defaults = SessionFlags::default();
    SessionFlags {
        sudo_mode: store.get_or(STATE_KEY_SUDO_MODE, defaults.sudo_mode),
        clear_before_run: store.get_or(STATE_KEY_CLEAR_MODE, defaults.clear_before_run),
    }
}

/// Persists one toggle under its own key.
pub fn save_flag(store: &mut dyn StateStore, key: &str, value: bool) -> Result<(), StoreError> {
    store.update(key, &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::store::MemoryStore;
    use crate::test_support::FakeSpawner;

    #[test]
    fn test_defaults_when_nothing_persisted() {
        let store = MemoryStore::new();
        assert_eq!(load_flags(&store), SessionFlags::default());
        assert!(!load_flags(&store).sudo_mode);
        assert!(load_flags(&store).clear_before_run);
    }

    #[test]
    fn test_flags_are_persisted_independently() {
        let mut store = MemoryStore::new();
        save_flag(&mut store, STATE_KEY_SUDO_MODE, true).unwrap();
        let flags = load_flags(&store);
        assert!(flags.sudo_mode);
        assert!(flags.clear_before_run);
    }

    #[test]
    fn test_terminal_is_reused_until_it_exits() {
        let mut spawner = FakeSpawner::new();
        let mut state = TerminalState::default();

        let first = state.acquire(&mut spawner, "Shell Runner").unwrap().id();
        let again = state.acquire(&mut spawner, "Shell Runner").unwrap().id();
        assert_eq!(first, again);
        assert_eq!(spawner.created(), 1);

        spawner.terminal(first).borrow_mut().exited = true;
        let fresh = state.acquire(&mut spawner, "Shell Runner").unwrap().id();
        assert_ne!(first, fresh);
        assert_eq!(spawner.created(), 2);
    }

    #[test]
    fn test_closure_notification_only_releases_matching_terminal() {
        let mut spawner = FakeSpawner::new();
        let mut state = TerminalState::default();
        let id = state.acquire(&mut spawner, "Shell Runner").unwrap().id();

        assert!(!state.on_closed(uuid::Uuid::new_v4()));
        assert_eq!(state.active_id(), Some(id));

        assert!(state.on_closed(id));
        assert_eq!(state.active_id(), None);
    }

    #[test]
    fn test_shutdown_closes_the_terminal() {
        let mut spawner = FakeSpawner::new();
        let mut state = TerminalState::default();
        let id = state.acquire(&mut spawner, "Shell Runner").unwrap().id();

        state.shutdown().unwrap();

        assert!(spawner.terminal(id).borrow().closed);
        assert!(matches!(state, TerminalState::NoTerminal));
    }
}
