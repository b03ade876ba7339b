//! State store: a closed set of actions over the session state
//!
//! All mutation of `AppState` goes through `apply`, a pure transition that
//! consumes the old snapshot and returns a wholly new one. Readers always
//! observe a fully-formed state, never a partial update. Actions targeting
//! an absent character or clip are silent no-ops.

use super::model::{AppState, AudioFile, Character, CharacterId, ClipId};

/// The closed set of state transitions
#[derive(Debug, Clone)]
pub enum Action {
    /// Append a new character with a fresh id and no clips.
    /// The name is taken as-is; validation is the caller's responsibility.
    AddCharacter { name: String },
    /// Remove the character; clears focus if it was focused
    DeleteCharacter { id: CharacterId },
    /// Replace the character with the matching id wholesale
    UpdateCharacter { character: Character },
    /// Set or clear the focused character
    SelectCharacter { id: Option<CharacterId> },
    /// Flip the export-inclusion flag on the matching character
    ToggleCharacterSelection { id: CharacterId },
    /// Append a clip to the character's list
    AddAudioFile {
        character_id: CharacterId,
        file: AudioFile,
    },
    /// Replace the clip with the matching id within the character
    UpdateAudioFile {
        character_id: CharacterId,
        file: AudioFile,
    },
    /// Remove the matching clip from the character
    DeleteAudioFile {
        character_id: CharacterId,
        file_id: ClipId,
    },
}

/// Apply one action to the state, producing the next state
///
/// Consumes the old snapshot and returns the replacement; never partially
/// observable, never performs I/O.
pub fn apply(state: AppState, action: Action) -> AppState {
    let AppState {
        mut characters,
        mut selected_character_id,
    } = state;

    match action {
        Action::AddCharacter { name } => {
            characters.push(Character::new(name));
        }

        Action::DeleteCharacter { id } => {
            if selected_character_id.as_ref() == Some(&id) {
                selected_character_id = None;
            }
            characters.retain(|c| c.id != id);
        }

        Action::UpdateCharacter { character } => {
            if let Some(slot) = characters.iter_mut().find(|c| c.id == character.id) {
                *slot = character;
            }
        }

        Action::SelectCharacter { id } => {
            selected_character_id = id;
        }

        Action::ToggleCharacterSelection { id } => {
            if let Some(character) = characters.iter_mut().find(|c| c.id == id) {
                character.selected = !character.selected;
            }
        }

        Action::AddAudioFile { character_id, file } => {
            if let Some(character) = characters.iter_mut().find(|c| c.id == character_id) {
                character.audio_files.push(file);
            }
        }

        Action::UpdateAudioFile { character_id, file } => {
            if let Some(character) = characters.iter_mut().find(|c| c.id == character_id)
                && let Some(slot) = character.audio_files.iter_mut().find(|f| f.id == file.id)
            {
                *slot = file;
            }
        }

        Action::DeleteAudioFile {
            character_id,
            file_id,
        } => {
            if let Some(character) = characters.iter_mut().find(|c| c.id == character_id) {
                character.audio_files.retain(|f| f.id != file_id);
            }
        }
    }

    AppState {
        characters,
        selected_character_id,
    }
}

/// Owner of the authoritative session state
///
/// The store is the single shared mutable resource; everything else reads
/// snapshots through `state()` and mutates through `dispatch`.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state snapshot
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action, replacing the current state
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = apply(state, action);
    }

    /// Add a character and return its freshly minted id
    pub fn add_character(&mut self, name: &str) -> Option<CharacterId> {
        self.dispatch(Action::AddCharacter {
            name: name.to_string(),
        });
        self.state.characters.last().map(|c| c.id.clone())
    }
}
