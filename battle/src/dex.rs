//! Read-only lookup tables (species, moves, types, stats)
//!
//! The interpreter never owns game data. Callers pass a [`Dex`] in, so the
//! tables can come from data files, a database, or a test fixture.

use std::collections::HashMap;

use crate::types::{Stat, Type};

/// Lookups by wire id. Unknown ids return `None` and callers fall back to
/// placeholders.
pub trait Dex {
    fn pokemon_name(&self, num: u16) -> Option<&str>;

    fn move_name(&self, num: u16) -> Option<&str>;

    fn move_type(&self, num: u16) -> Option<Type>;

    /// Message template `part` of a move; may contain `%s %t %f %m %d %q`
    fn move_message(&self, num: u16, part: u8) -> Option<&str>;

    fn type_name(&self, type_id: i8) -> Option<&str> {
        Type::from_protocol(type_id).map(|t| t.as_str())
    }

    fn stat_name(&self, stat: i8) -> Option<&str> {
        Stat::from_protocol(stat).map(|s| s.as_str())
    }
}

#[derive(Debug, Clone)]
struct MoveEntry {
    name: String,
    move_type: Type,
    messages: HashMap<u8, String>,
}

/// In-memory [`Dex`] built up front
///
/// ```ignore
/// let dex = StaticDex::new()
///     .with_pokemon(25, "Pikachu")
///     .with_move(85, "Thunderbolt", Type::Electric)
///     .with_move_message(73, 0, "%s planted a seed on %f!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticDex {
    pokemon: HashMap<u16, String>,
    moves: HashMap<u16, MoveEntry>,
}

impl StaticDex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pokemon(mut self, num: u16, name: impl Into<String>) -> Self {
        self.pokemon.insert(num, name.into());
        self
    }

    pub fn with_move(mut self, num: u16, name: impl Into<String>, move_type: Type) -> Self {
        let name = name.into();
        self.moves
            .entry(num)
            .and_modify(|entry| {
                entry.name = name.clone();
                entry.move_type = move_type;
            })
            .or_insert_with(|| MoveEntry {
                name,
                move_type,
                messages: HashMap::new(),
            });
        self
    }

    /// Register a message template. The move must have been added first,
    /// otherwise it is created as a typeless, unnamed move.
    pub fn with_move_message(mut self, num: u16, part: u8, template: impl Into<String>) -> Self {
        self.moves
            .entry(num)
            .or_insert_with(|| MoveEntry {
                name: String::new(),
                move_type: Type::Mystery,
                messages: HashMap::new(),
            })
            .messages
            .insert(part, template.into());
        self
    }
}

impl Dex for StaticDex {
    fn pokemon_name(&self, num: u16) -> Option<&str> {
        self.pokemon.get(&num).map(String::as_str)
    }

    fn move_name(&self, num: u16) -> Option<&str> {
        self.moves
            .get(&num)
            .map(|entry| entry.name.as_str())
            .filter(|name| !name.is_empty())
    }

    fn move_type(&self, num: u16) -> Option<Type> {
        self.moves.get(&num).map(|entry| entry.move_type)
    }

    fn move_message(&self, num: u16, part: u8) -> Option<&str> {
        self.moves
            .get(&num)?
            .messages
            .get(&part)
            .map(String::as_str)
    }
}
