//! BattleSession - per-battle state model

use rotom_protocol::{BattleSetup, ChoiceSet, Perspective, PokemonSnapshot, Side, TeamPokemon};

use crate::types::{BattleOutcome, HealthBand, Team, life_percent};

/// Shown when a side has nothing to name
pub const PLACEHOLDER_NICK: &str = "???";

/// A battle as seen by one participant.
///
/// Mutated only by the event interpreter ([`BattleSession::apply`]) and by
/// the choice methods; every mutator reports whether it changed anything and
/// leaves notifying renderers to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    /// Display names, ours first
    names: [String; 2],

    perspective: Perspective,

    team: Team,

    /// Index into `team` of our pokemon on the field
    active_index: Option<usize>,

    /// Last revealed opponent pokemon; kept after it leaves the field
    opponent: Option<PokemonSnapshot>,

    opponent_alive: bool,

    /// Outstanding legal actions, `None` when no decision may be sent
    choices: Option<ChoiceSet>,

    turn: i32,

    outcome: Option<BattleOutcome>,
}

impl BattleSession {
    pub fn new(
        me: impl Into<String>,
        opponent: impl Into<String>,
        perspective: Perspective,
        team: Team,
    ) -> Self {
        Self {
            names: [me.into(), opponent.into()],
            perspective,
            team,
            active_index: None,
            opponent: None,
            opponent_alive: false,
            choices: None,
            turn: 0,
            outcome: None,
        }
    }

    /// Start a session from the battle engagement payload
    pub fn from_setup(setup: BattleSetup) -> Self {
        let perspective = setup.perspective();
        Self::new(setup.me, setup.opponent, perspective, Team::new(setup.team))
    }

    // === Accessors ===

    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }

    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Me => &self.names[0],
            Side::Opponent => &self.names[1],
        }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_pokemon(&self) -> Option<&TeamPokemon> {
        self.active_index.and_then(|idx| self.team.get(idx))
    }

    fn active_pokemon_mut(&mut self) -> Option<&mut TeamPokemon> {
        let idx = self.active_index?;
        self.team.get_mut(idx)
    }

    pub fn opponent(&self) -> Option<&PokemonSnapshot> {
        self.opponent.as_ref()
    }

    pub fn opponent_alive(&self) -> bool {
        self.opponent_alive
    }

    pub fn choices(&self) -> Option<&ChoiceSet> {
        self.choices.as_ref()
    }

    /// Whether a decision can currently be made
    pub fn is_armed(&self) -> bool {
        self.choices.is_some()
    }

    pub fn turn(&self) -> i32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Nickname of the pokemon a side has (or last had) on the field.
    ///
    /// With none of ours active this falls back to the team lead, so
    /// narration never comes out empty.
    pub fn nick(&self, side: Side) -> &str {
        let nick = match side {
            Side::Me => self
                .active_pokemon()
                .or_else(|| self.team.get(0))
                .map(|p| p.nick.as_str()),
            Side::Opponent => self.opponent.as_ref().map(|p| p.nick.as_str()),
        };
        nick.filter(|n| !n.is_empty()).unwrap_or(PLACEHOLDER_NICK)
    }

    /// Remaining life of a side's pokemon as a percentage
    pub fn life_percent(&self, side: Side) -> Option<u8> {
        match side {
            Side::Me => self.active_pokemon().map(life_percent),
            Side::Opponent => self.opponent.as_ref().map(|p| p.life_percent),
        }
    }

    pub fn health_band(&self, side: Side) -> Option<HealthBand> {
        self.life_percent(side).map(HealthBand::from_percent)
    }

    // === Mutators ===

    /// Put a team slot on the field, or clear a side.
    ///
    /// Clearing our side also drops any outstanding choices. Slots that are
    /// out of range, empty or fainted are ignored. The opponent has no known
    /// slots, so only `None` applies to it.
    pub fn set_active(&mut self, side: Side, index: Option<usize>) -> bool {
        match (side, index) {
            (Side::Me, None) => {
                self.active_index = None;
                self.choices = None;
                true
            }
            (Side::Me, Some(idx)) => {
                if !self.team.is_usable(idx) {
                    tracing::debug!(slot = idx, "Ignoring send-out of unusable team slot");
                    return false;
                }
                self.active_index = Some(idx);
                true
            }
            (Side::Opponent, None) => {
                self.opponent_alive = false;
                true
            }
            (Side::Opponent, Some(_)) => false,
        }
    }

    /// Replace everything known about the opponent's pokemon
    pub fn reveal_opponent(&mut self, mut snapshot: PokemonSnapshot) {
        snapshot.life_percent = snapshot.life_percent.min(100);
        self.opponent = Some(snapshot);
    }

    pub fn set_opponent_alive(&mut self, alive: bool) {
        self.opponent_alive = alive;
    }

    /// Set life: absolute points for us, a percentage for the opponent.
    ///
    /// An opponent that was never revealed gets a placeholder snapshot.
    pub fn adjust_life(&mut self, side: Side, value: u16) -> bool {
        match side {
            Side::Me => match self.active_pokemon_mut() {
                Some(poke) => {
                    poke.life_points = value.min(poke.total_life_points);
                    true
                }
                None => {
                    tracing::debug!(value, "Life change with no active pokemon");
                    false
                }
            },
            Side::Opponent => {
                let opponent = self.opponent.get_or_insert_with(PokemonSnapshot::default);
                opponent.life_percent = value.min(100) as u8;
                true
            }
        }
    }

    /// Record a non-volatile status code on a side's pokemon.
    ///
    /// An opponent that was never revealed gets a placeholder snapshot.
    pub fn set_status(&mut self, side: Side, status: i8) -> bool {
        match side {
            Side::Me => match self.active_pokemon_mut() {
                Some(poke) => {
                    poke.status = status;
                    true
                }
                None => {
                    tracing::debug!(status, "Status change with no active pokemon");
                    false
                }
            },
            Side::Opponent => {
                self.opponent
                    .get_or_insert_with(PokemonSnapshot::default)
                    .status = status;
                true
            }
        }
    }

    /// Update the PP of one of our active pokemon's moves
    pub fn set_move_pp(&mut self, side: Side, slot: usize, pp: u8) -> bool {
        if side != Side::Me {
            return false;
        }

        match self.active_pokemon_mut().and_then(|p| p.moves.get_mut(slot)) {
            Some(mv) => {
                mv.pp = pp;
                true
            }
            None => {
                tracing::debug!(slot, pp, "PP change for missing pokemon or move");
                false
            }
        }
    }

    /// Arm (or with `None`, disarm) decisions. The latest set always wins.
    pub fn set_choice_set(&mut self, choices: Option<ChoiceSet>) {
        self.choices = choices;
    }

    pub(crate) fn set_turn(&mut self, turn: i32) {
        self.turn = turn;
    }

    pub(crate) fn set_outcome(&mut self, outcome: BattleOutcome) {
        self.outcome = Some(outcome);
        self.choices = None;
    }

    /// Mark our active pokemon as fainted
    pub(crate) fn faint_active(&mut self) {
        if let Some(poke) = self.active_pokemon_mut() {
            poke.life_points = 0;
        }
    }
}
