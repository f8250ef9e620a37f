//! Game instance: lobby, turn order and action dispatch.
//!
//! A `Game` owns one `Board` and is its only writer. Every action is
//! validated against the board first and applied only once it is known to
//! be legal, so a refused action never leaves partial changes behind. If
//! applying a validated action trips an engine invariant the instance halts
//! and refuses everything afterwards.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{AxialCoord, Board, PlayerId, ProvinceId, UnitKind};
use crate::config::GameConfig;
use crate::error::{ActionError, InvariantViolation, RuleViolation};
use crate::movegen::{validate_move, validate_purchase, Landing, MovePlan, PurchasePlan};
use crate::resolve::{
    apply_placement, capture_tile, collect_income, release_player, remove_unit, spread_trees,
    CaptureReport,
};
use crate::setup::{assign_start_territories, SetupError};

/// A request from a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ready,
    Move { src: AxialCoord, dest: AxialCoord },
    Purchase { province: ProvinceId, coord: AxialCoord, kind: UnitKind },
    EndTurn,
}

/// The effect of an accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The player is ready; `started` is true if this started the game.
    Ready { started: bool },
    Moved {
        src: AxialCoord,
        dest: AxialCoord,
        unit: UnitKind,
        captured: Option<CaptureReport>,
    },
    Purchased {
        coord: AxialCoord,
        unit: UnitKind,
        cost: i64,
        captured: Option<CaptureReport>,
    },
    TurnPassed { current_player_number: u32 },
}

/// Identity assigned to a joining player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHandle {
    pub id: PlayerId,
    pub player_number: u32,
}

/// One game instance.
pub struct Game {
    board: Board,
    config: GameConfig,
    rng: SmallRng,
    halted: Option<InvariantViolation>,
}

impl Game {
    /// Creates a game over the given land tiles.
    pub fn new(config: GameConfig, land: impl IntoIterator<Item = AxialCoord>) -> Self {
        Self::from_board(config, Board::new(land))
    }

    /// Creates a game over the given land with neutral trees or graves.
    pub fn with_terrain(
        config: GameConfig,
        land: impl IntoIterator<Item = AxialCoord>,
        terrain: impl IntoIterator<Item = (AxialCoord, UnitKind)>,
    ) -> Result<Self, SetupError> {
        let mut board = Board::new(land);
        for (coord, kind) in terrain {
            board.plant_terrain(coord, kind)?;
        }
        Ok(Self::from_board(config, board))
    }

    /// Wraps an existing board, e.g. a scripted position or a snapshot.
    pub fn from_board(config: GameConfig, board: Board) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Game { board, config, rng, halted: None }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The invariant violation that halted this game, if any.
    pub fn halted(&self) -> Option<&InvariantViolation> {
        self.halted.as_ref()
    }

    /// Joins a new player to the lobby.
    pub fn add_player(&mut self, id: PlayerId) -> Result<PlayerHandle, ActionError> {
        self.ensure_live()?;
        if self.board.game_started {
            return Err(RuleViolation::AlreadyStarted.into());
        }
        if self.board.players.contains_key(&id) {
            return Err(RuleViolation::DuplicatePlayer(id).into());
        }
        if self.board.players.len() >= self.config.max_players {
            return Err(RuleViolation::LobbyFull(self.config.max_players).into());
        }

        let player_number = self.board.add_player(id.clone());
        tracing::info!(player = %id, player_number, "player joined");
        Ok(PlayerHandle { id, player_number })
    }

    /// Removes a player and releases their land.
    ///
    /// If the player held the turn, it passes to the next player. Returns the
    /// number of tiles released.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<usize, ActionError> {
        self.ensure_live()?;
        let number = self
            .board
            .player(id)
            .map(|p| p.player_number)
            .ok_or_else(|| RuleViolation::UnknownPlayer(id.clone()))?;

        let released = release_player(&mut self.board, id);
        let released = self.commit(released)?;
        tracing::info!(player = %id, released, "player left");

        if self.board.game_started && self.board.current_player_number == number {
            if let Some(next) = self.board.next_in_turn(number) {
                let result = self.begin_turn(next);
                self.commit(result)?;
            }
        }
        Ok(released)
    }

    /// Marks a player connected or disconnected.
    pub fn set_connected(&mut self, id: &PlayerId, connected: bool) -> Result<(), ActionError> {
        self.ensure_live()?;
        let player = self
            .board
            .player_mut(id)
            .ok_or_else(|| RuleViolation::UnknownPlayer(id.clone()))?;
        player.connected = connected;
        tracing::info!(player = %id, connected, "connection changed");
        Ok(())
    }

    /// Applies one player action.
    pub fn apply(&mut self, player: &PlayerId, action: Action) -> Result<Outcome, ActionError> {
        self.ensure_live()?;
        let result = match action {
            Action::Ready => self.ready(player),
            Action::Move { src, dest } => self.do_move(player, src, dest),
            Action::Purchase { province, coord, kind } => {
                self.do_purchase(player, province, coord, kind)
            }
            Action::EndTurn => self.do_end_turn(player),
        };

        match &result {
            Err(ActionError::Rule(violation)) => {
                tracing::warn!(%player, ?action, %violation, "action rejected");
            }
            Ok(_) if cfg!(debug_assertions) => {
                let verified = self.board.verify();
                self.commit(verified)?;
            }
            _ => {}
        }
        result
    }

    pub fn player_ready(&mut self, player: &PlayerId) -> Result<Outcome, ActionError> {
        self.apply(player, Action::Ready)
    }

    pub fn move_unit(
        &mut self,
        player: &PlayerId,
        src: AxialCoord,
        dest: AxialCoord,
    ) -> Result<Outcome, ActionError> {
        self.apply(player, Action::Move { src, dest })
    }

    pub fn purchase(
        &mut self,
        player: &PlayerId,
        province: ProvinceId,
        coord: AxialCoord,
        kind: UnitKind,
    ) -> Result<Outcome, ActionError> {
        self.apply(player, Action::Purchase { province, coord, kind })
    }

    pub fn end_turn(&mut self, player: &PlayerId) -> Result<Outcome, ActionError> {
        self.apply(player, Action::EndTurn)
    }

    fn ready(&mut self, id: &PlayerId) -> Result<Outcome, ActionError> {
        if self.board.game_started {
            return Err(RuleViolation::AlreadyStarted.into());
        }
        let player = self
            .board
            .player_mut(id)
            .ok_or_else(|| RuleViolation::UnknownPlayer(id.clone()))?;
        player.ready_to_start = true;

        let players = &self.board.players;
        let all_ready = players.values().all(|p| p.ready_to_start);
        if !all_ready || players.len() < self.config.min_players {
            return Ok(Outcome::Ready { started: false });
        }

        let started = self.start_game();
        self.commit(started)?;
        Ok(Outcome::Ready { started: true })
    }

    fn start_game(&mut self) -> Result<(), InvariantViolation> {
        assign_start_territories(&mut self.board, &self.config, &mut self.rng)?;
        self.board.game_started = true;
        self.board.current_player_number = self.board.turn_order().first().copied().unwrap_or(0);
        tracing::info!(
            players = self.board.players.len(),
            first = self.board.current_player_number,
            "game started"
        );
        Ok(())
    }

    /// Rejects the request unless `player` holds the turn of a running game.
    fn check_turn(&self, player: &PlayerId) -> Result<(), RuleViolation> {
        if !self.board.game_started {
            return Err(RuleViolation::NotStarted);
        }
        let entry = self
            .board
            .player(player)
            .ok_or_else(|| RuleViolation::UnknownPlayer(player.clone()))?;
        if entry.player_number != self.board.current_player_number {
            return Err(RuleViolation::NotYourTurn(player.clone()));
        }
        Ok(())
    }

    fn do_move(
        &mut self,
        player: &PlayerId,
        src: AxialCoord,
        dest: AxialCoord,
    ) -> Result<Outcome, ActionError> {
        self.check_turn(player)?;
        let plan = validate_move(&self.board, player, src, dest)?;
        let applied = self.apply_move(&plan);
        let captured = self.commit(applied)?;
        Ok(Outcome::Moved { src, dest, unit: plan.unit, captured })
    }

    fn apply_move(&mut self, plan: &MovePlan) -> Result<Option<CaptureReport>, InvariantViolation> {
        remove_unit(&mut self.board, plan.src)?;
        match plan.landing {
            Landing::Capture => {
                capture_tile(&mut self.board, plan.dest, &plan.owner, plan.unit).map(Some)
            }
            Landing::Place(placement) => {
                apply_placement(&mut self.board, plan.dest, placement, self.config.clearing_bonus)?;
                Ok(None)
            }
        }
    }

    fn do_purchase(
        &mut self,
        player: &PlayerId,
        province: ProvinceId,
        coord: AxialCoord,
        kind: UnitKind,
    ) -> Result<Outcome, ActionError> {
        self.check_turn(player)?;
        let plan = validate_purchase(&self.board, &self.config, player, province, coord, kind)?;
        let applied = self.apply_purchase(&plan);
        let captured = self.commit(applied)?;
        Ok(Outcome::Purchased { coord, unit: kind, cost: plan.cost, captured })
    }

    fn apply_purchase(
        &mut self,
        plan: &PurchasePlan,
    ) -> Result<Option<CaptureReport>, InvariantViolation> {
        self.board.expect_province_mut(&plan.buyer)?.money -= plan.cost;
        tracing::debug!(
            player = %plan.buyer.player,
            province = %plan.buyer.province,
            cost = plan.cost,
            unit = plan.kind.name(),
            "purchased unit"
        );
        match plan.landing {
            Landing::Capture => {
                capture_tile(&mut self.board, plan.coord, &plan.buyer, plan.kind).map(Some)
            }
            Landing::Place(placement) => {
                apply_placement(&mut self.board, plan.coord, placement, self.config.clearing_bonus)?;
                Ok(None)
            }
        }
    }

    fn do_end_turn(&mut self, player: &PlayerId) -> Result<Outcome, ActionError> {
        self.check_turn(player)?;
        let current = self.board.current_player_number;
        let next = self
            .board
            .next_in_turn(current)
            .ok_or_else(|| InvariantViolation::MissingPlayer(player.clone()));
        let next = self.commit(next)?;
        let result = self.begin_turn(next);
        self.commit(result)?;
        Ok(Outcome::TurnPassed { current_player_number: next })
    }

    /// Hands the turn to `next`, collecting its income. Pines spread when
    /// the order wraps to a new round.
    fn begin_turn(&mut self, next: u32) -> Result<(), InvariantViolation> {
        let wrapped = next <= self.board.current_player_number;
        self.board.current_player_number = next;
        if wrapped && self.config.tree_spread {
            spread_trees(&mut self.board)?;
        }
        let income = collect_income(&mut self.board, next);
        tracing::info!(player_number = next, income, "turn started");
        Ok(())
    }

    fn ensure_live(&self) -> Result<(), ActionError> {
        match self.halted {
            Some(_) => Err(ActionError::Halted),
            None => Ok(()),
        }
    }

    /// Passes a mutation result through, halting the game on failure.
    fn commit<T>(&mut self, result: Result<T, InvariantViolation>) -> Result<T, ActionError> {
        result.map_err(|violation| {
            tracing::error!(%violation, "invariant violated, halting game");
            self.halted = Some(violation.clone());
            ActionError::Invariant(violation)
        })
    }
}
