use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// One game: the board, where the mines are, and how it is going.
///
/// Sessions share nothing, any number of them can run side by side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct Session {
    config: GameConfig,
    mines: MinePlacement,
    board: Board,
    status: GameStatus,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
}

/// Wire shape of a saved [`Session`], checked before it becomes one.
#[derive(Deserialize)]
struct SessionSnapshot {
    config: GameConfig,
    mines: MinePlacement,
    board: Board,
    status: GameStatus,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<SessionSnapshot> for Session {
    type Error = GameError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self> {
        let SessionSnapshot {
            config,
            mines,
            board,
            status,
            flagged_count,
            triggered_mine,
        } = snapshot;

        config.validate()?;
        if mines.game_config() != config || board.size() != config.size {
            return Err(GameError::InvalidSnapshot);
        }

        let mut expected = Board::new(config.size);
        expected.fill_values(&mines)?;
        let values_match = board
            .iter()
            .zip(expected.iter())
            .all(|((_, cell), (_, fresh))| cell.value() == fresh.value());
        if !values_match || board.count_state(CellState::Marked) != flagged_count.0 {
            return Err(GameError::InvalidSnapshot);
        }
        if triggered_mine.is_some_and(|coords| !mines.contains_mine(coords)) {
            return Err(GameError::InvalidSnapshot);
        }

        Ok(Self {
            config,
            mines,
            board,
            status,
            flagged_count,
            triggered_mine,
        })
    }
}

impl Session {
    /// Starts a game with randomly placed mines.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }

    pub fn with_generator<G: MineGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        let mines = generator.generate(config);
        let generated = mines.game_config();
        if generated.size != config.size {
            log::warn!(
                "Generator returned a {:?} board, requested {:?}",
                generated.size,
                config.size
            );
            return Err(GameError::InvalidBoardShape);
        }
        if generated.mines != config.mines {
            log::warn!("Generator placed {} mines, requested {}", generated.mines, config.mines);
            return Err(GameError::GeneratorMismatch {
                requested: config.mines,
                generated: generated.mines,
            });
        }
        Self::from_placement(mines)
    }

    /// Starts a game on a known layout.
    pub fn from_placement(mines: MinePlacement) -> Result<Self> {
        let config = mines.game_config();
        config.validate()?;

        let mut board = Board::new(config.size);
        board.fill_values(&mines)?;

        log::debug!(
            "New {}x{} game with {} mines",
            config.size.0,
            config.size.1,
            config.mines
        );
        Ok(Self {
            config,
            mines,
            board,
            status: GameStatus::InProgress,
            flagged_count: Saturating(0),
            triggered_mine: None,
        })
    }

    /// New layout, same settings.
    pub fn reset(&mut self, seed: u64) -> Result<()> {
        self.apply_settings(self.config, seed)
    }

    /// Replaces the whole game; on error the current one is kept.
    pub fn apply_settings(&mut self, config: GameConfig, seed: u64) -> Result<()> {
        *self = Self::new(config, seed)?;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.board.get(coords)
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mines.contains_mine(coords)
    }

    pub fn total_mines(&self) -> CellCount {
        self.mines.mine_count()
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mines.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    /// The mine that was stepped on, if that is how the game ended.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        self.reveal_with(coords, |_| {})
    }

    /// Like [`Session::reveal`], letting `arrange` reorder each batch of
    /// neighbors the flood fill queues.
    pub(crate) fn reveal_with<F>(&mut self, coords: Coord2, arrange: F) -> RevealOutcome
    where
        F: FnMut(&mut Neighbors),
    {
        use RevealOutcome::*;

        if let Err(rejection) = self.check_cell(coords, |state| state == CellState::Unexplored) {
            log::trace!("Reveal at {:?} ignored: {}", coords, rejection);
            return NoChange(rejection);
        }

        if self.mines.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.lose();
            return HitMine;
        }

        Revealed(self.board.flood_reveal(coords, &self.mines, arrange))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use CellState::*;

        let flaggable = |state: CellState| matches!(state, Unexplored | Marked);
        if let Err(rejection) = self.check_cell(coords, flaggable) {
            log::trace!("Flag at {:?} ignored: {}", coords, rejection);
            return MarkOutcome::NoChange(rejection);
        }

        let Some(cell) = self.board.get_mut(coords) else {
            return MarkOutcome::NoChange(Rejection::OutOfBounds);
        };
        if cell.state() == Marked {
            cell.set_state(Unexplored);
            self.flagged_count -= 1;
        } else {
            cell.set_state(Marked);
            self.flagged_count += 1;
        }
        MarkOutcome::Changed
    }

    /// Shows or hides every mine that is still unexplored.
    pub fn toggle_cheat(&mut self) -> MarkOutcome {
        use CellState::*;

        if self.is_finished() {
            return MarkOutcome::NoChange(Rejection::GameOver);
        }

        let mut updated = false;
        for coords in self.mines.iter() {
            let Some(cell) = self.board.get_mut(coords) else {
                continue;
            };
            match cell.state() {
                Unexplored => cell.set_state(Cheat),
                Cheat => cell.set_state(Unexplored),
                Marked | Revealed(_) | Mine => continue,
            }
            updated = true;
        }

        if updated {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange(Rejection::NotActionable)
        }
    }

    /// Settles the game on the current flags. Once finished it only reports the status.
    pub fn check_win(&mut self) -> GameStatus {
        if self.is_finished() {
            return self.status;
        }

        match evaluate(&self.board, &self.mines) {
            GameStatus::Win => {
                log::debug!("Game won");
                self.status = GameStatus::Win;
            }
            GameStatus::Loss => self.lose(),
            GameStatus::InProgress => {}
        }
        self.status
    }

    fn lose(&mut self) {
        log::debug!("Game lost, revealing the board");
        self.board.reveal_all();
        // the full reveal replaces every flag
        self.flagged_count = Saturating(0);
        self.status = GameStatus::Loss;
    }

    fn check_cell(
        &self,
        coords: Coord2,
        accepts: impl FnOnce(CellState) -> bool,
    ) -> core::result::Result<(), Rejection> {
        let cell = self.board.get(coords).ok_or(Rejection::OutOfBounds)?;
        if self.is_finished() {
            return Err(Rejection::GameOver);
        }
        if accepts(cell.state()) {
            Ok(())
        } else {
            Err(Rejection::NotActionable)
        }
    }
}
