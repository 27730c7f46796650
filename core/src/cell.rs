use serde::{Deserialize, Serialize};

const COUNT_CONTENT: [&str; 9] = ["", "1", "2", "3", "4", "5", "6", "7", "8"];

/// What a cell hides, fixed once the board is set up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Count(u8),
    Mine,
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Unexplored,
    Marked,
    /// Mine shown while cheating, still counts as unexplored for the game.
    Cheat,
    Revealed(u8),
    Mine,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Mine)
    }

    /// Display string for the state: empty, `1`-`8`, or `M`.
    pub fn content(self) -> &'static str {
        match self {
            Self::Revealed(count) => COUNT_CONTENT.get(usize::from(count)).copied().unwrap_or(""),
            Self::Mine => "M",
            Self::Unexplored | Self::Marked | Self::Cheat => "",
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Unexplored
    }
}

impl From<CellValue> for CellState {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Count(count) => Self::Revealed(count),
            CellValue::Mine => Self::Mine,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: Option<CellValue>,
    state: CellState,
}

impl Cell {
    /// `None` until values have been computed for the board.
    pub const fn value(&self) -> Option<CellValue> {
        self.value
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub fn content(&self) -> &'static str {
        self.state.content()
    }

    pub(crate) fn set_value(&mut self, value: CellValue) {
        self.value = Some(value);
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Shows the hidden value, returns `false` if there is none yet.
    pub(crate) fn uncover(&mut self) -> bool {
        match self.value {
            Some(value) => {
                self.state = value.into();
                true
            }
            None => false,
        }
    }
}
