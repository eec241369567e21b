use crate::util::Unit;

pub type Cursor = (u16, u16);

/// One user intent per input event, resolved by the event loop.
#[derive(Copy, Clone, Debug)]
pub enum Action {
    Move(Unit, Unit),
    Reveal,
    Flag,
    GiveUp,
    Restart,
    Resize(Unit, Unit),
    AdjustDifficulty(Unit),
    Quit,
}
