/// Per-body state machine.
///
/// Each body is in exactly one `BodyState`. Transition tables live in two
/// dispatch functions, one per body kind, mapping `(current, stimulus)` to the
/// next state plus any side effect. Entering the state (velocity, animation)
/// is done by `Body::set_state`.

use std::fmt;

use crate::entities::{BodyKind, Direction};
use crate::GameError;

// ── States & animations ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyState {
    Stand(Direction),
    Walk(Direction),
    Attack(Direction),
    Dead,
}

impl BodyState {
    pub const ALL: [BodyState; 13] = [
        BodyState::Stand(Direction::Up),
        BodyState::Stand(Direction::Right),
        BodyState::Stand(Direction::Down),
        BodyState::Stand(Direction::Left),
        BodyState::Walk(Direction::Up),
        BodyState::Walk(Direction::Right),
        BodyState::Walk(Direction::Down),
        BodyState::Walk(Direction::Left),
        BodyState::Attack(Direction::Up),
        BodyState::Attack(Direction::Right),
        BodyState::Attack(Direction::Down),
        BodyState::Attack(Direction::Left),
        BodyState::Dead,
    ];

    pub fn animation(self) -> Animation {
        match self {
            BodyState::Stand(d) => Animation::Stand(d),
            BodyState::Walk(d) => Animation::Walk(d),
            BodyState::Attack(d) => Animation::Attack(d),
            BodyState::Dead => Animation::Dead,
        }
    }

    /// Facing of the state, `None` for `Dead` (which keeps the previous one).
    pub fn facing(self) -> Option<Direction> {
        match self {
            BodyState::Stand(d) | BodyState::Walk(d) | BodyState::Attack(d) => Some(d),
            BodyState::Dead => None,
        }
    }

    pub fn is_attack(self) -> bool {
        matches!(self, BodyState::Attack(_))
    }
}

impl fmt::Display for BodyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyState::Stand(d) => write!(f, "stand{}", d.name()),
            BodyState::Walk(d) => write!(f, "walk{}", d.name()),
            BodyState::Attack(d) => write!(f, "attack{}", d.name()),
            BodyState::Dead => f.write_str("deadDown"),
        }
    }
}

/// Animation requested from the rendering provider on state entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Animation {
    Stand(Direction),
    Walk(Direction),
    Attack(Direction),
    Dead,
}

impl Animation {
    /// Dense index in `0..13`, matching the order of `BodyState::ALL`.
    pub fn index(self) -> usize {
        let dir = |d: Direction| match d {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        };
        match self {
            Animation::Stand(d) => dir(d),
            Animation::Walk(d) => 4 + dir(d),
            Animation::Attack(d) => 8 + dir(d),
            Animation::Dead => 12,
        }
    }

    pub fn is_attack(self) -> bool {
        matches!(self, Animation::Attack(_))
    }
}

// ── Intent ────────────────────────────────────────────────────────────────────

/// Intent queries answered by the input provider.
///
/// Answers must stay stable for the duration of one frame.
pub trait InputSource {
    fn has_direction_up(&self) -> bool;
    fn has_direction_right(&self) -> bool;
    fn has_direction_down(&self) -> bool;
    fn has_direction_left(&self) -> bool;
    fn has_special(&self) -> bool;

    fn has_direction(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.has_direction_up(),
            Direction::Right => self.has_direction_right(),
            Direction::Down => self.has_direction_down(),
            Direction::Left => self.has_direction_left(),
        }
    }

    /// First held direction in up, right, down, left order.
    fn first_direction(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| self.has_direction(*d))
    }
}

/// Snapshot of held intents for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
    pub special: bool,
}

impl Intent {
    pub fn toward(direction: Direction) -> Self {
        let mut intent = Self::default();
        match direction {
            Direction::Up => intent.up = true,
            Direction::Right => intent.right = true,
            Direction::Down => intent.down = true,
            Direction::Left => intent.left = true,
        }
        intent
    }

    pub fn with_special(mut self) -> Self {
        self.special = true;
        self
    }
}

impl InputSource for Intent {
    fn has_direction_up(&self) -> bool {
        self.up
    }
    fn has_direction_right(&self) -> bool {
        self.right
    }
    fn has_direction_down(&self) -> bool {
        self.down
    }
    fn has_direction_left(&self) -> bool {
        self.left
    }
    fn has_special(&self) -> bool {
        self.special
    }
}

/// Decisions an AI controller hands to its body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiCommand {
    Wander(Direction),
    Strike(Direction),
}

/// What a state machine reacts to.
pub enum Stimulus<'a> {
    Input(&'a dyn InputSource),
    Ai(AiCommand),
    /// Signaled by the animation provider when an attack animation ends.
    AttackCompleted,
}

impl Stimulus<'_> {
    fn operation(&self) -> &'static str {
        match self {
            Stimulus::Input(_) => "handle_input",
            Stimulus::Ai(_) => "ai_command",
            Stimulus::AttackCompleted => "attack_completed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideEffect {
    SpawnArrow(Direction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: BodyState,
    pub effect: Option<SideEffect>,
}

impl Transition {
    fn to(next: BodyState) -> Self {
        Self { next, effect: None }
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

pub fn dispatch(
    kind: BodyKind,
    current: BodyState,
    stimulus: Stimulus<'_>,
) -> Result<Transition, GameError> {
    match kind {
        BodyKind::Player => player_dispatch(current, stimulus),
        BodyKind::Enemy => enemy_dispatch(current, stimulus),
    }
}

fn not_wired(kind: BodyKind, current: BodyState, stimulus: &Stimulus<'_>) -> GameError {
    GameError::StateNotWired {
        kind,
        state: current,
        operation: stimulus.operation(),
    }
}

/// Input-driven table. Special intent preempts movement; an attack can be
/// retargeted laterally without waiting for it to finish.
pub fn player_dispatch(current: BodyState, stimulus: Stimulus<'_>) -> Result<Transition, GameError> {
    let input = match stimulus {
        Stimulus::Input(input) => input,
        Stimulus::AttackCompleted => {
            return match current {
                BodyState::Attack(d) => Ok(Transition {
                    next: BodyState::Stand(d),
                    effect: Some(SideEffect::SpawnArrow(d)),
                }),
                _ => Err(not_wired(BodyKind::Player, current, &stimulus)),
            };
        }
        Stimulus::Ai(_) => return Err(not_wired(BodyKind::Player, current, &stimulus)),
    };

    let held = input.first_direction();
    let next = match current {
        BodyState::Dead => BodyState::Dead,
        BodyState::Stand(facing) => {
            if input.has_special() {
                BodyState::Attack(held.unwrap_or(facing))
            } else if let Some(d) = held {
                BodyState::Walk(d)
            } else {
                current
            }
        }
        BodyState::Walk(facing) => {
            if input.has_special() {
                BodyState::Attack(held.unwrap_or(facing))
            } else if input.has_direction(facing) {
                current
            } else if let Some(d) = held {
                BodyState::Walk(d)
            } else {
                BodyState::Stand(facing)
            }
        }
        BodyState::Attack(_) => match (input.has_special(), held) {
            (true, Some(d)) => BodyState::Attack(d),
            (false, Some(d)) => BodyState::Walk(d),
            _ => current,
        },
    };
    Ok(Transition::to(next))
}

/// AI-driven table. Enemies have no input re-evaluation, so an attack
/// completion demotes straight to the matching stand.
pub fn enemy_dispatch(current: BodyState, stimulus: Stimulus<'_>) -> Result<Transition, GameError> {
    let next = match (&stimulus, current) {
        (Stimulus::Input(_), _) => return Err(not_wired(BodyKind::Enemy, current, &stimulus)),
        (Stimulus::Ai(_), BodyState::Dead) => BodyState::Dead,
        (Stimulus::Ai(AiCommand::Wander(_)), BodyState::Attack(_)) => current,
        (Stimulus::Ai(AiCommand::Wander(d)), _) => BodyState::Walk(*d),
        (Stimulus::Ai(AiCommand::Strike(d)), _) => BodyState::Attack(*d),
        (Stimulus::AttackCompleted, BodyState::Attack(d)) => BodyState::Stand(d),
        (Stimulus::AttackCompleted, _) => {
            return Err(not_wired(BodyKind::Enemy, current, &stimulus))
        }
    };
    Ok(Transition::to(next))
}
