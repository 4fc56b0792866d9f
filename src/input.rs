/// Logical keys and their edge latches.
///
/// The terminal boundary reports which keys are down each frame as a
/// [`KeySnapshot`]; [`InputState`] turns that into a [`FrameInput`] where
/// Fire and Pause only trigger on the frame the key goes down.

/// The five keys the game reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Fire,
    Exit,
    Pause,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::MoveLeft, Key::MoveRight, Key::Fire, Key::Exit, Key::Pause];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Edge-detection state for one key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Latch {
    #[default]
    Released,
    /// Went down on this frame.
    Pressed,
    /// Still down since an earlier edge.
    HeldSinceEdge,
}

impl Latch {
    pub fn next(self, down: bool) -> Latch {
        match (self, down) {
            (_, false) => Latch::Released,
            (Latch::Released, true) => Latch::Pressed,
            (Latch::Pressed | Latch::HeldSinceEdge, true) => Latch::HeldSinceEdge,
        }
    }

    pub fn is_down(self) -> bool {
        self != Latch::Released
    }

    pub fn just_pressed(self) -> bool {
        self == Latch::Pressed
    }
}

/// Raw key-down state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    down: [bool; 5],
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper, mostly for tests.
    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }

    pub fn set(&mut self, key: Key, down: bool) {
        self.down[key.slot()] = down;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.slot()]
    }
}

/// Per-frame commands for the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Edge-triggered.
    pub fire: bool,
    pub exit: bool,
    /// Edge-triggered.
    pub pause: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    latches: [Latch; 5],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latch(&self, key: Key) -> Latch {
        self.latches[key.slot()]
    }

    /// Advance every latch with this frame's snapshot.
    pub fn sample(&mut self, snapshot: &KeySnapshot) -> FrameInput {
        for key in Key::ALL {
            let latch = &mut self.latches[key.slot()];
            *latch = latch.next(snapshot.is_down(key));
        }
        FrameInput {
            left: self.latch(Key::MoveLeft).is_down(),
            right: self.latch(Key::MoveRight).is_down(),
            fire: self.latch(Key::Fire).just_pressed(),
            exit: self.latch(Key::Exit).is_down(),
            pause: self.latch(Key::Pause).just_pressed(),
        }
    }
}
