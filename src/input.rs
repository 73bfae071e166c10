use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

impl LogicalKey {
    pub const ALL: [LogicalKey; 4] = [
        LogicalKey::Forward,
        LogicalKey::Backward,
        LogicalKey::TurnLeft,
        LogicalKey::TurnRight,
    ];

    /// WASD and the arrow keys; everything else is unbound.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(LogicalKey::Forward),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(LogicalKey::Backward),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(LogicalKey::TurnLeft),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(LogicalKey::TurnRight),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot of which logical keys are held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    held: [bool; 4],
}

impl KeyState {
    pub fn set(&mut self, key: LogicalKey, down: bool) {
        self.held[key.index()] = down;
    }

    #[inline]
    pub fn is_down(&self, key: LogicalKey) -> bool {
        self.held[key.index()]
    }

    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }
}
