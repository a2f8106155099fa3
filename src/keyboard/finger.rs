use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerAssignment {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerAssignment {
    pub const fn new(hand: Hand, finger: Finger) -> Self {
        Self { hand, finger }
    }
}

impl fmt::Display for FingerAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.finger == Finger::Thumb {
            return f.write_str("Thumbs (space bar)");
        }
        let hand = match self.hand {
            Hand::Left => "Left",
            Hand::Right => "Right",
        };
        let finger = match self.finger {
            Finger::Pinky => "pinky",
            Finger::Ring => "ring",
            Finger::Middle => "middle",
            Finger::Index => "index",
            Finger::Thumb => "thumb",
        };
        write!(f, "{hand} {finger}")
    }
}
