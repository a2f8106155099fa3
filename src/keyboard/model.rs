use crate::keyboard::finger::{Finger, FingerAssignment, Hand};

/// One key of the US physical board the InScript layout sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalKey {
    pub base: char,
    pub shifted: char,
    pub code: &'static str,
}

const fn key(base: char, shifted: char, code: &'static str) -> PhysicalKey {
    PhysicalKey {
        base,
        shifted,
        code,
    }
}

const NUMBER_ROW: [PhysicalKey; 13] = [
    key('`', '~', "Backquote"),
    key('1', '!', "Digit1"),
    key('2', '@', "Digit2"),
    key('3', '#', "Digit3"),
    key('4', '$', "Digit4"),
    key('5', '%', "Digit5"),
    key('6', '^', "Digit6"),
    key('7', '&', "Digit7"),
    key('8', '*', "Digit8"),
    key('9', '(', "Digit9"),
    key('0', ')', "Digit0"),
    key('-', '_', "Minus"),
    key('=', '+', "Equal"),
];

const TOP_ROW: [PhysicalKey; 13] = [
    key('q', 'Q', "KeyQ"),
    key('w', 'W', "KeyW"),
    key('e', 'E', "KeyE"),
    key('r', 'R', "KeyR"),
    key('t', 'T', "KeyT"),
    key('y', 'Y', "KeyY"),
    key('u', 'U', "KeyU"),
    key('i', 'I', "KeyI"),
    key('o', 'O', "KeyO"),
    key('p', 'P', "KeyP"),
    key('[', '{', "BracketLeft"),
    key(']', '}', "BracketRight"),
    key('\\', '|', "Backslash"),
];

const HOME_ROW: [PhysicalKey; 11] = [
    key('a', 'A', "KeyA"),
    key('s', 'S', "KeyS"),
    key('d', 'D', "KeyD"),
    key('f', 'F', "KeyF"),
    key('g', 'G', "KeyG"),
    key('h', 'H', "KeyH"),
    key('j', 'J', "KeyJ"),
    key('k', 'K', "KeyK"),
    key('l', 'L', "KeyL"),
    key(';', ':', "Semicolon"),
    key('\'', '"', "Quote"),
];

const BOTTOM_ROW: [PhysicalKey; 10] = [
    key('z', 'Z', "KeyZ"),
    key('x', 'X', "KeyX"),
    key('c', 'C', "KeyC"),
    key('v', 'V', "KeyV"),
    key('b', 'B', "KeyB"),
    key('n', 'N', "KeyN"),
    key('m', 'M', "KeyM"),
    key(',', '<', "Comma"),
    key('.', '>', "Period"),
    key('/', '?', "Slash"),
];

pub const ROWS: [&[PhysicalKey]; 4] = [&NUMBER_ROW, &TOP_ROW, &HOME_ROW, &BOTTOM_ROW];

fn locate(ch: char) -> Option<(usize, usize)> {
    for (row_idx, row) in ROWS.iter().enumerate() {
        for (col_idx, key) in row.iter().enumerate() {
            if key.base == ch || key.shifted == ch {
                return Some((row_idx, col_idx));
            }
        }
    }
    None
}

pub fn physical_key_for(ch: char) -> Option<PhysicalKey> {
    locate(ch).map(|(r, c)| ROWS[r][c])
}

/// Which base key a printed symbol sits on, and whether it needs shift.
pub fn base_and_shift(ch: char) -> Option<(char, bool)> {
    physical_key_for(ch).map(|pk| (pk.base, pk.shifted == ch && pk.base != ch))
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Physical key code (`KeyboardEvent.code` naming) for a base key identifier.
pub fn physical_code(key: &str) -> Option<&'static str> {
    match key {
        " " => return Some("Space"),
        "Enter" => return Some("Enter"),
        "Tab" => return Some("Tab"),
        _ => {}
    }
    let ch = single_char(key)?;
    ROWS.iter()
        .flat_map(|row| row.iter())
        .find(|pk| pk.base == ch)
        .map(|pk| pk.code)
}

/// Touch-typing finger for a board position.
pub fn finger_for_position(row: usize, col: usize) -> FingerAssignment {
    use Finger::*;
    use Hand::*;

    let (hand, finger) = if row == 0 {
        match col {
            0 | 1 => (Left, Pinky),
            2 => (Left, Ring),
            3 => (Left, Middle),
            4 | 5 => (Left, Index),
            6 | 7 => (Right, Index),
            8 => (Right, Middle),
            9 => (Right, Ring),
            _ => (Right, Pinky),
        }
    } else {
        match col {
            0 => (Left, Pinky),
            1 => (Left, Ring),
            2 => (Left, Middle),
            3 | 4 => (Left, Index),
            5 | 6 => (Right, Index),
            7 => (Right, Middle),
            8 => (Right, Ring),
            _ => (Right, Pinky),
        }
    };
    FingerAssignment::new(hand, finger)
}

pub fn finger_for_key(key: &str) -> FingerAssignment {
    match key {
        " " => return FingerAssignment::new(Hand::Right, Finger::Thumb),
        "Enter" | "Tab" => return FingerAssignment::new(Hand::Right, Finger::Pinky),
        _ => {}
    }
    single_char(key)
        .and_then(locate)
        .map(|(row, col)| finger_for_position(row, col))
        .unwrap_or(FingerAssignment::new(Hand::Right, Finger::Index))
}
