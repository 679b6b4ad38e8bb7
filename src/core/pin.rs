//! Four-digit PIN buffer behind the fixed keypad.

pub const PIN_LENGTH: usize = 4;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PinPad {
    digits: String,
}

impl PinPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns `true` when the digit was accepted.
    /// Non-digits and presses on a full buffer are ignored.
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.is_complete() {
            return false;
        }
        self.digits.push(char::from(b'0' + digit));
        true
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == PIN_LENGTH
    }

    /// The entered PIN, only once all four digits are in.
    pub fn value(&self) -> Option<&str> {
        self.is_complete().then_some(self.digits.as_str())
    }

    /// Masked indicator for display, e.g. "●●○○".
    pub fn indicator(&self) -> String {
        (0..PIN_LENGTH)
            .map(|i| if i < self.digits.len() { '●' } else { '○' })
            .collect()
    }
}
