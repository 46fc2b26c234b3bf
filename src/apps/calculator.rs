//! Integer calculator.

use crate::core::input::Key;

/// Digits/sign shown at once.
pub const DISPLAY_CAPACITY: usize = 18;

/// Accumulator-style integer calculator.
///
/// One display buffer, two frozen operands, a pending operator. The
/// `new_number` flag folds the entering-first/entering-second states: when
/// set, the next digit replaces the display instead of appending.
#[derive(Debug)]
pub struct Calculator {
    display: String,
    value1: i64,
    value2: i64,
    operator: Option<char>,
    new_number: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: String::from("0"),
            value1: 0,
            value2: 0,
            operator: None,
            new_number: true,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char(c @ '0'..='9') => self.push_digit(c),
            Key::Char(c @ ('+' | '-' | '*' | '/')) => {
                self.value1 = self.parse_display();
                self.operator = Some(c);
                self.new_number = true;
            }
            Key::Char('=') | Key::Enter => {
                self.value2 = self.parse_display();
                self.display = self.apply().to_string();
                self.new_number = true;
            }
            Key::Char('c' | 'C') => *self = Self::new(),
            _ => {}
        }
    }

    fn push_digit(&mut self, digit: char) {
        if self.new_number {
            self.display.clear();
            self.display.push(digit);
            self.new_number = false;
        } else if self.display.len() < DISPLAY_CAPACITY {
            self.display.push(digit);
        }
    }

    fn parse_display(&self) -> i64 {
        self.display.parse().unwrap_or(0)
    }

    /// Applies the pending operator with saturating integer arithmetic.
    ///
    /// Quirks kept from the original behavior: dividing by zero yields 0
    /// instead of an error, `=` with no pending operator yields 0, and the
    /// operator survives `=` so a repeated `=` reapplies it.
    fn apply(&self) -> i64 {
        match self.operator {
            Some('+') => self.value1.saturating_add(self.value2),
            Some('-') => self.value1.saturating_sub(self.value2),
            Some('*') => self.value1.saturating_mul(self.value2),
            Some('/') if self.value2 != 0 => self.value1 / self.value2,
            _ => 0,
        }
    }

    pub fn render(&self) -> Vec<String> {
        vec![
            "Calculator v1.0".to_string(),
            "--------------------".to_string(),
            format!("Display: {}", self.display),
            String::new(),
            "Use keyboard:".to_string(),
            "  0-9: Numbers".to_string(),
            "  +,-,*,/: Operators".to_string(),
            "  =: Calculate".to_string(),
            "  C: Clear".to_string(),
        ]
    }
}
