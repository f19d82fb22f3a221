use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime};

use lotto649_db::models::{Draw, PICK_COUNT, validate_draw, validate_number};

/// Raw user input for one draw, kept as typed until submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawForm {
    pub date: String,
    pub numbers: [String; PICK_COUNT],
    pub bonus: String,
}

impl DrawForm {
    /// Builds a form from `[YYYY-MM-DD] n n n n n n / bonus`. Numbers may be
    /// separated by spaces or commas; tokens past the sixth are ignored.
    pub fn from_line(line: &str) -> Self {
        let mut form = DrawForm::default();
        let (main, bonus) = match line.split_once('/') {
            Some((main, bonus)) => (main, bonus.trim()),
            None => (line, ""),
        };

        let mut tokens = main
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .peekable();

        if let Some(first) = tokens.peek() {
            if NaiveDate::parse_from_str(first, "%Y-%m-%d").is_ok() {
                form.date = first.to_string();
                tokens.next();
            }
        }

        for (slot, token) in form.numbers.iter_mut().zip(tokens) {
            *slot = token.to_string();
        }
        form.bonus = bonus.to_string();
        form
    }

    pub fn clear(&mut self) {
        *self = DrawForm::default();
    }

    /// Turns the form into a draw. Fields that are not numbers are dropped;
    /// anything short of six numbers and a bonus is an error.
    pub fn to_draw(&self, now: NaiveDateTime, reject_duplicates: bool) -> Result<Draw> {
        let parsed: Vec<i64> = self.numbers.iter().filter_map(|n| parse_int(n)).collect();
        if parsed.len() != PICK_COUNT {
            bail!("Expected {} numbers, only {} are valid", PICK_COUNT, parsed.len());
        }
        let Some(bonus) = parse_int(&self.bonus) else {
            bail!("Bonus '{}' is not a number", self.bonus);
        };

        let mut numbers = [0u8; PICK_COUNT];
        for (slot, &n) in numbers.iter_mut().zip(&parsed) {
            *slot = validate_number(n)?;
        }
        let bonus = validate_number(bonus)?;
        validate_draw(&numbers, bonus, reject_duplicates)?;

        let date = parse_date(&self.date, now)?;
        Ok(Draw { date, numbers, bonus })
    }
}

/// Lenient integer parsing: leading whitespace, an optional sign and the
/// leading run of digits. `"12abc"` is 12, `"3.9"` is 3, `"abc"` is `None`.
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, digits) = match s.as_bytes().first().copied() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Overflow saturates so it is later rejected as out of range.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

/// Empty input means `now`. Accepts `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(raw: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(now);
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }
    bail!("Invalid date format: '{}'", raw);
}
