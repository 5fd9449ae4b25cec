//! Currency and digit-string normalization.

/// Expands a spreadsheet scientific-notation rendering to the exact digit
/// string, zero-padded according to the exponent.
///
/// Excel renders long digit strings (phone numbers, CEPs, tax ids) as
/// `1.1E+12`; parsing that as a float silently loses digits. Expansion must
/// happen before any numeric parsing. Returns `None` when the input is not
/// an integer-valued scientific rendering of a non-negative number.
pub fn expand_scientific(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let (mantissa, exponent) = trimmed.split_once(['e', 'E'])?;
    let exponent: u32 = exponent.trim_start_matches('+').parse().ok()?;
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    let all_digits =
        |part: &str| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit());
    if !all_digits(int_part) || !(frac_part.is_empty() || all_digits(frac_part)) {
        return None;
    }
    let exponent = exponent as usize;
    if frac_part.len() > exponent {
        // Still carries a fractional part; not an integer rendering.
        return None;
    }
    // Real digit strings (phones, CEPs, tax ids) never exceed this.
    if int_part.len() + exponent > 24 {
        return None;
    }
    let mut digits = String::with_capacity(int_part.len() + exponent);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    for _ in 0..exponent - frac_part.len() {
        digits.push('0');
    }
    Some(digits)
}

/// Parses a monetary amount into integer minor units (centavos).
///
/// Recognized shapes, in order:
/// - scientific notation: expanded digit string taken as minor units;
/// - comma decimal (`1.234,56`): dots are thousands separators;
/// - dot decimal with one or two decimals (`10.50`);
/// - dot-grouped thousands (`1.234`, `12.345.678`): whole currency units;
/// - anything else: all non-digits stripped, result taken as minor units.
pub fn normalize_currency(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(digits) = expand_scientific(trimmed) {
        return digits.parse().ok();
    }
    let negative = trimmed.starts_with('-');
    let cleaned: String = trimmed
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, ',' | '.'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let minor = decimal_minor_units(&cleaned).or_else(|| {
        let digits = digits_of(&cleaned);
        if digits.is_empty() { None } else { digits.parse().ok() }
    })?;
    Some(if negative { -minor } else { minor })
}

/// Interprets recognized decimal/thousands separators, if any.
fn decimal_minor_units(cleaned: &str) -> Option<i64> {
    if let Some(pos) = cleaned.rfind(',') {
        let frac = &cleaned[pos + 1..];
        if (1..=2).contains(&frac.len()) && frac.chars().all(|ch| ch.is_ascii_digit()) {
            return join_minor_units(&digits_of(&cleaned[..pos]), frac);
        }
        return None;
    }
    let mut segments = cleaned.split('.');
    let first = segments.next()?;
    let rest: Vec<&str> = segments.collect();
    if rest.is_empty() {
        return None;
    }
    if rest.len() == 1 && (1..=2).contains(&rest[0].len()) {
        return join_minor_units(first, rest[0]);
    }
    if rest.iter().all(|group| group.len() == 3) {
        // Dot-grouped thousands: whole currency units.
        let mut digits = String::from(first);
        for group in rest {
            digits.push_str(group);
        }
        return join_minor_units(&digits, "");
    }
    None
}

fn join_minor_units(int_digits: &str, frac: &str) -> Option<i64> {
    let units: i64 = if int_digits.is_empty() {
        0
    } else {
        int_digits.parse().ok()?
    };
    let cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    units.checked_mul(100)?.checked_add(cents)
}

pub(crate) fn digits_of(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
