//! Text rendering of wheeled and plain results.

use std::io::{self, Write};
use tracing::{info, warn};

use super::bonus::append_bonus;
use super::{BonusSet, Combinations, WheelError, WheelSpec};

/// Terminator of every wheel line.
pub const LINE_BREAK: &str = "\r\n";

/// Numbers per line in the plain listing.
pub const NUMBERS_PER_LINE: usize = 6;

/// Wheels longer than this are logged as a warning.
const LARGE_WHEEL_LINES: u128 = 100_000;

/// One combination as space-separated numbers.
pub fn format_line(combination: &[u32]) -> String {
    combination
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Comma-separated values, six per line. Empty input renders as `none`.
pub fn six_per_line(values: &[u32]) -> String {
    if values.is_empty() {
        return "none".to_string();
    }

    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(if i % NUMBERS_PER_LINE == 0 { ",\n" } else { ", " });
        }
        out.push_str(&value.to_string());
    }
    out
}

/// Plain listing of the numbers, with the bonus block when a set is given.
pub fn render_plain(numbers: &[u32], bonus: Option<&BonusSet>) -> String {
    let mut out = String::from("Numbers:\n");
    out.push_str(&six_per_line(numbers));

    if let Some(bonus) = bonus {
        out.push_str("\n\nBonus Balls:\n");
        out.push_str(&six_per_line(bonus.values()));
    }
    out
}

/// Formatted wheel lines, before any bonus is attached.
pub fn wheel_lines(spec: &WheelSpec) -> Result<Vec<String>, WheelError> {
    Ok(spec.combinations()?.map(|c| format_line(&c)).collect())
}

/// Every wheel line crossed with the bonus set, each ending in `\r\n`.
pub fn render_wheel(spec: &WheelSpec, bonus: Option<&BonusSet>) -> Result<String, WheelError> {
    let lines = wheel_lines(spec)?;
    warn_if_large(spec, bonus);

    let lines = match bonus {
        Some(bonus) => bonus.cross(lines),
        None => lines,
    };

    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push_str(LINE_BREAK);
    }
    Ok(out)
}

/// Wheeled or plain rendering. A wheel that cannot be built falls back to
/// the plain listing.
pub fn render(spec: &WheelSpec, bonus: Option<&BonusSet>, wheel: bool) -> String {
    if !wheel {
        return render_plain(spec.numbers(), bonus);
    }

    match render_wheel(spec, bonus) {
        Ok(text) => text,
        Err(e) => {
            info!("{}; listing numbers instead", e);
            render_plain(spec.numbers(), bonus)
        }
    }
}

/// Stream the same text as [`render`] to `out`.
///
/// The combination stream is replayed once per bonus value, so only one
/// line is held in memory at a time.
pub fn write_wheel<W: Write>(
    out: &mut W,
    spec: &WheelSpec,
    bonus: Option<&BonusSet>,
    wheel: bool,
) -> io::Result<()> {
    let combinations = match (wheel, spec.combinations()) {
        (true, Ok(combinations)) => combinations,
        (true, Err(e)) => {
            info!("{}; listing numbers instead", e);
            return out.write_all(render_plain(spec.numbers(), bonus).as_bytes());
        }
        (false, _) => return out.write_all(render_plain(spec.numbers(), bonus).as_bytes()),
    };

    warn_if_large(spec, bonus);

    let suffixes: Vec<Option<u32>> = match bonus {
        Some(bonus) if !bonus.is_empty() => bonus.values().iter().copied().map(Some).collect(),
        _ => vec![None],
    };

    for suffix in suffixes {
        write_lines(out, combinations.clone(), suffix)?;
    }
    out.flush()
}

fn write_lines<W: Write>(
    out: &mut W,
    combinations: Combinations<'_>,
    bonus: Option<u32>,
) -> io::Result<()> {
    for combination in combinations {
        let mut line = format_line(&combination);
        if let Some(bonus) = bonus {
            append_bonus(&mut line, bonus);
        }
        out.write_all(line.as_bytes())?;
        out.write_all(LINE_BREAK.as_bytes())?;
    }
    Ok(())
}

fn warn_if_large(spec: &WheelSpec, bonus: Option<&BonusSet>) {
    let multiplier = bonus.map(|b| b.len().max(1)).unwrap_or(1) as u128;
    match spec.line_count().and_then(|n| n.checked_mul(multiplier)) {
        Some(lines) if lines <= LARGE_WHEEL_LINES => {}
        Some(lines) => warn!("Wheel of {} numbers produces {} lines", spec.numbers().len(), lines),
        None => warn!(
            "Wheel of {} numbers produces more lines than can be counted",
            spec.numbers().len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wheel_five_choose_three() {
        let spec = WheelSpec::new([5, 3, 1, 4, 2], 3, false);
        let text = render(&spec, None, true);

        let expected = "1 2 3\r\n1 2 4\r\n1 2 5\r\n1 3 4\r\n1 3 5\r\n\
                        1 4 5\r\n2 3 4\r\n2 3 5\r\n2 4 5\r\n3 4 5\r\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_wheel_with_two_bonus_values() {
        let spec = WheelSpec::new([1, 2, 3, 4, 5], 3, false);
        let bonus = BonusSet::new([20, 10]);
        let text = render(&spec, Some(&bonus), true);

        let lines: Vec<&str> = text.split_terminator(LINE_BREAK).collect();
        assert_eq!(lines.len(), 20);

        let plain = wheel_lines(&spec).unwrap();
        for (i, line) in lines.iter().enumerate() {
            let (numbers, suffix) = if i < 10 {
                (&plain[i], "| 10")
            } else {
                (&plain[i - 10], "| 20")
            };
            assert!(line.ends_with(suffix), "line {}: {}", i, line);
            assert!(line.starts_with(numbers.as_str()), "line {}: {}", i, line);
        }
        assert_eq!(lines[0], "1 2 3 | 10");
        assert_eq!(lines[10], "1 2 3 | 20");
        assert_eq!(lines[19], "3 4 5 | 20");
    }

    #[test]
    fn test_invalid_size_falls_back_to_plain() {
        let spec = WheelSpec::new([7], 5, false);

        assert!(matches!(
            render_wheel(&spec, None),
            Err(WheelError::InvalidSelectionSize { .. })
        ));
        assert_eq!(render(&spec, None, true), "Numbers:\n7");
        assert_eq!(render(&spec, None, true), render(&spec, None, false));
    }

    #[test]
    fn test_fallback_matches_plain_with_bonus() {
        let spec = WheelSpec::new([3, 9], 5, false);
        let bonus = BonusSet::new([4]);

        let fallback = render(&spec, Some(&bonus), true);
        assert_eq!(fallback, render_plain(spec.numbers(), Some(&bonus)));
        assert_eq!(fallback, "Numbers:\n3, 9\n\nBonus Balls:\n4");
    }

    #[test]
    fn test_plain_six_per_line() {
        let numbers: Vec<u32> = (1..=14).collect();
        assert_eq!(
            render_plain(&numbers, None),
            "Numbers:\n1, 2, 3, 4, 5, 6,\n7, 8, 9, 10, 11, 12,\n13, 14"
        );
    }

    #[test]
    fn test_plain_empty_sets() {
        assert_eq!(render_plain(&[], None), "Numbers:\nnone");
        assert_eq!(
            render_plain(&[], Some(&BonusSet::default())),
            "Numbers:\nnone\n\nBonus Balls:\nnone"
        );
    }

    #[test]
    fn test_empty_wheel_falls_back() {
        let spec = WheelSpec::new([], 6, false);
        assert_eq!(render(&spec, None, true), "Numbers:\nnone");
    }

    #[test]
    fn test_repetition_wheel() {
        let spec = WheelSpec::new([1, 2], 2, true);
        assert_eq!(render(&spec, None, true), "1 1\r\n1 2\r\n2 2\r\n");
    }

    #[test]
    fn test_write_wheel_matches_render() {
        let spec = WheelSpec::new([2, 4, 6, 8, 10, 12, 14], 5, false);
        let cases = [
            None,
            Some(BonusSet::new([9])),
            Some(BonusSet::new([1, 2, 3])),
            Some(BonusSet::default()),
        ];

        for bonus in &cases {
            for wheel in [true, false] {
                let mut buffer = Vec::new();
                write_wheel(&mut buffer, &spec, bonus.as_ref(), wheel).unwrap();
                assert_eq!(
                    String::from_utf8(buffer).unwrap(),
                    render(&spec, bonus.as_ref(), wheel)
                );
            }
        }
    }

    #[test]
    fn test_write_wheel_fallback() {
        let spec = WheelSpec::new([7], 5, false);
        let mut buffer = Vec::new();
        write_wheel(&mut buffer, &spec, None, true).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Numbers:\n7");
    }
}
