//! Денежные суммы в формах вводятся и показываются строкой с разделителями
//! тысяч, отдельной от числового значения, которое уходит на бэкенд.

/// "1234567.5" -> "1 234 567.50"
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}

/// Обратный разбор: пробелы-разделители игнорируются, десятичная часть
/// принимается и через точку, и через запятую.
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Переформатирует поле по мере ввода: пересчитывается только группировка
/// тысяч, дробная часть остаётся ровно как набрана. Дополнение до копеек
/// делает `format_amount` при показе уже сохранённого значения.
pub fn reformat_input(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return String::new();
    }
    let (sign, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.as_str()),
    };
    let (digits, frac) = match unsigned.find(['.', ',']) {
        Some(pos) => (&unsigned[..pos], &unsigned[pos..]),
        None => (unsigned, ""),
    };
    // не похоже на число — оставляем как есть, отсечёт проверка формы
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return input.to_string();
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.0), "999.00");
        assert_eq!(format_amount(1000.0), "1 000.00");
        assert_eq!(format_amount(1234567.5), "1 234 567.50");
        assert_eq!(format_amount(-4500.25), "-4 500.25");
    }

    #[test]
    fn parse_accepts_separators_and_comma() {
        assert_eq!(parse_amount("1 234 567.50"), Some(1234567.5));
        assert_eq!(parse_amount("1234,5"), Some(1234.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn typing_digit_by_digit_keeps_every_digit() {
        let mut field = String::new();
        for ch in ['1', '0', '0', '0'] {
            field.push(ch);
            field = reformat_input(&field);
        }
        assert_eq!(field, "1 000");
        assert_eq!(parse_amount(&field), Some(1000.0));

        for ch in ['0', '0'] {
            field.push(ch);
            field = reformat_input(&field);
        }
        assert_eq!(field, "100 000");
    }

    #[test]
    fn typing_regroups_without_cent_padding() {
        assert_eq!(reformat_input("1"), "1");
        assert_eq!(reformat_input("12345"), "12 345");
        assert_eq!(reformat_input("-2500"), "-2 500");
        // дробная часть сохраняется посимвольно, включая незавершённую
        assert_eq!(reformat_input("99."), "99.");
        assert_eq!(reformat_input("1234,5"), "1 234,5");
        assert_eq!(reformat_input("1 234 567.50"), "1 234 567.50");
        // не число — строка не трогается
        assert_eq!(reformat_input("abc"), "abc");
        assert_eq!(reformat_input(""), "");
    }

    #[test]
    fn format_roundtrips_through_parse() {
        for value in [0.0, 12.3, 999.99, 1000.0, 250000.0, 19999999.05] {
            let shown = format_amount(value);
            assert_eq!(parse_amount(&shown), Some(value), "{shown}");
        }
    }
}
