use crate::prelude::*;

pub fn format_date(date: DateTime) -> String {
  date.format("%d.%m.%Y %H:%M").to_string()
}

/// Whole-đồng amount with dot separators, e.g. `1.500.000₫`.
pub fn format_vnd(amount: i64) -> String {
  let digits = amount.unsigned_abs().to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(c);
  }

  let sign = if amount < 0 { "-" } else { "" };
  format!("{sign}{grouped}₫")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_vnd() {
    assert_eq!(format_vnd(0), "0₫");
    assert_eq!(format_vnd(500), "500₫");
    assert_eq!(format_vnd(1_500_000), "1.500.000₫");
    assert_eq!(format_vnd(-200_000), "-200.000₫");
  }
}
