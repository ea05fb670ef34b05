const RUPEE_SIGN: char = '₹';

/// Formats an amount as whole Indian rupees, e.g. `₹1,00,000`.
///
/// Fractions round half away from zero. Grouping follows the Indian system:
/// the last three digits, then pairs.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut formatted = String::with_capacity(digits.len() + 8);
    if negative {
        formatted.push('-');
    }
    formatted.push(RUPEE_SIGN);
    formatted.push_str(&group_indian(&digits));
    formatted
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
