//! Integer-first percent and number formatting.
//!
//! Inputs are integer counts, so one-decimal percentages are computed exactly
//! with round-half-up instead of going through binary floats.

/// Percent of `num / den` in **tenths**, rounded half-up. `den == 0` → 0.
#[inline]
pub fn percent_one_decimal_tenths(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    let (n, d) = (u128::from(num), u128::from(den));
    ((n * 2000 + d) / (2 * d)) as u64
}

/// Whole percent of `num / den`, rounded half-up. `den == 0` → 0.
#[inline]
pub fn percent_rounded(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    let (n, d) = (u128::from(num), u128::from(den));
    ((n * 200 + d) / (2 * d)) as u64
}

/// Render tenths as `"<int>.<digit>"` (no percent sign).
#[inline]
pub fn format_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// `"10.0"` for 150 / 1500.
pub fn percent_1dp(num: u64, den: u64) -> String {
    format_tenths(percent_one_decimal_tenths(num, den))
}

/// Thousands separators with `,` (en-US grouping): `1500` → `"1,500"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two-decimal amount with grouping: `12345.5` → `"12,345.50"`.
/// Non-finite input renders as `"-"`.
pub fn format_amount_2dp(x: f64) -> String {
    if !x.is_finite() {
        return "-".to_string();
    }
    let cents = (x.abs() * 100.0).round() as u64;
    let sign = if x < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Compact headcount label: above 999 → `"{x.x}k"` (half-up), else the integer.
pub fn compact_count(n: u32) -> String {
    if n > 999 {
        let tenths_k = (u64::from(n) + 50) / 100;
        format!("{}k", format_tenths(tenths_k))
    } else {
        n.to_string()
    }
}
