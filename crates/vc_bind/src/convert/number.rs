use alloc::string::String;
use core::fmt::Write;

/// A decimal number pattern, as declared by a `number_format` customization.
///
/// Only two traits of the pattern are honored: the number of fraction digits
/// (`0` or `#` after the `.`) and grouping of the integer part (a `,` before
/// the `.`). Numbers with a format are written as JSON strings.
///
/// # Example
///
/// ```
/// use vc_bind::convert::NumberFormat;
///
/// let format = NumberFormat::parse("#,##0.00");
/// assert_eq!(format.format_float(1234.5), "1,234.50");
/// assert_eq!(format.format_integer("-1234567"), "-1,234,567.00");
/// assert_eq!(format.strip(" 1,234.50 "), "1234.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    fraction_digits: usize,
    grouping: bool,
}

impl NumberFormat {
    pub fn parse(pattern: &str) -> Self {
        let (integer, fraction) = pattern.split_once('.').unwrap_or((pattern, ""));
        Self {
            fraction_digits: fraction.chars().filter(|c| matches!(c, '0' | '#')).count(),
            grouping: integer.contains(','),
        }
    }

    #[inline]
    pub const fn fraction_digits(&self) -> usize {
        self.fraction_digits
    }

    #[inline]
    pub const fn grouping(&self) -> bool {
        self.grouping
    }

    pub fn format_float(&self, value: f64) -> String {
        let mut text = String::new();
        // Writing to a String cannot fail.
        let _ = write!(text, "{value:.*}", self.fraction_digits);
        self.group(text)
    }

    /// Formats the decimal digits of an integer.
    pub fn format_integer(&self, digits: &str) -> String {
        let mut text = String::from(digits);
        if self.fraction_digits > 0 {
            text.push('.');
            text.extend(core::iter::repeat_n('0', self.fraction_digits));
        }
        self.group(text)
    }

    /// Removes grouping separators and surrounding whitespace before parsing.
    pub fn strip(&self, text: &str) -> String {
        text.trim().chars().filter(|c| *c != ',').collect()
    }

    fn group(&self, text: String) -> String {
        if !self.grouping {
            return text;
        }
        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };

        let mut out = String::with_capacity(text.len() + integer.len() / 3);
        out.push_str(sign);
        for (index, digit) in integer.chars().enumerate() {
            if index > 0 && (integer.len() - index) % 3 == 0 {
                out.push(',');
            }
            out.push(digit);
        }
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::NumberFormat;

    #[test]
    fn fraction_digits_come_from_the_pattern() {
        assert_eq!(NumberFormat::parse("0.000").fraction_digits(), 3);
        assert_eq!(NumberFormat::parse("#.##").fraction_digits(), 2);
        assert_eq!(NumberFormat::parse("#").fraction_digits(), 0);
        assert_eq!(NumberFormat::parse("0.0").format_float(2.26), "2.3");
        assert_eq!(NumberFormat::parse("0").format_float(-7.6), "-8");
    }

    #[test]
    fn grouping_only_touches_the_integer_part() {
        let format = NumberFormat::parse("#,###");
        assert!(format.grouping());
        assert_eq!(format.format_integer("999"), "999");
        assert_eq!(format.format_integer("1000"), "1,000");
        assert_eq!(format.format_float(123456.0), "123,456");
        assert_eq!(NumberFormat::parse("#,##0.0").format_float(-1000.26), "-1,000.3");
    }
}
