//! Numeric conversion (`#` entries).
//!
//! A reading like `だい5` is looked up as `だい#`; the dictionary word
//! `第#1` is then rendered with the typed digits. Supported placeholders:
//!
//! | template | 5     | 123   |
//! |----------|-------|-------|
//! | `#0`     | 5     | 123   |
//! | `#1`     | 5     | 123   |
//! | `#2`     | ５    | １２３ |
//! | `#3`     | 五    | 一二三 |

/// A reading whose ASCII digit runs have been replaced by `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberYomi {
    pub key: String,
    pub numbers: Vec<String>,
}

/// Split `yomi` into its numeric key and digit runs.
/// Returns `None` when it contains no ASCII digits.
pub fn parse_number_yomi(yomi: &str) -> Option<NumberYomi> {
    let mut key = String::with_capacity(yomi.len());
    let mut numbers: Vec<String> = Vec::new();
    let mut in_number = false;
    for c in yomi.chars() {
        if c.is_ascii_digit() {
            if in_number {
                if let Some(last) = numbers.last_mut() {
                    last.push(c);
                }
            } else {
                key.push('#');
                numbers.push(c.to_string());
                in_number = true;
            }
        } else {
            key.push(c);
            in_number = false;
        }
    }
    if numbers.is_empty() {
        None
    } else {
        Some(NumberYomi { key, numbers })
    }
}

/// Substitute placeholders in `template` with `numbers` in order.
///
/// Returns `None` when the template uses more placeholders than there are
/// numbers or an unsupported placeholder type.
pub fn render_template(template: &str, numbers: &[String]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut next = numbers.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '#' {
            out.push(c);
            continue;
        }
        let Some(kind) = chars.peek().copied().filter(char::is_ascii_digit) else {
            out.push(c);
            continue;
        };
        chars.next();
        let digits = next.next()?;
        match kind {
            '0' | '1' => out.push_str(digits),
            '2' => out.extend(digits.chars().map(full_width_digit)),
            '3' => out.extend(digits.chars().map(kanji_digit)),
            _ => return None,
        }
    }
    Some(out)
}

fn full_width_digit(c: char) -> char {
    char::from_u32(c as u32 + 0xFEE0).unwrap_or(c)
}

fn kanji_digit(c: char) -> char {
    match c {
        '0' => '〇',
        '1' => '一',
        '2' => '二',
        '3' => '三',
        '4' => '四',
        '5' => '五',
        '6' => '六',
        '7' => '七',
        '8' => '八',
        '9' => '九',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_single_run() {
        let n = parse_number_yomi("だい5").unwrap();
        assert_eq!(n.key, "だい#");
        assert_eq!(n.numbers, nums(&["5"]));
    }

    #[test]
    fn parse_multiple_runs() {
        let n = parse_number_yomi("12がつ25にち").unwrap();
        assert_eq!(n.key, "#がつ#にち");
        assert_eq!(n.numbers, nums(&["12", "25"]));
    }

    #[test]
    fn parse_no_digits() {
        assert_eq!(parse_number_yomi("かんじ"), None);
    }

    #[test]
    fn render_types() {
        assert_eq!(render_template("第#1", &nums(&["5"])).unwrap(), "第5");
        assert_eq!(render_template("#0回", &nums(&["12"])).unwrap(), "12回");
        assert_eq!(render_template("#2月", &nums(&["12"])).unwrap(), "１２月");
        assert_eq!(render_template("#3日", &nums(&["20"])).unwrap(), "二〇日");
        assert_eq!(
            render_template("#1月#1日", &nums(&["12", "25"])).unwrap(),
            "12月25日"
        );
    }

    #[test]
    fn render_without_placeholders() {
        assert_eq!(render_template("だいご", &nums(&["5"])).unwrap(), "だいご");
        assert_eq!(render_template("#", &nums(&["5"])).unwrap(), "#");
    }

    #[test]
    fn render_rejects_unsupported() {
        assert_eq!(render_template("#9", &nums(&["5"])), None);
        assert_eq!(render_template("#1#1", &nums(&["5"])), None);
    }
}
