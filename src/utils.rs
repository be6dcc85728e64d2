use once_cell::sync::Lazy;
use regex::Regex;

// "250", "1,250+", "12,000 meals"
static COUNTER_TARGET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d[\d,]*)(\D.*)?$").unwrap());

/// Target value of an animated counter plus how to print it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterTarget {
    pub value: u64,
    pub grouped: bool,
    pub suffix: String,
}

impl CounterTarget {
    /// Parse a `data-target` / `data-count` attribute.
    ///
    /// # Examples
    /// ```
    /// use feedpaws_web::utils::CounterTarget;
    /// let target = CounterTarget::parse("1,250+").unwrap();
    /// assert_eq!(target.value, 1250);
    /// assert_eq!(target.render(1250), "1,250+");
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = COUNTER_TARGET_REGEX.captures(raw)?;
        let digits = &captures[1];
        let value = digits
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse::<u64>()
            .ok()?;
        Some(Self {
            value,
            grouped: digits.contains(','),
            suffix: captures
                .get(2)
                .map(|m| m.as_str().trim_end().to_string())
                .unwrap_or_default(),
        })
    }

    pub fn render(&self, current: u64) -> String {
        let number = if self.grouped {
            group_thousands(current)
        } else {
            current.to_string()
        };
        format!("{}{}", number, self.suffix)
    }
}

/// Insert `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Page id named by an in-page href such as `#about`.
///
/// Returns `None` for the bare `#` placeholder and anything that is not a
/// fragment link.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
