// Tab label generation by token substitution

use regex::Regex;

use crate::config::TemplateConfig;
use crate::count::JobStatusCount;
use crate::error::{Error, Result};

pub const NAME: &str = "$N1";
pub const SHORT_NAME: &str = "$N2";
pub const REGEX_NAME: &str = "$N3";
pub const TOTAL: &str = "$T";
pub const FAILED: &str = "$F";
pub const DISABLED: &str = "$D";
pub const UNSTABLE: &str = "$U";
pub const SUCCESSFUL: &str = "$S";

/// Builds labels from patterns like `"$N2 ($F/$T)"`.
///
/// Tokens are replaced one after another on the same string, in the order
/// `$N1 $N2 $N3 $T $F $D $U $S`. A view name that itself contains a count
/// token (say `"Nightly $T"`) will have that token expanded as well.
#[derive(Debug, Clone)]
pub struct LabelGenerator {
    name_regex: Regex,
    name_replacement: String,
    short_name_length: usize,
}

impl LabelGenerator {
    pub fn new(name_regex_match: &str, name_replacement: &str, short_name_length: usize) -> Result<Self> {
        let name_regex = Regex::new(name_regex_match).map_err(|source| Error::InvalidNameRegex {
            pattern: name_regex_match.to_string(),
            source,
        })?;

        Ok(LabelGenerator {
            name_regex,
            name_replacement: braced_group_refs(name_replacement),
            short_name_length,
        })
    }

    pub fn from_config(config: &TemplateConfig) -> Result<Self> {
        Self::new(
            &config.name_regex_match,
            &config.name_regex_replacement,
            config.short_name_length,
        )
    }

    pub fn generate_label(&self, display_name: &str, count: &JobStatusCount, pattern: &str) -> String {
        pattern
            .replace(NAME, display_name)
            .replace(SHORT_NAME, &self.shorten(display_name))
            .replace(REGEX_NAME, &self.regex_name(display_name))
            .replace(TOTAL, &count.total().to_string())
            .replace(FAILED, &count.failed().to_string())
            .replace(DISABLED, &count.disabled().to_string())
            .replace(UNSTABLE, &count.unstable().to_string())
            .replace(SUCCESSFUL, &count.successful().to_string())
    }

    /// Label for one tab state. A conditional pattern only applies while
    /// something in the view needs attention; otherwise the plain name is shown.
    pub fn tab_label(
        &self,
        display_name: &str,
        count: &JobStatusCount,
        pattern: &str,
        conditional: bool,
    ) -> String {
        if conditional && count.all_ok() {
            display_name.to_string()
        } else {
            self.generate_label(display_name, count, pattern)
        }
    }

    fn shorten(&self, display_name: &str) -> String {
        if display_name.chars().count() > self.short_name_length {
            let mut short: String = display_name.chars().take(self.short_name_length).collect();
            short.push('.');
            short
        } else {
            display_name.to_string()
        }
    }

    fn regex_name(&self, display_name: &str) -> String {
        self.name_regex
            .replace_all(display_name, self.name_replacement.as_str())
            .into_owned()
    }
}

/// Rewrite a replacement so group numbers end at the last digit, as in
/// `"$1_"` = group 1 then `_`. The regex crate would otherwise read `$1_`
/// as a group named `1_`. A backslash takes the next character literally.
fn braced_group_refs(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len() + 4);
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('$') => out.push_str("$$"),
                Some(next) => out.push(next),
                None => out.push('\\'),
            },
            '$' if chars.peek().is_some_and(|d| d.is_ascii_digit()) => {
                out.push_str("${");
                while let Some(d) = chars.next_if(|d| d.is_ascii_digit()) {
                    out.push(d);
                }
                out.push('}');
            }
            '$' if chars.peek() == Some(&'$') => {
                chars.next();
                out.push_str("$$");
            }
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPLAY_NAME: &str = "display name";

    fn make_generator(short_name_length: usize) -> LabelGenerator {
        LabelGenerator::new(r"(\w)\w*|\s", "$1", short_name_length).unwrap()
    }

    // successful=1, failed=2, unstable=3, disabled=4
    fn make_count() -> JobStatusCount {
        JobStatusCount::new(10, 2, 4, 3, 1).unwrap()
    }

    fn label(pattern: &str) -> String {
        make_generator(3).generate_label(DISPLAY_NAME, &make_count(), pattern)
    }

    #[test]
    fn test_name_token() {
        assert_eq!(label("$N1"), DISPLAY_NAME);
    }

    #[test]
    fn test_short_name_token() {
        assert_eq!(label("$N2"), "dis.");

        let generator = make_generator(4);
        assert_eq!(generator.generate_label(DISPLAY_NAME, &make_count(), "$N2"), "disp.");
    }

    #[test]
    fn test_short_name_not_truncated_when_it_fits() {
        let generator = make_generator(12);
        assert_eq!(generator.generate_label(DISPLAY_NAME, &make_count(), "$N2"), DISPLAY_NAME);

        let generator = make_generator(3);
        assert_eq!(generator.generate_label("abc", &make_count(), "$N2"), "abc");
    }

    #[test]
    fn test_short_name_counts_characters() {
        let generator = make_generator(2);
        assert_eq!(generator.generate_label("ünïcode", &make_count(), "$N2"), "ün.");
    }

    #[test]
    fn test_regex_name_token() {
        assert_eq!(label("$N3"), "dn");
    }

    #[test]
    fn test_regex_name_group_followed_by_word_char() {
        let generator = LabelGenerator::new(r"(\w)\w*\s?", "$1_", 3).unwrap();
        assert_eq!(generator.generate_label(DISPLAY_NAME, &make_count(), "$N3"), "d_n_");

        // The whitespace match has no group 1 but still gets the underscore
        let generator = LabelGenerator::new(r"(\w)\w*|\s", "$1_", 3).unwrap();
        assert_eq!(generator.generate_label(DISPLAY_NAME, &make_count(), "$N3"), "d__n_");

        let generator = LabelGenerator::new(r"(\w)(\w)\w*|\s", "$2$1x", 3).unwrap();
        assert_eq!(generator.generate_label(DISPLAY_NAME, &make_count(), "$N3"), "idxxanx");
    }

    #[test]
    fn test_regex_name_named_groups_and_escapes() {
        let generator = LabelGenerator::new(r"(?P<first>\w)\w*|\s", "${first}", 3).unwrap();
        assert_eq!(generator.generate_label(DISPLAY_NAME, &make_count(), "$N3"), "dn");

        let generator = LabelGenerator::new(r"\s", r"\$", 3).unwrap();
        assert_eq!(generator.generate_label(DISPLAY_NAME, &make_count(), "$N3"), "display$name");
    }

    #[test]
    fn test_braced_group_refs() {
        assert_eq!(braced_group_refs("$1_"), "${1}_");
        assert_eq!(braced_group_refs("$12a"), "${12}a");
        assert_eq!(braced_group_refs("${name}"), "${name}");
        assert_eq!(braced_group_refs("$$1"), "$$1");
        assert_eq!(braced_group_refs(r"a\$1\\"), "a$$1\\");
        assert_eq!(braced_group_refs("plain"), "plain");
    }

    #[test]
    fn test_count_tokens() {
        assert_eq!(label("$T"), "10");
        assert_eq!(label("$F"), "2");
        assert_eq!(label("$U"), "3");
        assert_eq!(label("$D"), "4");
        assert_eq!(label("$S"), "1");
    }

    #[test]
    fn test_all_occurrences_replaced() {
        assert_eq!(label("$D$D"), "44");
    }

    #[test]
    fn test_unknown_tokens_untouched() {
        assert_eq!(label("$D$X"), "4$X");
        assert_eq!(label("plain text"), "plain text");
        assert_eq!(label(""), "");
    }

    #[test]
    fn test_mixed_pattern() {
        assert_eq!(label("$N3: $F failed of $T"), "dn: 2 failed of 10");
    }

    #[test]
    fn test_token_in_name_is_expanded() {
        let generator = make_generator(3);
        assert_eq!(
            generator.generate_label("Nightly $T", &make_count(), "$N1"),
            "Nightly 10"
        );
    }

    #[test]
    fn test_conditional_label_all_ok() {
        let generator = make_generator(3);
        let ok = JobStatusCount::new(1, 0, 0, 0, 1).unwrap();
        assert_eq!(generator.tab_label(DISPLAY_NAME, &ok, "$N2 $T", true), DISPLAY_NAME);
        assert_eq!(generator.tab_label(DISPLAY_NAME, &ok, "$N2 $T", false), "dis. 1");
    }

    #[test]
    fn test_conditional_label_with_problems() {
        let generator = make_generator(3);
        assert_eq!(
            generator.tab_label(DISPLAY_NAME, &make_count(), "$N2 $T", true),
            "dis. 10"
        );
        assert_eq!(
            generator.tab_label(DISPLAY_NAME, &make_count(), "$N2 $T", false),
            "dis. 10"
        );
    }

    #[test]
    fn test_invalid_regex() {
        let err = LabelGenerator::new("(unclosed", "$1", 3).unwrap_err();
        assert!(matches!(err, Error::InvalidNameRegex { ref pattern, .. } if pattern == "(unclosed"));
    }
}
