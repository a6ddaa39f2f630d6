use lazy_static::lazy_static;
use regex::Regex;

pub struct DescriptionCleaner;

impl DescriptionCleaner {
    /// Strips tag-like markup (`<b>`, `<br/>`, ...) out of free text fields.
    pub fn strip_markup(text: &str) -> String {
        lazy_static! {
            static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
        }

        TAG.replace_all(text, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_simple_tags() {
        assert_eq!(DescriptionCleaner::strip_markup("<b>bold</b>"), "bold");
    }

    #[test]
    fn strips_self_closing_and_nested_tags() {
        assert_eq!(
            DescriptionCleaner::strip_markup("line one<br/>line <i><b>two</b></i>"),
            "line oneline two"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(
            DescriptionCleaner::strip_markup("a game about trading sheep"),
            "a game about trading sheep"
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(DescriptionCleaner::strip_markup(""), "");
    }
}
