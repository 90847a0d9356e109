use base64::{Engine, engine::general_purpose::STANDARD};

// Cache key for a single text: language pair + base64 of the text, so
// delimiters inside the text can never collide with the key layout
pub fn translation_key(source: &str, target: &str, text: &str) -> String {
    format!("translation:{}:{}:{}", source, target, STANDARD.encode(text))
}

// Cache key for a whole translated UI dictionary
pub fn ui_dictionary_key(target: &str) -> String {
    format!("ui_translations:{}", target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_key_is_deterministic() {
        assert_eq!(
            translation_key("en", "hi", "Hello"),
            translation_key("en", "hi", "Hello")
        );
        assert_eq!(translation_key("en", "hi", "Hello"), "translation:en:hi:SGVsbG8=");
    }

    #[test]
    fn delimiters_in_text_do_not_collide() {
        // naive "src:tgt:text" joins would make these equal
        let a = translation_key("en", "hi", "a:b");
        let b = translation_key("en", "hi:a", "b");
        assert_ne!(a, b);
    }

    #[test]
    fn direction_matters() {
        assert_ne!(translation_key("en", "hi", "x"), translation_key("hi", "en", "x"));
    }

    #[test]
    fn dictionary_key_uses_target_only() {
        assert_eq!(ui_dictionary_key("ta"), "ui_translations:ta");
    }
}
