use serde::Serialize;

// One supported language: app code + provider locale tag
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    #[serde(skip)]
    pub locale: &'static str,
}

pub const DEFAULT_SOURCE: &str = "en";

pub static SUPPORTED_LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo { code: "en", name: "English", native_name: "English", locale: "en-IN" },
    LanguageInfo { code: "hi", name: "Hindi", native_name: "हिन्दी", locale: "hi-IN" },
    LanguageInfo { code: "bn", name: "Bengali", native_name: "বাংলা", locale: "bn-IN" },
    LanguageInfo { code: "gu", name: "Gujarati", native_name: "ગુજરાતી", locale: "gu-IN" },
    LanguageInfo { code: "kn", name: "Kannada", native_name: "ಕನ್ನಡ", locale: "kn-IN" },
    LanguageInfo { code: "ml", name: "Malayalam", native_name: "മലയാളം", locale: "ml-IN" },
    LanguageInfo { code: "mr", name: "Marathi", native_name: "मराठी", locale: "mr-IN" },
    LanguageInfo { code: "od", name: "Odia", native_name: "ଓଡ଼ିଆ", locale: "od-IN" },
    LanguageInfo { code: "pa", name: "Punjabi", native_name: "ਪੰਜਾਬੀ", locale: "pa-IN" },
    LanguageInfo { code: "ta", name: "Tamil", native_name: "தமிழ்", locale: "ta-IN" },
    LanguageInfo { code: "te", name: "Telugu", native_name: "తెలుగు", locale: "te-IN" },
];

pub fn lookup(code: &str) -> Option<&'static LanguageInfo> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code == code)
}

pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

pub fn provider_locale(code: &str) -> Option<&'static str> {
    lookup(code).map(|lang| lang.locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_codes_to_locales() {
        assert_eq!(provider_locale("hi"), Some("hi-IN"));
        assert_eq!(provider_locale("pa"), Some("pa-IN"));
        assert_eq!(provider_locale("xx"), None);
    }

    #[test]
    fn codes_are_unique() {
        for (i, a) in SUPPORTED_LANGUAGES.iter().enumerate() {
            for b in &SUPPORTED_LANGUAGES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
        assert!(is_supported(DEFAULT_SOURCE));
    }

    #[test]
    fn locale_is_not_serialized() {
        let json = serde_json::to_value(lookup("ta").unwrap()).unwrap();
        assert_eq!(json["nativeName"], "தமிழ்");
        assert!(json.get("locale").is_none());
    }
}
