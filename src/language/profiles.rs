//! 语言档案表：10 种支持语言的显示名、BCP-47 语音 locale、两字母提示词代码
//!
//! 静态表，进程启动即可用，从不修改。

use serde::Serialize;

use crate::core::AppError;

/// 单个语言档案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageProfile {
    pub display_name: &'static str,
    /// 语音识别 locale（BCP-47，如 en-US）
    pub speech_locale: &'static str,
    /// 选择 system prompt 用的两字母代码（如 en）
    pub prompt_code: &'static str,
}

const fn profile(
    display_name: &'static str,
    speech_locale: &'static str,
    prompt_code: &'static str,
) -> LanguageProfile {
    LanguageProfile {
        display_name,
        speech_locale,
        prompt_code,
    }
}

/// 支持的语言（顺序即界面列表顺序，首项为默认回退语言）
pub const LANGUAGES: [LanguageProfile; 10] = [
    profile("English", "en-US", "en"),
    profile("Urdu", "ur-PK", "ur"),
    profile("Spanish", "es-ES", "es"),
    profile("French", "fr-FR", "fr"),
    profile("Arabic", "ar-SA", "ar"),
    profile("Afrikaans", "af-ZA", "af"),
    profile("Zulu", "zu-ZA", "zu"),
    profile("Xhosa", "xh-ZA", "xh"),
    profile("Sotho", "st-ZA", "st"),
    profile("Tswana", "tn-ZA", "tn"),
];

impl LanguageProfile {
    /// 回退语言：English
    pub fn english() -> Self {
        LANGUAGES[0]
    }
}

/// 按显示名查找语言档案（精确匹配），不在表中返回 UnknownLanguage
pub fn resolve(display_name: &str) -> Result<LanguageProfile, AppError> {
    LANGUAGES
        .iter()
        .find(|p| p.display_name == display_name)
        .copied()
        .ok_or_else(|| AppError::UnknownLanguage(display_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all_supported_languages() {
        let expected = [
            ("English", "en-US", "en"),
            ("Urdu", "ur-PK", "ur"),
            ("Spanish", "es-ES", "es"),
            ("French", "fr-FR", "fr"),
            ("Arabic", "ar-SA", "ar"),
            ("Afrikaans", "af-ZA", "af"),
            ("Zulu", "zu-ZA", "zu"),
            ("Xhosa", "xh-ZA", "xh"),
            ("Sotho", "st-ZA", "st"),
            ("Tswana", "tn-ZA", "tn"),
        ];
        for (name, locale, code) in expected {
            let p = resolve(name).unwrap();
            assert_eq!(p.display_name, name);
            assert_eq!(p.speech_locale, locale);
            assert_eq!(p.prompt_code, code);
            assert!(!p.prompt_code.is_empty());
        }
    }

    #[test]
    fn test_resolve_zulu_locale() {
        assert_eq!(resolve("Zulu").unwrap().speech_locale, "zu-ZA");
    }

    #[test]
    fn test_resolve_unknown_language() {
        let err = resolve("Klingon").unwrap_err();
        assert!(matches!(err, AppError::UnknownLanguage(ref n) if n == "Klingon"));
    }

    #[test]
    fn test_english_is_fallback() {
        assert_eq!(LanguageProfile::english().prompt_code, "en");
    }
}
