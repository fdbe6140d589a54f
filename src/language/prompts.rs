//! 各语言的 system prompt
//!
//! prompt_for 对任意代码都有返回值，未识别的代码回退到英文。

/// 拼接在语言 prompt 之后的固定要求
pub const ANALYSIS_SUFFIX: &str = " Provide detailed analysis and step-by-step solutions.";

const PROMPT_EN: &str =
    "You are a network troubleshooting expert. Explain network errors in simple English.";

/// 按两字母语言码返回 system prompt
pub fn prompt_for(prompt_code: &str) -> &'static str {
    match prompt_code {
        "en" => PROMPT_EN,
        "ur" => "آپ نیٹ ورک کے مسائل حل کرنے کے ماہر ہیں۔ نیٹ ورک کی خرابیوں کو آسان اردو میں سمجھائیں۔",
        "es" => "Eres un experto en solución de problemas de red. Explica los errores de red en español sencillo.",
        "fr" => "Vous êtes un expert en dépannage réseau. Expliquez les erreurs réseau en français simple.",
        "ar" => "أنت خبير في استكشاف أخطاء الشبكات وإصلاحها. اشرح أخطاء الشبكة بلغة عربية بسيطة.",
        "af" => "Jy is 'n kundige in netwerkprobleemoplossing. Verduidelik netwerkfoute in eenvoudige Afrikaans.",
        "zu" => "Ungungoti wokuxazulula izinkinga zenethiwekhi. Chaza amaphutha enethiwekhi ngesiZulu esilula.",
        "xh" => "Uyingcali yokusombulula iingxaki zothungelwano. Cacisa iimpazamo zothungelwano ngesiXhosa esilula.",
        "st" => "O setsebi sa ho rarolla mathata a marang-rang. Hlalosa diphoso tsa marang-rang ka Sesotho se bonolo.",
        "tn" => "O moitseanape wa go rarabolola mathata a neteweke. Tlhalosa diphoso tsa neteweke ka Setswana se se bonolo.",
        _ => PROMPT_EN,
    }
}
