/// User-facing text: error templates, fallback sentences and provider prompts.
///
/// Every string a citizen can see is defined here, once per supported language. None of
/// them carry technical detail.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hi" | "hindi" => Ok(Language::Hindi),
            "en" | "english" => Ok(Language::English),
            other => Err(format!("unsupported language '{other}' (expected hi or en)")),
        }
    }
}

/// Why a request produced no scheme answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    NoResults,
    ServerError,
    InvalidQuery,
}

pub fn error_message(language: Language, reason: ErrorReason, query: &str) -> String {
    match (language, reason) {
        (Language::Hindi, ErrorReason::NoResults) => format!(
            "'{query}' के लिए कोई सरकारी योजना नहीं मिली। कृपया अलग शब्दों में खोजें जैसे 'घर', 'नौकरी', 'शिक्षा', 'स्वास्थ्य', या 'किसान'।"
        ),
        (Language::Hindi, ErrorReason::ServerError) => {
            "सरकारी योजनाओं की जानकारी लेने में कुछ समस्या हो रही है। कृपया कुछ देर बाद कोशिश करें।"
                .to_string()
        }
        (Language::Hindi, ErrorReason::InvalidQuery) => {
            "कृपया अपना सवाल स्पष्ट रूप से पूछें। उदाहरण: 'घर बनाने की योजना' या 'नौकरी की योजना'।"
                .to_string()
        }
        (Language::English, ErrorReason::NoResults) => format!(
            "No government scheme was found for '{query}'. Please try different words such as 'house', 'job', 'education', 'health' or 'farmer'."
        ),
        (Language::English, ErrorReason::ServerError) => {
            "We are having trouble fetching scheme information right now. Please try again in a little while."
                .to_string()
        }
        (Language::English, ErrorReason::InvalidQuery) => {
            "Please ask your question clearly. For example: 'scheme for building a house' or 'scheme for jobs'."
                .to_string()
        }
    }
}

pub(crate) fn scheme_available(language: Language, title: &str) -> String {
    match language {
        Language::Hindi => format!("{title} योजना आपके लिए उपलब्ध है।"),
        Language::English => format!("{title} scheme is available for you."),
    }
}

pub(crate) fn scheme_suitable(language: Language, title: &str) -> String {
    match language {
        Language::Hindi => format!("{title} आपके लिए एक उपयुक्त योजना है।"),
        Language::English => format!("{title} is a suitable scheme for you."),
    }
}

pub(crate) fn description_excerpt(language: Language, excerpt: &str) -> String {
    match language {
        Language::Hindi => format!("इस योजना के तहत {excerpt}..."),
        Language::English => format!("{excerpt}..."),
    }
}

pub(crate) fn apply_call_to_action(language: Language, link: &str) -> String {
    match language {
        Language::Hindi => format!(
            "आवेदन करने के लिए दिए गए लिंक पर जाएं या अपने नजदीकी सरकारी कार्यालय में संपर्क करें। अधिक जानकारी के लिए आधिकारिक वेबसाइट देखें: {link}"
        ),
        Language::English => format!(
            "To apply, visit the official website or contact your nearest government office. More details: {link}"
        ),
    }
}

pub(crate) fn more_schemes(language: Language, count: usize) -> String {
    match language {
        Language::Hindi => format!("इसके अलावा {count} और योजनाएं भी उपलब्ध हैं।"),
        Language::English => format!("{count} more schemes are also available."),
    }
}

pub(crate) fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::Hindi => {
            "आप एक विशेषज्ञ भारतीय सरकारी योजना सलाहकार हैं। आपका काम है:

1. हमेशा हिंदी में सरल और स्पष्ट उत्तर देना
2. आम लोगों की भाषा का उपयोग करना
3. जटिल शब्दों से बचना
4. व्यावहारिक और उपयोगी जानकारी देना
5. योजना के लाभ और आवेदन प्रक्रिया को समझाना

आपके उत्तर में भरोसा और सहायता की भावना होनी चाहिए।"
        }
        Language::English => {
            "You are an expert adviser on Indian government welfare schemes. Your job is to:

1. Always answer in simple, clear English
2. Use the words ordinary people use
3. Avoid complicated terms
4. Give practical, useful information
5. Explain the scheme's benefits and how to apply

Your answers should feel trustworthy and helpful."
        }
    }
}

pub(crate) fn single_scheme_prompt(
    language: Language,
    query: &str,
    title: &str,
    description: &str,
    link: &str,
) -> String {
    match language {
        Language::Hindi => format!(
            "उपयोगकर्ता ने \"{query}\" के बारे में पूछा है।

योजना की जानकारी:
नाम: {title}
विवरण: {description}
आधिकारिक वेबसाइट: {link}

कृपया इस योजना के बारे में एक सरल, स्पष्ट और उपयोगी उत्तर दें। उत्तर में निम्नलिखित बातें शामिल करें:

1. योजना का नाम और मुख्य लाभ क्या है
2. कौन से लोग इस योजना के लिए आवेदन कर सकते हैं
3. आवेदन कैसे करें (सरल चरणों में)
4. कहाँ से अधिक जानकारी मिल सकती है

महत्वपूर्ण निर्देश:
- उत्तर पूरी तरह हिंदी में दें
- बहुत सरल भाषा का उपयोग करें जो गांव के लोग भी समझ सकें
- तकनीकी शब्दों से बचें
- उत्तर 120-180 शब्दों में दें
- उत्साहजनक और सहायक टोन रखें
- \"आप\" का उपयोग करके व्यक्तिगत बनाएं"
        ),
        Language::English => format!(
            "The user asked about \"{query}\".

Scheme details:
Name: {title}
Description: {description}
Official website: {link}

Please give a simple, clear and useful answer about this scheme. Include:

1. The scheme's name and its main benefit
2. Who can apply for it
3. How to apply (in simple steps)
4. Where to find more information

Important instructions:
- Answer entirely in English
- Use very simple language that people in villages can understand
- Avoid technical terms
- Keep the answer between 120 and 180 words
- Keep an encouraging, helpful tone
- Address the reader directly as \"you\""
        ),
    }
}

pub(crate) fn multi_scheme_prompt(language: Language, query: &str, schemes_block: &str) -> String {
    match language {
        Language::Hindi => format!(
            "उपयोगकर्ता ने \"{query}\" के बारे में पूछा है। निम्नलिखित योजनाएं मिली हैं:
{schemes_block}
कृपया इन योजनाओं के आधार पर एक विस्तृत और सरल हिंदी उत्तर दें जिसमें:
1. सबसे उपयुक्त योजना का नाम और मुख्य लाभ
2. पात्रता की शर्तें (कौन आवेदन कर सकता है)
3. आवेदन की प्रक्रिया (सरल चरणों में)
4. आवश्यक दस्तावेज
5. संपर्क जानकारी या वेबसाइट

महत्वपूर्ण निर्देश:
- उत्तर पूरी तरह हिंदी में दें
- बहुत सरल भाषा का उपयोग करें
- तकनीकी शब्दों से बचें
- उत्तर 200-300 शब्दों में दें
- व्यावहारिक और उपयोगी जानकारी दें
- उत्साहजनक टोन रखें"
        ),
        Language::English => format!(
            "The user asked about \"{query}\". The following schemes were found:
{schemes_block}
Based on these schemes, give a detailed but simple answer that covers:
1. The most suitable scheme and its main benefit
2. Eligibility (who can apply)
3. The application process (in simple steps)
4. Documents needed
5. Contact information or website

Important instructions:
- Answer entirely in English
- Use very simple language
- Avoid technical terms
- Keep the answer between 200 and 300 words
- Give practical, useful information
- Keep an encouraging tone"
        ),
    }
}

pub(crate) fn scheme_block_entry(
    language: Language,
    index: usize,
    title: &str,
    excerpt: &str,
    link: &str,
) -> String {
    match language {
        Language::Hindi => {
            format!("\nयोजना {index}:\nनाम: {title}\nविवरण: {excerpt}...\nवेबसाइट: {link}\n")
        }
        Language::English => {
            format!("\nScheme {index}:\nName: {title}\nDescription: {excerpt}...\nWebsite: {link}\n")
        }
    }
}

pub(crate) fn ping_prompt(language: Language) -> (&'static str, &'static str) {
    match language {
        Language::Hindi => (
            "आप एक सहायक हैं। हिंदी में उत्तर दें।",
            "नमस्ते! क्या आप हिंदी में बात कर सकते हैं?",
        ),
        Language::English => ("You are an assistant. Reply in English.", "Hello! Can you hear me?"),
    }
}

pub(crate) fn enhancement_system_prompt() -> &'static str {
    "You are a JSON response generator. Reply only with valid JSON."
}

pub(crate) fn enhancement_prompt(query: &str) -> String {
    format!(
        "You are an expert at finding Indian government schemes. The user asked: \"{query}\".

Understand the query and return the following information as JSON:

1. search_keywords: better English search keywords (array)
2. hindi_keywords: search words in Hindi (array)
3. category: main category (housing/employment/education/health/agriculture/pension/women)
4. intent: what the user wants (scheme_info/application_process/eligibility/benefits)
5. target_websites: government websites to look at (array)

Example:
{{
  \"search_keywords\": [\"housing scheme\", \"pradhan mantri awas yojana\", \"home construction\"],
  \"hindi_keywords\": [\"आवास योजना\", \"घर निर्माण\", \"प्रधानमंत्री आवास\"],
  \"category\": \"housing\",
  \"intent\": \"scheme_info\",
  \"target_websites\": [\"pmay.gov.in\", \"india.gov.in\", \"myscheme.gov.in\"]
}}

Reply with the JSON only, no other text."
    )
}
