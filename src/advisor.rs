// 🤖 Symptom Advisor - Optional LLM assist for free-form symptom text
//
// The advisor is a capability, not a dependency: the chat flow consults it
// only after both matching passes come up empty, and a `None` answer just
// means "no advice". The default advisor always answers `None`, so the
// whole crate works offline with no keys configured.
//
// Advice text is mined for point codes with a strict pattern; anything the
// catalog cannot resolve is dropped rather than guessed at.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::catalog::AcupointCatalog;
use crate::normalize;

// ============================================================================
// ADVISOR CAPABILITY
// ============================================================================

/// Something that can turn free-form symptom text into advice text.
///
/// Implementations must be infallible from the caller's view: trouble of
/// any kind (no keys, network down, bad payload) is expressed as `None`.
pub trait SymptomAdvisor: Send + Sync {
    fn advise(&self, user_message: &str) -> Option<String>;
}

/// The default advisor: never has anything to say.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdvisor;

impl SymptomAdvisor for NoAdvisor {
    fn advise(&self, _user_message: &str) -> Option<String> {
        None
    }
}

// ============================================================================
// ADVICE MINING
// ============================================================================

/// System prompt handed to LLM backends. Lists the points the advice may
/// reference and pins the reply format so code extraction stays reliable.
pub const SYSTEM_PROMPT: &str = "你是一位专业的中医针灸穴位顾问。用户会描述他们的症状，请你：

1. 分析症状，理解用户的问题
2. 推荐适合的穴位按摩（如果有的话）
3. 提供一些日常保健建议

我们数据库中有以下穴位：
- GB30 环跳 - 腰腿痛、坐骨神经痛
- BL23 肾俞 - 腰痛、肾虚
- BL40 委中 - 腰背痛、腿痛
- LI4 合谷 - 头痛、牙痛、感冒
- GB20 风池 - 头痛、颈椎病、感冒
- SP6 三阴交 - 妇科问题、失眠、消化
- ST36 足三里 - 消化、增强体质
- PC6 内关 - 恶心、心悸、焦虑
- HT7 神门 - 失眠、焦虑、心悸
- LR3 太冲 - 头痛、高血压、情绪
- CV17 膻中 - 胸闷、咳嗽、乳腺问题
- GV20 百会 - 头痛、眩晕、失眠

请用简洁的中文回答，格式如下：
【症状分析】简短分析
【推荐穴位】列出1-3个最相关的穴位代码（如 LI4, GB20）
【保健建议】2-3条实用建议
【注意事项】如果症状严重需要就医请提醒";

static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(GB\d+|BL\d+|LI\d+|SP\d+|ST\d+|PC\d+|HT\d+|LR\d+|KI\d+|CV\d+|GV\d+|SI\d+|SJ\d+|EX-HN\d+)\b",
    )
    .unwrap()
});

/// Pull point codes out of advice text: upper-cased, first occurrence wins,
/// duplicates dropped.
pub fn extract_point_codes(text: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for caps in CODE_PATTERN.captures_iter(text) {
        let code = caps[1].to_uppercase();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Listing row for an advisor-recommended point.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedPoint {
    pub code: String,
    pub chinese_name: String,
    pub name: String,
}

/// Resolve extracted codes against the catalog. Codes the catalog does not
/// know (the prompt mentions a few) are silently skipped; the original
/// spelling is kept in the row.
pub fn recommended_points(catalog: &AcupointCatalog, codes: &[String]) -> Vec<RecommendedPoint> {
    codes
        .iter()
        .filter_map(|code| {
            let key = normalize::canonical_key(code);
            catalog.lookup(&key).map(|record| RecommendedPoint {
                code: code.clone(),
                chinese_name: record.chinese_name.to_string(),
                name: record.english_name.to_string(),
            })
        })
        .collect()
}

// ============================================================================
// HTTP ADVISOR (server feature)
// ============================================================================

#[cfg(feature = "server")]
pub use http::HttpAdvisor;

#[cfg(feature = "server")]
mod http {
    use std::time::Duration;

    use anyhow::{Context, Result};
    use serde_json::{json, Value};

    use super::{SymptomAdvisor, SYSTEM_PROMPT};
    use crate::config::AdvisorConfig;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Advisor backed by hosted LLM APIs: OpenAI first, then Anthropic.
    ///
    /// Both backends are optional; whichever has a key is tried, and every
    /// failure degrades to `None` so chat can fall through to its apology.
    pub struct HttpAdvisor {
        openai_api_key: Option<String>,
        anthropic_api_key: Option<String>,
        client: reqwest::blocking::Client,
    }

    impl HttpAdvisor {
        pub fn new(config: AdvisorConfig) -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .context("Failed to build advisor HTTP client")?;
            Ok(HttpAdvisor {
                openai_api_key: config.openai_api_key,
                anthropic_api_key: config.anthropic_api_key,
                client,
            })
        }

        pub fn from_env() -> Result<Self> {
            Self::new(AdvisorConfig::from_env())
        }

        /// True when at least one backend key is configured.
        pub fn is_configured(&self) -> bool {
            self.openai_api_key.is_some() || self.anthropic_api_key.is_some()
        }

        fn ask_openai(&self, key: &str, user_message: &str) -> Result<Option<String>> {
            let response = self
                .client
                .post("https://api.openai.com/v1/chat/completions")
                .bearer_auth(key)
                .json(&json!({
                    "model": "gpt-4o-mini",
                    "messages": [
                        {"role": "system", "content": SYSTEM_PROMPT},
                        {"role": "user", "content": user_message}
                    ],
                    "max_tokens": 500,
                    "temperature": 0.7
                }))
                .send()?;

            if !response.status().is_success() {
                return Ok(None);
            }
            let body: Value = response.json()?;
            Ok(body["choices"][0]["message"]["content"]
                .as_str()
                .map(String::from))
        }

        fn ask_anthropic(&self, key: &str, user_message: &str) -> Result<Option<String>> {
            let response = self
                .client
                .post("https://api.anthropic.com/v1/messages")
                .header("x-api-key", key)
                .header("anthropic-version", "2023-06-01")
                .json(&json!({
                    "model": "claude-3-haiku-20240307",
                    "max_tokens": 500,
                    "system": SYSTEM_PROMPT,
                    "messages": [
                        {"role": "user", "content": user_message}
                    ]
                }))
                .send()?;

            if !response.status().is_success() {
                return Ok(None);
            }
            let body: Value = response.json()?;
            Ok(body["content"][0]["text"].as_str().map(String::from))
        }
    }

    impl SymptomAdvisor for HttpAdvisor {
        fn advise(&self, user_message: &str) -> Option<String> {
            if let Some(key) = &self.openai_api_key {
                match self.ask_openai(key, user_message) {
                    Ok(Some(text)) => return Some(text),
                    Ok(None) => {}
                    Err(e) => eprintln!("⚠️  OpenAI API error: {}", e),
                }
            }
            if let Some(key) = &self.anthropic_api_key {
                match self.ask_anthropic(key, user_message) {
                    Ok(Some(text)) => return Some(text),
                    Ok(None) => {}
                    Err(e) => eprintln!("⚠️  Anthropic API error: {}", e),
                }
            }
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_codes_upper_cases_and_dedups_in_order() {
        let text = "建议按摩 li4 和 GB20，然后再按 LI4 一次";
        assert_eq!(extract_point_codes(text), vec!["LI4", "GB20"]);
    }

    #[test]
    fn test_extract_codes_handles_extra_point_prefix() {
        let codes = extract_point_codes("【推荐穴位】EX-HN3, ex-hn5");
        assert_eq!(codes, vec!["EX-HN3", "EX-HN5"]);
    }

    #[test]
    fn test_extract_codes_ignores_lookalikes() {
        assert!(extract_point_codes("ABC123 and XYZ9").is_empty());
        // Codes need a word boundary on both sides
        assert!(extract_point_codes("FooLI4Bar").is_empty());
        assert!(extract_point_codes("no codes here").is_empty());
    }

    #[test]
    fn test_recommended_points_resolve_and_skip() {
        let catalog = AcupointCatalog::new();
        let codes = vec![
            "LI4".to_string(),
            "GV20".to_string(), // in the prompt, not in the catalog
            "LR3".to_string(),  // alias of LV3
        ];
        let points = recommended_points(&catalog, &codes);
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].code, "LI4");
        assert_eq!(points[0].chinese_name, "合谷");
        assert_eq!(points[0].name, "Hegu");

        // Alias resolves but the advised spelling is preserved
        assert_eq!(points[1].code, "LR3");
        assert_eq!(points[1].chinese_name, "太冲");
    }

    #[test]
    fn test_no_advisor_stays_silent() {
        assert_eq!(NoAdvisor.advise("我头痛"), None);
    }

    #[test]
    fn test_system_prompt_mentions_reply_format() {
        assert!(SYSTEM_PROMPT.contains("【推荐穴位】"));
        assert!(SYSTEM_PROMPT.contains("LI4"));
    }
}
