// 💬 Chat Diagnosis - Free-form symptom text → diagnosis
//
// Three passes, cheapest first:
//   1. keyword table     - bilingual trigger words mapped to symptom keys
//   2. label words       - words from the message matched into symptom labels
//   3. advisor           - optional LLM assist, mined for point codes
//
// Only the first pass that produces anything is used. With no advisor
// configured the third pass is a no-op and the caller gets a structured
// apology with the full symptom list.

use anyhow::Result;
use serde::Serialize;

use crate::advisor::{self, RecommendedPoint, SymptomAdvisor};
use crate::diagnosis::{DiagnosisEngine, DiagnosisOutcome};
use crate::symptoms::SymptomDb;

/// Most advisor-recommended points surfaced per reply.
const MAX_RECOMMENDED: usize = 3;

/// Shown when every pass comes up empty.
pub const NO_MATCH_MESSAGE: &str = "抱歉，我没有找到匹配的症状。请试试：头痛、失眠、焦虑、腰痛、颈椎等关键词。\n\n如需更智能的分析，请设置 OPENAI_API_KEY 或 ANTHROPIC_API_KEY 环境变量。";

// ============================================================================
// KEYWORD TABLE
// ============================================================================

// Category key → trigger words. The key must appear inside a database
// symptom label ("digestion" rides inside "Indigestion"); the triggers are
// what users actually type, in both languages.
static SYMPTOM_KEYWORDS: &[(&str, &[&str])] = &[
    ("headache", &["head", "头", "头痛", "头疼", "migraine", "偏头痛"]),
    ("neck", &["neck", "颈", "脖子", "shoulder", "肩", "肩膀", "僵硬", "stiff"]),
    ("back", &["back", "腰", "背", "sciatica", "坐骨", "spine", "脊"]),
    ("anxiety", &["anxiety", "anxious", "stress", "紧张", "焦虑", "压力", "nervous"]),
    ("insomnia", &["sleep", "insomnia", "失眠", "睡不着", "睡眠", "tired", "疲劳"]),
    ("nausea", &["nausea", "vomit", "恶心", "呕吐", "motion", "晕车", "stomach", "胃"]),
    ("eye", &["eye", "眼", "vision", "视力", "疲劳"]),
    ("digestion", &["digest", "消化", "stomach", "胃", "bloat", "腹胀"]),
    ("menstrual", &["period", "menstrual", "月经", "痛经", "cramp"]),
];

// ============================================================================
// OUTCOMES
// ============================================================================

/// A matching pass hit: the matched labels plus a full diagnosis of the
/// first one.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedChat {
    pub success: bool,
    pub user_input: String,
    pub matched_symptoms: Vec<String>,
    pub diagnosis: DiagnosisOutcome,
}

/// The advisor answered: raw advice text plus the resolvable points it
/// mentioned.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisedChat {
    pub success: bool,
    pub mode: String,
    pub user_input: String,
    pub llm_response: String,
    pub recommended_acupoints: Vec<RecommendedPoint>,
}

/// Nothing matched and the advisor had nothing to say.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMiss {
    pub success: bool,
    pub message: String,
    pub available_symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChatOutcome {
    Matched(MatchedChat),
    Advised(AdvisedChat),
    NoMatch(ChatMiss),
}

impl ChatOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ChatOutcome::NoMatch(_))
    }
}

// ============================================================================
// RESPONDER
// ============================================================================

/// Answer one chat message. `Err` only when the symptom database cannot be
/// read; an unmatchable message is a structured `NoMatch`.
pub fn respond(
    engine: &DiagnosisEngine,
    advisor: &dyn SymptomAdvisor,
    message: &str,
) -> Result<ChatOutcome> {
    let user_input = message.to_lowercase();
    let db = engine.load_db()?;

    let mut matched = match_keywords(&db, &user_input);
    if matched.is_empty() {
        matched = match_label_words(&db, &user_input);
    }

    if matched.is_empty() {
        if let Some(advice) = advisor.advise(&user_input) {
            let codes = advisor::extract_point_codes(&advice);
            let capped = &codes[..codes.len().min(MAX_RECOMMENDED)];
            return Ok(ChatOutcome::Advised(AdvisedChat {
                success: true,
                mode: "llm".to_string(),
                user_input,
                llm_response: advice,
                recommended_acupoints: advisor::recommended_points(engine.catalog(), capped),
            }));
        }
        return Ok(ChatOutcome::NoMatch(ChatMiss {
            success: false,
            message: NO_MATCH_MESSAGE.to_string(),
            available_symptoms: db.symptom_names(),
        }));
    }

    // Diagnose the first matched label by its primary name
    let primary = matched[0]
        .split('/')
        .next()
        .unwrap_or(&matched[0])
        .trim()
        .to_string();
    Ok(ChatOutcome::Matched(MatchedChat {
        success: true,
        user_input,
        matched_symptoms: matched,
        diagnosis: engine.diagnose(&primary)?,
    }))
}

/// Pass 1: trigger words → category keys → labels containing the key.
/// Table order decides the order of the matched list.
fn match_keywords(db: &SymptomDb, user_input: &str) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for (symptom_key, keywords) in SYMPTOM_KEYWORDS {
        if keywords.iter().any(|kw| user_input.contains(kw)) {
            for entry in &db.symptoms {
                if entry.symptom.to_lowercase().contains(symptom_key)
                    && !matched.contains(&entry.symptom)
                {
                    matched.push(entry.symptom.clone());
                }
            }
        }
    }
    matched
}

/// Pass 2: any message word longer than two characters found inside a
/// symptom label.
fn match_label_words(db: &SymptomDb, user_input: &str) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for entry in &db.symptoms {
        let label = entry.symptom.to_lowercase();
        for word in user_input.split_whitespace() {
            if word.chars().count() > 2
                && label.contains(word)
                && !matched.contains(&entry.symptom)
            {
                matched.push(entry.symptom.clone());
            }
        }
    }
    matched
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::NoAdvisor;

    struct StubAdvisor(&'static str);

    impl SymptomAdvisor for StubAdvisor {
        fn advise(&self, _user_message: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn engine() -> DiagnosisEngine {
        DiagnosisEngine::bundled()
    }

    #[test]
    fn test_english_keyword_match() {
        let outcome = respond(&engine(), &NoAdvisor, "My HEAD hurts badly").unwrap();
        match outcome {
            ChatOutcome::Matched(chat) => {
                assert!(chat.success);
                assert_eq!(chat.user_input, "my head hurts badly");
                assert!(chat.matched_symptoms[0].starts_with("Headache"));
                assert!(chat.diagnosis.is_success());
            }
            _ => panic!("expected a keyword match"),
        }
    }

    #[test]
    fn test_chinese_keyword_match() {
        let outcome = respond(&engine(), &NoAdvisor, "我最近总是失眠").unwrap();
        match outcome {
            ChatOutcome::Matched(chat) => {
                assert!(chat.matched_symptoms[0].starts_with("Insomnia"));
            }
            _ => panic!("expected a keyword match"),
        }
    }

    #[test]
    fn test_multiple_categories_keep_table_order() {
        let outcome = respond(&engine(), &NoAdvisor, "头痛得睡不着").unwrap();
        match outcome {
            ChatOutcome::Matched(chat) => {
                assert_eq!(chat.matched_symptoms.len(), 2);
                assert!(chat.matched_symptoms[0].starts_with("Headache"));
                assert!(chat.matched_symptoms[1].starts_with("Insomnia"));
                // Diagnosis follows the first match
                let report = chat.diagnosis.report().unwrap();
                assert!(report.symptom.starts_with("Headache"));
            }
            _ => panic!("expected keyword matches"),
        }
    }

    #[test]
    fn test_label_word_fallback() {
        // "strain" is in no keyword list but appears in the Eye Strain label
        let outcome = respond(&engine(), &NoAdvisor, "terrible strain today").unwrap();
        match outcome {
            ChatOutcome::Matched(chat) => {
                assert!(chat.matched_symptoms[0].starts_with("Eye Strain"));
            }
            _ => panic!("expected a label-word match"),
        }
    }

    #[test]
    fn test_no_match_without_advisor() {
        let outcome = respond(&engine(), &NoAdvisor, "broken keyboard").unwrap();
        assert!(!outcome.is_success());
        match outcome {
            ChatOutcome::NoMatch(miss) => {
                assert!(!miss.success);
                assert!(miss.message.starts_with("抱歉"));
                assert_eq!(
                    miss.available_symptoms.len(),
                    engine().load_db().unwrap().len()
                );
            }
            _ => panic!("expected a miss"),
        }
    }

    #[test]
    fn test_advisor_path_caps_recommendations() {
        let advisor =
            StubAdvisor("【症状分析】复杂症状\n【推荐穴位】LI4, GB20, LR3, HT7\n【保健建议】休息");
        let outcome = respond(&engine(), &advisor, "a very unusual complaint").unwrap();
        match outcome {
            ChatOutcome::Advised(chat) => {
                assert!(chat.success);
                assert_eq!(chat.mode, "llm");
                assert!(chat.llm_response.contains("推荐穴位"));
                // Four codes mentioned, capped to three
                assert_eq!(chat.recommended_acupoints.len(), 3);
                assert_eq!(chat.recommended_acupoints[0].code, "LI4");
                assert_eq!(chat.recommended_acupoints[2].chinese_name, "太冲");
            }
            _ => panic!("expected the advisor path"),
        }
    }

    #[test]
    fn test_advisor_not_consulted_when_keywords_hit() {
        // If the advisor were consulted this stub would force the llm path
        let advisor = StubAdvisor("LI4");
        let outcome = respond(&engine(), &advisor, "headache").unwrap();
        assert!(matches!(outcome, ChatOutcome::Matched(_)));
    }

    #[test]
    fn test_outcome_wire_shapes() {
        let matched =
            serde_json::to_value(respond(&engine(), &NoAdvisor, "nausea").unwrap()).unwrap();
        assert_eq!(matched["success"], true);
        assert!(matched.get("matched_symptoms").is_some());
        assert!(matched["diagnosis"]["acupoints"].is_array());

        let miss =
            serde_json::to_value(respond(&engine(), &NoAdvisor, "xyzzy").unwrap()).unwrap();
        assert_eq!(miss["success"], false);
        assert!(miss.get("message").is_some());
        assert!(miss.get("error").is_none());
    }
}
