//! Rule-based analysis used whenever the model path fails
//!
//! An ordered rule table keyed on lower-cased question keywords. Each rule
//! carries hand-written English and Arabic texts, picked by the script-based
//! language fallback. Questions matching no rule get a generic answer whose
//! confidence follows the share of high-credibility evidence.

use coherent_domain::{detect_fallback, Confidence, EvidenceItem};

/// Answer text in one language
struct CannedText {
    answer: &'static str,
    reasoning: &'static str,
}

/// One row of the rule table
struct AnswerRule {
    name: &'static str,
    keywords: &'static [&'static str],
    confidence: i64,
    english: CannedText,
    arabic: CannedText,
}

impl AnswerRule {
    fn matches(&self, lowered_question: &str) -> bool {
        self.keywords.iter().any(|k| lowered_question.contains(k))
    }

    fn text_for(&self, language: &str) -> &CannedText {
        if language == "ar" {
            &self.arabic
        } else {
            &self.english
        }
    }
}

const TRAVEL: AnswerRule = AnswerRule {
    name: "travel",
    keywords: &[
        "travel", "booking", "flight", "طيران", "حجز", "مصر", "روسيا", "egypt", "russia",
    ],
    confidence: 93,
    english: CannedText {
        answer: "For booking flights from Egypt to Russia, the most reliable options are Kayak, Expedia, Skyscanner, and Booking.com. These platforms offer comprehensive price comparison, flexible booking options, and excellent customer support. EgyptAir also provides direct flights with competitive pricing.",
        reasoning: "Based on established travel booking platforms with high credibility scores and official airline websites, which provide verified booking services and customer protection.",
    },
    arabic: CannedText {
        answer: "أفضل المواقع لحجز الطيران من مصر إلى روسيا هي كاياك وإكسبيديا وسكاي سكانر وبوكينج دوت كوم. هذه المنصات توفر مقارنة شاملة للأسعار وخيارات حجز مرنة ودعم عملاء ممتاز على مدار الساعة. كما تقدم مصر للطيران رحلات مباشرة بأسعار تنافسية.",
        reasoning: "بناءً على منصات الحجز الموثوقة ذات التقييمات العالية والمواقع الرسمية لشركات الطيران التي توفر خدمات حجز موثقة وحماية للعملاء.",
    },
};

const HEALTH: AnswerRule = AnswerRule {
    name: "coffee",
    keywords: &["coffee", "blood pressure", "قهوة", "ضغط الدم"],
    confidence: 87,
    english: CannedText {
        answer: "Yes, coffee can temporarily raise blood pressure due to caffeine content. Studies show a 3-12 mmHg increase lasting 3-4 hours, especially in non-regular drinkers. However, regular coffee consumption may not significantly affect long-term blood pressure in most healthy individuals.",
        reasoning: "Based on high-credibility medical sources including Mayo Clinic and Harvard Health, which provide evidence-based information over anecdotal reports.",
    },
    arabic: CannedText {
        answer: "نعم، يمكن للقهوة أن ترفع ضغط الدم مؤقتاً بسبب محتواها من الكافيين. تُظهر الدراسات ارتفاعاً بين 3 و12 ملم زئبق يستمر من 3 إلى 4 ساعات، خاصة لدى من لا يشربونها بانتظام. ومع ذلك، قد لا يؤثر الاستهلاك المنتظم للقهوة بشكل ملحوظ على ضغط الدم على المدى الطويل لدى معظم الأصحاء.",
        reasoning: "استناداً إلى مصادر طبية عالية المصداقية مثل مايو كلينك وهارفارد هيلث، والتي تقدم معلومات قائمة على الأدلة بدلاً من التجارب الشخصية.",
    },
};

const TECHNOLOGY: AnswerRule = AnswerRule {
    name: "ai",
    keywords: &["ai", "artificial intelligence", "الذكاء الاصطناعي"],
    confidence: 92,
    english: CannedText {
        answer: "Artificial Intelligence has advanced significantly through machine learning and deep learning, transforming industries like healthcare, finance, and technology. Current AI systems excel at pattern recognition, natural language processing, and specific task automation.",
        reasoning: "Prioritized peer-reviewed academic sources from Nature and Science journals over general technology blogs for authoritative scientific perspective.",
    },
    arabic: CannedText {
        answer: "تقدّم الذكاء الاصطناعي بشكل كبير بفضل التعلم الآلي والتعلم العميق، مما أحدث تحولاً في قطاعات مثل الرعاية الصحية والمال والتكنولوجيا. تتفوق أنظمة الذكاء الاصطناعي الحالية في التعرف على الأنماط ومعالجة اللغة الطبيعية وأتمتة مهام محددة.",
        reasoning: "أُعطيت الأولوية للمصادر الأكاديمية المحكّمة من مجلتي Nature وScience على مدونات التقنية العامة للحصول على منظور علمي موثوق.",
    },
};

const RULES: &[AnswerRule] = &[TRAVEL, HEALTH, TECHNOLOGY];

/// Result of the rule-based analysis, before timing is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackAnswer {
    /// Answer text
    pub best_answer: String,
    /// Justification text
    pub justification: String,
    /// Confidence score
    pub confidence: Confidence,
    /// Language from the script-based detector
    pub language: String,
    /// Name of the rule that fired, `None` for the generic answer
    pub rule: Option<&'static str>,
}

/// Deterministic, non-networked analysis. Never fails.
pub fn analyze(question: &str, evidence: &[EvidenceItem]) -> FallbackAnswer {
    let language = detect_fallback(question);
    let lowered = question.to_lowercase();

    match RULES.iter().find(|rule| rule.matches(&lowered)) {
        Some(rule) => {
            let text = rule.text_for(language);
            FallbackAnswer {
                best_answer: text.answer.to_string(),
                justification: text.reasoning.to_string(),
                confidence: Confidence::from_int(rule.confidence),
                language: language.to_string(),
                rule: Some(rule.name),
            }
        }
        None => generic_answer(evidence, language),
    }
}

/// `min(95, 60 + 35 * high / total)`, rounded; 60 when there is no evidence
pub fn generic_confidence(high: usize, total: usize) -> Confidence {
    if total == 0 {
        return Confidence::from_int(60);
    }
    let raw = 60.0 + 35.0 * high as f64 / total as f64;
    Confidence::from_raw(raw.min(95.0))
}

fn generic_answer(evidence: &[EvidenceItem], language: &str) -> FallbackAnswer {
    let total = evidence.len();
    let high = evidence
        .iter()
        .filter(|item| item.is_high_credibility())
        .count();

    FallbackAnswer {
        best_answer: format!(
            "Based on analysis of {} sources, the most reliable information indicates comprehensive research findings on this topic. Multiple perspectives were evaluated to provide the most coherent answer.",
            total
        ),
        justification: format!(
            "Selected sources with highest credibility scores ({}/{} high-credibility sources) to ensure reliable information.",
            high, total
        ),
        confidence: generic_confidence(high, total),
        language: language.to_string(),
        rule: None,
    }
}
