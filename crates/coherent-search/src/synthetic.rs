//! Synthetic evidence for when no live provider can be used
//!
//! Topic buckets are an ordered rule table: the first bucket with a keyword
//! contained in the lower-cased question wins. Keywords include Arabic
//! variants of the travel terms. Questions that match no bucket get a
//! generic placeholder set that mentions the question.

use crate::error::SearchError;
use crate::provider::SearchProvider;
use async_trait::async_trait;
use coherent_domain::{CredibilityTier, EvidenceItem};
use tracing::info;

/// One canned evidence entry
struct CannedItem {
    title: &'static str,
    snippet: &'static str,
    url: &'static str,
    domain: &'static str,
    tier: CredibilityTier,
    recency: &'static str,
}

impl CannedItem {
    fn to_evidence(&self) -> EvidenceItem {
        EvidenceItem::new(
            self.title,
            self.snippet,
            self.url,
            self.domain,
            self.tier,
            Some(self.recency.to_string()),
        )
    }
}

/// A keyword-triggered set of canned evidence
struct TopicBucket {
    name: &'static str,
    keywords: &'static [&'static str],
    items: &'static [CannedItem],
}

impl TopicBucket {
    fn matches(&self, lowered_question: &str) -> bool {
        self.keywords.iter().any(|k| lowered_question.contains(k))
    }
}

const TRAVEL: TopicBucket = TopicBucket {
    name: "travel",
    keywords: &[
        "travel", "booking", "flight", "طيران", "حجز", "مصر", "روسيا", "egypt", "russia",
    ],
    items: &[
        CannedItem {
            title: "Expedia - Book Flights from Egypt to Russia",
            snippet: "Find and book the best flight deals from Egypt to Russia. Compare prices from multiple airlines including EgyptAir, Aeroflot, and Turkish Airlines. Free cancellation on select flights.",
            url: "https://www.expedia.com/Flights-Search?trip=roundtrip&leg1=from%3ACairo&leg2=to%3AMoscow",
            domain: "expedia.com",
            tier: CredibilityTier::High,
            recency: "Updated daily",
        },
        CannedItem {
            title: "Booking.com - Egypt to Russia Flights",
            snippet: "Compare flight prices from Cairo to Moscow, St. Petersburg and other Russian cities. Best deals from top airlines with flexible booking options and 24/7 customer support.",
            url: "https://www.booking.com/flights/",
            domain: "booking.com",
            tier: CredibilityTier::High,
            recency: "3 hours ago",
        },
        CannedItem {
            title: "Kayak - Cheap Flights Egypt → Russia",
            snippet: "Search hundreds of travel sites at once for cheap flights from Egypt to Russia. Filter by price, airlines, stops, and departure times to find your perfect flight.",
            url: "https://www.kayak.com/flights/CAI-MOW",
            domain: "kayak.com",
            tier: CredibilityTier::High,
            recency: "1 day ago",
        },
        CannedItem {
            title: "Skyscanner - Egypt to Russia Flight Comparison",
            snippet: "Compare millions of flights and find the cheapest deals from Egypt to Russia. Book directly with airlines or travel agents. No hidden fees or surprise charges.",
            url: "https://www.skyscanner.com/transport/flights/cai/ru/",
            domain: "skyscanner.com",
            tier: CredibilityTier::High,
            recency: "2 hours ago",
        },
        CannedItem {
            title: "EgyptAir Official - Direct Flights to Russia",
            snippet: "Book direct flights from Cairo to Moscow with EgyptAir. Competitive prices, excellent service, and convenient scheduling. Special offers for early bookings.",
            url: "https://www.egyptair.com/en/fly-egyptair/our-destinations/russia",
            domain: "egyptair.com",
            tier: CredibilityTier::High,
            recency: "Updated today",
        },
    ],
};

const HEALTH: TopicBucket = TopicBucket {
    name: "health",
    keywords: &["coffee", "blood pressure", "health"],
    items: &[
        CannedItem {
            title: "Coffee and Blood Pressure: What Research Shows",
            snippet: "Studies show that caffeine can cause a short-term rise in blood pressure, even in those without high blood pressure. The effect is temporary and varies by individual.",
            url: "https://www.mayoclinic.org/diseases-conditions/high-blood-pressure/expert-answers/blood-pressure/faq-20058543",
            domain: "mayoclinic.org",
            tier: CredibilityTier::High,
            recency: "2 months ago",
        },
        CannedItem {
            title: "Caffeine: How does it affect blood pressure?",
            snippet: "Caffeine may cause a short, but dramatic increase in your blood pressure, even if you don't have high blood pressure. Harvard Health researchers recommend moderation.",
            url: "https://www.health.harvard.edu/heart-health/caffeine-and-your-heart",
            domain: "health.harvard.edu",
            tier: CredibilityTier::High,
            recency: "6 weeks ago",
        },
        CannedItem {
            title: "Is Coffee Bad for Your Blood Pressure?",
            snippet: "For most people, moderate coffee consumption is not harmful. Some studies suggest regular coffee drinkers may develop tolerance to blood pressure effects.",
            url: "https://www.webmd.com/hypertension-high-blood-pressure/news/20020717/coffee-blood-pressure",
            domain: "webmd.com",
            tier: CredibilityTier::Medium,
            recency: "1 week ago",
        },
        CannedItem {
            title: "Coffee and Health: Scientific Evidence",
            snippet: "Recent meta-analysis shows coffee consumption may have protective effects against cardiovascular disease when consumed in moderation (3-4 cups daily).",
            url: "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC6390077/",
            domain: "ncbi.nlm.nih.gov",
            tier: CredibilityTier::High,
            recency: "3 days ago",
        },
    ],
};

const TECHNOLOGY: TopicBucket = TopicBucket {
    name: "technology",
    keywords: &["ai", "artificial intelligence", "technology"],
    items: &[
        CannedItem {
            title: "The Current State of Artificial Intelligence",
            snippet: "AI has made significant advances in natural language processing, computer vision, and decision-making systems across multiple industries.",
            url: "https://www.nature.com/articles/s41586-021-03819-2",
            domain: "nature.com",
            tier: CredibilityTier::High,
            recency: "1 week ago",
        },
        CannedItem {
            title: "AI Technology Trends and Applications",
            snippet: "Machine learning and deep learning continue to drive innovation in healthcare, finance, and autonomous systems with promising results.",
            url: "https://www.science.org/doi/10.1126/science.abc4147",
            domain: "science.org",
            tier: CredibilityTier::High,
            recency: "4 days ago",
        },
        CannedItem {
            title: "Understanding Modern AI Systems",
            snippet: "Large language models and neural networks have transformed how we interact with technology, enabling more natural human-computer interfaces.",
            url: "https://www.mit.edu/news/2023/ai-systems-overview",
            domain: "mit.edu",
            tier: CredibilityTier::High,
            recency: "2 weeks ago",
        },
    ],
};

/// Buckets in evaluation order
const BUCKETS: &[TopicBucket] = &[TRAVEL, HEALTH, TECHNOLOGY];

/// Static label carried by generic placeholder evidence
pub const PLACEHOLDER_RECENCY: &str = "Demo data";

/// Deterministic evidence generator, the last stage of the retrieval chain
///
/// Never fails and never returns fewer than two items.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticEvidence;

impl SyntheticEvidence {
    /// Create a new generator
    pub fn new() -> Self {
        Self
    }

    /// Produce canned evidence for `question`
    pub fn generate(&self, question: &str) -> Vec<EvidenceItem> {
        let lowered = question.to_lowercase();

        match BUCKETS.iter().find(|bucket| bucket.matches(&lowered)) {
            Some(bucket) => {
                info!("Using synthetic '{}' evidence", bucket.name);
                bucket.items.iter().map(CannedItem::to_evidence).collect()
            }
            None => {
                info!("Using generic synthetic evidence");
                generic_items(question)
            }
        }
    }
}

fn generic_items(question: &str) -> Vec<EvidenceItem> {
    let recency = || Some(PLACEHOLDER_RECENCY.to_string());
    vec![
        EvidenceItem::new(
            format!("Research Results for \"{}\"", question),
            "Placeholder content shown while live search is unavailable. With search credentials configured this would contain real web results.",
            "https://example.com/demo-result-1",
            "example.com",
            CredibilityTier::Medium,
            recency(),
        ),
        EvidenceItem::new(
            format!("Academic Study on {}", question),
            "Comprehensive research findings demonstrate various perspectives on this topic with evidence-based conclusions from peer-reviewed sources.",
            "https://scholar.google.com/demo-result-2",
            "scholar.google.com",
            CredibilityTier::High,
            recency(),
        ),
        EvidenceItem::new(
            format!("News Report: {} Analysis", question),
            "Recent developments and expert opinions provide insights into current trends and implications for various stakeholders.",
            "https://news.example.com/demo-result-3",
            "news.example.com",
            CredibilityTier::Medium,
            recency(),
        ),
    ]
}

#[async_trait]
impl SearchProvider for SyntheticEvidence {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_live(&self) -> bool {
        false
    }

    async fn search(&self, question: &str) -> Result<Vec<EvidenceItem>, SearchError> {
        Ok(self.generate(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_bucket_english_and_arabic() {
        let generator = SyntheticEvidence::new();
        assert_eq!(generator.generate("Best flight to Moscow?").len(), 5);

        let arabic = generator.generate("ما هو أفضل موقع لحجز طيران من مصر إلى روسيا");
        assert_eq!(arabic.len(), 5);
        assert_eq!(arabic[0].source_domain, "expedia.com");
    }

    #[test]
    fn test_health_bucket() {
        let items = SyntheticEvidence::new().generate("Does COFFEE raise blood pressure?");
        assert_eq!(items.len(), 4);
        assert_eq!(items[2].credibility_tier, CredibilityTier::Medium);
        assert!(items.iter().all(|i| i.published_recency.is_some()));
    }

    #[test]
    fn test_technology_bucket() {
        let items = SyntheticEvidence::new().generate("What is artificial intelligence");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].source_domain, "nature.com");
    }

    #[test]
    fn test_bucket_order_travel_before_health() {
        let items = SyntheticEvidence::new().generate("health insurance for travel");
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn test_generic_fallback_mentions_question() {
        let items = SyntheticEvidence::new().generate("how tall is mount everest");
        assert!(items.len() >= 2);
        assert!(items[0].title.contains("how tall is mount everest"));
        assert!(items
            .iter()
            .all(|i| i.published_recency.as_deref() == Some(PLACEHOLDER_RECENCY)));
    }

    #[tokio::test]
    async fn test_provider_never_fails() {
        let provider = SyntheticEvidence::new();
        let items = provider.search("").await.unwrap();
        assert!(items.len() >= 2);
    }
}
