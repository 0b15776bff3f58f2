use serde::{Deserialize, Serialize};

/// Keyword lexicon the extractor scans survey text against.
///
/// The terms are Bahasa Indonesia because that is what surveyors write; the
/// lexicon is injected at construction so deployments (and tests) can swap it
/// without touching the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl SignalLexicon {
    /// The lexicon the cooperative's survey forms are calibrated against.
    pub fn standard() -> Self {
        fn terms(raw: &[&str]) -> Vec<String> {
            raw.iter().map(|term| (*term).to_string()).collect()
        }

        Self {
            positive: terms(&[
                "baik",
                "aktif",
                "lancar",
                "disiplin",
                "jujur",
                "amanah",
                "stabil",
                "tetap",
                "harmonis",
                "solid",
                "terpercaya",
                "dapat dipercaya",
            ]),
            negative: terms(&[
                "jelek",
                "buruk",
                "negatif",
                "sering telat",
                "menunggak",
                "macet",
                "diragukan",
                "kurang",
                "sengketa",
                "penipuan",
                "tidak kooperatif",
            ]),
        }
    }
}

impl Default for SignalLexicon {
    fn default() -> Self {
        Self::standard()
    }
}

/// Tallies of survey fields matching each side of the lexicon. Always derived
/// fresh from the text, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    pub positive: u32,
    pub negative: u32,
}

/// Stateless substring matcher over free-text survey fields.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SignalExtractor {
    pub fn new(lexicon: SignalLexicon) -> Self {
        let lower = |terms: Vec<String>| -> Vec<String> {
            terms.into_iter().map(|term| term.to_lowercase()).collect()
        };

        Self {
            positive: lower(lexicon.positive),
            negative: lower(lexicon.negative),
        }
    }

    /// Count fields containing at least one negative or positive term.
    ///
    /// A field matching both lexicons increments both tallies. Matching is
    /// case-insensitive substring containment, and the result does not depend
    /// on field order.
    pub fn extract<'a, I>(&self, fields: I) -> SignalCounts
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = SignalCounts::default();

        for field in fields {
            let text = field.trim().to_lowercase();
            if text.is_empty() {
                continue;
            }

            if self.negative.iter().any(|term| text.contains(term.as_str())) {
                counts.negative += 1;
            }
            if self.positive.iter().any(|term| text.contains(term.as_str())) {
                counts.positive += 1;
            }
        }

        counts
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new(SignalLexicon::standard())
    }
}
