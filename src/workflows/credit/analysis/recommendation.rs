use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::capacity::{affordability_ratio, AffordabilityResult};
use super::signals::{SignalCounts, SignalExtractor};

/// Four-level grouping of the numeric average character rating. Each band is
/// inclusive at its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    SangatBaik,
    Baik,
    Cukup,
    Kurang,
}

impl ScoreBand {
    pub fn from_average(average: f64) -> Self {
        if average >= 4.2 {
            Self::SangatBaik
        } else if average >= 3.5 {
            Self::Baik
        } else if average >= 2.5 {
            Self::Cukup
        } else {
            Self::Kurang
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SangatBaik => "sangat_baik",
            Self::Baik => "baik",
            Self::Cukup => "cukup",
            Self::Kurang => "kurang",
        }
    }

    pub const fn display_label(self) -> &'static str {
        match self {
            Self::SangatBaik => "Sangat Baik",
            Self::Baik => "Baik",
            Self::Cukup => "Cukup",
            Self::Kurang => "Kurang",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Layak,
    Pertimbangan,
    TidakLayak,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Layak => "layak",
            Self::Pertimbangan => "pertimbangan",
            Self::TidakLayak => "tidak_layak",
        }
    }

    const fn action_note(self) -> &'static str {
        match self {
            Self::Layak => "Pengajuan dapat dilanjutkan ke komite persetujuan.",
            Self::Pertimbangan => {
                "Pengajuan memerlukan pembahasan komite dan verifikasi tambahan sebelum diputuskan."
            }
            Self::TidakLayak => {
                "Pengajuan disarankan ditolak atau diajukan ulang dengan nilai yang lebih kecil."
            }
        }
    }
}

/// Free-text character survey, one note per 5C interview prompt plus up to
/// five extra fields surveyors use for anything that does not fit the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSurvey {
    #[serde(rename = "agama")]
    pub religion_note: Option<String>,
    #[serde(rename = "pengalaman")]
    pub experience_note: Option<String>,
    #[serde(rename = "hubunganMasyarakat")]
    pub community_note: Option<String>,
    #[serde(rename = "karakterPinjaman")]
    pub loan_character_note: Option<String>,
    #[serde(rename = "catatan")]
    pub free_notes: Option<String>,
    #[serde(rename = "tambahan1")]
    pub extra_1: Option<String>,
    #[serde(rename = "tambahan2")]
    pub extra_2: Option<String>,
    #[serde(rename = "tambahan3")]
    pub extra_3: Option<String>,
    #[serde(rename = "tambahan4")]
    pub extra_4: Option<String>,
    #[serde(rename = "tambahan5")]
    pub extra_5: Option<String>,
}

impl CharacterSurvey {
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        [
            &self.religion_note,
            &self.experience_note,
            &self.community_note,
            &self.loan_character_note,
            &self.free_notes,
            &self.extra_1,
            &self.extra_2,
            &self.extra_3,
            &self.extra_4,
            &self.extra_5,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
    }

    fn labeled_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Agama & ibadah", &self.religion_note),
            ("Pengalaman", &self.experience_note),
            ("Hubungan masyarakat", &self.community_note),
            ("Karakter pinjaman", &self.loan_character_note),
            ("Catatan", &self.free_notes),
            ("Tambahan 1", &self.extra_1),
            ("Tambahan 2", &self.extra_2),
            ("Tambahan 3", &self.extra_3),
            ("Tambahan 4", &self.extra_4),
            ("Tambahan 5", &self.extra_5),
        ]
        .into_iter()
        .filter_map(|(label, field)| field.as_deref().map(|text| (label, text)))
    }
}

/// Closed vocabulary for the surveyor's discrete rating slots.
pub const RATING_VOCABULARY: [&str; 4] = ["Baik", "Cukup", "Kurang", "Jelek"];

/// Planned financing figures pulled from the application record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedLoan {
    #[serde(rename = "jumlahPengajuan")]
    pub amount: f64,
    #[serde(rename = "jangkaWaktu")]
    pub term_months: u32,
    #[serde(rename = "perkiraanAngsuran")]
    pub installment: f64,
}

/// Everything the synthesizer looks at for one recommendation.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub average_score: f64,
    pub survey: &'a CharacterSurvey,
    pub survey_ratings: Option<&'a [String]>,
    pub assessment_scores: Option<&'a [f64]>,
    pub sub_capacity: Option<&'a AffordabilityResult>,
    pub planned_loan: Option<&'a PlannedLoan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    pub band: ScoreBand,
    pub recommendation: Recommendation,
    pub narrative: String,
    pub factors: Vec<String>,
}

struct RuleContext {
    band: ScoreBand,
    signals: SignalCounts,
    capacity_ratio: Option<f64>,
}

/// One step of the decision sequence: inspect the context and the state left
/// by earlier rules, optionally replace it.
struct OverrideRule {
    name: &'static str,
    apply: fn(&RuleContext, Recommendation) -> Option<Recommendation>,
}

/// Decision sequence, applied top to bottom; every rule that fires overwrites
/// the state, so later rules take precedence over earlier ones.
const OVERRIDE_RULES: &[OverrideRule] = &[
    OverrideRule {
        name: "baseline_layak",
        apply: |ctx, _| {
            (ctx.band == ScoreBand::SangatBaik
                || (ctx.band == ScoreBand::Baik && ctx.signals.negative == 0))
                .then_some(Recommendation::Layak)
        },
    },
    OverrideRule {
        name: "baseline_pertimbangan",
        apply: |ctx, _| (ctx.band == ScoreBand::Cukup).then_some(Recommendation::Pertimbangan),
    },
    OverrideRule {
        name: "baseline_tidak_layak",
        apply: |ctx, _| {
            (ctx.band == ScoreBand::Kurang || ctx.signals.negative >= 2)
                .then_some(Recommendation::TidakLayak)
        },
    },
    OverrideRule {
        name: "kapasitas_terlalu_berat",
        apply: |ctx, _| {
            matches!(ctx.capacity_ratio, Some(ratio) if ratio > 0.6)
                .then_some(Recommendation::TidakLayak)
        },
    },
    OverrideRule {
        name: "kapasitas_mulai_berat",
        apply: |ctx, current| {
            (matches!(ctx.capacity_ratio, Some(ratio) if ratio > 0.45)
                && current == Recommendation::Layak)
                .then_some(Recommendation::Pertimbangan)
        },
    },
    // A very low installment burden is strong evidence against a downgrade
    // that came purely from qualitative signals, so a tidak_layak state is
    // softened when the ratio is at or under 10%.
    OverrideRule {
        name: "kapasitas_sangat_kuat",
        apply: |ctx, current| {
            if current != Recommendation::TidakLayak
                || !matches!(ctx.capacity_ratio, Some(ratio) if ratio <= 0.10)
            {
                return None;
            }
            if ctx.signals.negative >= 2 || ctx.band == ScoreBand::Kurang {
                Some(Recommendation::Pertimbangan)
            } else {
                Some(Recommendation::Layak)
            }
        },
    },
];

/// Turns survey scores, text signals, and the affordability picture into a
/// recommendation with a reviewer-facing narrative.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    extractor: SignalExtractor,
}

impl RecommendationEngine {
    pub fn new(extractor: SignalExtractor) -> Self {
        Self { extractor }
    }

    /// Total over the documented input domain: absent sections simply drop
    /// out of the narrative and the capacity rules, they never fail the call.
    pub fn synthesize(&self, input: &SynthesisInput<'_>) -> RecommendationOutcome {
        let band = ScoreBand::from_average(input.average_score);
        let signals = self.extractor.extract(input.survey.text_fields());

        let capacity_ratio = match (input.sub_capacity, input.planned_loan) {
            (Some(capacity), Some(plan)) => {
                affordability_ratio(plan.installment, capacity.net_income)
            }
            _ => None,
        };

        let context = RuleContext {
            band,
            signals,
            capacity_ratio,
        };

        let mut recommendation = Recommendation::Pertimbangan;
        for rule in OVERRIDE_RULES {
            if let Some(next) = (rule.apply)(&context, recommendation) {
                tracing::debug!(rule = rule.name, hasil = next.label(), "aturan rekomendasi");
                recommendation = next;
            }
        }

        let narrative = build_narrative(input, band, signals, capacity_ratio, recommendation);
        let factors = build_factors(input, band, signals);

        RecommendationOutcome {
            band,
            recommendation,
            narrative,
            factors,
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(SignalExtractor::default())
    }
}

fn build_narrative(
    input: &SynthesisInput<'_>,
    band: ScoreBand,
    signals: SignalCounts,
    capacity_ratio: Option<f64>,
    recommendation: Recommendation,
) -> String {
    let mut text = String::new();

    let _ = writeln!(
        text,
        "REKOMENDASI: {}",
        recommendation.label().to_uppercase()
    );
    text.push('\n');

    let _ = writeln!(
        text,
        "Skor rata-rata karakter: {:.2} ({})",
        input.average_score,
        band.display_label()
    );
    if let Some(scores) = input.assessment_scores.filter(|scores| !scores.is_empty()) {
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let _ = writeln!(text, "Skor rata-rata penilaian tambahan: {average:.2}");
    }

    if let Some(ratings) = input.survey_ratings.filter(|ratings| !ratings.is_empty()) {
        text.push('\n');
        text.push_str("Distribusi penilaian surveyor:\n");
        for label in RATING_VOCABULARY {
            let count = ratings
                .iter()
                .filter(|rating| rating.eq_ignore_ascii_case(label))
                .count();
            let _ = writeln!(text, "- {label}: {count}");
        }
    }

    let mut character_lines = input.survey.labeled_fields().peekable();
    if character_lines.peek().is_some() {
        text.push('\n');
        text.push_str("Catatan karakter:\n");
        for (label, note) in character_lines {
            let _ = writeln!(text, "- {label}: {note}");
        }
    }

    text.push('\n');
    let _ = writeln!(
        text,
        "Sinyal positif: {}, sinyal negatif: {}",
        signals.positive, signals.negative
    );

    if let Some(capacity) = input.sub_capacity {
        text.push('\n');
        text.push_str("Analisis kapasitas:\n");
        let _ = writeln!(
            text,
            "- Pendapatan bersih: {}",
            format_rupiah(capacity.net_income)
        );
        let _ = writeln!(
            text,
            "- Angsuran maksimal: {}",
            format_rupiah(capacity.max_installment)
        );
        let _ = writeln!(
            text,
            "- Plafon maksimal: {}",
            format_rupiah(capacity.max_principal)
        );
        let _ = writeln!(text, "- Jangka pembiayaan: {} bulan", capacity.term_months);
        if capacity.net_income > 0.0 {
            let _ = writeln!(
                text,
                "- Porsi angsuran maksimal: {:.1}% dari pendapatan bersih",
                capacity.max_installment / capacity.net_income * 100.0
            );
        }
    }

    if let Some(plan) = input.planned_loan {
        text.push('\n');
        text.push_str("Rencana pembiayaan:\n");
        let _ = writeln!(text, "- Jumlah pengajuan: {}", format_rupiah(plan.amount));
        let _ = writeln!(text, "- Jangka waktu: {} bulan", plan.term_months);
        let _ = writeln!(
            text,
            "- Perkiraan angsuran: {}",
            format_rupiah(plan.installment)
        );
        match capacity_ratio {
            Some(ratio) => {
                let _ = writeln!(
                    text,
                    "- Rasio angsuran terhadap pendapatan: {:.1}% ({})",
                    ratio * 100.0,
                    ratio_tier(ratio)
                );
            }
            None => {
                text.push_str(
                    "- Rasio angsuran terhadap pendapatan: tidak dapat dihitung\n",
                );
            }
        }
    }

    text.push('\n');
    let _ = writeln!(text, "Tindak lanjut: {}", recommendation.action_note());

    text
}

fn ratio_tier(ratio: f64) -> &'static str {
    if ratio <= 0.10 {
        "sangat kuat"
    } else if ratio <= 0.45 {
        "memadai"
    } else if ratio <= 0.60 {
        "mulai berat"
    } else {
        "terlalu berat"
    }
}

fn build_factors(
    input: &SynthesisInput<'_>,
    band: ScoreBand,
    signals: SignalCounts,
) -> Vec<String> {
    let mut factors = vec![
        format!("band={}", band.label()),
        format!("positiveSignals={}", signals.positive),
        format!("negativeSignals={}", signals.negative),
    ];

    if let Some(capacity) = input.sub_capacity {
        factors.push(format!("pendapatanBersih={}", capacity.net_income));
        factors.push(format!("angsuranMaksimal={}", capacity.max_installment));
    }

    factors
}

/// Format an amount with the Indonesian thousands separator.
pub fn format_rupiah(amount: f64) -> String {
    let negative = amount < 0.0;
    let digits = (amount.abs().round() as u64).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
