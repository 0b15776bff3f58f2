use serde::{Deserialize, Serialize};

/// Employee-facing risk screening input: five character ratings on the 1-5
/// interview form, the matching derogatory checkboxes, and the requested
/// financing figures. Wire names match the committee's screening payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskInput {
    pub karakter1: Option<f64>,
    pub karakter2: Option<f64>,
    pub karakter3: Option<f64>,
    pub karakter4: Option<f64>,
    pub karakter5: Option<f64>,
    pub karakter1_jelek: bool,
    pub karakter2_jelek: bool,
    pub karakter3_jelek: bool,
    pub karakter4_jelek: bool,
    pub karakter5_jelek: bool,
    pub pengajuan: f64,
    pub jangka_waktu: f64,
}

impl RiskInput {
    fn ratings(&self) -> [Option<f64>; 5] {
        [
            self.karakter1,
            self.karakter2,
            self.karakter3,
            self.karakter4,
            self.karakter5,
        ]
    }

    fn derogatory_flags(&self) -> [bool; 5] {
        [
            self.karakter1_jelek,
            self.karakter2_jelek,
            self.karakter3_jelek,
            self.karakter4_jelek,
            self.karakter5_jelek,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub character_score: f64,
    pub debt_to_income_ratio: f64,
    pub risk_factors: Vec<String>,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub recommendations: Vec<String>,
    pub key_concerns: Vec<String>,
    pub approval_likelihood: u32,
}

const FACTOR_PAYMENT_HISTORY: &str = "Riwayat pembayaran pinjaman sebelumnya kurang baik";
const FACTOR_COMMUNITY: &str = "Hubungan dengan lingkungan sekitar kurang baik";
const FACTOR_EXPERIENCE: &str = "Pengalaman usaha masih terbatas";
const FACTOR_CAPACITY: &str = "Kemampuan membayar angsuran diragukan";
const FACTOR_COLLATERAL: &str = "Jaminan yang diajukan kurang memadai";

/// Fixed concern per rating slot, raised when that slot scores below 3.
const FACTOR_MESSAGES: [&str; 5] = [
    FACTOR_PAYMENT_HISTORY,
    FACTOR_COMMUNITY,
    FACTOR_EXPERIENCE,
    FACTOR_CAPACITY,
    FACTOR_COLLATERAL,
];

/// Stateless screening pass over one application. Every sub-computation is
/// pure, so concurrent calls need no coordination.
pub fn analyze_application(input: &RiskInput) -> RiskAssessment {
    let character_score = character_score(input);
    let debt_to_income_ratio = debt_to_income_ratio(input);
    let risk_factors = risk_factors(input);

    let risk_level = risk_level(character_score, debt_to_income_ratio, risk_factors.len());
    let risk_score = (character_score
        - 0.5 * debt_to_income_ratio
        - 5.0 * risk_factors.len() as f64)
        .clamp(0.0, 100.0);
    let recommendations = recommendations(character_score, debt_to_income_ratio, &risk_factors);
    let key_concerns = risk_factors.iter().take(3).cloned().collect();
    let approval_likelihood = approval_likelihood(character_score, debt_to_income_ratio);

    RiskAssessment {
        character_score,
        debt_to_income_ratio,
        risk_factors,
        risk_level,
        risk_score,
        recommendations,
        key_concerns,
        approval_likelihood,
    }
}

/// Average of the ratings that were actually filled in, minus ten points per
/// ticked derogatory box, floored at zero. Empty slots stay out of the
/// average instead of dragging it down as zeros.
///
/// TODO: confirm with the credit committee whether this score should be
/// rescaled to 0-100 before the level thresholds below read it; the interview
/// form scores 1-5, so today nearly every screening lands in CRITICAL.
fn character_score(input: &RiskInput) -> f64 {
    let ratings: Vec<f64> = input.ratings().into_iter().flatten().collect();
    let average = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };

    let penalty = 10.0
        * input
            .derogatory_flags()
            .iter()
            .filter(|flag| **flag)
            .count() as f64;

    (average - penalty).max(0.0)
}

// The requested amount cancels out of this expression, leaving 100 / term.
// Kept exactly as the committee's existing worksheets compute it so both
// tools agree on every screening.
fn debt_to_income_ratio(input: &RiskInput) -> f64 {
    if input.pengajuan > 0.0 {
        (input.pengajuan / input.jangka_waktu) / input.pengajuan * 100.0
    } else {
        0.0
    }
}

fn risk_factors(input: &RiskInput) -> Vec<String> {
    input
        .ratings()
        .into_iter()
        .zip(FACTOR_MESSAGES)
        .filter_map(|(rating, message)| match rating {
            Some(value) if value < 3.0 => Some(message.to_string()),
            _ => None,
        })
        .collect()
}

/// Most severe tier whose condition holds wins.
fn risk_level(character_score: f64, debt_ratio: f64, factor_count: usize) -> RiskLevel {
    if character_score < 60.0 || debt_ratio > 50.0 || factor_count >= 3 {
        RiskLevel::Critical
    } else if character_score < 70.0 || debt_ratio > 40.0 || factor_count >= 2 {
        RiskLevel::High
    } else if character_score < 80.0 || debt_ratio > 30.0 || factor_count >= 1 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn recommendations(character_score: f64, debt_ratio: f64, factors: &[String]) -> Vec<String> {
    let mut advice = Vec::new();

    if character_score < 70.0 {
        advice.push("Perlu pendampingan intensif dan monitoring pembayaran bulanan".to_string());
    }
    if debt_ratio > 40.0 {
        advice.push("Pertimbangkan penurunan plafon atau perpanjangan jangka waktu".to_string());
    }
    if factors.iter().any(|factor| factor == FACTOR_PAYMENT_HISTORY) {
        advice.push("Wajibkan jaminan tambahan atau penjamin yang kredibel".to_string());
    }
    if factors.iter().any(|factor| factor == FACTOR_CAPACITY) {
        advice.push("Lakukan verifikasi ulang penghasilan dan kapasitas membayar".to_string());
    }

    advice
}

/// Step function over both scores, strictest tier first.
fn approval_likelihood(character_score: f64, debt_ratio: f64) -> u32 {
    if character_score >= 90.0 && debt_ratio <= 20.0 {
        95
    } else if character_score >= 80.0 && debt_ratio <= 30.0 {
        80
    } else if character_score >= 70.0 && debt_ratio <= 40.0 {
        60
    } else if character_score >= 60.0 && debt_ratio <= 50.0 {
        40
    } else {
        20
    }
}
