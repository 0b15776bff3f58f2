use serde::{Deserialize, Deserializer, Serialize};

/// Itemized monthly household cashflow captured on the field-survey worksheet.
///
/// Wire names follow the legacy worksheet payload. Monetary fields arrive from
/// hand-filled forms, so anything absent or unparseable is coerced to zero
/// instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeExpenseRecord {
    #[serde(rename = "pendapatanPemohon", deserialize_with = "lenient_amount")]
    pub applicant_income: f64,
    #[serde(rename = "pendapatanPasangan", deserialize_with = "lenient_amount")]
    pub spouse_income: f64,
    #[serde(rename = "pendapatanLain1", deserialize_with = "lenient_amount")]
    pub other_income_1: f64,
    #[serde(rename = "pendapatanLain2", deserialize_with = "lenient_amount")]
    pub other_income_2: f64,
    #[serde(rename = "pendapatanLain3", deserialize_with = "lenient_amount")]
    pub other_income_3: f64,
    #[serde(rename = "pengeluaranPemohon", deserialize_with = "lenient_amount")]
    pub applicant_expense: f64,
    #[serde(rename = "pengeluaranPasangan", deserialize_with = "lenient_amount")]
    pub spouse_expense: f64,
    #[serde(rename = "biayaMakan", deserialize_with = "lenient_amount")]
    pub food_expense: f64,
    #[serde(rename = "biayaListrikAir", deserialize_with = "lenient_amount")]
    pub utilities_expense: f64,
    #[serde(rename = "biayaSosial", deserialize_with = "lenient_amount")]
    pub social_expense: f64,
    #[serde(rename = "biayaTanggunganLain", deserialize_with = "lenient_amount")]
    pub other_dependents_expense: f64,
    #[serde(rename = "jumlahAnak")]
    pub child_count: u32,
    #[serde(rename = "biayaSekolahAnak", deserialize_with = "lenient_amount")]
    pub school_expense: f64,
    #[serde(rename = "uangSakuAnak", deserialize_with = "lenient_amount")]
    pub allowance_expense: f64,
}

impl IncomeExpenseRecord {
    pub fn total_income(&self) -> f64 {
        self.applicant_income
            + self.spouse_income
            + self.other_income_1
            + self.other_income_2
            + self.other_income_3
    }

    /// Household expenses plus the child schooling and allowance items, which
    /// the worksheet records as monthly totals for the whole household.
    pub fn total_expense(&self) -> f64 {
        self.applicant_expense
            + self.spouse_expense
            + self.food_expense
            + self.utilities_expense
            + self.social_expense
            + self.other_dependents_expense
            + self.school_expense
            + self.allowance_expense
    }

    /// May be negative; downstream affordability math must propagate that
    /// rather than flooring it.
    pub fn net_income(&self) -> f64 {
        self.total_income() - self.total_expense()
    }
}

/// Affordability pricing dial: what fraction of net income may be committed to
/// an installment, and how future installments are discounted.
///
/// Two profiles are in active use and both must stay reproducible, so the
/// fraction and rate are explicit values rather than constants buried in the
/// math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPolicy {
    pub installment_fraction: f64,
    pub monthly_interest_rate: f64,
}

impl CapacityPolicy {
    /// Committee sub-analysis profile: 40% of net income priced with the
    /// cooperative's standard 1.5% monthly declining-balance rate.
    pub const fn committee() -> Self {
        Self {
            installment_fraction: 0.4,
            monthly_interest_rate: 0.015,
        }
    }

    /// Field-survey quick check: 70% of net income, flat multiplication with
    /// no discounting.
    pub const fn field_survey() -> Self {
        Self {
            installment_fraction: 0.7,
            monthly_interest_rate: 0.0,
        }
    }
}

/// Affordability envelope for one worksheet and term. Wire names match the
/// stored sub-analysis record other systems already read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    #[serde(rename = "pendapatanBersih")]
    pub net_income: f64,
    #[serde(rename = "angsuranMaksimal")]
    pub max_installment: f64,
    #[serde(rename = "plafonMaksimal")]
    pub max_principal: f64,
    #[serde(rename = "jangkaPembiayaan")]
    pub term_months: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum CapacityError {
    #[error("jangka pembiayaan harus minimal satu bulan, diterima {0}")]
    InvalidTerm(i64),
}

/// Compute the affordability envelope for a worksheet, term, and policy.
///
/// Pure and idempotent. A non-positive term is rejected before any division;
/// a negative net income flows through to a negative installment and
/// principal.
pub fn compute_affordability(
    record: &IncomeExpenseRecord,
    term_months: i64,
    policy: CapacityPolicy,
) -> Result<AffordabilityResult, CapacityError> {
    if term_months <= 0 {
        return Err(CapacityError::InvalidTerm(term_months));
    }
    let term = term_months as u32;

    let net_income = record.net_income();
    let max_installment = net_income * policy.installment_fraction;

    let max_principal = if policy.monthly_interest_rate == 0.0 {
        max_installment * f64::from(term)
    } else {
        // Present value of an annuity: the largest principal the max
        // installment can amortize over the term at the monthly rate.
        let rate = policy.monthly_interest_rate;
        max_installment * (1.0 - (1.0 + rate).powi(-(term as i32))) / rate
    };

    Ok(AffordabilityResult {
        net_income,
        max_installment,
        max_principal,
        term_months: term,
    })
}

/// Share of net income a planned installment would consume.
///
/// Returns `None` when net income is zero or negative: the ratio is undefined
/// there and callers must skip ratio-driven rules instead of dividing.
pub fn affordability_ratio(planned_installment: f64, net_income: f64) -> Option<f64> {
    if net_income <= 0.0 {
        return None;
    }
    Some(planned_installment / net_income)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(value)) => value,
        Some(Raw::Text(value)) => value.trim().parse().unwrap_or(0.0),
        Some(Raw::Null) | None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn worksheet(net_target: f64) -> IncomeExpenseRecord {
        IncomeExpenseRecord {
            applicant_income: net_target + 1_500_000.0,
            food_expense: 1_000_000.0,
            utilities_expense: 500_000.0,
            ..IncomeExpenseRecord::default()
        }
    }

    #[test]
    fn totals_cover_every_worksheet_item() {
        let record = IncomeExpenseRecord {
            applicant_income: 3_000_000.0,
            spouse_income: 1_200_000.0,
            other_income_1: 300_000.0,
            other_income_2: 200_000.0,
            other_income_3: 100_000.0,
            applicant_expense: 400_000.0,
            spouse_expense: 200_000.0,
            food_expense: 900_000.0,
            utilities_expense: 350_000.0,
            social_expense: 150_000.0,
            other_dependents_expense: 250_000.0,
            child_count: 2,
            school_expense: 500_000.0,
            allowance_expense: 300_000.0,
        };

        assert_relative_eq!(record.total_income(), 4_800_000.0);
        assert_relative_eq!(record.total_expense(), 3_050_000.0);
        assert_relative_eq!(record.net_income(), 1_750_000.0);
    }

    #[test]
    fn flat_policy_multiplies_installment_by_term() {
        let record = worksheet(2_000_000.0);
        let result = compute_affordability(&record, 12, CapacityPolicy::field_survey())
            .expect("valid term");

        assert_relative_eq!(result.max_installment, 2_000_000.0 * 0.7);
        assert_relative_eq!(result.max_principal, 2_000_000.0 * 0.7 * 12.0);
        assert_eq!(result.term_months, 12);
    }

    #[test]
    fn annuity_principal_stays_below_flat_principal() {
        let record = worksheet(2_000_000.0);
        for term in [1_i64, 6, 12, 24, 60] {
            let flat = compute_affordability(
                &record,
                term,
                CapacityPolicy {
                    installment_fraction: 0.4,
                    monthly_interest_rate: 0.0,
                },
            )
            .expect("valid term");
            let annuity =
                compute_affordability(&record, term, CapacityPolicy::committee())
                    .expect("valid term");

            assert!(
                annuity.max_principal < flat.max_principal,
                "term {term}: annuity {} should discount below flat {}",
                annuity.max_principal,
                flat.max_principal
            );
        }
    }

    #[test]
    fn negative_net_income_propagates() {
        let record = IncomeExpenseRecord {
            applicant_income: 1_000_000.0,
            food_expense: 1_600_000.0,
            ..IncomeExpenseRecord::default()
        };
        let result = compute_affordability(&record, 10, CapacityPolicy::field_survey())
            .expect("valid term");

        assert!(result.net_income < 0.0);
        assert!(result.max_installment < 0.0);
        assert!(result.max_principal < 0.0);
    }

    #[test]
    fn non_positive_terms_are_rejected() {
        let record = worksheet(1_000_000.0);
        for term in [0_i64, -3] {
            match compute_affordability(&record, term, CapacityPolicy::committee()) {
                Err(CapacityError::InvalidTerm(got)) => assert_eq!(got, term),
                other => panic!("expected invalid term error, got {other:?}"),
            }
        }
    }

    #[test]
    fn ratio_is_undefined_for_non_positive_net_income() {
        assert_eq!(affordability_ratio(500_000.0, 0.0), None);
        assert_eq!(affordability_ratio(500_000.0, -250_000.0), None);
        assert_relative_eq!(
            affordability_ratio(650_000.0, 1_000_000.0).expect("defined"),
            0.65
        );
    }

    #[test]
    fn worksheet_deserialization_coerces_missing_and_malformed_amounts() {
        let record: IncomeExpenseRecord = serde_json::from_str(
            r#"{
                "pendapatanPemohon": "2500000",
                "pendapatanPasangan": null,
                "biayaMakan": "n/a",
                "jumlahAnak": 1
            }"#,
        )
        .expect("lenient parse");

        assert_relative_eq!(record.applicant_income, 2_500_000.0);
        assert_relative_eq!(record.spouse_income, 0.0);
        assert_relative_eq!(record.food_expense, 0.0);
        assert_eq!(record.child_count, 1);
    }
}
