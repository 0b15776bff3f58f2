use std::collections::HashMap;
use std::sync::OnceLock;

static TRACKER_NAME_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

pub(crate) fn task_key_for_normalized(normalized_name: &str) -> Option<&'static str> {
    tracker_name_map().get(normalized_name).copied()
}

fn tracker_name_map() -> &'static HashMap<String, &'static str> {
    TRACKER_NAME_MAP.get_or_init(|| {
        // Committee exports carry the bare task name or the name suffixed
        // with the assigned role, depending on who configured the board.
        const NAME_TO_TASK: &[(&str, &str)] = &[
            // Survei Karakter
            ("Kunjungan Survei Karakter", "character_survey_visit"),
            (
                "Kunjungan Survei Karakter - Surveyor Lapangan",
                "character_survey_visit",
            ),
            ("Survei Karakter Pemohon", "character_survey_visit"),
            (
                "Isi Formulir Penilaian Karakter",
                "character_rating_form",
            ),
            (
                "Isi Formulir Penilaian Karakter - Surveyor Lapangan",
                "character_rating_form",
            ),
            // Analisis Kapasitas
            (
                "Lengkapi Lembar Pendapatan & Pengeluaran",
                "capacity_worksheet",
            ),
            (
                "Lengkapi Lembar Pendapatan dan Pengeluaran",
                "capacity_worksheet",
            ),
            (
                "Lengkapi Lembar Pendapatan & Pengeluaran - Surveyor Lapangan",
                "capacity_worksheet",
            ),
            ("Hitung Sub-Analisis Kapasitas", "capacity_sub_analysis"),
            (
                "Hitung Sub-Analisis Kapasitas - Analis Kredit",
                "capacity_sub_analysis",
            ),
            ("Sub Analisis Kapasitas", "capacity_sub_analysis"),
            // Verifikasi Modal
            (
                "Verifikasi Modal & Simpanan Anggota",
                "capital_verification",
            ),
            (
                "Verifikasi Modal dan Simpanan Anggota",
                "capital_verification",
            ),
            (
                "Verifikasi Modal & Simpanan Anggota - Analis Kredit",
                "capital_verification",
            ),
            // Penilaian Jaminan
            ("Penilaian Jaminan", "collateral_appraisal"),
            ("Penilaian Jaminan - Analis Kredit", "collateral_appraisal"),
            ("Taksasi Jaminan", "collateral_appraisal"),
            (
                "Periksa Legalitas Dokumen Jaminan",
                "collateral_document_check",
            ),
            (
                "Periksa Legalitas Dokumen Jaminan - Administrasi",
                "collateral_document_check",
            ),
            // Kesimpulan & Keputusan
            ("Susun Memo Rekomendasi Analis", "conclusion_analyst_memo"),
            (
                "Susun Memo Rekomendasi Analis - Analis Kredit",
                "conclusion_analyst_memo",
            ),
            ("Memo Rekomendasi", "conclusion_analyst_memo"),
            (
                "Rapat Komite & Keputusan",
                "conclusion_committee_decision",
            ),
            (
                "Rapat Komite dan Keputusan",
                "conclusion_committee_decision",
            ),
            (
                "Rapat Komite & Keputusan - Komite Persetujuan",
                "conclusion_committee_decision",
            ),
            (
                "Sampaikan Keputusan kepada Anggota",
                "conclusion_notify_member",
            ),
            (
                "Sampaikan Keputusan kepada Anggota - Administrasi",
                "conclusion_notify_member",
            ),
        ];

        NAME_TO_TASK
            .iter()
            .map(|(name, task_key)| (super::normalizer::normalize_name(name), *task_key))
            .collect()
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(raw: &str) -> Option<&'static str> {
    task_key_for_normalized(&super::normalizer::normalize_name(raw))
}
