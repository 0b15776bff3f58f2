use super::domain::{ComplianceNote, DueDateRule, ReviewStage, ReviewerRole, TaskTemplate};

/// Fixed task set the cooperative runs for every 5C review.
#[derive(Debug)]
pub struct ReviewWorkflowBlueprint {
    tasks: Vec<TaskTemplate>,
}

impl ReviewWorkflowBlueprint {
    pub fn standard() -> Self {
        Self {
            tasks: standard_task_templates(),
        }
    }

    pub fn tasks_for_stage(&self, stage: ReviewStage) -> Vec<&TaskTemplate> {
        self.tasks
            .iter()
            .filter(|task| task.stage == stage)
            .collect()
    }

    pub fn task_templates(&self) -> &[TaskTemplate] {
        &self.tasks
    }
}

fn standard_task_templates() -> Vec<TaskTemplate> {
    vec![
        TaskTemplate {
            key: "character_survey_visit",
            name: "Kunjungan Survei Karakter",
            stage: ReviewStage::Character,
            primary_role: ReviewerRole::FieldSurveyor,
            due: DueDateRule::DaysFromSubmission(2),
            deliverables: vec![
                "Wawancarai pemohon di rumah atau tempat usaha dan catat hasilnya pada formulir survei.",
                "Konfirmasi karakter pemohon kepada minimal dua sumber independen (tetangga, ketua RT, rekan usaha).",
                "Dokumentasikan kondisi tempat tinggal dan usaha dengan foto.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Verifikasi dua sumber independen",
                detail: "Penilaian karakter tanpa konfirmasi pihak ketiga tidak dapat dipakai sebagai dasar rekomendasi komite.",
            }],
        },
        TaskTemplate {
            key: "character_rating_form",
            name: "Isi Formulir Penilaian Karakter",
            stage: ReviewStage::Character,
            primary_role: ReviewerRole::FieldSurveyor,
            due: DueDateRule::DaysFromSubmission(3),
            deliverables: vec![
                "Lengkapi kelima slot penilaian karakter beserta catatan naratif per aspek.",
                "Tandai kolom derogatori bila ditemukan indikasi tunggakan, sengketa, atau penipuan.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Kelengkapan formulir 5C",
                detail: "Slot penilaian yang kosong mengurangi keandalan skor rata-rata dan wajib dijelaskan pada catatan surveyor.",
            }],
        },
        TaskTemplate {
            key: "capacity_worksheet",
            name: "Lengkapi Lembar Pendapatan & Pengeluaran",
            stage: ReviewStage::Capacity,
            primary_role: ReviewerRole::FieldSurveyor,
            due: DueDateRule::DaysFromSubmission(3),
            deliverables: vec![
                "Rinci seluruh sumber pendapatan pemohon dan pasangan termasuk penghasilan sampingan.",
                "Rinci pengeluaran rumah tangga, kewajiban sosial, dan biaya anak (sekolah serta uang saku).",
            ],
            compliance: vec![ComplianceNote {
                topic: "Kebenaran data penghasilan",
                detail: "Data penghasilan harus didukung bukti (slip gaji, nota penjualan) sesuai prinsip kehati-hatian usaha simpan pinjam.",
            }],
        },
        TaskTemplate {
            key: "capacity_sub_analysis",
            name: "Hitung Sub-Analisis Kapasitas",
            stage: ReviewStage::Capacity,
            primary_role: ReviewerRole::CreditAnalyst,
            due: DueDateRule::DaysFromSubmission(5),
            deliverables: vec![
                "Hitung pendapatan bersih, angsuran maksimal, dan plafon maksimal dari lembar survei.",
                "Bandingkan angsuran rencana terhadap pendapatan bersih dan catat rasionya.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Permenkop UKM No. 15/2015",
                detail: "Analisis kemampuan membayar wajib terdokumentasi sebelum pinjaman diputus (prinsip kehati-hatian USP).",
            }],
        },
        TaskTemplate {
            key: "capital_verification",
            name: "Verifikasi Modal & Simpanan Anggota",
            stage: ReviewStage::Capital,
            primary_role: ReviewerRole::CreditAnalyst,
            due: DueDateRule::DaysFromSubmission(5),
            deliverables: vec![
                "Periksa saldo simpanan pokok, wajib, dan sukarela pemohon di buku anggota.",
                "Catat aset usaha yang menjadi modal kerja beserta perkiraan nilainya.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Keanggotaan aktif",
                detail: "Pinjaman hanya dapat diberikan kepada anggota dengan simpanan wajib berjalan sesuai AD/ART koperasi.",
            }],
        },
        TaskTemplate {
            key: "collateral_appraisal",
            name: "Penilaian Jaminan",
            stage: ReviewStage::Collateral,
            primary_role: ReviewerRole::CreditAnalyst,
            due: DueDateRule::DaysFromSubmission(6),
            deliverables: vec![
                "Taksir nilai pasar jaminan dan bandingkan terhadap plafon yang diajukan.",
                "Catat kondisi fisik jaminan beserta foto pendukung.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Kecukupan nilai jaminan",
                detail: "Nilai taksiran jaminan di bawah plafon wajib disampaikan eksplisit kepada komite persetujuan.",
            }],
        },
        TaskTemplate {
            key: "collateral_document_check",
            name: "Periksa Legalitas Dokumen Jaminan",
            stage: ReviewStage::Collateral,
            primary_role: ReviewerRole::Administration,
            due: DueDateRule::DaysFromSubmission(6),
            deliverables: vec![
                "Cocokkan nama pemilik pada dokumen jaminan (BPKB/SHM) dengan identitas pemohon.",
                "Pastikan dokumen asli diserahkan dan dicatat pada register jaminan.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Keabsahan dokumen",
                detail: "Dokumen jaminan atas nama pihak ketiga memerlukan surat kuasa notariil sebelum akad.",
            }],
        },
        TaskTemplate {
            key: "conclusion_analyst_memo",
            name: "Susun Memo Rekomendasi Analis",
            stage: ReviewStage::Conclusion,
            primary_role: ReviewerRole::CreditAnalyst,
            due: DueDateRule::DaysBeforeDecision(2),
            deliverables: vec![
                "Rangkum hasil 5C beserta rekomendasi layak/pertimbangan/tidak layak dan faktornya.",
                "Lampirkan hasil sub-analisis kapasitas dan penilaian risiko pada memo.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Pemisahan tugas analis dan pemutus",
                detail: "Analis hanya merekomendasikan; keputusan akhir berada pada komite persetujuan yang berbeda orang.",
            }],
        },
        TaskTemplate {
            key: "conclusion_committee_decision",
            name: "Rapat Komite & Keputusan",
            stage: ReviewStage::Conclusion,
            primary_role: ReviewerRole::CommitteeApprover,
            due: DueDateRule::OnDecision,
            deliverables: vec![
                "Bahas memo analis dalam rapat komite dan tetapkan keputusan setuju/tolak beserta alasannya.",
                "Catat keputusan, plafon disetujui, dan syarat tambahan pada berita acara.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Dokumentasi keputusan komite",
                detail: "Berita acara keputusan wajib ditandatangani seluruh anggota komite yang hadir.",
            }],
        },
        TaskTemplate {
            key: "conclusion_notify_member",
            name: "Sampaikan Keputusan kepada Anggota",
            stage: ReviewStage::Conclusion,
            primary_role: ReviewerRole::Administration,
            due: DueDateRule::OnDecision,
            deliverables: vec![
                "Informasikan keputusan beserta alasan kepada pemohon melalui saluran resmi koperasi.",
                "Jadwalkan akad dan pencairan bila disetujui, atau arahkan pengajuan ulang bila ditolak.",
            ],
            compliance: vec![ComplianceNote {
                topic: "Kerahasiaan data anggota",
                detail: "Alasan penolakan hanya disampaikan kepada pemohon yang bersangkutan, tidak kepada pihak lain.",
            }],
        },
    ]
}
