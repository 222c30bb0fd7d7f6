//! Vocabulary tables consumed by the specialty scorer. Order inside a table
//! only affects which evidence string is reported first.

use trialscope_core::Specialty;

pub type TermTable = [(Specialty, &'static [&'static str])];

pub static SPECIALTY_TERMS: &TermTable = &[
    (
        Specialty::Cardiology,
        &[
            "cardiology", "cardiovascular", "cardiac", "heart", "coronary", "arrhythmia",
            "atrial", "ventricular", "hypertension", "myocardial", "infarction", "angina",
            "stroke", "thrombosis", "anticoagulant", "statin", "lipid", "cholesterol",
            "atherosclerosis", "heart failure", "cardiomyopathy", "pacemaker", "defibrillator",
            "echocardiography", "angioplasty", "bypass", "valve", "aortic", "mitral",
            "pulmonary embolism", "deep vein thrombosis", "dvt", "afib", "atrial fibrillation",
            "blood pressure", "antihypertensive", "beta blocker", "ace inhibitor",
            "calcium channel", "diuretic", "warfarin", "heparin", "aspirin",
        ],
    ),
    (
        Specialty::Gastroenterology,
        &[
            "gastroenterology", "gastrointestinal", "digestive", "gi tract", "intestinal",
            "intestine", "colon", "colonic", "colorectal", "hepatology", "hepatic", "liver",
            "cirrhosis", "hepatitis", "esophageal", "esophagus", "stomach", "gastric", "peptic",
            "bowel", "ibd", "crohn", "colitis", "ulcerative colitis", "gerd", "reflux",
            "pancreatic", "pancreas", "pancreatitis", "gallbladder", "biliary", "cholecystitis",
            "cholelithiasis", "endoscopy", "colonoscopy", "gastroscopy", "ercp", "celiac",
            "gluten", "microbiome", "probiotic", "constipation", "diarrhea", "dyspepsia",
            "h pylori", "helicobacter", "barrett", "adenocarcinoma", "polyp", "diverticulitis",
        ],
    ),
    (
        Specialty::Oncology,
        &[
            "oncology", "cancer", "carcinoma", "tumor", "tumour", "neoplasm", "malignant",
            "malignancy", "metastatic", "metastasis", "chemotherapy", "radiation therapy",
            "radiotherapy", "immunotherapy", "targeted therapy", "checkpoint inhibitor", "pd-1",
            "pd-l1", "ctla-4", "car-t", "leukemia", "leukaemia", "lymphoma", "myeloma",
            "sarcoma", "melanoma", "breast cancer", "lung cancer", "prostate cancer",
            "colorectal cancer", "ovarian cancer", "cervical cancer", "pancreatic cancer",
            "gastric cancer", "hepatocellular", "renal cell", "bladder cancer", "thyroid cancer",
            "glioblastoma", "brain tumor", "head and neck cancer", "esophageal cancer", "biopsy",
            "staging", "tnm", "oncologist", "tumor marker", "survival", "progression-free",
            "response rate", "remission",
        ],
    ),
    (
        Specialty::Pulmonology,
        &[
            "pulmonology", "pulmonary", "respiratory", "lung", "bronchial", "asthma", "copd",
            "chronic obstructive", "emphysema", "bronchitis", "pneumonia", "tuberculosis", "tb",
            "pleural", "pleurisy", "interstitial lung", "pulmonary fibrosis", "ipf",
            "sarcoidosis", "bronchiectasis", "cystic fibrosis", "pulmonary hypertension",
            "sleep apnea", "osa", "cpap", "ventilation", "ventilator", "spirometry", "fev1",
            "fvc", "bronchoscopy", "thoracoscopy", "oxygen therapy", "inhaler", "bronchodilator",
            "corticosteroid", "ards", "acute respiratory", "dyspnea", "wheezing",
        ],
    ),
    (
        Specialty::Neurology,
        &[
            "neurology", "neurological", "brain", "cerebral", "neural", "alzheimer", "dementia",
            "parkinson", "parkinsonian", "epilepsy", "seizure", "multiple sclerosis", "ms",
            "migraine", "headache", "neuropathy", "neuropathic", "peripheral nerve",
            "myasthenia", "als", "amyotrophic", "huntington", "dystonia", "tremor", "stroke",
            "ischemic stroke", "hemorrhagic stroke", "tia", "meningitis", "encephalitis",
            "guillain-barre", "mri brain", "eeg", "electroencephalogram", "lumbar puncture",
            "csf", "dopamine", "serotonin", "acetylcholine", "neurotransmitter",
        ],
    ),
    (
        Specialty::Nephrology,
        &[
            "nephrology", "renal", "kidney", "glomerular", "glomerulonephritis",
            "chronic kidney disease", "ckd", "acute kidney injury", "aki", "dialysis",
            "hemodialysis", "peritoneal dialysis", "kidney transplant", "proteinuria",
            "albuminuria", "hematuria", "creatinine", "gfr", "nephrotic syndrome", "nephritic",
            "polycystic kidney", "pkd", "uremia", "electrolyte", "sodium", "potassium",
            "phosphorus", "hyperkalemia", "hyponatremia", "acidosis", "alkalosis",
        ],
    ),
    (
        Specialty::Endocrinology,
        &[
            "endocrinology", "endocrine", "hormone", "hormonal", "diabetes", "diabetic",
            "insulin", "glucose", "glycemic", "hba1c", "a1c", "thyroid", "hypothyroidism",
            "hyperthyroidism", "graves", "hashimoto", "adrenal", "cushing", "addison",
            "cortisol", "aldosterone", "pituitary", "growth hormone", "prolactin", "acromegaly",
            "parathyroid", "calcium", "osteoporosis", "bone density", "testosterone", "estrogen",
            "menopause", "pcos", "polycystic ovary", "type 1 diabetes", "type 2 diabetes",
            "metabolic syndrome", "obesity",
        ],
    ),
    (
        Specialty::Rheumatology,
        &[
            "rheumatology", "rheumatic", "arthritis", "rheumatoid", "osteoarthritis", "lupus",
            "sle", "systemic lupus", "sjogren", "scleroderma", "vasculitis", "gout",
            "pseudogout", "ankylosing spondylitis", "psoriatic arthritis", "fibromyalgia",
            "polymyalgia", "myositis", "dermatomyositis", "polymyositis", "joint pain",
            "synovitis", "autoimmune", "biologic", "dmard", "methotrexate", "tnf inhibitor",
            "anti-inflammatory", "nsaid", "corticosteroid",
        ],
    ),
    (
        Specialty::InfectiousDisease,
        &[
            "infectious disease", "infection", "bacterial", "viral", "fungal", "antibiotic",
            "antimicrobial", "antiviral", "antifungal", "sepsis", "septic", "bacteremia", "hiv",
            "aids", "antiretroviral", "hepatitis b", "hepatitis c", "hbv", "hcv", "influenza",
            "covid", "coronavirus", "sars-cov-2", "pneumococcal", "staphylococcus",
            "streptococcus", "mrsa", "clostridium", "c diff", "tuberculosis", "malaria",
            "vaccination", "vaccine", "immunization", "prophylaxis", "sexually transmitted",
            "sti", "std", "uti", "urinary tract infection",
        ],
    ),
    (
        Specialty::Hematology,
        &[
            "hematology", "hematologic", "blood", "hemoglobin", "anemia", "thrombocytopenia",
            "platelet", "coagulation", "bleeding disorder", "hemophilia", "von willebrand",
            "thrombosis", "anticoagulation", "leukemia", "lymphoma", "myeloma",
            "myelodysplastic", "mds", "bone marrow", "stem cell transplant", "transfusion",
            "blood bank", "sickle cell", "thalassemia", "iron deficiency", "ferritin",
            "neutropenia", "pancytopenia", "polycythemia", "eosinophilia",
        ],
    ),
    (
        Specialty::Psychiatry,
        &[
            "psychiatry", "psychiatric", "mental health", "depression", "anxiety", "bipolar",
            "schizophrenia", "psychosis", "psychotic", "antipsychotic", "antidepressant", "ssri",
            "snri", "benzodiazepine", "mood disorder", "obsessive compulsive", "ocd", "ptsd",
            "post-traumatic", "panic", "phobia", "eating disorder", "anorexia", "bulimia",
            "adhd", "attention deficit", "autism", "cognitive behavioral", "cbt",
            "psychotherapy", "suicide", "suicidal", "self-harm", "addiction", "substance abuse",
            "alcoholism", "opioid", "withdrawal",
        ],
    ),
    (
        Specialty::Dermatology,
        &[
            "dermatology", "dermatologic", "skin", "cutaneous", "epidermis", "psoriasis",
            "eczema", "atopic dermatitis", "acne", "rosacea", "melanoma", "basal cell",
            "squamous cell", "skin cancer", "mole", "urticaria", "hives", "pruritus", "itching",
            "rash", "alopecia", "hair loss", "vitiligo", "hyperpigmentation", "wound healing",
            "burn", "ulcer", "pressure injury", "decubitus", "topical", "moisturizer",
            "retinoid", "phototherapy",
        ],
    ),
    (
        Specialty::Ophthalmology,
        &[
            "ophthalmology", "ophthalmic", "eye", "ocular", "vision", "glaucoma", "cataract",
            "macular degeneration", "amd", "retina", "diabetic retinopathy", "retinal",
            "vitreous", "cornea", "corneal", "uveitis", "conjunctivitis", "keratitis", "dry eye",
            "blepharitis", "intraocular pressure", "iop", "visual acuity", "blindness", "lasik",
            "phacoemulsification", "intravitreal", "anti-vegf",
        ],
    ),
    (
        Specialty::Orthopedics,
        &[
            "orthopedic", "orthopaedic", "musculoskeletal", "bone", "fracture",
            "joint replacement", "arthroplasty", "hip replacement", "knee replacement", "spine",
            "spinal", "vertebral", "disc herniation", "scoliosis", "tendon", "ligament", "acl",
            "meniscus", "rotator cuff", "carpal tunnel", "osteoporosis", "bone density", "dexa",
            "physical therapy", "rehabilitation", "prosthesis", "implant",
        ],
    ),
    (
        Specialty::Urology,
        &[
            "neurology", "neurological", "brain", "cerebral", "neural", "alzheimer", "dementia",
            "parkinson", "parkinsonian", "epilepsy", "seizure", "multiple sclerosis", "ms",
            "migraine", "headache", "neuropathy", "neuropathic", "peripheral nerve",
            "myasthenia", "als", "amyotrophic", "huntington", "dystonia", "tremor", "stroke",
            "ischemic stroke", "hemorrhagic stroke", "tia", "meningitis", "encephalitis",
            "guillain-barre", "mri brain", "eeg", "electroencephalogram", "lumbar puncture",
            "csf", "dopamine", "serotonin", "acetylcholine", "neurotransmitter",
        ],
    ),
    (
        Specialty::ObstetricsGynecology,
        &[
            "obstetrics", "gynecology", "obgyn", "pregnancy", "pregnant", "maternal", "fetal",
            "prenatal", "antenatal", "postnatal", "cesarean", "c-section", "vaginal delivery",
            "labor", "preterm", "preeclampsia", "gestational diabetes", "placenta",
            "miscarriage", "fertility", "ivf", "in vitro", "ovulation", "endometriosis",
            "uterine", "ovarian", "cervical", "pap smear", "hysterectomy", "menstrual",
            "menopause", "hormone replacement", "contraception",
        ],
    ),
    (
        Specialty::Pediatrics,
        &[
            "pediatric", "paediatric", "child", "children", "infant", "neonatal", "neonate",
            "newborn", "adolescent", "childhood", "juvenile", "developmental", "growth",
            "vaccination", "immunization", "congenital", "genetic", "inherited",
            "pediatric cancer", "nicu", "preterm infant", "low birth weight",
            "failure to thrive",
        ],
    ),
    (
        Specialty::Geriatrics,
        &[
            "geriatric", "elderly", "older adult", "aging", "ageing", "frailty", "sarcopenia",
            "falls", "fall prevention", "polypharmacy", "nursing home", "long-term care",
            "dementia", "alzheimer", "end of life", "palliative", "hospice",
            "functional decline",
        ],
    ),
    (
        Specialty::EmergencyMedicine,
        &[
            "emergency medicine", "emergency department", "ed", "trauma", "resuscitation", "cpr",
            "cardiac arrest", "critical care", "intensive care", "icu", "acute care", "triage",
            "sepsis", "shock", "hemorrhage", "poisoning", "overdose", "intubation",
        ],
    ),
    (
        Specialty::Anesthesiology,
        &[
            "anesthesia", "anaesthesia", "anesthesiology", "anesthetic", "sedation",
            "general anesthesia", "regional anesthesia", "epidural", "spinal anesthesia",
            "nerve block", "pain management", "postoperative", "intraoperative", "propofol",
            "fentanyl", "neuromuscular block",
        ],
    ),
    (
        Specialty::Radiology,
        &[
            "radiology", "radiologic", "imaging", "ct scan", "computed tomography", "mri",
            "magnetic resonance", "ultrasound", "x-ray", "pet scan", "interventional radiology",
            "angiography", "mammography", "fluoroscopy", "contrast", "gadolinium",
            "radiation dose", "image-guided",
        ],
    ),
    (
        Specialty::AllergyImmunology,
        &[
            "allergy", "allergic", "immunology", "immune", "immunodeficiency", "anaphylaxis",
            "hypersensitivity", "food allergy", "drug allergy", "allergic rhinitis", "hay fever",
            "asthma", "immunotherapy", "desensitization", "ige", "histamine", "antihistamine",
            "epinephrine",
        ],
    ),
    (
        Specialty::PainMedicine,
        &[
            "pain medicine", "chronic pain", "pain management", "analgesic", "opioid",
            "non-opioid", "neuropathic pain", "nociceptive", "back pain", "neck pain",
            "fibromyalgia", "complex regional", "nerve block", "epidural steroid",
            "spinal cord stimulation",
        ],
    ),
    (
        Specialty::PhysicalMedicineRehabilitation,
        &[
            "physical medicine", "rehabilitation", "physiatry", "pmr", "physical therapy",
            "occupational therapy", "speech therapy", "stroke rehabilitation",
            "spinal cord injury", "traumatic brain", "amputation", "prosthetics", "orthotics",
            "gait training",
        ],
    ),
];

/// Branding fragments matched as substrings of the lowercased journal name.
pub static JOURNAL_KEYWORDS: &TermTable = &[
    (Specialty::Cardiology, &["cardio", "heart", "circulation", "hypertension", "stroke"]),
    (Specialty::Gastroenterology, &["gastro", "hepat", "digest", "gut", "bowel", "liver"]),
    (Specialty::Oncology, &["cancer", "oncol", "tumor", "neoplasm", "leukemia", "lymphoma"]),
    (Specialty::Pulmonology, &["pulmon", "respir", "lung", "chest", "thorax"]),
    (Specialty::Neurology, &["neuro", "brain", "epilep", "alzheimer"]),
    (Specialty::Nephrology, &["nephro", "kidney", "renal", "dialysis"]),
    (Specialty::Endocrinology, &["endocrin", "diabet", "thyroid", "hormone", "metabol"]),
    (Specialty::Rheumatology, &["rheumat", "arthritis", "lupus"]),
    (Specialty::InfectiousDisease, &["infect", "antimicrob", "virus", "hiv", "aids"]),
    (Specialty::Hematology, &["hematol", "blood", "transfus", "thromb"]),
    (Specialty::Psychiatry, &["psychiatr", "psychol", "mental health", "depression"]),
    (Specialty::Dermatology, &["dermatol", "skin", "cutaneous"]),
    (Specialty::Ophthalmology, &["ophthalm", "eye", "vision", "retina"]),
    (Specialty::Orthopedics, &["orthop", "bone", "joint", "spine", "musculoskel"]),
    (Specialty::Urology, &["urol", "bladder", "prostate"]),
    (Specialty::ObstetricsGynecology, &["obstet", "gynec", "fertil", "reprod"]),
    (Specialty::Pediatrics, &["pediatr", "paediatr", "child", "neonat"]),
    (Specialty::Geriatrics, &["geriatr", "aging", "gerontol"]),
    (Specialty::EmergencyMedicine, &["emerg", "trauma", "critical care", "intensive care"]),
    (Specialty::Anesthesiology, &["anesthes", "anaesthes", "pain"]),
    (Specialty::Radiology, &["radiol", "imaging"]),
    (Specialty::AllergyImmunology, &["allerg", "immunol"]),
    (Specialty::PainMedicine, &["pain"]),
    (Specialty::PhysicalMedicineRehabilitation, &["rehabil", "physiatr", "physical med"]),
];

/// Administrative and study-design MeSH headings that say nothing about the
/// clinical area. Age-group headings such as Child and Infant are kept.
pub static MESH_IGNORE: &[&str] = &[
    "Humans",
    "Male",
    "Female",
    "Animals",
    "Adult",
    "Young Adult",
    "Middle Aged",
    "Aged",
    "Aged, 80 and over",
    "Randomized Controlled Trials as Topic",
    "Treatment Outcome",
    "Double-Blind Method",
    "Single-Blind Method",
    "Follow-Up Studies",
    "Prospective Studies",
    "Retrospective Studies",
    "Time Factors",
    "Surveys and Questionnaires",
    "Placebos",
    "Cross-Over Studies",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_scored_specialty_has_terms_and_journal_keywords() {
        let with_terms: HashSet<Specialty> = SPECIALTY_TERMS.iter().map(|(s, _)| *s).collect();
        let with_journals: HashSet<Specialty> = JOURNAL_KEYWORDS.iter().map(|(s, _)| *s).collect();
        for specialty in Specialty::SCORED {
            assert!(with_terms.contains(&specialty), "{specialty}");
            assert!(with_journals.contains(&specialty), "{specialty}");
        }
        assert_eq!(SPECIALTY_TERMS.len(), Specialty::SCORED.len());
    }

    #[test]
    fn tables_follow_specialty_order() {
        let order: Vec<Specialty> = SPECIALTY_TERMS.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, Specialty::SCORED.to_vec());
    }

    #[test]
    fn terms_are_lowercase() {
        for (_, terms) in SPECIALTY_TERMS.iter().chain(JOURNAL_KEYWORDS.iter()) {
            for term in *terms {
                assert_eq!(*term, term.to_lowercase());
            }
        }
    }
}
