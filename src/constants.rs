/// Fixed value sets and defaults shared by the generator, extractor and CLI.

// Paths
pub const CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_STORE_PATH: &str = "output/institutions.ndjson";
pub const STORE_PATH_ENV: &str = "INSTITUTION_STORE";

/// Value the scraping collaborator reports for a field it could not extract.
pub const NOT_FOUND: &str = "Not found";

/// Earliest plausible founding year for an institution.
pub const MIN_ESTABLISHED_YEAR: i32 = 1800;

pub const MAX_RATING: f64 = 5.0;
pub const MAX_PLACEMENT_RATE: f64 = 100.0;

// Synthetic generator value sets
pub const GENERATED_INSTITUTION_TYPES: &[&str] = &["Private", "Government", "Public-Private Partnership"];

pub const ENTRANCE_EXAMS: &[&str] = &[
    "JEE Main", "NEET", "CAT", "MAT", "GATE", "CLAT", "SAAT", "BITSAT", "VITEEE", "CET",
];

pub const DOCUMENT_TYPES: &[&str] = &[
    "10th Marksheet",
    "12th Marksheet",
    "Entrance Exam Scorecard",
    "Identity Proof (Aadhaar/Passport)",
    "Caste Certificate (if applicable)",
    "Domicile Certificate",
    "Passport-size Photos",
    "Transfer Certificate",
];

/// Course name and the eligibility text the generator attaches to it.
pub const COURSE_ELIGIBILITY: &[(&str, &str)] = &[
    ("BTech", "10+2 with PCM"),
    ("MBA", "Graduation with any stream"),
    ("MBBS", "10+2 with PCB"),
    ("BBA", "10+2 with any stream"),
    ("BCA", "10+2 with any stream"),
    ("MTech", "BTech in relevant field"),
    ("LLB", "Graduation with any stream"),
    ("BSc", "10+2 with PCM/PCB"),
    ("MSc", "BSc in relevant field"),
    ("BCom", "10+2 with any stream"),
];

pub const RECRUITERS: &[&str] = &[
    "TCS", "Infosys", "Wipro", "Accenture", "Cognizant", "HCL", "Amazon", "Microsoft", "Deloitte", "IBM",
    "Capgemini", "Adani", "Reliance", "Tata Motors", "L&T",
];

pub const DISCIPLINES: &[&str] = &["engineering", "management", "medical", "commerce", "arts", "science"];

pub const ACCREDITATIONS: &[&str] = &["NAAC A+", "NAAC A", "NBA Accredited", "UGC Approved", "AICTE Approved"];

pub const CITIES: &[&str] = &[
    "Delhi", "Mumbai", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune", "Ahmedabad", "Jaipur", "Lucknow",
];

pub const STATES: &[&str] = &[
    "Delhi", "Maharashtra", "Karnataka", "Tamil Nadu", "West Bengal", "Telangana", "Gujarat", "Rajasthan",
    "Uttar Pradesh",
];

pub const INSTITUTION_IMAGES: &[&str] = &[
    "https://images.pexels.com/photos/256381/pexels-photo-256381.jpeg",
    "https://images.pexels.com/photos/3825586/pexels-photo-3825586.jpeg",
    "https://images.pexels.com/photos/5669619/pexels-photo-5669619.jpeg",
    "https://images.pexels.com/photos/3845807/pexels-photo-3845807.jpeg",
];

pub const NAME_STEMS: &[&str] = &[
    "Sharma", "Patel", "Reddy", "Iyer", "Gupta", "Mehta", "Kapoor", "Rao", "Nair", "Bose", "Chatterjee", "Malhotra",
    "Joshi", "Banerjee", "Kulkarni",
];

pub const NAME_SUFFIXES: &[&str] = &["Technologies", "Institute", "Group", "Industries", "Enterprises", "and Sons"];

pub const STREETS: &[&str] = &["MG", "Station", "Ring", "Temple", "Lake", "College", "Market"];
