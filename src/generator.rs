use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::constants::{
    ACCREDITATIONS, CITIES, COURSE_ELIGIBILITY, DISCIPLINES, DOCUMENT_TYPES, ENTRANCE_EXAMS,
    GENERATED_INSTITUTION_TYPES, INSTITUTION_IMAGES, NAME_STEMS, NAME_SUFFIXES, RECRUITERS, STATES, STREETS,
};

/// Produces raw institution records in the generator's output shape
/// (`course`/`eligibility` pairs, no score).
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// A seeded generator repeats its output exactly; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn generate_batch(&mut self, count: usize) -> Vec<Value> {
        (0..count).map(|_| self.generate()).collect()
    }

    pub fn generate(&mut self) -> Value {
        let stem = self.pick(NAME_STEMS);
        let suffix = self.pick(NAME_SUFFIXES);
        let name = format!("{stem} {suffix} University");
        let city = self.pick(CITIES);

        let admission_exams = self.sample(ENTRANCE_EXAMS, 2, 3).join("/");
        let admission_process = format!(
            "The admission process at {name} is merit-based and considers the following criteria:\n\n\
             - Academic performance in 10+2 or equivalent examination\n\
             - Valid entrance examination scores ({admission_exams})\n\
             - Counselling and seat allocation process\n\
             - Document verification and fee payment\n"
        );

        let course_count = self.rng.gen_range(3..=6);
        let taught: Vec<(&str, &str)> = COURSE_ELIGIBILITY
            .choose_multiple(&mut self.rng, course_count)
            .copied()
            .collect();
        let courses: Vec<Value> = taught
            .iter()
            .map(|(course, _)| {
                json!({
                    "name": course,
                    "duration": self.rng.gen_range(4..=5),
                    "annual_fees": self.rng.gen_range(25_000..=35_000),
                })
            })
            .collect();
        let eligibility: Vec<Value> = taught
            .iter()
            .map(|(course, required)| json!({"course": course, "eligibility": required}))
            .collect();

        let domain = format!("{}{}", stem.to_lowercase(), suffix.split_whitespace().next().unwrap_or("").to_lowercase());

        json!({
            "name": name,
            "type": self.pick(GENERATED_INSTITUTION_TYPES),
            "location": {
                "city": city,
                "state": self.pick(STATES),
                "country": "India",
                "pincode": self.rng.gen_range(100_000..=999_999).to_string(),
            },
            "established_year": self.rng.gen_range(1950..=2023),
            "accreditation": self.pick(ACCREDITATIONS),
            "total_students": self.rng.gen_range(1000..=20_000),
            "admission_process": admission_process,
            "required_documents": self.sample(DOCUMENT_TYPES, 4, 7),
            "contact_info": {
                "email": format!("admissions@{domain}.edu.in"),
                "phone": format!("+91 {}", self.rng.gen_range(7_000_000_000_u64..=9_999_999_999)),
                "address": format!("{}, {} Road, {city}", self.rng.gen_range(1..=250), self.pick(STREETS)),
                "website": format!("https://www.{domain}.edu.in"),
            },
            "courses_offered": courses,
            "eligibility_criteria": eligibility,
            "acceptance_exams": self.sample(ENTRANCE_EXAMS, 2, 4),
            "top_recruiters": self.sample(RECRUITERS, 6, 6),
            "placements": {
                "average_salary": one_decimal(self.rng.gen_range(3.0..10.0)),
                "highest_salary": one_decimal(self.rng.gen_range(15.0..50.0)),
                "placement_rate": self.rng.gen_range(70..=95),
            },
            "image_url": self.pick(INSTITUTION_IMAGES),
            "rating": one_decimal(self.rng.gen_range(1.0..5.0)),
            "field_taught": self.sample(DISCIPLINES, 1, 3),
        })
    }

    fn pick(&mut self, values: &[&'static str]) -> &'static str {
        values.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// Between `min` and `max` distinct values, in random order.
    fn sample(&mut self, values: &[&'static str], min: usize, max: usize) -> Vec<&'static str> {
        let count = self.rng.gen_range(min..=max);
        values.choose_multiple(&mut self.rng, count).copied().collect()
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
