use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ExtractConfig;
use crate::constants::NOT_FOUND;
use crate::error::{PipelineError, Result};

/// Raw text pulled from a saved institution page.
///
/// Values are exactly what the page shows; reconciling them into a raw record
/// is a manual step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedInstitution {
    pub institution_type: String,
    pub entrance_exams: String,
    pub official_website: String,
    pub admission_process: String,
    pub required_documents: String,
    pub course_fee_structure: String,
    pub placements: ScrapedPlacements,
    pub top_recruiters: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPlacements {
    pub average_salary: String,
    pub highest_salary: String,
    pub placement_rate: String,
}

impl ScrapedInstitution {
    /// Fields that fell back to the "Not found" sentinel.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("institution_type", &self.institution_type),
            ("entrance_exams", &self.entrance_exams),
            ("official_website", &self.official_website),
            ("admission_process", &self.admission_process),
            ("required_documents", &self.required_documents),
            ("course_fee_structure", &self.course_fee_structure),
            ("placements.average_salary", &self.placements.average_salary),
            ("placements.highest_salary", &self.placements.highest_salary),
            ("placements.placement_rate", &self.placements.placement_rate),
            ("top_recruiters", &self.top_recruiters),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_str() == NOT_FOUND)
        .map(|(field, _)| field)
        .collect()
    }
}

/// Compiled selectors for one page layout
pub struct Extractor {
    institution_type: Selector,
    entrance_exams: Selector,
    official_website: Selector,
    admission_process: Selector,
    required_documents: Selector,
    course_fee_structure: Selector,
    average_salary: Selector,
    highest_salary: Selector,
    placement_rate: Selector,
    top_recruiters: Selector,
}

fn compile(field: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| PipelineError::Selector {
        field,
        message: format!("{css:?}: {e:?}"),
    })
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            institution_type: compile("institution_type", &config.institution_type)?,
            entrance_exams: compile("entrance_exams", &config.entrance_exams)?,
            official_website: compile("official_website", &config.official_website)?,
            admission_process: compile("admission_process", &config.admission_process)?,
            required_documents: compile("required_documents", &config.required_documents)?,
            course_fee_structure: compile("course_fee_structure", &config.course_fee_structure)?,
            average_salary: compile("average_salary", &config.average_salary)?,
            highest_salary: compile("highest_salary", &config.highest_salary)?,
            placement_rate: compile("placement_rate", &config.placement_rate)?,
            top_recruiters: compile("top_recruiters", &config.top_recruiters)?,
        })
    }

    pub fn extract(&self, html: &str) -> ScrapedInstitution {
        let document = Html::parse_document(html);

        let scraped = ScrapedInstitution {
            institution_type: text_of(&document, &self.institution_type),
            entrance_exams: text_of(&document, &self.entrance_exams),
            official_website: document
                .select(&self.official_website)
                .next()
                .and_then(|el| el.value().attr("href"))
                .map(|href| href.trim().to_string())
                .filter(|href| !href.is_empty())
                .unwrap_or_else(|| NOT_FOUND.to_string()),
            admission_process: text_of(&document, &self.admission_process),
            required_documents: text_of(&document, &self.required_documents),
            course_fee_structure: text_of(&document, &self.course_fee_structure),
            placements: ScrapedPlacements {
                average_salary: text_of(&document, &self.average_salary),
                highest_salary: text_of(&document, &self.highest_salary),
                placement_rate: text_of(&document, &self.placement_rate),
            },
            top_recruiters: text_of(&document, &self.top_recruiters),
        };
        debug!("Extracted page, missing fields: {:?}", scraped.missing_fields());
        scraped
    }
}

/// Trimmed text of the first match, or the sentinel.
fn text_of(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|el: ElementRef<'_>| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}
