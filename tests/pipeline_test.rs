use anyhow::Result;
use institution_pipeline::app::IngestUseCase;
use institution_pipeline::domain::{EligibilityCriterion, InstitutionType};
use institution_pipeline::error::{ConversionError, RecordError};
use institution_pipeline::generator::Generator;
use institution_pipeline::infra::NdjsonStorage;
use institution_pipeline::pipeline::processing::migrate::migrate_batch;
use institution_pipeline::pipeline::{dedupe_gate, NormalizeConfig, ScoreMode};
use institution_pipeline::ranking::{top_list, DEFAULT_TOP_LIMIT};
use institution_pipeline::storage::Storage;
use serde_json::Value;
use std::sync::Arc;
use tempfile::tempdir;

fn legacy_batch() -> Vec<Value> {
    serde_json::from_str(include_str!("resources/legacy_institutions.json")).unwrap()
}

#[tokio::test]
async fn test_mixed_origin_batch_is_stored_once_per_name() -> Result<()> {
    let temp_dir = tempdir()?;
    let storage = Arc::new(NdjsonStorage::new(temp_dir.path().join("institutions.ndjson"))?);
    let use_case = IngestUseCase::with_default_normalizer(NormalizeConfig::default(), storage.clone());

    let report = use_case.process_batch(&legacy_batch()).await;

    assert_eq!(report.total_records, 5);
    assert_eq!(report.stored_count(), 3);
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].index, 2);
    assert_eq!(report.duplicates[0].name, "Siksha O Anusandhan University");

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 3);
    assert_eq!(report.failures[0].identifier, "Kapoor Group University");
    assert_eq!(
        report.failures[0].error,
        RecordError::Conversion(ConversionError::UnsupportedShape { found: "string" })
    );

    let stored = storage.list().await?;
    let names: Vec<&str> = stored.iter().map(|doc| doc.record.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Siksha O Anusandhan University",
            "Patel Technologies University",
            "Malhotra Institute University"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_stored_documents_are_canonical() -> Result<()> {
    let temp_dir = tempdir()?;
    let storage = Arc::new(NdjsonStorage::new(temp_dir.path().join("institutions.ndjson"))?);
    let use_case = IngestUseCase::with_default_normalizer(NormalizeConfig::default(), storage.clone());
    let report = use_case.process_batch(&legacy_batch()).await;

    // Legacy mapping converted in document order; stale score replaced
    let soa = storage.get(report.stored[0].id).await?.unwrap();
    assert_eq!(
        soa.record.eligibility_criteria,
        vec![
            EligibilityCriterion::new("BTech", "10+2 with PCM"),
            EligibilityCriterion::new("MBA", "Graduation with any stream"),
        ]
    );
    assert_eq!(soa.record.score, 2004.0);
    assert_eq!(soa.record.established_year, 1996);
    assert_eq!(soa.record.total_students, 19000);

    // Generator pair keys
    let patel = &report.stored[1].record;
    assert_eq!(patel.eligibility_criteria[1], EligibilityCriterion::new("MSc", "BSc in relevant field"));
    assert_eq!(patel.score, 1007.0);

    // Manual-entry shape: eligibility from courses, fees from `fee`, templated admission text
    let malhotra = &report.stored[2].record;
    assert_eq!(malhotra.kind, InstitutionType::DeemedUniversity);
    assert_eq!(malhotra.location.pincode, "302017");
    assert_eq!(malhotra.courses_offered[0].annual_fees, 90000.0);
    assert_eq!(malhotra.eligibility_criteria[0], EligibilityCriterion::new("BBA", "10+2 with any stream"));
    assert!(malhotra.admission_process.contains("(MAT, CAT)"));
    assert_eq!(malhotra.score, 1002.0);
    Ok(())
}

#[tokio::test]
async fn test_true_division_keeps_fractional_placement_term() -> Result<()> {
    let temp_dir = tempdir()?;
    let storage = Arc::new(NdjsonStorage::new(temp_dir.path().join("institutions.ndjson"))?);
    let config = NormalizeConfig {
        score_mode: ScoreMode::TrueDivision,
        ..NormalizeConfig::default()
    };
    let use_case = IngestUseCase::with_default_normalizer(config, storage);
    let report = use_case.process_batch(&legacy_batch()).await;

    assert_eq!(report.stored[0].record.score, 2004.5);
    assert!((report.stored[2].record.score - 1002.7).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_migration_rewrites_only_legacy_mappings() {
    let mut documents = legacy_batch();
    let untouched_pairs = documents[1]["eligibility_criteria"].clone();

    let report = migrate_batch(&mut documents);

    assert_eq!(report.converted, 2);
    assert_eq!(report.untouched, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, 3);

    assert_eq!(documents[0]["eligibility_criteria"][1]["name"], "MBA");
    assert_eq!(documents[0]["eligibility_criteria"][1]["required"], "Graduation with any stream");
    assert_eq!(documents[1]["eligibility_criteria"], untouched_pairs);
    assert_eq!(documents[3]["eligibility_criteria"], "Graduation with any stream");
    assert!(documents[4].get("eligibility_criteria").is_none());
}

#[test]
fn test_dedupe_gate_over_raw_batch() {
    let outcome = dedupe_gate(legacy_batch());
    assert_eq!(outcome.kept.len(), 4);
    assert_eq!(outcome.duplicates.len(), 1);
    assert_eq!(outcome.duplicates[0].index, 2);
}

#[tokio::test]
async fn test_generated_batch_ingests_and_ranks() -> Result<()> {
    let temp_dir = tempdir()?;
    let storage = Arc::new(NdjsonStorage::new(temp_dir.path().join("generated.ndjson"))?);
    let use_case = IngestUseCase::with_default_normalizer(NormalizeConfig::default(), storage.clone());

    let raws = Generator::new(Some(2024)).generate_batch(30);
    let report = use_case.process_batch(&raws).await;

    assert!(report.failures.is_empty());
    assert_eq!(report.stored_count() + report.duplicates.len(), 30);

    let records: Vec<_> = storage.list().await?.into_iter().map(|doc| doc.record).collect();
    let top = top_list(&records, None, None, DEFAULT_TOP_LIMIT);
    assert_eq!(top.len(), DEFAULT_TOP_LIMIT);
    assert!(top.windows(2).all(|pair| pair[0].score >= pair[1].score));
    let best = records.iter().map(|r| r.score).fold(f64::MIN, f64::max);
    assert_eq!(top[0].score, best);
    Ok(())
}
