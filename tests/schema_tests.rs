use institution_pipeline::generator::Generator;
use institution_pipeline::pipeline::{normalize, NormalizeConfig};
use institution_pipeline::storage::StoredInstitution;
use jsonschema::JSONSchema;
use serde_json::{json, Value};

fn compiled_schema() -> JSONSchema {
    let schema = include_str!("../schemas/institution.v1.json");
    let schema_json: Value = serde_json::from_str(schema).unwrap();
    let schema_static: &'static Value = Box::leak(Box::new(schema_json));
    JSONSchema::options().compile(schema_static).unwrap()
}

fn stored_document(seed: u64) -> Value {
    let raw = Generator::new(Some(seed)).generate();
    let record = normalize(&raw, &NormalizeConfig::default()).unwrap();
    serde_json::to_value(StoredInstitution::new(record)).unwrap()
}

#[test]
fn stored_documents_are_valid() {
    let compiled = compiled_schema();
    for seed in 0..20 {
        let document = stored_document(seed);
        assert!(compiled.is_valid(&document), "seed {seed} produced an invalid document");
    }
}

#[test]
fn eligibility_mapping_is_rejected() {
    let compiled = compiled_schema();
    let mut document = stored_document(3);
    document["eligibility_criteria"] = json!({"BTech": "10+2 with PCM"});
    assert!(!compiled.is_valid(&document), "eligibility must be a pair sequence");
}

#[test]
fn generator_pair_keys_are_rejected() {
    let compiled = compiled_schema();
    let mut document = stored_document(4);
    document["eligibility_criteria"] = json!([{"course": "BTech", "eligibility": "10+2 with PCM"}]);
    assert!(!compiled.is_valid(&document));
}

#[test]
fn out_of_range_rating_is_rejected() {
    let compiled = compiled_schema();
    let mut document = stored_document(5);
    document["rating"] = json!(5.7);
    assert!(!compiled.is_valid(&document));
}

#[test]
fn documents_need_store_identifiers() {
    let compiled = compiled_schema();
    let mut document = stored_document(6);
    document.as_object_mut().unwrap().remove("_id");
    assert!(!compiled.is_valid(&document));
}
