//! Rate the sample inputs shipped in demos/

use chrono::NaiveDate;
use rcd_rating::declaration::{load_declaration, load_declarations};
use rcd_rating::rating::RefusalReason;
use rcd_rating::{PricingConfig, QuoteRunner, ReferenceTables};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[test]
fn test_quarterly_demo_quote() {
    let declaration = load_declaration("demos/quote_quarterly.json").expect("Failed to load demo quote");
    let config = PricingConfig::from_json_path("demos/pricing_config.json").expect("Failed to load config");
    let tables = ReferenceTables::from_csv().expect("Failed to load tables");
    let runner = QuoteRunner::with_parts(tables, config);

    let result = runner.rate_as_of(&declaration, as_of()).unwrap();

    assert!(!result.is_refused());
    assert_eq!(result.rated_turnover, 420_000.0);
    assert_eq!(result.instalments.len(), 4);
    // Elite Insurance is on the defaulting list
    let retro = result.retroactive.as_ref().expect("retroactive cover expected");
    assert_eq!(retro.prior_coverage_end, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
    assert!(retro.gap_days > 0);
}

#[test]
fn test_batch_demo() {
    let declarations = load_declarations("demos/batch.json").expect("Failed to load demo batch");
    let runner = QuoteRunner::new();

    let results = runner.rate_batch_as_of(&declarations, as_of());
    assert_eq!(results.len(), 3);

    let small = results[0].as_ref().unwrap();
    assert_eq!(small.rated_turnover, 70_000.0);
    assert_eq!(small.instalments.len(), 12);

    let large = results[1].as_ref().unwrap();
    assert_eq!(large.costs.tax_rate, 0.045);
    assert!(large.activity_lines.iter().all(|l| l.applied_rate < l.base_rate));

    let refused = results[2].as_ref().unwrap();
    assert_eq!(refused.eligibility.reason, Some(RefusalReason::InsufficientExperience));
}
