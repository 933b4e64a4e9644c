use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use zh_tax_core::calculations::{
    OptionalContext, automatic_deductions, compare_scenarios, insurance_deduction,
    validate_optional_deduction,
};
use zh_tax_core::{DeductionLedger, OptionalDeductionKind, TaxpayerProfile};
use zh_tax_data::tables_for_year;

/// Estimate Zürich income, wealth and church taxes for one household.
///
/// Reads a JSON file with the taxpayer profile and the proof-required
/// deduction claims, validates every claim against the statutory limits,
/// and prints the three-scenario comparison (no deductions / automatic
/// only / everything) as JSON.
#[derive(Parser, Debug)]
#[command(name = "zh-tax-estimate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON input file
    #[arg(short, long)]
    file: PathBuf,

    /// Tax year to assess
    #[arg(short, long, default_value_t = 2024)]
    year: i32,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

/// Proof-required claims accompanying the profile. All amounts default to
/// zero; a zero claim is simply not made.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OptionalClaims {
    insurance_premiums: Decimal,
    premium_subsidies: Decimal,
    investment_income: Decimal,
    pillar_3a: Decimal,
    pillar_2_buyins: Decimal,
    mortgage_interest: Decimal,
    other_debt_interest: Decimal,
    medical_costs: Decimal,
    childcare_costs: Decimal,
    donations: Decimal,
    political_contributions: Decimal,
    alimony_payments: Decimal,
    support_payments: Decimal,
}

#[derive(Debug, Deserialize)]
struct EstimateInput {
    profile: TaxpayerProfile,
    #[serde(default)]
    claims: OptionalClaims,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;
    let input: EstimateInput = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse JSON: {}", args.file.display()))?;

    let tables = tables_for_year(args.year)?;

    let mut ledger = automatic_deductions(&input.profile, &tables.limits);
    ledger.insurance_premiums = insurance_deduction(
        input.claims.insurance_premiums,
        input.claims.premium_subsidies,
        &input.profile,
        &tables.limits,
    );
    apply_claims(&mut ledger, &input, &tables.limits);

    let comparison = compare_scenarios(&input.profile, &ledger, &tables)
        .context("Failed to compute the scenario comparison")?;

    let json = if args.compact {
        serde_json::to_string(&comparison)?
    } else {
        serde_json::to_string_pretty(&comparison)?
    };
    println!("{json}");

    Ok(())
}

/// Runs every non-zero claim through validation and records the allowed
/// amount. Capped or ineligible claims are surfaced as warnings, never
/// silently dropped.
fn apply_claims(
    ledger: &mut DeductionLedger,
    input: &EstimateInput,
    limits: &zh_tax_core::DeductionLimits,
) {
    let ctx = OptionalContext {
        gross_income: input.profile.combined_net_salary(),
        investment_income: input.claims.investment_income,
        employment_override: None,
    };

    let claims = [
        (OptionalDeductionKind::Pillar3a, input.claims.pillar_3a),
        (OptionalDeductionKind::Pillar2Buyin, input.claims.pillar_2_buyins),
        (OptionalDeductionKind::MortgageInterest, input.claims.mortgage_interest),
        (OptionalDeductionKind::OtherDebtInterest, input.claims.other_debt_interest),
        (OptionalDeductionKind::MedicalCosts, input.claims.medical_costs),
        (OptionalDeductionKind::ChildcareCosts, input.claims.childcare_costs),
        (OptionalDeductionKind::Donations, input.claims.donations),
        (OptionalDeductionKind::PoliticalContributions, input.claims.political_contributions),
        (OptionalDeductionKind::AlimonyPayments, input.claims.alimony_payments),
        (OptionalDeductionKind::SupportPayments, input.claims.support_payments),
    ];

    for (kind, amount) in claims {
        if amount == Decimal::ZERO {
            continue;
        }
        let check = validate_optional_deduction(kind, amount, &input.profile, &ctx, limits);
        if let Some(message) = &check.message {
            warn!(?kind, claimed = %amount, allowed = %check.allowed, "{message}");
        }
        let slot = match kind {
            OptionalDeductionKind::Pillar3a => &mut ledger.pillar_3a,
            OptionalDeductionKind::Pillar2Buyin => &mut ledger.pillar_2_buyins,
            OptionalDeductionKind::MortgageInterest => &mut ledger.mortgage_interest,
            OptionalDeductionKind::OtherDebtInterest => &mut ledger.other_debt_interest,
            OptionalDeductionKind::MedicalCosts => &mut ledger.medical_costs_deductible,
            OptionalDeductionKind::ChildcareCosts => &mut ledger.childcare_costs,
            OptionalDeductionKind::Donations => &mut ledger.donations,
            OptionalDeductionKind::PoliticalContributions => &mut ledger.political_contributions,
            OptionalDeductionKind::AlimonyPayments => &mut ledger.alimony_payments,
            OptionalDeductionKind::SupportPayments => &mut ledger.support_payments,
        };
        *slot = check.allowed;
    }
}
