//! End-to-end ledger scenarios against in-memory SQLite.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use trackmystartup_core::equity::HolderKind;
use trackmystartup_core::events::EventBus;
use trackmystartup_core::founders::{FounderService, NewFounder};
use trackmystartup_core::investments::{
    InvestmentRoundType, InvestmentService, InvestorType, NewInvestment,
};
use trackmystartup_core::recognition::{FeeType, NewRecognition, RecognitionService};
use trackmystartup_core::startups::{NewStartup, StartupService};
use trackmystartup_storage_sqlite::{
    create_pool, ledger, FounderRepository, InvestmentRepository, RecognitionRepository,
    StartupRepository,
};

struct Harness {
    startups: StartupService,
    founders: FounderService,
    investments: InvestmentService,
    recognition: RecognitionService,
}

fn harness() -> Harness {
    let pool = create_pool(":memory:").unwrap();
    let events = Arc::new(EventBus::new());
    let ledger = ledger(&pool);

    let founder_repo = Arc::new(FounderRepository::new(pool.clone()));
    let investment_repo = Arc::new(InvestmentRepository::new(pool.clone()));
    let recognition_repo = Arc::new(RecognitionRepository::new(pool.clone()));
    let startup_repo = Arc::new(StartupRepository::new(pool.clone()));

    Harness {
        startups: StartupService::new(ledger.clone(), startup_repo.clone(), events.clone()),
        founders: FounderService::new(
            ledger.clone(),
            founder_repo,
            startup_repo.clone(),
            events.clone(),
        ),
        investments: InvestmentService::new(
            ledger.clone(),
            investment_repo,
            startup_repo.clone(),
            events.clone(),
        ),
        recognition: RecognitionService::new(ledger, recognition_repo, startup_repo, events),
    }
}

fn register_startup(h: &Harness) -> String {
    h.startups
        .create_startup(NewStartup {
            name: "Acme Robotics".to_string(),
            sector: Some("robotics".to_string()),
            current_valuation: None,
            total_revenue: None,
        })
        .unwrap()
        .id
}

fn founder(name: &str, shares: i64) -> NewFounder {
    NewFounder {
        name: name.to_string(),
        email: format!("{}@acme.example", name.to_lowercase()),
        shares: Some(shares),
        equity_percentage: None,
    }
}

fn seed_founders(h: &Harness, startup_id: &str) {
    h.founders
        .save_founders(
            startup_id,
            vec![
                founder("Ada", 600_000),
                founder("Grace", 300_000),
                founder("Edith", 100_000),
            ],
        )
        .unwrap();
}

fn investment(shares: i64, price: Decimal) -> NewInvestment {
    NewInvestment {
        date: NaiveDate::from_ymd_opt(2025, 3, 1),
        investor_name: "Seed Fund".to_string(),
        investor_code: Some("SF-1".to_string()),
        investor_type: Some(InvestorType::VcFirm),
        round_type: Some(InvestmentRoundType::Equity),
        shares,
        price_per_share: price,
        pre_money_valuation: None,
        proof_document: None,
    }
}

fn equity_pct(h: &Harness, startup_id: &str, holder: &str) -> Decimal {
    h.startups
        .cap_table(startup_id)
        .unwrap()
        .into_iter()
        .find(|e| e.holder == holder)
        .unwrap()
        .equity_percentage
}

#[test]
fn three_founders_split_sixty_thirty_ten() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);

    let shares = h.startups.get_shares_data(&startup_id).unwrap();
    assert_eq!(shares.total_shares, 1_000_000);
    assert_eq!(shares.price_per_share, Decimal::ZERO);

    assert_eq!(equity_pct(&h, &startup_id, "Ada"), dec!(60));
    assert_eq!(equity_pct(&h, &startup_id, "Grace"), dec!(30));
    assert_eq!(equity_pct(&h, &startup_id, "Edith"), dec!(10));
}

#[test]
fn a_seed_round_dilutes_the_founders() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);

    let record = h
        .investments
        .add_investment(&startup_id, investment(111_111, dec!(1.80)))
        .unwrap();
    assert_eq!(record.amount, dec!(199_999.80));

    let shares = h.startups.get_shares_data(&startup_id).unwrap();
    assert_eq!(shares.total_shares, 1_111_111);
    assert_eq!(shares.price_per_share.round_dp(2), dec!(1.80));

    let startup = h.startups.get_startup(&startup_id).unwrap();
    assert_eq!(startup.total_funding, dec!(199_999.80));

    assert_eq!(equity_pct(&h, &startup_id, "Seed Fund").round_dp(1), dec!(10.0));
    assert_eq!(equity_pct(&h, &startup_id, "Ada").round_dp(0), dec!(54));
    assert_eq!(equity_pct(&h, &startup_id, "Grace").round_dp(0), dec!(27));
    assert_eq!(equity_pct(&h, &startup_id, "Edith").round_dp(0), dec!(9));
}

#[test]
fn deleting_an_investment_restores_the_funding_total() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);

    let record = h
        .investments
        .add_investment(&startup_id, investment(10_000, dec!(2.50)))
        .unwrap();
    assert_eq!(record.amount, dec!(25_000));
    assert_eq!(
        h.startups.get_startup(&startup_id).unwrap().total_funding,
        dec!(25_000)
    );

    h.investments
        .delete_investment(&startup_id, &record.id)
        .unwrap();
    assert_eq!(
        h.startups.get_startup(&startup_id).unwrap().total_funding,
        Decimal::ZERO
    );
    assert!(h.investments.list_investments(&startup_id).unwrap().is_empty());
    assert_eq!(
        h.startups.get_shares_data(&startup_id).unwrap().total_shares,
        1_000_000
    );
}

#[test]
fn zero_share_entries_are_rejected_before_any_write() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);

    let err = h
        .investments
        .add_investment(&startup_id, investment(0, dec!(2.50)))
        .unwrap_err();
    assert_eq!(err.field(), Some("shares"));
    assert!(h.investments.list_investments(&startup_id).unwrap().is_empty());
    assert_eq!(
        h.startups.get_startup(&startup_id).unwrap().total_funding,
        Decimal::ZERO
    );
}

#[test]
fn stored_records_round_trip_their_fields() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);

    let added = h
        .investments
        .add_investment(&startup_id, investment(10_000, dec!(2.50)))
        .unwrap();
    let listed = h.investments.list_investments(&startup_id).unwrap();
    assert_eq!(listed.len(), 1);
    let stored = &listed[0];
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(stored.investor_type, InvestorType::VcFirm);
    assert_eq!(stored.round_type, InvestmentRoundType::Equity);
    assert_eq!(stored.price_per_share, dec!(2.50));
    assert_eq!(stored.amount, added.amount);
    assert_eq!(stored.post_money_valuation, added.post_money_valuation);
}

#[test]
fn hybrid_recognition_shares_count_toward_the_total() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);

    let record = h
        .recognition
        .add_record(
            &startup_id,
            NewRecognition {
                program_name: "Incubate 2025".to_string(),
                facilitator_name: "TechNest".to_string(),
                facilitator_code: Some("TN".to_string()),
                fee_type: FeeType::Hybrid,
                shares: Some(50_000),
                price_per_share: Some(dec!(1.20)),
                agreement_document: Some("agreements/technest.pdf".to_string()),
            },
        )
        .unwrap();
    assert_eq!(record.investment_amount, Some(dec!(60_000)));
    assert_eq!(
        h.startups.get_shares_data(&startup_id).unwrap().total_shares,
        1_050_000
    );

    h.recognition.delete_record(&startup_id, &record.id).unwrap();
    assert_eq!(
        h.startups.get_shares_data(&startup_id).unwrap().total_shares,
        1_000_000
    );
}

#[test]
fn free_recognition_leaves_the_cap_table_alone() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);

    h.recognition
        .add_record(
            &startup_id,
            NewRecognition {
                program_name: "Pitch Day".to_string(),
                facilitator_name: "City Hub".to_string(),
                facilitator_code: None,
                fee_type: FeeType::Free,
                shares: None,
                price_per_share: None,
                agreement_document: None,
            },
        )
        .unwrap();
    assert_eq!(
        h.startups.get_shares_data(&startup_id).unwrap().total_shares,
        1_000_000
    );
    let table = h.startups.cap_table(&startup_id).unwrap();
    assert!(table.iter().all(|e| e.kind != HolderKind::Program));
}

#[test]
fn esop_reserve_joins_the_cap_table() {
    let h = harness();
    let startup_id = register_startup(&h);
    h.founders
        .save_founders(&startup_id, vec![founder("Ada", 900_000)])
        .unwrap();

    let totals = h.startups.set_esop_reserved(&startup_id, 100_000).unwrap();
    assert_eq!(totals.total_shares, 1_000_000);

    let table = h.startups.cap_table(&startup_id).unwrap();
    let esop = table.iter().find(|e| e.kind == HolderKind::Esop).unwrap();
    assert_eq!(esop.equity_percentage, dec!(10));

    // The reserve survives later recomputations.
    h.investments
        .add_investment(&startup_id, investment(100_000, dec!(2)))
        .unwrap();
    let shares = h.startups.get_shares_data(&startup_id).unwrap();
    assert_eq!(shares.esop_reserved_shares, 100_000);
    assert_eq!(shares.total_shares, 1_100_000);
}

#[test]
fn recalculate_converges_to_the_same_totals() {
    let h = harness();
    let startup_id = register_startup(&h);
    seed_founders(&h, &startup_id);
    h.investments
        .add_investment(&startup_id, investment(10_000, dec!(2.50)))
        .unwrap();

    let first = h.startups.recalculate(&startup_id).unwrap();
    let second = h.startups.recalculate(&startup_id).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.total_funding, dec!(25_000));
    assert_eq!(first.total_shares, 1_010_000);
}
