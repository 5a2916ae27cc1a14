// Decimal values are stored as TEXT and parsed on the way out; share counts
// are integers. Dates are `%Y-%m-%d` text, timestamps RFC 3339 text.

diesel::table! {
    startups (id) {
        id -> Text,
        name -> Text,
        sector -> Nullable<Text>,
        current_valuation -> Text,
        total_funding -> Text,
        total_revenue -> Text,
        compliance_status -> Text,
        registered_at -> Text,
    }
}

diesel::table! {
    founders (id) {
        id -> Text,
        startup_id -> Text,
        name -> Text,
        email -> Text,
        shares -> Nullable<BigInt>,
        equity_percentage -> Nullable<Text>,
    }
}

diesel::table! {
    investment_records (id) {
        id -> Text,
        startup_id -> Text,
        date -> Text,
        investor_name -> Text,
        investor_code -> Nullable<Text>,
        investor_type -> Text,
        round_type -> Text,
        amount -> Text,
        shares -> BigInt,
        price_per_share -> Text,
        equity_allocated -> Text,
        pre_money_valuation -> Nullable<Text>,
        post_money_valuation -> Text,
        proof_document -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    recognition_records (id) {
        id -> Text,
        startup_id -> Text,
        program_name -> Text,
        facilitator_name -> Text,
        facilitator_code -> Nullable<Text>,
        fee_type -> Text,
        shares -> Nullable<BigInt>,
        price_per_share -> Nullable<Text>,
        investment_amount -> Nullable<Text>,
        equity_allocated -> Nullable<Text>,
        agreement_document -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    startup_shares (startup_id) {
        startup_id -> Text,
        total_shares -> BigInt,
        esop_reserved_shares -> BigInt,
        price_per_share -> Text,
        updated_at -> Text,
    }
}

diesel::joinable!(founders -> startups (startup_id));
diesel::joinable!(investment_records -> startups (startup_id));
diesel::joinable!(recognition_records -> startups (startup_id));
diesel::joinable!(startup_shares -> startups (startup_id));

diesel::allow_tables_to_appear_in_same_query!(
    startups,
    founders,
    investment_records,
    recognition_records,
    startup_shares,
);
