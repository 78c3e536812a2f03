//! End-to-end valuation scenarios through the public API.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use deed_core::calculations::{ValuationWorksheet, from_sq_meters, to_sq_meters};
use deed_core::{
    AreaUnit, CircleRateBasis, Deduction, FinancialInputs, FormData, PlotType, PropertyFacts,
    PropertyType, StructureAdditions, ValuationResult, WorkflowSubmission,
};

const SALE_DEED_JSON: &str = include_str!("fixtures/sale_deed_submission.json");

fn residential_plot(sq_meters: Decimal) -> PropertyFacts {
    PropertyFacts::with_total_area(
        PropertyType::Residential,
        PlotType::Vacant,
        sq_meters,
        AreaUnit::SqMeters,
    )
}

fn value(
    property: &PropertyFacts,
    financial: &FinancialInputs,
) -> ValuationResult {
    ValuationWorksheet::new(property, financial, &StructureAdditions::default())
        .calculate()
        .expect("valuation should succeed")
}

#[test]
fn hundred_square_meter_plot_at_forty_thousand() {
    let result = value(
        &residential_plot(dec!(100)),
        &FinancialInputs::new(dec!(500000), dec!(40000)),
    );

    assert_eq!(result.total_plot_area_sq_meters, dec!(100));
    assert_eq!(result.base_circle_rate_value, dec!(100) * dec!(10.7639) * dec!(40000));
    assert_eq!(result.final_value, dec!(43055600));
    assert_eq!(result.stamp_duty, dec!(3013892));
    assert_eq!(result.registration_charge, dec!(430556));
    assert_eq!(result.final_payable_amount, dec!(3444448));
}

#[test]
fn same_plot_with_rate_quoted_per_square_meter() {
    let financial = FinancialInputs {
        circle_rate_basis: CircleRateBasis::PerSqMeter,
        ..FinancialInputs::new(dec!(500000), dec!(40000))
    };

    let result = value(&residential_plot(dec!(100)), &financial);

    assert_eq!(result.base_circle_rate_value, dec!(4000000));
    assert_eq!(result.final_payable_amount, dec!(320000));
}

#[test]
fn payable_is_eight_percent_of_the_higher_value() {
    let cases = [
        (dec!(50), dec!(1000), dec!(100000)),
        (dec!(250), dec!(3500), dec!(20000000)),
        (dec!(12.5), dec!(999.99), dec!(1)),
        (dec!(1000), dec!(0.5), dec!(7500000)),
    ];

    for (area, rate, sale_price) in cases {
        let result = value(
            &residential_plot(area),
            &FinancialInputs::new(sale_price, rate),
        );

        let circle_value = area * dec!(10.7639) * rate;
        let expected = (sale_price.max(circle_value) * dec!(0.08)).round_dp(2);
        let diff = (result.final_payable_amount - expected).abs();
        assert!(
            diff <= dec!(0.02),
            "area {area} rate {rate} price {sale_price}: got {} expected {expected}",
            result.final_payable_amount
        );
    }
}

#[test]
fn double_side_road_adds_exactly_ten_percent_to_base() {
    let plot = residential_plot(dec!(180));
    let plain = FinancialInputs::new(dec!(1), dec!(2750));
    let corner = FinancialInputs {
        double_side_road: true,
        ..plain.clone()
    };

    let without = value(&plot, &plain).base_circle_rate_value;
    let with = value(&plot, &corner).base_circle_rate_value;

    assert_eq!(with, (without * dec!(1.10)).round_dp(2));
}

#[test]
fn ex_serviceman_duty_is_flat_at_any_value() {
    for sq_meters in [dec!(10), dec!(100), dec!(10000)] {
        let financial = FinancialInputs {
            deduction: Deduction::ExServiceman,
            ..FinancialInputs::new(dec!(1), dec!(5000))
        };

        assert_eq!(value(&residential_plot(sq_meters), &financial).stamp_duty, dec!(100));
    }
}

#[test]
fn handicapped_rebate_never_exceeds_cap() {
    let rebate_for = |sale_price: Decimal| {
        let plot = residential_plot(dec!(1));
        let financial = FinancialInputs {
            deduction: Deduction::Handicapped,
            ..FinancialInputs::new(sale_price, dec!(1))
        };
        let result = value(&plot, &financial);
        result.gross_stamp_duty - result.stamp_duty
    };

    assert_eq!(rebate_for(dec!(10000000)), dec!(125000));
    assert!(rebate_for(dec!(100000)) <= dec!(125000));
}

#[test]
fn one_hundred_fifty_percent_deduction_floors_at_zero() {
    let financial = FinancialInputs {
        deduction: Deduction::OtherPercent {
            percent: dec!(150),
        },
        ..FinancialInputs::new(dec!(2000000), dec!(100))
    };

    let result = value(&residential_plot(dec!(50)), &financial);

    assert_eq!(result.stamp_duty, Decimal::ZERO);
    assert_eq!(result.final_payable_amount, result.registration_charge);
}

#[test]
fn acre_round_trips_through_square_meters() {
    let sq_meters = to_sq_meters(dec!(1), AreaUnit::Acre).unwrap();
    let back = from_sq_meters(sq_meters, AreaUnit::Acre).unwrap();

    assert!((back - dec!(1)).abs() < dec!(0.0001));
}

#[test]
fn sale_deed_fixture_validates_and_values() {
    let submission: WorkflowSubmission =
        serde_json::from_str(SALE_DEED_JSON).expect("fixture should parse");

    let FormData::SaleDeed(form) = &submission.data else {
        panic!("fixture is not a sale deed");
    };

    assert_eq!(submission.data.validate_fields(), Ok(()));
    assert_eq!(submission.data.validate_structure(), Ok(()));
    assert_eq!(submission.amount, dec!(1499));

    let result = form.valuation().expect("fixture should value");
    assert_eq!(result.deduction_amount, dec!(430556));
    assert_eq!(result.stamp_duty, dec!(2583336));
    assert_eq!(result.final_payable_amount, dec!(3013892));

    let preview = submission.to_string();
    assert!(preview.starts_with("SALE DEED"));
    assert!(preview.contains("Mohan Lal"));
    assert!(preview.contains("Sunita Sharma"));
}
