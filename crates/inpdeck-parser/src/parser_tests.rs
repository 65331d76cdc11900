//! Scenario tests for the card parsers.
//!
//! These exercise the public entry points on realistic logical cards:
//! success paths assert on the resulting records (usually through their
//! canonical `Display` form), failure paths assert on the error code of the
//! returned diagnostic.

use inpdeck_core::cell::option::{FillVariant, TrclVariant};
use inpdeck_core::cell::CellOption;
use inpdeck_core::data::{DataCard, SourceValue, TallyVariant};
use inpdeck_core::surface::{SurfaceKind, SurfaceModifier};
use inpdeck_core::types::Entry;

use crate::error::ErrorCode;
use crate::parser::{parse_cell, parse_data, parse_surface};

fn assert_code(result: Result<impl std::fmt::Debug, crate::error::Diagnostic>, code: ErrorCode) {
    match result {
        Ok(record) => panic!("expected {code}, but card parsed as {record:?}"),
        Err(diag) => assert_eq!(diag.code(), Some(code), "wrong code: {diag}"),
    }
}

// Surface cards

#[test]
fn test_axis_plane_surface() {
    let surface = parse_surface("1 pz 5.0").unwrap();
    assert_eq!(surface.number(), 1);
    assert_eq!(surface.kind(), &SurfaceKind::Pz(5.0));
    assert_eq!(surface.to_string(), "1 pz 5");
}

#[test]
fn test_reflecting_and_white_modifiers() {
    let reflecting = parse_surface("*4 so 12").unwrap();
    assert_eq!(reflecting.modifier(), Some(SurfaceModifier::Reflecting));

    let white = parse_surface("+7 cz 3.1").unwrap();
    assert_eq!(white.modifier(), Some(SurfaceModifier::White));
}

#[test]
fn test_surface_with_transform_entry() {
    let surface = parse_surface("3 2 cx 4.0").unwrap();
    assert_eq!(surface.transform(), Some(2));
    assert_eq!(surface.to_string(), "3 2 cx 4");
}

#[test]
fn test_plane_variations_selected_by_arity() {
    // p takes 4 coefficients (general form) or 9 (three points).
    assert!(matches!(
        parse_surface("1 p 0 0 1 5").unwrap().kind(),
        SurfaceKind::P(_)
    ));
    assert!(matches!(
        parse_surface("1 p 0 0 0 1 0 0 0 1 0").unwrap().kind(),
        SurfaceKind::PPoints(_)
    ));
}

#[test]
fn test_unknown_surface_mnemonic() {
    assert_code(parse_surface("1 pq 5.0"), ErrorCode::E102);
}

#[test]
fn test_surface_arity_exhaustion() {
    // so takes exactly one coefficient.
    assert_code(parse_surface("1 so 1 2 3"), ErrorCode::E103);
}

#[test]
fn test_negative_surface_radius_rejected() {
    assert_code(parse_surface("1 so -5.0"), ErrorCode::E200);
}

#[test]
fn test_fortran_exponent_coefficient() {
    let surface = parse_surface("9 pz 1.5-3").unwrap();
    assert_eq!(surface.kind(), &SurfaceKind::Pz(0.0015));
}

// Cell cards

#[test]
fn test_material_cell() {
    let cell = parse_cell("1 1 -7.8 -1 imp:n=1").unwrap();
    assert_eq!(cell.number(), 1);
    assert_eq!(cell.material(), 1);
    assert_eq!(cell.density(), Some(-7.8));
    assert_eq!(cell.geometry().as_str(), "-1");
    assert_eq!(cell.options().len(), 1);
}

#[test]
fn test_void_cell_has_no_density() {
    let cell = parse_cell("2 0 1 imp:n=0").unwrap();
    assert_eq!(cell.material(), 0);
    assert_eq!(cell.density(), None);
}

#[test]
fn test_void_cell_with_density_rejected() {
    // 0.5 is taken as the start of the geometry, where a density cannot
    // follow a void material; the real rejection is the non-integer word.
    assert!(parse_cell("2 0 -0.5 1").is_err());
}

#[test]
fn test_geometry_text_preserved() {
    let cell = parse_cell("3 0 (1:-2) #3").unwrap();
    assert_eq!(cell.geometry().as_str(), "(1:-2) #3");
}

#[test]
fn test_missing_density_rejected() {
    assert!(parse_cell("1 1 -1").is_err());
}

#[test]
fn test_cell_number_restriction() {
    assert_code(parse_cell("0 0 -1"), ErrorCode::E200);
}

#[test]
fn test_option_values_with_and_without_equals() {
    let with = parse_cell("1 0 -1 imp:n=1 vol 2.5").unwrap();
    assert_eq!(with.options().len(), 2);

    let without = parse_cell("1 0 -1 imp:n 1 vol=2.5").unwrap();
    assert_eq!(without.options(), with.options());
}

#[test]
fn test_multiparticle_importance() {
    let cell = parse_cell("1 0 -1 imp:n,p 1").unwrap();
    assert_eq!(cell.options()[0].to_string(), "imp:n,p 1");
}

#[test]
fn test_jumped_importance() {
    let cell = parse_cell("1 0 -1 imp:n j").unwrap();
    match &cell.options()[0] {
        CellOption::Imp(imp) => assert!(imp.value().is_jump()),
        other => panic!("expected imp, got {other:?}"),
    }
}

#[test]
fn test_negative_importance_rejected() {
    assert_code(parse_cell("1 0 -1 imp:n -1"), ErrorCode::E201);
}

#[test]
fn test_weight_window_bound_sentinel() {
    // -1 is the "no window" sentinel; other negatives are invalid.
    assert!(parse_cell("1 0 -1 wwn1:n -1").is_ok());
    assert_code(parse_cell("1 0 -1 wwn1:n -2"), ErrorCode::E201);
}

#[test]
fn test_trcl_number_variant() {
    let cell = parse_cell("1 0 -1 trcl 5").unwrap();
    match &cell.options()[0] {
        CellOption::Trcl(trcl) => assert_eq!(trcl.variant(), &TrclVariant::Number(5)),
        other => panic!("expected trcl, got {other:?}"),
    }
}

#[test]
fn test_trcl_inline_transformation() {
    let cell = parse_cell("1 0 -1 *trcl (1 2 3)").unwrap();
    match &cell.options()[0] {
        CellOption::Trcl(trcl) => {
            assert!(trcl.degrees());
            assert!(matches!(trcl.variant(), TrclVariant::Transformation(_)));
        }
        other => panic!("expected trcl, got {other:?}"),
    }
}

#[test]
fn test_degrees_marker_on_trcl_number_rejected() {
    assert_code(parse_cell("1 0 -1 *trcl 5"), ErrorCode::E201);
}

#[test]
fn test_trcl_entry_count_exhaustion() {
    // No transformation variation takes 4 entries.
    assert_code(parse_cell("1 0 -1 trcl (1 2 3 4)"), ErrorCode::E103);
}

#[test]
fn test_fill_universe_and_transform() {
    let bare = parse_cell("1 0 -1 fill 5").unwrap();
    match &bare.options()[0] {
        CellOption::Fill(fill) => assert_eq!(
            fill.variant(),
            &FillVariant::Universe {
                universe: 5,
                transform: None
            }
        ),
        other => panic!("expected fill, got {other:?}"),
    }

    let numbered = parse_cell("1 0 -1 fill 5 (4)").unwrap();
    match &numbered.options()[0] {
        CellOption::Fill(fill) => assert_eq!(
            fill.variant(),
            &FillVariant::Universe {
                universe: 5,
                transform: Some(4)
            }
        ),
        other => panic!("expected fill, got {other:?}"),
    }
}

#[test]
fn test_fill_lattice_form() {
    let cell = parse_cell("1 0 -1 lat 1 fill 0:1 0:1 0:0 1 2 3 4").unwrap();
    match &cell.options()[1] {
        CellOption::Fill(fill) => match fill.variant() {
            FillVariant::Lattice { universes, .. } => assert_eq!(universes.len(), 4),
            other => panic!("expected lattice fill, got {other:?}"),
        },
        other => panic!("expected fill, got {other:?}"),
    }
}

#[test]
fn test_fill_lattice_element_count_mismatch() {
    assert_code(parse_cell("1 0 -1 fill 0:1 0:1 0:0 1 2 3"), ErrorCode::E201);
}

// Data cards

#[test]
fn test_mode_card() {
    let card = parse_data("mode n p").unwrap();
    assert_eq!(card.to_string(), "mode n p");
}

#[test]
fn test_duplicate_mode_particle_rejected() {
    assert_code(parse_data("mode n n"), ErrorCode::E200);
}

#[test]
fn test_transform_card_variations() {
    let displacement = parse_data("tr1 1 2 3").unwrap();
    assert_eq!(displacement.to_string(), "tr1 1 2 3");

    let degrees = parse_data("*tr2 0 0 0 45 90 45 45 90 135 0 90 90").unwrap();
    assert!(matches!(degrees, DataCard::Transform(ref t) if t.degrees()));
}

#[test]
fn test_transform_entry_count_exhaustion() {
    assert_code(parse_data("tr1 1 2"), ErrorCode::E103);
}

#[test]
fn test_material_card() {
    let card = parse_data("m1 1001.70c 2 8016.70c 1 gas=1").unwrap();
    assert_eq!(card.to_string(), "m1 1001.70c 2 8016.70c 1 gas=1");
}

#[test]
fn test_material_mixed_fraction_signs_rejected() {
    assert_code(parse_data("m1 1001.70c 2 8016.70c -1"), ErrorCode::E200);
}

#[test]
fn test_material_thermal_card() {
    let card = parse_data("mt1 lwtr.01t").unwrap();
    assert_eq!(card.to_string(), "mt1 lwtr.01t");
}

#[test]
fn test_source_definition() {
    let card = parse_data("sdef pos=0 0 0 erg=d1").unwrap();
    match card {
        DataCard::Source(source) => {
            assert_eq!(source.options().len(), 2);
            assert_eq!(source.options()[0].1.len(), 3);
            assert!(matches!(
                source.options()[1].1[0],
                SourceValue::Distribution(_)
            ));
        }
        other => panic!("expected sdef, got {other:?}"),
    }
}

#[test]
fn test_source_information_card() {
    let card = parse_data("si1 h 0 1 2").unwrap();
    assert_eq!(card.to_string(), "si1 h 0 1 2");
}

#[test]
fn test_source_probability_values_and_function() {
    let values = parse_data("sp1 d 0.3 0.7").unwrap();
    assert_eq!(values.to_string(), "sp1 d 0.3 0.7");

    // A leading integer in -41..=-2 is the built-in function form.
    let function = parse_data("sp2 -21 1.5").unwrap();
    assert_eq!(function.to_string(), "sp2 -21 1.5");

    let bias = parse_data("sb1 0.5 0.5").unwrap();
    assert_eq!(bias.to_string(), "sb1 0.5 0.5");
}

#[test]
fn test_dependent_source_pairs() {
    let card = parse_data("ds2 t 1 10 2 20").unwrap();
    assert_eq!(card.to_string(), "ds2 t 1 10 2 20");
}

#[test]
fn test_criticality_source_triples() {
    let card = parse_data("ksrc 0 0 0 1 1 1").unwrap();
    match card {
        DataCard::Criticality(source) => assert_eq!(source.locations().len(), 2),
        other => panic!("expected ksrc, got {other:?}"),
    }
}

#[test]
fn test_criticality_source_partial_triple_rejected() {
    assert!(parse_data("ksrc 0 0 0 1 1").is_err());
}

#[test]
fn test_tally_list_and_detector() {
    let list = parse_data("f4:n 1 2 3").unwrap();
    assert_eq!(list.to_string(), "f4:n 1 2 3");

    let detector = parse_data("f5:p 0 0 0 0.5").unwrap();
    match detector {
        DataCard::Tally(tally) => {
            assert!(matches!(tally.variant(), TallyVariant::Detector(points) if points.len() == 1));
        }
        other => panic!("expected tally, got {other:?}"),
    }
}

#[test]
fn test_tally_bins_and_print_order() {
    assert_eq!(parse_data("e4 0.1 1 10").unwrap().to_string(), "e4 0.1 1 10");
    assert_eq!(parse_data("c4 -1 0 1").unwrap().to_string(), "c4 -1 0 1");
    assert_eq!(parse_data("fq4 e t").unwrap().to_string(), "fq4 e t");
}

#[test]
fn test_cosine_bound_restriction() {
    assert_code(parse_data("c4 -2 0 1"), ErrorCode::E200);
}

#[test]
fn test_physics_card_entry_limits() {
    assert!(parse_data("phys:n 100 j 0").is_ok());
    // phys:p takes at most 4 entries.
    assert_code(parse_data("phys:p 1 2 3 4 5"), ErrorCode::E200);
}

#[test]
fn test_physics_unsupported_particle() {
    assert_code(parse_data("phys:h 1"), ErrorCode::E103);
}

#[test]
fn test_cutoff_card() {
    let card = parse_data("cut:n j 0.001").unwrap();
    assert_eq!(card.to_string(), "cut:n j 0.001");
}

#[test]
fn test_weight_window_cards() {
    assert!(parse_data("imp:n 1 1 0").is_ok());
    assert!(parse_data("wwe:n 0.1 1 10").is_ok());
    assert!(parse_data("wwn1:n 0.5 -1 2").is_ok());

    let card = parse_data("wwp:n 5 3 j").unwrap();
    match card {
        DataCard::WindowParameters(wwp) => assert_eq!(wwp.mxspln(), Entry::Jump),
        other => panic!("expected wwp, got {other:?}"),
    }
}

#[test]
fn test_window_parameter_restriction() {
    // wupn must be at least 2.
    assert_code(parse_data("wwp:n 1 3 4"), ErrorCode::E200);
}

#[test]
fn test_run_control_cards() {
    assert_eq!(parse_data("nps 1000000").unwrap().to_string(), "nps 1000000");
    assert_eq!(parse_data("ctme 60").unwrap().to_string(), "ctme 60");
    assert_eq!(parse_data("prdmp j j 1").unwrap().to_string(), "prdmp j j 1");
    assert_eq!(parse_data("lost 10 5").unwrap().to_string(), "lost 10 5");
    assert_eq!(parse_data("print 40 110").unwrap().to_string(), "print 40 110");
    assert_eq!(parse_data("print").unwrap().to_string(), "print");
}

#[test]
fn test_random_settings() {
    let card = parse_data("rand gen=2 seed=12345").unwrap();
    assert_eq!(card.to_string(), "rand gen=2 seed=12345");
}

#[test]
fn test_even_random_seed_rejected() {
    assert_code(parse_data("rand seed=12346"), ErrorCode::E200);
}

#[test]
fn test_cell_parameter_data_cards() {
    assert_eq!(parse_data("vol no 1 j j 5").unwrap().to_string(), "vol no 1 j j 5");
    assert!(parse_data("u 1 2 3").is_ok());
    assert!(parse_data("lat 1 j 2").is_ok());
    assert!(parse_data("fill 0 1 2").is_ok());
    assert!(parse_data("tmp 2.5e-8 2.5e-8").is_ok());
}

#[test]
fn test_unknown_data_mnemonic() {
    assert_code(parse_data("frobnicate 1 2 3"), ErrorCode::E102);
}

#[test]
fn test_trailing_garbage_rejected() {
    assert_code(parse_data("nps 100 oops"), ErrorCode::E100);
}

#[test]
fn test_diagnostic_carries_card_text() {
    let diag = parse_data("frobnicate 1").unwrap_err();
    assert_eq!(diag.source(), Some("frobnicate 1"));
    assert!(!diag.labels().is_empty());
}
