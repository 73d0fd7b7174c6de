use rstest::rstest;
use surjection::{
    basis, BasisSurjection, Convention, Representation, SurjectionElement, SymmetricRingElement,
};

fn element(
    key: &BasisSurjection,
    convention: Convention,
    torsion: Option<u32>,
) -> SurjectionElement {
    let mut x = SurjectionElement::basis_element(key.values().to_vec(), convention).unwrap();
    x.set_torsion(torsion);
    x
}

fn sign(degree: usize) -> i64 {
    if degree % 2 == 0 {
        1
    } else {
        -1
    }
}

/// `∂(x ∘_i y) - ∂x ∘_i y - (-1)^|x| x ∘_i ∂y`
fn leibniz_defect(x: &SurjectionElement, y: &SurjectionElement, i: usize) -> SurjectionElement {
    let xy = x.compose(y, i).unwrap().boundary();
    let dx_y = x.boundary().compose(y, i).unwrap();
    let x_dy = x.compose(&y.boundary(), i).unwrap();
    xy - dx_y - x_dy * sign(x.degree().unwrap())
}

#[rstest]
#[case(Convention::BergerFresse, None)]
#[case(Convention::McClureSmith, None)]
#[case(Convention::BergerFresse, Some(2))]
#[case(Convention::McClureSmith, Some(3))]
fn boundary_squares_to_zero(#[case] convention: Convention, #[case] torsion: Option<u32>) {
    for (arity, degree) in [(2, 3), (3, 2), (3, 3), (4, 2)] {
        for key in basis(arity, degree, None) {
            let x = element(&key, convention, torsion);
            assert!(x.boundary().boundary().is_zero(), "{key}");
        }
    }
}

#[rstest]
#[case(Convention::BergerFresse)]
#[case(Convention::McClureSmith)]
fn action_is_a_chain_map(#[case] convention: Convention) {
    let norm = SymmetricRingElement::norm(3, None);
    let transposition = SymmetricRingElement::transposition(3, None);
    for key in basis(3, 2, None).into_iter().chain(basis(3, 3, None)) {
        let x = element(&key, convention, None);
        for rho in [&norm, &transposition] {
            assert_eq!(
                x.left_multiply(rho).unwrap().boundary(),
                x.boundary().left_multiply(rho).unwrap(),
                "{key}"
            );
        }
    }
}

#[test]
fn orbit_is_idempotent() {
    for key in basis(3, 3, None) {
        let x = element(&key, Convention::McClureSmith, None);
        let trivial = x.orbit(Representation::Trivial);
        assert_eq!(trivial.orbit(Representation::Trivial), trivial);

        let twisted = x.orbit(Representation::Sign);
        assert!(twisted == trivial || twisted == -&trivial, "{key}");
    }
}

#[test]
fn composition_leibniz() {
    let x = SurjectionElement::basis_element(vec![3, 2, 1, 2, 1, 3], Convention::BergerFresse)
        .unwrap();
    let y = SurjectionElement::basis_element(vec![3, 1, 2, 1, 4, 3], Convention::BergerFresse)
        .unwrap();
    assert!(leibniz_defect(&x, &y, 3).is_zero());
}

#[rstest]
#[case(Convention::BergerFresse, None)]
#[case(Convention::McClureSmith, Some(2))]
fn composition_leibniz_on_bases(#[case] convention: Convention, #[case] torsion: Option<u32>) {
    let bases = [basis(2, 1, None), basis(2, 2, None), basis(3, 1, None)];
    for outer in bases.iter().flatten() {
        for inner in bases.iter().flatten() {
            let x = element(outer, convention, torsion);
            let y = element(inner, convention, torsion);
            for i in 1..=outer.arity() {
                assert!(leibniz_defect(&x, &y, i).is_zero(), "{outer} ∘_{i} {inner}");
            }
        }
    }
}

#[test]
fn suspension_respects_composition() {
    let bf = |values: Vec<u32>| {
        SurjectionElement::basis_element(values, Convention::BergerFresse).unwrap()
    };
    let x = bf(vec![1, 3, 2, 1, 2, 3, 4]);
    let y = bf(vec![1, 2, 3, 1, 2, 3]);
    let z = bf(vec![1, 2, 1, 3, 1, 2, 3]);
    let sx = x.suspension().unwrap();

    assert_eq!(
        x.compose(&y, 1).unwrap().suspension().unwrap(),
        sx.compose(&y.suspension().unwrap(), 1).unwrap()
    );
    assert_eq!(
        x.compose(&z, 2).unwrap().suspension().unwrap(),
        sx.compose(&z.suspension().unwrap(), 1).unwrap()
    );
}

#[test]
fn text_and_json_agree() {
    let x: SurjectionElement = "(1,3,1,2,1) - 2(2,1,3,1,2) + (3,1,2)".parse().unwrap();
    let y = SurjectionElement::from_json(&serde_json::json!({
        "terms": [[[3, 1, 2], 1], [[2, 1, 3, 1, 2], -2], [[1, 3, 1, 2, 1], 1]]
    }))
    .unwrap();
    assert_eq!(x, y);
    assert_eq!(x.to_string().parse::<SurjectionElement>().unwrap(), y);
}

#[test]
fn logging_installs_once() {
    assert!(surjection::utils::init_logging().is_ok());
    assert!(surjection::utils::init_logging().is_err());
    let x = SurjectionElement::basis_element(vec![1, 2, 1], Convention::BergerFresse).unwrap();
    assert!(!x.compose(&x, 1).unwrap().is_zero());
}
