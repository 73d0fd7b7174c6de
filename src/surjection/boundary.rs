use formal_sum::FormalSum;

use super::{BasisSurjection, SurjectionElement};
use crate::Convention;

/// The signs attached to removing each entry of `key`, following Berger–Fresse. Reading left to
/// right, the first occurrences of values occurring again later alternate in sign, and every later
/// occurrence has the sign opposite to the previous occurrence of its value. Entries whose value
/// occurs only once get sign `0`, since removing them never leaves a surjection.
fn berger_fresse_signs(key: &[u32]) -> Vec<i64> {
    let mut signs = vec![0; key.len()];
    let mut alternating = 1;
    for (idx, v) in key.iter().enumerate() {
        if key[idx + 1..].contains(v) {
            signs[idx] = alternating;
            alternating = -alternating;
        } else if let Some(previous) = key[..idx].iter().rposition(|u| u == v) {
            signs[idx] = -signs[previous];
        }
    }
    signs
}

impl SurjectionElement {
    /// The differential. Up to sign, it is the sum of the sequences obtained by removing one entry
    /// that is not the only occurrence of its value.
    pub fn boundary(&self) -> Self {
        let mut result = self.sum.zero();
        let faces = |key: &BasisSurjection| -> Vec<(usize, BasisSurjection)> {
            (0..key.len())
                .map(|idx| (idx, key.remove(idx)))
                .filter(|(idx, face)| face.values().contains(&key.values()[*idx]))
                .collect()
        };

        if self.torsion() == Some(2) {
            for (key, value) in self.iter() {
                for (_, face) in faces(key) {
                    result.add_term(face, value);
                }
            }
            return Self::from_sum(result, self.convention);
        }

        match self.convention {
            Convention::BergerFresse => {
                for (key, value) in self.iter() {
                    let signs = berger_fresse_signs(key.values());
                    for (idx, face) in faces(key) {
                        result.add_term(face, signs[idx] * value);
                    }
                }
            }
            Convention::McClureSmith => {
                for (key, value) in self.iter() {
                    mcclure_smith_boundary(key, value, &mut result);
                }
            }
        }
        Self::from_sum(result, self.convention)
    }
}

/// Entries are removed value by value. The sign alternates along the occurrences of each value,
/// and flips once more when passing to the next value.
fn mcclure_smith_boundary(
    key: &BasisSurjection,
    value: i64,
    result: &mut FormalSum<BasisSurjection>,
) {
    let mut sign = 1;
    for i in 1..=key.arity() as u32 {
        for (idx, _) in key.values().iter().enumerate().filter(|(_, &v)| v == i) {
            let face = key.remove(idx);
            if face.values().contains(&i) {
                result.add_term(face, sign * value);
            }
            sign = -sign;
        }
        sign = -sign;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use rstest::rstest;

    fn element(values: &[u32], convention: Convention) -> SurjectionElement {
        SurjectionElement::basis_element(values.to_vec(), convention).unwrap()
    }

    #[test]
    fn test_berger_fresse_signs() {
        assert_eq!(berger_fresse_signs(&[1, 2, 1, 3, 1, 3]), vec![1, 0, -1, 1, 1, -1]);
    }

    #[test]
    fn test_boundary() {
        let x = element(&[1, 2, 1, 3, 1, 3], Convention::BergerFresse);
        let expected = SurjectionElement::from_terms(
            [
                (vec![2, 1, 3, 1, 3], 1),
                (vec![1, 2, 3, 1, 3], -1),
                (vec![1, 2, 1, 3, 1], -1),
            ],
            None,
            Convention::BergerFresse,
        )
        .unwrap();
        assert_eq!(x.boundary(), expected);
        expect![[r#"- (1,2,1,3,1) - (1,2,3,1,3) + (2,1,3,1,3)"#]]
            .assert_eq(&x.boundary().to_string());
    }

    #[test]
    fn test_mcclure_smith_boundary() {
        let x = element(&[2, 1, 3, 1, 2, 3], Convention::McClureSmith);
        expect![[r#"- (1,3,1,2,3) - (2,1,3,1,2) + (2,1,3,1,3) - (2,1,3,2,3) + (2,3,1,2,3)"#]]
            .assert_eq(&x.boundary().to_string());

        let y = x.clone().with_convention(Convention::BergerFresse);
        expect![[r#"(1,3,1,2,3) - (2,1,3,1,2) - (2,1,3,1,3) + (2,1,3,2,3) - (2,3,1,2,3)"#]]
            .assert_eq(&y.boundary().to_string());
    }

    #[test]
    fn test_mod_two_boundary() {
        let mut x = element(&[1, 2, 1, 2], Convention::BergerFresse);
        x.set_torsion(Some(2));
        expect![[r#"(1,2,1) + (2,1,2)"#]].assert_eq(&x.boundary().to_string());
    }

    #[rstest]
    #[case(Convention::BergerFresse, None)]
    #[case(Convention::McClureSmith, None)]
    #[case(Convention::BergerFresse, Some(2))]
    #[case(Convention::McClureSmith, Some(3))]
    fn test_boundary_squares_to_zero(
        #[case] convention: Convention,
        #[case] torsion: Option<u32>,
    ) {
        for values in crate::basis(3, 3, None) {
            let mut x = element(values.values(), convention);
            x.set_torsion(torsion);
            assert!(x.boundary().boundary().is_zero(), "{values}");
        }
    }
}
