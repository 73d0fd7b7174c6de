use symmetric::SymmetricRingElement;

use super::{koszul_exponent, minus_one_to_the, BasisSurjection, SurjectionElement};
use crate::{error::check_torsion, Convention, Result, SurjectionError};

/// The representation of the symmetric group used to twist [`SurjectionElement::orbit`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Representation {
    #[default]
    Trivial,
    Sign,
}

/// Relabels the values of `key` by the permutation with the given images. Under McClure–Smith
/// the values carry the weights `multiplicity - 1`, and permuting them produces the
/// corresponding Koszul sign.
pub(crate) fn relabel(
    key: &BasisSurjection,
    images: &[u32],
    convention: Convention,
) -> (BasisSurjection, i64) {
    let relabeled = key
        .values()
        .iter()
        .map(|&v| images[v as usize - 1])
        .collect();
    let sign = match convention {
        Convention::BergerFresse => 1,
        Convention::McClureSmith => {
            let mut weights = vec![0; images.len()];
            for &v in key.values() {
                weights[v as usize - 1] += 1;
            }
            for w in &mut weights {
                *w -= 1;
            }
            minus_one_to_the(koszul_exponent(images, &weights))
        }
    };
    (BasisSurjection(relabeled), sign)
}

impl SurjectionElement {
    /// The left action of the group ring, `rho * self`.
    pub fn left_multiply(&self, rho: &SymmetricRingElement) -> Result<Self> {
        check_torsion(self.torsion(), rho.torsion())?;
        if self.arity() != rho.arity() {
            return Err(SurjectionError::ArityMismatch {
                left: rho.arity(),
                right: self.arity(),
            });
        }
        Ok(self.act(rho))
    }

    /// [`Self::left_multiply`] without the consistency checks.
    pub(crate) fn act(&self, rho: &SymmetricRingElement) -> Self {
        let mut result = self.zero();
        for (k1, v1) in self.iter() {
            for (perm, v2) in rho.iter() {
                let (key, sign) = relabel(k1, perm.images(), self.convention);
                result.sum.add_term(key, sign * v1 * v2);
            }
        }
        result
    }

    /// The preferred representative of the symmetric orbit of each term, namely the one in
    /// which the first occurrences of the values appear in increasing order. The relabeling is
    /// twisted by `representation`.
    pub fn orbit(&self, representation: Representation) -> Self {
        let mut result = self.zero();
        for (key, value) in self.iter() {
            let mut first_seen = Vec::with_capacity(key.arity());
            for &v in key.values() {
                if !first_seen.contains(&v) {
                    first_seen.push(v);
                }
            }
            // The inverse of the permutation listing values in order of first appearance.
            let mut images = vec![0; first_seen.len()];
            for (idx, &v) in first_seen.iter().enumerate() {
                images[v as usize - 1] = idx as u32 + 1;
            }
            let twist = match representation {
                Representation::Trivial => 1,
                Representation::Sign => {
                    minus_one_to_the(koszul_exponent(&images, &vec![1; images.len()]))
                }
            };
            let (key, sign) = relabel(key, &images, self.convention);
            result.sum.add_term(key, twist * sign * value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use rstest::rstest;
    use symmetric::Permutation;

    fn element(values: &[u32], convention: Convention) -> SurjectionElement {
        SurjectionElement::basis_element(values.to_vec(), convention).unwrap()
    }

    fn permutation(images: &[u32]) -> SymmetricRingElement {
        SymmetricRingElement::from_permutation(Permutation::new(images.to_vec()).unwrap(), None)
    }

    #[test]
    fn test_left_multiply() {
        let x = element(&[1, 2, 3, 1, 2], Convention::BergerFresse);
        expect![[r#"(2,3,1,2,3)"#]]
            .assert_eq(&x.left_multiply(&permutation(&[2, 3, 1])).unwrap().to_string());
        expect![[r#"- (1,2,3,1,2)"#]].assert_eq(&(-x).to_string());
    }

    #[test]
    fn test_left_multiply_mcclure_smith() {
        let x = element(&[1, 2, 1, 2], Convention::McClureSmith);
        expect![[r#"- (2,1,2,1)"#]]
            .assert_eq(&x.left_multiply(&permutation(&[2, 1])).unwrap().to_string());
    }

    #[test]
    fn test_left_multiply_errors() {
        let x = element(&[1, 2, 1], Convention::BergerFresse);
        assert_eq!(
            x.left_multiply(&SymmetricRingElement::rotation(3, None)),
            Err(SurjectionError::ArityMismatch {
                left: Some(3),
                right: Some(2)
            })
        );
        assert_eq!(
            x.left_multiply(&SymmetricRingElement::rotation(2, Some(3))),
            Err(SurjectionError::TorsionMismatch {
                left: None,
                right: Some(3)
            })
        );
    }

    #[rstest]
    #[case(Convention::BergerFresse)]
    #[case(Convention::McClureSmith)]
    fn test_action_commutes_with_boundary(#[case] convention: Convention) {
        let x = element(&[1, 3, 1, 2, 1], convention);
        let rho = SymmetricRingElement::rotation(3, None);
        assert_eq!(
            x.left_multiply(&rho).unwrap().boundary(),
            x.boundary().left_multiply(&rho).unwrap()
        );
    }

    #[test]
    fn test_orbit() {
        let x = element(&[1, 3, 2], Convention::BergerFresse);
        expect![[r#"(1,2,3)"#]].assert_eq(&x.orbit(Representation::Trivial).to_string());
        expect![[r#"- (1,2,3)"#]].assert_eq(&x.orbit(Representation::Sign).to_string());

        let y = element(&[1, 3, 1, 2, 1], Convention::BergerFresse);
        expect![[r#"(1,2,1,3,1)"#]].assert_eq(&y.orbit(Representation::Trivial).to_string());
        expect![[r#"- (1,2,1,3,1)"#]].assert_eq(&y.orbit(Representation::Sign).to_string());
    }

    #[test]
    fn test_orbit_is_idempotent() {
        for key in crate::basis(3, 2, None) {
            let x = element(key.values(), Convention::BergerFresse);
            let orbit = x.orbit(Representation::Trivial);
            assert_eq!(orbit.orbit(Representation::Trivial), orbit);
        }
    }
}
