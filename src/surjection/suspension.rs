use symmetric::Permutation;

use super::{BasisSurjection, SurjectionElement};
use crate::{Convention, Result, SurjectionError};

impl SurjectionElement {
    /// The image in the operadic suspension, of degree `degree - arity + 1`.
    ///
    /// A term `u` of arity `r` vanishes unless `(u(1), …, u(r))` is a permutation, in which case
    /// it is sent to `(u(r), …, u(r + d))` with the sign of that permutation.
    pub fn suspension(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(self.clone());
        }
        let (arity, _) = self.check_homogeneous("suspension")?;
        if self.convention != Convention::BergerFresse {
            return Err(SurjectionError::NotImplemented {
                operation: "suspension",
                convention: self.convention,
            });
        }

        let mut result = self.zero();
        for (key, value) in self.iter() {
            let (head, _) = key.values().split_at(arity);
            if let Ok(permutation) = Permutation::new(head.to_vec()) {
                let tail = BasisSurjection(key.values()[arity - 1..].to_vec());
                result.sum.add_term(tail, permutation.sign() * value);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn element(values: &[u32]) -> SurjectionElement {
        SurjectionElement::basis_element(values.to_vec(), Convention::BergerFresse).unwrap()
    }

    #[test]
    fn test_suspension() {
        expect![[r#"- (2,1,2)"#]]
            .assert_eq(&element(&[1, 3, 2, 1, 2]).suspension().unwrap().to_string());
        assert!(element(&[1, 2, 1, 3, 1]).suspension().unwrap().is_zero());
        assert_eq!(element(&[2, 1]).suspension().unwrap(), element(&[1]) * -1);
    }

    #[test]
    fn test_suspension_errors() {
        let x = element(&[1, 2, 1]);
        assert_eq!(
            x.clone().with_convention(Convention::McClureSmith).suspension(),
            Err(SurjectionError::NotImplemented {
                operation: "suspension",
                convention: Convention::McClureSmith
            })
        );
        let mixed = x + element(&[1, 2, 3, 1]);
        assert_eq!(
            mixed.suspension(),
            Err(SurjectionError::Inhomogeneous("suspension"))
        );
    }
}
