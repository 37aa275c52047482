use core::fmt::{self, Debug, Display};

use num_bigint::BigUint;

use crate::{Error, Result};

/// An element of a hidden-order group, stored as its canonical residue.
///
/// Elements only combine through a [`HiddenOrderGroup`]; plain integer
/// arithmetic on exponents and responses uses [`BigUint`] directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Element(BigUint);

impl Element {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }
}

impl From<BigUint> for Element {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0.to_bytes_be()))
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({self})")
    }
}

/// Modular arithmetic over a group whose order is unknown to the parties.
pub trait HiddenOrderGroup: Clone + Debug + Send + Sync + 'static {
    fn name() -> &'static str;

    fn modulus(&self) -> &BigUint;

    fn modulus_bits(&self) -> u64 {
        self.modulus().bits()
    }

    /// `base^exponent mod N`.
    fn exp(&self, base: &Element, exponent: &BigUint) -> Element;

    /// `a * b mod N`.
    fn mul(&self, a: &Element, b: &Element) -> Element;

    /// Whether `e` is a canonical, invertible residue modulo `N`.
    fn contains(&self, e: &Element) -> bool;

    fn validate_element(&self, e: &Element) -> Result<()> {
        if self.contains(e) {
            Ok(())
        } else {
            Err(Error::InvalidGroupElement(format!(
                "{e} is not an invertible residue modulo N"
            )))
        }
    }
}

/// Multiplicative group modulo a special RSA modulus `N = (2p'+1)(2q'+1)`.
///
/// Commitment generators are expected to be quadratic residues, so they live
/// in the subgroup `QR_N` of order `p'q'`. Residuosity itself cannot be checked
/// without the factorization; [`HiddenOrderGroup::contains`] checks `Z_N^*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrSpecialRsa {
    modulus: BigUint,
}

impl QrSpecialRsa {
    /// Wraps an externally generated modulus.
    ///
    /// # Errors
    ///
    /// Returns an error if `N` is even or not larger than 3.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::from(3u8) {
            return Err(Error::InvalidParams(
                "modulus must be larger than 3".to_string(),
            ));
        }
        if !modulus.bit(0) {
            return Err(Error::InvalidParams("modulus must be odd".to_string()));
        }
        Ok(Self { modulus })
    }
}

impl HiddenOrderGroup for QrSpecialRsa {
    fn name() -> &'static str {
        "QR-special-RSA"
    }

    fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    fn exp(&self, base: &Element, exponent: &BigUint) -> Element {
        Element(base.0.modpow(exponent, &self.modulus))
    }

    fn mul(&self, a: &Element, b: &Element) -> Element {
        Element((&a.0 * &b.0) % &self.modulus)
    }

    fn contains(&self, e: &Element) -> bool {
        e.0 != BigUint::ZERO && e.0 < self.modulus && e.0.modinv(&self.modulus).is_some()
    }
}
