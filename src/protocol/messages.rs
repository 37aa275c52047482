//! The three protocol messages exchanged between prover and verifier.

use num_bigint::BigUint;

use crate::Element;

/// First message from the prover: `t = G^r1 * H^r2 mod N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofRandomData(Element);

impl ProofRandomData {
    pub fn new(t: Element) -> Self {
        Self(t)
    }

    pub fn element(&self) -> &Element {
        &self.0
    }
}

/// Second message, from the verifier: a challenge in `[0, 2^k)`.
///
/// Construction does not check the range; the receiving party does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge(BigUint);

impl Challenge {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for Challenge {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

/// Third message from the prover: `s1 = r1 + c*a` and `s2 = r2 + c*r`.
///
/// Both values are exact integers, never reduced modulo `N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    s1: BigUint,
    s2: BigUint,
}

impl Response {
    pub fn new(s1: BigUint, s2: BigUint) -> Self {
        Self { s1, s2 }
    }

    pub fn s1(&self) -> &BigUint {
        &self.s1
    }

    pub fn s2(&self) -> &BigUint {
        &self.s2
    }
}
