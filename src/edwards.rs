//! The NUMS-256 twisted Edwards group ("ed-256-mers*").
//!
//! Curve equation: x² + y² = 1 + d·x²·y² over F_p with p = 2^256 − 189 and
//! d = 15343. The prime-order subgroup has order
//! r = 2^254 − 87175310462106073678594642380840586067; the cofactor is 4.
//!
//! [`Point`] is a free-standing affine value type. Every point returned by a
//! public constructor either is the neutral element O = (0, 1) or lies in
//! the order-r subgroup: [`decompress`] refuses candidates that fail the
//! r-torsion check, which is the guard against small-subgroup attacks.

use std::fmt;
use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::field;

/// Curve equation coefficient d = 15343.
pub static D: LazyLock<BigUint> = LazyLock::new(|| BigUint::from(15343u32));

/// Order r of the prime-order subgroup.
pub static R: LazyLock<BigUint> = LazyLock::new(|| {
    (BigUint::one() << 254u32)
        - BigUint::parse_bytes(b"87175310462106073678594642380840586067", 10)
            .expect("group order literal parses")
});

/// Bit length of the group order; the fixed iteration count of the scalar
/// multiplication ladder.
pub const SCALAR_BITS: u64 = 254;

/// Byte length of an encoded scalar, ⌈bits(r) / 8⌉.
pub const SCALAR_BYTES: usize = 32;

static GENERATOR: LazyLock<Point> = LazyLock::new(|| {
    // y = −4 mod p with the even choice of x.
    let y = &*field::P - 4u32;
    decompress(&y, false).expect("the NUMS-256 generator is a valid group element")
});

/// A point of the curve in affine coordinates.
///
/// Equality is component-wise. Construction goes through [`neutral`],
/// [`generator`], [`decompress`] or the group operations; raw coordinates
/// from untrusted input are validated by [`decompress`].
///
/// [`neutral`]: Point::neutral
#[derive(Clone, PartialEq, Eq)]
pub struct Point {
    x: BigUint,
    y: BigUint,
}

/// True iff (x, y) satisfies x² + y² ≡ 1 + d·x²·y² (mod p).
pub fn is_on_curve(x: &BigUint, y: &BigUint) -> bool {
    if x >= &*field::P || y >= &*field::P {
        return false;
    }
    let x2 = field::mul(x, x);
    let y2 = field::mul(y, y);
    let lhs = field::add(&x2, &y2);
    let rhs = field::add(&BigUint::one(), &field::mul(&D, &field::mul(&x2, &y2)));
    lhs == rhs
}

/// The generator G, whose y-coordinate is −4 mod p with even x.
pub fn generator() -> Point {
    GENERATOR.clone()
}

/// Reconstruct a point from its y-coordinate and the parity of x.
///
/// Solves x² = (1 − y²) / (1 − d·y²) mod p and extracts the root with the
/// requested least-significant bit. Returns `None` when no root exists or
/// when the decoded point is not r-torsion (`r·P ≠ O`); rejecting the
/// latter keeps points of the small cofactor subgroups out of every
/// protocol. Protocol layers surface `None` as an invalid-point error,
/// never as a silent neutral element.
pub fn decompress(y: &BigUint, x_lsb: bool) -> Option<Point> {
    if y >= &*field::P {
        return None;
    }
    let y2 = field::mul(y, y);
    let num = field::sub(&BigUint::one(), &y2);
    let den = field::sub(&BigUint::one(), &field::mul(&D, &y2));
    let x2 = field::mul(&num, &field::inv(&den)?);
    let x = field::sqrt(&x2, x_lsb)?;
    let point = Point { x, y: y.clone() };
    if !point.mul_raw(&R).is_neutral() {
        return None;
    }
    Some(point)
}

impl Point {
    /// The neutral element O = (0, 1).
    pub fn neutral() -> Self {
        Point {
            x: BigUint::zero(),
            y: BigUint::one(),
        }
    }

    /// True iff this point is O.
    pub fn is_neutral(&self) -> bool {
        self.x.is_zero() && self.y.is_one()
    }

    /// The x-coordinate.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// The y-coordinate.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Complete affine addition.
    ///
    /// With D = d·x1·x2·y1·y2, the sum is
    /// ((x1·y2 + y1·x2)/(1 + D), (y1·y2 − x1·x2)/(1 − D)). The formulas are
    /// complete for our non-square d: the denominators never vanish on
    /// r-torsion inputs, and O behaves as the identity without a special
    /// case.
    pub fn add(&self, other: &Point) -> Point {
        let x1x2 = field::mul(&self.x, &other.x);
        let y1y2 = field::mul(&self.y, &other.y);
        let x1y2 = field::mul(&self.x, &other.y);
        let y1x2 = field::mul(&self.y, &other.x);
        let dxy = field::mul(&D, &field::mul(&x1x2, &y1y2));
        let one = BigUint::one();
        let inv_plus = field::inv(&field::add(&one, &dxy))
            .expect("1 + d*x1*x2*y1*y2 is invertible for subgroup points");
        let inv_minus = field::inv(&field::sub(&one, &dxy))
            .expect("1 - d*x1*x2*y1*y2 is invertible for subgroup points");
        Point {
            x: field::mul(&field::add(&x1y2, &y1x2), &inv_plus),
            y: field::mul(&field::sub(&y1y2, &x1x2), &inv_minus),
        }
    }

    /// Point doubling, `self + self`.
    pub fn double(&self) -> Point {
        self.add(self)
    }

    /// The opposite point (−x mod p, y).
    pub fn negate(&self) -> Point {
        Point {
            x: field::neg(&self.x),
            y: self.y.clone(),
        }
    }

    /// The compressed form: the y-coordinate and the parity of x.
    pub fn compress(&self) -> (BigUint, bool) {
        (self.y.clone(), self.x.bit(0))
    }

    /// Scalar multiplication `m·P`, reducing `m` mod r first.
    ///
    /// Montgomery ladder with the fixed iteration count [`SCALAR_BITS`]; the
    /// ladder invariant keeps both accumulators one point apart regardless
    /// of the scalar bits.
    pub fn mul(&self, m: &BigUint) -> Point {
        self.mul_raw(&(m % &*R))
    }

    // Ladder without the mod-r reduction, so the r-torsion check itself can
    // multiply by r.
    fn mul_raw(&self, m: &BigUint) -> Point {
        let bits = SCALAR_BITS.max(m.bits());
        let mut r0 = Point::neutral();
        let mut r1 = self.clone();
        for i in (0..bits).rev() {
            if m.bit(i) {
                r0 = r0.add(&r1);
                r1 = r1.double();
            } else {
                r1 = r0.add(&r1);
                r0 = r0.double();
            }
        }
        r0
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:#x}, {:#x})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
