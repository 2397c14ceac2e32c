//! Numeric type codes of the ISO "extended" numbering.
//!
//! `code = ordinal + 1000 * hasZ + 2000 * hasM`, so the thousands digit (the *mode*) encodes the
//! dimensionality and the remainder the kind ordinal. The legacy 2.5D high-bit scheme is a concern
//! of the binary reader only and is never produced here.

use crate::error::GeometryError;
use crate::kind::GeometryKind;

const MODE_Z: u32 = 1000;
const MODE_M: u32 = 2000;

/// Type code of a concrete `kind` with the given dimensionality.
pub fn code(kind: GeometryKind, has_z: bool, has_m: bool) -> Result<u32, GeometryError> {
    let kind = kind.concrete()?;
    let mut code = kind.ordinal();
    if has_z {
        code += MODE_Z;
    }
    if has_m {
        code += MODE_M;
    }

    Ok(code)
}

/// Kind encoded in a type code. Fails for unknown ordinals and for abstract kinds.
pub fn kind(code: u32) -> Result<GeometryKind, GeometryError> {
    GeometryKind::from_ordinal(code % 1000)?.concrete()
}

/// Whether the type code carries Z ordinates.
pub fn has_z(code: u32) -> Result<bool, GeometryError> {
    match code / 1000 {
        1 | 3 => Ok(true),
        0 | 2 => Ok(false),
        _ => Err(GeometryError::InvalidTypeCode(code)),
    }
}

/// Whether the type code carries M ordinates.
pub fn has_m(code: u32) -> Result<bool, GeometryError> {
    match code / 1000 {
        2 | 3 => Ok(true),
        0 | 1 => Ok(false),
        _ => Err(GeometryError::InvalidTypeCode(code)),
    }
}

/// Resolves kind and dimensionality of a type code in one go.
pub fn decompose(code: u32) -> Result<(GeometryKind, bool, bool), GeometryError> {
    Ok((kind(code)?, has_z(code)?, has_m(code)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn bijection_for_concrete_kinds() {
        let concrete = GeometryKind::ALL.into_iter().filter(|k| !k.is_abstract());
        for k in concrete {
            for z in [false, true] {
                for m in [false, true] {
                    let c = code(k, z, m).unwrap();
                    assert_eq!(kind(c).unwrap(), k);
                    assert_eq!(has_z(c).unwrap(), z);
                    assert_eq!(has_m(c).unwrap(), m);
                }
            }
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(code(GeometryKind::Point, false, false).unwrap(), 1);
        assert_eq!(code(GeometryKind::Point, true, false).unwrap(), 1001);
        assert_eq!(code(GeometryKind::LineString, false, true).unwrap(), 2002);
        assert_eq!(code(GeometryKind::Triangle, true, true).unwrap(), 3017);
    }

    #[test]
    fn abstract_kinds_fail() {
        for k in [
            GeometryKind::Geometry,
            GeometryKind::Curve,
            GeometryKind::Surface,
        ] {
            assert_matches!(code(k, false, false), Err(GeometryError::AbstractKind(v)) if v == k);
            assert_matches!(kind(k.ordinal() + 1000), Err(GeometryError::AbstractKind(_)));
        }
    }

    #[test]
    fn invalid_codes() {
        assert_matches!(kind(18), Err(GeometryError::UnsupportedKind { ordinal: 18 }));
        assert_matches!(kind(1999), Err(GeometryError::UnsupportedKind { ordinal: 999 }));
        assert_matches!(has_z(4001), Err(GeometryError::InvalidTypeCode(4001)));
        assert_matches!(has_m(4001), Err(GeometryError::InvalidTypeCode(4001)));
        assert_matches!(decompose(5003), Err(GeometryError::InvalidTypeCode(5003)));
    }
}
