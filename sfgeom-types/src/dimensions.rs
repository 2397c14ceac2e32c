use serde::{Deserialize, Serialize};

/// Ordinates carried by a geometry in addition to `x` and `y`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimensions {
    /// Plain 2d.
    #[default]
    Xy,
    /// With elevation.
    Xyz,
    /// With linear reference.
    Xym,
    /// With both.
    Xyzm,
}

impl Dimensions {
    /// Combines a pair of flags.
    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Self::Xy,
            (true, false) => Self::Xyz,
            (false, true) => Self::Xym,
            (true, true) => Self::Xyzm,
        }
    }

    /// Whether `z` is present.
    pub fn has_z(self) -> bool {
        matches!(self, Self::Xyz | Self::Xyzm)
    }

    /// Whether `m` is present.
    pub fn has_m(self) -> bool {
        matches!(self, Self::Xym | Self::Xyzm)
    }

    /// Number of ordinates per position.
    pub fn size(self) -> usize {
        2 + self.has_z() as usize + self.has_m() as usize
    }

    /// Suffix written after the keyword in the text format, empty for [`Dimensions::Xy`].
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Xy => "",
            Self::Xyz => "Z",
            Self::Xym => "M",
            Self::Xyzm => "ZM",
        }
    }

    /// Case-insensitive inverse of [`Dimensions::suffix`] for the non-empty suffixes.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        [Self::Xyz, Self::Xym, Self::Xyzm]
            .into_iter()
            .find(|d| d.suffix().eq_ignore_ascii_case(suffix))
    }

    /// Dimensionality shared by all `children`: an ordinate is kept only if every child carries it.
    /// No children results in [`Dimensions::Xy`].
    pub fn common(children: impl IntoIterator<Item = Dimensions>) -> Self {
        let mut children = children.into_iter().peekable();
        if children.peek().is_none() {
            return Self::Xy;
        }

        let (z, m) = children.fold((true, true), |(z, m), d| (z && d.has_z(), m && d.has_m()));
        Self::from_flags(z, m)
    }
}
