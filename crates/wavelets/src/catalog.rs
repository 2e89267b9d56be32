//! Name-keyed wavelet catalog.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::WaveletError;
use crate::families;
use crate::wavelet::Wavelet;

/// Stable ordered list of orthogonal catalog names.
pub const ORTHOGONAL_NAMES: [&str; 10] = [
    "haar", "db2", "db4", "db6", "db8", "sym2", "sym3", "sym4", "coif1", "coif2",
];

/// Stable ordered list of biorthogonal catalog names.
pub const BIORTHOGONAL_NAMES: [&str; 5] =
    ["bior1.1", "bior1.3", "bior2.2", "bior3.1", "bior4.4"];

/// Stable ordered list of continuous catalog names (non-MODWT entries).
pub const CONTINUOUS_NAMES: [&str; 2] = ["morl", "mexh"];

static CATALOG: LazyLock<BTreeMap<&'static str, Wavelet>> = LazyLock::new(|| {
    let entries = [
        families::haar(),
        families::daubechies(2).expect("catalog order"),
        families::daubechies(4).expect("catalog order"),
        families::daubechies(6).expect("catalog order"),
        families::daubechies(8).expect("catalog order"),
        families::symlet(2).expect("catalog order"),
        families::symlet(3).expect("catalog order"),
        families::symlet(4).expect("catalog order"),
        families::coiflet(1).expect("catalog order"),
        families::coiflet(2).expect("catalog order"),
        families::bior1_1(),
        families::bior1_3(),
        families::bior2_2(),
        families::bior3_1(),
        families::bior4_4(),
        families::morlet(),
        families::mexican_hat(),
    ];
    entries.into_iter().map(|w| (w.name(), w)).collect()
});

/// Looks up a wavelet by its catalog name (case insensitive).
///
/// # Errors
///
/// Returns [`WaveletError::UnknownWavelet`] if the name is not in the catalog.
///
/// # Example
///
/// ```
/// use vectorwave_wavelets::get_wavelet;
///
/// let w = get_wavelet("db4").unwrap();
/// assert_eq!(w.dec_low().len(), 8);
/// ```
pub fn get_wavelet(name: &str) -> Result<Wavelet, WaveletError> {
    let lowered = name.to_lowercase();
    CATALOG
        .get(lowered.as_str())
        .cloned()
        .ok_or_else(|| WaveletError::UnknownWavelet(name.to_string()))
}

/// Returns the orthogonal wavelets in stable catalog order.
pub fn orthogonal_wavelets() -> Vec<Wavelet> {
    ORTHOGONAL_NAMES
        .iter()
        .map(|n| CATALOG[n].clone())
        .collect()
}

/// Returns the biorthogonal wavelets in stable catalog order.
pub fn biorthogonal_wavelets() -> Vec<Wavelet> {
    BIORTHOGONAL_NAMES
        .iter()
        .map(|n| CATALOG[n].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavelet::WaveletKind;

    #[test]
    fn lookup_known_names() {
        for name in ORTHOGONAL_NAMES {
            let w = get_wavelet(name).unwrap();
            assert_eq!(w.name(), name);
            assert_eq!(w.kind(), WaveletKind::Orthogonal);
        }
        for name in BIORTHOGONAL_NAMES {
            let w = get_wavelet(name).unwrap();
            assert_eq!(w.kind(), WaveletKind::Biorthogonal);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(get_wavelet("DB4").unwrap().name(), "db4");
        assert_eq!(get_wavelet("Bior1.3").unwrap().name(), "bior1.3");
    }

    #[test]
    fn lookup_unknown_name() {
        let err = get_wavelet("db99").unwrap_err();
        assert!(matches!(err, WaveletError::UnknownWavelet(ref s) if s == "db99"));
    }

    #[test]
    fn continuous_entries_are_not_discrete() {
        for name in CONTINUOUS_NAMES {
            let w = get_wavelet(name).unwrap();
            assert_eq!(w.kind(), WaveletKind::Continuous);
            assert!(!w.is_discrete());
        }
    }

    #[test]
    fn family_lists_are_stable() {
        let names: Vec<&str> = orthogonal_wavelets().iter().map(|w| w.name()).collect();
        assert_eq!(names, ORTHOGONAL_NAMES.to_vec());
        let names: Vec<&str> = biorthogonal_wavelets().iter().map(|w| w.name()).collect();
        assert_eq!(names, BIORTHOGONAL_NAMES.to_vec());
    }
}
