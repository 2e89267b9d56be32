//! Filter coefficient tables and family constructors.
//!
//! Coefficients are from Daubechies, "Ten Lectures on Wavelets" (1992),
//! with numerical values cross-checked against PyWavelets. Low-pass
//! decomposition filters are stored; the remaining channels derive from
//! the quadrature mirror / alternating-flip relations.

use crate::error::WaveletError;
use crate::wavelet::Wavelet;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Daubechies 2: 4 taps, 2 vanishing moments.
const DB2_LOW: [f64; 4] = [
    0.4829629131445341,
    0.8365163037378079,
    0.2241438680420134,
    -0.1294095225512603,
];

/// Daubechies 4: 8 taps, 4 vanishing moments.
const DB4_LOW: [f64; 8] = [
    0.2303778133088964,
    0.7148465705529154,
    0.6308807679298587,
    -0.0279837693982488,
    -0.1870348117190931,
    0.0308413818355607,
    0.0328830116668852,
    -0.0105974017850690,
];

/// Daubechies 6: 12 taps, 6 vanishing moments.
const DB6_LOW: [f64; 12] = [
    0.1115407433501094,
    0.4946238903984530,
    0.7511339080210954,
    0.3152503517091980,
    -0.2262646939654399,
    -0.1297668675672624,
    0.0975016055873224,
    0.0275228655303053,
    -0.0315820393174862,
    0.0005538422011614,
    0.0047772575109455,
    -0.0010773010853085,
];

/// Daubechies 8: 16 taps, 8 vanishing moments.
const DB8_LOW: [f64; 16] = [
    0.0544158422431049,
    0.3128715909143031,
    0.6756307362972904,
    0.5853546836541907,
    -0.0158291052563816,
    -0.2840155429615702,
    0.0004724845739124,
    0.1287474266204837,
    -0.0173693010018083,
    -0.0440882539307952,
    0.0139810279173995,
    0.0087460940474061,
    -0.0048703529934518,
    -0.0003917403733770,
    0.0006754494064506,
    -0.0001174767841248,
];

/// Symlet 2: 4 taps.
const SYM2_LOW: [f64; 4] = [
    0.48296291314453414,
    0.83651630373780772,
    0.22414386804201339,
    -0.12940952255126034,
];

/// Symlet 3: 6 taps.
const SYM3_LOW: [f64; 6] = [
    0.33267055295095688,
    0.80689150931333875,
    0.45987750211933132,
    -0.13501102001039084,
    -0.08544127388224149,
    0.03522629188210562,
];

/// Symlet 4: 8 taps, near-symmetric.
const SYM4_LOW: [f64; 8] = [
    0.03222310060407815,
    -0.01260396726226383,
    -0.09921954357695636,
    0.29785779560553225,
    0.80373875180591614,
    0.49761866763256292,
    -0.02963552764596039,
    -0.07576571478935668,
];

/// Coiflet 1: 6 taps.
const COIF1_LOW: [f64; 6] = [
    -0.0156557281354645,
    -0.0727326195128561,
    0.3848648468642029,
    0.8525720202122554,
    0.3378976624578092,
    -0.0727326195128561,
];

/// Coiflet 2: 12 taps.
const COIF2_LOW: [f64; 12] = [
    -0.0007205494453645,
    -0.0018232088709132,
    0.0056211431711065,
    0.0235962077162017,
    -0.0594274367855454,
    -0.0764421423447531,
    0.4170051844216925,
    0.8127236354455423,
    0.3861100668250532,
    -0.0673725547219630,
    -0.0414649367817581,
    0.0164064277978058,
];

/// Haar wavelet (2 taps).
pub fn haar() -> Wavelet {
    Wavelet::orthogonal("haar", vec![FRAC_1_SQRT_2, FRAC_1_SQRT_2])
}

/// Daubechies wavelet of the given order (number of vanishing moments).
///
/// Supported orders: 2, 4, 6, 8. The filter length is twice the order, so
/// `daubechies(4)` is the 8-tap DB4 filter.
///
/// # Errors
///
/// Returns [`WaveletError::UnsupportedOrder`] for any other order.
pub fn daubechies(order: usize) -> Result<Wavelet, WaveletError> {
    let low: &[f64] = match order {
        2 => &DB2_LOW,
        4 => &DB4_LOW,
        6 => &DB6_LOW,
        8 => &DB8_LOW,
        _ => {
            return Err(WaveletError::UnsupportedOrder {
                family: "daubechies",
                order,
            });
        }
    };
    let name = match order {
        2 => "db2",
        4 => "db4",
        6 => "db6",
        _ => "db8",
    };
    Ok(Wavelet::orthogonal(name, low.to_vec()))
}

/// Symlet wavelet of the given order.
///
/// Supported orders: 2, 3, 4.
///
/// # Errors
///
/// Returns [`WaveletError::UnsupportedOrder`] for any other order.
pub fn symlet(order: usize) -> Result<Wavelet, WaveletError> {
    let (name, low): (&'static str, &[f64]) = match order {
        2 => ("sym2", &SYM2_LOW),
        3 => ("sym3", &SYM3_LOW),
        4 => ("sym4", &SYM4_LOW),
        _ => {
            return Err(WaveletError::UnsupportedOrder {
                family: "symlet",
                order,
            });
        }
    };
    Ok(Wavelet::orthogonal(name, low.to_vec()))
}

/// Coiflet wavelet of the given order.
///
/// Supported orders: 1, 2.
///
/// # Errors
///
/// Returns [`WaveletError::UnsupportedOrder`] for any other order.
pub fn coiflet(order: usize) -> Result<Wavelet, WaveletError> {
    let (name, low): (&'static str, &[f64]) = match order {
        1 => ("coif1", &COIF1_LOW),
        2 => ("coif2", &COIF2_LOW),
        _ => {
            return Err(WaveletError::UnsupportedOrder {
                family: "coiflet",
                order,
            });
        }
    };
    Ok(Wavelet::orthogonal(name, low.to_vec()))
}

/// Biorthogonal spline 1.1 (Haar-like, symmetric).
pub fn bior1_1() -> Wavelet {
    Wavelet::biorthogonal(
        "bior1.1",
        vec![FRAC_1_SQRT_2, FRAC_1_SQRT_2],
        vec![FRAC_1_SQRT_2, FRAC_1_SQRT_2],
        1.0,
        0,
    )
}

/// Biorthogonal spline 1.3 (CDF 1,3), commonly used for edge detection.
///
/// The analysis-synthesis cascade has unit gain only after scaling by 1/2
/// and introduces a cyclic delay of 2 samples, both carried on the record.
pub fn bior1_3() -> Wavelet {
    Wavelet::biorthogonal(
        "bior1.3",
        vec![-0.125, 0.125, 1.0, 1.0, 0.125, -0.125],
        vec![1.0, 1.0],
        0.5,
        2,
    )
}

/// Biorthogonal spline 2.2 (CDF 2,2), linear spline.
pub fn bior2_2() -> Wavelet {
    Wavelet::biorthogonal(
        "bior2.2",
        vec![
            -0.1767766952966369,
            0.3535533905932738,
            1.0606601717798214,
            0.3535533905932738,
            -0.1767766952966369,
        ],
        vec![0.3535533905932738, 0.7071067811865476, 0.3535533905932738],
        1.0,
        2,
    )
}

/// Biorthogonal spline 3.1, minimal phase distortion.
pub fn bior3_1() -> Wavelet {
    Wavelet::biorthogonal(
        "bior3.1",
        vec![
            -0.3535533905932738,
            1.0606601717798214,
            1.0606601717798214,
            -0.3535533905932738,
        ],
        vec![
            0.1767766952966369,
            0.5303300858899107,
            0.5303300858899107,
            0.1767766952966369,
        ],
        1.0,
        2,
    )
}

/// Biorthogonal spline 4.4 (CDF 9/7), the JPEG2000 filter pair.
pub fn bior4_4() -> Wavelet {
    Wavelet::biorthogonal(
        "bior4.4",
        vec![
            0.03782845550699,
            -0.02384946501938,
            -0.11062440441842,
            0.37740285561265,
            0.85269867900940,
            0.37740285561265,
            -0.11062440441842,
            -0.02384946501938,
            0.03782845550699,
        ],
        vec![
            -0.06453888262876,
            -0.04068941760916,
            0.41809227322162,
            0.78848561640558,
            0.41809227322162,
            -0.04068941760916,
            -0.06453888262876,
        ],
        1.0,
        4,
    )
}

/// Morlet wavelet placeholder (continuous, no discrete filter bank).
pub fn morlet() -> Wavelet {
    Wavelet::continuous("morl")
}

/// Mexican hat wavelet placeholder (continuous, no discrete filter bank).
pub fn mexican_hat() -> Wavelet {
    Wavelet::continuous("mexh")
}
