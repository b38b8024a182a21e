//! Sun, Moon, and mean lunar node
//!
//! Meeus low-accuracy Sun (mean longitude + equation of center + apparent
//! correction) and the principal periodic terms of the Meeus Ch. 47 lunar
//! theory. Term coefficients are in millionths of a degree.

use jyotish_core::norm_deg;

const DEG2RAD: f64 = std::f64::consts::PI / 180.0;
const J2000: f64 = 2_451_545.0;

fn centuries(jd: f64) -> f64 {
    (jd - J2000) / 36_525.0
}

// ---------------------------------------------------------------------------
// Sun
// ---------------------------------------------------------------------------

/// Apparent geocentric ecliptic longitude of the Sun, degrees.
pub fn sun_longitude(jd: f64) -> f64 {
    let t = centuries(jd);

    let mean_lon = norm_deg(280.46646 + 36_000.76983 * t + 0.000_3032 * t * t);
    let mean_anomaly = norm_deg(357.52911 + 35_999.05029 * t - 0.000_1537 * t * t);
    let m = mean_anomaly * DEG2RAD;

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_lon = mean_lon + center;

    // Aberration and the nutation term in the node.
    let omega = (125.04 - 1934.136 * t) * DEG2RAD;
    norm_deg(true_lon - 0.005_69 - 0.004_78 * omega.sin())
}

// ---------------------------------------------------------------------------
// Moon
// ---------------------------------------------------------------------------

/// One periodic term: coefficient (1e-6 deg) and multiples of D, M, M', F.
struct LunarTerm(f64, i8, i8, i8, i8);

const LONGITUDE_TERMS: [LunarTerm; 32] = [
    LunarTerm(6_288_774.0, 0, 0, 1, 0),
    LunarTerm(1_274_027.0, 2, 0, -1, 0),
    LunarTerm(658_314.0, 2, 0, 0, 0),
    LunarTerm(213_618.0, 0, 0, 2, 0),
    LunarTerm(-185_116.0, 0, 1, 0, 0),
    LunarTerm(-114_332.0, 0, 0, 0, 2),
    LunarTerm(58_793.0, 2, 0, -2, 0),
    LunarTerm(57_066.0, 2, -1, -1, 0),
    LunarTerm(53_322.0, 2, 0, 1, 0),
    LunarTerm(45_758.0, 2, -1, 0, 0),
    LunarTerm(-40_923.0, 0, 1, -1, 0),
    LunarTerm(-34_720.0, 1, 0, 0, 0),
    LunarTerm(-30_383.0, 0, 1, 1, 0),
    LunarTerm(15_327.0, 2, 0, 0, -2),
    LunarTerm(-12_528.0, 0, 0, 1, 2),
    LunarTerm(10_980.0, 0, 0, 1, -2),
    LunarTerm(10_675.0, 4, 0, -1, 0),
    LunarTerm(10_034.0, 0, 0, 3, 0),
    LunarTerm(8_548.0, 4, 0, -2, 0),
    LunarTerm(-7_888.0, 2, 1, -1, 0),
    LunarTerm(-6_766.0, 2, 1, 0, 0),
    LunarTerm(-5_163.0, 1, 0, -1, 0),
    LunarTerm(4_987.0, 1, 1, 0, 0),
    LunarTerm(4_036.0, 2, -1, 1, 0),
    LunarTerm(3_994.0, 2, 0, 2, 0),
    LunarTerm(3_861.0, 4, 0, 0, 0),
    LunarTerm(3_665.0, 2, 0, -3, 0),
    LunarTerm(-2_689.0, 0, 1, -2, 0),
    LunarTerm(-2_602.0, 2, 0, -1, 2),
    LunarTerm(2_390.0, 2, -1, -2, 0),
    LunarTerm(-2_348.0, 1, 0, 1, 0),
    LunarTerm(2_236.0, 2, -2, 0, 0),
];

const LATITUDE_TERMS: [LunarTerm; 20] = [
    LunarTerm(5_128_122.0, 0, 0, 0, 1),
    LunarTerm(280_602.0, 0, 0, 1, 1),
    LunarTerm(277_693.0, 0, 0, 1, -1),
    LunarTerm(173_237.0, 2, 0, 0, -1),
    LunarTerm(55_413.0, 2, 0, -1, 1),
    LunarTerm(46_271.0, 2, 0, -1, -1),
    LunarTerm(32_573.0, 2, 0, 0, 1),
    LunarTerm(17_198.0, 0, 0, 2, 1),
    LunarTerm(9_266.0, 2, 0, 1, -1),
    LunarTerm(8_822.0, 0, 0, 2, -1),
    LunarTerm(8_216.0, 2, -1, 0, -1),
    LunarTerm(4_324.0, 2, 0, -2, -1),
    LunarTerm(4_200.0, 2, 0, 1, 1),
    LunarTerm(-3_359.0, 2, 1, 0, -1),
    LunarTerm(2_463.0, 2, -1, -1, 1),
    LunarTerm(2_211.0, 2, -1, 0, 1),
    LunarTerm(2_065.0, 2, -1, -1, -1),
    LunarTerm(-1_870.0, 0, 1, -1, -1),
    LunarTerm(1_828.0, 4, 0, -1, -1),
    LunarTerm(-1_794.0, 0, 1, 0, 1),
];

/// Fundamental lunar arguments in radians, plus the eccentricity factor.
struct LunarArgs {
    mean_longitude: f64,
    d: f64,
    m: f64,
    m_prime: f64,
    f: f64,
    ecc: f64,
    t: f64,
}

fn lunar_args(jd: f64) -> LunarArgs {
    let t = centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean_longitude = norm_deg(
        218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
            - t4 / 65_194_000.0,
    );
    let d = norm_deg(
        297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
            - t4 / 113_065_000.0,
    );
    let m = norm_deg(357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0);
    let m_prime = norm_deg(
        134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
            - t4 / 14_712_000.0,
    );
    let f = norm_deg(
        93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
            + t4 / 863_310_000.0,
    );
    let ecc = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    LunarArgs {
        mean_longitude,
        d: d * DEG2RAD,
        m: m * DEG2RAD,
        m_prime: m_prime * DEG2RAD,
        f: f * DEG2RAD,
        ecc,
        t,
    }
}

fn sum_terms(terms: &[LunarTerm], args: &LunarArgs) -> f64 {
    terms
        .iter()
        .map(|LunarTerm(coeff, d, m, mp, f)| {
            let arg = *d as f64 * args.d
                + *m as f64 * args.m
                + *mp as f64 * args.m_prime
                + *f as f64 * args.f;
            let ecc_scale = args.ecc.powi(m.unsigned_abs() as i32);
            coeff * ecc_scale * arg.sin()
        })
        .sum()
}

/// Geocentric ecliptic longitude of the Moon, degrees.
pub fn moon_longitude(jd: f64) -> f64 {
    let args = lunar_args(jd);
    let mut sum = sum_terms(&LONGITUDE_TERMS, &args);

    // Venus, Jupiter, and flattening corrections.
    let a1 = (119.75 + 131.849 * args.t) * DEG2RAD;
    let a2 = (53.09 + 479_264.290 * args.t) * DEG2RAD;
    sum += 3_958.0 * a1.sin();
    sum += 1_962.0 * (args.mean_longitude * DEG2RAD - args.f).sin();
    sum += 318.0 * a2.sin();

    norm_deg(args.mean_longitude + sum / 1e6)
}

/// Geocentric ecliptic latitude of the Moon, degrees.
pub fn moon_latitude(jd: f64) -> f64 {
    let args = lunar_args(jd);
    let mut sum = sum_terms(&LATITUDE_TERMS, &args);
    sum += -2_235.0 * (args.mean_longitude * DEG2RAD).sin();
    sum / 1e6
}

// ---------------------------------------------------------------------------
// Mean lunar node
// ---------------------------------------------------------------------------

/// Mean longitude of the ascending lunar node (Rahu), degrees.
pub fn mean_node(jd: f64) -> f64 {
    let t = centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    norm_deg(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t3 / 467_441.0
            - t4 / 60_616_000.0,
    )
}
