//! Keplerian planetary positions
//!
//! Orbital elements at J2000.0 (Standish 1992 set) with linear rates per
//! Julian century. Positions are built heliocentrically in three dimensions
//! and differenced against Earth for the geocentric view.

use jyotish_core::{norm_deg, Body};

const DEG2RAD: f64 = std::f64::consts::PI / 180.0;
const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;
const J2000: f64 = 2_451_545.0;

/// Mean element and its per-century rate.
#[derive(Debug, Clone, Copy)]
struct Drifting(f64, f64);

impl Drifting {
    fn at(&self, t: f64) -> f64 {
        self.0 + self.1 * t
    }
}

/// J2000 osculating elements with secular rates.
#[derive(Debug, Clone, Copy)]
struct Elements {
    /// Mean longitude (deg).
    mean_longitude: Drifting,
    /// Semi-major axis (au).
    semi_major: f64,
    /// Eccentricity.
    eccentricity: Drifting,
    /// Inclination to the ecliptic (deg).
    inclination: Drifting,
    /// Longitude of the ascending node (deg).
    node: Drifting,
    /// Longitude of perihelion (deg).
    perihelion: Drifting,
}

const EARTH: Elements = Elements {
    mean_longitude: Drifting(100.464_571_66, 35_999.372_449_81),
    semi_major: 1.000_002_61,
    eccentricity: Drifting(0.016_711_23, -0.000_043_92),
    inclination: Drifting(-0.000_015_31, -0.012_946_68),
    node: Drifting(0.0, 0.0),
    perihelion: Drifting(102.937_681_93, 0.323_273_64),
};

fn elements(body: Body) -> Option<&'static Elements> {
    const MERCURY: Elements = Elements {
        mean_longitude: Drifting(252.250_323_50, 149_472.674_111_75),
        semi_major: 0.387_099_27,
        eccentricity: Drifting(0.205_635_93, 0.000_019_06),
        inclination: Drifting(7.004_979_02, -0.005_947_49),
        node: Drifting(48.330_765_93, -0.125_340_81),
        perihelion: Drifting(77.457_796_28, 0.160_476_89),
    };
    const VENUS: Elements = Elements {
        mean_longitude: Drifting(181.979_099_50, 58_517.815_387_29),
        semi_major: 0.723_335_66,
        eccentricity: Drifting(0.006_776_72, -0.000_041_07),
        inclination: Drifting(3.394_676_05, -0.000_788_90),
        node: Drifting(76.679_842_55, -0.277_694_18),
        perihelion: Drifting(131.602_467_18, 0.002_683_29),
    };
    const MARS: Elements = Elements {
        mean_longitude: Drifting(355.446_562_99, 19_140.302_684_99),
        semi_major: 1.523_710_34,
        eccentricity: Drifting(0.093_394_10, 0.000_078_82),
        inclination: Drifting(1.849_691_42, -0.008_131_31),
        node: Drifting(49.559_538_91, -0.292_573_43),
        perihelion: Drifting(336.056_370_41, 0.444_410_88),
    };
    const JUPITER: Elements = Elements {
        mean_longitude: Drifting(34.396_440_51, 3_034.746_127_75),
        semi_major: 5.202_887_00,
        eccentricity: Drifting(0.048_386_24, -0.000_132_53),
        inclination: Drifting(1.304_396_95, -0.001_837_14),
        node: Drifting(100.473_909_09, 0.204_691_06),
        perihelion: Drifting(14.728_479_83, 0.212_526_68),
    };
    const SATURN: Elements = Elements {
        mean_longitude: Drifting(49.954_244_23, 1_222.493_622_01),
        semi_major: 9.536_675_94,
        eccentricity: Drifting(0.053_861_79, -0.000_509_91),
        inclination: Drifting(2.485_991_87, 0.001_936_09),
        node: Drifting(113.662_424_48, -0.288_677_94),
        perihelion: Drifting(92.598_878_31, -0.418_972_16),
    };
    const URANUS: Elements = Elements {
        mean_longitude: Drifting(313.238_104_51, 428.482_027_85),
        semi_major: 19.189_164_64,
        eccentricity: Drifting(0.047_257_44, -0.000_043_97),
        inclination: Drifting(0.772_637_83, -0.002_429_39),
        node: Drifting(74.016_925_03, 0.042_405_89),
        perihelion: Drifting(170.954_276_30, 0.408_052_81),
    };
    const NEPTUNE: Elements = Elements {
        mean_longitude: Drifting(304.879_970_31, 218.459_453_25),
        semi_major: 30.069_922_76,
        eccentricity: Drifting(0.008_590_48, 0.000_051_05),
        inclination: Drifting(1.770_043_47, 0.000_353_72),
        node: Drifting(131.784_225_74, -0.012_996_30),
        perihelion: Drifting(44.964_762_27, -0.322_414_64),
    };
    const PLUTO: Elements = Elements {
        mean_longitude: Drifting(238.929_038_33, 145.207_805_15),
        semi_major: 39.482_116_75,
        eccentricity: Drifting(0.248_827_30, 0.000_051_70),
        inclination: Drifting(17.140_012_06, 0.000_048_18),
        node: Drifting(110.303_936_84, -0.011_834_82),
        perihelion: Drifting(224.068_916_29, -0.040_629_42),
    };

    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        _ => None,
    }
}

/// Solve Kepler's equation M = E - e sin E by Newton-Raphson.
/// `mean_anomaly` in radians; returns the eccentric anomaly in radians.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ecc_anomaly = mean_anomaly;
    for _ in 0..50 {
        let delta = (ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * ecc_anomaly.cos());
        ecc_anomaly -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc_anomaly
}

/// Heliocentric rectangular ecliptic coordinates (au).
fn heliocentric(el: &Elements, t: f64) -> (f64, f64, f64) {
    let mean_lon = norm_deg(el.mean_longitude.at(t));
    let ecc = el.eccentricity.at(t);
    let node = norm_deg(el.node.at(t));
    let peri = norm_deg(el.perihelion.at(t));
    let incl = el.inclination.at(t) * DEG2RAD;

    let mean_anomaly = norm_deg(mean_lon - peri) * DEG2RAD;
    let ecc_anomaly = solve_kepler(mean_anomaly, ecc);

    let true_anomaly = ((1.0 - ecc * ecc).sqrt() * ecc_anomaly.sin())
        .atan2(ecc_anomaly.cos() - ecc);
    let radius = el.semi_major * (1.0 - ecc * ecc_anomaly.cos());

    // Argument of latitude: angle from the node in the orbital plane.
    let arg_lat = true_anomaly * RAD2DEG + peri - node;
    let u = arg_lat * DEG2RAD;
    let node_rad = node * DEG2RAD;

    let x = radius * (node_rad.cos() * u.cos() - node_rad.sin() * u.sin() * incl.cos());
    let y = radius * (node_rad.sin() * u.cos() + node_rad.cos() * u.sin() * incl.cos());
    let z = radius * u.sin() * incl.sin();
    (x, y, z)
}

/// Geocentric ecliptic longitude and latitude (degrees) of a Keplerian
/// body at a Julian Day. `None` for bodies without orbital elements
/// (Sun, Moon, nodes).
pub fn geocentric(body: Body, jd: f64) -> Option<(f64, f64)> {
    let el = elements(body)?;
    let t = (jd - J2000) / 36_525.0;

    let (px, py, pz) = heliocentric(el, t);
    let (ex, ey, ez) = heliocentric(&EARTH, t);

    let gx = px - ex;
    let gy = py - ey;
    let gz = pz - ez;

    let longitude = norm_deg(gy.atan2(gx) * RAD2DEG);
    let latitude = gz.atan2((gx * gx + gy * gy).sqrt()) * RAD2DEG;
    Some((longitude, latitude))
}
