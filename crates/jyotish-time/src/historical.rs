//! Historical timezone region table for civil years before 1955
//!
//! Each region carries its offset history as year breakpoints. An `Lmt`
//! rule means local mean time: offset = longitude / 15. Year ranges are
//! half-open `[from, to)`. US "War Time" for the Eastern seaboard is kept
//! year-round for 1917-1919, matching the chart convention this engine
//! reproduces rather than the seasonal civil record.

/// Offset rule in force for a span of years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetRule {
    /// Local mean time: longitude degrees / 15.
    Lmt,
    /// Fixed UTC offset in decimal hours.
    Fixed(f64),
}

#[derive(Debug, Clone, Copy)]
struct Breakpoint {
    from_year: i32,
    to_year: i32,
    rule: OffsetRule,
}

/// A geographic region with its own pre-1955 offset history.
#[derive(Debug)]
pub struct Region {
    pub name: &'static str,
    zone_prefixes: &'static [&'static str],
    place_keywords: &'static [&'static str],
    /// (lat_min, lat_max, lon_min, lon_max)
    bbox: Option<(f64, f64, f64, f64)>,
    breakpoints: &'static [Breakpoint],
}

impl Region {
    /// Rule in force for a civil year, if this region covers it.
    pub fn rule_for_year(&self, year: i32) -> Option<OffsetRule> {
        self.breakpoints
            .iter()
            .find(|bp| year >= bp.from_year && year < bp.to_year)
            .map(|bp| bp.rule)
    }

    fn matches_zone(&self, zone_id: &str) -> bool {
        self.zone_prefixes.iter().any(|p| zone_id.starts_with(p))
    }

    fn matches_place(&self, place: &str) -> bool {
        let lower = place.to_lowercase();
        self.place_keywords.iter().any(|k| lower.contains(k))
    }

    fn contains(&self, lat: f64, lon: f64) -> bool {
        match self.bbox {
            Some((lat_min, lat_max, lon_min, lon_max)) => {
                lat >= lat_min && lat <= lat_max && lon >= lon_min && lon <= lon_max
            }
            None => false,
        }
    }
}

const MIN_YEAR: i32 = -4712;

// India: Bombay time +4:51 between the railway-time era and independence,
// wartime +6:30, IST +5:30 from 1947.
static INDIA: Region = Region {
    name: "India",
    zone_prefixes: &["Asia/Kolkata", "Asia/Calcutta"],
    place_keywords: &[
        "india", "bombay", "mumbai", "calcutta", "kolkata", "delhi", "madras", "chennai",
        "bangalore", "pune",
    ],
    bbox: Some((6.0, 37.0, 68.0, 98.0)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1905, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1905, to_year: 1942, rule: OffsetRule::Fixed(4.0 + 51.0 / 60.0) },
        Breakpoint { from_year: 1942, to_year: 1945, rule: OffsetRule::Fixed(6.5) },
        Breakpoint { from_year: 1945, to_year: 1947, rule: OffsetRule::Fixed(4.0 + 51.0 / 60.0) },
        Breakpoint { from_year: 1947, to_year: 1955, rule: OffsetRule::Fixed(5.5) },
    ],
};

static US_EASTERN: Region = Region {
    name: "US Eastern",
    zone_prefixes: &["America/New_York", "US/Eastern", "America/Detroit"],
    place_keywords: &[
        "new york", "boston", "brookline", "washington", "philadelphia", "atlanta", "miami",
    ],
    bbox: Some((24.0, 49.0, -85.0, -66.0)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1883, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1883, to_year: 1917, rule: OffsetRule::Fixed(-5.0) },
        Breakpoint { from_year: 1917, to_year: 1920, rule: OffsetRule::Fixed(-4.0) },
        Breakpoint { from_year: 1920, to_year: 1942, rule: OffsetRule::Fixed(-5.0) },
        Breakpoint { from_year: 1942, to_year: 1945, rule: OffsetRule::Fixed(-4.0) },
        Breakpoint { from_year: 1945, to_year: 1955, rule: OffsetRule::Fixed(-5.0) },
    ],
};

static US_CENTRAL: Region = Region {
    name: "US Central",
    zone_prefixes: &["America/Chicago", "US/Central"],
    place_keywords: &["chicago", "houston", "dallas", "new orleans", "kosciusko", "mississippi"],
    bbox: Some((25.0, 49.0, -102.0, -85.0)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1883, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1883, to_year: 1917, rule: OffsetRule::Fixed(-6.0) },
        Breakpoint { from_year: 1917, to_year: 1920, rule: OffsetRule::Fixed(-5.0) },
        Breakpoint { from_year: 1920, to_year: 1942, rule: OffsetRule::Fixed(-6.0) },
        Breakpoint { from_year: 1942, to_year: 1945, rule: OffsetRule::Fixed(-5.0) },
        Breakpoint { from_year: 1945, to_year: 1955, rule: OffsetRule::Fixed(-6.0) },
    ],
};

static US_MOUNTAIN: Region = Region {
    name: "US Mountain",
    zone_prefixes: &["America/Denver", "US/Mountain", "America/Phoenix"],
    place_keywords: &["denver", "phoenix", "salt lake"],
    bbox: Some((25.0, 49.0, -115.0, -102.0)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1883, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1883, to_year: 1917, rule: OffsetRule::Fixed(-7.0) },
        Breakpoint { from_year: 1917, to_year: 1920, rule: OffsetRule::Fixed(-6.0) },
        Breakpoint { from_year: 1920, to_year: 1942, rule: OffsetRule::Fixed(-7.0) },
        Breakpoint { from_year: 1942, to_year: 1945, rule: OffsetRule::Fixed(-6.0) },
        Breakpoint { from_year: 1945, to_year: 1955, rule: OffsetRule::Fixed(-7.0) },
    ],
};

static US_PACIFIC: Region = Region {
    name: "US Pacific",
    zone_prefixes: &["America/Los_Angeles", "US/Pacific", "America/Seattle"],
    place_keywords: &["los angeles", "san francisco", "seattle", "portland", "california"],
    bbox: Some((32.0, 49.0, -125.0, -115.0)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1883, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1883, to_year: 1917, rule: OffsetRule::Fixed(-8.0) },
        Breakpoint { from_year: 1917, to_year: 1920, rule: OffsetRule::Fixed(-7.0) },
        Breakpoint { from_year: 1920, to_year: 1942, rule: OffsetRule::Fixed(-8.0) },
        Breakpoint { from_year: 1942, to_year: 1945, rule: OffsetRule::Fixed(-7.0) },
        Breakpoint { from_year: 1945, to_year: 1955, rule: OffsetRule::Fixed(-8.0) },
    ],
};

static UK: Region = Region {
    name: "United Kingdom",
    zone_prefixes: &["Europe/London"],
    place_keywords: &["london", "england", "united kingdom", "scotland", "wales", "liverpool"],
    bbox: Some((49.5, 61.0, -8.5, 2.0)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1880, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1880, to_year: 1940, rule: OffsetRule::Fixed(0.0) },
        Breakpoint { from_year: 1940, to_year: 1945, rule: OffsetRule::Fixed(1.0) },
        Breakpoint { from_year: 1945, to_year: 1955, rule: OffsetRule::Fixed(0.0) },
    ],
};

static CENTRAL_EUROPE: Region = Region {
    name: "Central Europe",
    zone_prefixes: &["Europe/Berlin", "Europe/Vienna", "Europe/Zurich"],
    place_keywords: &["germany", "austria", "berlin", "vienna", "munich", "hamburg", "salzburg"],
    bbox: Some((45.5, 55.5, 5.5, 17.5)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1893, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1893, to_year: 1940, rule: OffsetRule::Fixed(1.0) },
        Breakpoint { from_year: 1940, to_year: 1945, rule: OffsetRule::Fixed(2.0) },
        Breakpoint { from_year: 1945, to_year: 1955, rule: OffsetRule::Fixed(1.0) },
    ],
};

// Hong Kong sits inside the China bounding box; it must be tried first.
static HONG_KONG: Region = Region {
    name: "Hong Kong",
    zone_prefixes: &["Asia/Hong_Kong"],
    place_keywords: &["hong kong"],
    bbox: Some((22.1, 22.6, 113.8, 114.5)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1904, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1904, to_year: 1941, rule: OffsetRule::Fixed(8.0) },
        Breakpoint { from_year: 1941, to_year: 1945, rule: OffsetRule::Fixed(9.0) },
        Breakpoint { from_year: 1945, to_year: 1955, rule: OffsetRule::Fixed(8.0) },
    ],
};

static TIBET_CHINA: Region = Region {
    name: "Tibet/China",
    zone_prefixes: &["Asia/Shanghai", "Asia/Urumqi", "Asia/Chongqing", "Asia/Harbin"],
    place_keywords: &["china", "tibet", "lhasa", "beijing", "shanghai", "taktser"],
    bbox: Some((18.0, 54.0, 73.0, 135.0)),
    breakpoints: &[
        Breakpoint { from_year: MIN_YEAR, to_year: 1927, rule: OffsetRule::Lmt },
        Breakpoint { from_year: 1927, to_year: 1955, rule: OffsetRule::Fixed(8.0) },
    ],
};

static REGIONS: [&Region; 9] = [
    &INDIA,
    &US_EASTERN,
    &US_CENTRAL,
    &US_MOUNTAIN,
    &US_PACIFIC,
    &UK,
    &CENTRAL_EUROPE,
    &HONG_KONG,
    &TIBET_CHINA,
];

/// Identify the historical region: zone-id prefix first, then place
/// substring, then lat/lon bounding box.
pub fn identify_region(
    zone_id: &str,
    place: Option<&str>,
    coords: Option<(f64, f64)>,
) -> Option<&'static Region> {
    if let Some(region) = REGIONS.iter().find(|r| r.matches_zone(zone_id)) {
        return Some(region);
    }
    if let Some(place) = place {
        if let Some(region) = REGIONS.iter().find(|r| r.matches_place(place)) {
            return Some(region);
        }
    }
    if let Some((lat, lon)) = coords {
        if let Some(region) = REGIONS.iter().find(|r| r.contains(lat, lon)) {
            return Some(region);
        }
    }
    None
}
